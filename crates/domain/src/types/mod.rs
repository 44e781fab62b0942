//! Domain types and models

pub mod auth;
pub mod management;
pub mod object;
pub mod pagination;

pub use auth::{AuthToken, Credentials, Grant};
pub use management::{CounterListQuery, FilterSpec, GoalSpec, GrantSpec, OperationSpec};
pub use object::{ApiGeneration, ApiObject};
pub use pagination::{Cursor, ResultPage};
