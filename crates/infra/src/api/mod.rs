//! Request pipeline and pagination
//!
//! [`RequestPipeline`] turns a [`RequestSpec`] into a decoded
//! [`ApiObject`](yametrika_domain::ApiObject) or a classified error.
//! [`PaginationWalker`] drives the pipeline across cursor-linked pages.

pub mod pagination;
pub mod pipeline;

pub use pagination::PaginationWalker;
pub use pipeline::{RequestPipeline, RequestSpec};
