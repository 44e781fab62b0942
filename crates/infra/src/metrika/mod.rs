//! Endpoint clients
//!
//! [`Metrika`] covers the stable API (management and statistics reports),
//! [`MetrikaV1`] the beta API. Both are thin layers over
//! [`RequestPipeline`](crate::api::RequestPipeline).

mod beta;
mod client;
mod delegates;
mod management;
mod stat;

pub use beta::MetrikaV1;
pub use client::Metrika;
