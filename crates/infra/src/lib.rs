//! # Yametrika Infrastructure
//!
//! Network and filesystem side of the Metrika client.
//!
//! This crate contains:
//! - The reqwest-backed [`Transport`](yametrika_core::Transport)
//! - OAuth token management
//! - The request pipeline and cursor pagination
//! - Endpoint clients for the stable and beta APIs
//! - Configuration loading from the environment and files
//!
//! ## Architecture
//! - Implements the transport port defined in `yametrika-core`
//! - Contains all "impure" code (HTTP, environment, files)

pub mod api;
pub mod auth;
pub mod config;
pub mod errors;
pub mod http;
pub mod metrika;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used items
pub use api::{PaginationWalker, RequestPipeline, RequestSpec};
pub use auth::TokenManager;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use metrika::{Metrika, MetrikaV1};
