//! # Yametrika Domain
//!
//! Data types shared by every layer of the Metrika client.
//!
//! This crate contains:
//! - The error taxonomy (`MetrikaError`, `ServiceError`) and `Result`
//! - Session configuration and credentials
//! - Tokens, cursors, result pages and the decoded response view
//! - Request models for the management endpoints
//! - Service constants (hosts, OAuth endpoint, header values)
//!
//! ## Architecture
//! - No dependencies on other yametrika crates
//! - No I/O; only data and the invariants that travel with it

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
