//! # Yametrika Core
//!
//! Pure client logic - no network or filesystem access.
//!
//! This crate contains:
//! - Response classification (HTTP status pass and error envelope pass)
//! - Request parameter serialization
//! - The statistics report catalog
//! - The transport port implemented by the infrastructure layer
//!
//! ## Architecture Principles
//! - Only depends on `yametrika-domain`
//! - No HTTP client code; all I/O goes through [`Transport`]
//! - Every function here is deterministic and unit tested

pub mod classification;
pub mod params;
pub mod reports;
pub mod transport_ports;

pub use classification::{classify_envelope, classify_status, decode_envelope};
pub use params::Params;
pub use reports::{ReportShape, StatQuery, StatReport};
pub use transport_ports::{
    HttpMethod, RequestBody, Transport, TransportRequest, TransportResponse,
};
