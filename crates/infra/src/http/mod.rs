//! HTTP transport

pub mod client;

pub use client::{HttpClient, HttpClientBuilder};
pub use yametrika_core::transport_ports::{
    HttpMethod, RequestBody, Transport, TransportRequest, TransportResponse,
};
