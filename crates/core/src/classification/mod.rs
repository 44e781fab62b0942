//! Response classification
//!
//! Two independent passes turn a raw response into either a decoded object
//! or a [`MetrikaError`](yametrika_domain::MetrikaError):
//!
//! - [`classify_status`] maps the HTTP status (400, 401, 403, 405) to a
//!   transport error before the body is looked at.
//! - [`classify_envelope`] inspects a decoded JSON object for the service's
//!   `errors`/`error` envelope, whatever the status was.
//!
//! [`decode_envelope`] combines JSON decoding with the envelope pass.

pub mod envelope;
pub mod status;

pub use envelope::{classify_envelope, decode_envelope};
pub use status::classify_status;
