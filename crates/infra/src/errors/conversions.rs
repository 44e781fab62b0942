//! Conversions from external infrastructure errors into domain errors.

use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use reqwest::Error as HttpError;
use yametrika_domain::MetrikaError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub MetrikaError);

impl From<InfraError> for MetrikaError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<MetrikaError> for InfraError {
    fn from(value: MetrikaError) -> Self {
        InfraError(value)
    }
}

trait IntoMetrikaError {
    fn into_metrika(self) -> MetrikaError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → MetrikaError */
/* -------------------------------------------------------------------------- */

impl IntoMetrikaError for HttpError {
    fn into_metrika(self) -> MetrikaError {
        if self.is_timeout() {
            return MetrikaError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return MetrikaError::Network(format!("HTTP connection failure: {self}"));
        }

        if self.is_builder() {
            return MetrikaError::Config(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() || self.is_body() {
            return MetrikaError::Decode(format!("failed to read response body: {self}"));
        }

        MetrikaError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_metrika())
    }
}

/* -------------------------------------------------------------------------- */
/* Header construction → MetrikaError */
/* -------------------------------------------------------------------------- */

impl From<InvalidHeaderName> for InfraError {
    fn from(value: InvalidHeaderName) -> Self {
        InfraError(MetrikaError::Config(format!("invalid header name: {value}")))
    }
}

impl From<InvalidHeaderValue> for InfraError {
    fn from(_: InvalidHeaderValue) -> Self {
        // The value may be a credential; keep it out of the message
        InfraError(MetrikaError::Config("invalid header value".into()))
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → MetrikaError */
/* -------------------------------------------------------------------------- */

impl From<url::ParseError> for InfraError {
    fn from(value: url::ParseError) -> Self {
        InfraError(MetrikaError::Config(format!("invalid URL: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
