//! HTTP status classification

use yametrika_domain::MetrikaError;

/// Map a response status to a transport error
///
/// `allowed` is the value of the response's `Allowed` header and only feeds
/// the 405 message. Every other status returns `None` and the response goes
/// on to body decoding.
pub fn classify_status(status: u16, allowed: Option<&str>) -> Option<MetrikaError> {
    match status {
        400 => Some(MetrikaError::BadRequest(format!("{status} Check your request"))),
        401 => Some(MetrikaError::Unauthorized(format!("{status}: Check your token"))),
        403 => Some(MetrikaError::Forbidden(format!(
            "{status}: Check your access rights to object"
        ))),
        405 => {
            let mut message = format!("{status}: Method not allowed");
            if let Some(allowed) = allowed {
                message.push_str("\nUse ");
                message.push_str(allowed);
            }
            Some(MetrikaError::MethodNotAllowed(message))
        }
        _ => None,
    }
}
