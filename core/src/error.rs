//! Error types for the inspector controller.
//!
//! # Design
//! Errors here are all on the transport tier: the endpoint answered with
//! something that is not a well-formed result payload, or the host could not
//! reach it at all. Application-level failures (bad URL, unreachable target)
//! arrive inside a successfully parsed payload and are not errors from the
//! controller's point of view.

use thiserror::Error;

use crate::view::Role;

/// Errors returned while turning an endpoint response into a payload.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint returned a status other than 200.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body is not JSON of the expected shape.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The JSON parsed but carries neither an `error` nor a `status`.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

/// Failure reported by the host when the request never produced a response.
///
/// `detail` is whatever the host's HTTP stack said, if anything.
#[derive(Debug, Clone, Default, Error)]
#[error("{}", .detail.as_deref().unwrap_or("transport failure"))]
pub struct TransportError {
    pub detail: Option<String>,
}

impl TransportError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// A failure with nothing to say about itself.
    pub fn opaque() -> Self {
        Self::default()
    }
}

/// Raised by `FormController::new` when the view or config cannot support it.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("view is missing required element: {0}")]
    MissingElement(Role),

    #[error("invalid action url: {0:?}")]
    InvalidActionUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    #[test]
    fn display_messages() {
        let err = ApiError::HttpError {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");

        let err = ConfigError::MissingElement(Role::MethodOption(HttpMethod::Put));
        assert_eq!(err.to_string(), "view is missing required element: method option PUT");
    }

    #[test]
    fn transport_error_detail() {
        assert_eq!(TransportError::new("connection refused").to_string(), "connection refused");
        assert_eq!(TransportError::opaque().to_string(), "transport failure");
        assert!(TransportError::opaque().detail.is_none());
    }
}
