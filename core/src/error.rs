//! Error types for the user API client.
//!
//! # Design
//! Three failure classes reach callers: the transport never produced a
//! response, the server answered with something other than 200, or the body
//! did not match the expected shape. Request encoding failures get their own
//! variant so they are never confused with server-side problems.

use thiserror::Error;

/// Errors returned by `HttpClient`, `UserApi` and `UserRepository`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The transport failed before any HTTP response arrived.
    #[error("no response: {0}")]
    NoResponse(String),

    /// The server returned a status other than 200.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// Failure reported by a `Transport` when no response could be obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("transport task aborted: {0}")]
    Aborted(String),
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        ApiError::NoResponse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_display_includes_reason() {
        let err = ApiError::HttpError {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: Internal Server Error");
    }

    #[test]
    fn transport_error_maps_to_no_response() {
        let err: ApiError = TransportError::Connection("refused".to_string()).into();
        assert_eq!(err, ApiError::NoResponse("connection failed: refused".to_string()));
    }
}
