//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! builds `HttpRequest` values and parses `HttpResponse` values; executing the
//! round trip is left to a `Transport` implementation or to a native host
//! calling through the C ABI.
//!
//! Every request the user API issues is a POST carrying JSON, so there is no
//! method field. All fields use owned types so values can cross FFI
//! boundaries without lifetime concerns.

use std::collections::BTreeMap;

use ::http::StatusCode;

use crate::error::ApiError;

/// Header name attached to every request.
pub const CONTENT_TYPE: &str = "content-type";

/// Media type attached to every request.
pub const APPLICATION_JSON: &str = "application/json";

/// Flat string-to-string JSON object sent as a request body.
pub type RequestEnvelope = BTreeMap<String, String>;

/// A POST request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport (or host) after executing an `HttpRequest`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Build a JSON POST request to `url`.
///
/// The content-type header is always set, even when there is no body.
pub fn build_post(url: &str, body: Option<&RequestEnvelope>) -> Result<HttpRequest, ApiError> {
    let body = body
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| ApiError::SerializationError(e.to_string()))?;
    Ok(HttpRequest {
        url: url.to_string(),
        headers: vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())],
        body,
    })
}

/// Reject anything other than 200 with the status's reason phrase.
pub fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status == 200 {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        message: reason_phrase(response.status).to_string(),
    })
}

/// Parse a 200 response body as arbitrary JSON.
pub fn parse_json(response: &HttpResponse) -> Result<serde_json::Value, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Human-readable reason phrase for a status code.
pub fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("unknown status")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_post_without_body() {
        let req = build_post("http://localhost:3000/api/user/all", None).unwrap();
        assert_eq!(req.url, "http://localhost:3000/api/user/all");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_post_serializes_envelope() {
        let mut envelope = RequestEnvelope::new();
        envelope.insert("name".to_string(), "Alice".to_string());
        let req = build_post("http://x/store", Some(&envelope)).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({ "name": "Alice" }));
    }

    #[test]
    fn check_status_accepts_only_200() {
        assert!(check_status(&response(200, "")).is_ok());
        let err = check_status(&response(201, "")).unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpError {
                status: 201,
                message: "Created".to_string()
            }
        );
    }

    #[test]
    fn reason_phrase_known_and_unknown() {
        assert_eq!(reason_phrase(404), "Not Found");
        assert_eq!(reason_phrase(500), "Internal Server Error");
        assert_eq!(reason_phrase(599), "unknown status");
        assert_eq!(reason_phrase(42), "unknown status");
    }

    #[test]
    fn parse_json_reports_bad_body() {
        let err = parse_json(&response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_json_checks_status_before_body() {
        let err = parse_json(&response(503, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
    }
}
