//! Asynchronous JSON-over-POST client.
//!
//! # Design
//! `HttpClient` owns a `Transport` and nothing else, so concurrent calls
//! never share mutable state. Request construction and status/body checks
//! live in `crate::http`; this type only sequences build, execute and parse.

use tracing::{debug, warn};

use crate::error::ApiError;
use crate::http::{self, HttpResponse, RequestEnvelope};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct HttpClient<T> {
    transport: T,
}

impl<T: Transport> HttpClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// POST `body` as JSON to `url` and return the parsed JSON reply.
    ///
    /// Only status 200 counts as success.
    pub async fn post(
        &self,
        url: &str,
        body: Option<&RequestEnvelope>,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self.send(url, body).await?;
        let result = http::parse_json(&response);
        match &result {
            Ok(value) => debug!(%url, result = %value, "response parsed"),
            Err(e) => warn!(%url, error = %e, "response body rejected"),
        }
        result
    }

    /// POST and check the status, leaving the body uninterpreted.
    pub async fn send(
        &self,
        url: &str,
        body: Option<&RequestEnvelope>,
    ) -> Result<HttpResponse, ApiError> {
        let request = http::build_post(url, body)?;
        debug!(%url, params = ?body, "sending request");

        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(%url, error = %e, "no response");
            ApiError::from(e)
        })?;
        debug!(%url, status = response.status, "response received");

        if let Err(e) = http::check_status(&response) {
            warn!(%url, error = %e, "unexpected status");
            return Err(e);
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpRequest;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// Replies with a fixed response and records what it was asked to send.
    struct Canned {
        reply: Result<(u16, &'static str), &'static str>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Canned {
        fn ok(status: u16, body: &'static str) -> Self {
            Self {
                reply: Ok((status, body)),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                reply: Err("connection refused"),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for Canned {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen.lock().push(request);
            match self.reply {
                Ok((status, body)) => Ok(HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                }),
                Err(msg) => Err(TransportError::Connection(msg.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn post_returns_parsed_json() {
        let client = HttpClient::new(Canned::ok(200, r#"{"users":[]}"#));
        let value = client.post("http://h/all", None).await.unwrap();
        assert_eq!(value, serde_json::json!({ "users": [] }));

        let seen = client.transport().seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].url, "http://h/all");
        assert!(seen[0].body.is_none());
        assert_eq!(
            seen[0].headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
    }

    #[tokio::test]
    async fn post_sends_envelope_as_body() {
        let client = HttpClient::new(Canned::ok(200, "{}"));
        let mut envelope = RequestEnvelope::new();
        envelope.insert("name".to_string(), "Alice".to_string());
        client.post("http://h/store", Some(&envelope)).await.unwrap();

        let seen = client.transport().seen.lock();
        let body: serde_json::Value = serde_json::from_str(seen[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["name"], "Alice");
    }

    #[tokio::test]
    async fn post_maps_status_to_reason_phrase() {
        let client = HttpClient::new(Canned::ok(404, "missing"));
        let err = client.post("http://h/all", None).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpError {
                status: 404,
                message: "Not Found".to_string()
            }
        );
    }

    #[tokio::test]
    async fn post_reports_missing_response() {
        let client = HttpClient::new(Canned::unreachable());
        let err = client.post("http://h/all", None).await.unwrap_err();
        assert!(matches!(err, ApiError::NoResponse(_)));
    }

    #[tokio::test]
    async fn post_reports_unparseable_body() {
        let client = HttpClient::new(Canned::ok(200, "<html>"));
        let err = client.post("http://h/all", None).await.unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[tokio::test]
    async fn send_ignores_body_on_success() {
        let client = HttpClient::new(Canned::ok(200, ""));
        let response = client.send("http://h/store", None).await.unwrap();
        assert_eq!(response.status, 200);
        assert!(response.body.is_empty());
    }
}
