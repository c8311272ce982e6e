//! The seam between the client core and the network.
//!
//! `HttpClient` never performs I/O itself; it hands each `HttpRequest` to a
//! `Transport`. Tests plug in canned responses, production code uses
//! `UreqTransport`.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes one HTTP round trip.
///
/// Any status code, including 4xx and 5xx, is a successful round trip and
/// must come back as `Ok`. `Err` is reserved for "no response at all".
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking `ureq` agent driven from tokio's blocking pool.
///
/// Must be used from inside a tokio runtime.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl UreqTransport {
    pub fn new() -> Self {
        // Status interpretation belongs to the core, not the agent.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| TransportError::Aborted(e.to_string()))?
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let mut builder = agent.post(&request.url);
    for (key, value) in &request.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    let result = match request.body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    };
    let mut response = result.map_err(|e| TransportError::Connection(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    // A status line arrived, so the body is handed to the core as-is. Bytes
    // that are not UTF-8 or not JSON surface later as a decoding failure.
    let bytes = response
        .body_mut()
        .with_config()
        .limit(u64::MAX)
        .read_to_vec()
        .map_err(|e| TransportError::Connection(e.to_string()))?;
    let body = String::from_utf8_lossy(&bytes).into_owned();

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
