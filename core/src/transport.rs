//! The I/O seam between `ApiClient` and the network.
//!
//! `ApiClient` never talks to a socket itself; it hands a fully built
//! `HttpRequest` to a `Transport` and gets an `HttpResponse` back. Non-2xx
//! statuses are data here, not errors: status interpretation belongs to the
//! client. Only failures that produce no response at all (DNS, refused
//! connection, timeout, unreadable body) are `TransportError`s.

use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// A request could not be completed at the transport level.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Executes one HTTP round trip. Implementations must be usable from several
/// threads at once.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx come back as responses so the client can report the body.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let result = match request.method {
            HttpMethod::Get => with_parts(self.agent.get(&request.url), request).call(),
            HttpMethod::Post => {
                let builder = with_parts(self.agent.post(&request.url), request);
                match &request.body {
                    Some(body) => builder.send(body.to_wire().as_bytes()),
                    None => builder.send_empty(),
                }
            }
            HttpMethod::Put => {
                let builder = with_parts(self.agent.put(&request.url), request);
                match &request.body {
                    Some(body) => builder.send(body.to_wire().as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        // Batch answers can be larger than ureq's default 10 MiB read limit.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string()
            .map_err(|e| TransportError(format!("failed to read response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}

fn with_parts<B>(mut builder: ureq::RequestBuilder<B>, request: &HttpRequest) -> ureq::RequestBuilder<B> {
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    for (key, value) in &request.query {
        builder = builder.query(key.as_str(), value.as_str());
    }
    builder
}
