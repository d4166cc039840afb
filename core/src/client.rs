//! The request adapter every resource client goes through.
//!
//! # Design
//! `ApiClient` holds the service root, the API key and a shared `Transport`,
//! and carries no mutable state between calls. Each call is split in two
//! halves: `build_*` produces an `HttpRequest` (URL joining, key injection,
//! content type) and `parse_response` consumes an `HttpResponse` (status
//! check, JSON parse). `get`/`post`/`put` run the transport in between.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{
    join_url, HttpMethod, HttpRequest, HttpResponse, RequestBody, API_KEY_HEADER, CONTENT_TYPE_HEADER,
    JSON_CONTENT_TYPE,
};
use crate::resources::Endpoint;
use crate::transport::{Transport, UreqTransport};

/// Synchronous client for the CompTox service.
///
/// Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    pub fn with_transport(config: &Config, transport: impl Transport + 'static) -> Self {
        Self {
            base_url: config.base_url().to_string(),
            api_key: config.api_key().to_string(),
            transport: Arc::new(transport),
        }
    }

    /// Same root and transport, different key.
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = api_key.to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get(&self, path: &str, headers: &[(&str, &str)], query: &[(String, String)]) -> HttpRequest {
        self.build(HttpMethod::Get, path, headers, query.to_vec(), None)
    }

    pub fn build_post(&self, path: &str, headers: &[(&str, &str)], body: Option<RequestBody>) -> HttpRequest {
        self.build(HttpMethod::Post, path, headers, Vec::new(), body)
    }

    pub fn build_put(&self, path: &str, headers: &[(&str, &str)], body: Option<RequestBody>) -> HttpRequest {
        self.build(HttpMethod::Put, path, headers, Vec::new(), body)
    }

    fn build(
        &self,
        method: HttpMethod,
        path: &str,
        headers: &[(&str, &str)],
        query: Vec<(String, String)>,
        body: Option<RequestBody>,
    ) -> HttpRequest {
        // Key and content type are owned by the client; caller values are dropped.
        let mut all: Vec<(String, String)> = headers
            .iter()
            .filter(|(name, _)| {
                !name.eq_ignore_ascii_case(API_KEY_HEADER) && !name.eq_ignore_ascii_case(CONTENT_TYPE_HEADER)
            })
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let content_type = body.as_ref().map_or(JSON_CONTENT_TYPE, RequestBody::content_type);
        all.push((CONTENT_TYPE_HEADER.to_string(), content_type.to_string()));
        all.push((API_KEY_HEADER.to_string(), self.api_key.clone()));

        HttpRequest {
            method,
            url: join_url(&self.base_url, path),
            headers: all,
            query,
            body,
        }
    }

    /// Turn a raw response into the parsed JSON document.
    ///
    /// Non-2xx statuses and unparseable bodies become `ApiError::Request`. A
    /// successful empty body parses to `Value::Null`.
    pub fn parse_response(&self, request: &HttpRequest, response: HttpResponse) -> Result<Value, ApiError> {
        if !response.is_success() {
            return Err(ApiError::request(
                request.method,
                &request.url,
                format!("HTTP {}: {}", response.status, response.body.trim()),
            ));
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body)
            .map_err(|e| ApiError::request(request.method, &request.url, format!("invalid JSON in response: {e}")))
    }

    /// Run a built request through the transport and parse the result.
    pub fn execute(&self, request: &HttpRequest) -> Result<Value, ApiError> {
        tracing::debug!(method = %request.method, url = %request.url, query = ?request.query, "sending request");
        let response = self.transport.execute(request).map_err(|e| {
            tracing::warn!(method = %request.method, url = %request.url, error = %e, "transport failure");
            ApiError::request(request.method, &request.url, e.to_string())
        })?;
        tracing::debug!(method = %request.method, url = %request.url, status = response.status, "received response");

        self.parse_response(request, response).inspect_err(|e| {
            tracing::warn!(error = %e, "request failed");
        })
    }

    pub fn get(&self, path: &str, headers: &[(&str, &str)], query: &[(String, String)]) -> Result<Value, ApiError> {
        self.execute(&self.build_get(path, headers, query))
    }

    pub fn post(&self, path: &str, headers: &[(&str, &str)], body: Option<RequestBody>) -> Result<Value, ApiError> {
        self.execute(&self.build_post(path, headers, body))
    }

    pub fn put(&self, path: &str, headers: &[(&str, &str)], body: Option<RequestBody>) -> Result<Value, ApiError> {
        self.execute(&self.build_put(path, headers, body))
    }

    /// Build the request for a table entry: fill the path template, then
    /// attach query pairs (GET) or the body (POST/PUT).
    pub fn build_call(
        &self,
        endpoint: &Endpoint,
        segments: &[&str],
        query: &[(String, String)],
        body: Option<RequestBody>,
    ) -> Result<HttpRequest, ApiError> {
        let path = endpoint.path(segments)?;
        Ok(match endpoint.method {
            HttpMethod::Get => self.build_get(&path, &[], query),
            HttpMethod::Post => self.build_post(&path, &[], body),
            HttpMethod::Put => self.build_put(&path, &[], body),
        })
    }

    pub fn call(
        &self,
        endpoint: &Endpoint,
        segments: &[&str],
        query: &[(String, String)],
        body: Option<RequestBody>,
    ) -> Result<Value, ApiError> {
        let request = self.build_call(endpoint, segments, query, body)?;
        self.execute(&request)
    }
}
