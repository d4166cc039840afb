//! Resource clients: thin, declarative wrappers over `ApiClient::call`.
//!
//! # Design
//! Every operation is an `Endpoint` table entry (verb + path template) plus
//! a small shaping step for its arguments. Validation happens while the
//! request is being shaped, so a bad argument never reaches the transport.

pub mod chemical;
pub mod exposure;
pub mod fate;
pub mod hazard;

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::{encode_segment, HttpMethod, RequestBody};

/// One service operation: HTTP verb plus a path template whose `{}`
/// placeholders are filled positionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub template: &'static str,
}

impl Endpoint {
    pub const fn get(template: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            template,
        }
    }

    pub const fn post(template: &'static str) -> Self {
        Self {
            method: HttpMethod::Post,
            template,
        }
    }

    /// Fill the template. Each segment is percent-encoded and must be
    /// non-empty; the number of segments must match the placeholders.
    pub fn path(&self, segments: &[&str]) -> Result<String, ApiError> {
        let pieces: Vec<&str> = self.template.split("{}").collect();
        if pieces.len() - 1 != segments.len() {
            return Err(ApiError::validation(format!(
                "{} expects {} path argument(s), got {}",
                self.template,
                pieces.len() - 1,
                segments.len()
            )));
        }

        let mut path = String::from(pieces[0]);
        for (segment, rest) in segments.iter().zip(&pieces[1..]) {
            if segment.trim().is_empty() {
                return Err(ApiError::validation(format!(
                    "empty path argument for {}",
                    self.template
                )));
            }
            path.push_str(&encode_segment(segment));
            path.push_str(rest);
        }
        Ok(path)
    }
}

/// Flatten a serializable struct into query pairs. `None` fields are skipped;
/// scalars are rendered as their JSON text without quotes.
pub fn query_pairs<S: Serialize>(params: &S) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(params).map_err(|e| ApiError::validation(format!("query parameters: {e}")))?;
    let Value::Object(map) = value else {
        return Err(ApiError::validation("query parameters must be a map"));
    };

    let mut pairs = Vec::with_capacity(map.len());
    for (key, value) in map {
        let rendered = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(ApiError::validation(format!("query parameter {key} is not a scalar")));
            }
        };
        pairs.push((key, rendered));
    }
    Ok(pairs)
}

/// Reject empty batches, blank identifiers and batches over the service cap,
/// if the endpoint has one.
pub fn check_batch<S: AsRef<str>>(ids: &[S], max: Option<usize>, what: &str) -> Result<(), ApiError> {
    if ids.is_empty() {
        return Err(ApiError::validation(format!("{what}: at least one identifier is required")));
    }
    if let Some(max) = max.filter(|max| ids.len() > *max) {
        return Err(ApiError::validation(format!(
            "{what}: at most {max} identifiers per request, got {}",
            ids.len()
        )));
    }
    if ids.iter().any(|id| id.as_ref().trim().is_empty()) {
        return Err(ApiError::validation(format!("{what}: identifiers must not be empty")));
    }
    Ok(())
}

/// Newline-delimited `text/plain` batch body.
pub fn text_lines<S: AsRef<str>>(ids: &[S]) -> RequestBody {
    let lines: Vec<&str> = ids.iter().map(|id| id.as_ref()).collect();
    RequestBody::Text(lines.join("\n"))
}

/// JSON array batch body.
pub fn json_array<S: AsRef<str>>(ids: &[S]) -> RequestBody {
    RequestBody::Json(Value::Array(
        ids.iter().map(|id| Value::String(id.as_ref().to_string())).collect(),
    ))
}
