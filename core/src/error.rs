//! Error types for the CompTox API client.
//!
//! # Design
//! `Validation` is raised locally before any request is built, so callers can
//! tell "I passed bad arguments" apart from "the service call failed". Every
//! I/O failure, whether a refused connection or a 500, lands in `Request` with
//! the attempted method and URL; the status, if any, lives in the message.

use crate::http::HttpMethod;

/// Errors returned by `ApiClient` and the resource clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An argument was missing or outside its allowed set. Never reaches the network.
    #[error("invalid argument: {0}")]
    Validation(String),

    /// Transport failure, non-2xx status, or a success body that is not JSON.
    #[error("error during {method} request to {url}: {message}")]
    Request {
        method: HttpMethod,
        url: String,
        message: String,
    },

    /// A JSON response did not match the requested typed record.
    #[error("decoding response failed: {0}")]
    Decode(String),

    /// The operation has no working endpoint yet.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub(crate) fn request(method: HttpMethod, url: &str, message: impl Into<String>) -> Self {
        ApiError::Request {
            method,
            url: url.to_string(),
            message: message.into(),
        }
    }
}
