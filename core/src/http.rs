//! HTTP transport types for the CompTox client.
//!
//! # Design
//! Requests and responses are plain data. `ApiClient::build_*` produces an
//! `HttpRequest` without touching the network and `ApiClient::parse_response`
//! consumes an `HttpResponse`; only a `Transport` performs I/O. This keeps the
//! URL, header and body policy deterministic and testable on its own.

use strum_macros::Display;

/// Header carrying the static API key on every request.
pub const API_KEY_HEADER: &str = "x-api-key";
pub const CONTENT_TYPE_HEADER: &str = "content-type";
pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// Request payload. JSON documents go out as `application/json`, raw text
/// (newline-delimited identifier batches) as `text/plain`.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Text(String),
}

impl RequestBody {
    pub fn content_type(&self) -> &'static str {
        match self {
            RequestBody::Json(_) => JSON_CONTENT_TYPE,
            RequestBody::Text(_) => TEXT_CONTENT_TYPE,
        }
    }

    /// Serialized payload as it goes over the wire.
    pub fn to_wire(&self) -> String {
        match self {
            RequestBody::Json(value) => value.to_string(),
            RequestBody::Text(text) => text.clone(),
        }
    }
}

/// An HTTP request described as plain data. `url` is absolute and carries no
/// query string; `query` is appended by the transport.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<RequestBody>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Join a service root and a resource path with exactly one `/`.
///
/// Trailing slashes on `base` and leading/trailing slashes on `path` are
/// dropped, so `join_url("https://host/", "/a/b/")` equals
/// `join_url("https://host", "a/b")`.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_matches('/');
    if path.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{path}")
    }
}

/// Percent-encode a value interpolated into a single path segment.
///
/// Existing `%XX` escapes are kept, so a name that is already encoded goes
/// out unchanged; every other reserved byte is encoded.
pub fn encode_segment(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut encoded = String::with_capacity(segment.len());
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if is_escape(&bytes[i..]) {
            encoded.push_str(&urlencoding::encode(&segment[start..i]));
            encoded.push_str(&segment[i..i + 3]);
            i += 3;
            start = i;
        } else {
            i += 1;
        }
    }
    encoded.push_str(&urlencoding::encode(&segment[start..]));
    encoded
}

fn is_escape(bytes: &[u8]) -> bool {
    matches!(bytes, [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_normalizes_slashes() {
        let a = join_url("https://host/", "/a/b/");
        let b = join_url("https://host", "a/b");
        assert_eq!(a, "https://host/a/b");
        assert_eq!(a, b);
        assert_eq!(join_url("https://host//", "//a"), "https://host/a");
    }

    #[test]
    fn join_with_empty_path_returns_base() {
        assert_eq!(join_url("https://host/", "/"), "https://host");
    }

    #[test]
    fn method_displays_uppercase() {
        assert_eq!(HttpMethod::Get.to_string(), "GET");
        assert_eq!(HttpMethod::Post.to_string(), "POST");
        assert_eq!(HttpMethod::Put.to_string(), "PUT");
    }

    #[test]
    fn body_content_types() {
        assert_eq!(RequestBody::Json(serde_json::json!([])).content_type(), JSON_CONTENT_TYPE);
        assert_eq!(RequestBody::Text("A\nB".into()).content_type(), TEXT_CONTENT_TYPE);
        assert_eq!(RequestBody::Text("A\nB".into()).to_wire(), "A\nB");
        assert_eq!(RequestBody::Json(serde_json::json!(["A", "B"])).to_wire(), r#"["A","B"]"#);
    }

    #[test]
    fn segments_are_percent_encoded() {
        assert_eq!(encode_segment("DTXSID7020182"), "DTXSID7020182");
        assert_eq!(encode_segment("95-16-9"), "95-16-9");
        assert_eq!(encode_segment("a b/c"), "a%20b%2Fc");
    }

    #[test]
    fn existing_escapes_are_kept() {
        assert_eq!(encode_segment("bisphenol%20A"), "bisphenol%20A");
        assert_eq!(encode_segment("a%2Fb c"), "a%2Fb%20c");
        assert_eq!(encode_segment("50%"), "50%25");
        assert_eq!(encode_segment("%zz%4"), "%25zz%254");
        assert_eq!(encode_segment("%41%42"), "%41%42");
    }

    #[test]
    fn header_lookup_ignores_case() {
        let req = HttpRequest {
            method: HttpMethod::Get,
            url: "https://host".into(),
            headers: vec![("X-Api-Key".into(), "k".into())],
            query: Vec::new(),
            body: None,
        };
        assert_eq!(req.header(API_KEY_HEADER), Some("k"));
        assert_eq!(req.header("missing"), None);
    }
}
