//! Service root and default credential shared by every client.

use crate::error::ApiError;

/// Public CompTox service root.
pub const DEFAULT_BASE_URL: &str = "https://api-ccte.epa.gov";

pub const API_KEY_ENV: &str = "COMPTOX_API_KEY";
pub const BASE_URL_ENV: &str = "COMPTOX_BASE_URL";

/// Immutable client configuration. Build it once and hand it to each
/// `ApiClient`; reconfiguring means building a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    base_url: String,
    api_key: String,
}

impl Config {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Configuration for the public service root.
    pub fn with_api_key(api_key: &str) -> Self {
        Self::new(DEFAULT_BASE_URL, api_key)
    }

    /// Read `COMPTOX_API_KEY` and, optionally, `COMPTOX_BASE_URL`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ApiError> {
        let api_key = lookup(API_KEY_ENV)
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ApiError::Config(format!("{API_KEY_ENV} is not set")))?;
        let base_url = lookup(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Ok(Self::new(&base_url, &api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let config = Config::new("http://localhost:3000/", "k");
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.api_key(), "k");
    }

    #[test]
    fn default_root_is_public_service() {
        assert_eq!(Config::with_api_key("k").base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn lookup_requires_api_key() {
        let err = Config::from_lookup(|_| None).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));

        let err = Config::from_lookup(|name| (name == API_KEY_ENV).then(|| "  ".to_string())).unwrap_err();
        assert!(matches!(err, ApiError::Config(_)));
    }

    #[test]
    fn lookup_falls_back_to_default_root() {
        let config = Config::from_lookup(|name| (name == API_KEY_ENV).then(|| "secret".to_string())).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api_key(), "secret");
    }

    #[test]
    fn lookup_honours_base_url_override() {
        let config = Config::from_lookup(|name| match name {
            API_KEY_ENV => Some("secret".to_string()),
            BASE_URL_ENV => Some("http://127.0.0.1:9000/".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:9000");
    }
}
