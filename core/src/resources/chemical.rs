//! Chemical search and MS-ready search.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use super::{check_batch, query_pairs, text_lines, Endpoint};
use crate::client::ApiClient;
use crate::error::ApiError;

pub const STARTS_WITH: Endpoint = Endpoint::get("chemical/search/start-with/{}");
pub const EQUAL: Endpoint = Endpoint::get("chemical/search/equal/{}");
pub const CONTAIN: Endpoint = Endpoint::get("chemical/search/contain/{}");
pub const EQUAL_BATCH: Endpoint = Endpoint::post("chemical/search/equal/");
pub const MSREADY_BY_MASS: Endpoint = Endpoint::get("chemical/msready/search/by-mass/{}/{}");
pub const MSREADY_BY_FORMULA: Endpoint = Endpoint::get("chemical/msready/search/by-formula/{}");
pub const MSREADY_BY_DTXCID: Endpoint = Endpoint::get("chemical/msready/search/by-dtxcid/{}");

/// Query parameters for the GET endpoints. Everything set here is sent
/// as-is; nothing else is added. The default sends no query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    /// Number of records to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<u32>,
    /// Result projection for `contain`, e.g. `chemicalsearchall`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<String>,
    /// Any other parameter the service understands.
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl SearchQuery {
    pub fn top(top: u32) -> Self {
        Self {
            top: Some(top),
            ..Self::default()
        }
    }

    pub fn with_projection(mut self, projection: &str) -> Self {
        self.projection = Some(projection.to_string());
        self
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.extra.insert(key.to_string(), value.to_string());
        self
    }
}

/// Chemical search operations.
#[derive(Debug, Clone, Copy)]
pub struct ChemSearch<'a> {
    client: &'a ApiClient,
}

impl<'a> ChemSearch<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Chemicals whose identifier or name starts with `word` (DTXCID, DTXSID,
    /// CAS number, the first 13 characters of an InChIKey, or a name prefix).
    pub fn starts_with(&self, word: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.search(&STARTS_WITH, word, query)
    }

    /// Exact match on an identifier or a name, synonyms included.
    pub fn equal(&self, word: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.search(&EQUAL, word, query)
    }

    /// Substring match.
    pub fn contain(&self, word: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.search(&CONTAIN, word, query)
    }

    fn search(&self, endpoint: &Endpoint, word: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        let params = query_pairs(query)?;
        self.client.call(endpoint, &[word], &params, None)
    }

    /// Exact match for several words at once, sent as a newline-delimited
    /// text body.
    pub fn equal_batch<S: AsRef<str>>(&self, words: &[S]) -> Result<Value, ApiError> {
        check_batch(words, None, "equal_batch")?;
        self.client.call(&EQUAL_BATCH, &[], &[], Some(text_lines(words)))
    }

    /// MS-ready chemicals with a monoisotopic mass in `[min, max]`.
    pub fn msready_by_mass(&self, min: f64, max: f64, query: &SearchQuery) -> Result<Value, ApiError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 {
            return Err(ApiError::validation("mass bounds must be finite and non-negative"));
        }
        if min > max {
            return Err(ApiError::validation(format!("mass range is inverted: {min} > {max}")));
        }
        let (min, max) = (min.to_string(), max.to_string());
        self.client
            .call(&MSREADY_BY_MASS, &[min.as_str(), max.as_str()], &query_pairs(query)?, None)
    }

    pub fn msready_by_formula(&self, formula: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.client.call(&MSREADY_BY_FORMULA, &[formula], &query_pairs(query)?, None)
    }

    pub fn msready_by_dtxcid(&self, dtxcid: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.client.call(&MSREADY_BY_DTXCID, &[dtxcid], &query_pairs(query)?, None)
    }

    /// Batch search by mass ranges. The service has no usable endpoint for
    /// this yet, so it always fails without sending anything.
    pub fn msready_by_mass_batch(&self, _ranges: &[(f64, f64)]) -> Result<Value, ApiError> {
        Err(ApiError::NotImplemented("msready_by_mass_batch"))
    }
}

impl ApiClient {
    pub fn chemical_search(&self) -> ChemSearch<'_> {
        ChemSearch::new(self)
    }
}
