//! Exposure data: functional use, product data and HTTK parameters.

use serde_json::Value;
use strum_macros::{Display, EnumString};

use super::chemical::SearchQuery;
use super::{query_pairs, Endpoint};
use crate::client::ApiClient;
use crate::error::ApiError;

pub const FUNCTIONAL_USE_PROBABILITY: Endpoint =
    Endpoint::get("exposure/functional-use/probability/search/by-dtxsid/{}");
pub const FUNCTIONAL_USE: Endpoint = Endpoint::get("exposure/functional-use/search/by-dtxsid/{}");
pub const PRODUCT_USE_CATEGORIES: Endpoint = Endpoint::get("exposure/product-data/puc");
pub const PRODUCT_DATA: Endpoint = Endpoint::get("exposure/product-data/search/by-dtxsid/{}");
pub const HTTK: Endpoint = Endpoint::get("exposure/httk/search/by-dtxsid/{}");

/// Which functional-use view to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum FunctionalUseKind {
    /// Predicted probability per harmonized functional use.
    #[strum(serialize = "prob")]
    Probability,
    /// Reported functional uses from source documents.
    #[strum(serialize = "func")]
    Reported,
}

impl FunctionalUseKind {
    /// Parse a `prob`/`func` tag, ignoring case.
    pub fn parse(tag: &str) -> Result<Self, ApiError> {
        tag.parse()
            .map_err(|_| ApiError::validation(format!("functional use type must be 'prob' or 'func', got '{tag}'")))
    }
}

/// Which product-data view to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ProductDataKind {
    /// The product use category list; not tied to a chemical.
    #[strum(serialize = "puc")]
    UseCategories,
    /// All product composition records for one chemical.
    #[strum(serialize = "all")]
    All,
}

impl ProductDataKind {
    pub fn parse(tag: &str) -> Result<Self, ApiError> {
        tag.parse()
            .map_err(|_| ApiError::validation(format!("product data type must be 'puc' or 'all', got '{tag}'")))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FunctionalUse<'a> {
    client: &'a ApiClient,
}

impl<'a> FunctionalUse<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn get(&self, kind: FunctionalUseKind, dtxsid: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        let endpoint = match kind {
            FunctionalUseKind::Probability => &FUNCTIONAL_USE_PROBABILITY,
            FunctionalUseKind::Reported => &FUNCTIONAL_USE,
        };
        self.client.call(endpoint, &[dtxsid], &query_pairs(query)?, None)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Product<'a> {
    client: &'a ApiClient,
}

impl<'a> Product<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// `dtxsid` is required for `All` and ignored for `UseCategories`.
    pub fn get(&self, kind: ProductDataKind, dtxsid: Option<&str>, query: &SearchQuery) -> Result<Value, ApiError> {
        let params = query_pairs(query)?;
        match kind {
            ProductDataKind::UseCategories => self.client.call(&PRODUCT_USE_CATEGORIES, &[], &params, None),
            ProductDataKind::All => {
                let dtxsid =
                    dtxsid.ok_or_else(|| ApiError::validation("a dtxsid is required when product data type is 'all'"))?;
                self.client.call(&PRODUCT_DATA, &[dtxsid], &params, None)
            }
        }
    }
}

/// High-throughput toxicokinetics parameters.
#[derive(Debug, Clone, Copy)]
pub struct Httk<'a> {
    client: &'a ApiClient,
}

impl<'a> Httk<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn get(&self, dtxsid: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.client.call(&HTTK, &[dtxsid], &query_pairs(query)?, None)
    }
}

impl ApiClient {
    pub fn functional_use(&self) -> FunctionalUse<'_> {
        FunctionalUse::new(self)
    }

    pub fn product(&self) -> Product<'_> {
        Product::new(self)
    }

    pub fn httk(&self) -> Httk<'_> {
        Httk::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!(FunctionalUseKind::parse("PROB").unwrap(), FunctionalUseKind::Probability);
        assert_eq!(FunctionalUseKind::parse("func").unwrap(), FunctionalUseKind::Reported);
        assert_eq!(ProductDataKind::parse("Puc").unwrap(), ProductDataKind::UseCategories);
        assert_eq!(ProductDataKind::parse("all").unwrap(), ProductDataKind::All);
    }

    #[test]
    fn unknown_kinds_are_validation_errors() {
        assert!(matches!(FunctionalUseKind::parse("probability"), Err(ApiError::Validation(_))));
        assert!(matches!(ProductDataKind::parse(""), Err(ApiError::Validation(_))));
    }

    #[test]
    fn kinds_display_as_tags() {
        assert_eq!(FunctionalUseKind::Probability.to_string(), "prob");
        assert_eq!(ProductDataKind::UseCategories.to_string(), "puc");
    }
}
