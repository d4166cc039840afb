//! Hazard (ToxValDB) records.

use serde_json::Value;
use strum_macros::{Display, EnumString};

use super::chemical::SearchQuery;
use super::{check_batch, json_array, query_pairs, Endpoint};
use crate::client::ApiClient;
use crate::error::ApiError;

pub const HAZARD_ALL: Endpoint = Endpoint::get("hazard/search/by-dtxsid/{}");
pub const HAZARD_HUMAN: Endpoint = Endpoint::get("hazard/human/search/by-dtxsid/{}");
pub const HAZARD_ECO: Endpoint = Endpoint::get("hazard/eco/search/by-dtxsid/{}");
pub const HAZARD_ALL_BATCH: Endpoint = Endpoint::post("hazard/search/by-dtxsid/");
pub const HAZARD_HUMAN_BATCH: Endpoint = Endpoint::post("hazard/human/search/by-dtxsid/");
pub const HAZARD_ECO_BATCH: Endpoint = Endpoint::post("hazard/eco/search/by-dtxsid/");

pub const HAZARD_BATCH_MAX: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HazardKind {
    Human,
    Eco,
    All,
}

impl HazardKind {
    pub fn parse(tag: &str) -> Result<Self, ApiError> {
        tag.parse().map_err(|_| {
            ApiError::validation(format!("hazard type must be one of 'human', 'eco' or 'all', got '{tag}'"))
        })
    }

    fn single(self) -> &'static Endpoint {
        match self {
            HazardKind::Human => &HAZARD_HUMAN,
            HazardKind::Eco => &HAZARD_ECO,
            HazardKind::All => &HAZARD_ALL,
        }
    }

    fn batch(self) -> &'static Endpoint {
        match self {
            HazardKind::Human => &HAZARD_HUMAN_BATCH,
            HazardKind::Eco => &HAZARD_ECO_BATCH,
            HazardKind::All => &HAZARD_ALL_BATCH,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Hazard<'a> {
    client: &'a ApiClient,
}

impl<'a> Hazard<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn get(&self, kind: HazardKind, dtxsid: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.client.call(kind.single(), &[dtxsid], &query_pairs(query)?, None)
    }

    /// Hazard records for up to 200 chemicals, sent as a JSON array.
    pub fn batch<S: AsRef<str>>(&self, kind: HazardKind, dtxsids: &[S]) -> Result<Value, ApiError> {
        check_batch(dtxsids, Some(HAZARD_BATCH_MAX), "hazard batch")?;
        self.client.call(kind.batch(), &[], &[], Some(json_array(dtxsids)))
    }
}

impl ApiClient {
    pub fn hazard(&self) -> Hazard<'_> {
        Hazard::new(self)
    }
}
