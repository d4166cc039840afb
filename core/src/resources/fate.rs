//! Environmental fate and transport properties.

use serde_json::Value;

use super::chemical::SearchQuery;
use super::{check_batch, json_array, query_pairs, Endpoint};
use crate::client::ApiClient;
use crate::error::ApiError;

pub const FATE: Endpoint = Endpoint::get("chemical/fate/search/by-dtxsid/{}");
pub const FATE_BATCH: Endpoint = Endpoint::post("chemical/fate/search/by-dtxsid/");

pub const FATE_BATCH_MAX: usize = 1000;

#[derive(Debug, Clone, Copy)]
pub struct Fate<'a> {
    client: &'a ApiClient,
}

impl<'a> Fate<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn get(&self, dtxsid: &str, query: &SearchQuery) -> Result<Value, ApiError> {
        self.client.call(&FATE, &[dtxsid], &query_pairs(query)?, None)
    }

    /// Fate records for up to 1000 chemicals, sent as a JSON array.
    pub fn batch<S: AsRef<str>>(&self, dtxsids: &[S]) -> Result<Value, ApiError> {
        check_batch(dtxsids, Some(FATE_BATCH_MAX), "fate batch")?;
        self.client.call(&FATE_BATCH, &[], &[], Some(json_array(dtxsids)))
    }
}

impl ApiClient {
    pub fn fate(&self) -> Fate<'_> {
        Fate::new(self)
    }
}
