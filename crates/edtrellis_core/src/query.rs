//! Query-string codec for filter state.
//!
//! The URL is the only durable representation of the filters, so the mapping
//! must be lossless: `FilterState::from_query_params(&s.to_query_params()) == s`
//! for every `s`. Empty fields are never written.

use std::collections::BTreeMap;

use url::form_urlencoded;

use crate::{FilterField, FilterState};

/// Query parameters keyed by name. Sorted keys give a deterministic encoding.
pub type QueryParams = BTreeMap<String, String>;

impl FilterState {
    /// Reads the recognized keys; missing keys are empty and unknown keys are
    /// ignored. Values are taken verbatim (no trimming).
    pub fn from_query_params(params: &QueryParams) -> Self {
        FilterField::ALL
            .into_iter()
            .fold(FilterState::default(), |state, field| {
                match params.get(field.query_key()) {
                    Some(value) => state.with(field, value.as_str()),
                    None => state,
                }
            })
    }

    /// Only non-empty fields are emitted.
    pub fn to_query_params(&self) -> QueryParams {
        self.active()
            .map(|(field, value)| (field.query_key().to_string(), value.to_string()))
            .collect()
    }

    pub fn from_query_string(query: &str) -> Self {
        Self::from_query_params(&parse_query_string(query))
    }

    pub fn to_query_string(&self) -> String {
        encode_query_string(&self.to_query_params())
    }
}

/// Parses `a=1&b=2`, with or without a leading `?`. When a key repeats, the
/// first occurrence wins.
pub fn parse_query_string(query: &str) -> QueryParams {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut params = QueryParams::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        params
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    params
}

/// Encodes params as `application/x-www-form-urlencoded`, without a leading `?`.
pub fn encode_query_string(params: &QueryParams) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish()
}
