//! Outputs for object listings.

use crate::types::{CommonPrefix, Object};

/// One page of a marker-paged listing.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsOutput {
    pub common_prefixes: Vec<CommonPrefix>,
    pub contents: Vec<Object>,
    pub delimiter: Option<String>,
    pub is_truncated: Option<bool>,
    pub marker: Option<String>,
    pub max_keys: Option<i32>,
    pub name: Option<String>,
    pub next_marker: Option<String>,
    pub prefix: Option<String>,
}

/// One page of a token-paged listing.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsV2Output {
    pub common_prefixes: Vec<CommonPrefix>,
    pub contents: Vec<Object>,
    pub continuation_token: Option<String>,
    pub delimiter: Option<String>,
    pub is_truncated: Option<bool>,
    pub key_count: Option<i32>,
    pub max_keys: Option<i32>,
    pub name: Option<String>,
    pub next_continuation_token: Option<String>,
    pub prefix: Option<String>,
    pub start_after: Option<String>,
}
