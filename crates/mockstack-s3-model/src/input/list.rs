//! Inputs for object listings.

/// Marker-paged object listing.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsInput {
    /// Bucket name.
    pub bucket: String,
    /// Groups keys sharing a prefix up to this string.
    pub delimiter: Option<String>,
    /// Start listing after this key.
    pub marker: Option<String>,
    /// Page size, capped at 1000.
    pub max_keys: Option<i32>,
    /// Only keys beginning with this string.
    pub prefix: Option<String>,
}

/// Token-paged object listing.
#[derive(Debug, Clone, Default)]
pub struct ListObjectsV2Input {
    /// Bucket name.
    pub bucket: String,
    /// Opaque token from a previous page.
    pub continuation_token: Option<String>,
    /// Groups keys sharing a prefix up to this string.
    pub delimiter: Option<String>,
    /// Include the owner in each entry.
    pub fetch_owner: Option<bool>,
    /// Page size, capped at 1000.
    pub max_keys: Option<i32>,
    /// Only keys beginning with this string.
    pub prefix: Option<String>,
    /// Skip keys up to and including this one.
    pub start_after: Option<String>,
}
