//! Per-bucket object key storage.
//!
//! [`KeyStore`] keeps objects in a `BTreeMap` so keys are always sorted,
//! which is what `ListObjects` / `ListObjectsV2` pagination relies on.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Bound;

use super::object::S3Object;

/// Page size used when a listing does not ask for one.
pub const DEFAULT_MAX_KEYS: usize = 1000;

// ---------------------------------------------------------------------------
// List options / result
// ---------------------------------------------------------------------------

/// Parameters of an object listing.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Only keys starting with this prefix are listed.
    pub prefix: Option<String>,
    /// Keys containing this after the prefix are folded into common prefixes.
    pub delimiter: Option<String>,
    /// List keys strictly after this key.
    pub start_after: Option<String>,
    /// Resume key from a previous page; wins over `start_after`.
    pub continuation_token: Option<String>,
    /// Maximum number of objects to return.
    pub max_keys: Option<usize>,
}

/// Result of a listing.
#[derive(Debug, Clone, Default)]
pub struct ListResult {
    /// Objects in ascending key order.
    pub objects: Vec<S3Object>,
    /// Distinct common prefixes in ascending order.
    pub common_prefixes: Vec<String>,
    /// Whether more objects remain after this page.
    pub is_truncated: bool,
    /// Last key returned, set only when truncated.
    pub next_continuation_token: Option<String>,
}

// ---------------------------------------------------------------------------
// KeyStore
// ---------------------------------------------------------------------------

/// Key store for one bucket. Each key maps to exactly one `S3Object`.
#[derive(Debug, Default)]
pub struct KeyStore {
    objects: BTreeMap<String, S3Object>,
}

impl KeyStore {
    /// Insert or replace an object. Returns the previous object if any.
    pub fn put(&mut self, object: S3Object) -> Option<S3Object> {
        self.objects.insert(object.key.clone(), object)
    }

    /// Get an object by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&S3Object> {
        self.objects.get(key)
    }

    /// Get a mutable reference to an object by key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut S3Object> {
        self.objects.get_mut(key)
    }

    /// Remove an object by key. Returns the removed object if it existed.
    pub fn delete(&mut self, key: &str) -> Option<S3Object> {
        self.objects.remove(key)
    }

    /// Whether an object with `key` exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    /// Number of objects stored.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// List objects.
    ///
    /// Keys are filtered by prefix, visited in ascending order strictly after
    /// the resume key, and folded into common prefixes when a delimiter is
    /// present. Only individually listed objects count towards `max_keys`.
    /// On a truncated page, common prefixes sorting after the last listed key
    /// are left for the next page so pages never overlap.
    #[must_use]
    pub fn list(&self, options: &ListOptions) -> ListResult {
        let prefix = options.prefix.as_deref().unwrap_or_default();
        let delimiter = options.delimiter.as_deref().filter(|d| !d.is_empty());
        let max_keys = options.max_keys.unwrap_or(DEFAULT_MAX_KEYS);
        let marker = options
            .continuation_token
            .as_deref()
            .or(options.start_after.as_deref())
            .filter(|m| !m.is_empty());

        let mut result = ListResult::default();
        if max_keys == 0 {
            return result;
        }

        let lower = match marker {
            Some(marker) if marker >= prefix => Bound::Excluded(marker),
            _ => Bound::Included(prefix),
        };

        let mut prefixes = BTreeSet::new();
        for (key, object) in self.objects.range::<str, _>((lower, Bound::Unbounded)) {
            if !key.starts_with(prefix) {
                break;
            }

            if let Some(delimiter) = delimiter {
                if let Some(pos) = key[prefix.len()..].find(delimiter) {
                    let end = prefix.len() + pos + delimiter.len();
                    prefixes.insert(key[..end].to_owned());
                    continue;
                }
            }

            if result.objects.len() == max_keys {
                result.is_truncated = true;
                break;
            }
            result.objects.push(object.clone());
        }

        if result.is_truncated {
            let last = result.objects.last().map(|o| o.key.clone());
            if let Some(last) = &last {
                prefixes.retain(|p| p.as_str() < last.as_str());
            }
            result.next_continuation_token = last;
        }
        result.common_prefixes = prefixes.into_iter().collect();
        result
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
