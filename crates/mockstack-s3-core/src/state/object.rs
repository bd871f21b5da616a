//! Stored objects, their metadata and owners.
//!
//! This module defines the stored object, its descriptive metadata, the
//! owner identity, and the per-write options the store accepts.

use std::collections::HashMap;
use std::fmt;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use mockstack_s3_model::types::{
    ChecksumAlgorithm, ObjectCannedACL, ServerSideEncryption, StorageClass,
};

/// Canonical user ID of the mock account.
pub const DEFAULT_OWNER_ID: &str =
    "75aa57f09aa0c8caeab4f8c24e99d10f8e7faeebf76c078efc7c6caea54ba06a";

/// Display name of the mock account.
pub const DEFAULT_OWNER_DISPLAY_NAME: &str = "webfile";

/// Version ID reported for objects written while versioning is off.
pub const NULL_VERSION_ID: &str = "null";

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// Account reported as owner of buckets and objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Canonical user ID.
    pub id: String,
    /// Human-readable account name.
    pub display_name: String,
}

impl Owner {
    /// Create an owner from an ID and display name.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }

    /// Convert into the wire-level owner type.
    #[must_use]
    pub fn to_model(&self) -> mockstack_s3_model::types::Owner {
        mockstack_s3_model::types::Owner {
            display_name: Some(self.display_name.clone()),
            id: Some(self.id.clone()),
        }
    }
}

impl Default for Owner {
    fn default() -> Self {
        Self::new(DEFAULT_OWNER_ID, DEFAULT_OWNER_DISPLAY_NAME)
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.display_name, self.id)
    }
}

// ---------------------------------------------------------------------------
// ChecksumData
// ---------------------------------------------------------------------------

/// A caller-supplied checksum kept alongside the data it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumData {
    /// The checksum algorithm.
    pub algorithm: ChecksumAlgorithm,
    /// Base64 digest.
    pub value: String,
}

impl ChecksumData {
    /// The value if this checksum uses `algorithm`.
    #[must_use]
    pub fn value_for(&self, algorithm: ChecksumAlgorithm) -> Option<String> {
        (self.algorithm == algorithm).then(|| self.value.clone())
    }
}

// ---------------------------------------------------------------------------
// ObjectMetadata
// ---------------------------------------------------------------------------

/// Everything about an object except its bytes and identity.
///
/// Covers the representation headers, user metadata (`x-amz-meta-*`),
/// server-side encryption settings, tagging and the canned ACL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectMetadata {
    /// The MIME type of the object.
    pub content_type: Option<String>,
    /// Stored verbatim, e.g. `gzip`.
    pub content_encoding: Option<String>,
    /// Stored verbatim, e.g. `attachment; filename="a.txt"`.
    pub content_disposition: Option<String>,
    /// Stored verbatim, e.g. `en-US`.
    pub content_language: Option<String>,
    /// Stored verbatim, e.g. `max-age=3600`.
    pub cache_control: Option<String>,
    /// Raw `Expires` value; never parsed.
    pub expires: Option<String>,
    /// User metadata with the `x-amz-meta-` prefix stripped.
    pub user_metadata: HashMap<String, String>,
    /// Recorded encryption algorithm. Stored data is plain.
    pub sse_algorithm: Option<ServerSideEncryption>,
    /// KMS key ID, echoed on reads.
    pub sse_kms_key_id: Option<String>,
    /// SSE-KMS bucket-key flag, echoed on reads.
    pub sse_bucket_key_enabled: Option<bool>,
    /// SSE-C algorithm, echoed on reads.
    pub sse_customer_algorithm: Option<String>,
    /// SSE-C key digest, echoed on reads.
    pub sse_customer_key_md5: Option<String>,
    /// Object tags as key-value pairs, in the order supplied.
    pub tagging: Vec<(String, String)>,
    /// Canned ACL given on write.
    pub acl: Option<ObjectCannedACL>,
}

impl ObjectMetadata {
    /// Layer `other` on top of `self`.
    ///
    /// Fields set in `other` win, user metadata entries are merged, and a
    /// non-empty tag list replaces the current one.
    pub fn overlay(&mut self, other: ObjectMetadata) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.content_type, other.content_type);
        take(&mut self.content_encoding, other.content_encoding);
        take(&mut self.content_disposition, other.content_disposition);
        take(&mut self.content_language, other.content_language);
        take(&mut self.cache_control, other.cache_control);
        take(&mut self.expires, other.expires);
        take(&mut self.sse_algorithm, other.sse_algorithm);
        take(&mut self.sse_kms_key_id, other.sse_kms_key_id);
        take(&mut self.sse_bucket_key_enabled, other.sse_bucket_key_enabled);
        take(&mut self.sse_customer_algorithm, other.sse_customer_algorithm);
        take(&mut self.sse_customer_key_md5, other.sse_customer_key_md5);
        take(&mut self.acl, other.acl);
        self.user_metadata.extend(other.user_metadata);
        if !other.tagging.is_empty() {
            self.tagging = other.tagging;
        }
    }
}

// ---------------------------------------------------------------------------
// S3Object
// ---------------------------------------------------------------------------

/// A stored S3 object.
#[derive(Debug, Clone)]
pub struct S3Object {
    /// The object key.
    pub key: String,
    /// The object payload.
    pub body: Bytes,
    /// The entity tag (quoted hex MD5 digest of the body).
    pub etag: String,
    /// Length of `body`.
    pub size: u64,
    /// The time this object was last written.
    pub last_modified: DateTime<Utc>,
    /// Defaults to `STANDARD`.
    pub storage_class: StorageClass,
    /// `"null"` unless written while versioning was enabled.
    pub version_id: String,
    /// Account that wrote the object.
    pub owner: Owner,
    /// Object metadata (headers, tags, encryption, ACL).
    pub metadata: ObjectMetadata,
    /// Checksum supplied on write, if any.
    pub checksum: Option<ChecksumData>,
    /// Set for objects assembled from a multipart upload.
    pub parts_count: Option<u32>,
}

impl S3Object {
    /// Whether this object carries a real version ID.
    #[must_use]
    pub fn is_versioned(&self) -> bool {
        self.version_id != NULL_VERSION_ID
    }

    /// The version ID to echo to callers, omitting `"null"`.
    #[must_use]
    pub fn reported_version_id(&self) -> Option<String> {
        self.is_versioned().then(|| self.version_id.clone())
    }

    /// Whether `version_id` names this object's current version.
    ///
    /// `"null"` always matches an un-versioned object.
    #[must_use]
    pub fn matches_version(&self, version_id: &str) -> bool {
        self.version_id == version_id
    }

    /// Summarize as a listing entry.
    #[must_use]
    pub fn to_listing(&self, with_owner: bool) -> mockstack_s3_model::types::Object {
        mockstack_s3_model::types::Object {
            checksum_algorithm: self
                .checksum
                .as_ref()
                .map(|c| vec![c.algorithm])
                .unwrap_or_default(),
            e_tag: Some(self.etag.clone()),
            key: Some(self.key.clone()),
            last_modified: Some(self.last_modified),
            owner: with_owner.then(|| self.owner.to_model()),
            size: i64::try_from(self.size).ok(),
            storage_class: Some(self.storage_class),
        }
    }
}

// ---------------------------------------------------------------------------
// Write options
// ---------------------------------------------------------------------------

/// Attributes applied to an object on write.
#[derive(Debug, Clone, Default)]
pub struct ObjectOptions {
    /// Descriptive metadata.
    pub metadata: ObjectMetadata,
    /// Storage class; `STANDARD` when absent.
    pub storage_class: Option<StorageClass>,
    /// Checksum recorded with the object.
    pub checksum: Option<ChecksumData>,
    /// Owner; the bucket's owner when absent.
    pub owner: Option<Owner>,
    /// Part count for objects assembled from a multipart upload.
    pub parts_count: Option<u32>,
}

/// Request-supplied overrides applied when copying an object.
#[derive(Debug, Clone, Default)]
pub struct CopyOverrides {
    /// Metadata supplied with the copy request.
    pub metadata: ObjectMetadata,
    /// Replace the source's descriptive metadata instead of overlaying it.
    pub replace_metadata: bool,
    /// Replace the source's tags with `metadata.tagging`.
    pub replace_tagging: bool,
    /// Storage class for the destination.
    pub storage_class: Option<StorageClass>,
    /// Recompute the checksum with this algorithm instead of copying it.
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    /// Owner of the destination object.
    pub owner: Option<Owner>,
}

impl CopyOverrides {
    /// Build the destination metadata from the source's.
    #[must_use]
    pub fn apply(&self, source: &ObjectMetadata) -> ObjectMetadata {
        let mut merged = if self.replace_metadata {
            let mut replaced = self.metadata.clone();
            replaced.tagging = source.tagging.clone();
            replaced
        } else {
            let mut merged = source.clone();
            let mut overlay = self.metadata.clone();
            overlay.tagging.clear();
            merged.overlay(overlay);
            merged
        };

        if self.replace_tagging {
            merged.tagging = self.metadata.tagging.clone();
        }
        merged
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
