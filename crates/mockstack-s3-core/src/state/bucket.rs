//! Buckets: their keys plus the optional configuration documents.
//!
//! An [`S3Bucket`] holds the per-bucket state: its objects and a
//! [`BucketConfiguration`] document whose fields are independently optional.
//! An unset field means "not configured", which is distinct from an empty
//! value such as an empty tag set.
//!
//! Interior mutability is achieved through `parking_lot::RwLock` for both the
//! key store and the configuration document.

use chrono::{DateTime, Utc};
use mockstack_s3_model::types::{
    AccessControlPolicy, BucketVersioningStatus, CORSRule, LifecycleRule, LoggingEnabled,
    ServerSideEncryptionRule, Tag, WebsiteConfiguration,
};
use parking_lot::RwLock;

use super::keystore::KeyStore;
use super::object::Owner;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Bucket sub-resource configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketConfiguration {
    /// Versioning status; `None` until versioning is first configured.
    pub versioning: Option<BucketVersioningStatus>,
    /// CORS rules.
    pub cors: Option<Vec<CORSRule>>,
    /// Bucket policy document (JSON text).
    pub policy: Option<String>,
    /// Access control list.
    pub acl: Option<AccessControlPolicy>,
    /// Default encryption rules.
    pub encryption: Option<Vec<ServerSideEncryptionRule>>,
    /// Lifecycle rules.
    pub lifecycle: Option<Vec<LifecycleRule>>,
    /// Static website hosting configuration.
    pub website: Option<WebsiteConfiguration>,
    /// Bucket tag set.
    pub tags: Option<Vec<Tag>>,
    /// Access log target.
    pub logging: Option<LoggingEnabled>,
}

/// A change to one optional configuration field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate<T> {
    /// Leave the field as it is.
    Unchanged,
    /// Replace the field with a value.
    Set(T),
    /// Remove the field.
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    /// Apply this update to `slot`.
    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Unchanged => {}
            Self::Set(value) => *slot = Some(value),
            Self::Clear => *slot = None,
        }
    }
}

/// Shallow per-field merge into a [`BucketConfiguration`].
#[derive(Debug, Clone, Default)]
pub struct BucketConfigurationUpdate {
    /// Versioning status.
    pub versioning: FieldUpdate<BucketVersioningStatus>,
    /// CORS rules.
    pub cors: FieldUpdate<Vec<CORSRule>>,
    /// Policy document.
    pub policy: FieldUpdate<String>,
    /// Access control list.
    pub acl: FieldUpdate<AccessControlPolicy>,
    /// Default encryption rules.
    pub encryption: FieldUpdate<Vec<ServerSideEncryptionRule>>,
    /// Lifecycle rules.
    pub lifecycle: FieldUpdate<Vec<LifecycleRule>>,
    /// Website configuration.
    pub website: FieldUpdate<WebsiteConfiguration>,
    /// Tag set.
    pub tags: FieldUpdate<Vec<Tag>>,
    /// Access log target.
    pub logging: FieldUpdate<LoggingEnabled>,
}

impl BucketConfiguration {
    /// Merge `update` into this configuration.
    pub fn apply(&mut self, update: BucketConfigurationUpdate) {
        update.versioning.apply(&mut self.versioning);
        update.cors.apply(&mut self.cors);
        update.policy.apply(&mut self.policy);
        update.acl.apply(&mut self.acl);
        update.encryption.apply(&mut self.encryption);
        update.lifecycle.apply(&mut self.lifecycle);
        update.website.apply(&mut self.website);
        update.tags.apply(&mut self.tags);
        update.logging.apply(&mut self.logging);
    }

    /// Whether new writes receive a generated version ID.
    #[must_use]
    pub fn is_versioning_enabled(&self) -> bool {
        self.versioning == Some(BucketVersioningStatus::Enabled)
    }
}

// ---------------------------------------------------------------------------
// S3Bucket
// ---------------------------------------------------------------------------

/// An S3 bucket with its objects and configuration.
pub struct S3Bucket {
    /// Bucket name.
    pub name: String,
    /// Region label recorded at creation.
    pub region: String,
    /// When the bucket was created.
    pub creation_date: DateTime<Utc>,
    /// The bucket owner.
    pub owner: Owner,
    /// Object key storage.
    pub objects: RwLock<KeyStore>,
    /// Sub-resource configuration.
    pub config: RwLock<BucketConfiguration>,
}

impl std::fmt::Debug for S3Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Bucket")
            .field("name", &self.name)
            .field("region", &self.region)
            .field("creation_date", &self.creation_date)
            .field("owner", &self.owner)
            .field("objects", &self.objects.read().len())
            .finish_non_exhaustive()
    }
}

impl S3Bucket {
    /// Create an empty, unconfigured bucket.
    #[must_use]
    pub fn new(name: String, region: String, owner: Owner) -> Self {
        Self {
            name,
            region,
            creation_date: Utc::now(),
            owner,
            objects: RwLock::new(KeyStore::default()),
            config: RwLock::new(BucketConfiguration::default()),
        }
    }

    /// Whether the bucket contains zero objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Whether versioning is currently enabled on this bucket.
    #[must_use]
    pub fn is_versioning_enabled(&self) -> bool {
        self.config.read().is_versioning_enabled()
    }

    /// Summarize as a `ListBuckets` entry.
    #[must_use]
    pub fn to_model(&self) -> mockstack_s3_model::types::Bucket {
        mockstack_s3_model::types::Bucket {
            bucket_region: Some(self.region.clone()),
            creation_date: Some(self.creation_date),
            name: Some(self.name.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
