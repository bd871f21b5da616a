//! The root of the store: buckets plus pending uploads.
//!
//! [`S3ServiceState`] owns every bucket, object and in-progress multipart
//! upload. Each public method is one atomic mutation or read: it takes the
//! `DashMap` shard lock and the per-bucket `RwLock` it needs and releases
//! them before returning.
//!
//! Writes into a bucket that does not exist yet create it on the fly with
//! the service's default region and owner.

use bytes::Bytes;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::Ref;
use mockstack_s3_model::types::{Bucket, ChecksumAlgorithm, StorageClass};
use tracing::{debug, info};

use super::bucket::{BucketConfiguration, BucketConfigurationUpdate, S3Bucket};
use super::keystore::{ListOptions, ListResult};
use super::multipart::{
    MultipartUpload, PartListOptions, PartListResult, UploadListOptions, UploadListResult,
    UploadPart, page_uploads,
};
use super::object::{
    ChecksumData, CopyOverrides, NULL_VERSION_ID, ObjectOptions, Owner, S3Object,
};
use crate::checksums::{compute_checksum, compute_etag};
use crate::error::{StoreError, StoreResult};
use crate::utils::{generate_upload_id, generate_version_id};

/// Region assigned to buckets when nothing else is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Top-level S3 service state holding all buckets and uploads.
pub struct S3ServiceState {
    /// Buckets by name.
    buckets: DashMap<String, S3Bucket>,
    /// Pending uploads by upload ID, across all buckets.
    uploads: DashMap<String, MultipartUpload>,
    /// Region for auto-created buckets.
    default_region: String,
    /// Owner for auto-created buckets.
    default_owner: Owner,
}

impl std::fmt::Debug for S3ServiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3ServiceState")
            .field("bucket_count", &self.buckets.len())
            .field("upload_count", &self.uploads.len())
            .field("default_region", &self.default_region)
            .finish_non_exhaustive()
    }
}

impl Default for S3ServiceState {
    fn default() -> Self {
        Self::new()
    }
}

impl S3ServiceState {
    /// Create a new, empty service state in `us-east-1` owned by the mock
    /// account.
    #[must_use]
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_REGION.to_owned(), Owner::default())
    }

    /// Create a new, empty service state with the given defaults for
    /// auto-created buckets.
    #[must_use]
    pub fn with_defaults(default_region: String, default_owner: Owner) -> Self {
        Self {
            buckets: DashMap::new(),
            uploads: DashMap::new(),
            default_region,
            default_owner,
        }
    }

    /// Region used for auto-created buckets.
    #[must_use]
    pub fn default_region(&self) -> &str {
        &self.default_region
    }

    /// Owner used for auto-created buckets.
    #[must_use]
    pub fn default_owner(&self) -> &Owner {
        &self.default_owner
    }

    // -----------------------------------------------------------------------
    // Buckets
    // -----------------------------------------------------------------------

    /// Create `name`, failing if it already exists.
    pub fn create_bucket(&self, name: String, region: String, owner: Owner) -> StoreResult<()> {
        match self.buckets.entry(name) {
            Entry::Occupied(entry) => Err(StoreError::BucketAlreadyExists {
                bucket: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                info!(bucket = %entry.key(), %region, "bucket created");
                let bucket = S3Bucket::new(entry.key().clone(), region, owner);
                entry.insert(bucket);
                Ok(())
            }
        }
    }

    /// Get `name`, creating it with the service's default region and owner
    /// when missing. Every write that may target a new bucket goes through
    /// here.
    pub fn ensure_bucket(&self, name: &str) -> Ref<'_, String, S3Bucket> {
        if let Some(bucket) = self.buckets.get(name) {
            return bucket;
        }
        self.buckets
            .entry(name.to_owned())
            .or_insert_with(|| {
                info!(bucket = %name, "bucket auto-created on write");
                S3Bucket::new(
                    name.to_owned(),
                    self.default_region.clone(),
                    self.default_owner.clone(),
                )
            })
            .downgrade()
    }

    /// Delete an empty bucket, discarding its in-progress uploads.
    pub fn delete_bucket(&self, name: &str) -> StoreResult<()> {
        match self.buckets.entry(name.to_owned()) {
            Entry::Vacant(_) => {
                return Err(StoreError::BucketNotFound {
                    bucket: name.to_owned(),
                });
            }
            Entry::Occupied(entry) => {
                if !entry.get().is_empty() {
                    return Err(StoreError::BucketNotEmpty {
                        bucket: name.to_owned(),
                    });
                }
                entry.remove();
            }
        }

        self.uploads.retain(|_, upload| upload.bucket != name);
        info!(bucket = %name, "bucket deleted");
        Ok(())
    }

    /// Get a reference to a bucket.
    pub fn get_bucket(&self, name: &str) -> StoreResult<Ref<'_, String, S3Bucket>> {
        self.buckets
            .get(name)
            .ok_or_else(|| StoreError::BucketNotFound {
                bucket: name.to_owned(),
            })
    }

    /// Whether `name` is a bucket.
    #[must_use]
    pub fn bucket_exists(&self, name: &str) -> bool {
        self.buckets.contains_key(name)
    }

    /// List all buckets sorted by name.
    #[must_use]
    pub fn list_buckets(&self) -> Vec<Bucket> {
        let mut buckets: Vec<Bucket> = self.buckets.iter().map(|b| b.to_model()).collect();
        buckets.sort_by(|a, b| a.name.cmp(&b.name));
        buckets
    }

    /// The region label a bucket was created with.
    pub fn bucket_region(&self, name: &str) -> StoreResult<String> {
        self.get_bucket(name).map(|b| b.region.clone())
    }

    /// Snapshot of a bucket's configuration.
    pub fn bucket_configuration(&self, name: &str) -> StoreResult<BucketConfiguration> {
        self.get_bucket(name).map(|b| b.config.read().clone())
    }

    /// Merge `update` into a bucket's configuration.
    pub fn update_bucket_configuration(
        &self,
        name: &str,
        update: BucketConfigurationUpdate,
    ) -> StoreResult<()> {
        let bucket = self.get_bucket(name)?;
        bucket.config.write().apply(update);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Objects
    // -----------------------------------------------------------------------

    /// Store an object, replacing any existing one under the same key.
    pub fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        options: ObjectOptions,
    ) -> S3Object {
        let bucket = self.ensure_bucket(bucket);
        let version_id = if bucket.is_versioning_enabled() {
            generate_version_id()
        } else {
            NULL_VERSION_ID.to_owned()
        };

        let object = S3Object {
            key: key.to_owned(),
            etag: compute_etag(&body),
            size: body.len() as u64,
            body,
            last_modified: Utc::now(),
            storage_class: options.storage_class.unwrap_or_default(),
            version_id,
            owner: options.owner.unwrap_or_else(|| bucket.owner.clone()),
            metadata: options.metadata,
            checksum: options.checksum,
            parts_count: options.parts_count,
        };

        bucket.objects.write().put(object.clone());
        debug!(
            bucket = %bucket.name,
            key,
            etag = %object.etag,
            size = object.size,
            "object stored"
        );
        object
    }

    /// Fetch the current object under `key`.
    pub fn get_object(&self, bucket: &str, key: &str) -> StoreResult<Option<S3Object>> {
        let bucket = self.get_bucket(bucket)?;
        let object = bucket.objects.read().get(key).cloned();
        Ok(object)
    }

    /// Whether an object exists under `key`.
    pub fn object_exists(&self, bucket: &str, key: &str) -> StoreResult<bool> {
        let bucket = self.get_bucket(bucket)?;
        let exists = bucket.objects.read().contains(key);
        Ok(exists)
    }

    /// Delete the object under `key`, returning it if something was removed.
    ///
    /// With `version_id`, only the object carrying that version is removed;
    /// anything else is left alone.
    pub fn delete_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> StoreResult<Option<S3Object>> {
        let bucket = self.get_bucket(bucket)?;
        let mut objects = bucket.objects.write();
        if let Some(version_id) = version_id {
            if !objects.get(key).is_some_and(|o| o.matches_version(version_id)) {
                return Ok(None);
            }
        }
        Ok(objects.delete(key))
    }

    /// List objects in a bucket.
    pub fn list_objects(&self, bucket: &str, options: &ListOptions) -> StoreResult<ListResult> {
        let bucket = self.get_bucket(bucket)?;
        let result = bucket.objects.read().list(options);
        Ok(result)
    }

    /// Copy an object, applying `overrides` to the source's metadata.
    pub fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
        overrides: CopyOverrides,
    ) -> StoreResult<S3Object> {
        let source = self
            .get_object(src_bucket, src_key)?
            .ok_or_else(|| StoreError::ObjectNotFound {
                key: src_key.to_owned(),
            })?;

        let checksum = match overrides.checksum_algorithm {
            Some(algorithm) => Some(ChecksumData {
                algorithm,
                value: compute_checksum(algorithm, &source.body),
            }),
            None => source.checksum.clone(),
        };
        let options = ObjectOptions {
            metadata: overrides.apply(&source.metadata),
            storage_class: overrides.storage_class.or(Some(source.storage_class)),
            checksum,
            owner: overrides.owner,
            parts_count: None,
        };

        Ok(self.put_object(dst_bucket, dst_key, source.body, options))
    }

    // -----------------------------------------------------------------------
    // Object tagging
    // -----------------------------------------------------------------------

    /// Replace an object's tags. Returns the object's version ID.
    pub fn put_object_tagging(
        &self,
        bucket: &str,
        key: &str,
        tags: Vec<(String, String)>,
    ) -> StoreResult<String> {
        self.with_object_mut(bucket, key, |object| {
            object.metadata.tagging = tags;
            object.version_id.clone()
        })
    }

    /// An object's tags and version ID.
    pub fn object_tagging(
        &self,
        bucket: &str,
        key: &str,
    ) -> StoreResult<(Vec<(String, String)>, String)> {
        let object = self
            .get_object(bucket, key)?
            .ok_or_else(|| StoreError::ObjectNotFound {
                key: key.to_owned(),
            })?;
        Ok((object.metadata.tagging, object.version_id))
    }

    /// Remove all tags from an object. Returns the object's version ID.
    pub fn delete_object_tagging(&self, bucket: &str, key: &str) -> StoreResult<String> {
        self.with_object_mut(bucket, key, |object| {
            object.metadata.tagging.clear();
            object.version_id.clone()
        })
    }

    fn with_object_mut<T>(
        &self,
        bucket: &str,
        key: &str,
        f: impl FnOnce(&mut S3Object) -> T,
    ) -> StoreResult<T> {
        let bucket = self.get_bucket(bucket)?;
        let mut objects = bucket.objects.write();
        let object = objects
            .get_mut(key)
            .ok_or_else(|| StoreError::ObjectNotFound {
                key: key.to_owned(),
            })?;
        Ok(f(object))
    }

    // -----------------------------------------------------------------------
    // Multipart uploads
    // -----------------------------------------------------------------------

    /// Start a multipart upload for `bucket`/`key`.
    pub fn create_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        options: ObjectOptions,
        checksum_algorithm: Option<ChecksumAlgorithm>,
    ) -> MultipartUpload {
        let owner = {
            let bucket = self.ensure_bucket(bucket);
            options.owner.unwrap_or_else(|| bucket.owner.clone())
        };

        let mut upload = MultipartUpload::new(
            generate_upload_id(),
            bucket.to_owned(),
            key.to_owned(),
            owner,
        );
        upload.metadata = options.metadata;
        upload.storage_class = options.storage_class.unwrap_or(StorageClass::Standard);
        upload.checksum_algorithm = checksum_algorithm;

        debug!(bucket, key, upload_id = %upload.upload_id, "multipart upload created");
        self.uploads.insert(upload.upload_id.clone(), upload.clone());
        upload
    }

    /// Store one part, replacing any earlier part with the same number.
    pub fn upload_part(
        &self,
        upload_id: &str,
        part_number: u32,
        body: Bytes,
        checksum: Option<ChecksumData>,
    ) -> StoreResult<UploadPart> {
        let mut upload = self
            .uploads
            .get_mut(upload_id)
            .ok_or_else(|| StoreError::UploadNotFound {
                upload_id: upload_id.to_owned(),
            })?;

        let part = UploadPart {
            part_number,
            etag: compute_etag(&body),
            size: body.len() as u64,
            body,
            last_modified: Utc::now(),
            checksum,
        };
        upload.put_part(part.clone());
        Ok(part)
    }

    /// Assemble the referenced parts into the final object and discard the
    /// upload.
    ///
    /// Validation happens before anything is changed, so a failure leaves
    /// the upload and its parts intact.
    pub fn complete_multipart_upload(
        &self,
        upload_id: &str,
        parts: &[(u32, String)],
    ) -> StoreResult<S3Object> {
        let Entry::Occupied(entry) = self.uploads.entry(upload_id.to_owned()) else {
            return Err(StoreError::UploadNotFound {
                upload_id: upload_id.to_owned(),
            });
        };

        let body = entry.get().assemble(parts)?;
        let upload = entry.remove();

        let checksum = upload.checksum_algorithm.map(|algorithm| ChecksumData {
            algorithm,
            value: compute_checksum(algorithm, &body),
        });
        let options = ObjectOptions {
            metadata: upload.metadata,
            storage_class: Some(upload.storage_class),
            checksum,
            owner: Some(upload.owner),
            parts_count: u32::try_from(parts.len()).ok(),
        };

        debug!(
            bucket = %upload.bucket,
            key = %upload.key,
            upload_id,
            "multipart upload completed"
        );
        Ok(self.put_object(&upload.bucket, &upload.key, body, options))
    }

    /// Discard an upload and its parts.
    pub fn abort_multipart_upload(&self, upload_id: &str) -> StoreResult<MultipartUpload> {
        self.uploads
            .remove(upload_id)
            .map(|(_, upload)| upload)
            .ok_or_else(|| StoreError::UploadNotFound {
                upload_id: upload_id.to_owned(),
            })
    }

    /// Snapshot of an in-progress upload.
    pub fn get_multipart_upload(&self, upload_id: &str) -> StoreResult<MultipartUpload> {
        self.uploads
            .get(upload_id)
            .map(|upload| upload.clone())
            .ok_or_else(|| StoreError::UploadNotFound {
                upload_id: upload_id.to_owned(),
            })
    }

    /// List in-progress uploads of a bucket, sorted by key then initiation.
    pub fn list_multipart_uploads(
        &self,
        bucket: &str,
        options: &UploadListOptions,
    ) -> StoreResult<UploadListResult> {
        if !self.bucket_exists(bucket) {
            return Err(StoreError::BucketNotFound {
                bucket: bucket.to_owned(),
            });
        }

        let uploads = self
            .uploads
            .iter()
            .filter(|u| u.bucket == bucket)
            .map(|u| u.clone())
            .collect();
        Ok(page_uploads(uploads, options))
    }

    /// List the parts of an upload in ascending part-number order.
    pub fn list_parts(
        &self,
        upload_id: &str,
        options: &PartListOptions,
    ) -> StoreResult<PartListResult> {
        self.uploads
            .get(upload_id)
            .map(|upload| upload.list_parts(options))
            .ok_or_else(|| StoreError::UploadNotFound {
                upload_id: upload_id.to_owned(),
            })
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Remove every bucket, object and upload.
    pub fn reset(&self) {
        debug!(
            buckets = self.buckets.len(),
            uploads = self.uploads.len(),
            "resetting all S3 service state"
        );
        self.uploads.clear();
        self.buckets.clear();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
