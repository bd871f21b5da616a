//! Pending multipart uploads.
//!
//! A [`MultipartUpload`] freezes the object attributes given when it is
//! opened and collects [`UploadPart`]s until it is completed or aborted.

use std::collections::BTreeMap;

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use mockstack_s3_model::types::{ChecksumAlgorithm, Initiator, Part, StorageClass};

use super::object::{ChecksumData, ObjectMetadata, Owner};
use crate::checksums::checksum_fields;
use crate::error::{StoreError, StoreResult};
use crate::utils::normalize_etag;

/// Upload page size used when a listing does not ask for one.
pub const DEFAULT_MAX_UPLOADS: usize = 1000;

/// Part page size used when a listing does not ask for one.
pub const DEFAULT_MAX_PARTS: usize = 1000;

/// An upload that has been opened but not yet completed or aborted.
///
/// The metadata recorded here, not anything sent with the parts, becomes
/// the metadata of the assembled object.
#[derive(Debug, Clone)]
pub struct MultipartUpload {
    /// Opaque upload ID handed back to the caller.
    pub upload_id: String,
    /// The bucket the final object lands in.
    pub bucket: String,
    /// Key the assembled object is written to.
    pub key: String,
    /// Initiation time; also orders uploads for the same key.
    pub initiated: DateTime<Utc>,
    /// Reported as both owner and initiator.
    pub owner: Owner,
    /// Attributes for the final object.
    pub metadata: ObjectMetadata,
    /// Storage class recorded on the final object.
    pub storage_class: StorageClass,
    /// The checksum algorithm requested for this upload.
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    /// Parts by number; a re-upload of a number replaces the earlier part.
    pub parts: BTreeMap<u32, UploadPart>,
}

impl MultipartUpload {
    /// Create a new multipart upload with no parts.
    #[must_use]
    pub fn new(upload_id: String, bucket: String, key: String, owner: Owner) -> Self {
        Self {
            upload_id,
            bucket,
            key,
            initiated: Utc::now(),
            owner,
            metadata: ObjectMetadata::default(),
            storage_class: StorageClass::Standard,
            checksum_algorithm: None,
            parts: BTreeMap::new(),
        }
    }

    /// Store `part`, dropping any earlier part with the same number.
    pub fn put_part(&mut self, part: UploadPart) {
        self.parts.insert(part.part_number, part);
    }

    /// Part `part_number`, if uploaded.
    #[must_use]
    pub fn get_part(&self, part_number: u32) -> Option<&UploadPart> {
        self.parts.get(&part_number)
    }

    /// Distinct part numbers received.
    #[must_use]
    pub fn parts_count(&self) -> usize {
        self.parts.len()
    }

    /// Bytes held across every part.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.parts.values().map(|p| p.size).sum()
    }

    /// Concatenate the referenced parts in the order given.
    ///
    /// Every referenced part must exist and its ETag must match the stored
    /// one, ignoring quotes. The upload itself is not modified.
    pub fn assemble(&self, parts: &[(u32, String)]) -> StoreResult<Bytes> {
        let mut chosen = Vec::with_capacity(parts.len());
        for (part_number, etag) in parts {
            let part = self
                .parts
                .get(part_number)
                .ok_or(StoreError::PartNotFound {
                    part_number: *part_number,
                })?;
            if normalize_etag(&part.etag) != normalize_etag(etag) {
                return Err(StoreError::PartETagMismatch {
                    part_number: *part_number,
                    expected: part.etag.clone(),
                });
            }
            chosen.push(part);
        }

        let total = chosen.iter().map(|p| p.body.len()).sum();
        let mut body = BytesMut::with_capacity(total);
        for part in chosen {
            body.extend_from_slice(&part.body);
        }
        Ok(body.freeze())
    }

    /// Summarize as a `ListMultipartUploads` entry.
    #[must_use]
    pub fn to_model(&self) -> mockstack_s3_model::types::MultipartUpload {
        mockstack_s3_model::types::MultipartUpload {
            checksum_algorithm: self.checksum_algorithm,
            initiated: Some(self.initiated),
            initiator: Some(self.initiator()),
            key: Some(self.key.clone()),
            owner: Some(self.owner.to_model()),
            storage_class: Some(self.storage_class),
            upload_id: Some(self.upload_id.clone()),
        }
    }

    /// The initiator, which is always the owner.
    #[must_use]
    pub fn initiator(&self) -> Initiator {
        Initiator {
            display_name: Some(self.owner.display_name.clone()),
            id: Some(self.owner.id.clone()),
        }
    }
}

/// One uploaded part.
#[derive(Debug, Clone)]
pub struct UploadPart {
    /// Position in the upload, 1 through 10000.
    pub part_number: u32,
    /// Quoted MD5 of `data`; completion requires the caller to echo it.
    pub etag: String,
    /// Byte length.
    pub size: u64,
    /// The part payload.
    pub body: Bytes,
    /// When this part was last uploaded.
    pub last_modified: DateTime<Utc>,
    /// Checksum sent with the part, if any.
    pub checksum: Option<ChecksumData>,
}

impl UploadPart {
    /// Summarize as a `ListParts` entry.
    #[must_use]
    pub fn to_model(&self) -> Part {
        let [checksum_crc32, checksum_crc32c, checksum_sha1, checksum_sha256] =
            checksum_fields(self.checksum.as_ref());
        Part {
            checksum_crc32,
            checksum_crc32c,
            checksum_sha1,
            checksum_sha256,
            e_tag: Some(self.etag.clone()),
            last_modified: Some(self.last_modified),
            part_number: i32::try_from(self.part_number).ok(),
            size: i64::try_from(self.size).ok(),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Parameters of a `ListMultipartUploads` call.
#[derive(Debug, Clone, Default)]
pub struct UploadListOptions {
    /// Only uploads whose key starts with this prefix.
    pub prefix: Option<String>,
    /// Resume after this key.
    pub key_marker: Option<String>,
    /// With `key_marker`, resume after this upload of that key.
    pub upload_id_marker: Option<String>,
    /// Maximum number of uploads to return.
    pub max_uploads: Option<usize>,
}

/// A page of in-progress uploads.
#[derive(Debug, Clone, Default)]
pub struct UploadListResult {
    /// Uploads sorted by key, then initiation time.
    pub uploads: Vec<MultipartUpload>,
    /// Whether more uploads remain.
    pub is_truncated: bool,
    /// Key of the last upload returned, set only when truncated.
    pub next_key_marker: Option<String>,
    /// Upload ID of the last upload returned, set only when truncated.
    pub next_upload_id_marker: Option<String>,
}

/// Parameters of a `ListParts` call.
#[derive(Debug, Clone, Default)]
pub struct PartListOptions {
    /// Only parts numbered strictly above this.
    pub part_number_marker: Option<u32>,
    /// Maximum number of parts to return.
    pub max_parts: Option<usize>,
}

/// A page of uploaded parts.
#[derive(Debug, Clone, Default)]
pub struct PartListResult {
    /// Parts in ascending part-number order.
    pub parts: Vec<UploadPart>,
    /// Whether more parts remain.
    pub is_truncated: bool,
    /// Number of the last part returned, set only when truncated.
    pub next_part_number_marker: Option<u32>,
}

impl MultipartUpload {
    /// List parts after `options.part_number_marker`.
    #[must_use]
    pub fn list_parts(&self, options: &PartListOptions) -> PartListResult {
        let marker = options.part_number_marker.unwrap_or(0);
        let max_parts = options.max_parts.unwrap_or(DEFAULT_MAX_PARTS);

        let mut remaining = self.parts.range(marker.saturating_add(1)..).map(|(_, p)| p);
        let parts: Vec<UploadPart> = remaining.by_ref().take(max_parts).cloned().collect();
        let is_truncated = remaining.next().is_some();

        PartListResult {
            next_part_number_marker: if is_truncated {
                parts.last().map(|p| p.part_number)
            } else {
                None
            },
            parts,
            is_truncated,
        }
    }
}

/// Sort, filter and page a set of uploads.
pub(crate) fn page_uploads(
    mut uploads: Vec<MultipartUpload>,
    options: &UploadListOptions,
) -> UploadListResult {
    let prefix = options.prefix.as_deref().unwrap_or_default();
    let max_uploads = options.max_uploads.unwrap_or(DEFAULT_MAX_UPLOADS);

    uploads.retain(|u| u.key.starts_with(prefix));
    uploads.sort_by(|a, b| {
        a.key
            .cmp(&b.key)
            .then(a.initiated.cmp(&b.initiated))
            .then_with(|| a.upload_id.cmp(&b.upload_id))
    });

    if let Some(key_marker) = options.key_marker.as_deref().filter(|m| !m.is_empty()) {
        let resume = options
            .upload_id_marker
            .as_deref()
            .and_then(|marker| {
                uploads
                    .iter()
                    .position(|u| u.key == key_marker && u.upload_id == marker)
            })
            .map_or_else(
                || uploads.partition_point(|u| u.key.as_str() <= key_marker),
                |i| i + 1,
            );
        uploads.drain(..resume);
    }

    let is_truncated = uploads.len() > max_uploads;
    uploads.truncate(max_uploads);
    let last = uploads.last().filter(|_| is_truncated);

    UploadListResult {
        next_key_marker: last.map(|u| u.key.clone()),
        next_upload_id_marker: last.map(|u| u.upload_id.clone()),
        is_truncated,
        uploads,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
