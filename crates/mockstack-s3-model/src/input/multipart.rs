//! Inputs for multipart upload operations.

use std::collections::HashMap;

use crate::request::RequestBody;
use crate::types::{
    ChecksumAlgorithm, CompletedMultipartUpload, ObjectCannedACL, ServerSideEncryption,
    StorageClass,
};

/// Open a multipart upload; metadata applies to the final object.
#[derive(Debug, Clone, Default)]
pub struct CreateMultipartUploadInput {
    /// Canned ACL applied to the resource.
    pub acl: Option<ObjectCannedACL>,
    /// Bucket name.
    pub bucket: String,
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    /// Stored `Cache-Control` value.
    pub cache_control: Option<String>,
    /// Algorithm recorded for the parts.
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    /// Stored `Content-Disposition` value.
    pub content_disposition: Option<String>,
    /// Stored `Content-Encoding` value.
    pub content_encoding: Option<String>,
    /// Stored `Content-Language` value.
    pub content_language: Option<String>,
    /// Media type of the object.
    pub content_type: Option<String>,
    /// Stored `Expires` value.
    pub expires: Option<String>,
    /// Object key.
    pub key: String,
    /// User metadata, keys without the `x-amz-meta-` prefix.
    pub metadata: HashMap<String, String>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Recorded storage class.
    pub storage_class: Option<StorageClass>,
    /// URL-encoded tags, as `k1=v1&k2=v2`.
    pub tagging: Option<String>,
}

/// Upload or replace one part.
#[derive(Debug, Default)]
pub struct UploadPartInput {
    /// Object data.
    pub body: RequestBody,
    /// Bucket name.
    pub bucket: String,
    /// Algorithm used to verify the payload.
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    /// Base64 CRC32 of the payload.
    pub checksum_crc32: Option<String>,
    /// Base64 CRC32C of the payload.
    pub checksum_crc32c: Option<String>,
    /// Base64 SHA-1 of the payload.
    pub checksum_sha1: Option<String>,
    /// Base64 SHA-256 of the payload.
    pub checksum_sha256: Option<String>,
    /// Base64 MD5 the payload must hash to.
    pub content_md5: Option<String>,
    /// Object key.
    pub key: String,
    /// Part number, 1 to 10000.
    pub part_number: Option<i32>,
    /// Upload to act on.
    pub upload_id: String,
}

/// Assemble the listed parts into an object.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadInput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Parts to assemble, in the order given.
    pub multipart_upload: Option<CompletedMultipartUpload>,
    /// Upload to act on.
    pub upload_id: String,
}

/// Discard an upload and its parts.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadInput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Upload to act on.
    pub upload_id: String,
}

/// List uploads still in progress.
#[derive(Debug, Clone, Default)]
pub struct ListMultipartUploadsInput {
    /// Bucket name.
    pub bucket: String,
    /// Start listing after this key.
    pub key_marker: Option<String>,
    /// Page size, capped at 1000.
    pub max_uploads: Option<i32>,
    /// Only keys beginning with this string.
    pub prefix: Option<String>,
    /// With `key_marker`, start after this upload.
    pub upload_id_marker: Option<String>,
}

/// List the parts uploaded so far.
#[derive(Debug, Clone, Default)]
pub struct ListPartsInput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Page size, capped at 1000.
    pub max_parts: Option<i32>,
    /// Start after this part number.
    pub part_number_marker: Option<i32>,
    /// Upload to act on.
    pub upload_id: String,
}
