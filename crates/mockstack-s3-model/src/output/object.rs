//! Outputs for single-object operations.

use std::collections::HashMap;

use crate::request::StreamingBlob;
use crate::types::{
    CopyObjectResult, DeletedObject, Error, ServerSideEncryption, StorageClass, Tag,
};

/// Outcome of a stored object.
#[derive(Debug, Clone, Default)]
pub struct PutObjectOutput {
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    /// Base64 CRC32 of the payload.
    pub checksum_crc32: Option<String>,
    /// Base64 CRC32C of the payload.
    pub checksum_crc32c: Option<String>,
    /// Base64 SHA-1 of the payload.
    pub checksum_sha1: Option<String>,
    /// Base64 SHA-256 of the payload.
    pub checksum_sha256: Option<String>,
    /// Quoted entity tag.
    pub e_tag: Option<String>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// Object size in bytes.
    pub size: Option<i64>,
    /// Customer-key algorithm, echoed back.
    pub sse_customer_algorithm: Option<String>,
    /// MD5 of the customer key, echoed back.
    pub sse_customer_key_md5: Option<String>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Object body plus metadata, after overrides.
#[derive(Debug, Clone, Default)]
pub struct GetObjectOutput {
    /// Always `bytes`.
    pub accept_ranges: Option<String>,
    /// Object data; `None` on a 304.
    pub body: Option<StreamingBlob>,
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    /// Stored `Cache-Control` value.
    pub cache_control: Option<String>,
    /// Base64 CRC32 of the payload.
    pub checksum_crc32: Option<String>,
    /// Base64 CRC32C of the payload.
    pub checksum_crc32c: Option<String>,
    /// Base64 SHA-1 of the payload.
    pub checksum_sha1: Option<String>,
    /// Base64 SHA-256 of the payload.
    pub checksum_sha256: Option<String>,
    /// Stored `Content-Disposition` value.
    pub content_disposition: Option<String>,
    /// Stored `Content-Encoding` value.
    pub content_encoding: Option<String>,
    /// Stored `Content-Language` value.
    pub content_language: Option<String>,
    /// Byte length of the returned body.
    pub content_length: Option<i64>,
    /// Served byte span, as `bytes start-end/total`.
    pub content_range: Option<String>,
    /// Media type of the object.
    pub content_type: Option<String>,
    /// Quoted entity tag.
    pub e_tag: Option<String>,
    /// Stored `Expires` value.
    pub expires: Option<String>,
    /// Time of the last write.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// User metadata, keys without the `x-amz-meta-` prefix.
    pub metadata: HashMap<String, String>,
    /// Number of parts for a multipart object.
    pub parts_count: Option<i32>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// Customer-key algorithm, echoed back.
    pub sse_customer_algorithm: Option<String>,
    /// MD5 of the customer key, echoed back.
    pub sse_customer_key_md5: Option<String>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Response status: 200, 206 for a range, 304 when not modified.
    pub status_code: http::StatusCode,
    /// Recorded storage class.
    pub storage_class: Option<StorageClass>,
    /// Number of tags on the object.
    pub tag_count: Option<i32>,
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Object metadata.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectOutput {
    /// Always `bytes`.
    pub accept_ranges: Option<String>,
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    /// Stored `Cache-Control` value.
    pub cache_control: Option<String>,
    /// Base64 CRC32 of the payload.
    pub checksum_crc32: Option<String>,
    /// Base64 CRC32C of the payload.
    pub checksum_crc32c: Option<String>,
    /// Base64 SHA-1 of the payload.
    pub checksum_sha1: Option<String>,
    /// Base64 SHA-256 of the payload.
    pub checksum_sha256: Option<String>,
    /// Stored `Content-Disposition` value.
    pub content_disposition: Option<String>,
    /// Stored `Content-Encoding` value.
    pub content_encoding: Option<String>,
    /// Stored `Content-Language` value.
    pub content_language: Option<String>,
    /// Byte length of the returned body.
    pub content_length: Option<i64>,
    /// Media type of the object.
    pub content_type: Option<String>,
    /// Quoted entity tag.
    pub e_tag: Option<String>,
    /// Stored `Expires` value.
    pub expires: Option<String>,
    /// Time of the last write.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
    /// User metadata, keys without the `x-amz-meta-` prefix.
    pub metadata: HashMap<String, String>,
    /// Number of parts for a multipart object.
    pub parts_count: Option<i32>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// Customer-key algorithm, echoed back.
    pub sse_customer_algorithm: Option<String>,
    /// MD5 of the customer key, echoed back.
    pub sse_customer_key_md5: Option<String>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Response status: 200, or 304 when not modified.
    pub status_code: http::StatusCode,
    /// Recorded storage class.
    pub storage_class: Option<StorageClass>,
    /// Number of tags on the object.
    pub tag_count: Option<i32>,
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Outcome of a single delete.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectOutput {
    /// Never set; delete markers are not modelled.
    pub delete_marker: Option<bool>,
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Per-key outcomes of a batch delete.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectsOutput {
    pub deleted: Vec<DeletedObject>,
    pub errors: Vec<Error>,
}

/// Describes the newly written copy.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectOutput {
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    /// ETag and timestamp of the new copy.
    pub copy_object_result: Option<CopyObjectResult>,
    /// Version of the source that was copied.
    pub copy_source_version_id: Option<String>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Tags on an object.
#[derive(Debug, Clone, Default)]
pub struct GetObjectTaggingOutput {
    pub tag_set: Vec<Tag>,
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Version whose tags were replaced.
#[derive(Debug, Clone, Default)]
pub struct PutObjectTaggingOutput {
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Version whose tags were cleared.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectTaggingOutput {
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}
