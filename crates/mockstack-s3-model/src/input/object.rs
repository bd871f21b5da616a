//! Inputs for single-object operations.

use std::collections::HashMap;

use crate::request::RequestBody;
use crate::types::{
    ChecksumAlgorithm, Delete, MetadataDirective, ObjectCannedACL, ServerSideEncryption,
    StorageClass, Tagging, TaggingDirective,
};

/// Store an object, replacing any current version.
#[derive(Debug, Default)]
pub struct PutObjectInput {
    /// Canned ACL applied to the resource.
    pub acl: Option<ObjectCannedACL>,
    /// Object data.
    pub body: RequestBody,
    /// Bucket name.
    pub bucket: String,
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    /// Stored `Cache-Control` value.
    pub cache_control: Option<String>,
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
    /// Stored `Content-Disposition` value.
    pub content_disposition: Option<String>,
    /// Stored `Content-Encoding` value.
    pub content_encoding: Option<String>,
    /// Stored `Content-Language` value.
    pub content_language: Option<String>,
    /// Base64 MD5 the payload must hash to.
    pub content_md5: Option<String>,
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
    /// Customer-key algorithm, echoed back.
    pub sse_customer_algorithm: Option<String>,
    /// MD5 of the customer key, echoed back.
    pub sse_customer_key_md5: Option<String>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Recorded storage class.
    pub storage_class: Option<StorageClass>,
    /// URL-encoded tags, as `k1=v1&k2=v2`.
    pub tagging: Option<String>,
}

/// Read an object, optionally a byte range, subject to preconditions.
#[derive(Debug, Clone, Default)]
pub struct GetObjectInput {
    /// Bucket name.
    pub bucket: String,
    /// Serve only if the ETag matches; `*` matches anything.
    pub if_match: Option<String>,
    /// Serve only if changed after this instant.
    pub if_modified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// Answer 304 if the ETag matches.
    pub if_none_match: Option<String>,
    /// Serve only if unchanged since this instant.
    pub if_unmodified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// Object key.
    pub key: String,
    /// Byte range, as `bytes=start-end`.
    pub range: Option<String>,
    /// Overrides `cache_control` in the reply.
    pub response_cache_control: Option<String>,
    /// Overrides `content_disposition` in the reply.
    pub response_content_disposition: Option<String>,
    /// Overrides `content_encoding` in the reply.
    pub response_content_encoding: Option<String>,
    /// Overrides `content_language` in the reply.
    pub response_content_language: Option<String>,
    /// Overrides `content_type` in the reply.
    pub response_content_type: Option<String>,
    /// Overrides `expires` in the reply.
    pub response_expires: Option<String>,
    /// Target version; `null` addresses an unversioned object.
    pub version_id: Option<String>,
}

/// Read object metadata without the body.
#[derive(Debug, Clone, Default)]
pub struct HeadObjectInput {
    /// Bucket name.
    pub bucket: String,
    /// Serve only if the ETag matches; `*` matches anything.
    pub if_match: Option<String>,
    /// Serve only if changed after this instant.
    pub if_modified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// Answer 304 if the ETag matches.
    pub if_none_match: Option<String>,
    /// Serve only if unchanged since this instant.
    pub if_unmodified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// Object key.
    pub key: String,
    /// Target version; `null` addresses an unversioned object.
    pub version_id: Option<String>,
}

/// Remove one object.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectInput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Target version; `null` addresses an unversioned object.
    pub version_id: Option<String>,
}

/// Remove several objects in one call.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectsInput {
    /// Bucket name.
    pub bucket: String,
    /// Keys to remove.
    pub delete: Delete,
}

/// Server-side copy from `copy_source` to `bucket`/`key`.
#[derive(Debug, Clone, Default)]
pub struct CopyObjectInput {
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
    /// Source as `bucket/key`, optionally with `?versionId=`.
    pub copy_source: String,
    /// Copy only if the source ETag matches.
    pub copy_source_if_match: Option<String>,
    /// Copy only if the source changed after this instant.
    pub copy_source_if_modified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// Copy only if the source ETag differs.
    pub copy_source_if_none_match: Option<String>,
    /// Copy only if the source is unchanged since this instant.
    pub copy_source_if_unmodified_since: Option<chrono::DateTime<chrono::Utc>>,
    /// Stored `Expires` value.
    pub expires: Option<String>,
    /// Object key.
    pub key: String,
    /// User metadata, keys without the `x-amz-meta-` prefix.
    pub metadata: HashMap<String, String>,
    /// `COPY` keeps source metadata, `REPLACE` takes the request's.
    pub metadata_directive: Option<MetadataDirective>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Recorded storage class.
    pub storage_class: Option<StorageClass>,
    /// URL-encoded tags, as `k1=v1&k2=v2`.
    pub tagging: Option<String>,
    /// `COPY` keeps source tags, `REPLACE` takes the request's.
    pub tagging_directive: Option<TaggingDirective>,
}

/// Fetch an object's tags.
#[derive(Debug, Clone, Default)]
pub struct GetObjectTaggingInput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Target version; `null` addresses an unversioned object.
    pub version_id: Option<String>,
}

/// Replace an object's tags.
#[derive(Debug, Clone, Default)]
pub struct PutObjectTaggingInput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Tag set to store.
    pub tagging: Tagging,
    /// Target version; `null` addresses an unversioned object.
    pub version_id: Option<String>,
}

/// Clear an object's tags.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectTaggingInput {
    /// Bucket name.
    pub bucket: String,
    /// Object key.
    pub key: String,
    /// Target version; `null` addresses an unversioned object.
    pub version_id: Option<String>,
}
