//! Outputs for multipart upload operations.

use crate::types::{
    ChecksumAlgorithm, Initiator, MultipartUpload, Owner, Part, ServerSideEncryption, StorageClass,
};

/// Identifier of the opened upload.
#[derive(Debug, Clone, Default)]
pub struct CreateMultipartUploadOutput {
    pub bucket: Option<String>,
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    /// Algorithm recorded for the parts.
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    pub key: Option<String>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    pub upload_id: Option<String>,
}

/// ETag of the stored part.
#[derive(Debug, Clone, Default)]
pub struct UploadPartOutput {
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
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
}

/// The assembled object.
#[derive(Debug, Clone, Default)]
pub struct CompleteMultipartUploadOutput {
    pub bucket: Option<String>,
    /// Echoed bucket-key flag for SSE-KMS.
    pub bucket_key_enabled: Option<bool>,
    pub e_tag: Option<String>,
    pub key: Option<String>,
    pub location: Option<String>,
    /// Recorded encryption algorithm; data is never encrypted.
    pub server_side_encryption: Option<ServerSideEncryption>,
    /// KMS key id, echoed back.
    pub ssekms_key_id: Option<String>,
    /// Version assigned; `None` when unversioned.
    pub version_id: Option<String>,
}

/// Empty.
#[derive(Debug, Clone, Default)]
pub struct AbortMultipartUploadOutput {}

/// One page of pending uploads.
#[derive(Debug, Clone, Default)]
pub struct ListMultipartUploadsOutput {
    pub bucket: Option<String>,
    pub is_truncated: Option<bool>,
    pub key_marker: Option<String>,
    pub max_uploads: Option<i32>,
    pub next_key_marker: Option<String>,
    pub next_upload_id_marker: Option<String>,
    pub prefix: Option<String>,
    pub upload_id_marker: Option<String>,
    pub uploads: Vec<MultipartUpload>,
}

/// One page of parts, by part number.
#[derive(Debug, Clone, Default)]
pub struct ListPartsOutput {
    pub bucket: Option<String>,
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    pub initiator: Option<Initiator>,
    pub is_truncated: Option<bool>,
    pub key: Option<String>,
    pub max_parts: Option<i32>,
    pub next_part_number_marker: Option<i32>,
    pub owner: Option<Owner>,
    pub part_number_marker: Option<i32>,
    pub parts: Vec<Part>,
    pub storage_class: Option<StorageClass>,
    pub upload_id: Option<String>,
}
