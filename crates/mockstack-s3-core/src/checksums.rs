//! Digests: ETags, Content-MD5 and the `x-amz-checksum-*` family.
//!
//! Provides functions to compute the MD5 ETag and the additional checksum
//! algorithms carried by the `x-amz-checksum-*` headers.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use digest::Digest;
use mockstack_s3_model::types::ChecksumAlgorithm;

use crate::state::object::ChecksumData;

/// Compute the hex-encoded MD5 digest of `data`.
///
/// # Examples
///
/// ```
/// use mockstack_s3_core::checksums::compute_md5;
///
/// assert_eq!(compute_md5(b"hello"), "5d41402abc4b2a76b9719d911017c592");
/// ```
#[must_use]
pub fn compute_md5(data: &[u8]) -> String {
    let hash = md5::Md5::digest(data);
    hex::encode(hash)
}

/// Compute the quoted hex-encoded MD5 digest of `data`, suitable for use as
/// an S3 ETag.
///
/// # Examples
///
/// ```
/// use mockstack_s3_core::checksums::compute_etag;
///
/// let etag = compute_etag(b"");
/// assert_eq!(etag, "\"d41d8cd98f00b204e9800998ecf8427e\"");
/// ```
#[must_use]
pub fn compute_etag(data: &[u8]) -> String {
    let md5_hex = compute_md5(data);
    format!("\"{md5_hex}\"")
}

/// Compute a base64-encoded checksum for the given algorithm.
#[must_use]
pub fn compute_checksum(algorithm: ChecksumAlgorithm, data: &[u8]) -> String {
    match algorithm {
        ChecksumAlgorithm::Crc32 => {
            let mut hasher = crc32fast::Hasher::new();
            hasher.update(data);
            let value = hasher.finalize();
            BASE64_STANDARD.encode(value.to_be_bytes())
        }
        ChecksumAlgorithm::Crc32c => {
            let value = crc32c::crc32c(data);
            BASE64_STANDARD.encode(value.to_be_bytes())
        }
        ChecksumAlgorithm::Sha1 => {
            let hash = sha1::Sha1::digest(data);
            BASE64_STANDARD.encode(hash)
        }
        ChecksumAlgorithm::Sha256 => {
            let hash = sha2::Sha256::digest(data);
            BASE64_STANDARD.encode(hash)
        }
    }
}

/// Checksum values a caller attached to an upload.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuppliedChecksums<'a> {
    /// `x-amz-checksum-crc32`.
    pub crc32: Option<&'a str>,
    /// `x-amz-checksum-crc32c`.
    pub crc32c: Option<&'a str>,
    /// `x-amz-checksum-sha1`.
    pub sha1: Option<&'a str>,
    /// `x-amz-checksum-sha256`.
    pub sha256: Option<&'a str>,
}

impl<'a> SuppliedChecksums<'a> {
    /// The first supplied value, in CRC32, CRC32C, SHA1, SHA256 order.
    #[must_use]
    pub fn first(&self) -> Option<(ChecksumAlgorithm, &'a str)> {
        [
            (ChecksumAlgorithm::Crc32, self.crc32),
            (ChecksumAlgorithm::Crc32c, self.crc32c),
            (ChecksumAlgorithm::Sha1, self.sha1),
            (ChecksumAlgorithm::Sha256, self.sha256),
        ]
        .into_iter()
        .find_map(|(algorithm, value)| value.map(|v| (algorithm, v)))
    }
}

/// Spread a stored checksum over the CRC32, CRC32C, SHA1, SHA256 response
/// fields.
#[must_use]
pub fn checksum_fields(checksum: Option<&ChecksumData>) -> [Option<String>; 4] {
    [
        ChecksumAlgorithm::Crc32,
        ChecksumAlgorithm::Crc32c,
        ChecksumAlgorithm::Sha1,
        ChecksumAlgorithm::Sha256,
    ]
    .map(|algorithm| checksum.and_then(|c| c.value_for(algorithm)))
}

/// A supplied checksum that does not match the payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Value for x-amz-checksum-{} header is invalid: expected {computed}", .algorithm.as_str().to_ascii_lowercase())]
pub struct ChecksumMismatch {
    /// The algorithm whose value differs.
    pub algorithm: ChecksumAlgorithm,
    /// The value computed from the payload.
    pub computed: String,
}

/// Work out which checksum to record for a payload.
///
/// A supplied value wins over a bare algorithm request; when `verify` is set
/// it must match the payload. With neither, no checksum is recorded.
pub fn resolve_checksum(
    requested: Option<ChecksumAlgorithm>,
    supplied: SuppliedChecksums<'_>,
    data: &[u8],
    verify: bool,
) -> Result<Option<ChecksumData>, ChecksumMismatch> {
    if let Some((algorithm, value)) = supplied.first() {
        let computed = compute_checksum(algorithm, data);
        if verify && computed != value {
            return Err(ChecksumMismatch {
                algorithm,
                computed,
            });
        }
        return Ok(Some(ChecksumData {
            algorithm,
            value: value.to_owned(),
        }));
    }

    Ok(requested.map(|algorithm| ChecksumData {
        algorithm,
        value: compute_checksum(algorithm, data),
    }))
}
