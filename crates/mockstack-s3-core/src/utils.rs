//! Shared utilities for the S3 emulator.
//!
//! Provides ID generation, range-header parsing, conditional-request
//! evaluation, continuation-token encoding, copy-source parsing and tagging
//! header decoding.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::{DateTime, Utc};
use mockstack_s3_model::S3Error;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

// ---------------------------------------------------------------------------
// ID generation
// ---------------------------------------------------------------------------

/// Generate a random version ID suitable for S3 versioned objects.
///
/// Produces a URL-safe base64 string of 32 characters.
///
/// # Examples
///
/// ```
/// use mockstack_s3_core::utils::generate_version_id;
///
/// let id = generate_version_id();
/// assert_eq!(id.len(), 32);
/// assert!(id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
/// ```
#[must_use]
pub fn generate_version_id() -> String {
    let buf: [u8; 24] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Generate a random multipart upload ID (64 hex characters).
#[must_use]
pub fn generate_upload_id() -> String {
    let buf: [u8; 32] = rand::random();
    hex::encode(buf)
}

// ---------------------------------------------------------------------------
// Conditional requests
// ---------------------------------------------------------------------------

/// Strip surrounding quotes and a weak validator prefix from an ETag.
#[must_use]
pub fn normalize_etag(etag: &str) -> &str {
    let etag = etag.trim();
    let etag = etag.strip_prefix("W/").unwrap_or(etag);
    etag.trim_matches('"')
}

/// Whether `etag` satisfies an `If-Match` header value.
///
/// `*` matches anything; otherwise any comma-separated candidate must equal
/// the ETag once quotes are ignored.
#[must_use]
pub fn is_valid_if_match(etag: &str, if_match: &str) -> bool {
    if if_match.trim() == "*" {
        return true;
    }
    let etag = normalize_etag(etag);
    if_match
        .split(',')
        .any(|candidate| normalize_etag(candidate) == etag)
}

/// Whether `etag` satisfies an `If-None-Match` header value.
#[must_use]
pub fn is_valid_if_none_match(etag: &str, if_none_match: &str) -> bool {
    if if_none_match.trim() == "*" {
        return false;
    }
    let etag = normalize_etag(etag);
    !if_none_match
        .split(',')
        .any(|candidate| normalize_etag(candidate) == etag)
}

/// Conditional headers attached to a read or copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Conditions<'a> {
    /// `If-Match`.
    pub if_match: Option<&'a str>,
    /// `If-None-Match`.
    pub if_none_match: Option<&'a str>,
    /// `If-Modified-Since`.
    pub if_modified_since: Option<DateTime<Utc>>,
    /// `If-Unmodified-Since`.
    pub if_unmodified_since: Option<DateTime<Utc>>,
}

/// Outcome of evaluating [`Conditions`] against an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// Serve the object.
    Proceed,
    /// Answer 304 with status metadata only.
    NotModified,
    /// Fail with 412 PreconditionFailed; the payload names the header.
    Failed(&'static str),
}

impl Conditions<'_> {
    /// Evaluate the headers in S3 order: If-Match, If-None-Match,
    /// If-Modified-Since, If-Unmodified-Since.
    ///
    /// Every supplied header is checked; the first one that fails decides
    /// the outcome. Timestamps are compared at whole-second precision.
    #[must_use]
    pub fn evaluate(&self, etag: &str, last_modified: DateTime<Utc>) -> Precondition {
        let modified = last_modified.timestamp();

        if let Some(if_match) = self.if_match {
            if !is_valid_if_match(etag, if_match) {
                return Precondition::Failed("If-Match");
            }
        }
        if let Some(if_none_match) = self.if_none_match {
            if !is_valid_if_none_match(etag, if_none_match) {
                return Precondition::NotModified;
            }
        }
        if let Some(since) = self.if_modified_since {
            if modified <= since.timestamp() {
                return Precondition::NotModified;
            }
        }
        if let Some(since) = self.if_unmodified_since {
            if modified > since.timestamp() {
                return Precondition::Failed("If-Unmodified-Since");
            }
        }

        Precondition::Proceed
    }
}

// ---------------------------------------------------------------------------
// Range requests
// ---------------------------------------------------------------------------

/// Parse a `Range: bytes=start-end` header against an object of `len` bytes.
///
/// Both ends are optional: `start` defaults to 0 and `end` to `len - 1`, and
/// `end` is clamped to the object. Returns `None` whenever the range should
/// be ignored (malformed, multi-range, empty window, or starting past the
/// end), in which case the full object is served.
///
/// # Examples
///
/// ```
/// use mockstack_s3_core::utils::parse_range;
///
/// assert_eq!(parse_range("bytes=0-4", 13), Some((0, 4)));
/// assert_eq!(parse_range("bytes=5-", 13), Some((5, 12)));
/// assert_eq!(parse_range("bytes=20-30", 13), None);
/// ```
#[must_use]
pub fn parse_range(range: &str, len: u64) -> Option<(u64, u64)> {
    let spec = range.trim().strip_prefix("bytes=")?;
    if spec.contains(',') || len == 0 {
        return None;
    }
    let (start, end) = spec.split_once('-')?;
    let start = match start.trim() {
        "" => 0,
        s => s.parse::<u64>().ok()?,
    };
    let end = match end.trim() {
        "" => len - 1,
        s => s.parse::<u64>().ok()?.min(len - 1),
    };
    (start <= end && start < len).then_some((start, end))
}

// ---------------------------------------------------------------------------
// Pagination tokens
// ---------------------------------------------------------------------------

/// Encode a key as an opaque ListObjectsV2 continuation token.
#[must_use]
pub fn encode_continuation_token(key: &str) -> String {
    BASE64_STANDARD.encode(key.as_bytes())
}

/// Decode a ListObjectsV2 continuation token back to the key it encodes.
pub fn decode_continuation_token(token: &str) -> Result<String, S3Error> {
    const MESSAGE: &str = "The continuation token provided is incorrect";
    let bytes = BASE64_STANDARD
        .decode(token)
        .map_err(|e| S3Error::invalid_argument(MESSAGE).with_source(e))?;
    String::from_utf8(bytes).map_err(|e| S3Error::invalid_argument(MESSAGE).with_source(e))
}

// ---------------------------------------------------------------------------
// Copy source
// ---------------------------------------------------------------------------

/// A parsed `x-amz-copy-source` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopySource {
    /// Source bucket.
    pub bucket: String,
    /// Source key, percent-decoded.
    pub key: String,
    /// Requested source version, if any.
    pub version_id: Option<String>,
}

/// Why a copy source could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CopySourceError {
    /// No `/` separates bucket from key.
    #[error("Invalid copy source: must be in the format bucket/key")]
    MissingSeparator,
    /// Bucket or key is empty.
    #[error("Invalid copy source: bucket and key must not be empty")]
    EmptyComponent,
    /// The key does not decode to UTF-8.
    #[error("Invalid copy source: key contains invalid UTF-8")]
    InvalidEncoding,
}

impl From<CopySourceError> for S3Error {
    fn from(err: CopySourceError) -> Self {
        S3Error::invalid_argument(err.to_string()).with_source(err)
    }
}

/// Parse `bucket/key[?versionId=...]`, with an optional leading slash.
///
/// # Examples
///
/// ```
/// use mockstack_s3_core::utils::parse_copy_source;
///
/// let source = parse_copy_source("/src/dir/a%20b.txt?versionId=v1").unwrap();
/// assert_eq!(source.bucket, "src");
/// assert_eq!(source.key, "dir/a b.txt");
/// assert_eq!(source.version_id.as_deref(), Some("v1"));
/// ```
pub fn parse_copy_source(source: &str) -> Result<CopySource, CopySourceError> {
    let source = source.strip_prefix('/').unwrap_or(source);

    let (path, version_id) = match source.split_once('?') {
        Some((p, query)) => {
            let vid = query
                .split('&')
                .find_map(|param| param.strip_prefix("versionId="))
                .map(String::from);
            (p, vid)
        }
        None => (source, None),
    };

    let (bucket, key) = path
        .split_once('/')
        .ok_or(CopySourceError::MissingSeparator)?;
    if bucket.is_empty() || key.is_empty() {
        return Err(CopySourceError::EmptyComponent);
    }

    let key = percent_encoding::percent_decode_str(key)
        .decode_utf8()
        .map_err(|_| CopySourceError::InvalidEncoding)?
        .into_owned();

    Ok(CopySource {
        bucket: bucket.to_owned(),
        key,
        version_id,
    })
}

// ---------------------------------------------------------------------------
// Headers
// ---------------------------------------------------------------------------

/// Decode an `x-amz-tagging` header (`k1=v1&k2=v2`, URL-encoded).
#[must_use]
pub fn parse_tagging_header(tagging: &str) -> Vec<(String, String)> {
    tagging
        .split('&')
        .filter(|s| !s.is_empty())
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let key = percent_encoding::percent_decode_str(k).decode_utf8().ok()?;
            let value = percent_encoding::percent_decode_str(v).decode_utf8().ok()?;
            Some((key.into_owned(), value.into_owned()))
        })
        .collect()
}

/// Characters left unescaped in an object URL path segment.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the path-style URL of an object under `endpoint`.
#[must_use]
pub fn object_location(endpoint: &str, bucket: &str, key: &str) -> String {
    let key = utf8_percent_encode(key, KEY_ENCODE_SET);
    format!("{}/{bucket}/{key}", endpoint.trim_end_matches('/'))
}
