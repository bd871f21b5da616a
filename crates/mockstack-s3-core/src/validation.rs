//! Request validation.
//!
//! Required-field checks run before a handler touches the store. The
//! remaining checks follow the limits S3 documents for keys, tags and user
//! metadata. Bucket names are taken as given.

use std::collections::HashMap;
use std::hash::BuildHasher;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use md5::{Digest, Md5};
use mockstack_s3_model::{S3Error, S3ErrorCode};

/// Maximum number of tags allowed on a single object or bucket.
const MAX_TAGS: usize = 10;

/// Maximum length of a tag key in characters.
const MAX_TAG_KEY_LEN: usize = 128;

/// Maximum length of a tag value in characters.
const MAX_TAG_VALUE_LEN: usize = 256;

/// Maximum total size (in bytes) of all user-defined metadata keys and values.
const MAX_METADATA_SIZE: usize = 2048;

/// Maximum object key length in bytes.
const MAX_KEY_BYTES: usize = 1024;

/// Highest part number S3 accepts.
pub const MAX_PART_NUMBER: u32 = 10_000;

/// Fail with `MissingParameter` when a required string field is empty.
pub fn require(field: &str, value: &str) -> Result<(), S3Error> {
    if value.is_empty() {
        return Err(S3Error::missing_parameter(field));
    }
    Ok(())
}

/// Validate a part number, which must be present and within `1..=10000`.
pub fn validate_part_number(part_number: Option<i32>) -> Result<u32, S3Error> {
    let n = part_number.ok_or_else(|| S3Error::missing_parameter("PartNumber"))?;
    u32::try_from(n)
        .ok()
        .filter(|n| (1..=MAX_PART_NUMBER).contains(n))
        .ok_or_else(|| {
            S3Error::invalid_argument(format!(
                "Part number must be an integer between 1 and {MAX_PART_NUMBER}, inclusive"
            ))
            .with_resource(n.to_string())
        })
}

/// Validate an object key's length.
pub fn validate_object_key(key: &str) -> Result<(), S3Error> {
    if key.len() > MAX_KEY_BYTES {
        return Err(S3Error::new(S3ErrorCode::KeyTooLongError).with_resource(key));
    }
    Ok(())
}

/// Validate a tag set: at most ten tags, bounded key/value lengths, unique keys.
pub fn validate_tags(tags: &[(String, String)]) -> Result<(), S3Error> {
    let invalid = |message: String| S3Error::with_message(S3ErrorCode::InvalidTag, message);

    if tags.len() > MAX_TAGS {
        return Err(invalid(format!(
            "Object tags cannot be greater than {MAX_TAGS}, got {}",
            tags.len()
        )));
    }

    for (i, (key, value)) in tags.iter().enumerate() {
        if key.is_empty() || key.chars().count() > MAX_TAG_KEY_LEN {
            return Err(invalid(format!(
                "The TagKey you have provided is invalid: {key:?}"
            )));
        }
        if value.chars().count() > MAX_TAG_VALUE_LEN {
            return Err(invalid(format!(
                "The TagValue you have provided is invalid: {value:?}"
            )));
        }
        if tags[..i].iter().any(|(k, _)| k == key) {
            return Err(invalid(format!("Cannot provide multiple Tags with the same key: {key}")));
        }
    }

    Ok(())
}

/// Validate the combined size of user-defined metadata.
pub fn validate_metadata<S: BuildHasher>(
    metadata: &HashMap<String, String, S>,
) -> Result<(), S3Error> {
    let total_size: usize = metadata.iter().map(|(k, v)| k.len() + v.len()).sum();

    if total_size > MAX_METADATA_SIZE {
        return Err(S3Error::with_message(
            S3ErrorCode::MetadataTooLarge,
            format!(
                "Your metadata headers exceed the maximum allowed metadata size: {total_size} > {MAX_METADATA_SIZE}"
            ),
        ));
    }

    Ok(())
}

/// Verify a `Content-MD5` header (base64 of the raw digest) against a body.
pub fn validate_content_md5(content_md5: Option<&str>, body: &[u8]) -> Result<(), S3Error> {
    let Some(expected_b64) = content_md5 else {
        return Ok(());
    };

    let expected = BASE64_STANDARD
        .decode(expected_b64)
        .map_err(|e| S3Error::new(S3ErrorCode::InvalidDigest).with_source(e))?;
    if expected.len() != 16 {
        return Err(S3Error::new(S3ErrorCode::InvalidDigest));
    }

    if Md5::digest(body).as_slice() != expected.as_slice() {
        return Err(S3Error::new(S3ErrorCode::BadDigest));
    }

    Ok(())
}
