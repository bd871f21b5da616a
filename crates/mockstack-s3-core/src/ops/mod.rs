//! Handlers, one `handle_*` method per operation.
//!
//! Grouped by what they touch. Each submodule adds `handle_*` methods
//! on [`crate::provider::MockStackS3`]; [`crate::dispatch`] routes calls to
//! them.
//!
//! Every handler follows the same shape: check required fields, drain the
//! request body if there is one, then make a single store call and build the
//! output. A failure anywhere before the store call leaves state untouched.

mod bucket;
mod bucket_config;
mod list;
mod multipart;
mod object;
mod object_config;

use mockstack_s3_model::S3Error;

use crate::provider::MockStackS3;
use crate::state::object::S3Object;

impl MockStackS3 {
    /// Fetch the current object under `key`, checking a requested version
    /// against it.
    ///
    /// Fails with `NoSuchBucket`, then `NoSuchKey`, then `NoSuchVersion`.
    pub(crate) fn lookup_object(
        &self,
        bucket: &str,
        key: &str,
        version_id: Option<&str>,
    ) -> Result<S3Object, S3Error> {
        let object = self
            .state
            .get_object(bucket, key)?
            .ok_or_else(|| S3Error::no_such_key(key))?;
        match version_id {
            Some(version_id) if !object.matches_version(version_id) => {
                Err(S3Error::no_such_version(version_id))
            }
            _ => Ok(object),
        }
    }
}

/// Resolve a caller-supplied page size. Negative values count as zero.
pub(crate) fn page_size(requested: Option<i32>, default: usize) -> usize {
    requested.map_or(default, |n| usize::try_from(n).unwrap_or(0))
}

/// Convert a count to the `i32` the wire types use, saturating.
pub(crate) fn wire_count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
