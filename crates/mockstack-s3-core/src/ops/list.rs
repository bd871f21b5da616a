//! Object listings, in both pagination styles.

use mockstack_s3_model::S3Error;
use mockstack_s3_model::input::{ListObjectsInput, ListObjectsV2Input};
use mockstack_s3_model::output::{ListObjectsOutput, ListObjectsV2Output};
use mockstack_s3_model::types::CommonPrefix;
use tracing::debug;

use super::{page_size, wire_count};
use crate::provider::MockStackS3;
use crate::state::keystore::ListOptions;
use crate::utils::{decode_continuation_token, encode_continuation_token};
use crate::validation::require;

/// Convert common prefix strings to wire entries.
fn to_common_prefixes(prefixes: Vec<String>) -> Vec<CommonPrefix> {
    prefixes
        .into_iter()
        .map(|prefix| CommonPrefix {
            prefix: Some(prefix),
        })
        .collect()
}

// These handler methods stay async so every operation dispatches the same way.
#[allow(clippy::unused_async)]
impl MockStackS3 {
    /// Marker-paged listing.
    ///
    /// Resumes after `marker`. A truncated page always reports
    /// `next_marker`, even without a delimiter.
    pub async fn handle_list_objects(
        &self,
        input: ListObjectsInput,
    ) -> Result<ListObjectsOutput, S3Error> {
        require("Bucket", &input.bucket)?;

        let max_keys = page_size(input.max_keys, self.config.default_max_keys);
        let options = ListOptions {
            prefix: input.prefix.clone(),
            delimiter: input.delimiter.clone(),
            start_after: input.marker.clone(),
            continuation_token: None,
            max_keys: Some(max_keys),
        };
        let result = self.state.list_objects(&input.bucket, &options)?;

        debug!(
            bucket = %input.bucket,
            count = result.objects.len(),
            prefixes = result.common_prefixes.len(),
            is_truncated = result.is_truncated,
            "list_objects completed"
        );

        Ok(ListObjectsOutput {
            contents: result.objects.iter().map(|o| o.to_listing(true)).collect(),
            common_prefixes: to_common_prefixes(result.common_prefixes),
            delimiter: input.delimiter,
            is_truncated: Some(result.is_truncated),
            marker: input.marker,
            max_keys: Some(wire_count(max_keys)),
            name: Some(input.bucket),
            next_marker: result.next_continuation_token,
            prefix: input.prefix,
        })
    }

    /// Token-paged listing.
    ///
    /// Tokens are opaque to callers; a token that does not decode fails with
    /// `InvalidArgument`.
    pub async fn handle_list_objects_v2(
        &self,
        input: ListObjectsV2Input,
    ) -> Result<ListObjectsV2Output, S3Error> {
        require("Bucket", &input.bucket)?;

        let max_keys = page_size(input.max_keys, self.config.default_max_keys);
        let resume_key = input
            .continuation_token
            .as_deref()
            .map(decode_continuation_token)
            .transpose()?;
        let options = ListOptions {
            prefix: input.prefix.clone(),
            delimiter: input.delimiter.clone(),
            start_after: input.start_after.clone(),
            continuation_token: resume_key,
            max_keys: Some(max_keys),
        };
        let result = self.state.list_objects(&input.bucket, &options)?;

        let fetch_owner = input.fetch_owner.unwrap_or(false);
        let contents: Vec<_> = result
            .objects
            .iter()
            .map(|o| o.to_listing(fetch_owner))
            .collect();
        let key_count = contents.len() + result.common_prefixes.len();

        debug!(
            bucket = %input.bucket,
            key_count,
            is_truncated = result.is_truncated,
            "list_objects_v2 completed"
        );

        Ok(ListObjectsV2Output {
            contents,
            common_prefixes: to_common_prefixes(result.common_prefixes),
            continuation_token: input.continuation_token,
            delimiter: input.delimiter,
            is_truncated: Some(result.is_truncated),
            key_count: Some(wire_count(key_count)),
            max_keys: Some(wire_count(max_keys)),
            name: Some(input.bucket),
            next_continuation_token: result
                .next_continuation_token
                .as_deref()
                .map(encode_continuation_token),
            prefix: input.prefix,
            start_after: input.start_after,
        })
    }
}
