//! Object tag sets.
//!
//! Implements `get_object_tagging`, `put_object_tagging` and
//! `delete_object_tagging`.

use mockstack_s3_model::S3Error;
use mockstack_s3_model::input::{
    DeleteObjectTaggingInput, GetObjectTaggingInput, PutObjectTaggingInput,
};
use mockstack_s3_model::output::{
    DeleteObjectTaggingOutput, GetObjectTaggingOutput, PutObjectTaggingOutput,
};
use mockstack_s3_model::types::Tag;
use tracing::debug;

use crate::provider::MockStackS3;
use crate::state::object::NULL_VERSION_ID;
use crate::validation::{require, validate_tags};

// These handler methods stay async so every operation dispatches the same way.
#[allow(clippy::unused_async)]
impl MockStackS3 {
    /// Get tags for an object.
    pub async fn handle_get_object_tagging(
        &self,
        input: GetObjectTaggingInput,
    ) -> Result<GetObjectTaggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;

        let object = self.lookup_object(&input.bucket, &input.key, input.version_id.as_deref())?;
        let version_id = object.reported_version_id();
        let tag_set = object
            .metadata
            .tagging
            .into_iter()
            .map(|(key, value)| Tag { key, value })
            .collect();

        Ok(GetObjectTaggingOutput {
            tag_set,
            version_id,
        })
    }

    /// Replace the tags of an object.
    pub async fn handle_put_object_tagging(
        &self,
        input: PutObjectTaggingInput,
    ) -> Result<PutObjectTaggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;

        let tags: Vec<(String, String)> = input
            .tagging
            .tag_set
            .into_iter()
            .map(|tag| (tag.key, tag.value))
            .collect();
        validate_tags(&tags)?;

        self.lookup_object(&input.bucket, &input.key, input.version_id.as_deref())?;
        let tag_count = tags.len();
        let version_id = self
            .state
            .put_object_tagging(&input.bucket, &input.key, tags)?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            tag_count,
            "put_object_tagging completed"
        );

        Ok(PutObjectTaggingOutput {
            version_id: reported(version_id),
        })
    }

    /// Remove all tags from an object.
    pub async fn handle_delete_object_tagging(
        &self,
        input: DeleteObjectTaggingInput,
    ) -> Result<DeleteObjectTaggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;

        self.lookup_object(&input.bucket, &input.key, input.version_id.as_deref())?;
        let version_id = self
            .state
            .delete_object_tagging(&input.bucket, &input.key)?;

        debug!(bucket = %input.bucket, key = %input.key, "delete_object_tagging completed");

        Ok(DeleteObjectTaggingOutput {
            version_id: reported(version_id),
        })
    }
}

/// Omit the `"null"` version ID from responses.
fn reported(version_id: String) -> Option<String> {
    (version_id != NULL_VERSION_ID).then_some(version_id)
}
