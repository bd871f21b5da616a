//! Bucket lifecycle: create, delete, probe, list and locate.

use mockstack_s3_model::S3Error;
use mockstack_s3_model::input::{
    CreateBucketInput, DeleteBucketInput, GetBucketLocationInput, HeadBucketInput,
    ListBucketsInput,
};
use mockstack_s3_model::output::{
    CreateBucketOutput, DeleteBucketOutput, GetBucketLocationOutput, HeadBucketOutput,
    ListBucketsOutput,
};
use tracing::{debug, info};

use super::bucket_config::canned_acl_policy;
use crate::provider::MockStackS3;
use crate::state::bucket::{BucketConfigurationUpdate, FieldUpdate};
use crate::state::service::DEFAULT_REGION;
use crate::validation::require;

// These handler methods stay async so every operation dispatches the same way.
#[allow(clippy::unused_async)]
impl MockStackS3 {
    /// Create a bucket in the requested or default region.
    ///
    /// The bucket lands in the requested location constraint, or the
    /// configured default region. A canned ACL is stored as the bucket's
    /// access control policy.
    pub async fn handle_create_bucket(
        &self,
        input: CreateBucketInput,
    ) -> Result<CreateBucketOutput, S3Error> {
        require("Bucket", &input.bucket)?;

        let region = input
            .create_bucket_configuration
            .and_then(|c| c.location_constraint)
            .filter(|lc| !lc.is_empty())
            .unwrap_or_else(|| self.config.default_region.clone());
        let owner = self.owner().clone();

        self.state
            .create_bucket(input.bucket.clone(), region.clone(), owner.clone())?;

        if let Some(acl) = input.acl {
            let update = BucketConfigurationUpdate {
                acl: FieldUpdate::Set(canned_acl_policy(&owner, acl)),
                ..BucketConfigurationUpdate::default()
            };
            self.state.update_bucket_configuration(&input.bucket, update)?;
        }

        info!(bucket = %input.bucket, %region, "create_bucket completed");

        Ok(CreateBucketOutput {
            location: Some(format!("/{}", input.bucket)),
        })
    }

    /// Delete an empty S3 bucket.
    pub async fn handle_delete_bucket(
        &self,
        input: DeleteBucketInput,
    ) -> Result<DeleteBucketOutput, S3Error> {
        require("Bucket", &input.bucket)?;

        self.state.delete_bucket(&input.bucket)?;

        info!(bucket = %input.bucket, "delete_bucket completed");
        Ok(DeleteBucketOutput {})
    }

    /// Check that a bucket exists (HEAD Bucket).
    pub async fn handle_head_bucket(
        &self,
        input: HeadBucketInput,
    ) -> Result<HeadBucketOutput, S3Error> {
        require("Bucket", &input.bucket)?;

        let region = self.state.bucket_region(&input.bucket)?;

        debug!(bucket = %input.bucket, "head_bucket completed");
        Ok(HeadBucketOutput {
            bucket_region: Some(region),
        })
    }

    /// List all buckets, sorted by name, optionally filtered by prefix.
    pub async fn handle_list_buckets(
        &self,
        input: ListBucketsInput,
    ) -> Result<ListBucketsOutput, S3Error> {
        let prefix = input.prefix.as_deref().unwrap_or_default();
        let buckets: Vec<_> = self
            .state
            .list_buckets()
            .into_iter()
            .filter(|b| b.name.as_deref().is_some_and(|n| n.starts_with(prefix)))
            .collect();

        debug!(count = buckets.len(), "list_buckets completed");

        Ok(ListBucketsOutput {
            buckets,
            owner: Some(self.owner().to_model()),
            prefix: input.prefix,
        })
    }

    /// Report the region constraint; empty for `us-east-1`.
    ///
    /// `us-east-1` is reported as an absent constraint.
    pub async fn handle_get_bucket_location(
        &self,
        input: GetBucketLocationInput,
    ) -> Result<GetBucketLocationOutput, S3Error> {
        require("Bucket", &input.bucket)?;

        let region = self.state.bucket_region(&input.bucket)?;

        Ok(GetBucketLocationOutput {
            location_constraint: (region != DEFAULT_REGION).then_some(region),
        })
    }
}
