//! Outputs for bucket lifecycle operations.

use crate::types::{Bucket, Owner};

/// Where the new bucket lives.
#[derive(Debug, Clone, Default)]
pub struct CreateBucketOutput {
    /// Path of the new bucket.
    pub location: Option<String>,
}

/// Empty.
#[derive(Debug, Clone, Default)]
pub struct DeleteBucketOutput {}

/// Region of an existing bucket.
#[derive(Debug, Clone, Default)]
pub struct HeadBucketOutput {
    /// Region the bucket was created in.
    pub bucket_region: Option<String>,
}

/// Buckets in name order, with their owner.
#[derive(Debug, Clone, Default)]
pub struct ListBucketsOutput {
    pub buckets: Vec<Bucket>,
    pub owner: Option<Owner>,
    pub prefix: Option<String>,
}

/// Region constraint of a bucket.
#[derive(Debug, Clone, Default)]
pub struct GetBucketLocationOutput {
    /// Absent for `us-east-1`, which S3 reports as an empty constraint.
    pub location_constraint: Option<String>,
}
