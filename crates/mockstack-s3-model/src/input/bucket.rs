//! Inputs for bucket lifecycle operations.

use crate::types::{BucketCannedACL, CreateBucketConfiguration};

/// Create a bucket.
#[derive(Debug, Clone, Default)]
pub struct CreateBucketInput {
    /// Canned ACL applied to the resource.
    pub acl: Option<BucketCannedACL>,
    /// Bucket name.
    pub bucket: String,
    /// Optional region constraint.
    pub create_bucket_configuration: Option<CreateBucketConfiguration>,
}

/// Delete an empty bucket.
#[derive(Debug, Clone, Default)]
pub struct DeleteBucketInput {
    /// Bucket name.
    pub bucket: String,
}

/// Probe whether a bucket exists.
#[derive(Debug, Clone, Default)]
pub struct HeadBucketInput {
    /// Bucket name.
    pub bucket: String,
}

/// List all buckets.
#[derive(Debug, Clone, Default)]
pub struct ListBucketsInput {
    /// Only keys beginning with this string.
    pub prefix: Option<String>,
}

/// Ask for the region of a bucket.
#[derive(Debug, Clone, Default)]
pub struct GetBucketLocationInput {
    /// Bucket name.
    pub bucket: String,
}
