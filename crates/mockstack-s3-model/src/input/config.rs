//! Inputs for bucket sub-resource operations.

use crate::types::{
    AccessControlPolicy, BucketCannedACL, BucketLifecycleConfiguration, BucketLoggingStatus,
    CORSConfiguration, ServerSideEncryptionConfiguration, Tagging, VersioningConfiguration,
    WebsiteConfiguration,
};

/// Declares inputs that only address a bucket.
macro_rules! bucket_inputs {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("S3 ", stringify!($name), ".")]
            #[derive(Debug, Clone, Default)]
            pub struct $name {
                /// Bucket name.
                pub bucket: String,
            }
        )+
    };
}

bucket_inputs! {
    GetBucketVersioningInput,
    GetBucketCorsInput,
    DeleteBucketCorsInput,
    GetBucketPolicyInput,
    DeleteBucketPolicyInput,
    GetBucketAclInput,
    GetBucketEncryptionInput,
    DeleteBucketEncryptionInput,
    GetBucketLifecycleConfigurationInput,
    DeleteBucketLifecycleInput,
    GetBucketWebsiteInput,
    DeleteBucketWebsiteInput,
    GetBucketTaggingInput,
    DeleteBucketTaggingInput,
    GetBucketLoggingInput,
}

/// Enable or suspend versioning.
#[derive(Debug, Clone, Default)]
pub struct PutBucketVersioningInput {
    /// Bucket name.
    pub bucket: String,
    /// Desired versioning state.
    pub versioning_configuration: VersioningConfiguration,
}

/// Replace the bucket's CORS rules.
#[derive(Debug, Clone, Default)]
pub struct PutBucketCorsInput {
    /// Bucket name.
    pub bucket: String,
    /// Rules replacing any existing CORS configuration.
    pub cors_configuration: CORSConfiguration,
}

/// Store a bucket policy.
#[derive(Debug, Clone, Default)]
pub struct PutBucketPolicyInput {
    /// Bucket name.
    pub bucket: String,
    /// Policy JSON, stored as given.
    pub policy: String,
}

/// Set the bucket ACL, from a canned value or explicit grants.
#[derive(Debug, Clone, Default)]
pub struct PutBucketAclInput {
    /// Explicit grants; ignored when a canned `acl` is given.
    pub access_control_policy: Option<AccessControlPolicy>,
    /// Canned ACL applied to the resource.
    pub acl: Option<BucketCannedACL>,
    /// Bucket name.
    pub bucket: String,
}

/// Replace the bucket's encryption configuration.
#[derive(Debug, Clone, Default)]
pub struct PutBucketEncryptionInput {
    /// Bucket name.
    pub bucket: String,
    /// Default encryption rules to store.
    pub server_side_encryption_configuration: ServerSideEncryptionConfiguration,
}

/// Replace the bucket's lifecycle configuration.
#[derive(Debug, Clone, Default)]
pub struct PutBucketLifecycleConfigurationInput {
    /// Bucket name.
    pub bucket: String,
    /// Rules replacing the stored lifecycle.
    pub lifecycle_configuration: Option<BucketLifecycleConfiguration>,
}

/// Replace the bucket's website configuration.
#[derive(Debug, Clone, Default)]
pub struct PutBucketWebsiteInput {
    /// Bucket name.
    pub bucket: String,
    /// Replaces the stored website configuration.
    pub website_configuration: WebsiteConfiguration,
}

/// Replace the bucket's tags.
#[derive(Debug, Clone, Default)]
pub struct PutBucketTaggingInput {
    /// Bucket name.
    pub bucket: String,
    /// Tag set to store.
    pub tagging: Tagging,
}

/// Enable or clear access logging.
#[derive(Debug, Clone, Default)]
pub struct PutBucketLoggingInput {
    /// Bucket name.
    pub bucket: String,
    /// Replaces the stored logging status.
    pub bucket_logging_status: BucketLoggingStatus,
}
