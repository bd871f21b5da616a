//! Outputs for bucket sub-resource operations.

use crate::types::{
    BucketVersioningStatus, CORSRule, ErrorDocument, Grant, IndexDocument, LifecycleRule,
    LoggingEnabled, Owner, RedirectAllRequestsTo, RoutingRule, ServerSideEncryptionConfiguration,
    Tag,
};

/// Declares outputs that carry no fields.
macro_rules! empty_outputs {
    ($($name:ident),+ $(,)?) => {
        $(
            #[doc = concat!("S3 ", stringify!($name), ".")]
            #[derive(Debug, Clone, Default)]
            pub struct $name {}
        )+
    };
}

empty_outputs! {
    PutBucketVersioningOutput,
    PutBucketCorsOutput,
    DeleteBucketCorsOutput,
    PutBucketPolicyOutput,
    DeleteBucketPolicyOutput,
    PutBucketAclOutput,
    PutBucketEncryptionOutput,
    DeleteBucketEncryptionOutput,
    PutBucketLifecycleConfigurationOutput,
    DeleteBucketLifecycleOutput,
    PutBucketWebsiteOutput,
    DeleteBucketWebsiteOutput,
    PutBucketTaggingOutput,
    DeleteBucketTaggingOutput,
    PutBucketLoggingOutput,
}

/// Current versioning state.
#[derive(Debug, Clone, Default)]
pub struct GetBucketVersioningOutput {
    /// Absent when versioning was never configured.
    pub status: Option<BucketVersioningStatus>,
}

/// CORS rules of a bucket.
#[derive(Debug, Clone, Default)]
pub struct GetBucketCorsOutput {
    pub cors_rules: Vec<CORSRule>,
}

/// Bucket policy document.
#[derive(Debug, Clone, Default)]
pub struct GetBucketPolicyOutput {
    /// Policy JSON exactly as stored.
    pub policy: Option<String>,
}

/// Owner and grants of a bucket.
#[derive(Debug, Clone, Default)]
pub struct GetBucketAclOutput {
    pub grants: Vec<Grant>,
    pub owner: Option<Owner>,
}

/// Stored encryption configuration.
#[derive(Debug, Clone, Default)]
pub struct GetBucketEncryptionOutput {
    /// Stored default encryption rules.
    pub server_side_encryption_configuration: Option<ServerSideEncryptionConfiguration>,
}

/// Stored lifecycle configuration.
#[derive(Debug, Clone, Default)]
pub struct GetBucketLifecycleConfigurationOutput {
    pub rules: Vec<LifecycleRule>,
}

/// Stored website configuration.
#[derive(Debug, Clone, Default)]
pub struct GetBucketWebsiteOutput {
    pub error_document: Option<ErrorDocument>,
    pub index_document: Option<IndexDocument>,
    pub redirect_all_requests_to: Option<RedirectAllRequestsTo>,
    pub routing_rules: Vec<RoutingRule>,
}

/// Tags on a bucket.
#[derive(Debug, Clone, Default)]
pub struct GetBucketTaggingOutput {
    pub tag_set: Vec<Tag>,
}

/// Access logging target, if any.
#[derive(Debug, Clone, Default)]
pub struct GetBucketLoggingOutput {
    pub logging_enabled: Option<LoggingEnabled>,
}
