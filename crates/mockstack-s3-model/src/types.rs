//! Shared S3 enums and structures used by inputs, outputs and bucket state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Declares a string-valued S3 enum with `as_str`, `Display` and a lenient
/// `From<&str>` that falls back to the first (default) variant.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $first:ident => $first_value:literal
            $(, $variant:ident => $value:literal)* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        pub enum $name {
            #[default]
            #[serde(rename = $first_value)]
            $first,
            $(
                #[serde(rename = $value)]
                $variant,
            )*
        }

        impl $name {
            /// Returns the string value of this enum variant.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    Self::$first => $first_value,
                    $(Self::$variant => $value,)*
                }
            }

            /// Parse the wire value, returning `None` for anything unknown.
            #[must_use]
            pub fn parse(s: &str) -> Option<Self> {
                match s {
                    $first_value => Some(Self::$first),
                    $($value => Some(Self::$variant),)*
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::parse(s).unwrap_or_default()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

string_enum! {
    /// S3 StorageClass.
    StorageClass {
        Standard => "STANDARD",
        ReducedRedundancy => "REDUCED_REDUNDANCY",
        StandardIa => "STANDARD_IA",
        OnezoneIa => "ONEZONE_IA",
        IntelligentTiering => "INTELLIGENT_TIERING",
        Glacier => "GLACIER",
        GlacierIr => "GLACIER_IR",
        DeepArchive => "DEEP_ARCHIVE",
    }
}

string_enum! {
    /// S3 ServerSideEncryption.
    ServerSideEncryption {
        Aes256 => "AES256",
        AwsKms => "aws:kms",
        AwsKmsDsse => "aws:kms:dsse",
    }
}

string_enum! {
    /// S3 BucketVersioningStatus.
    BucketVersioningStatus {
        Enabled => "Enabled",
        Suspended => "Suspended",
    }
}

string_enum! {
    /// S3 MetadataDirective.
    MetadataDirective {
        Copy => "COPY",
        Replace => "REPLACE",
    }
}

string_enum! {
    /// S3 TaggingDirective.
    TaggingDirective {
        Copy => "COPY",
        Replace => "REPLACE",
    }
}

string_enum! {
    /// S3 ChecksumAlgorithm.
    ChecksumAlgorithm {
        Crc32 => "CRC32",
        Crc32c => "CRC32C",
        Sha1 => "SHA1",
        Sha256 => "SHA256",
    }
}

string_enum! {
    /// S3 ObjectCannedACL.
    ObjectCannedACL {
        Private => "private",
        PublicRead => "public-read",
        PublicReadWrite => "public-read-write",
        AuthenticatedRead => "authenticated-read",
        AwsExecRead => "aws-exec-read",
        BucketOwnerRead => "bucket-owner-read",
        BucketOwnerFullControl => "bucket-owner-full-control",
    }
}

string_enum! {
    /// S3 BucketCannedACL.
    BucketCannedACL {
        Private => "private",
        PublicRead => "public-read",
        PublicReadWrite => "public-read-write",
        AuthenticatedRead => "authenticated-read",
    }
}

string_enum! {
    /// S3 Permission.
    Permission {
        FullControl => "FULL_CONTROL",
        Read => "READ",
        ReadAcp => "READ_ACP",
        Write => "WRITE",
        WriteAcp => "WRITE_ACP",
    }
}

string_enum! {
    /// S3 grantee Type.
    GranteeType {
        CanonicalUser => "CanonicalUser",
        AmazonCustomerByEmail => "AmazonCustomerByEmail",
        Group => "Group",
    }
}

string_enum! {
    /// S3 ExpirationStatus for lifecycle rules.
    ExpirationStatus {
        Enabled => "Enabled",
        Disabled => "Disabled",
    }
}

string_enum! {
    /// S3 Protocol used by website redirects.
    Protocol {
        Http => "http",
        Https => "https",
    }
}

// ---------------------------------------------------------------------------
// Ownership and access control
// ---------------------------------------------------------------------------

/// S3 Owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub display_name: Option<String>,
    pub id: Option<String>,
}

/// S3 Initiator of a multipart upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Initiator {
    pub display_name: Option<String>,
    pub id: Option<String>,
}

/// S3 Grantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grantee {
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    pub id: Option<String>,
    pub r#type: GranteeType,
    pub uri: Option<String>,
}

/// S3 Grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    pub grantee: Option<Grantee>,
    pub permission: Option<Permission>,
}

/// S3 AccessControlPolicy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControlPolicy {
    pub grants: Vec<Grant>,
    pub owner: Option<Owner>,
}

// ---------------------------------------------------------------------------
// Tagging
// ---------------------------------------------------------------------------

/// S3 Tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    /// Create a tag from a key and value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// S3 Tagging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tagging {
    pub tag_set: Vec<Tag>,
}

// ---------------------------------------------------------------------------
// Bucket configuration documents
// ---------------------------------------------------------------------------

/// S3 VersioningConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersioningConfiguration {
    pub status: Option<BucketVersioningStatus>,
}

/// S3 CORSRule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CORSRule {
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub expose_headers: Vec<String>,
    pub id: Option<String>,
    pub max_age_seconds: Option<i32>,
}

/// S3 CORSConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CORSConfiguration {
    pub cors_rules: Vec<CORSRule>,
}

/// S3 ServerSideEncryptionByDefault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSideEncryptionByDefault {
    pub kms_master_key_id: Option<String>,
    pub sse_algorithm: ServerSideEncryption,
}

/// S3 ServerSideEncryptionRule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSideEncryptionRule {
    pub apply_server_side_encryption_by_default: Option<ServerSideEncryptionByDefault>,
    pub bucket_key_enabled: Option<bool>,
}

/// S3 ServerSideEncryptionConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSideEncryptionConfiguration {
    pub rules: Vec<ServerSideEncryptionRule>,
}

/// S3 LifecycleExpiration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleExpiration {
    pub date: Option<DateTime<Utc>>,
    pub days: Option<i32>,
    pub expired_object_delete_marker: Option<bool>,
}

/// S3 LifecycleRuleFilter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleRuleFilter {
    pub prefix: Option<String>,
    pub tag: Option<Tag>,
    pub object_size_greater_than: Option<i64>,
    pub object_size_less_than: Option<i64>,
}

/// S3 AbortIncompleteMultipartUpload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortIncompleteMultipartUpload {
    pub days_after_initiation: Option<i32>,
}

/// S3 LifecycleRule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleRule {
    pub id: Option<String>,
    pub status: ExpirationStatus,
    pub filter: Option<LifecycleRuleFilter>,
    pub prefix: Option<String>,
    pub expiration: Option<LifecycleExpiration>,
    pub abort_incomplete_multipart_upload: Option<AbortIncompleteMultipartUpload>,
}

/// S3 BucketLifecycleConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLifecycleConfiguration {
    pub rules: Vec<LifecycleRule>,
}

/// S3 IndexDocument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub suffix: String,
}

/// S3 ErrorDocument.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub key: String,
}

/// S3 RedirectAllRequestsTo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectAllRequestsTo {
    pub host_name: String,
    pub protocol: Option<Protocol>,
}

/// S3 Condition for a website routing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub http_error_code_returned_equals: Option<String>,
    pub key_prefix_equals: Option<String>,
}

/// S3 Redirect for a website routing rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub host_name: Option<String>,
    pub http_redirect_code: Option<String>,
    pub protocol: Option<Protocol>,
    pub replace_key_prefix_with: Option<String>,
    pub replace_key_with: Option<String>,
}

/// S3 RoutingRule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingRule {
    pub condition: Option<Condition>,
    pub redirect: Redirect,
}

/// S3 WebsiteConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteConfiguration {
    pub error_document: Option<ErrorDocument>,
    pub index_document: Option<IndexDocument>,
    pub redirect_all_requests_to: Option<RedirectAllRequestsTo>,
    pub routing_rules: Vec<RoutingRule>,
}

/// S3 LoggingEnabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingEnabled {
    pub target_bucket: String,
    pub target_grants: Vec<Grant>,
    pub target_prefix: String,
}

/// S3 BucketLoggingStatus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketLoggingStatus {
    pub logging_enabled: Option<LoggingEnabled>,
}

/// S3 CreateBucketConfiguration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBucketConfiguration {
    pub location_constraint: Option<String>,
}

// ---------------------------------------------------------------------------
// Listing and batch results
// ---------------------------------------------------------------------------

/// S3 Bucket summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bucket {
    pub bucket_region: Option<String>,
    pub creation_date: Option<DateTime<Utc>>,
    pub name: Option<String>,
}

/// S3 Object summary, as returned by listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Object {
    pub checksum_algorithm: Vec<ChecksumAlgorithm>,
    pub e_tag: Option<String>,
    pub key: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub owner: Option<Owner>,
    pub size: Option<i64>,
    pub storage_class: Option<StorageClass>,
}

/// S3 CommonPrefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonPrefix {
    pub prefix: Option<String>,
}

/// S3 ObjectIdentifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectIdentifier {
    pub key: String,
    pub version_id: Option<String>,
}

/// S3 Delete request document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delete {
    pub objects: Vec<ObjectIdentifier>,
    pub quiet: Option<bool>,
}

/// S3 DeletedObject.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeletedObject {
    pub delete_marker: Option<bool>,
    pub delete_marker_version_id: Option<String>,
    pub key: Option<String>,
    pub version_id: Option<String>,
}

/// S3 Error entry in a batch delete result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Error {
    pub code: Option<String>,
    pub key: Option<String>,
    pub message: Option<String>,
    pub version_id: Option<String>,
}

/// S3 CopyObjectResult.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CopyObjectResult {
    pub checksum_crc32: Option<String>,
    pub checksum_crc32c: Option<String>,
    pub checksum_sha1: Option<String>,
    pub checksum_sha256: Option<String>,
    pub e_tag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

/// S3 CompletedPart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedPart {
    pub checksum_crc32: Option<String>,
    pub checksum_crc32c: Option<String>,
    pub checksum_sha1: Option<String>,
    pub checksum_sha256: Option<String>,
    pub e_tag: Option<String>,
    pub part_number: Option<i32>,
}

impl CompletedPart {
    /// Create a completed part reference from its number and entity tag.
    #[must_use]
    pub fn new(part_number: i32, e_tag: impl Into<String>) -> Self {
        Self {
            e_tag: Some(e_tag.into()),
            part_number: Some(part_number),
            ..Self::default()
        }
    }
}

/// S3 CompletedMultipartUpload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedMultipartUpload {
    pub parts: Vec<CompletedPart>,
}

/// S3 MultipartUpload summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartUpload {
    pub checksum_algorithm: Option<ChecksumAlgorithm>,
    pub initiated: Option<DateTime<Utc>>,
    pub initiator: Option<Initiator>,
    pub key: Option<String>,
    pub owner: Option<Owner>,
    pub storage_class: Option<StorageClass>,
    pub upload_id: Option<String>,
}

/// S3 Part summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Part {
    pub checksum_crc32: Option<String>,
    pub checksum_crc32c: Option<String>,
    pub checksum_sha1: Option<String>,
    pub checksum_sha256: Option<String>,
    pub e_tag: Option<String>,
    pub last_modified: Option<DateTime<Utc>>,
    pub part_number: Option<i32>,
    pub size: Option<i64>,
}

/// User-defined metadata map (`x-amz-meta-*` without the prefix).
pub type Metadata = HashMap<String, String>;
