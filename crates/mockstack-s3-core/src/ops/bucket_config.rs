//! Get, put and delete for each bucket sub-resource.
//!
//! Implements versioning, CORS, policy, ACL, encryption, lifecycle, website,
//! tagging and logging sub-resources. Each sub-resource is a field of the
//! bucket's [`BucketConfiguration`](crate::state::bucket::BucketConfiguration);
//! puts set it, deletes clear it, and gets on an unset field fail with that
//! field's not-found error.

use mockstack_s3_model::input::{
    DeleteBucketCorsInput, DeleteBucketEncryptionInput, DeleteBucketLifecycleInput,
    DeleteBucketPolicyInput, DeleteBucketTaggingInput, DeleteBucketWebsiteInput,
    GetBucketAclInput, GetBucketCorsInput, GetBucketEncryptionInput,
    GetBucketLifecycleConfigurationInput, GetBucketLoggingInput, GetBucketPolicyInput,
    GetBucketTaggingInput, GetBucketVersioningInput, GetBucketWebsiteInput, PutBucketAclInput,
    PutBucketCorsInput, PutBucketEncryptionInput, PutBucketLifecycleConfigurationInput,
    PutBucketLoggingInput, PutBucketPolicyInput, PutBucketTaggingInput,
    PutBucketVersioningInput, PutBucketWebsiteInput,
};
use mockstack_s3_model::output::{
    DeleteBucketCorsOutput, DeleteBucketEncryptionOutput, DeleteBucketLifecycleOutput,
    DeleteBucketPolicyOutput, DeleteBucketTaggingOutput, DeleteBucketWebsiteOutput,
    GetBucketAclOutput, GetBucketCorsOutput, GetBucketEncryptionOutput,
    GetBucketLifecycleConfigurationOutput, GetBucketLoggingOutput, GetBucketPolicyOutput,
    GetBucketTaggingOutput, GetBucketVersioningOutput, GetBucketWebsiteOutput,
    PutBucketAclOutput, PutBucketCorsOutput, PutBucketEncryptionOutput,
    PutBucketLifecycleConfigurationOutput, PutBucketLoggingOutput, PutBucketPolicyOutput,
    PutBucketTaggingOutput, PutBucketVersioningOutput, PutBucketWebsiteOutput,
};
use mockstack_s3_model::types::{
    AccessControlPolicy, BucketCannedACL, Grant, Grantee, GranteeType, Permission,
    ServerSideEncryptionConfiguration,
};
use mockstack_s3_model::{S3Error, s3_error};
use tracing::debug;

use crate::provider::MockStackS3;
use crate::state::bucket::{BucketConfigurationUpdate, FieldUpdate};
use crate::state::object::Owner;
use crate::validation::{require, validate_tags};

const ALL_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AllUsers";
const AUTHENTICATED_USERS_URI: &str = "http://acs.amazonaws.com/groups/global/AuthenticatedUsers";

// These handler methods stay async so every operation dispatches the same way.
#[allow(clippy::unused_async)]
impl MockStackS3 {
    /// Apply one configuration change and log it.
    fn update_config(
        &self,
        bucket: &str,
        operation: &str,
        update: BucketConfigurationUpdate,
    ) -> Result<(), S3Error> {
        self.state.update_bucket_configuration(bucket, update)?;
        debug!(bucket = %bucket, "{operation} completed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Versioning
    // -----------------------------------------------------------------------

    /// Get the versioning status. A never-configured bucket has no status.
    pub async fn handle_get_bucket_versioning(
        &self,
        input: GetBucketVersioningInput,
    ) -> Result<GetBucketVersioningOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let config = self.state.bucket_configuration(&input.bucket)?;
        Ok(GetBucketVersioningOutput {
            status: config.versioning,
        })
    }

    /// Enable or suspend versioning.
    pub async fn handle_put_bucket_versioning(
        &self,
        input: PutBucketVersioningInput,
    ) -> Result<PutBucketVersioningOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let status = input
            .versioning_configuration
            .status
            .ok_or_else(|| S3Error::malformed_xml("VersioningConfiguration requires a Status"))?;

        let update = BucketConfigurationUpdate {
            versioning: FieldUpdate::Set(status),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_versioning", update)?;
        Ok(PutBucketVersioningOutput {})
    }

    // -----------------------------------------------------------------------
    // CORS
    // -----------------------------------------------------------------------

    /// Get the CORS rules.
    pub async fn handle_get_bucket_cors(
        &self,
        input: GetBucketCorsInput,
    ) -> Result<GetBucketCorsOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let cors_rules = self
            .state
            .bucket_configuration(&input.bucket)?
            .cors
            .ok_or_else(|| s3_error!(NoSuchCORSConfiguration).with_resource(&input.bucket))?;
        Ok(GetBucketCorsOutput { cors_rules })
    }

    /// Replace the CORS rules.
    pub async fn handle_put_bucket_cors(
        &self,
        input: PutBucketCorsInput,
    ) -> Result<PutBucketCorsOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let rules = input.cors_configuration.cors_rules;
        if rules.is_empty() {
            return Err(S3Error::malformed_xml(
                "CORSConfiguration requires at least one CORSRule",
            ));
        }

        let update = BucketConfigurationUpdate {
            cors: FieldUpdate::Set(rules),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_cors", update)?;
        Ok(PutBucketCorsOutput {})
    }

    /// Remove the CORS rules.
    pub async fn handle_delete_bucket_cors(
        &self,
        input: DeleteBucketCorsInput,
    ) -> Result<DeleteBucketCorsOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let update = BucketConfigurationUpdate {
            cors: FieldUpdate::Clear,
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "delete_bucket_cors", update)?;
        Ok(DeleteBucketCorsOutput {})
    }

    // -----------------------------------------------------------------------
    // Policy
    // -----------------------------------------------------------------------

    /// Get the bucket policy document.
    pub async fn handle_get_bucket_policy(
        &self,
        input: GetBucketPolicyInput,
    ) -> Result<GetBucketPolicyOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let policy = self
            .state
            .bucket_configuration(&input.bucket)?
            .policy
            .ok_or_else(|| s3_error!(NoSuchBucketPolicy).with_resource(&input.bucket))?;
        Ok(GetBucketPolicyOutput {
            policy: Some(policy),
        })
    }

    /// Store a bucket policy. The document must be valid JSON; it is kept
    /// verbatim and never evaluated.
    pub async fn handle_put_bucket_policy(
        &self,
        input: PutBucketPolicyInput,
    ) -> Result<PutBucketPolicyOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Policy", &input.policy)?;
        if let Err(e) = serde_json::from_str::<serde_json::Value>(&input.policy) {
            return Err(s3_error!(
                MalformedPolicy,
                format!("Policies must be valid JSON: {e}")
            ));
        }

        let update = BucketConfigurationUpdate {
            policy: FieldUpdate::Set(input.policy),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_policy", update)?;
        Ok(PutBucketPolicyOutput {})
    }

    /// Remove the bucket policy.
    pub async fn handle_delete_bucket_policy(
        &self,
        input: DeleteBucketPolicyInput,
    ) -> Result<DeleteBucketPolicyOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let update = BucketConfigurationUpdate {
            policy: FieldUpdate::Clear,
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "delete_bucket_policy", update)?;
        Ok(DeleteBucketPolicyOutput {})
    }

    // -----------------------------------------------------------------------
    // ACL
    // -----------------------------------------------------------------------

    /// Get the bucket ACL.
    ///
    /// A bucket with no stored ACL reports its owner holding `FULL_CONTROL`.
    pub async fn handle_get_bucket_acl(
        &self,
        input: GetBucketAclInput,
    ) -> Result<GetBucketAclOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let owner = self.state.get_bucket(&input.bucket)?.owner.clone();
        let policy = self
            .state
            .bucket_configuration(&input.bucket)?
            .acl
            .unwrap_or_else(|| canned_acl_policy(&owner, BucketCannedACL::Private));

        Ok(GetBucketAclOutput {
            grants: policy.grants,
            owner: policy.owner.or_else(|| Some(owner.to_model())),
        })
    }

    /// Replace the bucket ACL with an explicit policy or a canned ACL.
    pub async fn handle_put_bucket_acl(
        &self,
        input: PutBucketAclInput,
    ) -> Result<PutBucketAclOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let owner = self.state.get_bucket(&input.bucket)?.owner.clone();

        let policy = match (input.access_control_policy, input.acl) {
            (Some(mut policy), _) => {
                policy.owner.get_or_insert_with(|| owner.to_model());
                policy
            }
            (None, Some(acl)) => canned_acl_policy(&owner, acl),
            (None, None) => return Err(S3Error::missing_parameter("AccessControlPolicy")),
        };

        let update = BucketConfigurationUpdate {
            acl: FieldUpdate::Set(policy),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_acl", update)?;
        Ok(PutBucketAclOutput {})
    }

    // -----------------------------------------------------------------------
    // Encryption
    // -----------------------------------------------------------------------

    /// Get the default encryption rules.
    pub async fn handle_get_bucket_encryption(
        &self,
        input: GetBucketEncryptionInput,
    ) -> Result<GetBucketEncryptionOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let rules = self
            .state
            .bucket_configuration(&input.bucket)?
            .encryption
            .ok_or_else(|| {
                s3_error!(ServerSideEncryptionConfigurationNotFoundError)
                    .with_resource(&input.bucket)
            })?;
        Ok(GetBucketEncryptionOutput {
            server_side_encryption_configuration: Some(ServerSideEncryptionConfiguration {
                rules,
            }),
        })
    }

    /// Replace the default encryption rules.
    pub async fn handle_put_bucket_encryption(
        &self,
        input: PutBucketEncryptionInput,
    ) -> Result<PutBucketEncryptionOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let rules = input.server_side_encryption_configuration.rules;
        if rules.is_empty() {
            return Err(S3Error::malformed_xml(
                "ServerSideEncryptionConfiguration requires at least one Rule",
            ));
        }

        let update = BucketConfigurationUpdate {
            encryption: FieldUpdate::Set(rules),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_encryption", update)?;
        Ok(PutBucketEncryptionOutput {})
    }

    /// Remove the default encryption rules.
    pub async fn handle_delete_bucket_encryption(
        &self,
        input: DeleteBucketEncryptionInput,
    ) -> Result<DeleteBucketEncryptionOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let update = BucketConfigurationUpdate {
            encryption: FieldUpdate::Clear,
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "delete_bucket_encryption", update)?;
        Ok(DeleteBucketEncryptionOutput {})
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Get the lifecycle rules. Rules are stored, never enforced.
    pub async fn handle_get_bucket_lifecycle_configuration(
        &self,
        input: GetBucketLifecycleConfigurationInput,
    ) -> Result<GetBucketLifecycleConfigurationOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let rules = self
            .state
            .bucket_configuration(&input.bucket)?
            .lifecycle
            .ok_or_else(|| s3_error!(NoSuchLifecycleConfiguration).with_resource(&input.bucket))?;
        Ok(GetBucketLifecycleConfigurationOutput { rules })
    }

    /// Replace the lifecycle rules.
    pub async fn handle_put_bucket_lifecycle_configuration(
        &self,
        input: PutBucketLifecycleConfigurationInput,
    ) -> Result<PutBucketLifecycleConfigurationOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let configuration = input.lifecycle_configuration.ok_or_else(|| {
            S3Error::malformed_xml("The lifecycle configuration document is missing")
        })?;

        let update = BucketConfigurationUpdate {
            lifecycle: FieldUpdate::Set(configuration.rules),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_lifecycle_configuration", update)?;
        Ok(PutBucketLifecycleConfigurationOutput {})
    }

    /// Remove the lifecycle rules.
    pub async fn handle_delete_bucket_lifecycle(
        &self,
        input: DeleteBucketLifecycleInput,
    ) -> Result<DeleteBucketLifecycleOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let update = BucketConfigurationUpdate {
            lifecycle: FieldUpdate::Clear,
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "delete_bucket_lifecycle", update)?;
        Ok(DeleteBucketLifecycleOutput {})
    }

    // -----------------------------------------------------------------------
    // Website
    // -----------------------------------------------------------------------

    /// Get the static website configuration.
    pub async fn handle_get_bucket_website(
        &self,
        input: GetBucketWebsiteInput,
    ) -> Result<GetBucketWebsiteOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let website = self
            .state
            .bucket_configuration(&input.bucket)?
            .website
            .ok_or_else(|| s3_error!(NoSuchWebsiteConfiguration).with_resource(&input.bucket))?;
        Ok(GetBucketWebsiteOutput {
            error_document: website.error_document,
            index_document: website.index_document,
            redirect_all_requests_to: website.redirect_all_requests_to,
            routing_rules: website.routing_rules,
        })
    }

    /// Replace the static website configuration.
    pub async fn handle_put_bucket_website(
        &self,
        input: PutBucketWebsiteInput,
    ) -> Result<PutBucketWebsiteOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let website = input.website_configuration;
        if website.index_document.is_none() && website.redirect_all_requests_to.is_none() {
            return Err(S3Error::malformed_xml(
                "A website configuration needs an IndexDocument or RedirectAllRequestsTo",
            ));
        }

        let update = BucketConfigurationUpdate {
            website: FieldUpdate::Set(website),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_website", update)?;
        Ok(PutBucketWebsiteOutput {})
    }

    /// Remove the static website configuration.
    pub async fn handle_delete_bucket_website(
        &self,
        input: DeleteBucketWebsiteInput,
    ) -> Result<DeleteBucketWebsiteOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let update = BucketConfigurationUpdate {
            website: FieldUpdate::Clear,
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "delete_bucket_website", update)?;
        Ok(DeleteBucketWebsiteOutput {})
    }

    // -----------------------------------------------------------------------
    // Tagging
    // -----------------------------------------------------------------------

    /// Get the bucket tag set.
    pub async fn handle_get_bucket_tagging(
        &self,
        input: GetBucketTaggingInput,
    ) -> Result<GetBucketTaggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let tag_set = self
            .state
            .bucket_configuration(&input.bucket)?
            .tags
            .ok_or_else(|| s3_error!(NoSuchTagSet).with_resource(&input.bucket))?;
        Ok(GetBucketTaggingOutput { tag_set })
    }

    /// Replace the bucket tag set.
    pub async fn handle_put_bucket_tagging(
        &self,
        input: PutBucketTaggingInput,
    ) -> Result<PutBucketTaggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let tag_set = input.tagging.tag_set;
        let pairs: Vec<(String, String)> = tag_set
            .iter()
            .map(|tag| (tag.key.clone(), tag.value.clone()))
            .collect();
        validate_tags(&pairs)?;

        let update = BucketConfigurationUpdate {
            tags: FieldUpdate::Set(tag_set),
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_tagging", update)?;
        Ok(PutBucketTaggingOutput {})
    }

    /// Remove the bucket tag set.
    pub async fn handle_delete_bucket_tagging(
        &self,
        input: DeleteBucketTaggingInput,
    ) -> Result<DeleteBucketTaggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let update = BucketConfigurationUpdate {
            tags: FieldUpdate::Clear,
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "delete_bucket_tagging", update)?;
        Ok(DeleteBucketTaggingOutput {})
    }

    // -----------------------------------------------------------------------
    // Logging
    // -----------------------------------------------------------------------

    /// Get the access log target. Unconfigured logging is not an error.
    pub async fn handle_get_bucket_logging(
        &self,
        input: GetBucketLoggingInput,
    ) -> Result<GetBucketLoggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let config = self.state.bucket_configuration(&input.bucket)?;
        Ok(GetBucketLoggingOutput {
            logging_enabled: config.logging,
        })
    }

    /// Set or clear the access log target.
    pub async fn handle_put_bucket_logging(
        &self,
        input: PutBucketLoggingInput,
    ) -> Result<PutBucketLoggingOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        let logging = match input.bucket_logging_status.logging_enabled {
            Some(target) => FieldUpdate::Set(target),
            None => FieldUpdate::Clear,
        };

        let update = BucketConfigurationUpdate {
            logging,
            ..BucketConfigurationUpdate::default()
        };
        self.update_config(&input.bucket, "put_bucket_logging", update)?;
        Ok(PutBucketLoggingOutput {})
    }
}

/// Expand a canned ACL into the grants it stands for.
///
/// The owner always holds `FULL_CONTROL`; the public and authenticated
/// variants add group grants on top.
pub(super) fn canned_acl_policy(owner: &Owner, acl: BucketCannedACL) -> AccessControlPolicy {
    let owner_grant = Grant {
        grantee: Some(Grantee {
            display_name: Some(owner.display_name.clone()),
            id: Some(owner.id.clone()),
            r#type: GranteeType::CanonicalUser,
            ..Grantee::default()
        }),
        permission: Some(Permission::FullControl),
    };

    let mut grants = vec![owner_grant];
    match acl {
        BucketCannedACL::Private => {}
        BucketCannedACL::PublicRead => {
            grants.push(group_grant(ALL_USERS_URI, Permission::Read));
        }
        BucketCannedACL::PublicReadWrite => {
            grants.push(group_grant(ALL_USERS_URI, Permission::Read));
            grants.push(group_grant(ALL_USERS_URI, Permission::Write));
        }
        BucketCannedACL::AuthenticatedRead => {
            grants.push(group_grant(AUTHENTICATED_USERS_URI, Permission::Read));
        }
    }

    AccessControlPolicy {
        grants,
        owner: Some(owner.to_model()),
    }
}

fn group_grant(uri: &str, permission: Permission) -> Grant {
    Grant {
        grantee: Some(Grantee {
            r#type: GranteeType::Group,
            uri: Some(uri.to_owned()),
            ..Grantee::default()
        }),
        permission: Some(permission),
    }
}
