//! Bucket sub-resource configuration integration tests.

#[cfg(test)]
mod tests {
    use mockstack_s3_model::S3ErrorCode;
    use mockstack_s3_model::input::{
        DeleteBucketCorsInput, DeleteBucketPolicyInput, DeleteBucketTaggingInput,
        GetBucketAclInput, GetBucketCorsInput, GetBucketLoggingInput, GetBucketPolicyInput,
        GetBucketTaggingInput, GetBucketVersioningInput, GetBucketWebsiteInput, PutBucketAclInput,
        PutBucketCorsInput, PutBucketLoggingInput, PutBucketPolicyInput, PutBucketTaggingInput,
        PutBucketVersioningInput, PutBucketWebsiteInput,
    };
    use mockstack_s3_model::types::{
        BucketCannedACL, BucketLoggingStatus, BucketVersioningStatus, CORSConfiguration, CORSRule,
        IndexDocument, LoggingEnabled, Permission, Tag, Tagging, VersioningConfiguration,
        WebsiteConfiguration,
    };

    use crate::{create_test_bucket, s3};

    #[tokio::test]
    async fn test_should_round_trip_versioning_status() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "ver").await;

        let get = GetBucketVersioningInput {
            bucket: bucket.clone(),
        };
        let resp = call!(s3, GetBucketVersioning, get.clone());
        assert!(resp.status.is_none(), "fresh bucket has no versioning status");

        call!(
            s3,
            PutBucketVersioning,
            PutBucketVersioningInput {
                bucket: bucket.clone(),
                versioning_configuration: VersioningConfiguration {
                    status: Some(BucketVersioningStatus::Suspended),
                },
            }
        );
        let resp = call!(s3, GetBucketVersioning, get);
        assert_eq!(resp.status, Some(BucketVersioningStatus::Suspended));
    }

    #[tokio::test]
    async fn test_should_manage_cors_rules() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "cors").await;
        let rule = CORSRule {
            allowed_methods: vec!["GET".to_owned(), "PUT".to_owned()],
            allowed_origins: vec!["https://example.com".to_owned()],
            max_age_seconds: Some(600),
            ..CORSRule::default()
        };

        call!(
            s3,
            PutBucketCors,
            PutBucketCorsInput {
                bucket: bucket.clone(),
                cors_configuration: CORSConfiguration {
                    cors_rules: vec![rule.clone()],
                },
            }
        );
        let resp = call!(
            s3,
            GetBucketCors,
            GetBucketCorsInput {
                bucket: bucket.clone(),
            }
        );
        assert_eq!(resp.cors_rules, vec![rule]);

        call!(
            s3,
            DeleteBucketCors,
            DeleteBucketCorsInput {
                bucket: bucket.clone(),
            }
        );
        let err = s3
            .dispatch(GetBucketCorsInput {
                bucket: bucket.clone(),
            })
            .await
            .expect_err("cors should be gone");
        assert_eq!(err.code, S3ErrorCode::NoSuchCORSConfiguration);
    }

    #[tokio::test]
    async fn test_should_store_policy_verbatim() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "policy").await;
        let policy = r#"{"Version":"2012-10-17","Statement":[]}"#;

        call!(
            s3,
            PutBucketPolicy,
            PutBucketPolicyInput {
                bucket: bucket.clone(),
                policy: policy.to_owned(),
            }
        );
        let resp = call!(
            s3,
            GetBucketPolicy,
            GetBucketPolicyInput {
                bucket: bucket.clone(),
            }
        );
        assert_eq!(resp.policy.as_deref(), Some(policy));

        let err = s3
            .dispatch(PutBucketPolicyInput {
                bucket: bucket.clone(),
                policy: "not json".to_owned(),
            })
            .await
            .expect_err("invalid policy should fail");
        assert_eq!(err.code, S3ErrorCode::MalformedPolicy);

        call!(
            s3,
            DeleteBucketPolicy,
            DeleteBucketPolicyInput {
                bucket: bucket.clone(),
            }
        );
        let err = s3
            .dispatch(GetBucketPolicyInput {
                bucket: bucket.clone(),
            })
            .await
            .expect_err("policy should be gone");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucketPolicy);
    }

    #[tokio::test]
    async fn test_should_expand_canned_acl() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "acl").await;
        let get = GetBucketAclInput {
            bucket: bucket.clone(),
        };

        let resp = call!(s3, GetBucketAcl, get.clone());
        assert_eq!(resp.grants.len(), 1);
        assert_eq!(resp.grants[0].permission, Some(Permission::FullControl));

        call!(
            s3,
            PutBucketAcl,
            PutBucketAclInput {
                bucket: bucket.clone(),
                acl: Some(BucketCannedACL::PublicRead),
                access_control_policy: None,
            }
        );
        let resp = call!(s3, GetBucketAcl, get);
        let permissions: Vec<_> = resp.grants.iter().filter_map(|g| g.permission.clone()).collect();
        assert_eq!(permissions, vec![Permission::FullControl, Permission::Read]);
        assert!(resp.owner.is_some());
    }

    #[tokio::test]
    async fn test_should_replace_bucket_tags() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "tags").await;

        for tags in [
            vec![Tag::new("env", "dev")],
            vec![Tag::new("team", "storage"), Tag::new("tier", "gold")],
        ] {
            call!(
                s3,
                PutBucketTagging,
                PutBucketTaggingInput {
                    bucket: bucket.clone(),
                    tagging: Tagging { tag_set: tags },
                }
            );
        }
        let resp = call!(
            s3,
            GetBucketTagging,
            GetBucketTaggingInput {
                bucket: bucket.clone(),
            }
        );
        assert_eq!(
            resp.tag_set,
            vec![Tag::new("team", "storage"), Tag::new("tier", "gold")]
        );

        call!(
            s3,
            DeleteBucketTagging,
            DeleteBucketTaggingInput {
                bucket: bucket.clone(),
            }
        );
        let err = s3
            .dispatch(GetBucketTaggingInput {
                bucket: bucket.clone(),
            })
            .await
            .expect_err("tags should be gone");
        assert_eq!(err.code, S3ErrorCode::NoSuchTagSet);
    }

    #[tokio::test]
    async fn test_should_configure_website() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "web").await;

        call!(
            s3,
            PutBucketWebsite,
            PutBucketWebsiteInput {
                bucket: bucket.clone(),
                website_configuration: WebsiteConfiguration {
                    index_document: Some(IndexDocument {
                        suffix: "index.html".to_owned(),
                    }),
                    ..WebsiteConfiguration::default()
                },
            }
        );
        let resp = call!(
            s3,
            GetBucketWebsite,
            GetBucketWebsiteInput {
                bucket: bucket.clone(),
            }
        );
        assert_eq!(
            resp.index_document.map(|d| d.suffix).as_deref(),
            Some("index.html")
        );
    }

    #[tokio::test]
    async fn test_should_enable_and_disable_logging() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "logging").await;
        let target = create_test_bucket(&s3, "logtarget").await;

        let enabled = LoggingEnabled {
            target_bucket: target.clone(),
            target_prefix: "logs/".to_owned(),
            ..LoggingEnabled::default()
        };
        call!(
            s3,
            PutBucketLogging,
            PutBucketLoggingInput {
                bucket: bucket.clone(),
                bucket_logging_status: BucketLoggingStatus {
                    logging_enabled: Some(enabled.clone()),
                },
            }
        );
        let get = GetBucketLoggingInput {
            bucket: bucket.clone(),
        };
        let resp = call!(s3, GetBucketLogging, get.clone());
        assert_eq!(resp.logging_enabled, Some(enabled));

        call!(
            s3,
            PutBucketLogging,
            PutBucketLoggingInput {
                bucket: bucket.clone(),
                bucket_logging_status: BucketLoggingStatus::default(),
            }
        );
        let resp = call!(s3, GetBucketLogging, get);
        assert!(resp.logging_enabled.is_none());
    }

    #[tokio::test]
    async fn test_should_reject_config_on_missing_bucket() {
        let s3 = s3();

        let err = s3
            .dispatch(GetBucketVersioningInput {
                bucket: crate::test_bucket_name("absent"),
            })
            .await
            .expect_err("missing bucket should fail");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
    }
}
