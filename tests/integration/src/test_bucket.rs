//! Bucket CRUD integration tests.

#[cfg(test)]
mod tests {
    use mockstack_s3_core::S3Config;
    use mockstack_s3_model::S3ErrorCode;
    use mockstack_s3_model::input::{
        CreateBucketInput, DeleteBucketInput, DeleteObjectInput, GetBucketLocationInput,
        HeadBucketInput, ListBucketsInput,
    };
    use mockstack_s3_model::types::CreateBucketConfiguration;

    use crate::{create_test_bucket, put_text, s3, s3_with, test_bucket_name};

    fn head(bucket: &str) -> HeadBucketInput {
        HeadBucketInput {
            bucket: bucket.to_owned(),
        }
    }

    #[tokio::test]
    async fn test_should_create_and_delete_bucket() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "create").await;

        let resp = call!(s3, HeadBucket, head(&bucket));
        assert_eq!(resp.bucket_region.as_deref(), Some("us-east-1"));

        call!(
            s3,
            DeleteBucket,
            DeleteBucketInput {
                bucket: bucket.clone(),
            }
        );

        let err = s3
            .dispatch(head(&bucket))
            .await
            .expect_err("head_bucket should fail after delete");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
        assert_eq!(err.status_code, 404);
    }

    #[tokio::test]
    async fn test_should_list_buckets_sorted() {
        let s3 = s3();
        let b2 = create_test_bucket(&s3, "list2").await;
        let b1 = create_test_bucket(&s3, "list1").await;

        let resp = call!(s3, ListBuckets, ListBucketsInput::default());
        let names: Vec<&str> = resp.buckets.iter().filter_map(|b| b.name.as_deref()).collect();
        assert_eq!(names, vec![b1.as_str(), b2.as_str()]);
        assert!(resp.owner.and_then(|o| o.id).is_some());

        let resp = call!(
            s3,
            ListBuckets,
            ListBucketsInput {
                prefix: Some("test-list2".to_owned()),
            }
        );
        assert_eq!(resp.buckets.len(), 1);
    }

    #[tokio::test]
    async fn test_should_get_bucket_location() {
        let s3 = s3();
        let default = create_test_bucket(&s3, "location").await;
        let resp = call!(
            s3,
            GetBucketLocation,
            GetBucketLocationInput {
                bucket: default.clone(),
            }
        );
        assert!(resp.location_constraint.is_none());

        let regional = test_bucket_name("regional");
        call!(
            s3,
            CreateBucket,
            CreateBucketInput {
                bucket: regional.clone(),
                create_bucket_configuration: Some(CreateBucketConfiguration {
                    location_constraint: Some("eu-west-1".to_owned()),
                }),
                ..CreateBucketInput::default()
            }
        );
        let resp = call!(
            s3,
            GetBucketLocation,
            GetBucketLocationInput {
                bucket: regional.clone(),
            }
        );
        assert_eq!(resp.location_constraint.as_deref(), Some("eu-west-1"));
    }

    #[tokio::test]
    async fn test_should_use_configured_default_region() {
        let s3 = s3_with(
            S3Config::builder()
                .default_region("ap-south-1".to_owned())
                .build(),
        );
        let bucket = create_test_bucket(&s3, "cfgregion").await;

        let resp = call!(s3, HeadBucket, head(&bucket));
        assert_eq!(resp.bucket_region.as_deref(), Some("ap-south-1"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_bucket() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "dup").await;

        let err = s3
            .dispatch(CreateBucketInput {
                bucket: bucket.clone(),
                ..CreateBucketInput::default()
            })
            .await
            .expect_err("duplicate bucket should fail");
        assert_eq!(err.code, S3ErrorCode::BucketAlreadyOwnedByYou);
        assert_eq!(err.status_code, 409);
    }

    #[tokio::test]
    async fn test_should_reject_delete_nonempty_bucket() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "nonempty").await;
        put_text(&s3, &bucket, "file.txt", "data").await;

        let err = s3
            .dispatch(DeleteBucketInput {
                bucket: bucket.clone(),
            })
            .await
            .expect_err("delete of non-empty bucket should fail");
        assert_eq!(err.code, S3ErrorCode::BucketNotEmpty);
        assert!(s3.state().bucket_exists(&bucket));

        call!(
            s3,
            DeleteObject,
            DeleteObjectInput {
                bucket: bucket.clone(),
                key: "file.txt".to_owned(),
                version_id: None,
            }
        );
        call!(
            s3,
            DeleteBucket,
            DeleteBucketInput {
                bucket: bucket.clone(),
            }
        );
        assert!(!s3.state().bucket_exists(&bucket));
    }

    #[tokio::test]
    async fn test_should_reject_delete_of_missing_bucket() {
        let s3 = s3();

        let err = s3
            .dispatch(DeleteBucketInput {
                bucket: test_bucket_name("ghost"),
            })
            .await
            .expect_err("missing bucket should fail");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
    }
}
