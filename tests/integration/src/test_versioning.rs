//! Versioning integration tests.
//!
//! Only the current version of a key is retained; enabling versioning makes
//! writes carry fresh version IDs that reads and deletes can address.

#[cfg(test)]
mod tests {
    use mockstack_s3_core::MockStackS3;
    use mockstack_s3_model::S3ErrorCode;
    use mockstack_s3_model::input::{
        DeleteObjectInput, GetObjectInput, PutBucketVersioningInput, PutObjectInput,
    };
    use mockstack_s3_model::types::{BucketVersioningStatus, VersioningConfiguration};

    use crate::{create_test_bucket, s3};

    async fn set_versioning(s3: &MockStackS3, bucket: &str, status: BucketVersioningStatus) {
        call!(
            s3,
            PutBucketVersioning,
            PutBucketVersioningInput {
                bucket: bucket.to_owned(),
                versioning_configuration: VersioningConfiguration {
                    status: Some(status),
                },
            }
        );
    }

    async fn put_version(s3: &MockStackS3, bucket: &str, key: &str, body: &str) -> Option<String> {
        let output = call!(
            s3,
            PutObject,
            PutObjectInput {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                body: body.into(),
                ..PutObjectInput::default()
            }
        );
        output.version_id
    }

    fn get_version(bucket: &str, key: &str, version_id: Option<&str>) -> GetObjectInput {
        GetObjectInput {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            version_id: version_id.map(str::to_owned),
            ..GetObjectInput::default()
        }
    }

    #[tokio::test]
    async fn test_should_omit_version_id_when_unversioned() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "unver").await;

        assert!(put_version(&s3, &bucket, "k", "v").await.is_none());

        // The literal "null" version addresses an un-versioned object.
        let resp = call!(s3, GetObject, get_version(&bucket, "k", Some("null")));
        assert!(resp.version_id.is_none());
    }

    #[tokio::test]
    async fn test_should_assign_fresh_version_ids() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "ver").await;
        set_versioning(&s3, &bucket, BucketVersioningStatus::Enabled).await;

        let v1 = put_version(&s3, &bucket, "k", "one").await.expect("v1");
        let v2 = put_version(&s3, &bucket, "k", "two").await.expect("v2");
        assert_ne!(v1, v2);

        let resp = call!(s3, GetObject, get_version(&bucket, "k", Some(&v2)));
        assert_eq!(resp.version_id.as_deref(), Some(v2.as_str()));
        assert_eq!(resp.body.expect("body").as_bytes(), b"two");

        let resp = call!(s3, GetObject, get_version(&bucket, "k", None));
        assert_eq!(resp.version_id.as_deref(), Some(v2.as_str()));
    }

    #[tokio::test]
    async fn test_should_reject_superseded_version() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "stale").await;
        set_versioning(&s3, &bucket, BucketVersioningStatus::Enabled).await;

        let v1 = put_version(&s3, &bucket, "k", "one").await.expect("v1");
        put_version(&s3, &bucket, "k", "two").await;

        let err = s3
            .dispatch(get_version(&bucket, "k", Some(&v1)))
            .await
            .expect_err("superseded version should be gone");
        assert_eq!(err.code, S3ErrorCode::NoSuchVersion);
        assert_eq!(err.status_code, 404);
    }

    #[tokio::test]
    async fn test_should_delete_only_matching_version() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "delver").await;
        set_versioning(&s3, &bucket, BucketVersioningStatus::Enabled).await;

        let v1 = put_version(&s3, &bucket, "k", "one").await.expect("v1");
        let v2 = put_version(&s3, &bucket, "k", "two").await.expect("v2");

        let resp = call!(
            s3,
            DeleteObject,
            DeleteObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                version_id: Some(v1.clone()),
            }
        );
        assert_eq!(resp.version_id.as_deref(), Some(v1.as_str()));
        assert!(s3.state().object_exists(&bucket, "k").expect("bucket"));

        call!(
            s3,
            DeleteObject,
            DeleteObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                version_id: Some(v2),
            }
        );
        assert!(!s3.state().object_exists(&bucket, "k").expect("bucket"));
    }

    #[tokio::test]
    async fn test_should_stop_versioning_when_suspended() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "suspend").await;
        set_versioning(&s3, &bucket, BucketVersioningStatus::Enabled).await;
        assert!(put_version(&s3, &bucket, "k", "one").await.is_some());

        set_versioning(&s3, &bucket, BucketVersioningStatus::Suspended).await;
        assert!(put_version(&s3, &bucket, "k", "two").await.is_none());
    }
}
