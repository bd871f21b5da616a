//! Error handling integration tests.

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use mockstack_s3_model::input::{
        GetObjectInput, ListObjectsV2Input, PutObjectInput, PutObjectTaggingInput,
    };
    use mockstack_s3_model::types::{Tag, Tagging};
    use mockstack_s3_model::{ErrorFault, RequestBody, S3ErrorCode};

    use crate::{create_test_bucket, put_text, s3, test_bucket_name};

    #[tokio::test]
    async fn test_should_return_no_such_key_on_get() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "nokey").await;

        let err = s3
            .dispatch(GetObjectInput {
                bucket: bucket.clone(),
                key: "nonexistent.txt".to_owned(),
                ..GetObjectInput::default()
            })
            .await
            .expect_err("get nonexistent key should fail");
        assert_eq!(err.code, S3ErrorCode::NoSuchKey);
        assert_eq!(err.status_code, 404);
        assert_eq!(err.resource.as_deref(), Some("nonexistent.txt"));
        assert_eq!(err.fault(), ErrorFault::Client);
    }

    #[tokio::test]
    async fn test_should_return_no_such_bucket_on_get() {
        let s3 = s3();
        let bucket = test_bucket_name("nosuch");

        let err = s3
            .dispatch(GetObjectInput {
                bucket: bucket.clone(),
                key: "file.txt".to_owned(),
                ..GetObjectInput::default()
            })
            .await
            .expect_err("get from nonexistent bucket should fail");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
    }

    #[tokio::test]
    async fn test_should_return_no_such_bucket_on_list() {
        let s3 = s3();

        let err = s3
            .dispatch(ListObjectsV2Input {
                bucket: test_bucket_name("nolist"),
                ..ListObjectsV2Input::default()
            })
            .await
            .expect_err("listing a nonexistent bucket should fail");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
    }

    #[tokio::test]
    async fn test_should_require_key() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "nokeyparam").await;

        let err = s3
            .dispatch(PutObjectInput {
                bucket,
                body: "data".into(),
                ..PutObjectInput::default()
            })
            .await
            .expect_err("missing key should fail");
        assert_eq!(err.code, S3ErrorCode::MissingParameter);
        assert_eq!(err.status_code, 400);
    }

    #[tokio::test]
    async fn test_should_reject_mismatched_content_md5() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "md5").await;

        // MD5 of the empty string, sent with a non-empty body.
        let err = s3
            .dispatch(PutObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                body: "hello".into(),
                content_md5: Some("1B2M2Y8AsgTpgAmY7PhCfg==".to_owned()),
                ..PutObjectInput::default()
            })
            .await
            .expect_err("digest mismatch should fail");
        assert_eq!(err.code, S3ErrorCode::BadDigest);
        assert!(!s3.state().object_exists(&bucket, "k").expect("bucket"));
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_tag_keys() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "dupetags").await;
        put_text(&s3, &bucket, "k", "v").await;

        let err = s3
            .dispatch(PutObjectTaggingInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                tagging: Tagging {
                    tag_set: vec![Tag::new("a", "1"), Tag::new("a", "2")],
                },
                ..PutObjectTaggingInput::default()
            })
            .await
            .expect_err("duplicate tag keys should fail");
        assert_eq!(err.code, S3ErrorCode::InvalidTag);
    }

    #[tokio::test]
    async fn test_should_report_body_failure_as_server_fault() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "brokenbody").await;

        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::other("connection reset")),
        ];
        let err = s3
            .dispatch(PutObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                body: RequestBody::from_stream(futures::stream::iter(chunks)),
                ..PutObjectInput::default()
            })
            .await
            .expect_err("broken stream should fail");
        assert_eq!(err.code, S3ErrorCode::InternalError);
        assert_eq!(err.fault(), ErrorFault::Server);
        assert!(!s3.state().object_exists(&bucket, "k").expect("bucket"));
    }
}
