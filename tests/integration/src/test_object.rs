//! Object CRUD integration tests.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use bytes::Bytes;
    use mockstack_s3_model::RequestBody;
    use mockstack_s3_model::S3ErrorCode;
    use mockstack_s3_model::input::{
        CopyObjectInput, DeleteObjectInput, DeleteObjectsInput, GetObjectInput,
        GetObjectTaggingInput, HeadObjectInput, PutObjectInput,
    };
    use mockstack_s3_model::types::{Delete, MetadataDirective, ObjectIdentifier, Tag};

    use crate::{create_test_bucket, put_text, s3};

    fn get(bucket: &str, key: &str) -> GetObjectInput {
        GetObjectInput {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            ..GetObjectInput::default()
        }
    }

    #[tokio::test]
    async fn test_should_put_and_get_object() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "putget").await;

        let put = call!(
            s3,
            PutObject,
            PutObjectInput {
                bucket: bucket.clone(),
                key: "greeting.txt".to_owned(),
                body: "hello, mockstack!".into(),
                content_type: Some("text/plain".to_owned()),
                ..PutObjectInput::default()
            }
        );
        assert!(put.e_tag.as_deref().is_some_and(|e| e.starts_with('"')));
        assert_eq!(put.size, Some(17));

        let resp = call!(s3, GetObject, get(&bucket, "greeting.txt"));
        assert_eq!(resp.content_type.as_deref(), Some("text/plain"));
        assert_eq!(resp.content_length, Some(17));
        assert_eq!(resp.e_tag, put.e_tag);
        assert_eq!(resp.status_code, 200);
        let body = resp.body.expect("body");
        assert_eq!(body.as_bytes(), b"hello, mockstack!");
        // Bodies are repeatable.
        assert_eq!(body.to_text().expect("utf-8"), "hello, mockstack!");
    }

    #[tokio::test]
    async fn test_should_compute_md5_etag() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "etag").await;

        let etag = put_text(&s3, &bucket, "hello.txt", "hello").await;
        assert_eq!(etag, "\"5d41402abc4b2a76b9719d911017c592\"");
    }

    #[tokio::test]
    async fn test_should_drain_streamed_body() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "stream").await;

        let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
            Ok(Bytes::from_static(b"hel")),
            Ok(Bytes::from_static(b"lo")),
        ];
        call!(
            s3,
            PutObject,
            PutObjectInput {
                bucket: bucket.clone(),
                key: "streamed".to_owned(),
                body: RequestBody::from_stream(futures::stream::iter(chunks)),
                ..PutObjectInput::default()
            }
        );

        let resp = call!(s3, GetObject, get(&bucket, "streamed"));
        assert_eq!(resp.body.expect("body").as_bytes(), b"hello");
        assert_eq!(resp.e_tag.as_deref(), Some("\"5d41402abc4b2a76b9719d911017c592\""));
    }

    #[tokio::test]
    async fn test_should_auto_create_bucket_on_put() {
        let s3 = s3();
        let bucket = crate::test_bucket_name("implicit");

        put_text(&s3, &bucket, "k", "v").await;
        assert!(s3.state().bucket_exists(&bucket));
    }

    #[tokio::test]
    async fn test_should_get_byte_range() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "range").await;
        put_text(&s3, &bucket, "file", "Hello, World!").await;

        let resp = call!(
            s3,
            GetObject,
            GetObjectInput {
                range: Some("bytes=0-4".to_owned()),
                ..get(&bucket, "file")
            }
        );
        assert_eq!(resp.status_code, 206);
        assert_eq!(resp.content_range.as_deref(), Some("bytes 0-4/13"));
        assert_eq!(resp.content_length, Some(5));
        assert_eq!(resp.body.expect("body").as_bytes(), b"Hello");
    }

    #[tokio::test]
    async fn test_should_ignore_unsatisfiable_range() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "badrange").await;
        put_text(&s3, &bucket, "file", "Hello, World!").await;

        let resp = call!(
            s3,
            GetObject,
            GetObjectInput {
                range: Some("bytes=50-60".to_owned()),
                ..get(&bucket, "file")
            }
        );
        assert_eq!(resp.status_code, 200);
        assert!(resp.content_range.is_none());
        assert_eq!(resp.content_length, Some(13));
    }

    #[tokio::test]
    async fn test_should_head_object() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "head").await;

        call!(
            s3,
            PutObject,
            PutObjectInput {
                bucket: bucket.clone(),
                key: "file.bin".to_owned(),
                body: RequestBody::from(&b"binary data"[..]),
                content_type: Some("application/octet-stream".to_owned()),
                metadata: HashMap::from([("origin".to_owned(), "test".to_owned())]),
                ..PutObjectInput::default()
            }
        );

        let resp = call!(
            s3,
            HeadObject,
            HeadObjectInput {
                bucket: bucket.clone(),
                key: "file.bin".to_owned(),
                ..HeadObjectInput::default()
            }
        );
        assert_eq!(resp.content_length, Some(11));
        assert_eq!(resp.content_type.as_deref(), Some("application/octet-stream"));
        assert_eq!(resp.metadata.get("origin").map(String::as_str), Some("test"));
        assert!(resp.e_tag.is_some(), "etag should be present");
    }

    #[tokio::test]
    async fn test_should_delete_object_idempotently() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "del").await;
        put_text(&s3, &bucket, "delete-me.txt", "temp").await;

        let delete = DeleteObjectInput {
            bucket: bucket.clone(),
            key: "delete-me.txt".to_owned(),
            version_id: None,
        };
        call!(s3, DeleteObject, delete.clone());
        call!(s3, DeleteObject, delete);

        let err = s3
            .dispatch(get(&bucket, "delete-me.txt"))
            .await
            .expect_err("get after delete should fail");
        assert_eq!(err.code, S3ErrorCode::NoSuchKey);
    }

    #[tokio::test]
    async fn test_should_delete_objects_batch() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "batch").await;
        for i in 0..5 {
            put_text(&s3, &bucket, &format!("file-{i}.txt"), "data").await;
        }

        let objects = (0..5)
            .map(|i| ObjectIdentifier {
                key: format!("file-{i}.txt"),
                version_id: None,
            })
            .collect();
        let resp = call!(
            s3,
            DeleteObjects,
            DeleteObjectsInput {
                bucket: bucket.clone(),
                delete: Delete {
                    objects,
                    quiet: None,
                },
            }
        );
        assert_eq!(resp.deleted.len(), 5, "should delete all 5 objects");
        assert!(resp.errors.is_empty());
        assert!(s3.state().get_bucket(&bucket).expect("bucket").is_empty());
    }

    #[tokio::test]
    async fn test_should_suppress_deleted_list_in_quiet_mode() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "quiet").await;
        put_text(&s3, &bucket, "a", "1").await;

        let resp = call!(
            s3,
            DeleteObjects,
            DeleteObjectsInput {
                bucket: bucket.clone(),
                delete: Delete {
                    objects: vec![ObjectIdentifier {
                        key: "a".to_owned(),
                        version_id: None,
                    }],
                    quiet: Some(true),
                },
            }
        );
        assert!(resp.deleted.is_empty());
        assert!(!s3.state().object_exists(&bucket, "a").expect("bucket"));
    }

    #[tokio::test]
    async fn test_should_copy_object() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "copy").await;
        let etag = put_text(&s3, &bucket, "original.txt", "copy me").await;

        let resp = call!(
            s3,
            CopyObject,
            CopyObjectInput {
                bucket: bucket.clone(),
                key: "copied.txt".to_owned(),
                copy_source: format!("{bucket}/original.txt"),
                ..CopyObjectInput::default()
            }
        );
        let result = resp.copy_object_result.expect("copy result");
        assert_eq!(result.e_tag.as_deref(), Some(etag.as_str()));

        let resp = call!(s3, GetObject, get(&bucket, "copied.txt"));
        assert_eq!(resp.body.expect("body").as_bytes(), b"copy me");
    }

    #[tokio::test]
    async fn test_should_replace_metadata_on_copy() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "copymeta").await;
        call!(
            s3,
            PutObject,
            PutObjectInput {
                bucket: bucket.clone(),
                key: "src".to_owned(),
                body: "data".into(),
                content_type: Some("text/plain".to_owned()),
                metadata: HashMap::from([("a".to_owned(), "1".to_owned())]),
                ..PutObjectInput::default()
            }
        );

        call!(
            s3,
            CopyObject,
            CopyObjectInput {
                bucket: bucket.clone(),
                key: "src".to_owned(),
                copy_source: format!("/{bucket}/src"),
                metadata_directive: Some(MetadataDirective::Replace),
                metadata: HashMap::from([("b".to_owned(), "2".to_owned())]),
                content_type: Some("application/json".to_owned()),
                ..CopyObjectInput::default()
            }
        );

        let resp = call!(s3, GetObject, get(&bucket, "src"));
        assert_eq!(resp.content_type.as_deref(), Some("application/json"));
        assert_eq!(
            resp.metadata,
            HashMap::from([("b".to_owned(), "2".to_owned())])
        );
    }

    #[tokio::test]
    async fn test_should_merge_request_metadata_on_default_copy() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "copymerge").await;
        call!(
            s3,
            PutObject,
            PutObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                body: "data".into(),
                content_type: Some("text/plain".to_owned()),
                metadata: HashMap::from([
                    ("a".to_owned(), "1".to_owned()),
                    ("x".to_owned(), "old".to_owned()),
                ]),
                ..PutObjectInput::default()
            }
        );

        call!(
            s3,
            CopyObject,
            CopyObjectInput {
                bucket: bucket.clone(),
                key: "k2".to_owned(),
                copy_source: format!("{bucket}/k"),
                metadata: HashMap::from([("x".to_owned(), "y".to_owned())]),
                ..CopyObjectInput::default()
            }
        );

        let resp = call!(s3, GetObject, get(&bucket, "k2"));
        assert_eq!(resp.content_type.as_deref(), Some("text/plain"));
        assert_eq!(
            resp.metadata,
            HashMap::from([
                ("a".to_owned(), "1".to_owned()),
                ("x".to_owned(), "y".to_owned()),
            ])
        );
    }

    #[tokio::test]
    async fn test_should_reject_plain_self_copy() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "selfcopy").await;
        put_text(&s3, &bucket, "k", "v").await;

        let err = s3
            .dispatch(CopyObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                copy_source: format!("{bucket}/k"),
                ..CopyObjectInput::default()
            })
            .await
            .expect_err("self copy without changes should fail");
        assert_eq!(err.code, S3ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn test_should_parse_tagging_header_on_put() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "tagged").await;
        call!(
            s3,
            PutObject,
            PutObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                body: "v".into(),
                tagging: Some("env=prod&note=a%20b".to_owned()),
                ..PutObjectInput::default()
            }
        );

        let resp = call!(
            s3,
            GetObjectTagging,
            GetObjectTaggingInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                version_id: None,
            }
        );
        assert_eq!(
            resp.tag_set,
            vec![Tag::new("env", "prod"), Tag::new("note", "a b")]
        );
    }
}
