//! Multipart upload integration tests.

#[cfg(test)]
mod tests {
    use mockstack_s3_core::MockStackS3;
    use mockstack_s3_model::S3ErrorCode;
    use mockstack_s3_model::input::{
        AbortMultipartUploadInput, CompleteMultipartUploadInput, CreateMultipartUploadInput,
        GetObjectInput, ListMultipartUploadsInput, ListPartsInput, UploadPartInput,
    };
    use mockstack_s3_model::types::{CompletedMultipartUpload, CompletedPart};

    use crate::{create_test_bucket, s3, test_bucket_name};

    async fn create_upload(s3: &MockStackS3, bucket: &str, key: &str) -> String {
        let create = call!(
            s3,
            CreateMultipartUpload,
            CreateMultipartUploadInput {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                content_type: Some("application/octet-stream".to_owned()),
                ..CreateMultipartUploadInput::default()
            }
        );
        create.upload_id.expect("upload_id")
    }

    async fn upload_part(
        s3: &MockStackS3,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: i32,
        data: Vec<u8>,
    ) -> String {
        let part = call!(
            s3,
            UploadPart,
            UploadPartInput {
                bucket: bucket.to_owned(),
                key: key.to_owned(),
                upload_id: upload_id.to_owned(),
                part_number: Some(part_number),
                body: data.into(),
                ..UploadPartInput::default()
            }
        );
        part.e_tag.expect("part etag")
    }

    fn complete(
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: Vec<CompletedPart>,
    ) -> CompleteMultipartUploadInput {
        CompleteMultipartUploadInput {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            upload_id: upload_id.to_owned(),
            multipart_upload: Some(CompletedMultipartUpload { parts }),
        }
    }

    #[tokio::test]
    async fn test_should_complete_multipart_upload() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "mpu").await;
        let upload_id = create_upload(&s3, &bucket, "multipart.bin").await;

        let part1_data = vec![0xAAu8; 1024];
        let part2_data = vec![0xBBu8; 1024];
        let e1 = upload_part(&s3, &bucket, "multipart.bin", &upload_id, 1, part1_data.clone()).await;
        let e2 = upload_part(&s3, &bucket, "multipart.bin", &upload_id, 2, part2_data.clone()).await;

        let resp = call!(
            s3,
            CompleteMultipartUpload,
            complete(
                &bucket,
                "multipart.bin",
                &upload_id,
                vec![CompletedPart::new(1, e1), CompletedPart::new(2, e2)],
            )
        );
        assert!(resp.e_tag.is_some(), "completed upload should have etag");
        assert_eq!(resp.key.as_deref(), Some("multipart.bin"));
        assert!(
            resp.location
                .as_deref()
                .is_some_and(|l| l.ends_with(&format!("/{bucket}/multipart.bin")))
        );

        let get = call!(
            s3,
            GetObject,
            GetObjectInput {
                bucket: bucket.clone(),
                key: "multipart.bin".to_owned(),
                ..GetObjectInput::default()
            }
        );
        let mut expected = part1_data;
        expected.extend_from_slice(&part2_data);
        assert_eq!(get.content_length, Some(2048));
        assert_eq!(get.parts_count, Some(2));
        assert_eq!(get.content_type.as_deref(), Some("application/octet-stream"));
        assert_eq!(get.body.expect("body").to_vec(), expected);

        // The upload is gone once completed.
        let uploads = call!(
            s3,
            ListMultipartUploads,
            ListMultipartUploadsInput {
                bucket: bucket.clone(),
                ..ListMultipartUploadsInput::default()
            }
        );
        assert!(uploads.uploads.is_empty());
    }

    #[tokio::test]
    async fn test_should_assemble_in_caller_order() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "order").await;
        let upload_id = create_upload(&s3, &bucket, "k").await;

        let e1 = upload_part(&s3, &bucket, "k", &upload_id, 1, b"first-".to_vec()).await;
        let e3 = upload_part(&s3, &bucket, "k", &upload_id, 3, b"third".to_vec()).await;

        call!(
            s3,
            CompleteMultipartUpload,
            complete(
                &bucket,
                "k",
                &upload_id,
                vec![CompletedPart::new(3, e3), CompletedPart::new(1, e1)],
            )
        );

        let object = s3
            .state()
            .get_object(&bucket, "k")
            .expect("bucket")
            .expect("object");
        assert_eq!(&object.body[..], b"thirdfirst-");
    }

    #[tokio::test]
    async fn test_should_replace_reuploaded_part() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "reup").await;
        let upload_id = create_upload(&s3, &bucket, "k").await;

        let stale = upload_part(&s3, &bucket, "k", &upload_id, 1, b"old".to_vec()).await;
        let fresh = upload_part(&s3, &bucket, "k", &upload_id, 1, b"new".to_vec()).await;
        assert_ne!(stale, fresh);

        let err = s3
            .dispatch(complete(
                &bucket,
                "k",
                &upload_id,
                vec![CompletedPart::new(1, stale)],
            ))
            .await
            .expect_err("stale etag should be rejected");
        assert_eq!(err.code, S3ErrorCode::InvalidPart);

        call!(
            s3,
            CompleteMultipartUpload,
            complete(&bucket, "k", &upload_id, vec![CompletedPart::new(1, fresh)])
        );
    }

    #[tokio::test]
    async fn test_should_abort_multipart_upload() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "abort").await;
        let upload_id = create_upload(&s3, &bucket, "aborted.bin").await;
        upload_part(&s3, &bucket, "aborted.bin", &upload_id, 1, vec![0u8; 16]).await;

        call!(
            s3,
            AbortMultipartUpload,
            AbortMultipartUploadInput {
                bucket: bucket.clone(),
                key: "aborted.bin".to_owned(),
                upload_id: upload_id.clone(),
            }
        );

        let err = s3
            .dispatch(ListPartsInput {
                bucket: bucket.clone(),
                key: "aborted.bin".to_owned(),
                upload_id,
                ..ListPartsInput::default()
            })
            .await
            .expect_err("aborted upload should be gone");
        assert_eq!(err.code, S3ErrorCode::NoSuchUpload);
        assert!(
            !s3.state()
                .object_exists(&bucket, "aborted.bin")
                .expect("bucket")
        );
    }

    #[tokio::test]
    async fn test_should_list_multipart_uploads() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "listmpu").await;
        let first = create_upload(&s3, &bucket, "a.bin").await;
        create_upload(&s3, &bucket, "b.bin").await;
        create_upload(&s3, &bucket, "c.bin").await;

        let page = call!(
            s3,
            ListMultipartUploads,
            ListMultipartUploadsInput {
                bucket: bucket.clone(),
                max_uploads: Some(1),
                ..ListMultipartUploadsInput::default()
            }
        );
        assert_eq!(page.uploads.len(), 1);
        assert_eq!(page.uploads[0].upload_id.as_deref(), Some(first.as_str()));
        assert_eq!(page.is_truncated, Some(true));

        let rest = call!(
            s3,
            ListMultipartUploads,
            ListMultipartUploadsInput {
                bucket: bucket.clone(),
                key_marker: page.next_key_marker,
                upload_id_marker: page.next_upload_id_marker,
                ..ListMultipartUploadsInput::default()
            }
        );
        let keys: Vec<_> = rest.uploads.iter().filter_map(|u| u.key.as_deref()).collect();
        assert_eq!(keys, vec!["b.bin", "c.bin"]);
    }

    #[tokio::test]
    async fn test_should_list_parts() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "parts").await;
        let upload_id = create_upload(&s3, &bucket, "k").await;
        for n in 1..=4 {
            upload_part(&s3, &bucket, "k", &upload_id, n, vec![0u8; 8]).await;
        }

        let resp = call!(
            s3,
            ListParts,
            ListPartsInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                upload_id: upload_id.clone(),
                max_parts: Some(3),
                part_number_marker: None,
            }
        );
        let numbers: Vec<_> = resp.parts.iter().filter_map(|p| p.part_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(resp.is_truncated, Some(true));
        assert_eq!(resp.next_part_number_marker, Some(3));
        assert!(resp.initiator.is_some());
    }

    #[tokio::test]
    async fn test_should_reject_unknown_upload_id() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "nouid").await;

        let err = s3
            .dispatch(UploadPartInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                upload_id: "does-not-exist".to_owned(),
                part_number: Some(1),
                ..UploadPartInput::default()
            })
            .await
            .expect_err("unknown upload should fail");
        assert_eq!(err.code, S3ErrorCode::NoSuchUpload);
    }

    #[tokio::test]
    async fn test_should_report_missing_bucket_before_upload() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "mpubucket").await;
        let upload_id = create_upload(&s3, &bucket, "k").await;
        let missing = test_bucket_name("mpumissing");

        let err = s3
            .dispatch(UploadPartInput {
                bucket: missing.clone(),
                key: "k".to_owned(),
                upload_id: upload_id.clone(),
                part_number: Some(1),
                body: "data".into(),
                ..UploadPartInput::default()
            })
            .await
            .expect_err("upload part into a missing bucket");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);

        let err = s3
            .dispatch(ListPartsInput {
                bucket: missing.clone(),
                key: "k".to_owned(),
                upload_id: "does-not-exist".to_owned(),
                ..ListPartsInput::default()
            })
            .await
            .expect_err("list parts in a missing bucket");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);

        let err = s3
            .dispatch(complete(&missing, "k", &upload_id, Vec::new()))
            .await
            .expect_err("complete in a missing bucket");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);

        let err = s3
            .dispatch(AbortMultipartUploadInput {
                bucket: missing,
                key: "k".to_owned(),
                upload_id: upload_id.clone(),
            })
            .await
            .expect_err("abort in a missing bucket");
        assert_eq!(err.code, S3ErrorCode::NoSuchBucket);

        // The real upload is untouched.
        call!(
            s3,
            ListParts,
            ListPartsInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                upload_id,
                ..ListPartsInput::default()
            }
        );
    }
}
