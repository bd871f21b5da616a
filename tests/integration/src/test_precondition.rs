//! Conditional request integration tests.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use mockstack_s3_model::S3ErrorCode;
    use mockstack_s3_model::input::{CopyObjectInput, GetObjectInput, HeadObjectInput};

    use crate::{create_test_bucket, put_text, s3};

    fn get(bucket: &str, key: &str) -> GetObjectInput {
        GetObjectInput {
            bucket: bucket.to_owned(),
            key: key.to_owned(),
            ..GetObjectInput::default()
        }
    }

    #[tokio::test]
    async fn test_should_serve_matching_if_match() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "ifmatch").await;
        let etag = put_text(&s3, &bucket, "k", "body").await;

        let resp = call!(
            s3,
            GetObject,
            GetObjectInput {
                if_match: Some(etag.clone()),
                ..get(&bucket, "k")
            }
        );
        assert_eq!(resp.status_code, 200);

        // Wildcard and unquoted forms match too.
        for candidate in ["*".to_owned(), etag.trim_matches('"').to_owned()] {
            let resp = call!(
                s3,
                GetObject,
                GetObjectInput {
                    if_match: Some(candidate),
                    ..get(&bucket, "k")
                }
            );
            assert_eq!(resp.status_code, 200);
        }
    }

    #[tokio::test]
    async fn test_should_fail_mismatched_if_match() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "ifmatchfail").await;
        put_text(&s3, &bucket, "k", "body").await;

        let err = s3
            .dispatch(GetObjectInput {
                if_match: Some("\"0000\"".to_owned()),
                ..get(&bucket, "k")
            })
            .await
            .expect_err("mismatched If-Match should fail");
        assert_eq!(err.code, S3ErrorCode::PreconditionFailed);
        assert_eq!(err.status_code, 412);
    }

    #[tokio::test]
    async fn test_should_answer_not_modified_for_if_none_match() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "ifnone").await;
        let etag = put_text(&s3, &bucket, "k", "body").await;

        let resp = call!(
            s3,
            GetObject,
            GetObjectInput {
                if_none_match: Some(etag.clone()),
                ..get(&bucket, "k")
            }
        );
        assert_eq!(resp.status_code, 304);
        assert!(resp.body.is_none());
        assert_eq!(resp.e_tag.as_deref(), Some(etag.as_str()));

        let resp = call!(
            s3,
            HeadObject,
            HeadObjectInput {
                bucket: bucket.clone(),
                key: "k".to_owned(),
                if_none_match: Some(etag),
                ..HeadObjectInput::default()
            }
        );
        assert_eq!(resp.status_code, 304);
    }

    #[tokio::test]
    async fn test_should_compare_modification_times() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "dates").await;
        put_text(&s3, &bucket, "k", "body").await;
        let past = Utc::now() - Duration::hours(1);
        let future = Utc::now() + Duration::hours(1);

        let resp = call!(
            s3,
            GetObject,
            GetObjectInput {
                if_modified_since: Some(past),
                ..get(&bucket, "k")
            }
        );
        assert_eq!(resp.status_code, 200);

        let resp = call!(
            s3,
            GetObject,
            GetObjectInput {
                if_modified_since: Some(future),
                ..get(&bucket, "k")
            }
        );
        assert_eq!(resp.status_code, 304);

        let err = s3
            .dispatch(GetObjectInput {
                if_unmodified_since: Some(past),
                ..get(&bucket, "k")
            })
            .await
            .expect_err("object changed after the cutoff");
        assert_eq!(err.code, S3ErrorCode::PreconditionFailed);
    }

    #[tokio::test]
    async fn test_should_fail_unmodified_since_even_when_if_match_passes() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "matchdate").await;
        let etag = put_text(&s3, &bucket, "k", "body").await;

        let err = s3
            .dispatch(GetObjectInput {
                if_match: Some(etag),
                if_unmodified_since: Some(Utc::now() - Duration::hours(1)),
                ..get(&bucket, "k")
            })
            .await
            .expect_err("object changed after the cutoff");
        assert_eq!(err.code, S3ErrorCode::PreconditionFailed);
        assert_eq!(err.status_code, 412);
    }

    #[tokio::test]
    async fn test_should_answer_not_modified_by_date_when_if_none_match_passes() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "nonematchdate").await;
        put_text(&s3, &bucket, "k", "body").await;

        let resp = call!(
            s3,
            GetObject,
            GetObjectInput {
                if_none_match: Some("\"not-the-etag\"".to_owned()),
                if_modified_since: Some(Utc::now() + Duration::hours(1)),
                ..get(&bucket, "k")
            }
        );
        assert_eq!(resp.status_code, 304);
        assert!(resp.body.is_none());
    }

    #[tokio::test]
    async fn test_should_guard_copy_with_source_conditions() {
        let s3 = s3();
        let bucket = create_test_bucket(&s3, "copycond").await;
        let etag = put_text(&s3, &bucket, "src", "body").await;

        let err = s3
            .dispatch(CopyObjectInput {
                bucket: bucket.clone(),
                key: "dst".to_owned(),
                copy_source: format!("{bucket}/src"),
                copy_source_if_none_match: Some(etag.clone()),
                ..CopyObjectInput::default()
            })
            .await
            .expect_err("copy should be refused");
        assert_eq!(err.code, S3ErrorCode::PreconditionFailed);
        assert!(!s3.state().object_exists(&bucket, "dst").expect("bucket"));

        call!(
            s3,
            CopyObject,
            CopyObjectInput {
                bucket: bucket.clone(),
                key: "dst".to_owned(),
                copy_source: format!("{bucket}/src"),
                copy_source_if_match: Some(etag),
                ..CopyObjectInput::default()
            }
        );
        assert!(s3.state().object_exists(&bucket, "dst").expect("bucket"));
    }
}
