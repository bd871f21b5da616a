//! Whole-object reads, writes, deletes and copies.

use http::StatusCode;
use mockstack_s3_model::input::{
    CopyObjectInput, DeleteObjectInput, DeleteObjectsInput, GetObjectInput, HeadObjectInput,
    PutObjectInput,
};
use mockstack_s3_model::output::{
    CopyObjectOutput, DeleteObjectOutput, DeleteObjectsOutput, GetObjectOutput, HeadObjectOutput,
    PutObjectOutput,
};
use mockstack_s3_model::types::{
    CopyObjectResult, DeletedObject, MetadataDirective, TaggingDirective,
};
use mockstack_s3_model::{S3Error, S3ErrorCode, StreamingBlob};
use tracing::debug;

use crate::body::collect_body;
use crate::checksums::{SuppliedChecksums, checksum_fields, resolve_checksum};
use crate::provider::MockStackS3;
use crate::state::object::{CopyOverrides, ObjectMetadata, ObjectOptions, S3Object};
use crate::utils::{Conditions, Precondition, parse_copy_source, parse_range, parse_tagging_header};
use crate::validation::{
    require, validate_content_md5, validate_metadata, validate_object_key, validate_tags,
};

/// Content type reported for objects stored without one.
const DEFAULT_CONTENT_TYPE: &str = "binary/octet-stream";

// Wire types use signed integers for sizes and counts. Object bodies live in
// memory, so their lengths always fit.
#[allow(
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::unused_async
)]
impl MockStackS3 {
    /// Store an object, replacing the current one.
    ///
    /// The bucket is created on demand. The body is drained before anything
    /// is validated against it.
    pub async fn handle_put_object(
        &self,
        mut input: PutObjectInput,
    ) -> Result<PutObjectOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;
        validate_object_key(&input.key)?;
        validate_metadata(&input.metadata)?;

        let tags = input
            .tagging
            .as_deref()
            .map(parse_tagging_header)
            .unwrap_or_default();
        validate_tags(&tags)?;

        let data = collect_body(std::mem::take(&mut input.body)).await?;

        let verify = self.config.validate_checksums;
        if verify {
            validate_content_md5(input.content_md5.as_deref(), &data)?;
        }
        let supplied = SuppliedChecksums {
            crc32: input.checksum_crc32.as_deref(),
            crc32c: input.checksum_crc32c.as_deref(),
            sha1: input.checksum_sha1.as_deref(),
            sha256: input.checksum_sha256.as_deref(),
        };
        let checksum = resolve_checksum(input.checksum_algorithm, supplied, &data, verify)
            .map_err(|e| S3Error::with_message(S3ErrorCode::BadDigest, e.to_string()))?;

        let options = ObjectOptions {
            metadata: put_metadata(&input, tags),
            storage_class: input.storage_class,
            checksum,
            ..ObjectOptions::default()
        };
        let object = self
            .state
            .put_object(&input.bucket, &input.key, data, options);

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            version_id = %object.version_id,
            "put_object completed"
        );

        let [checksum_crc32, checksum_crc32c, checksum_sha1, checksum_sha256] =
            checksum_fields(object.checksum.as_ref());
        Ok(PutObjectOutput {
            bucket_key_enabled: object.metadata.sse_bucket_key_enabled,
            checksum_crc32,
            checksum_crc32c,
            checksum_sha1,
            checksum_sha256,
            e_tag: Some(object.etag.clone()),
            server_side_encryption: object.metadata.sse_algorithm,
            size: Some(object.size as i64),
            sse_customer_algorithm: object.metadata.sse_customer_algorithm.clone(),
            sse_customer_key_md5: object.metadata.sse_customer_key_md5.clone(),
            ssekms_key_id: object.metadata.sse_kms_key_id.clone(),
            version_id: object.reported_version_id(),
        })
    }

    /// Return an object after preconditions and range are applied.
    ///
    /// Conditional headers are evaluated before the range: a 304 carries no
    /// body, a satisfiable range yields a 206 with the sliced body.
    pub async fn handle_get_object(
        &self,
        input: GetObjectInput,
    ) -> Result<GetObjectOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;

        let object = self.lookup_object(&input.bucket, &input.key, input.version_id.as_deref())?;

        let conditions = Conditions {
            if_match: input.if_match.as_deref(),
            if_none_match: input.if_none_match.as_deref(),
            if_modified_since: input.if_modified_since,
            if_unmodified_since: input.if_unmodified_since,
        };
        match conditions.evaluate(&object.etag, object.last_modified) {
            Precondition::Proceed => {}
            Precondition::NotModified => {
                debug!(bucket = %input.bucket, key = %input.key, "get_object not modified");
                return Ok(GetObjectOutput {
                    e_tag: Some(object.etag),
                    last_modified: Some(object.last_modified),
                    status_code: StatusCode::NOT_MODIFIED,
                    ..GetObjectOutput::default()
                });
            }
            Precondition::Failed(header) => return Err(S3Error::precondition_failed(header)),
        }

        let mut output = object_output(&object);
        let range = input
            .range
            .as_deref()
            .and_then(|range| parse_range(range, object.size));
        if let Some((start, end)) = range {
            let slice = object.body.slice(start as usize..=end as usize);
            output.content_length = Some(slice.len() as i64);
            output.content_range = Some(format!("bytes {start}-{end}/{}", object.size));
            output.body = Some(StreamingBlob::new(slice));
            output.status_code = StatusCode::PARTIAL_CONTENT;
        }

        // Response header overrides from the query string.
        if input.response_cache_control.is_some() {
            output.cache_control = input.response_cache_control;
        }
        if input.response_content_disposition.is_some() {
            output.content_disposition = input.response_content_disposition;
        }
        if input.response_content_encoding.is_some() {
            output.content_encoding = input.response_content_encoding;
        }
        if input.response_content_language.is_some() {
            output.content_language = input.response_content_language;
        }
        if input.response_content_type.is_some() {
            output.content_type = input.response_content_type;
        }
        if input.response_expires.is_some() {
            output.expires = input.response_expires;
        }

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            status = output.status_code.as_u16(),
            "get_object completed"
        );
        Ok(output)
    }

    /// Like `GetObject` without the body.
    pub async fn handle_head_object(
        &self,
        input: HeadObjectInput,
    ) -> Result<HeadObjectOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;

        let object = self.lookup_object(&input.bucket, &input.key, input.version_id.as_deref())?;

        let conditions = Conditions {
            if_match: input.if_match.as_deref(),
            if_none_match: input.if_none_match.as_deref(),
            if_modified_since: input.if_modified_since,
            if_unmodified_since: input.if_unmodified_since,
        };
        match conditions.evaluate(&object.etag, object.last_modified) {
            Precondition::Proceed => {}
            Precondition::NotModified => {
                return Ok(HeadObjectOutput {
                    e_tag: Some(object.etag),
                    last_modified: Some(object.last_modified),
                    status_code: StatusCode::NOT_MODIFIED,
                    ..HeadObjectOutput::default()
                });
            }
            Precondition::Failed(header) => return Err(S3Error::precondition_failed(header)),
        }

        debug!(bucket = %input.bucket, key = %input.key, "head_object completed");
        Ok(head_output(object_output(&object)))
    }

    /// Remove a key. Missing keys still succeed.
    ///
    /// Deleting a key that does not exist, or a version that is not the
    /// current one, succeeds without changing anything.
    pub async fn handle_delete_object(
        &self,
        input: DeleteObjectInput,
    ) -> Result<DeleteObjectOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;

        let removed =
            self.state
                .delete_object(&input.bucket, &input.key, input.version_id.as_deref())?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            removed = removed.is_some(),
            "delete_object completed"
        );

        Ok(DeleteObjectOutput {
            delete_marker: None,
            version_id: input
                .version_id
                .or_else(|| removed.as_ref().and_then(S3Object::reported_version_id)),
        })
    }

    /// Remove many keys, reporting each outcome.
    pub async fn handle_delete_objects(
        &self,
        input: DeleteObjectsInput,
    ) -> Result<DeleteObjectsOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        if input.delete.objects.is_empty() {
            return Err(S3Error::malformed_xml(
                "The XML you provided was not well-formed or did not validate against our published schema",
            ));
        }
        if !self.state.bucket_exists(&input.bucket) {
            return Err(S3Error::no_such_bucket(&input.bucket));
        }

        let quiet = input.delete.quiet.unwrap_or(false);
        let mut deleted = Vec::with_capacity(input.delete.objects.len());
        let mut errors = Vec::new();

        for identifier in input.delete.objects {
            let result = self.state.delete_object(
                &input.bucket,
                &identifier.key,
                identifier.version_id.as_deref(),
            );
            match result {
                Ok(_) => deleted.push(DeletedObject {
                    key: Some(identifier.key),
                    version_id: identifier.version_id,
                    ..DeletedObject::default()
                }),
                Err(err) => {
                    let err = S3Error::from(err);
                    errors.push(mockstack_s3_model::types::Error {
                        code: Some(err.code.as_str().to_owned()),
                        key: Some(identifier.key),
                        message: Some(err.message),
                        version_id: identifier.version_id,
                    });
                }
            }
        }

        debug!(
            bucket = %input.bucket,
            deleted_count = deleted.len(),
            error_count = errors.len(),
            quiet,
            "delete_objects completed"
        );

        Ok(DeleteObjectsOutput {
            deleted: if quiet { Vec::new() } else { deleted },
            errors,
        })
    }

    /// Copy within or across buckets.
    ///
    /// The destination bucket is created on demand. Source conditions that
    /// do not hold fail with 412, including the ones a read would answer
    /// with 304.
    pub async fn handle_copy_object(
        &self,
        input: CopyObjectInput,
    ) -> Result<CopyObjectOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;
        require("CopySource", &input.copy_source)?;
        validate_object_key(&input.key)?;

        let source = parse_copy_source(&input.copy_source)?;
        let src_object =
            self.lookup_object(&source.bucket, &source.key, source.version_id.as_deref())?;

        let conditions = Conditions {
            if_match: input.copy_source_if_match.as_deref(),
            if_none_match: input.copy_source_if_none_match.as_deref(),
            if_modified_since: input.copy_source_if_modified_since,
            if_unmodified_since: input.copy_source_if_unmodified_since,
        };
        match conditions.evaluate(&src_object.etag, src_object.last_modified) {
            Precondition::Proceed => {}
            Precondition::NotModified => {
                let header = if input.copy_source_if_none_match.is_some() {
                    "x-amz-copy-source-If-None-Match"
                } else {
                    "x-amz-copy-source-If-Modified-Since"
                };
                return Err(S3Error::precondition_failed(header));
            }
            Precondition::Failed(header) => {
                return Err(S3Error::precondition_failed(format!(
                    "x-amz-copy-source-{header}"
                )));
            }
        }

        let replace_metadata = input.metadata_directive == Some(MetadataDirective::Replace);
        let replace_tagging = input.tagging_directive == Some(TaggingDirective::Replace);

        let is_self_copy = source.bucket == input.bucket && source.key == input.key;
        if is_self_copy
            && !replace_metadata
            && input.storage_class.is_none()
            && input.server_side_encryption.is_none()
        {
            return Err(S3Error::with_message(
                S3ErrorCode::InvalidRequest,
                "This copy request is illegal because it is trying to copy an object to itself \
                 without changing the object's metadata, storage class, website redirect \
                 location or encryption attributes.",
            ));
        }

        validate_metadata(&input.metadata)?;
        let tags = if replace_tagging {
            let tags = input
                .tagging
                .as_deref()
                .map(parse_tagging_header)
                .unwrap_or_default();
            validate_tags(&tags)?;
            tags
        } else {
            Vec::new()
        };

        let overrides = CopyOverrides {
            metadata: copy_metadata(&input, tags),
            replace_metadata,
            replace_tagging,
            storage_class: input.storage_class,
            checksum_algorithm: input.checksum_algorithm,
            owner: None,
        };
        let object = self.state.copy_object(
            &source.bucket,
            &source.key,
            &input.bucket,
            &input.key,
            overrides,
        )?;

        debug!(
            src_bucket = %source.bucket,
            src_key = %source.key,
            dst_bucket = %input.bucket,
            dst_key = %input.key,
            "copy_object completed"
        );

        let [checksum_crc32, checksum_crc32c, checksum_sha1, checksum_sha256] =
            checksum_fields(object.checksum.as_ref());
        Ok(CopyObjectOutput {
            bucket_key_enabled: object.metadata.sse_bucket_key_enabled,
            copy_object_result: Some(CopyObjectResult {
                checksum_crc32,
                checksum_crc32c,
                checksum_sha1,
                checksum_sha256,
                e_tag: Some(object.etag.clone()),
                last_modified: Some(object.last_modified),
            }),
            copy_source_version_id: src_object.reported_version_id(),
            server_side_encryption: object.metadata.sse_algorithm,
            ssekms_key_id: object.metadata.sse_kms_key_id.clone(),
            version_id: object.reported_version_id(),
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the full 200 response for an object, body included.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn object_output(object: &S3Object) -> GetObjectOutput {
    let meta = &object.metadata;
    let [checksum_crc32, checksum_crc32c, checksum_sha1, checksum_sha256] =
        checksum_fields(object.checksum.as_ref());

    GetObjectOutput {
        accept_ranges: Some("bytes".to_owned()),
        body: Some(StreamingBlob::new(object.body.clone())),
        bucket_key_enabled: meta.sse_bucket_key_enabled,
        cache_control: meta.cache_control.clone(),
        checksum_crc32,
        checksum_crc32c,
        checksum_sha1,
        checksum_sha256,
        content_disposition: meta.content_disposition.clone(),
        content_encoding: meta.content_encoding.clone(),
        content_language: meta.content_language.clone(),
        content_length: Some(object.size as i64),
        content_range: None,
        content_type: Some(
            meta.content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
        ),
        e_tag: Some(object.etag.clone()),
        expires: meta.expires.clone(),
        last_modified: Some(object.last_modified),
        metadata: meta.user_metadata.clone(),
        parts_count: object.parts_count.map(|n| n as i32),
        server_side_encryption: meta.sse_algorithm,
        sse_customer_algorithm: meta.sse_customer_algorithm.clone(),
        sse_customer_key_md5: meta.sse_customer_key_md5.clone(),
        ssekms_key_id: meta.sse_kms_key_id.clone(),
        status_code: StatusCode::OK,
        storage_class: Some(object.storage_class),
        tag_count: (!meta.tagging.is_empty()).then(|| meta.tagging.len() as i32),
        version_id: object.reported_version_id(),
    }
}

/// Strip a get response down to its headers.
fn head_output(get: GetObjectOutput) -> HeadObjectOutput {
    HeadObjectOutput {
        accept_ranges: get.accept_ranges,
        bucket_key_enabled: get.bucket_key_enabled,
        cache_control: get.cache_control,
        checksum_crc32: get.checksum_crc32,
        checksum_crc32c: get.checksum_crc32c,
        checksum_sha1: get.checksum_sha1,
        checksum_sha256: get.checksum_sha256,
        content_disposition: get.content_disposition,
        content_encoding: get.content_encoding,
        content_language: get.content_language,
        content_length: get.content_length,
        content_type: get.content_type,
        e_tag: get.e_tag,
        expires: get.expires,
        last_modified: get.last_modified,
        metadata: get.metadata,
        parts_count: get.parts_count,
        server_side_encryption: get.server_side_encryption,
        sse_customer_algorithm: get.sse_customer_algorithm,
        sse_customer_key_md5: get.sse_customer_key_md5,
        ssekms_key_id: get.ssekms_key_id,
        status_code: get.status_code,
        storage_class: get.storage_class,
        tag_count: get.tag_count,
        version_id: get.version_id,
    }
}

/// Build [`ObjectMetadata`] from a [`PutObjectInput`].
fn put_metadata(input: &PutObjectInput, tagging: Vec<(String, String)>) -> ObjectMetadata {
    ObjectMetadata {
        content_type: input.content_type.clone(),
        content_encoding: input.content_encoding.clone(),
        content_disposition: input.content_disposition.clone(),
        content_language: input.content_language.clone(),
        cache_control: input.cache_control.clone(),
        expires: input.expires.clone(),
        user_metadata: input.metadata.clone(),
        sse_algorithm: input.server_side_encryption,
        sse_kms_key_id: input.ssekms_key_id.clone(),
        sse_bucket_key_enabled: input.bucket_key_enabled,
        sse_customer_algorithm: input.sse_customer_algorithm.clone(),
        sse_customer_key_md5: input.sse_customer_key_md5.clone(),
        tagging,
        acl: input.acl,
    }
}

/// Build the request side of a copy's metadata.
fn copy_metadata(input: &CopyObjectInput, tagging: Vec<(String, String)>) -> ObjectMetadata {
    ObjectMetadata {
        content_type: input.content_type.clone(),
        content_encoding: input.content_encoding.clone(),
        content_disposition: input.content_disposition.clone(),
        content_language: input.content_language.clone(),
        cache_control: input.cache_control.clone(),
        expires: input.expires.clone(),
        user_metadata: input.metadata.clone(),
        sse_algorithm: input.server_side_encryption,
        sse_kms_key_id: input.ssekms_key_id.clone(),
        sse_bucket_key_enabled: input.bucket_key_enabled,
        sse_customer_algorithm: None,
        sse_customer_key_md5: None,
        tagging,
        acl: input.acl,
    }
}
