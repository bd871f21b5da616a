//! Multipart uploads, from initiation to completion or abort.

use mockstack_s3_model::input::{
    AbortMultipartUploadInput, CompleteMultipartUploadInput, CreateMultipartUploadInput,
    ListMultipartUploadsInput, ListPartsInput, UploadPartInput,
};
use mockstack_s3_model::output::{
    AbortMultipartUploadOutput, CompleteMultipartUploadOutput, CreateMultipartUploadOutput,
    ListMultipartUploadsOutput, ListPartsOutput, UploadPartOutput,
};
use mockstack_s3_model::{S3Error, S3ErrorCode};
use tracing::debug;

use super::{page_size, wire_count};
use crate::body::collect_body;
use crate::checksums::{SuppliedChecksums, checksum_fields, resolve_checksum};
use crate::provider::MockStackS3;
use crate::state::multipart::{
    DEFAULT_MAX_PARTS, DEFAULT_MAX_UPLOADS, MultipartUpload, PartListOptions, UploadListOptions,
};
use crate::state::object::{ObjectMetadata, ObjectOptions};
use crate::utils::{object_location, parse_tagging_header};
use crate::validation::{
    require, validate_content_md5, validate_metadata, validate_object_key, validate_part_number,
    validate_tags,
};

// These handler methods stay async so every operation dispatches the same way.
#[allow(clippy::unused_async)]
impl MockStackS3 {
    /// Open an upload and record the final object's attributes.
    ///
    /// The bucket is created on demand. Metadata, tags and storage class are
    /// held on the upload and applied to the object on completion.
    pub async fn handle_create_multipart_upload(
        &self,
        input: CreateMultipartUploadInput,
    ) -> Result<CreateMultipartUploadOutput, S3Error> {
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

        let options = ObjectOptions {
            metadata: upload_metadata(&input, tags),
            storage_class: input.storage_class,
            ..ObjectOptions::default()
        };
        let upload = self.state.create_multipart_upload(
            &input.bucket,
            &input.key,
            options,
            input.checksum_algorithm,
        );

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %upload.upload_id,
            "create_multipart_upload completed"
        );

        Ok(CreateMultipartUploadOutput {
            bucket: Some(input.bucket),
            bucket_key_enabled: upload.metadata.sse_bucket_key_enabled,
            checksum_algorithm: upload.checksum_algorithm,
            key: Some(input.key),
            server_side_encryption: upload.metadata.sse_algorithm,
            ssekms_key_id: upload.metadata.sse_kms_key_id,
            upload_id: Some(upload.upload_id),
        })
    }

    /// Upload one part. Re-uploading a part number replaces the earlier part.
    pub async fn handle_upload_part(
        &self,
        mut input: UploadPartInput,
    ) -> Result<UploadPartOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;
        require("UploadId", &input.upload_id)?;
        let part_number = validate_part_number(input.part_number)?;

        let upload = self.upload_for(&input.bucket, &input.key, &input.upload_id)?;
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
        let requested = input.checksum_algorithm.or(upload.checksum_algorithm);
        let checksum = resolve_checksum(requested, supplied, &data, verify)
            .map_err(|e| S3Error::with_message(S3ErrorCode::BadDigest, e.to_string()))?;

        let part = self
            .state
            .upload_part(&input.upload_id, part_number, data, checksum)?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            part_number,
            size = part.size,
            "upload_part completed"
        );

        let [checksum_crc32, checksum_crc32c, checksum_sha1, checksum_sha256] =
            checksum_fields(part.checksum.as_ref());
        Ok(UploadPartOutput {
            bucket_key_enabled: upload.metadata.sse_bucket_key_enabled,
            checksum_crc32,
            checksum_crc32c,
            checksum_sha1,
            checksum_sha256,
            e_tag: Some(part.etag),
            server_side_encryption: upload.metadata.sse_algorithm,
            ssekms_key_id: upload.metadata.sse_kms_key_id,
        })
    }

    /// Complete a multipart upload.
    ///
    /// Parts are concatenated in the order the caller lists them. Nothing
    /// changes unless every referenced part exists with a matching ETag.
    pub async fn handle_complete_multipart_upload(
        &self,
        input: CompleteMultipartUploadInput,
    ) -> Result<CompleteMultipartUploadOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;
        require("UploadId", &input.upload_id)?;
        self.upload_for(&input.bucket, &input.key, &input.upload_id)?;

        let completed = input
            .multipart_upload
            .map(|upload| upload.parts)
            .filter(|parts| !parts.is_empty())
            .ok_or_else(|| {
                S3Error::malformed_xml(
                    "The XML you provided was not well-formed or did not validate against our \
                     published schema",
                )
            })?;

        let mut parts = Vec::with_capacity(completed.len());
        for part in completed {
            let part_number = part
                .part_number
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| S3Error::malformed_xml("Every part must carry a PartNumber"))?;
            let etag = part
                .e_tag
                .ok_or_else(|| S3Error::invalid_part(part_number.to_string()))?;
            parts.push((part_number, etag));
        }

        let object = self
            .state
            .complete_multipart_upload(&input.upload_id, &parts)?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            parts = parts.len(),
            size = object.size,
            "complete_multipart_upload completed"
        );

        Ok(CompleteMultipartUploadOutput {
            location: Some(object_location(
                &self.config.endpoint_url,
                &input.bucket,
                &input.key,
            )),
            bucket: Some(input.bucket),
            bucket_key_enabled: object.metadata.sse_bucket_key_enabled,
            e_tag: Some(object.etag.clone()),
            key: Some(input.key),
            server_side_encryption: object.metadata.sse_algorithm,
            ssekms_key_id: object.metadata.sse_kms_key_id.clone(),
            version_id: object.reported_version_id(),
        })
    }

    /// Abort a multipart upload, discarding its parts.
    pub async fn handle_abort_multipart_upload(
        &self,
        input: AbortMultipartUploadInput,
    ) -> Result<AbortMultipartUploadOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;
        require("UploadId", &input.upload_id)?;

        self.upload_for(&input.bucket, &input.key, &input.upload_id)?;
        let upload = self.state.abort_multipart_upload(&input.upload_id)?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            parts = upload.parts_count(),
            "abort_multipart_upload completed"
        );

        Ok(AbortMultipartUploadOutput {})
    }

    /// List in-progress multipart uploads of a bucket.
    pub async fn handle_list_multipart_uploads(
        &self,
        input: ListMultipartUploadsInput,
    ) -> Result<ListMultipartUploadsOutput, S3Error> {
        require("Bucket", &input.bucket)?;

        let max_uploads = page_size(input.max_uploads, DEFAULT_MAX_UPLOADS);
        let options = UploadListOptions {
            prefix: input.prefix.clone(),
            key_marker: input.key_marker.clone(),
            upload_id_marker: input.upload_id_marker.clone(),
            max_uploads: Some(max_uploads),
        };
        let result = self.state.list_multipart_uploads(&input.bucket, &options)?;

        debug!(
            bucket = %input.bucket,
            count = result.uploads.len(),
            is_truncated = result.is_truncated,
            "list_multipart_uploads completed"
        );

        Ok(ListMultipartUploadsOutput {
            bucket: Some(input.bucket),
            is_truncated: Some(result.is_truncated),
            key_marker: input.key_marker,
            max_uploads: Some(wire_count(max_uploads)),
            next_key_marker: result.next_key_marker,
            next_upload_id_marker: result.next_upload_id_marker,
            prefix: input.prefix,
            upload_id_marker: input.upload_id_marker,
            uploads: result.uploads.iter().map(MultipartUpload::to_model).collect(),
        })
    }

    /// List the uploaded parts of a multipart upload.
    pub async fn handle_list_parts(
        &self,
        input: ListPartsInput,
    ) -> Result<ListPartsOutput, S3Error> {
        require("Bucket", &input.bucket)?;
        require("Key", &input.key)?;
        require("UploadId", &input.upload_id)?;

        let upload = self.upload_for(&input.bucket, &input.key, &input.upload_id)?;
        let max_parts = page_size(input.max_parts, DEFAULT_MAX_PARTS);
        let options = PartListOptions {
            part_number_marker: input.part_number_marker.and_then(|n| u32::try_from(n).ok()),
            max_parts: Some(max_parts),
        };
        let result = self.state.list_parts(&input.upload_id, &options)?;

        debug!(
            bucket = %input.bucket,
            key = %input.key,
            upload_id = %input.upload_id,
            count = result.parts.len(),
            "list_parts completed"
        );

        Ok(ListPartsOutput {
            bucket: Some(input.bucket),
            checksum_algorithm: upload.checksum_algorithm,
            initiator: Some(upload.initiator()),
            is_truncated: Some(result.is_truncated),
            key: Some(input.key),
            max_parts: Some(wire_count(max_parts)),
            next_part_number_marker: result
                .next_part_number_marker
                .and_then(|n| i32::try_from(n).ok()),
            owner: Some(upload.owner.to_model()),
            part_number_marker: input.part_number_marker,
            parts: result.parts.iter().map(|p| p.to_model()).collect(),
            storage_class: Some(upload.storage_class),
            upload_id: Some(input.upload_id),
        })
    }

    /// Snapshot of an upload, which must belong to `bucket`/`key`.
    ///
    /// A missing bucket is reported before the upload ID is looked at.
    fn upload_for(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<MultipartUpload, S3Error> {
        if !self.state.bucket_exists(bucket) {
            return Err(S3Error::no_such_bucket(bucket));
        }
        let upload = self.state.get_multipart_upload(upload_id)?;
        if upload.bucket != bucket || upload.key != key {
            return Err(S3Error::no_such_upload(upload_id));
        }
        Ok(upload)
    }
}

/// Build [`ObjectMetadata`] from a [`CreateMultipartUploadInput`].
fn upload_metadata(
    input: &CreateMultipartUploadInput,
    tagging: Vec<(String, String)>,
) -> ObjectMetadata {
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
