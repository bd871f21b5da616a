//! Typed operation dispatch.
//!
//! [`S3Call`] wraps the input of any supported operation and [`S3Reply`] the
//! matching output. [`MockStackS3::dispatch`] routes a call to its handler
//! inside a `tracing` span named after the operation, so a front end (or a
//! test) can drive the whole service through one entry point.

use mockstack_s3_model::S3Error;
use mockstack_s3_model::S3Operation;
#[allow(clippy::wildcard_imports)]
use mockstack_s3_model::input::*;
#[allow(clippy::wildcard_imports)]
use mockstack_s3_model::output::*;
use tracing::Instrument;

use crate::provider::MockStackS3;

/// Declares `S3Call`, `S3Reply` and the dispatch table from one list of
/// `Operation => handler(Input) -> Output` rows.
macro_rules! s3_dispatch {
    ($($op:ident => $handler:ident($input:ident) -> $output:ident),+ $(,)?) => {
        /// A request for one S3 operation, carrying its typed input.
        #[derive(Debug)]
        #[allow(clippy::large_enum_variant)]
        pub enum S3Call {
            $(
                #[doc = concat!("A `", stringify!($op), "` request.")]
                $op($input),
            )+
        }

        /// The successful result of an [`S3Call`].
        #[derive(Debug)]
        #[allow(clippy::large_enum_variant)]
        pub enum S3Reply {
            $(
                #[doc = concat!("A `", stringify!($op), "` response.")]
                $op($output),
            )+
        }

        impl S3Call {
            /// The operation this call invokes.
            #[must_use]
            pub fn operation(&self) -> S3Operation {
                match self {
                    $(Self::$op(_) => S3Operation::$op,)+
                }
            }
        }

        impl S3Reply {
            /// The operation this reply answers.
            #[must_use]
            pub fn operation(&self) -> S3Operation {
                match self {
                    $(Self::$op(_) => S3Operation::$op,)+
                }
            }
        }

        $(
            impl From<$input> for S3Call {
                fn from(input: $input) -> Self {
                    Self::$op(input)
                }
            }
        )+

        impl MockStackS3 {
            async fn route(&self, call: S3Call) -> Result<S3Reply, S3Error> {
                match call {
                    $(S3Call::$op(input) => self.$handler(input).await.map(S3Reply::$op),)+
                }
            }
        }
    };
}

s3_dispatch! {
    // Buckets
    CreateBucket => handle_create_bucket(CreateBucketInput) -> CreateBucketOutput,
    DeleteBucket => handle_delete_bucket(DeleteBucketInput) -> DeleteBucketOutput,
    HeadBucket => handle_head_bucket(HeadBucketInput) -> HeadBucketOutput,
    ListBuckets => handle_list_buckets(ListBucketsInput) -> ListBucketsOutput,
    GetBucketLocation =>
        handle_get_bucket_location(GetBucketLocationInput) -> GetBucketLocationOutput,
    // Bucket sub-resources
    GetBucketVersioning =>
        handle_get_bucket_versioning(GetBucketVersioningInput) -> GetBucketVersioningOutput,
    PutBucketVersioning =>
        handle_put_bucket_versioning(PutBucketVersioningInput) -> PutBucketVersioningOutput,
    GetBucketCors => handle_get_bucket_cors(GetBucketCorsInput) -> GetBucketCorsOutput,
    PutBucketCors => handle_put_bucket_cors(PutBucketCorsInput) -> PutBucketCorsOutput,
    DeleteBucketCors => handle_delete_bucket_cors(DeleteBucketCorsInput) -> DeleteBucketCorsOutput,
    GetBucketPolicy => handle_get_bucket_policy(GetBucketPolicyInput) -> GetBucketPolicyOutput,
    PutBucketPolicy => handle_put_bucket_policy(PutBucketPolicyInput) -> PutBucketPolicyOutput,
    DeleteBucketPolicy =>
        handle_delete_bucket_policy(DeleteBucketPolicyInput) -> DeleteBucketPolicyOutput,
    GetBucketAcl => handle_get_bucket_acl(GetBucketAclInput) -> GetBucketAclOutput,
    PutBucketAcl => handle_put_bucket_acl(PutBucketAclInput) -> PutBucketAclOutput,
    GetBucketEncryption =>
        handle_get_bucket_encryption(GetBucketEncryptionInput) -> GetBucketEncryptionOutput,
    PutBucketEncryption =>
        handle_put_bucket_encryption(PutBucketEncryptionInput) -> PutBucketEncryptionOutput,
    DeleteBucketEncryption =>
        handle_delete_bucket_encryption(DeleteBucketEncryptionInput)
            -> DeleteBucketEncryptionOutput,
    GetBucketLifecycleConfiguration =>
        handle_get_bucket_lifecycle_configuration(GetBucketLifecycleConfigurationInput)
            -> GetBucketLifecycleConfigurationOutput,
    PutBucketLifecycleConfiguration =>
        handle_put_bucket_lifecycle_configuration(PutBucketLifecycleConfigurationInput)
            -> PutBucketLifecycleConfigurationOutput,
    DeleteBucketLifecycle =>
        handle_delete_bucket_lifecycle(DeleteBucketLifecycleInput) -> DeleteBucketLifecycleOutput,
    GetBucketWebsite => handle_get_bucket_website(GetBucketWebsiteInput) -> GetBucketWebsiteOutput,
    PutBucketWebsite => handle_put_bucket_website(PutBucketWebsiteInput) -> PutBucketWebsiteOutput,
    DeleteBucketWebsite =>
        handle_delete_bucket_website(DeleteBucketWebsiteInput) -> DeleteBucketWebsiteOutput,
    GetBucketTagging => handle_get_bucket_tagging(GetBucketTaggingInput) -> GetBucketTaggingOutput,
    PutBucketTagging => handle_put_bucket_tagging(PutBucketTaggingInput) -> PutBucketTaggingOutput,
    DeleteBucketTagging =>
        handle_delete_bucket_tagging(DeleteBucketTaggingInput) -> DeleteBucketTaggingOutput,
    GetBucketLogging => handle_get_bucket_logging(GetBucketLoggingInput) -> GetBucketLoggingOutput,
    PutBucketLogging => handle_put_bucket_logging(PutBucketLoggingInput) -> PutBucketLoggingOutput,
    // Objects
    PutObject => handle_put_object(PutObjectInput) -> PutObjectOutput,
    GetObject => handle_get_object(GetObjectInput) -> GetObjectOutput,
    HeadObject => handle_head_object(HeadObjectInput) -> HeadObjectOutput,
    DeleteObject => handle_delete_object(DeleteObjectInput) -> DeleteObjectOutput,
    DeleteObjects => handle_delete_objects(DeleteObjectsInput) -> DeleteObjectsOutput,
    CopyObject => handle_copy_object(CopyObjectInput) -> CopyObjectOutput,
    GetObjectTagging => handle_get_object_tagging(GetObjectTaggingInput) -> GetObjectTaggingOutput,
    PutObjectTagging => handle_put_object_tagging(PutObjectTaggingInput) -> PutObjectTaggingOutput,
    DeleteObjectTagging =>
        handle_delete_object_tagging(DeleteObjectTaggingInput) -> DeleteObjectTaggingOutput,
    // Listing
    ListObjects => handle_list_objects(ListObjectsInput) -> ListObjectsOutput,
    ListObjectsV2 => handle_list_objects_v2(ListObjectsV2Input) -> ListObjectsV2Output,
    // Multipart
    CreateMultipartUpload =>
        handle_create_multipart_upload(CreateMultipartUploadInput) -> CreateMultipartUploadOutput,
    UploadPart => handle_upload_part(UploadPartInput) -> UploadPartOutput,
    CompleteMultipartUpload =>
        handle_complete_multipart_upload(CompleteMultipartUploadInput)
            -> CompleteMultipartUploadOutput,
    AbortMultipartUpload =>
        handle_abort_multipart_upload(AbortMultipartUploadInput) -> AbortMultipartUploadOutput,
    ListMultipartUploads =>
        handle_list_multipart_uploads(ListMultipartUploadsInput) -> ListMultipartUploadsOutput,
    ListParts => handle_list_parts(ListPartsInput) -> ListPartsOutput,
}

impl MockStackS3 {
    /// Run one operation.
    ///
    /// # Errors
    ///
    /// Returns the handler's [`S3Error`] unchanged.
    pub async fn dispatch(&self, call: impl Into<S3Call>) -> Result<S3Reply, S3Error> {
        let call = call.into();
        let op = call.operation();
        let span = tracing::debug_span!("s3", operation = %op);

        async move {
            tracing::debug!("dispatching S3 operation");
            let result = self.route(call).await;
            if let Err(err) = &result {
                tracing::debug!(code = %err.code, status = %err.status_code, "S3 operation failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}
