//! Store-level error types.
//!
//! [`StoreError`] names the conditions the in-memory store can report. Each
//! variant maps to a concrete [`S3ErrorCode`] through the [`From`]
//! implementation, so handlers can propagate store failures with `?`.
//!
//! # Usage
//!
//! ```
//! use mockstack_s3_core::error::StoreError;
//! use mockstack_s3_model::{S3Error, S3ErrorCode};
//!
//! let err = StoreError::BucketNotFound {
//!     bucket: "my-bucket".to_owned(),
//! };
//! let s3_err: S3Error = err.into();
//! assert_eq!(s3_err.code, S3ErrorCode::NoSuchBucket);
//! ```

use mockstack_s3_model::{S3Error, S3ErrorCode};

/// Failure conditions reported by the in-memory store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    // -----------------------------------------------------------------------
    // Bucket errors
    // -----------------------------------------------------------------------
    /// No bucket by that name.
    #[error("The specified bucket does not exist: {bucket}")]
    BucketNotFound {
        /// The bucket name that was not found.
        bucket: String,
    },

    /// A bucket with this name is already present.
    #[error(
        "Your previous request to create the named bucket succeeded and you already own it: {bucket}"
    )]
    BucketAlreadyExists {
        /// The bucket name that already exists.
        bucket: String,
    },

    /// The bucket still holds objects.
    #[error("The bucket you tried to delete is not empty: {bucket}")]
    BucketNotEmpty {
        /// The bucket that still has objects.
        bucket: String,
    },

    // -----------------------------------------------------------------------
    // Object errors
    // -----------------------------------------------------------------------
    /// No object at that key.
    #[error("The specified key does not exist: {key}")]
    ObjectNotFound {
        /// The key that was not found.
        key: String,
    },

    // -----------------------------------------------------------------------
    // Multipart errors
    // -----------------------------------------------------------------------
    /// Unknown, completed or aborted upload.
    #[error("The specified upload does not exist: {upload_id}")]
    UploadNotFound {
        /// The upload ID that was not found.
        upload_id: String,
    },

    /// A part referenced on completion was never uploaded.
    #[error("Part {part_number} has not been uploaded")]
    PartNotFound {
        /// The missing part number.
        part_number: u32,
    },

    /// A part referenced on completion carries a different entity tag.
    #[error("The entity tag for part {part_number} does not match: expected {expected}")]
    PartETagMismatch {
        /// The part number whose ETag differs.
        part_number: u32,
        /// The ETag recorded when the part was uploaded.
        expected: String,
    },
}

impl StoreError {
    /// Convert this error into an [`S3Error`].
    #[must_use]
    pub fn into_s3_error(self) -> S3Error {
        S3Error::from(self)
    }
}

impl From<StoreError> for S3Error {
    fn from(err: StoreError) -> Self {
        let code = error_code(&err);
        let resource = match &err {
            StoreError::BucketNotFound { bucket }
            | StoreError::BucketAlreadyExists { bucket }
            | StoreError::BucketNotEmpty { bucket } => bucket.clone(),
            StoreError::ObjectNotFound { key } => key.clone(),
            StoreError::UploadNotFound { upload_id } => upload_id.clone(),
            StoreError::PartNotFound { part_number }
            | StoreError::PartETagMismatch { part_number, .. } => part_number.to_string(),
        };

        S3Error::with_message(code, err.to_string()).with_resource(resource)
    }
}

/// Map a [`StoreError`] variant to the corresponding [`S3ErrorCode`].
fn error_code(err: &StoreError) -> S3ErrorCode {
    match err {
        StoreError::BucketNotFound { .. } => S3ErrorCode::NoSuchBucket,
        StoreError::BucketAlreadyExists { .. } => S3ErrorCode::BucketAlreadyOwnedByYou,
        StoreError::BucketNotEmpty { .. } => S3ErrorCode::BucketNotEmpty,
        StoreError::ObjectNotFound { .. } => S3ErrorCode::NoSuchKey,
        StoreError::UploadNotFound { .. } => S3ErrorCode::NoSuchUpload,
        StoreError::PartNotFound { .. } | StoreError::PartETagMismatch { .. } => {
            S3ErrorCode::InvalidPart
        }
    }
}

/// Convenience alias for store results.
pub type StoreResult<T> = Result<T, StoreError>;
