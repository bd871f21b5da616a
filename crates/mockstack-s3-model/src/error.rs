//! S3 error codes and the error value every handler returns.

use std::fmt;

use http::StatusCode;

/// Declares [`S3ErrorCode`] from one table of code, status and default message.
macro_rules! error_codes {
    ($($code:ident => $status:ident, $message:literal;)+) => {
        /// Well-known S3 error codes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        #[allow(missing_docs)]
        pub enum S3ErrorCode {
            $($code,)+
        }

        impl S3ErrorCode {
            /// Wire name of the code, as it appears in an `<Error><Code>` element.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$code => stringify!($code),)+
                }
            }

            /// Status S3 answers with when this code is raised.
            #[must_use]
            pub fn default_status_code(&self) -> StatusCode {
                match self {
                    $(Self::$code => StatusCode::$status,)+
                }
            }

            /// Message used when the handler does not supply one.
            #[must_use]
            pub fn default_message(&self) -> &'static str {
                match self {
                    $(Self::$code => $message,)+
                }
            }
        }
    };
}

error_codes! {
    AccessDenied => FORBIDDEN, "Access Denied";
    BadDigest => BAD_REQUEST, "The Content-MD5 or checksum you specified did not match what we received";
    BucketAlreadyExists => CONFLICT, "The requested bucket name is not available";
    BucketAlreadyOwnedByYou => CONFLICT,
        "Your previous request to create the named bucket succeeded and you already own it";
    BucketNotEmpty => CONFLICT, "The bucket you tried to delete is not empty";
    InternalError => INTERNAL_SERVER_ERROR, "We encountered an internal error. Please try again.";
    InvalidArgument => BAD_REQUEST, "Invalid Argument";
    InvalidBucketName => BAD_REQUEST, "The specified bucket is not valid";
    InvalidDigest => BAD_REQUEST, "The Content-MD5 you specified is not valid";
    InvalidPart => BAD_REQUEST,
        "One or more of the specified parts could not be found. The part may not have been \
         uploaded, or the specified entity tag may not match the part's entity tag.";
    InvalidRequest => BAD_REQUEST, "Invalid Request";
    InvalidTag => BAD_REQUEST, "The tag provided was not a valid tag";
    KeyTooLongError => BAD_REQUEST, "Your key is too long";
    MalformedPolicy => BAD_REQUEST, "Policies must be valid JSON";
    MalformedXML => BAD_REQUEST,
        "The XML you provided was not well-formed or did not validate against our published schema";
    MetadataTooLarge => BAD_REQUEST, "Your metadata headers exceed the maximum allowed metadata size";
    MissingParameter => BAD_REQUEST, "A required parameter is missing";
    NoSuchBucket => NOT_FOUND, "The specified bucket does not exist";
    NoSuchBucketPolicy => NOT_FOUND, "The bucket policy does not exist";
    NoSuchCORSConfiguration => NOT_FOUND, "The CORS configuration does not exist";
    NoSuchKey => NOT_FOUND, "The specified key does not exist.";
    NoSuchLifecycleConfiguration => NOT_FOUND, "The lifecycle configuration does not exist";
    NoSuchTagSet => NOT_FOUND, "The TagSet does not exist";
    NoSuchUpload => NOT_FOUND,
        "The specified upload does not exist. The upload ID may be invalid, or the upload \
         may have been aborted or completed.";
    NoSuchVersion => NOT_FOUND, "The specified version does not exist.";
    NoSuchWebsiteConfiguration => NOT_FOUND,
        "The specified bucket does not have a website configuration";
    NotImplemented => NOT_IMPLEMENTED,
        "A header you provided implies functionality that is not implemented";
    PreconditionFailed => PRECONDITION_FAILED,
        "At least one of the pre-conditions you specified did not hold";
    ServerSideEncryptionConfigurationNotFoundError => NOT_FOUND,
        "The server side encryption configuration was not found";
}

/// Which side of the exchange an error is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFault {
    /// The caller sent something the service rejects.
    Client,
    /// The service failed on a well-formed request.
    Server,
}

impl ErrorFault {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Server
        } else {
            Self::Client
        }
    }
}

impl S3ErrorCode {
    /// Whether this code blames the caller or the service.
    #[must_use]
    pub fn fault(&self) -> ErrorFault {
        ErrorFault::of(self.default_status_code())
    }
}

impl fmt::Display for S3ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An S3 error response.
#[derive(Debug)]
pub struct S3Error {
    /// The error code.
    pub code: S3ErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// The resource that caused the error.
    pub resource: Option<String>,
    /// The request ID.
    pub request_id: Option<String>,
    /// The HTTP status code.
    pub status_code: StatusCode,
    /// The underlying source error, if any.
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for S3Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S3Error({}): {}", self.code, self.message)
    }
}

impl std::error::Error for S3Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl S3Error {
    /// Create a new S3Error from an error code.
    #[must_use]
    pub fn new(code: S3ErrorCode) -> Self {
        Self::with_message(code, code.default_message())
    }

    /// Create a new S3Error with a custom message.
    #[must_use]
    pub fn with_message(code: S3ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status_code: code.default_status_code(),
            message: message.into(),
            code,
            resource: None,
            request_id: None,
            source: None,
        }
    }

    /// Set the resource that caused this error.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the request ID.
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the source error.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether the caller or the service is at fault.
    #[must_use]
    pub fn fault(&self) -> ErrorFault {
        ErrorFault::of(self.status_code)
    }

    /// Create a MissingParameter error naming the absent field.
    #[must_use]
    pub fn missing_parameter(field: &str) -> Self {
        Self::with_message(
            S3ErrorCode::MissingParameter,
            format!("Missing required parameter: {field}"),
        )
        .with_resource(field)
    }

    /// Create a NoSuchBucket error.
    #[must_use]
    pub fn no_such_bucket(bucket_name: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::NoSuchBucket).with_resource(bucket_name)
    }

    /// Create a NoSuchKey error.
    #[must_use]
    pub fn no_such_key(key: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::NoSuchKey).with_resource(key)
    }

    /// Create a NoSuchUpload error.
    #[must_use]
    pub fn no_such_upload(upload_id: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::NoSuchUpload).with_resource(upload_id)
    }

    /// Create a NoSuchVersion error.
    #[must_use]
    pub fn no_such_version(version_id: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::NoSuchVersion).with_resource(version_id)
    }

    /// Create a BucketAlreadyOwnedByYou error.
    #[must_use]
    pub fn bucket_already_owned_by_you(bucket_name: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::BucketAlreadyOwnedByYou).with_resource(bucket_name)
    }

    /// Create a BucketNotEmpty error.
    #[must_use]
    pub fn bucket_not_empty(bucket_name: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::BucketNotEmpty).with_resource(bucket_name)
    }

    /// Create an InternalError.
    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(S3ErrorCode::InternalError, message)
    }

    /// Create an InvalidArgument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::with_message(S3ErrorCode::InvalidArgument, message)
    }

    /// Create an InvalidPart error.
    #[must_use]
    pub fn invalid_part(part_info: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::InvalidPart).with_resource(part_info)
    }

    /// Create a MalformedXML error.
    #[must_use]
    pub fn malformed_xml(detail: impl Into<String>) -> Self {
        Self::with_message(S3ErrorCode::MalformedXML, detail)
    }

    /// Create a PreconditionFailed error.
    #[must_use]
    pub fn precondition_failed(condition: impl Into<String>) -> Self {
        Self::new(S3ErrorCode::PreconditionFailed).with_resource(condition)
    }
}

/// Create an S3Error from an error code.
///
/// # Examples
///
/// ```
/// use mockstack_s3_model::s3_error;
/// use mockstack_s3_model::error::S3ErrorCode;
///
/// let err = s3_error!(NoSuchBucket);
/// assert_eq!(err.code, S3ErrorCode::NoSuchBucket);
///
/// let err = s3_error!(NoSuchKey, "The key does not exist");
/// assert_eq!(err.message, "The key does not exist");
/// ```
#[macro_export]
macro_rules! s3_error {
    ($code:ident) => {
        $crate::error::S3Error::new($crate::error::S3ErrorCode::$code)
    };
    ($code:ident, $msg:expr) => {
        $crate::error::S3Error::with_message($crate::error::S3ErrorCode::$code, $msg)
    };
}
