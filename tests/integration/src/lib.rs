//! End-to-end tests for the MockStack S3 emulator.
//!
//! Every test drives a fresh in-process [`MockStackS3`] through
//! [`MockStackS3::dispatch`], the same entry point a front end would use, so
//! no server or network is involved.
//!
//! Run them with:
//! ```text
//! cargo test -p mockstack-integration
//! ```

use std::sync::Once;

use mockstack_s3_core::{MockStackS3, S3Config};
use mockstack_s3_model::input::{CreateBucketInput, PutObjectInput};

static INIT: Once = Once::new();

/// Initialize tracing (once).
///
/// `RUST_LOG` wins; otherwise the filter is the configured `LOG_LEVEL`.
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(S3Config::from_env().log_level)
                }),
            )
            .with_test_writer()
            .init();
    });
}

/// Dispatch an input and unwrap the reply variant it must produce.
///
/// Panics with the operation name when the call fails.
macro_rules! call {
    ($s3:expr, $variant:ident, $input:expr) => {
        match $s3.dispatch($input).await {
            Ok(mockstack_s3_core::S3Reply::$variant(output)) => output,
            Ok(other) => panic!("unexpected reply to {}: {other:?}", stringify!($variant)),
            Err(e) => panic!("{} failed: {e}", stringify!($variant)),
        }
    };
}

/// Create an emulator with the default configuration.
#[must_use]
pub fn s3() -> MockStackS3 {
    init_tracing();
    MockStackS3::default()
}

/// Create an emulator with a custom configuration.
#[must_use]
pub fn s3_with(config: S3Config) -> MockStackS3 {
    init_tracing();
    MockStackS3::new(config)
}

/// Generate a unique bucket name for a test.
#[must_use]
pub fn test_bucket_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a bucket and return its name.
pub async fn create_test_bucket(s3: &MockStackS3, prefix: &str) -> String {
    let name = test_bucket_name(prefix);
    s3.dispatch(CreateBucketInput {
        bucket: name.clone(),
        ..CreateBucketInput::default()
    })
    .await
    .unwrap_or_else(|e| panic!("failed to create bucket {name}: {e}"));
    name
}

/// Store `body` under `key` and return the object's ETag.
pub async fn put_text(s3: &MockStackS3, bucket: &str, key: &str, body: &str) -> String {
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
    output
        .e_tag
        .unwrap_or_else(|| panic!("put of {key} returned no etag"))
}

mod test_bucket;
mod test_bucket_config;
mod test_error;
mod test_multipart;
mod test_object;
mod test_precondition;
mod test_versioning;
