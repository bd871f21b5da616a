//! In-memory S3 emulation engine for MockStack.
//!
//! [`MockStackS3`] reproduces the observable behavior of the S3 API against
//! process-local state: buckets, objects, multipart uploads and bucket
//! sub-resource configuration. Nothing is persisted and no request is ever
//! authenticated; the crate is meant for tests and local development.
//!
//! # Architecture
//!
//! ```text
//! S3Call (typed input, one variant per operation)
//!        |
//!        v
//! MockStackS3::dispatch  (tracing span per operation)
//!        |
//!        v
//! ops::* handlers  (validate, drain body, evaluate conditions)
//!        |
//!        v
//!   S3ServiceState (DashMap of buckets + uploads, RwLock per bucket)
//! ```
//!
//! # Example
//!
//! ```
//! use mockstack_s3_core::{MockStackS3, S3Reply};
//! use mockstack_s3_model::input::{GetObjectInput, PutObjectInput};
//!
//! # tokio_test::block_on(async {
//! let s3 = MockStackS3::default();
//! s3.dispatch(PutObjectInput {
//!     bucket: "demo".to_owned(),
//!     key: "hello.txt".to_owned(),
//!     body: "hello".into(),
//!     ..PutObjectInput::default()
//! })
//! .await?;
//!
//! let S3Reply::GetObject(output) = s3
//!     .dispatch(GetObjectInput {
//!         bucket: "demo".to_owned(),
//!         key: "hello.txt".to_owned(),
//!         ..GetObjectInput::default()
//!     })
//!     .await?
//! else {
//!     unreachable!()
//! };
//! let body = output.body.ok_or("missing body")?;
//! assert_eq!(body.to_text()?, "hello");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # }).unwrap();
//! ```

pub mod body;
pub mod checksums;
pub mod config;
pub mod dispatch;
pub mod error;
mod ops;
pub mod provider;
pub mod state;
pub mod utils;
pub mod validation;

pub use config::S3Config;
pub use dispatch::{S3Call, S3Reply};
pub use provider::MockStackS3;
