//! In-memory storage behind the emulator.
//!
//! Layout, from the top down:
//!
//! - [`S3ServiceState`] -- top-level service owning buckets and uploads
//! - [`S3Bucket`] / [`BucketConfiguration`] -- per-bucket objects and configs
//! - [`KeyStore`] -- sorted key-level storage and listing
//! - [`S3Object`] / [`ObjectMetadata`] -- object types
//! - [`MultipartUpload`] / [`UploadPart`] -- uploads that have not been completed
//!
//! # Thread Safety
//!
//! Everything here is `Send + Sync`. Locking is split in two levels:
//!
//! - sharded `DashMap`s for the bucket and upload tables
//! - `parking_lot::RwLock` for each bucket's key store and configuration

pub(crate) mod bucket;
pub(crate) mod keystore;
pub(crate) mod multipart;
pub(crate) mod object;
pub(crate) mod service;

pub use bucket::{BucketConfiguration, BucketConfigurationUpdate, FieldUpdate, S3Bucket};
pub use keystore::{DEFAULT_MAX_KEYS, KeyStore, ListOptions, ListResult};
pub use multipart::{
    MultipartUpload, PartListOptions, PartListResult, UploadListOptions, UploadListResult,
    UploadPart,
};
pub use object::{
    ChecksumData, CopyOverrides, DEFAULT_OWNER_DISPLAY_NAME, DEFAULT_OWNER_ID, NULL_VERSION_ID,
    ObjectMetadata, ObjectOptions, Owner, S3Object,
};
pub use service::{DEFAULT_REGION, S3ServiceState};
