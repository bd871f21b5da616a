//! The S3 emulator entry point.
//!
//! [`MockStackS3`] owns the service state (buckets, objects, multipart
//! uploads) and the configuration. Individual S3 operations are implemented
//! in the [`crate::ops`] submodules as `handle_*` methods, and routed by
//! [`MockStackS3::dispatch`](crate::dispatch).

use std::sync::Arc;

use crate::config::S3Config;
use crate::state::object::Owner;
use crate::state::service::S3ServiceState;

/// The in-memory S3 provider.
///
/// All fields are `Arc`-wrapped, so clones share the same buckets and can be
/// handed to concurrent tasks.
///
/// # Examples
///
/// ```
/// use mockstack_s3_core::MockStackS3;
/// use mockstack_s3_core::config::S3Config;
///
/// let provider = MockStackS3::new(S3Config::default());
/// assert_eq!(provider.config().default_region, "us-east-1");
/// assert!(provider.state().list_buckets().is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct MockStackS3 {
    /// Bucket, object and upload state.
    pub(crate) state: Arc<S3ServiceState>,
    /// Provider configuration.
    pub(crate) config: Arc<S3Config>,
}

impl MockStackS3 {
    /// Create a new provider with the given configuration.
    ///
    /// Buckets created implicitly by writes get the configured default
    /// region and owner.
    #[must_use]
    pub fn new(config: S3Config) -> Self {
        let owner = Owner::new(config.owner_id.clone(), config.owner_display_name.clone());
        let state = S3ServiceState::with_defaults(config.default_region.clone(), owner);
        Self {
            state: Arc::new(state),
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the service state.
    #[must_use]
    pub fn state(&self) -> &S3ServiceState {
        &self.state
    }

    /// Returns a reference to the provider configuration.
    #[must_use]
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// The account that owns everything this provider creates.
    #[must_use]
    pub fn owner(&self) -> &Owner {
        self.state.default_owner()
    }

    /// Reset all state (buckets, objects, multipart uploads).
    pub fn reset(&self) {
        self.state.reset();
    }
}

impl Default for MockStackS3 {
    fn default() -> Self {
        Self::new(S3Config::default())
    }
}
