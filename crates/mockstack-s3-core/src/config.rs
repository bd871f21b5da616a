//! S3-specific configuration.
//!
//! Provides [`S3Config`] for configuring the MockStack S3 emulator.
//! Configuration values are loaded from environment variables.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::state::object::{DEFAULT_OWNER_DISPLAY_NAME, DEFAULT_OWNER_ID};

/// S3 service configuration.
///
/// All fields have defaults that mirror a fresh AWS account in `us-east-1`.
/// Configuration can be loaded from environment variables via
/// [`S3Config::from_env`].
///
/// # Examples
///
/// ```
/// use mockstack_s3_core::config::S3Config;
///
/// let config = S3Config::default();
/// assert_eq!(config.default_region, "us-east-1");
/// assert_eq!(config.default_max_keys, 1000);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct S3Config {
    /// Region assigned to buckets created without a location constraint.
    #[builder(default = String::from("us-east-1"))]
    pub default_region: String,

    /// Fallback `EnvFilter` directive for hosts that install a subscriber
    /// without `RUST_LOG`, e.g. `"info"` or `"mockstack_s3_core=debug"`.
    #[builder(default = String::from("info"))]
    pub log_level: String,

    /// Page size used by listings when the caller gives none.
    #[builder(default = 1000)]
    pub default_max_keys: usize,

    /// Canonical ID reported as the owner of buckets and objects.
    #[builder(default = String::from(DEFAULT_OWNER_ID))]
    pub owner_id: String,

    /// Display name reported alongside the owner ID.
    #[builder(default = String::from(DEFAULT_OWNER_DISPLAY_NAME))]
    pub owner_display_name: String,

    /// Base URL used to build the `Location` of completed multipart uploads.
    #[builder(default = String::from("http://localhost:4566"))]
    pub endpoint_url: String,

    /// Whether caller-supplied checksums and Content-MD5 are verified.
    #[builder(default = true)]
    pub validate_checksums: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            default_region: String::from("us-east-1"),
            log_level: String::from("info"),
            default_max_keys: 1000,
            owner_id: String::from(DEFAULT_OWNER_ID),
            owner_display_name: String::from(DEFAULT_OWNER_DISPLAY_NAME),
            endpoint_url: String::from("http://localhost:4566"),
            validate_checksums: true,
        }
    }
}

impl S3Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparseable variables keep their defaults:
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DEFAULT_REGION` | `us-east-1` |
    /// | `LOG_LEVEL` | `info` |
    /// | `S3_DEFAULT_MAX_KEYS` | `1000` |
    /// | `S3_OWNER_ID` | canonical test account ID |
    /// | `S3_OWNER_DISPLAY_NAME` | `webfile` |
    /// | `S3_ENDPOINT_URL` | `http://localhost:4566` |
    /// | `S3_VALIDATE_CHECKSUMS` | `true` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading values through `lookup`.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let text = |name: &str, slot: &mut String| {
            if let Some(v) = lookup(name) {
                *slot = v;
            }
        };

        text("DEFAULT_REGION", &mut config.default_region);
        text("LOG_LEVEL", &mut config.log_level);
        text("S3_OWNER_ID", &mut config.owner_id);
        text("S3_OWNER_DISPLAY_NAME", &mut config.owner_display_name);
        text("S3_ENDPOINT_URL", &mut config.endpoint_url);
        let trimmed = config.endpoint_url.trim_end_matches('/').len();
        config.endpoint_url.truncate(trimmed);

        if let Some(n) = lookup("S3_DEFAULT_MAX_KEYS").and_then(|v| v.parse().ok()) {
            config.default_max_keys = n;
        }
        if let Some(v) = lookup("S3_VALIDATE_CHECKSUMS") {
            config.validate_checksums = parse_bool(&v);
        }
        config
    }
}

/// `"1"` and any casing of `"true"` are true; everything else is false.
fn parse_bool(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}
