//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded objects are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Files under `root` on the local filesystem.
    #[default]
    Local,
    /// Process memory. Objects vanish on restart.
    Memory,
    /// Any S3-compatible service.
    S3,
}

fn default_root() -> String {
    String::from("campus-storage")
}

fn default_public_base_url() -> String {
    String::from("http://127.0.0.1:8080/storage")
}

/// 10 MiB.
const fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Root directory for the local backend.
    #[serde(default = "default_root")]
    pub root: String,

    /// Prefix of every public object URL: `{public_base_url}/{bucket}/{path}`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    /// Largest accepted upload, per file.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,

    #[serde(default)]
    pub s3_bucket: String,

    #[serde(default)]
    pub s3_region: String,

    /// Custom endpoint for S3-compatible services. Empty means AWS.
    #[serde(default)]
    pub s3_endpoint: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            root: default_root(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
            s3_bucket: String::new(),
            s3_region: String::new(),
            s3_endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
        }
    }
}

impl StorageConfig {
    /// Check if the S3 fields needed for the `s3` backend are present.
    pub fn is_s3_configured(&self) -> bool {
        !self.s3_bucket.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
    }

    /// Public base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.public_base_url.trim_end_matches('/')
    }
}
