use std::path::PathBuf;

use crate::AllowList;

/// Default local root, matching the container layout
pub const DEFAULT_UPLOAD_FOLDER: &str = "/app/uploads";

/// Default upload size guard (16 MiB)
pub const DEFAULT_MAX_BLOB_BYTES: u64 = 16 * 1024 * 1024;

/// Default region for the S3 client when none is configured
pub const DEFAULT_REGION: &str = "us-east-1";

/// Process-wide storage configuration, built once at startup
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding locally stored files
    pub local_root: PathBuf,

    /// Absolute max size accepted for a single file
    pub max_blob_bytes: u64,

    /// Permitted extensions and the content type they are served as
    pub allow: AllowList,

    /// Object storage settings; `None` runs Local-only
    pub remote: Option<RemoteConfig>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            local_root: PathBuf::from(DEFAULT_UPLOAD_FOLDER),
            max_blob_bytes: DEFAULT_MAX_BLOB_BYTES,
            allow: AllowList::pdf(),
            remote: None,
        }
    }
}

impl StorageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the local root directory
    pub fn with_local_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.local_root = root.into();
        self
    }

    /// Set max file size
    pub fn with_max_blob_bytes(mut self, bytes: u64) -> Self {
        self.max_blob_bytes = bytes;
        self
    }

    pub fn with_allow_list(mut self, allow: AllowList) -> Self {
        self.allow = allow;
        self
    }

    /// Enable the remote backend
    pub fn with_remote(mut self, remote: RemoteConfig) -> Self {
        self.remote = Some(remote);
        self
    }
}

/// Connection settings for an S3-compatible bucket
#[derive(Clone)]
pub struct RemoteConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible services; enables path-style addressing
    pub endpoint_url: Option<String>,
}

impl RemoteConfig {
    pub fn new(
        bucket: impl Into<String>,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            region: DEFAULT_REGION.to_string(),
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            endpoint_url: None,
        }
    }

    /// Build a config only when bucket and both credential halves are present.
    ///
    /// Blank values count as missing.
    pub fn from_parts(
        bucket: Option<String>,
        access_key_id: Option<String>,
        secret_access_key: Option<String>,
    ) -> Option<Self> {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Some(Self::new(
            present(bucket)?,
            present(access_key_id)?,
            present(secret_access_key)?,
        ))
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

impl std::fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}
