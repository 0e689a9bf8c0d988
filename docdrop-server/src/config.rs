use std::path::PathBuf;

use anyhow::{Context, Result};
use docdrop_blob::{RemoteConfig, StorageConfig, DEFAULT_MAX_BLOB_BYTES, DEFAULT_REGION, DEFAULT_UPLOAD_FOLDER};

/// Process settings, read once at startup
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    /// Maximum accepted request body, in bytes
    pub max_content_length: usize,
    pub storage: StorageConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset or blank keys use defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let host = get("HTTP_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match get("PORT").or_else(|| get("HTTP_PORT")) {
            Some(raw) => raw.parse().with_context(|| format!("invalid PORT value {raw:?}"))?,
            None => 5000,
        };

        let debug = get("DOCDROP_DEBUG")
            .or_else(|| get("FLASK_DEBUG"))
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));

        let max_content_length = match get("MAX_CONTENT_LENGTH") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid MAX_CONTENT_LENGTH value {raw:?}"))?,
            None => DEFAULT_MAX_BLOB_BYTES as usize,
        };

        let local_root = get("UPLOAD_FOLDER")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_UPLOAD_FOLDER));

        let mut storage = StorageConfig::new()
            .with_local_root(local_root)
            .with_max_blob_bytes(max_content_length as u64);

        if let Some(remote) = RemoteConfig::from_parts(
            get("S3_BUCKET"),
            get("AWS_ACCESS_KEY_ID"),
            get("AWS_SECRET_ACCESS_KEY"),
        ) {
            let mut remote = remote.with_region(get("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()));
            if let Some(endpoint) = get("S3_ENDPOINT_URL") {
                remote = remote.with_endpoint_url(endpoint);
            }
            storage = storage.with_remote(remote);
        }

        Ok(Self {
            host,
            port,
            debug,
            max_content_length,
            storage,
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}
