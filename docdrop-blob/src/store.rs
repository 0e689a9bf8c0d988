use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::{BlobError, BlobResult};

/// Core storage operations - must be implemented by all storage backends
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `data` under `key`, replacing anything already there
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> BlobResult<PutResult>;

    /// Fetch the full content stored under `key`
    async fn get(&self, key: &str) -> BlobResult<Bytes>;

    /// Keys currently held by the store, sorted ascending
    async fn list(&self) -> BlobResult<Vec<String>> {
        Err(BlobError::Unsupported)
    }

    /// Which backend this store represents
    fn backend(&self) -> Backend;
}

/// Result of a successful put operation
#[derive(Debug, Clone)]
pub struct PutResult {
    pub etag: Option<String>,
    pub size_bytes: u64,
}

/// Backend holding the durable copy of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Local,
    Remote,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Local => "local",
            Backend::Remote => "remote",
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
