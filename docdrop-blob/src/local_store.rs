use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;

use crate::{AllowList, Backend, BlobError, BlobResult, BlobStore, PutResult};

/// Flat directory of stored files, one file per identity
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
    allow: AllowList,
}

impl LocalStore {
    pub fn new(root: impl Into<PathBuf>, allow: AllowList) -> Self {
        Self {
            root: root.into(),
            allow,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the root directory if it does not exist yet
    pub async fn ensure_root(&self) -> BlobResult<()> {
        tokio::fs::create_dir_all(&self.root).await?;
        Ok(())
    }

    fn path_for(&self, key: &str) -> BlobResult<PathBuf> {
        // Keys are flat names; anything that could leave the root is refused.
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(BlobError::invalid(format!("Invalid file name: {key:?}")));
        }
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl BlobStore for LocalStore {
    async fn put(&self, key: &str, _content_type: &str, data: Bytes) -> BlobResult<PutResult> {
        let path = self.path_for(key)?;
        self.ensure_root().await?;
        tokio::fs::write(&path, &data).await?;

        Ok(PutResult {
            etag: None,
            size_bytes: data.len() as u64,
        })
    }

    async fn get(&self, key: &str) -> BlobResult<Bytes> {
        let path = self.path_for(key)?;
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(BlobError::not_found(key)),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> BlobResult<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if !self.allow.is_allowed(&name) {
                continue;
            }
            // Follows symlinks, so a link to a regular file is listed.
            match tokio::fs::metadata(entry.path()).await {
                Ok(meta) if meta.is_file() => names.push(name),
                _ => continue,
            }
        }

        names.sort();
        Ok(names)
    }

    fn backend(&self) -> Backend {
        Backend::Local
    }
}
