use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info, warn};

use crate::{
    secure_filename, AllowList, Backend, BlobError, BlobResult, BlobStore, FileCatalog, Identity,
    IdentityStrategy, LocalStore, RandomIdentity, S3Store, StorageConfig,
};

/// A file accepted by [`StorageRouter::upload_file`]
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub identity: Identity,
    pub content: Bytes,
    /// Backend that ended up holding the file
    pub backend: Backend,
}

/// A file returned by [`StorageRouter::download_file`]
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub identity: Identity,
    pub content: Bytes,
    pub content_type: String,
    pub backend: Backend,
}

impl DownloadedFile {
    /// Name offered to the client when saving the file
    pub fn suggested_filename(&self) -> &str {
        self.identity.as_str()
    }
}

/// Decides where uploads go and where downloads come from.
///
/// The remote store is preferred whenever one was configured at startup;
/// every remote failure falls back to the local store. Availability is
/// fixed for the lifetime of the router.
pub struct StorageRouter {
    local: Arc<dyn BlobStore>,
    remote: Option<Arc<dyn BlobStore>>,
    identities: Arc<dyn IdentityStrategy>,
    allow: AllowList,
    max_blob_bytes: u64,
}

impl StorageRouter {
    /// Local-only router with random identities
    pub fn new<L: BlobStore + 'static>(local: L, config: &StorageConfig) -> Self {
        Self {
            local: Arc::new(local),
            remote: None,
            identities: Arc::new(RandomIdentity::new()),
            allow: config.allow.clone(),
            max_blob_bytes: config.max_blob_bytes,
        }
    }

    /// Build the production router: the local directory is created and the
    /// S3 client is set up when the configuration holds a complete remote.
    pub async fn from_config(config: &StorageConfig) -> BlobResult<Self> {
        let local = LocalStore::new(&config.local_root, config.allow.clone());
        local.ensure_root().await?;
        info!(root = %config.local_root.display(), "local storage ready");

        let mut router = Self::new(local, config);

        match &config.remote {
            Some(remote) => match S3Store::connect(remote).await {
                Ok(store) => {
                    info!(bucket = %store.bucket(), "remote storage enabled");
                    router = router.with_remote(store);
                }
                Err(e) => {
                    warn!(error = %e, "remote storage could not be initialised, running local-only");
                }
            },
            None => info!("no remote storage configured, running local-only"),
        }

        Ok(router)
    }

    /// Prefer `remote` for reads and writes
    pub fn with_remote<S: BlobStore + 'static>(mut self, remote: S) -> Self {
        self.remote = Some(Arc::new(remote));
        self
    }

    /// Replace the naming strategy
    pub fn with_identity_strategy<K: IdentityStrategy + 'static>(mut self, identities: K) -> Self {
        self.identities = Arc::new(identities);
        self
    }

    pub fn remote_available(&self) -> bool {
        self.remote.is_some()
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow
    }

    /// Validate, name and store an uploaded file
    pub async fn upload_file(&self, original_filename: &str, content: Bytes) -> BlobResult<StoredFile> {
        if original_filename.is_empty() {
            return Err(BlobError::invalid("No file selected"));
        }

        let extension = self.allow.extension_of(original_filename).ok_or_else(|| {
            let names: Vec<String> = self.allow.extensions().map(str::to_uppercase).collect();
            BlobError::invalid(format!("Only {} files are allowed", names.join(" or ")))
        })?;

        if content.len() as u64 > self.max_blob_bytes {
            return Err(BlobError::invalid(format!(
                "File size {} exceeds maximum {}",
                content.len(),
                self.max_blob_bytes
            )));
        }

        let identity = self.identities.generate(&extension);
        let content_type = self.allow.content_type();

        if let Some(remote) = &self.remote {
            match remote.put(identity.as_str(), content_type, content.clone()).await {
                Ok(_) => {
                    info!(identity = %identity, backend = "remote", bytes = content.len(), "stored file");
                    return Ok(StoredFile {
                        identity,
                        content,
                        backend: Backend::Remote,
                    });
                }
                Err(e) => {
                    warn!(identity = %identity, error = %e, "remote put failed, falling back to local storage");
                }
            }
        }

        match self.local.put(identity.as_str(), content_type, content.clone()).await {
            Ok(_) => {
                info!(identity = %identity, backend = "local", bytes = content.len(), "stored file");
                Ok(StoredFile {
                    identity,
                    content,
                    backend: Backend::Local,
                })
            }
            Err(e) => {
                error!(identity = %identity, error = %e, "local put failed, upload lost");
                Err(e)
            }
        }
    }

    /// Fetch a stored file, remote first when available
    pub async fn download_file(&self, identity: &str) -> BlobResult<DownloadedFile> {
        let name = secure_filename(identity);
        if name.is_empty() {
            return Err(BlobError::not_found(identity));
        }
        let identity = Identity::from_string(name);

        if let Some(remote) = &self.remote {
            match remote.get(identity.as_str()).await {
                Ok(content) => return Ok(self.downloaded(identity, content, Backend::Remote)),
                Err(e) if e.is_not_found() => {
                    debug!(identity = %identity, "not in remote storage, trying local");
                }
                Err(e) => {
                    warn!(identity = %identity, error = %e, "remote get failed, falling back to local storage");
                }
            }
        }

        match self.local.get(identity.as_str()).await {
            Ok(content) => Ok(self.downloaded(identity, content, Backend::Local)),
            Err(e) => {
                if !e.is_not_found() {
                    warn!(identity = %identity, error = %e, "local read failed");
                }
                Err(BlobError::not_found(identity.into_string()))
            }
        }
    }

    /// Sorted names of locally stored files
    pub async fn list_files(&self) -> BlobResult<Vec<String>> {
        self.catalog().list_available().await
    }

    /// Listing view over the stores held by this router
    pub fn catalog(&self) -> FileCatalog {
        FileCatalog::new(Arc::clone(&self.local), !self.remote_available())
    }

    fn downloaded(&self, identity: Identity, content: Bytes, backend: Backend) -> DownloadedFile {
        DownloadedFile {
            identity,
            content,
            content_type: self.allow.content_type().to_string(),
            backend,
        }
    }
}
