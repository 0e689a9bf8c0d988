use std::sync::Arc;

use serde::Serialize;

use crate::{BlobResult, BlobStore};

/// Listing of stored files as seen through the local store.
///
/// Remote objects are not enumerated, so the listing is only complete
/// when no remote backend is configured.
#[derive(Clone)]
pub struct FileCatalog {
    local: Arc<dyn BlobStore>,
    complete: bool,
}

/// Snapshot returned by [`FileCatalog::listing`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub files: Vec<String>,
    pub complete: bool,
}

impl FileCatalog {
    pub fn new(local: Arc<dyn BlobStore>, complete: bool) -> Self {
        Self { local, complete }
    }

    /// Sorted ascending, independent of directory enumeration order
    pub async fn list_available(&self) -> BlobResult<Vec<String>> {
        let mut files = self.local.list().await?;
        files.sort();
        Ok(files)
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub async fn listing(&self) -> BlobResult<Listing> {
        Ok(Listing {
            files: self.list_available().await?,
            complete: self.complete,
        })
    }
}
