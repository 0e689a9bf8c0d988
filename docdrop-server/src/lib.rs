pub mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use docdrop_axum::{docdrop, DocDropApp};
use docdrop_blob::StorageRouter;

pub use config::Settings;

/// Wire storage and routes from settings
pub async fn build(settings: &Settings) -> Result<DocDropApp> {
    let storage = StorageRouter::from_config(&settings.storage)
        .await
        .with_context(|| format!("preparing upload folder {}", settings.storage.local_root.display()))?;

    Ok(docdrop(Arc::new(storage), settings.max_content_length))
}
