//! # docdrop-blob: document storage core
//!
//! Stores uploaded documents under short random names and serves them back.
//! Two stores are supported behind the [`BlobStore`] trait:
//!
//! - [`LocalStore`]: a flat directory on the local filesystem
//! - [`S3Store`]: an S3-compatible bucket, active only when configured
//!
//! [`StorageRouter`] ties them together. Uploads go to the remote store when
//! one is configured and fall back to the local directory on any failure;
//! downloads try the remote store first and the local directory second.
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP layer    │  ← routes, multipart, rendering
//! ├─────────────────┤
//! │  StorageRouter  │  ← gate, naming, fallback policy
//! ├────────┬────────┤
//! │ Local  │   S3   │  ← storage primitives
//! └────────┴────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use docdrop_blob::prelude::*;
//!
//! # async fn run() -> BlobResult<()> {
//! let config = StorageConfig::new().with_local_root("/tmp/uploads");
//! let router = StorageRouter::from_config(&config).await?;
//!
//! let stored = router.upload_file("report.pdf", bytes::Bytes::from_static(b"%PDF-1.4")).await?;
//! let file = router.download_file(stored.identity.as_str()).await?;
//! assert_eq!(file.content_type, "application/pdf");
//! # Ok(())
//! # }
//! ```

mod catalog;
mod config;
mod error;
mod gate;
mod identity;
mod local_store;
mod router;
mod s3_store;
pub mod store;

pub use catalog::{FileCatalog, Listing};
pub use config::{RemoteConfig, StorageConfig, DEFAULT_MAX_BLOB_BYTES, DEFAULT_REGION, DEFAULT_UPLOAD_FOLDER};
pub use error::{BlobError, BlobResult};
pub use gate::{secure_filename, AllowList, PDF_CONTENT_TYPE};
pub use identity::{Identity, IdentityStrategy, RandomIdentity, IDENTITY_LEN};
pub use local_store::LocalStore;
pub use router::{DownloadedFile, StorageRouter, StoredFile};
pub use s3_store::S3Store;
pub use store::{Backend, BlobStore, PutResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Backend, BlobError, BlobResult, BlobStore, DownloadedFile, Identity, StorageConfig,
        StorageRouter, StoredFile,
    };
}
