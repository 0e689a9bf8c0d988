//! docdrop-axum: HTTP routes for docdrop.
//!
//! Exposes the storage router over axum: an index page, a JSON listing,
//! single-file multipart upload and attachment download.

pub mod app;
pub mod multipart;
pub mod page;
pub mod rest;
pub mod state;
mod error;
pub use error::{ErrorKind, HttpError};
pub use multipart::SingleFile;
pub use state::DocDropState;

pub use app::{docdrop, DocDropApp};
