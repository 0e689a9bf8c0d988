use axum::{
    extract::{Path, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use docdrop_blob::Backend;
use serde::{Deserialize, Serialize};

use crate::{page, DocDropState, HttpError, SingleFile};

/// Body of `GET /api/pdfs`
#[derive(Debug, Serialize, Deserialize)]
pub struct PdfList {
    pub pdfs: Vec<String>,
    /// False when files held only in object storage may be missing
    pub complete: bool,
}

/// Body of a successful `POST /upload`
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub filename: String,
    pub download_url: String,
    pub backend: Backend,
}

pub fn routes(state: DocDropState) -> Router<()> {
    Router::new()
        .route("/", get(index))
        .route("/api/pdfs", get(list_pdfs))
        .route("/upload", post(upload))
        .route("/download/{filename}", get(download))
        .route("/health", get(|| async { "ok" }))
        .fallback(|| async { HttpError::not_found("Page not found") })
        .with_state(state)
}

async fn index(State(state): State<DocDropState>) -> Result<Html<String>, HttpError> {
    let listing = state.storage.catalog().listing().await?;
    Ok(Html(page::index_html(&listing.files, listing.complete)))
}

async fn list_pdfs(State(state): State<DocDropState>) -> Result<Json<PdfList>, HttpError> {
    let listing = state.storage.catalog().listing().await?;
    Ok(Json(PdfList {
        pdfs: listing.files,
        complete: listing.complete,
    }))
}

async fn upload(State(state): State<DocDropState>, file: SingleFile) -> Result<Json<UploadResponse>, HttpError> {
    let stored = state.storage.upload_file(&file.filename, file.data).await?;
    let filename = stored.identity.into_string();

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        download_url: format!("/download/{filename}"),
        filename,
        backend: stored.backend,
    }))
}

async fn download(
    State(state): State<DocDropState>,
    Path(filename): Path<String>,
) -> Result<Response, HttpError> {
    let file = state.storage.download_file(&filename).await?;
    let disposition = format!("attachment; filename=\"{}\"", file.suggested_filename());

    Ok((
        [(CONTENT_TYPE, file.content_type), (CONTENT_DISPOSITION, disposition)],
        file.content,
    )
        .into_response())
}
