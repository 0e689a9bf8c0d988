use axum::{
    extract::{FromRequest, Request},
    http::header::{CONTENT_LENGTH, CONTENT_TYPE},
};
use bytes::Bytes;

use crate::{DocDropState, HttpError};

/// Name of the form field carrying the uploaded document
pub const FILE_FIELD: &str = "file";

/// The single file part of a `multipart/form-data` upload.
///
/// The whole request body is bounded by the configured maximum before any
/// parsing happens; an oversized body is rejected with 413.
#[derive(Debug)]
pub struct SingleFile {
    /// Client-supplied file name, exactly as sent
    pub filename: String,
    pub data: Bytes,
}

impl FromRequest<DocDropState> for SingleFile {
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &DocDropState) -> Result<Self, Self::Rejection> {
        let limit = state.max_request_bytes;

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        // Anything that is not multipart simply has no file part.
        let boundary = multer::parse_boundary(content_type).map_err(|_| HttpError::bad_request("No file part"))?;

        let declared = req
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<usize>().ok());
        if declared.is_some_and(|len| len > limit) {
            return Err(too_large(limit));
        }

        let body = axum::body::to_bytes(req.into_body(), limit)
            .await
            .map_err(|e| {
                if is_length_limit(&e) {
                    too_large(limit)
                } else {
                    HttpError::bad_request(format!("Failed to read request body: {e}"))
                }
            })?;

        let mut multipart = multer::Multipart::new(
            futures::stream::once(async move { Ok::<Bytes, multer::Error>(body) }),
            boundary,
        );

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            if field.name() != Some(FILE_FIELD) {
                continue;
            }
            // A part without a filename parameter is a form value, not a file.
            let Some(filename) = field.file_name().map(str::to_string) else {
                continue;
            };
            let data = field.bytes().await.map_err(malformed)?;
            return Ok(SingleFile { filename, data });
        }

        Err(HttpError::bad_request("No file part"))
    }
}

fn malformed(e: multer::Error) -> HttpError {
    HttpError::bad_request(format!("Failed to parse multipart data: {e}"))
}

fn too_large(limit: usize) -> HttpError {
    HttpError::payload_too_large(format!("Request body exceeds maximum of {limit} bytes"))
}

fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<http_body_util::LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}
