use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use bytes::Bytes;
use docdrop_axum::{docdrop, DocDropApp};
use docdrop_blob::{AllowList, Backend, BlobError, BlobResult, BlobStore, LocalStore, PutResult, StorageConfig, StorageRouter};
use docdrop_server::{build, Settings};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "docdrop-test-boundary";

/// Ten bytes: the PDF magic plus padding
const REPORT: &[u8] = b"%PDF-1.4\n\n";

async fn app(dir: &tempfile::TempDir) -> DocDropApp {
    let root = dir.path().join("uploads");
    let settings = Settings::from_lookup(|key| match key {
        "UPLOAD_FOLDER" => Some(root.display().to_string()),
        _ => None,
    })
    .unwrap();
    build(&settings).await.unwrap()
}

fn multipart_body(field: &str, filename: Option<&str>, data: &[u8]) -> Vec<u8> {
    let disposition = match filename {
        Some(name) => format!("form-data; name=\"{field}\"; filename=\"{name}\""),
        None => format!("form-data; name=\"{field}\""),
    };
    let mut body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: {disposition}\r\nContent-Type: application/pdf\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn upload(ax: &DocDropApp, filename: &str, data: &[u8]) -> Value {
    let res = ax
        .router
        .clone()
        .oneshot(upload_request(multipart_body("file", Some(filename), data)))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    json_body(res).await
}

#[tokio::test]
async fn health_ok() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax.router.oneshot(get("/health")).await.unwrap();

    assert_eq!(res.status().as_u16(), 200);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), "ok");
}

#[tokio::test]
async fn upload_list_download_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let body = upload(&ax, "report.pdf", REPORT).await;
    let filename = body["filename"].as_str().unwrap().to_string();
    assert_eq!(body["message"], "File uploaded successfully");
    assert_eq!(body["backend"], "local");
    assert_eq!(body["download_url"], format!("/download/{filename}"));
    assert!(filename.ends_with(".pdf"));
    assert_eq!(filename.len(), "abcde.pdf".len());

    let res = ax.router.clone().oneshot(get("/api/pdfs")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let listing = json_body(res).await;
    assert_eq!(listing["pdfs"], serde_json::json!([filename.clone()]));
    assert_eq!(listing["complete"], true);

    let res = ax
        .router
        .clone()
        .oneshot(get(&format!("/download/{filename}")))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.headers()["content-type"], "application/pdf");
    assert_eq!(
        res.headers()["content-disposition"],
        format!("attachment; filename=\"{filename}\"").as_str()
    );
    assert!(res.headers().get("x-request-id").is_some());
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], REPORT);
}

#[tokio::test]
async fn listing_is_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    for _ in 0..5 {
        upload(&ax, "a.pdf", REPORT).await;
    }

    let res = ax.router.oneshot(get("/api/pdfs")).await.unwrap();
    let listing = json_body(res).await;
    let names: Vec<String> = listing["pdfs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(!names.is_empty());
}

#[tokio::test]
async fn index_page_links_uploaded_files() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let body = upload(&ax, "report.pdf", REPORT).await;
    let filename = body["filename"].as_str().unwrap();

    let res = ax.router.oneshot(get("/")).await.unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let html = std::str::from_utf8(&bytes).unwrap();
    assert!(html.contains(&format!("href=\"/download/{filename}\"")));
}

#[tokio::test]
async fn upload_without_file_part_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax
        .router
        .oneshot(upload_request(multipart_body("document", Some("a.pdf"), REPORT)))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    let body = json_body(res).await;
    assert_eq!(body["name"], "BadRequest");
    assert_eq!(body["className"], "bad-request");
    assert_eq!(body["message"], "No file part");
}

#[tokio::test]
async fn non_multipart_upload_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax
        .router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["message"], "No file part");
}

#[tokio::test]
async fn upload_with_empty_filename_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax
        .router
        .oneshot(upload_request(multipart_body("file", Some(""), b"")))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["message"], "No file selected");
}

#[tokio::test]
async fn upload_of_other_type_is_400() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax
        .router
        .clone()
        .oneshot(upload_request(multipart_body("file", Some("notes.txt"), b"hello")))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 400);
    assert_eq!(json_body(res).await["message"], "Only PDF files are allowed");

    let res = ax.router.oneshot(get("/api/pdfs")).await.unwrap();
    assert_eq!(json_body(res).await["pdfs"], serde_json::json!([]));
}

#[tokio::test]
async fn oversized_upload_is_413() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("uploads");
    let settings = Settings::from_lookup(|key| match key {
        "UPLOAD_FOLDER" => Some(root.display().to_string()),
        "MAX_CONTENT_LENGTH" => Some("1024".to_string()),
        _ => None,
    })
    .unwrap();
    let ax = build(&settings).await.unwrap();

    let res = ax
        .router
        .oneshot(upload_request(multipart_body("file", Some("big.pdf"), &[b'x'; 4096])))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 413);
    let body = json_body(res).await;
    assert_eq!(body["name"], "PayloadTooLarge");
    assert_eq!(body["code"], 413);
}

#[tokio::test]
async fn unknown_file_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax.router.oneshot(get("/download/zzzzz.pdf")).await.unwrap();

    assert_eq!(res.status().as_u16(), 404);
    let body = json_body(res).await;
    assert_eq!(body["name"], "NotFound");
    assert_eq!(body["message"], "File not found");
}

#[tokio::test]
async fn traversal_in_download_is_404() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("outside.pdf"), REPORT).unwrap();
    let ax = app(&dir).await;

    let res = ax
        .router
        .oneshot(get("/download/..%2Foutside.pdf"))
        .await
        .unwrap();

    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn request_id_is_preserved_when_provided() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax
        .router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .header("x-request-id", "req-test-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.headers()["x-request-id"], "req-test-123");
}

#[tokio::test]
async fn unknown_route_is_json_404() {
    let dir = tempfile::tempdir().unwrap();
    let ax = app(&dir).await;

    let res = ax.router.oneshot(get("/nope")).await.unwrap();

    assert_eq!(res.status().as_u16(), 404);
    assert_eq!(json_body(res).await["className"], "not-found");
}

/// Object store that is configured but never reachable
struct UnreachableBucket;

#[async_trait::async_trait]
impl BlobStore for UnreachableBucket {
    async fn put(&self, _key: &str, _content_type: &str, _data: Bytes) -> BlobResult<PutResult> {
        Err(BlobError::backend(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "connect timeout",
        )))
    }

    async fn get(&self, _key: &str) -> BlobResult<Bytes> {
        Err(BlobError::backend(std::io::Error::new(
            std::io::ErrorKind::TimedOut,
            "connect timeout",
        )))
    }

    fn backend(&self) -> Backend {
        Backend::Remote
    }
}

#[tokio::test]
async fn unreachable_remote_falls_back_to_local() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::new().with_local_root(dir.path());
    let storage = StorageRouter::new(LocalStore::new(dir.path(), AllowList::pdf()), &config)
        .with_remote(UnreachableBucket);
    let ax = docdrop(Arc::new(storage), config.max_blob_bytes as usize);

    let body = upload(&ax, "report.pdf", REPORT).await;
    assert_eq!(body["backend"], "local");
    let filename = body["filename"].as_str().unwrap().to_string();

    let res = ax.router.clone().oneshot(get("/api/pdfs")).await.unwrap();
    let listing = json_body(res).await;
    assert_eq!(listing["complete"], false);
    assert_eq!(listing["pdfs"], serde_json::json!([filename.clone()]));

    let res = ax
        .router
        .oneshot(get(&format!("/download/{filename}")))
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], REPORT);
}
