//! Router tests — upload handling, status codes and response shapes,
//! driven through `tower::ServiceExt::oneshot` without a listening socket.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use docmeta_core::{DocMetaConfig, ToolCapabilities};
use docmeta_infer::{ModelCapabilities, PatternNer};
use docmeta_ingest::Ingester;
use docmeta_server::routes::build_router;
use docmeta_server::AppState;
use tower::ServiceExt;

const BOUNDARY: &str = "docmeta-test-boundary";

fn test_app(config: DocMetaConfig) -> Router {
    let capabilities = ModelCapabilities::none().with_ner(Arc::new(PatternNer::new()));
    let ingester = Ingester::new(&config, capabilities, None);
    let state = AppState::new(config, ingester, ToolCapabilities::default());
    build_router(Arc::new(state))
}

fn multipart_body(field: &str, filename: &str, content_type: Option<&str>, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    if let Some(ct) = content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", ct).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload(uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = test_app(DocMetaConfig::default());
    let response = app
        .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["tools"]["hasRasterizer"], false);
    assert_eq!(json["models"]["ner"], "pattern");
    assert!(json["models"]["summarizer"].is_null());
}

#[tokio::test]
async fn test_metadata_for_plain_text() {
    let app = test_app(DocMetaConfig::default());
    let text = "Harbor Expansion Feasibility Study\n\
                Prepared by Dr. Maria Santos for the Port Authority of Lisbon.\n\
                The harbor expansion would add berths for container ships.";
    let body = multipart_body("file", "harbor.txt", Some("text/plain"), text.as_bytes());

    let response = app.oneshot(upload("/api/metadata", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());

    let json = json_body(response).await;
    assert_eq!(json["title"], "Harbor Expansion Feasibility Study");
    assert_eq!(json["file_type"], "txt");
    assert_eq!(json["filename"], "harbor.txt");
    assert_eq!(json["word_count"], text.split_whitespace().count());
    assert_eq!(json["character_count"], text.chars().count());
    assert_eq!(json["language"], "unknown");
    assert!(json["summary"].as_str().unwrap().ends_with("..."));
    assert!(json["keywords"].as_array().unwrap().len() <= 10);
    assert!(json["entities"]
        .as_array()
        .unwrap()
        .contains(&serde_json::json!("Maria Santos")));
    assert!(json.get("page_count").is_none());
}

#[tokio::test]
async fn test_metadata_download() {
    let app = test_app(DocMetaConfig::default());
    let body = multipart_body("file", "note.txt", Some("text/plain"), b"Short note body");

    let response = app
        .oneshot(upload("/api/metadata?download=true", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"metadata.json\""
    );
    let json = json_body(response).await;
    assert_eq!(json["filename"], "note.txt");
}

#[tokio::test]
async fn test_octet_stream_uses_extension() {
    let app = test_app(DocMetaConfig::default());
    let body = multipart_body(
        "file",
        "readme.txt",
        Some("application/octet-stream"),
        b"Plain words here",
    );

    let response = app.oneshot(upload("/api/metadata", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["file_type"], "txt");
}

#[tokio::test]
async fn test_unsupported_type_is_415() {
    let app = test_app(DocMetaConfig::default());
    let body = multipart_body("file", "photo.png", Some("image/png"), &[0x89, 0x50, 0x4e, 0x47]);

    let response = app.oneshot(upload("/api/metadata", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let json = json_body(response).await;
    assert!(json["error"].as_str().unwrap().contains("image/png"));
}

#[tokio::test]
async fn test_corrupt_docx_is_422() {
    let app = test_app(DocMetaConfig::default());
    let body = multipart_body(
        "file",
        "report.docx",
        Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        b"not a zip archive",
    );

    let response = app.oneshot(upload("/api/metadata", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_unreadable_pdf_without_ocr_still_succeeds() {
    let app = test_app(DocMetaConfig::default());
    let body = multipart_body("file", "scan.pdf", Some("application/pdf"), b"%PDF-1.4 broken");

    let response = app.oneshot(upload("/api/metadata", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["word_count"], 0);
    assert_eq!(json["title"], "scan.pdf");
    assert_eq!(json["summary"], "Summary not available");
}

#[tokio::test]
async fn test_missing_file_field_is_400() {
    let app = test_app(DocMetaConfig::default());
    let body = multipart_body("attachment", "note.txt", Some("text/plain"), b"text");

    let response = app.oneshot(upload("/api/metadata", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_over_limit_is_rejected() {
    let config = DocMetaConfig {
        max_upload_bytes: 1024,
        ..DocMetaConfig::default()
    };
    let app = test_app(config);
    let body = multipart_body("file", "big.txt", Some("text/plain"), &vec![b'a'; 4096]);

    let response = app.oneshot(upload("/api/metadata", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_extract_preview() {
    let app = test_app(DocMetaConfig::default());
    let text = "word ".repeat(1000);
    let body = multipart_body("file", "long.txt", Some("text/plain"), text.as_bytes());

    let response = app.oneshot(upload("/api/extract", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["filename"], "long.txt");
    assert_eq!(json["fileType"], "txt");
    assert_eq!(json["method"], "plain");
    assert_eq!(json["characterCount"], 5000);
    assert_eq!(json["preview"].as_str().unwrap().chars().count(), 3000);
    assert!(json["pageCount"].is_null());
}
