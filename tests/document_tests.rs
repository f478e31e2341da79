use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose, Engine as _};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sfs_widgets::{create_document_app, DocumentState};
use std::fs;
use tempfile::TempDir;
use tower::ServiceExt;

/// Lays out `dummy_pdf/{a,b,b/archive}` plus the two descriptor files.
fn fixture() -> (TempDir, Router) {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("dummy_pdf");
    fs::create_dir_all(root.join("a")).unwrap();
    fs::create_dir_all(root.join("b/archive")).unwrap();
    fs::write(root.join("a/x.pdf"), b"%PDF-1.4 a").unwrap();
    fs::write(root.join("b/x.pdf"), b"%PDF-1.4 b").unwrap();
    fs::write(root.join("b/y.PDF"), b"%PDF-1.4 y").unwrap();
    fs::write(root.join("b/readme.txt"), b"not a pdf").unwrap();
    fs::write(root.join("b/archive/term_sheet.pdf"), b"%PDF-1.4 term sheet").unwrap();
    let widgets = r#"{"documents": {"name": "Deal Documents"}}"#;
    fs::write(dir.path().join("widgets.json"), widgets).unwrap();

    let state =
        DocumentState::new(root, dir.path().join("widgets.json"), dir.path().join("apps.json"));
    (dir, create_document_app(state))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_deals_are_fixed() {
    let (_dir, app) = fixture();
    let (status, json) = get(&app, "/deals").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 3);
    assert_eq!(json[0], json!({"label": "Project Alpha (Tech M&A)", "value": "deal_alpha"}));
}

#[tokio::test]
async fn test_folders_ignore_deal_id() {
    let (_dir, app) = fixture();
    let expected = json!([{"label": "a", "value": "a"}, {"label": "b", "value": "b"}]);

    let (_, json) = get(&app, "/folders").await;
    assert_eq!(json, expected);
    let (_, json) = get(&app, "/folders?deal_id=deal_gamma").await;
    assert_eq!(json, expected);
}

#[tokio::test]
async fn test_files_list_dedupes_and_sorts() {
    let (_dir, app) = fixture();
    let expected = json!([
        {"label": "x.pdf", "value": "x.pdf"},
        {"label": "y.PDF", "value": "y.PDF"}
    ]);

    let (status, json) =
        get(&app, "/files_list?deal_id=deal_alpha&folder_ids=a&folder_ids=b").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, expected);

    let (_, json) = get(&app, "/files_list?folder_ids=a,b").await;
    assert_eq!(json, expected);

    let (_, json) = get(&app, "/files_list?deal_id=deal_alpha").await;
    assert_eq!(json, json!([]));

    let (_, json) = get(&app, "/files_list?folder_ids=missing").await;
    assert_eq!(json, json!([]));
}

#[tokio::test]
async fn test_document_fetch_finds_nested_file() {
    let (_dir, app) = fixture();

    let (status, json) = get(&app, "/documents?filename=term_sheet.pdf").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data_format"], json!({"data_type": "pdf", "filename": "term_sheet.pdf"}));
    let decoded = general_purpose::STANDARD.decode(json["content"].as_str().unwrap()).unwrap();
    assert_eq!(decoded, b"%PDF-1.4 term sheet");
}

#[tokio::test]
async fn test_document_fetch_missing_is_404() {
    let (_dir, app) = fixture();

    let (status, json) = get(&app, "/documents?filename=nope.pdf").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "File not found: nope.pdf");

    let (status, _) = get(&app, "/documents?filename=..%2Fwidgets.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&app, "/documents").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_descriptor_files_are_read_from_disk() {
    let (dir, app) = fixture();

    let (status, json) = get(&app, "/widgets.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["documents"]["name"], "Deal Documents");

    let (status, json) = get(&app, "/apps.json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].is_string());

    fs::write(dir.path().join("apps.json"), "[]").unwrap();
    let (status, json) = get(&app, "/apps.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!([]));
}
