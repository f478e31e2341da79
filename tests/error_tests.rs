use axum::{
    http::StatusCode,
    response::IntoResponse,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sfs_widgets::error::AppError;

async fn error_body(error: AppError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

// Test for AppError Display implementation
#[test]
fn test_app_error_display() {
    let error = AppError::MissingField("Tranche name is required".to_string());
    assert_eq!(error.to_string(), "Tranche name is required");

    let error = AppError::NotFound("File not found: memo.pdf".to_string());
    assert_eq!(error.to_string(), "File not found: memo.pdf");

    let error = AppError::ConfigLoad("No such file or directory (os error 2)".to_string());
    assert_eq!(
        error.to_string(),
        "Failed to load configuration: No such file or directory (os error 2)"
    );

    let error = AppError::Storage("disk full".to_string());
    assert_eq!(error.to_string(), "Storage error: disk full");
}

// Test for AppError IntoResponse implementation
#[tokio::test]
async fn test_app_error_into_response() {
    let error = AppError::MissingField("Account name is required".to_string());
    let (status, body) = error_body(error).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Account name is required");

    let error = AppError::NotFound("File not found: memo.pdf".to_string());
    let (status, body) = error_body(error).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "File not found: memo.pdf");

    let error = AppError::ConfigLoad("expected value at line 1 column 1".to_string());
    let (status, body) = error_body(error).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to load configuration: expected value at line 1 column 1");

    let (status, _) = error_body(AppError::Storage("disk full".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_error_conversions() {
    let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    assert!(matches!(AppError::from(io), AppError::Storage(_)));

    let csv_err = csv::Error::from(std::io::Error::new(std::io::ErrorKind::Other, "short write"));
    assert!(matches!(AppError::from(csv_err), AppError::Storage(_)));
}
