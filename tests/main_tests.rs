use sfs_widgets::{create_app, widgets, AppState};
use std::time::Duration;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::Level;

#[tokio::test]
async fn test_main_server_startup() {
    // Initialize tracing for tests
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .try_init();

    let dir = TempDir::new().unwrap();
    let state =
        AppState::new(widgets::default_registry(), dir.path(), dir.path().join("apps.json"));

    // Bind an ephemeral port so parallel test runs don't collide
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server_task: JoinHandle<()> = tokio::spawn(async move {
        axum::serve(listener, create_app(state)).await.unwrap();
    });

    // Wait a moment for the server to start up
    tokio::time::sleep(Duration::from_millis(100)).await;

    let client = reqwest::Client::new();
    let result = client
        .get(format!("http://{}/widgets.json", addr))
        .header("Origin", "https://pro.openbb.co")
        .send()
        .await;

    server_task.abort();

    let response = result.expect("Failed to connect to test server");
    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://pro.openbb.co")
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body.get("salesforce/hub").is_some());
}
