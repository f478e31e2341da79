use sfs_widgets::{config::Config, create_document_app, DocumentState};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    if !config.documents_dir.is_dir() {
        tracing::warn!(
            "Document root {} does not exist; folder and file lists will be empty",
            config.documents_dir.display()
        );
    }

    let app = create_document_app(DocumentState::from_config(&config));
    let listener = tokio::net::TcpListener::bind(&config.documents_bind_addr).await?;
    tracing::info!("Document server running on http://{}", config.documents_bind_addr);
    axum::serve(listener, app).await?;
    Ok(())
}
