pub mod accounts;
pub mod documents;
pub mod manifest;
pub mod salesforce;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppError;

/// Acknowledgement returned by every form submission.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmitResponse {
    pub success: bool,
}

/// A dropdown entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OptionItem {
    /// Text shown to the user
    pub label: String,
    /// Value sent back when the entry is picked
    pub value: String,
}

impl OptionItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Run filesystem work on the blocking pool inside `span`.
pub(crate) async fn run_blocking<T, F>(span: tracing::Span, work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let _enter = span.enter();
        work()
    })
    .await?
}
