//! Document backend: deal/folder/file pickers and base64 document fetch.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::{run_blocking, OptionItem};
use crate::error::AppError;
use crate::DocumentState;

const DEALS: [(&str, &str); 3] = [
    ("Project Alpha (Tech M&A)", "deal_alpha"),
    ("Project Beta (Real Estate)", "deal_beta"),
    ("Project Gamma (Energy)", "deal_gamma"),
];

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FoldersQuery {
    /// Accepted for the widget's sake; every deal shares one folder tree
    #[serde(default = "default_deal_id")]
    #[param(required = false)]
    pub deal_id: String,
}

fn default_deal_id() -> String {
    "deal_alpha".to_string()
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DocumentQuery {
    /// Filename to fetch
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DataFormat {
    /// Always `pdf`
    pub data_type: String,
    pub filename: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DocumentResponse {
    pub data_format: DataFormat,
    /// File contents, base64-encoded
    pub content: String,
}

/// Folder ids may arrive repeated (`?folder_ids=a&folder_ids=b`) or comma-joined
/// (`?folder_ids=a,b`).
pub fn split_folder_ids<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Returns the list of available deals for the dropdown
#[utoipa::path(
    get,
    path = "/deals",
    responses(
        (status = 200, description = "Fixed deal list", body = Vec<OptionItem>)
    )
)]
pub async fn list_deals() -> Json<Vec<OptionItem>> {
    Json(DEALS.iter().map(|(label, value)| OptionItem::new(*label, *value)).collect())
}

/// Returns the subdirectories of the document root
#[utoipa::path(
    get,
    path = "/folders",
    params(FoldersQuery),
    responses(
        (status = 200, description = "Folder names; empty when the root is missing", body = Vec<OptionItem>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_folders(
    State(state): State<DocumentState>,
    Query(_query): Query<FoldersQuery>,
) -> Result<Json<Vec<OptionItem>>, AppError> {
    let library = state.library.clone();
    let span = tracing::info_span!("list_folders");
    let folders = run_blocking(span, move || library.folders()).await?;
    Ok(Json(folders.into_iter().map(|f| OptionItem::new(f.clone(), f)).collect()))
}

/// Returns the PDF filenames in the selected folders
#[utoipa::path(
    get,
    path = "/files_list",
    params(
        ("deal_id" = Option<String>, Query, description = "Ignored; every deal shares one folder tree"),
        ("folder_ids" = Option<Vec<String>>, Query, description = "Folder names, repeated or comma-joined")
    ),
    responses(
        (status = 200, description = "Deduplicated, sorted PDF filenames", body = Vec<OptionItem>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_files(
    State(state): State<DocumentState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<OptionItem>>, AppError> {
    let folders = split_folder_ids(
        pairs
            .iter()
            .filter(|(key, _)| key == "folder_ids")
            .map(|(_, value)| value.as_str()),
    );
    if folders.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let library = state.library.clone();
    let span = tracing::info_span!("list_files", folders = folders.len());
    let files = run_blocking(span, move || library.pdf_files(&folders)).await?;
    Ok(Json(files.into_iter().map(|f| OptionItem::new(f.clone(), f)).collect()))
}

/// Returns base64 encoded content for a single file
#[utoipa::path(
    get,
    path = "/documents",
    params(DocumentQuery),
    responses(
        (status = 200, description = "Document contents", body = DocumentResponse),
        (status = 400, description = "filename parameter missing"),
        (status = 404, description = "No file with that name anywhere in the tree")
    )
)]
#[tracing::instrument(skip(state), fields(filename = %query.filename))]
pub async fn get_document(
    State(state): State<DocumentState>,
    Query(query): Query<DocumentQuery>,
) -> Result<Json<DocumentResponse>, AppError> {
    let library = state.library.clone();
    let filename = query.filename.clone();
    let span = tracing::info_span!("fetch_document");
    let content = run_blocking(span, move || library.fetch_base64(&filename))
        .await
        .inspect_err(|e| tracing::warn!("Document fetch failed: {}", e))?;

    Ok(Json(DocumentResponse {
        data_format: DataFormat {
            data_type: "pdf".to_string(),
            filename: query.filename,
        },
        content,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_ids_split_on_commas_and_trim() {
        assert_eq!(split_folder_ids(["a", "b"]), vec!["a", "b"]);
        assert_eq!(
            split_folder_ids(["Legal, Financials", "Tax"]),
            vec!["Legal", "Financials", "Tax"]
        );
        assert_eq!(split_folder_ids(["a,", " "]), vec!["a"]);
        assert!(split_folder_ids(std::iter::empty()).is_empty());
    }
}
