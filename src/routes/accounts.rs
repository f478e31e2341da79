//! Account dropdown source and the filtered account lookup.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use utoipa::{IntoParams, ToSchema};

use super::{run_blocking, OptionItem};
use crate::entities::Entity;
use crate::error::AppError;
use crate::store::Row;
use crate::AppState;

/// Columns the free-text search looks at.
const SEARCH_COLUMNS: [&str; 4] = [
    "account_name",
    "primary_contact",
    "business_focus",
    "account_notes",
];

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AccountLookupQuery {
    /// Case-insensitive substring matched against name, contact, business focus and notes
    #[serde(default)]
    #[param(required = false)]
    pub search_term: String,
    /// Exact account type; empty matches every type
    #[serde(default)]
    #[param(required = false)]
    pub account_type_filter: String,
    /// Exact relationship status; empty matches every status
    #[serde(default)]
    #[param(required = false)]
    pub relationship_filter: String,
}

/// Compiled form of [`AccountLookupQuery`].
#[derive(Debug)]
pub struct AccountFilter {
    search: String,
    account_type: String,
    relationship: String,
}

fn cell<'a>(row: &'a Row, column: &str) -> &'a str {
    row.get(column).and_then(Value::as_str).unwrap_or("")
}

impl AccountFilter {
    pub fn new(query: &AccountLookupQuery) -> Self {
        Self {
            search: query.search_term.to_lowercase(),
            account_type: query.account_type_filter.clone(),
            relationship: query.relationship_filter.clone(),
        }
    }

    pub fn matches(&self, row: &Row) -> bool {
        if !self.account_type.is_empty() && cell(row, "account_type") != self.account_type {
            return false;
        }
        if !self.relationship.is_empty() && cell(row, "relationship_status") != self.relationship {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        SEARCH_COLUMNS
            .iter()
            .any(|column| cell(row, column).to_lowercase().contains(&self.search))
    }
}

fn lookup_placeholder(message: &str) -> Row {
    let mut row = Entity::Account.schema().placeholder_row();
    row.insert("account_name".to_string(), json!(message));
    row
}

/// Returns existing accounts for the dynamic dropdown as `Name (Type)` labels
#[utoipa::path(
    get,
    path = "/salesforce/accounts/list",
    responses(
        (status = 200, description = "Dropdown entries; empty when no accounts exist", body = Vec<OptionItem>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_account_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<OptionItem>>, AppError> {
    let store = state.store(Entity::Account);
    let span = tracing::info_span!("csv_list", entity = "account");
    let rows = run_blocking(span, move || store.read_rows()).await?;

    let options = rows
        .unwrap_or_default()
        .iter()
        .map(|row| {
            let name = cell(row, "account_name");
            OptionItem::new(format!("{} ({})", name, cell(row, "account_type")), name)
        })
        .collect();
    Ok(Json(options))
}

/// Lookup accounts with optional search term and type/relationship filters
#[utoipa::path(
    get,
    path = "/salesforce/accounts/lookup",
    params(AccountLookupQuery),
    responses(
        (status = 200, description = "Matching rows in file order, or a single placeholder row", body = Vec<serde_json::Value>)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn lookup_accounts(
    State(state): State<AppState>,
    Query(query): Query<AccountLookupQuery>,
) -> Result<Json<Vec<Row>>, AppError> {
    let store = state.store(Entity::Account);
    let span = tracing::info_span!("csv_list", entity = "account");
    let Some(rows) = run_blocking(span, move || store.read_rows()).await? else {
        return Ok(Json(vec![lookup_placeholder("No accounts yet")]));
    };

    let filter = AccountFilter::new(&query);
    let matched: Vec<Row> = rows.into_iter().filter(|row| filter.matches(row)).collect();
    tracing::debug!("Account lookup matched {} rows", matched.len());

    if matched.is_empty() {
        return Ok(Json(vec![lookup_placeholder("No matching accounts")]));
    }
    Ok(Json(matched))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, account_type: &str, status: &str, contact: &str) -> Row {
        let mut row = Row::new();
        row.insert("account_name".into(), json!(name));
        row.insert("account_type".into(), json!(account_type));
        row.insert("relationship_status".into(), json!(status));
        row.insert("primary_contact".into(), json!(contact));
        row
    }

    fn filter(search: &str, account_type: &str, relationship: &str) -> AccountFilter {
        AccountFilter::new(&AccountLookupQuery {
            search_term: search.to_string(),
            account_type_filter: account_type.to_string(),
            relationship_filter: relationship.to_string(),
        })
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = filter("", "", "");
        assert!(f.matches(&row("Acme", "Broker", "Active", "")));
        assert!(f.matches(&Row::new()));
    }

    #[test]
    fn type_and_status_are_exact() {
        let a = row("Acme", "Broker", "Active", "");
        assert!(filter("", "Broker", "").matches(&a));
        assert!(!filter("", "broker", "").matches(&a));
        assert!(!filter("", "", "Inactive").matches(&a));
    }

    #[test]
    fn search_is_case_insensitive_across_columns() {
        let a = row("Acme", "Broker", "Active", "Jane Doe");
        assert!(filter("ACM", "", "").matches(&a));
        assert!(filter("doe", "", "").matches(&a));
        assert!(!filter("beta", "", "").matches(&a));
        // account_type is not a search column
        assert!(!filter("broker", "", "").matches(&a));
    }

    #[test]
    fn placeholder_names_the_situation() {
        let row = lookup_placeholder("No matching accounts");
        assert_eq!(row["account_name"], "No matching accounts");
        assert!(row["account_type"].is_null());
        assert_eq!(row.len(), 8);
    }
}
