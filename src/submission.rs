//! Turns a raw form body into the cells of one CSV row.

use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::entities::{is_blank, Entity};
use crate::error::AppError;

/// Column name to rendered cell text, ready for [`crate::store::CsvStore::append`].
pub type Record = HashMap<String, String>;

/// Validate a submission and reduce it to the entity's persisted columns.
///
/// Runs in this order: lookup promotion (accounts only), required-field rules,
/// removal of form-only fields, whitelisting against the schema, cell rendering.
/// Date pickers send plain strings, so date fields take the same text rendering as any other cell.
pub fn prepare(entity: Entity, mut fields: Map<String, Value>) -> Result<Record, AppError> {
    let schema = entity.schema();

    if entity == Entity::Account {
        promote_account_lookup(&mut fields);
    }

    if let Some(message) = schema.missing_required(&fields) {
        return Err(AppError::MissingField(message.to_string()));
    }

    for field in schema.ui_only {
        fields.remove(*field);
    }

    let mut record = Record::with_capacity(schema.columns.len());
    for (name, value) in fields {
        if !schema.columns.contains(&name.as_str()) {
            tracing::debug!("Dropping unknown {} field {}", entity, name);
            continue;
        }
        let cell = render_cell(&value);
        record.insert(name, cell);
    }

    Ok(record)
}

/// A picked `account_lookup` stands in for the name when no name was typed.
fn promote_account_lookup(fields: &mut Map<String, Value>) {
    if !is_blank(fields.get("account_lookup")) && is_blank(fields.get("account_name")) {
        if let Some(lookup) = fields.get("account_lookup").cloned() {
            fields.insert("account_name".to_string(), lookup);
        }
    }
}

pub fn render_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
