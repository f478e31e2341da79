//! Record types backed by CSV files and the rules each form submission follows.

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// A set of fields that must all be present, with the message returned when any is not.
#[derive(Debug)]
pub struct RequiredRule {
    pub fields: &'static [&'static str],
    pub message: &'static str,
}

/// Everything the generic store and submission path need to know about one entity.
#[derive(Debug)]
pub struct EntitySchema {
    /// Backing file name, relative to the data directory
    pub file_name: &'static str,
    /// Column order used for the header and every appended row
    pub columns: &'static [&'static str],
    /// Checked in order; the first failing rule decides the error message
    pub required: &'static [RequiredRule],
    /// Form-only fields (submit buttons, lookups) that are never persisted
    pub ui_only: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Deal,
    Tranche,
    Asset,
    Account,
}

static DEAL: EntitySchema = EntitySchema {
    file_name: "sfs_pipeline_log.csv",
    columns: &[
        "opportunity_name",
        "sector",
        "product",
        "source",
        "stage",
        "takedown_date",
        "description",
    ],
    required: &[
        RequiredRule { fields: &["opportunity_name"], message: "Opportunity name is required" },
        RequiredRule { fields: &["sector", "product"], message: "Sector and product are required" },
    ],
    ui_only: &["submit"],
};

static TRANCHE: EntitySchema = EntitySchema {
    file_name: "tranches_log.csv",
    columns: &[
        "tranche_name",
        "facility_type",
        "tax_status",
        "use_of_proceeds",
        "original_principal",
        "current_balance",
        "rate_type",
        "origination_date",
        "maturity_date",
    ],
    required: &[RequiredRule { fields: &["tranche_name"], message: "Tranche name is required" }],
    ui_only: &["submit_tranche"],
};

static ASSET: EntitySchema = EntitySchema {
    file_name: "realestate_assets.csv",
    columns: &[
        "property_name",
        "property_address",
        "property_type",
        "square_footage",
        "market_value",
        "occupancy_rate",
        "acquisition_date",
        "asset_notes",
    ],
    required: &[RequiredRule { fields: &["property_name"], message: "Property name is required" }],
    ui_only: &["submit_asset"],
};

static ACCOUNT: EntitySchema = EntitySchema {
    file_name: "involved_accounts.csv",
    columns: &[
        "account_name",
        "account_type",
        "primary_contact",
        "contact_email",
        "contact_phone",
        "business_focus",
        "relationship_status",
        "account_notes",
    ],
    required: &[RequiredRule { fields: &["account_name"], message: "Account name is required" }],
    ui_only: &["submit_account", "account_lookup"],
};

impl Entity {
    pub const ALL: [Entity; 4] = [Entity::Deal, Entity::Tranche, Entity::Asset, Entity::Account];

    pub fn schema(self) -> &'static EntitySchema {
        match self {
            Entity::Deal => &DEAL,
            Entity::Tranche => &TRANCHE,
            Entity::Asset => &ASSET,
            Entity::Account => &ACCOUNT,
        }
    }

    /// Tag used for rows in the combined hub listing.
    pub fn kind(self) -> &'static str {
        match self {
            Entity::Deal => "deal",
            Entity::Tranche => "tranche",
            Entity::Asset => "asset",
            Entity::Account => "account",
        }
    }

    pub fn path_in(self, data_dir: &Path) -> PathBuf {
        data_dir.join(self.schema().file_name)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind())
    }
}

/// Mirrors form semantics: missing, null, `false`, `0`, `""`, `[]` and `{}` all count
/// as not provided.
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(Value::Object(fields)) => fields.is_empty(),
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
    }
}

impl EntitySchema {
    /// Returns the message of the first required rule the submission violates.
    pub fn missing_required(&self, fields: &Map<String, Value>) -> Option<&'static str> {
        self.required
            .iter()
            .find(|rule| rule.fields.iter().any(|f| is_blank(fields.get(*f))))
            .map(|rule| rule.message)
    }

    /// An all-null row in column order, returned when there is nothing to list.
    pub fn placeholder_row(&self) -> Map<String, Value> {
        self.columns
            .iter()
            .map(|c| (c.to_string(), Value::Null))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn deal_rules_are_checked_in_order() {
        let schema = Entity::Deal.schema();
        assert_eq!(
            schema.missing_required(&fields(json!({"sector": "Real Estate"}))),
            Some("Opportunity name is required")
        );
        assert_eq!(
            schema.missing_required(&fields(json!({
                "opportunity_name": "Tower", "sector": "Real Estate"
            }))),
            Some("Sector and product are required")
        );
        assert_eq!(
            schema.missing_required(&fields(json!({
                "opportunity_name": "Tower", "sector": "Real Estate", "product": "Bond"
            }))),
            None
        );
    }

    #[test]
    fn blank_values_follow_form_semantics() {
        assert!(is_blank(None));
        assert!(is_blank(Some(&json!(null))));
        assert!(is_blank(Some(&json!(""))));
        assert!(is_blank(Some(&json!(false))));
        assert!(is_blank(Some(&json!([]))));
        assert!(!is_blank(Some(&json!(" "))));
        assert!(is_blank(Some(&json!(0))));
        assert!(is_blank(Some(&json!(0.0))));
        assert!(!is_blank(Some(&json!(42))));
        assert!(!is_blank(Some(&json!("Acme"))));
    }

    #[test]
    fn placeholder_has_every_column_null() {
        for entity in Entity::ALL {
            let schema = entity.schema();
            let row = schema.placeholder_row();
            assert_eq!(row.len(), schema.columns.len());
            assert!(row.values().all(Value::is_null));
            let keys: Vec<&str> = row.keys().map(String::as_str).collect();
            assert_eq!(keys, schema.columns);
        }
    }
}
