//! Widget descriptors served at `/widgets.json` by the form backend.

use serde_json::{json, Value};

use crate::registry::{RegistryBuilder, WidgetRegistry};

fn option(label: &str, value: &str) -> Value {
    json!({"label": label, "value": value})
}

fn text(param: &str, label: &str) -> Value {
    json!({"paramName": param, "type": "text", "value": "", "label": label})
}

fn date(param: &str, label: &str) -> Value {
    json!({"paramName": param, "type": "date", "value": "", "label": label})
}

fn choice(param: &str, label: &str, default: &str, options: Vec<Value>) -> Value {
    json!({"paramName": param, "type": "text", "value": default, "label": label, "options": options})
}

fn submit_button(param: &str, label: &str) -> Value {
    json!({"paramName": param, "type": "button", "label": label, "value": true})
}

fn form(param: &str, label: Option<&str>, endpoint: &str, inputs: Vec<Value>) -> Value {
    let mut form = json!({
        "paramName": param,
        "type": "form",
        "endpoint": endpoint,
        "inputParams": inputs,
    });
    if let Some(label) = label {
        form["label"] = json!(label);
    }
    form
}

fn sector_options() -> Vec<Value> {
    vec![
        option("🏢 Real Estate", "Real Estate"),
        option("🏛️ Public Finance", "Public Finance"),
    ]
}

fn product_options() -> Vec<Value> {
    vec![
        option("💰 Term Loan", "Term Loan"),
        option("💵 Tax-Exempt Term Loan", "Tax-Exempt Term Loan"),
        option("📊 Bond", "Bond"),
        option("📈 Revenue Bond", "Revenue Bond"),
    ]
}

fn source_options() -> Vec<Value> {
    vec![
        option("🤝 Broker", "Broker"),
        option("👔 Sponsor", "Sponsor"),
        option("🔄 SFS Internal Referral", "SFS Internal Referral"),
        option("👨‍💼 Agent", "Agent"),
    ]
}

fn stage_options() -> Vec<Value> {
    [
        ("DI1", "Initial Contact"),
        ("DI2", "Qualification"),
        ("DI3", "Proposal"),
        ("DI4", "Negotiation"),
        ("DI5", "Due Diligence"),
        ("DI6", "Documentation"),
        ("DI7", "Approval"),
        ("DI8", "Closing"),
        ("DI9", "Complete"),
    ]
    .iter()
    .map(|(code, name)| option(&format!("{} - {}", code, name), code))
    .collect()
}

fn facility_options() -> Vec<Value> {
    ["Senior Debt", "Mezzanine", "Equipment Lease", "Working Capital", "Bond Issue"]
        .iter()
        .map(|v| option(v, v))
        .collect()
}

fn tax_status_options() -> Vec<Value> {
    ["Tax-Exempt", "Taxable", "AMT"].iter().map(|v| option(v, v)).collect()
}

fn property_type_options() -> Vec<Value> {
    vec![
        option("🏢 Office", "Office"),
        option("🏬 Retail", "Retail"),
        option("🏭 Industrial", "Industrial"),
        option("🏘️ Multifamily", "Multifamily"),
        option("🏨 Hospitality", "Hospitality"),
    ]
}

/// Deal entry form inputs; `defaults` preselects the first option of each dropdown (hub variant).
fn deal_inputs(defaults: bool) -> Vec<Value> {
    let pick = |value: &'static str| if defaults { value } else { "" };
    vec![
        text("opportunity_name", "Opportunity Name"),
        choice("sector", "Sector", pick("Real Estate"), sector_options()),
        choice("product", "Product Type", pick("Term Loan"), product_options()),
        choice("source", "Lead Source", pick("Broker"), source_options()),
        choice("stage", "Deal Stage", pick("DI1"), stage_options()),
        date("takedown_date", "Expected Takedown Date"),
        text("description", "📋 Deal Notes"),
        submit_button("submit", "✅ Submit Deal"),
    ]
}

pub fn deal_entry() -> Value {
    json!({
        "name": "Salesforce Deal Entry",
        "description": "Submit new deals and view the SFS pipeline.",
        "type": "table",
        "endpoint": "salesforce/deals",
        "gridData": {"w": 20, "h": 10},
        "params": [form("deal_form", None, "salesforce/deals", deal_inputs(false))],
    })
}

pub fn tranche_participation() -> Value {
    let inputs = vec![
        text("tranche_name", "Tranche Name/Series"),
        choice("facility_type", "Facility Type", "", facility_options()),
        choice("tax_status", "Tax Status", "", tax_status_options()),
        text("use_of_proceeds", "Use of Proceeds"),
        text("original_principal", "💵 Original Principal Amount"),
        text("current_balance", "Current Outstanding Balance"),
        choice(
            "rate_type",
            "Rate Type",
            "",
            ["Fixed", "Floating", "Capped Floater"].iter().map(|v| option(v, v)).collect(),
        ),
        date("origination_date", "Origination Date"),
        date("maturity_date", "Maturity Date"),
        submit_button("submit_tranche", "✅ Submit Tranche"),
    ];
    json!({
        "name": "💰 Tranche Participation",
        "description": "Comprehensive tranche tracking for HRE and Public Finance deals.",
        "type": "table",
        "endpoint": "salesforce/tranches",
        "gridData": {"w": 20, "h": 12},
        "params": [form("tranche_form", None, "salesforce/tranches", inputs)],
    })
}

pub fn real_estate_assets() -> Value {
    let inputs = vec![
        text("property_name", "🏢 Property Name"),
        text("property_address", "📍 Address"),
        choice("property_type", "Property Type", "", property_type_options()),
        text("square_footage", "Square Footage"),
        text("market_value", "💵 Market Value"),
        text("occupancy_rate", "📊 Occupancy Rate"),
        date("acquisition_date", "Acquisition Date"),
        text("asset_notes", "📋 Asset Notes"),
        submit_button("submit_asset", "✅ Submit Asset"),
    ];
    json!({
        "name": "🏢 Real Estate Assets",
        "description": "Track real estate asset portfolio.",
        "type": "table",
        "endpoint": "salesforce/realestate",
        "gridData": {"w": 20, "h": 10},
        "params": [form("realestate_form", None, "salesforce/realestate", inputs)],
    })
}

pub fn involved_accounts() -> Value {
    let inputs = vec![
        json!({
            "paramName": "account_lookup",
            "type": "endpoint",
            "value": "",
            "label": "🔍 Search Existing Account",
            "description": "Start typing to search existing accounts (or leave blank to add new)",
            "optionsEndpoint": "/salesforce/accounts/list"
        }),
        json!({
            "paramName": "account_name",
            "type": "text",
            "value": "",
            "label": "Account / Company Name",
            "description": "Required for new accounts"
        }),
        choice(
            "account_type",
            "Account Type",
            "",
            vec![
                option("🏢 Sponsor / Developer", "Sponsor"),
                option("🤝 Broker", "Broker"),
                option("👨‍💼 Agent", "Agent"),
                option("🏦 Lender Partner", "Lender"),
                option("⚖️ Legal Counsel", "Legal"),
                option("🏛️ Municipality", "Municipality"),
            ],
        ),
        text("primary_contact", "Primary Contact Name"),
        text("contact_email", "📧 Contact Email"),
        text("contact_phone", "📞 Contact Phone"),
        json!({
            "paramName": "business_focus",
            "type": "text",
            "value": "",
            "label": "Primary Business Focus",
            "description": "e.g., Multifamily development, Healthcare bonds"
        }),
        choice(
            "relationship_status",
            "Relationship Status",
            "",
            vec![
                option("🟢 Active", "Active"),
                option("🟡 Prospective", "Prospective"),
                option("🔵 Preferred Partner", "Preferred"),
                option("⚪ Inactive", "Inactive"),
            ],
        ),
        text("account_notes", "📋 Notes"),
        submit_button("submit_account", "✅ Submit Account"),
    ];
    json!({
        "name": "🤝 Involved Accounts",
        "description": "Dynamic account lookup: Search existing sponsors/brokers or add new ones.",
        "type": "table",
        "endpoint": "salesforce/accounts",
        "gridData": {"w": 25, "h": 12},
        "params": [form("account_form", None, "salesforce/accounts", inputs)],
    })
}

pub fn account_lookup() -> Value {
    json!({
        "name": "Account Lookup",
        "description": "Search and view all involved accounts with dynamic filtering",
        "type": "table",
        "endpoint": "salesforce/accounts/lookup",
        "gridData": {"w": 30, "h": 14},
        "params": [
            {
                "paramName": "search_term",
                "type": "text",
                "value": "",
                "label": "Search Accounts",
                "description": "Search by company name, contact name, or business focus"
            },
            {
                "paramName": "account_type_filter",
                "type": "text",
                "value": "",
                "label": "Filter by Type",
                "description": "Filter by account type",
                "options": [
                    option("All Types", ""),
                    option("Sponsor", "Sponsor"),
                    option("Broker", "Broker"),
                    option("Agent", "Agent"),
                    option("Lender", "Lender"),
                    option("Legal", "Legal"),
                    option("Municipality", "Municipality")
                ]
            },
            {
                "paramName": "relationship_filter",
                "type": "text",
                "value": "",
                "label": "Filter by Relationship",
                "options": [
                    option("All Statuses", ""),
                    option("Active", "Active"),
                    option("Prospective", "Prospective"),
                    option("Preferred", "Preferred"),
                    option("Inactive", "Inactive")
                ]
            }
        ],
    })
}

pub fn salesforce_hub() -> Value {
    let tranche_inputs = vec![
        text("tranche_name", "Tranche Name/Series"),
        choice("facility_type", "Facility Type", "Senior Debt", facility_options()),
        choice("tax_status", "Tax Status", "Tax-Exempt", tax_status_options()),
        text("use_of_proceeds", "Use of Proceeds"),
        text("original_principal", "💵 Original Principal"),
        date("origination_date", "Origination Date"),
        date("maturity_date", "Maturity Date"),
        submit_button("submit_tranche", "✅ Submit Tranche"),
    ];
    let asset_inputs = vec![
        text("property_name", "🏢 Property Name"),
        text("property_address", "📍 Address"),
        choice("property_type", "Property Type", "Office", property_type_options()),
        text("square_footage", "Square Footage"),
        text("market_value", "💵 Market Value"),
        date("acquisition_date", "Acquisition Date"),
        submit_button("submit_asset", "✅ Submit Asset"),
    ];
    json!({
        "name": "📊 Salesforce Hub",
        "description": "All-in-one: Deal Entry, Tranche Participation, and Real Estate tracking with clickable form buttons.",
        "type": "table",
        "endpoint": "salesforce/hub",
        "gridData": {"w": 40, "h": 14},
        "params": [
            form("deal_form", Some("Enter Deal"), "salesforce/deals", deal_inputs(true)),
            form("tranche_form", Some("Enter Tranche"), "salesforce/tranches", tranche_inputs),
            form("realestate_form", Some("Enter Asset"), "salesforce/realestate", asset_inputs),
        ],
    })
}

/// Build the registry the form backend serves, in dashboard order.
pub fn default_registry() -> WidgetRegistry {
    RegistryBuilder::new()
        .register(deal_entry())
        .register(tranche_participation())
        .register(real_estate_assets())
        .register(involved_accounts())
        .register(account_lookup())
        .register(salesforce_hub())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_widget_is_registered_under_its_endpoint() {
        let registry = default_registry();
        for id in [
            "salesforce/deals",
            "salesforce/tranches",
            "salesforce/realestate",
            "salesforce/accounts",
            "salesforce/accounts/lookup",
            "salesforce/hub",
        ] {
            let widget = registry.get(id).unwrap_or_else(|| panic!("missing widget {}", id));
            assert_eq!(widget["widgetId"], id);
        }
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn hub_forms_post_to_entity_endpoints_with_defaults() {
        let hub = salesforce_hub();
        let endpoints: Vec<&str> = hub["params"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["endpoint"].as_str().unwrap())
            .collect();
        assert_eq!(
            endpoints,
            vec!["salesforce/deals", "salesforce/tranches", "salesforce/realestate"]
        );
        assert_eq!(hub["params"][0]["inputParams"][1]["value"], "Real Estate");
        assert_eq!(hub["params"][0]["label"], "Enter Deal");
    }

    #[test]
    fn stage_labels_carry_codes() {
        let stages = stage_options();
        assert_eq!(stages.len(), 9);
        assert_eq!(stages[2]["label"], "DI3 - Proposal");
        assert_eq!(stages[2]["value"], "DI3");
    }
}
