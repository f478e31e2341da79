//! Widget registry.
//!
//! Descriptors are collected once at startup through [`RegistryBuilder`] and frozen into a
//! [`WidgetRegistry`], which request handlers only ever read.

use serde_json::{Map, Value};

/// Collects widget descriptors before the server starts.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    widgets: Map<String, Value>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor under its `widgetId`, defaulting the id to the descriptor's
    /// `endpoint`. Descriptors without an endpoint are not routable and are skipped.
    pub fn register(mut self, descriptor: Value) -> Self {
        let Value::Object(mut widget) = descriptor else {
            tracing::warn!("Ignoring widget descriptor that is not a JSON object");
            return self;
        };

        let endpoint = widget.get("endpoint").and_then(Value::as_str).map(str::to_owned);
        let Some(endpoint) = endpoint else {
            tracing::warn!("Ignoring widget descriptor without an endpoint");
            return self;
        };

        let explicit_id = widget.get("widgetId").and_then(Value::as_str).map(str::to_owned);
        let widget_id = match explicit_id {
            Some(id) => id,
            None => {
                widget.insert("widgetId".to_string(), Value::String(endpoint.clone()));
                endpoint
            }
        };

        tracing::debug!("Registered widget {}", widget_id);
        self.widgets.insert(widget_id, Value::Object(widget));
        self
    }

    pub fn build(self) -> WidgetRegistry {
        WidgetRegistry { widgets: self.widgets }
    }
}

/// Immutable mapping of widget id to descriptor, in registration order.
#[derive(Debug, Clone, Default)]
pub struct WidgetRegistry {
    widgets: Map<String, Value>,
}

impl WidgetRegistry {
    pub fn get(&self, widget_id: &str) -> Option<&Value> {
        self.widgets.get(widget_id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// The whole registry as the JSON object served at `/widgets.json`.
    pub fn list(&self) -> Value {
        Value::Object(self.widgets.clone())
    }
}
