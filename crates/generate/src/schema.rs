use serde::Serialize;
use serde_json::{Map, Value, json};

/// Expected output shape for a structured generation call.
///
/// Uses the OpenAPI subset Gemini accepts for `responseSchema`: `type`,
/// `properties`, `items` and `required`. Every object property is required.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Schema(Value);

impl Schema {
    pub fn string() -> Self {
        Self(json!({ "type": "STRING" }))
    }

    pub fn integer() -> Self {
        Self(json!({ "type": "INTEGER" }))
    }

    pub fn array(items: Schema) -> Self {
        Self(json!({ "type": "ARRAY", "items": items.0 }))
    }

    /// Object with the given properties, in order. Property order is kept in
    /// `propertyOrdering` so the model emits fields in a stable order.
    pub fn object<'a>(properties: impl IntoIterator<Item = (&'a str, Schema)>) -> Self {
        let mut props = Map::new();
        let mut names = Vec::new();
        for (name, schema) in properties {
            names.push(Value::String(name.to_string()));
            props.insert(name.to_string(), schema.0);
        }

        Self(json!({
            "type": "OBJECT",
            "properties": props,
            "required": names.clone(),
            "propertyOrdering": names,
        }))
    }

    /// Attach a human-readable description to this node.
    pub fn describe(mut self, description: &str) -> Self {
        if let Value::Object(map) = &mut self.0 {
            map.insert("description".to_string(), Value::String(description.to_string()));
        }
        self
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
