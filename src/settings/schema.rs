//! Server-declared field schema.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Declared type of a settings field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldType {
    String,
    #[default]
    Text,
    Int,
    Float,
    Bool,
    List,
    /// Tag we do not know; rendered as a plain text field
    Unknown(String),
}

impl FieldType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::List => "list",
            Self::Unknown(tag) => tag.as_str(),
        }
    }
}

impl From<&str> for FieldType {
    fn from(tag: &str) -> Self {
        match tag {
            "string" => Self::String,
            "text" => Self::Text,
            "int" => Self::Int,
            "float" => Self::Float,
            "bool" => Self::Bool,
            "list" => Self::List,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(FieldType::from(raw.as_str()))
    }
}

/// One field's schema entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl FieldSchema {
    #[cfg(test)]
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[cfg(test)]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Label text: the description, or the key when there is none
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(key)
    }
}

/// Field schemas keyed by name, kept in the order the server sent them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    entries: Vec<(String, FieldSchema)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry; replacing keeps the original position
    pub fn insert(&mut self, key: impl Into<String>, field: FieldSchema) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = field,
            None => self.entries.push((key, field)),
        }
    }

    #[cfg(test)]
    pub fn with(mut self, key: impl Into<String>, field: FieldSchema) -> Self {
        self.insert(key, field);
        self
    }

    pub fn get(&self, key: &str) -> Option<&FieldSchema> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSchema)> {
        self.entries.iter().map(|(k, f)| (k.as_str(), f))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, field) in &self.entries {
            map.serialize_entry(key, field)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SchemaVisitor;

        impl<'de> Visitor<'de> for SchemaVisitor {
            type Value = Schema;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of field name to schema entry")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Schema, M::Error> {
                let mut schema = Schema::new();
                while let Some((key, field)) = access.next_entry::<String, FieldSchema>()? {
                    schema.insert(key, field);
                }
                Ok(schema)
            }
        }

        deserializer.deserialize_map(SchemaVisitor)
    }
}

/// `String(value)` as the page would print it
pub fn display_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// JavaScript-style truthiness, used for toggle state
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_type_tags() {
        for tag in ["string", "text", "int", "float", "bool", "list"] {
            assert_eq!(FieldType::from(tag).as_str(), tag);
        }
        assert_eq!(FieldType::from("color"), FieldType::Unknown("color".into()));
    }

    #[test]
    fn test_schema_preserves_server_order() {
        let schema: Schema = serde_json::from_str(
            r#"{"zeta":{"type":"int"},"alpha":{"type":"bool"},"mid":{}}"#,
        )
        .unwrap();
        assert_eq!(schema.keys().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(schema.get("mid").unwrap().field_type, FieldType::Text);
    }

    #[test]
    fn test_schema_serializes_as_map() {
        let schema = Schema::new()
            .with("port", FieldSchema::new(FieldType::Int).with_default(json!(8080)));
        let value = serde_json::to_value(&schema).unwrap();
        assert_eq!(value, json!({"port": {"type": "int", "default": 8080}}));
    }

    #[test]
    fn test_label_falls_back_to_key() {
        let field = FieldSchema::new(FieldType::Bool);
        assert_eq!(field.label("debug"), "debug");
        let field = field.with_description("Debug mode");
        assert_eq!(field.label("debug"), "Debug mode");
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(&Value::Null), "");
        assert_eq!(display_text(&json!("hi")), "hi");
        assert_eq!(display_text(&json!(1.5)), "1.5");
        assert_eq!(display_text(&json!(["a", 1])), "a,1");
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("false")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!(true)));
    }
}
