//! Edited widgets → typed payload.

use serde_json::{Number, Value};

use crate::ui::Document;

use super::schema::{FieldSchema, FieldType, Schema};
use super::ConfigValues;

/// A collected value, typed by its schema entry
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
    Bool(bool),
    List(Vec<String>),
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Text(s) => Value::String(s),
            FieldValue::Integer(n) => Value::from(n),
            FieldValue::Decimal(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::from(0)),
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
        }
    }
}

/// Collect every schema field that has an element in the document.
///
/// Fields without an element are left out of the payload.
pub fn collect(schema: &Schema, document: &Document) -> ConfigValues {
    schema
        .iter()
        .filter_map(|(key, field)| collect_field(key, field, document).map(|v| (key.to_string(), v.into())))
        .collect()
}

pub fn collect_field(key: &str, field: &FieldSchema, document: &Document) -> Option<FieldValue> {
    if field.field_type == FieldType::Bool {
        return document.checked(key).map(FieldValue::Bool);
    }

    let raw = document.value(key)?;
    Some(match field.field_type {
        FieldType::List => FieldValue::List(split_list(raw)),
        FieldType::Int => FieldValue::Integer(parse_int(raw).unwrap_or_else(|| int_default(field))),
        FieldType::Float => FieldValue::Decimal(parse_float(raw).unwrap_or_else(|| float_default(field))),
        _ => FieldValue::Text(raw.trim().to_string()),
    })
}

/// Blank → `[]`; otherwise comma-split with each segment trimmed
fn split_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split(',').map(|s| s.trim().to_string()).collect()
}

/// Integer parse; a decimal entry truncates toward zero
fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
            .map(|f| f.trunc() as i64)
    })
}

fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|f| f.is_finite())
}

fn int_default(field: &FieldSchema) -> i64 {
    field
        .default
        .as_ref()
        .and_then(|d| d.as_i64().or_else(|| d.as_f64().map(|f| f.trunc() as i64)))
        .unwrap_or(0)
}

fn float_default(field: &FieldSchema) -> f64 {
    field.default.as_ref().and_then(Value::as_f64).unwrap_or(0.0)
}
