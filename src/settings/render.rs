//! Schema → HTML widgets.

use serde_json::Value;

use crate::ui::html::escape_html;
use crate::ui::{Document, Element};

use super::schema::{display_text, is_truthy, FieldSchema, FieldType, Schema};
use super::ConfigValues;

pub const EMPTY_MARKUP: &str = r#"<div class="empty-config">No configuration</div>"#;

/// Form markup plus the input elements it contains
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedForm {
    pub html: String,
    pub document: Document,
}

/// Render one label + widget per schema entry, in schema order
pub fn render(schema: &Schema, values: &ConfigValues) -> RenderedForm {
    if schema.is_empty() {
        return RenderedForm {
            html: EMPTY_MARKUP.to_string(),
            document: Document::new(),
        };
    }

    let mut html = String::new();
    let mut document = Document::new();

    for (key, field) in schema.iter() {
        let value = shown_value(key, field, values);
        let (widget, element) = widget(key, field, &value);
        html.push_str(&format!(
            "<div class=\"form-group\">\n    <label for=\"{id}\">{label}</label>\n    {widget}\n</div>\n",
            id = escape_html(key),
            label = escape_html(field.label(key)),
            widget = widget,
        ));
        document.insert(key, element);
    }

    RenderedForm { html, document }
}

/// Current value if set, else the schema default, else nothing
fn shown_value(key: &str, field: &FieldSchema, values: &ConfigValues) -> Value {
    values
        .get(key)
        .filter(|v| !v.is_null())
        .or(field.default.as_ref())
        .cloned()
        .unwrap_or(Value::Null)
}

fn widget(key: &str, field: &FieldSchema, value: &Value) -> (String, Element) {
    let id = escape_html(key);
    match field.field_type {
        FieldType::Int | FieldType::Float => {
            let raw = display_text(value);
            let step = if field.field_type == FieldType::Float { " step=\"any\"" } else { "" };
            (
                format!(
                    r#"<input type="number" id="{}" class="form-control"{} value="{}">"#,
                    id,
                    step,
                    escape_html(&raw)
                ),
                Element::Text(raw),
            )
        }
        FieldType::Bool => {
            let checked = is_truthy(value);
            (
                format!(
                    r#"<div class="switch-group"><label class="switch"><input type="checkbox" id="{}"{}><span class="switch-slider"></span></label></div>"#,
                    id,
                    if checked { " checked" } else { "" }
                ),
                Element::Checkbox(checked),
            )
        }
        FieldType::List => {
            let raw = match value {
                Value::Array(items) => items.iter().map(display_text).collect::<Vec<_>>().join(", "),
                other => display_text(other),
            };
            (text_input(&id, &raw), Element::Text(raw))
        }
        FieldType::String | FieldType::Text | FieldType::Unknown(_) => {
            let raw = display_text(value);
            (text_input(&id, &raw), Element::Text(raw))
        }
    }
}

fn text_input(id: &str, raw: &str) -> String {
    format!(
        r#"<input type="text" id="{}" class="form-control" value="{}">"#,
        id,
        escape_html(raw)
    )
}
