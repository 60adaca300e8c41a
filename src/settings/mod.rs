//! Schema-driven settings form.
//!
//! The backend declares each field's type, label and default; the form is
//! rendered from that schema, edited, collected back into a typed payload
//! and persisted in a single POST.

pub mod collect;
pub mod controller;
pub mod render;
pub mod schema;

pub use controller::{SettingsAction, SettingsController};
pub use schema::Schema;

/// Field name → value, in the server's key order
pub type ConfigValues = serde_json::Map<String, serde_json::Value>;
