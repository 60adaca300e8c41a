//! Persona list editor.
//!
//! The backend stores personas as one JSON array; every edit replaces the
//! whole array. At most one card is expanded at a time.

pub mod avatar;
pub mod board;
pub mod controller;
pub mod record;
pub mod render;

pub use controller::{PersonaAction, PersonaController};
pub use record::PersonaRecord;
