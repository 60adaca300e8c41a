//! Browser-side primitives shared by the settings form and persona board.
//!
//! Markup is produced as strings; the input elements a render emits are
//! tracked in a [`Document`] so edits and collection never need a real DOM.

pub mod confirm;
pub mod document;
pub mod html;
pub mod notify;

pub use confirm::{AssumeYes, Confirm, Prompt};
pub use document::{Document, Element, FileInput, SelectedFile};
pub use notify::{Notifier, Toast};
