//! The persona record as the backend stores it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the `/api/personas` array.
///
/// Fields the console does not know about are carried through `extra` so a
/// whole-list POST never drops data written by another tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonaRecord {
    #[serde(default)]
    pub persona_id: String,

    /// Image URL or path; blank means "use the placeholder avatar"
    #[serde(default)]
    pub png_path: String,

    #[serde(default)]
    pub polished_prompt: String,

    /// Local time of the last edit, `YYYY/M/D HH:MM:SS`
    #[serde(default)]
    pub polish_time: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PersonaRecord {
    #[cfg(test)]
    pub fn new(persona_id: impl Into<String>) -> Self {
        Self {
            persona_id: persona_id.into(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_image(mut self, png_path: impl Into<String>) -> Self {
        self.png_path = png_path.into();
        self
    }

    #[cfg(test)]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.polished_prompt = prompt.into();
        self
    }

    pub fn has_image(&self) -> bool {
        !self.png_path.trim().is_empty()
    }
}
