//! The input elements a rendered view contains.
//!
//! A render returns markup plus a [`Document`] describing every editable
//! element by id. Operators edit the document the way a user edits the page,
//! and collectors read typed values back out of it.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

/// A file chosen in a file picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk as if the user had picked it
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| Error::IoRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self { name, bytes })
    }

    /// Lower-cased extension without the dot
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty())
    }
}

/// `<input type="file">` state: its accept list and current selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileInput {
    accept: Vec<String>,
    selected: Vec<SelectedFile>,
}

impl FileInput {
    pub fn accepting(extensions: &[&str]) -> Self {
        Self {
            accept: extensions.iter().map(|e| e.to_string()).collect(),
            selected: Vec::new(),
        }
    }

    pub fn accepts(&self, file: &SelectedFile) -> bool {
        if self.accept.is_empty() {
            return true;
        }
        match file.extension() {
            Some(ext) => self.accept.iter().any(|a| a.trim_start_matches('.') == ext),
            None => false,
        }
    }

    /// Replace the selection
    pub fn select(&mut self, files: Vec<SelectedFile>) {
        self.selected = files;
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.selected.first()
    }

    /// Reset the input so the same file can be chosen again
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn accept_attr(&self) -> String {
        self.accept.join(",")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    /// Text-like input or textarea holding its raw string value
    Text(String),
    Checkbox(bool),
    File(FileInput),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: BTreeMap<String, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: impl Into<String>, element: Element) {
        self.elements.insert(id.into(), element);
    }

    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Raw value of a text element
    pub fn value(&self, id: &str) -> Option<&str> {
        match self.elements.get(id) {
            Some(Element::Text(v)) => Some(v),
            _ => None,
        }
    }

    pub fn checked(&self, id: &str) -> Option<bool> {
        match self.elements.get(id) {
            Some(Element::Checkbox(c)) => Some(*c),
            _ => None,
        }
    }

    /// Type into a text element. Returns false if there is no such text element.
    pub fn set_value(&mut self, id: &str, value: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Text(v)) => {
                *v = value.into();
                true
            }
            _ => false,
        }
    }

    /// Flip a checkbox. Returns false if there is no such checkbox.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.elements.get_mut(id) {
            Some(Element::Checkbox(c)) => {
                *c = checked;
                true
            }
            _ => false,
        }
    }

    pub fn file_input_mut(&mut self, id: &str) -> Option<&mut FileInput> {
        match self.elements.get_mut(id) {
            Some(Element::File(f)) => Some(f),
            _ => None,
        }
    }
}
