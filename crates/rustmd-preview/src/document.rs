use std::path::PathBuf;

/// Rendered in place of document text when the host has no active editor.
pub const NO_ACTIVE_EDITOR: &str = "No active editor";

/// The document currently focused in the host editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDocument {
    pub file_name: PathBuf,
    pub text: String,
}

impl ActiveDocument {
    pub fn new(file_name: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}
