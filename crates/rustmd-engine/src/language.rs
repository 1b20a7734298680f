use std::path::Path;

/// Tag used when a file name carries no usable language.
pub const UNKNOWN_LANGUAGE: &str = "none";

/// Derives the highlighter language tag from a document's file name.
///
/// Annotated documents use the language extension with a two character
/// suffix appended (`notes.rsmd`, `intro.pymd`); the suffix is dropped.
pub fn language_tag_for_path(path: &Path) -> String {
    let Some(extension) = path.extension().map(|e| e.to_string_lossy()) else {
        return UNKNOWN_LANGUAGE.to_string();
    };

    let chars: Vec<char> = extension.chars().collect();
    if chars.len() <= 2 {
        return UNKNOWN_LANGUAGE.to_string();
    }
    chars[..chars.len() - 2].iter().collect()
}
