/// Classification of a single document line.
///
/// Derived from the trimmed content of the line only; the renderer looks at
/// neighbouring classifications to decide on indentation and breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Nothing but whitespace.
    Blank,
    /// Trimmed content starts with the command marker.
    Command,
    /// Any other non-blank line.
    Prose,
}

impl LineKind {
    pub fn is_prose(self) -> bool {
        matches!(self, LineKind::Prose)
    }
}

/// Byte order mark some editors write at the start of UTF-8 files.
const BOM: char = '\u{FEFF}';

/// Trims whitespace and stray byte order marks from both ends of a line.
pub fn trim_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == BOM)
}

/// Classifies a raw (untrimmed) line.
pub fn classify(line: &str, marker: char) -> LineKind {
    let trimmed = trim_line(line);
    if trimmed.is_empty() {
        LineKind::Blank
    } else if trimmed.starts_with(marker) {
        LineKind::Command
    } else {
        LineKind::Prose
    }
}

/// Number of leading U+0020 spaces. Tabs and other whitespace stop the count.
pub fn leading_spaces(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ').count()
}

/// Extracts the payload of a trimmed command line.
///
/// The marker is always removed, together with one following space when
/// present. A marker glued to its payload (`$foo`) keeps the rest verbatim.
pub fn command_payload(trimmed: &str, marker: char) -> &str {
    let rest = trimmed.strip_prefix(marker).unwrap_or(trimmed);
    rest.strip_prefix(' ').unwrap_or(rest)
}

/// Splits a document into lines, dropping a leading byte order mark and the
/// `\r` left over from CRLF endings.
///
/// An empty document has no lines. Otherwise a terminal line end yields a
/// final empty line, which the renderer keeps.
pub fn split_lines(text: &str) -> Vec<&str> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.is_empty() {
        return Vec::new();
    }
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
