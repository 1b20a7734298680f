/// External syntax highlighter.
///
/// Receives the rendered fragment and tokenizes the `<code>` blocks whose
/// `language-*` class it recognises. The renderer never colours code itself.
pub trait Highlighter {
    fn name(&self) -> &str;

    fn highlight(&self, fragment: &str) -> String;
}

/// Leaves the fragment untouched, for hosts that highlight client-side.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughHighlighter;

impl Highlighter for PassthroughHighlighter {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn highlight(&self, fragment: &str) -> String {
        fragment.to_string()
    }
}
