use std::borrow::Cow;

/// Inline style shared by every emitted element.
const ZERO_BOX: &str = "margin: 0px; padding: 0px;";

pub const BREAK: &str = "<br>";

/// Which segment a node belongs to; only matters for debug colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Indentation,
    Command,
    Prose,
}

impl Segment {
    fn debug_background(self) -> &'static str {
        match self {
            Segment::Indentation => "lightgray",
            Segment::Command => "lightcoral",
            Segment::Prose => "lightblue",
        }
    }
}

/// Escapes line content for embedding as element text.
///
/// Quotes are escaped as well so content can never close an attribute if a
/// host moves it into one.
pub fn escape(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Accumulates the fragment for one render call.
pub struct MarkupWriter {
    out: String,
    code_class: String,
    debug_highlighting: bool,
}

impl MarkupWriter {
    pub fn new(language_tag: &str, debug_highlighting: bool) -> Self {
        Self {
            out: String::new(),
            code_class: format!("language-{}", escape(language_tag)),
            debug_highlighting,
        }
    }

    pub fn line_break(&mut self) {
        self.out.push_str(BREAK);
    }

    /// Fixed-width block reproducing `spaces` leading spaces.
    pub fn indentation(&mut self, spaces: usize) {
        let padding = " ".repeat(spaces);
        self.code_block(Segment::Indentation, &padding);
    }

    pub fn command(&mut self, payload: &str) {
        self.code_block(Segment::Command, &escape(payload));
    }

    /// Prose text; `continuation` prefixes a single space so the span joins
    /// the previous prose line's paragraph.
    pub fn prose(&mut self, text: &str, continuation: bool) {
        let style = self.style(Segment::Prose);
        let lead = if continuation { " " } else { "" };
        self.out.push_str(&format!(
            "<span style=\"{style}\">{lead}{}</span>",
            escape(text)
        ));
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn code_block(&mut self, segment: Segment, escaped_text: &str) {
        let style = self.style(segment);
        self.out.push_str(&format!(
            "<pre style=\"{style}\"><code style=\"{ZERO_BOX}\" class=\"{}\">{escaped_text}</code></pre>",
            self.code_class
        ));
    }

    fn style(&self, segment: Segment) -> String {
        if self.debug_highlighting {
            format!("{ZERO_BOX} background-color: {};", segment.debug_background())
        } else {
            ZERO_BOX.to_string()
        }
    }
}
