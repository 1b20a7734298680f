//! The line renderer.
//!
//! Turns a document of prose and command lines into an HTML fragment made of
//! `<pre>`, `<code>`, `<span>` and `<br>` nodes. Rendering is a single forward
//! pass over the lines; each line only looks at the classification of its
//! immediate neighbours.

pub mod classify;
pub mod markup;

use classify::{LineKind, classify, command_payload, leading_spaces, split_lines, trim_line};
use markup::MarkupWriter;

pub const DEFAULT_MARKER: char = '$';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Paint indentation, command and prose segments with distinct backgrounds.
    pub debug_highlighting: bool,
    /// Character that introduces a command line.
    pub marker: char,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            debug_highlighting: false,
            marker: DEFAULT_MARKER,
        }
    }
}

/// Renders `input_text` with default options.
pub fn render(input_text: &str, language_tag: &str) -> String {
    render_with(input_text, language_tag, &RenderOptions::default())
}

/// Renders `input_text`, tagging every code block with `language-<tag>`.
///
/// Never fails; the empty document renders to the empty string.
pub fn render_with(input_text: &str, language_tag: &str, options: &RenderOptions) -> String {
    let lines = split_lines(input_text);
    let kinds: Vec<LineKind> = lines
        .iter()
        .map(|line| classify(line, options.marker))
        .collect();

    let mut out = MarkupWriter::new(language_tag, options.debug_highlighting);

    for (i, (line, kind)) in lines.iter().zip(&kinds).enumerate() {
        match kind {
            LineKind::Blank => out.line_break(),
            LineKind::Command => {
                out.indentation(leading_spaces(line));
                out.command(command_payload(trim_line(line), options.marker));
                out.line_break();
            }
            LineKind::Prose => {
                let continues_paragraph = i > 0 && kinds[i - 1].is_prose();
                if !continues_paragraph {
                    out.indentation(leading_spaces(line));
                }
                out.prose(trim_line(line), continues_paragraph);

                // Contiguous prose flows into one wrapped paragraph.
                let next_is_prose = kinds.get(i + 1).is_some_and(|k| k.is_prose());
                if !next_is_prose {
                    out.line_break();
                }
            }
        }
    }

    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const Z: &str = "margin: 0px; padding: 0px;";

    fn block(class: &str, text: &str) -> String {
        format!("<pre style=\"{Z}\"><code style=\"{Z}\" class=\"language-{class}\">{text}</code></pre>")
    }

    fn span(text: &str) -> String {
        format!("<span style=\"{Z}\">{text}</span>")
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render("", "rs"), "");
    }

    #[test]
    fn single_newline_is_two_blank_lines() {
        assert_eq!(render("\n", "rs"), "<br><br>");
    }

    #[test]
    fn command_line() {
        let expected = [block("rs", "  "), block("rs", "foo"), "<br>".to_string()].concat();
        assert_eq!(render("  $ foo", "rs"), expected);
    }

    #[test]
    fn bare_marker_has_empty_payload() {
        let expected = [block("rs", ""), block("rs", ""), "<br>".to_string()].concat();
        assert_eq!(render("$", "rs"), expected);
    }

    #[test]
    fn contiguous_prose_reflows() {
        let expected = [
            block("rs", ""),
            span("a"),
            span(" b"),
            "<br>".to_string(),
            "<br>".to_string(),
        ]
        .concat();
        assert_eq!(render("a\nb\n", "rs"), expected);
    }

    #[test]
    fn continuation_drops_indentation() {
        let expected = [block("py", "    "), span("first"), span(" second"), "<br>".to_string()].concat();
        assert_eq!(render("    first\n        second", "py"), expected);
    }

    #[test]
    fn prose_after_command_is_indented() {
        let expected = [
            block("rs", ""),
            block("rs", "run"),
            "<br>".to_string(),
            block("rs", "  "),
            span("explained"),
            "<br>".to_string(),
        ]
        .concat();
        assert_eq!(render("$ run\n  explained", "rs"), expected);
    }

    #[test]
    fn mixed_document() {
        let input = "$ let x = 1;\nhello world\n\n$ let y = 2;\n";
        let expected = [
            block("rs", ""),
            block("rs", "let x = 1;"),
            "<br>".to_string(),
            block("rs", ""),
            span("hello world"),
            "<br>".to_string(),
            "<br>".to_string(),
            block("rs", ""),
            block("rs", "let y = 2;"),
            "<br>".to_string(),
            "<br>".to_string(),
        ]
        .concat();
        assert_eq!(render(input, "rs"), expected);
    }

    #[test]
    fn bom_prefixed_command_renders_as_command() {
        let expected = [
            block("rs", ""),
            block("rs", "cargo build"),
            "<br>".to_string(),
            block("rs", ""),
            span("next"),
            "<br>".to_string(),
        ]
        .concat();
        assert_eq!(render("\u{FEFF}$ cargo build\nnext", "rs"), expected);
    }

    #[test]
    fn content_is_escaped() {
        let html = render("$ a < b && c\n<script>\"x\"</script>", "rs");
        assert!(html.contains(">a &lt; b &amp;&amp; c<"));
        assert!(html.contains("&lt;script&gt;&quot;x&quot;&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn unknown_language_tag_passes_through() {
        assert!(render("$ x", "klingon").contains("class=\"language-klingon\""));
    }

    #[test]
    fn custom_marker_option() {
        let options = RenderOptions {
            marker: '>',
            ..RenderOptions::default()
        };
        let html = render_with("> go\n$ not a command", "sh", &options);
        assert!(html.contains(&block("sh", "go")));
        assert!(html.contains(&span("$ not a command")));
    }

    #[test]
    fn debug_highlighting_option() {
        let options = RenderOptions {
            debug_highlighting: true,
            ..RenderOptions::default()
        };
        assert!(render_with("text", "rs", &options).contains("lightblue"));
        assert!(!render("text", "rs").contains("background-color"));
    }
}
