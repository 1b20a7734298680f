use html_escape::{encode_double_quoted_attribute, encode_text};

/// Inline styles are allowed for the renderer's zero-margin nodes; nothing
/// may run scripts.
const CONTENT_SECURITY_POLICY: &str =
    "default-src 'none'; style-src 'self' 'unsafe-inline' file:; img-src 'self' data:;";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub title: String,
    /// Stylesheet hrefs, linked in order.
    pub stylesheets: Vec<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            title: "Rust MD".to_string(),
            stylesheets: Vec::new(),
        }
    }
}

/// Wraps a rendered fragment into a standalone HTML document.
pub fn render_page(fragment: &str, options: &PageOptions) -> String {
    let links: String = options
        .stylesheets
        .iter()
        .map(|href| {
            format!(
                "<link href=\"{}\" rel=\"stylesheet\">\n",
                encode_double_quoted_attribute(href)
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"UTF-8\">\n\
         <meta http-equiv=\"Content-Security-Policy\" content=\"{CONTENT_SECURITY_POLICY}\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{}</title>\n\
         {links}\
         </head>\n\
         <body>\n\
         <div>{fragment}</div>\n\
         </body>\n\
         </html>\n",
        encode_text(&options.title)
    )
}
