//! Convert generated plain text into editor content.

use crate::text::escape_html;

/// Footer appended to generated documents
pub const GENERATED_FOOTER: &str = "<p><em>This content was generated with AI assistance. Feel free to edit, expand, or completely rewrite as needed.</em></p>";

/// Split on blank lines; `#`, `##`, `###` paragraphs become headings, the rest
/// become `<p>` blocks. Empty paragraphs are dropped.
pub fn render_generated(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|paragraph| !paragraph.is_empty())
        .map(render_paragraph)
        .collect()
}

fn render_paragraph(paragraph: &str) -> String {
    if let Some(rest) = paragraph.strip_prefix("### ") {
        format!("<h3>{}</h3>", escape_html(rest))
    } else if let Some(rest) = paragraph.strip_prefix("## ") {
        format!("<h2>{}</h2>", escape_html(rest))
    } else if let Some(rest) = paragraph.strip_prefix("# ") {
        format!("<h1>{}</h1>", escape_html(rest))
    } else {
        format!("<p>{}</p>", escape_html(paragraph))
    }
}

/// Full content for a freshly generated document: title heading, body, footer.
pub fn generated_document(name: &str, text: &str) -> String {
    format!(
        "<h1>{}</h1>{}{}",
        escape_html(name),
        render_generated(text),
        GENERATED_FOOTER
    )
}
