//! Editor text metrics
//!
//! Word and character counts over rich-text content. The editor computes these
//! and writes `word_count` back through `DocumentStore::update`; the store
//! itself never looks inside `content`.

use serde::{Deserialize, Serialize};

/// Average reading speed, words per minute
pub const WORDS_PER_MINUTE: u64 = 200;

/// Words per printed page
pub const WORDS_PER_PAGE: u64 = 250;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMetrics {
    pub words: u64,
    pub characters: u64,
    pub reading_minutes: u64,
    pub pages: u64,
}

impl TextMetrics {
    pub fn of(content: &str) -> Self {
        let text = strip_tags(content);
        let words = word_count(content);
        Self {
            words,
            characters: text.chars().count() as u64,
            reading_minutes: words.div_ceil(WORDS_PER_MINUTE),
            pages: words.div_ceil(WORDS_PER_PAGE),
        }
    }
}

/// Elements that start a new line of text when rendered.
const BLOCK_TAGS: [&str; 23] = [
    "p", "div", "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6", "li", "ul", "ol", "blockquote",
    "pre", "tr", "td", "th", "table", "section", "article", "header", "footer",
];

/// Remove every `<...>` tag. A `<` with no `>` after it is kept as text.
pub fn strip_tags(content: &str) -> String {
    replace_tags(content, false)
}

/// Words in rich-text content, as whitespace-separated runs of the visible
/// text. Inline tags join what surrounds them (`un<em>believ</em>able` is one
/// word); block tags such as `<p>` and `<br>` separate words.
pub fn word_count(content: &str) -> u64 {
    replace_tags(content, true).split_whitespace().count() as u64
}

fn replace_tags(content: &str, space_blocks: bool) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(open) = rest.find('<') {
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        out.push_str(&rest[..open]);
        let tag = &rest[open + 1..open + close];
        if space_blocks && is_block_tag(tag) {
            out.push(' ');
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);
    out
}

fn is_block_tag(tag: &str) -> bool {
    let name: String = tag
        .trim_start_matches('/')
        .chars()
        .take_while(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    BLOCK_TAGS.contains(&name.as_str())
}

/// Escape text for inclusion in rich-text content.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
