//! Page title extraction.

use std::sync::LazyLock;

use htmlgo_renderer::Dialect;
use regex::Regex;

/// Title used when none can be extracted.
pub const DEFAULT_TITLE: &str = "Untitled";

const MAX_TITLE_CHARS: usize = 255;

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").unwrap());

static H1_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h1[^>]*>([^<]+)</h1>").unwrap());

/// Extract a display title from stored content.
///
/// Only HTML content is inspected: the first `<title>` text, else the first
/// `<h1>` text. Everything else gets [`DEFAULT_TITLE`]. Titles longer than
/// 255 characters are cut to 252 plus `...`.
#[must_use]
pub fn extract_title(content: &str, dialect: Dialect) -> String {
    let found = match dialect {
        Dialect::Html => [&*TITLE_RE, &*H1_RE].into_iter().find_map(|re| {
            let text = re.captures(content)?.get(1)?.as_str().trim();
            (!text.is_empty()).then_some(text)
        }),
        Dialect::Markdown | Dialect::Svg | Dialect::Mermaid => None,
    };
    truncate(found.unwrap_or(DEFAULT_TITLE))
}

fn truncate(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_owned();
    }
    let mut short: String = title.chars().take(MAX_TITLE_CHARS - 3).collect();
    short.push_str("...");
    short
}
