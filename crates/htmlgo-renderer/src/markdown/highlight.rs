//! Highlighter class selection for ordinary code blocks.
//!
//! Highlighting happens in the browser. Blocks tagged with a recognized
//! grammar get `hljs language-<name>`; anything else gets bare `hljs` so the
//! client auto-detects.

use std::fmt::{self, Write};

use crate::state::escape_html;

/// Recognized grammars: canonical highlight.js name, then aliases.
const GRAMMARS: &[(&str, &[&str])] = &[
    ("bash", &["sh", "shell", "zsh", "console"]),
    ("c", &["h"]),
    ("cpp", &["c++", "cc", "hpp", "cxx"]),
    ("csharp", &["cs", "c#"]),
    ("css", &[]),
    ("diff", &["patch"]),
    ("dockerfile", &["docker"]),
    ("go", &["golang"]),
    ("graphql", &["gql"]),
    ("ini", &["toml"]),
    ("java", &["jsp"]),
    ("javascript", &["js", "jsx", "mjs", "cjs"]),
    ("json", &["jsonc"]),
    ("kotlin", &["kt", "kts"]),
    ("lua", &[]),
    ("makefile", &["make", "mk"]),
    ("markdown", &["md", "mkdown", "mkd"]),
    ("objectivec", &["objc", "mm"]),
    ("perl", &["pl", "pm"]),
    ("php", &[]),
    ("plaintext", &["text", "txt"]),
    ("powershell", &["ps", "ps1"]),
    ("python", &["py", "gyp"]),
    ("r", &[]),
    ("ruby", &["rb", "gemspec"]),
    ("rust", &["rs"]),
    ("scala", &[]),
    ("scss", &[]),
    ("sql", &[]),
    ("swift", &[]),
    ("typescript", &["ts", "tsx", "mts", "cts"]),
    ("xml", &["html", "xhtml", "svg", "rss", "atom", "plist"]),
    ("yaml", &["yml"]),
];

/// Canonical grammar name for a fence language, ignoring ASCII case.
#[must_use]
pub fn grammar_for(language: &str) -> Option<&'static str> {
    let language = language.trim();
    if language.is_empty() {
        return None;
    }
    GRAMMARS
        .iter()
        .find(|(name, aliases)| {
            name.eq_ignore_ascii_case(language)
                || aliases.iter().any(|a| a.eq_ignore_ascii_case(language))
        })
        .map(|(name, _)| *name)
}

/// Write an escaped `<pre><code>` block carrying highlighter classes.
pub fn write_code_block(out: &mut String, language: &str, body: &str) -> fmt::Result {
    match grammar_for(language) {
        Some(grammar) => write!(
            out,
            r#"<pre><code class="hljs language-{grammar}">{}</code></pre>"#,
            escape_html(body)
        ),
        None => write!(out, r#"<pre><code class="hljs">{}</code></pre>"#, escape_html(body)),
    }
}
