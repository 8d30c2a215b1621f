//! Content dialects and classification.

use std::fmt;
use std::str::FromStr;

use crate::detect::is_standalone_diagram;

/// Markup dialect of a stored content blob.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Dialect {
    Html,
    Markdown,
    Svg,
    Mermaid,
}

impl Dialect {
    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "markdown",
            Self::Svg => "svg",
            Self::Mermaid => "mermaid",
        }
    }

    /// Parse a dialect name, ignoring ASCII case. Accepts `md` for Markdown.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            ("html", Self::Html),
            ("markdown", Self::Markdown),
            ("md", Self::Markdown),
            ("svg", Self::Svg),
            ("mermaid", Self::Mermaid),
        ]
        .into_iter()
        .find(|(n, _)| name.eq_ignore_ascii_case(n))
        .map(|(_, d)| d)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized dialect name.
#[derive(Debug, thiserror::Error)]
#[error("unknown dialect: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownDialect(s.to_owned()))
    }
}

/// Classification rule: the first matching predicate decides the dialect.
struct Rule {
    dialect: Dialect,
    matches: fn(&str) -> bool,
}

/// Ordered classification rules. Content matching none is Markdown.
const RULES: &[Rule] = &[
    Rule {
        dialect: Dialect::Html,
        matches: is_html_document,
    },
    Rule {
        dialect: Dialect::Mermaid,
        matches: is_standalone_diagram,
    },
    Rule {
        dialect: Dialect::Svg,
        matches: is_svg_document,
    },
];

/// Determine the dialect of `content`.
///
/// A present `hint` is authoritative. Otherwise [`RULES`] are tried in
/// order, defaulting to [`Dialect::Markdown`].
///
/// ```
/// use htmlgo_renderer::{Dialect, classify};
///
/// assert_eq!(classify("<!DOCTYPE html><html></html>", None), Dialect::Html);
/// assert_eq!(classify("graph TD\nA-->B", None), Dialect::Mermaid);
/// assert_eq!(classify("<svg></svg>", None), Dialect::Svg);
/// assert_eq!(classify("# Hello", None), Dialect::Markdown);
/// assert_eq!(classify("# Hello", Some(Dialect::Svg)), Dialect::Svg);
/// ```
#[must_use]
pub fn classify(content: &str, hint: Option<Dialect>) -> Dialect {
    if let Some(dialect) = hint {
        return dialect;
    }
    let dialect = RULES
        .iter()
        .find(|rule| (rule.matches)(content))
        .map_or(Dialect::Markdown, |rule| rule.dialect);
    tracing::debug!(%dialect, len = content.len(), "classified content");
    dialect
}

/// Whether trimmed `content` opens with a DOCTYPE html declaration or an
/// `<html` root tag, ignoring ASCII case.
#[must_use]
pub fn is_html_document(content: &str) -> bool {
    let trimmed = content.trim_start();
    starts_with_ignore_case(trimmed, "<!doctype html") || starts_with_html_tag(trimmed)
}

fn starts_with_html_tag(s: &str) -> bool {
    starts_with_ignore_case(s, "<html")
        && s.as_bytes()
            .get(5)
            .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>')
}

/// Whether trimmed `content` has an `<svg` root element, optionally
/// preceded by an XML prolog, comments and a doctype.
fn is_svg_document(content: &str) -> bool {
    let mut rest = content.trim_start();
    loop {
        if starts_with_ignore_case(rest, "<svg") {
            return rest
                .as_bytes()
                .get(4)
                .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/');
        }
        let skipped = if rest.starts_with("<?") {
            skip_past(rest, "?>")
        } else if rest.starts_with("<!--") {
            skip_past(rest, "-->")
        } else if starts_with_ignore_case(rest, "<!doctype") {
            skip_past(rest, ">")
        } else {
            None
        };
        match skipped {
            Some(next) => rest = next.trim_start(),
            None => return false,
        }
    }
}

fn skip_past<'a>(s: &'a str, terminator: &str) -> Option<&'a str> {
    s.find(terminator).map(|pos| &s[pos + terminator.len()..])
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_is_authoritative() {
        assert_eq!(classify("<!DOCTYPE html>", Some(Dialect::Markdown)), Dialect::Markdown);
        assert_eq!(classify("# Title", Some(Dialect::Mermaid)), Dialect::Mermaid);
    }

    #[test]
    fn test_html_detection() {
        assert_eq!(classify("<!DOCTYPE html>\n<html></html>", None), Dialect::Html);
        assert_eq!(classify("  <!doctype HTML><p>x</p>", None), Dialect::Html);
        assert_eq!(classify("<HTML lang=\"en\"></HTML>", None), Dialect::Html);
        assert_eq!(classify("<html>", None), Dialect::Html);
    }

    #[test]
    fn test_html_fragment_is_markdown() {
        assert_eq!(classify("<div>fragment</div>", None), Dialect::Markdown);
        assert_eq!(classify("<htmlish>", None), Dialect::Markdown);
    }

    #[test]
    fn test_mermaid_detection() {
        assert_eq!(classify("graph TD\nA-->B", None), Dialect::Mermaid);
        assert_eq!(classify("```mermaid\nsequenceDiagram\nA->>B: hi\n```", None), Dialect::Mermaid);
        assert_eq!(classify("%% comment\npie\n\"a\": 1", None), Dialect::Mermaid);
    }

    #[test]
    fn test_markdown_mentioning_diagram_is_markdown() {
        let content = "# Notes\n\n```mermaid\ngraph TD\nA-->B\n```\n";
        assert_eq!(classify(content, None), Dialect::Markdown);
    }

    #[test]
    fn test_svg_detection() {
        assert_eq!(
            classify("<svg xmlns=\"http://www.w3.org/2000/svg\"></svg>", None),
            Dialect::Svg
        );
        assert_eq!(
            classify("<?xml version=\"1.0\"?>\n<!-- made by hand -->\n<svg></svg>", None),
            Dialect::Svg
        );
        assert_eq!(
            classify(
                "<?xml version=\"1.0\"?><!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"x\"><svg/>",
                None
            ),
            Dialect::Svg
        );
    }

    #[test]
    fn test_svg_lookalikes() {
        assert_eq!(classify("<svgfoo></svgfoo>", None), Dialect::Markdown);
        assert_eq!(classify("<?xml version=\"1.0\"?><rss/>", None), Dialect::Markdown);
        assert_eq!(classify("<!-- unterminated", None), Dialect::Markdown);
    }

    #[test]
    fn test_default_markdown() {
        assert_eq!(classify("", None), Dialect::Markdown);
        assert_eq!(classify("   \n\t", None), Dialect::Markdown);
        assert_eq!(classify("plain words", None), Dialect::Markdown);
    }

    #[test]
    fn test_whitespace_normalization_is_stable() {
        let samples = [
            "<!DOCTYPE html><html></html>",
            "graph TD\nA-->B\nB-->C",
            "<svg>\n<rect/>\n</svg>",
            "# Title\n\nbody\n",
        ];
        for sample in samples {
            let expected = classify(sample, None);
            let padded = format!("\n  {sample}  \n\n");
            let crlf = sample.replace('\n', "\r\n");
            assert_eq!(classify(&padded, None), expected, "padded {sample:?}");
            assert_eq!(classify(&crlf, None), expected, "crlf {sample:?}");
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Dialect::parse("HTML"), Some(Dialect::Html));
        assert_eq!(Dialect::parse("md"), Some(Dialect::Markdown));
        assert_eq!(Dialect::parse("Markdown"), Some(Dialect::Markdown));
        assert_eq!(Dialect::parse(" svg "), Some(Dialect::Svg));
        assert_eq!(Dialect::parse("mermaid"), Some(Dialect::Mermaid));
        assert_eq!(Dialect::parse("plantuml"), None);
        assert!("text".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for d in [Dialect::Html, Dialect::Markdown, Dialect::Svg, Dialect::Mermaid] {
            assert_eq!(d.to_string().parse::<Dialect>().ok(), Some(d));
        }
    }
}
