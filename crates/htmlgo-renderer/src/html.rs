//! HTML dialect: full documents pass through, fragments get a shell.

use crate::dialect::is_html_document;
use crate::options::RenderOptions;
use crate::shell::Shell;
use crate::templates::{FRAGMENT_CSS, HIGHLIGHT_INIT_JS};
use crate::{Dialect, RenderError};

/// Render HTML content.
///
/// Content that already is a full document (DOCTYPE or `<html` root) is
/// returned byte for byte. Fragments are placed, unescaped, inside a themed
/// container with the client-side highlighter loaded.
pub fn render_html(content: &str, options: &RenderOptions) -> Result<String, RenderError> {
    if is_html_document(content) {
        tracing::debug!(len = content.len(), "html document passed through");
        return Ok(content.to_owned());
    }

    let body = format!("<div class=\"container\">\n{content}\n</div>");
    Shell::new(&options.viewer)
        .stylesheet(&options.viewer.stylesheet)
        .stylesheet(&options.assets.highlight_css)
        .style(FRAGMENT_CSS)
        .body_script_src(&options.assets.highlight_js)
        .body_script(HIGHLIGHT_INIT_JS)
        .finish(&body)
        .map_err(RenderError::assembly(Dialect::Html))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_full_document_unchanged() {
        let options = RenderOptions::default();
        let docs = [
            "<!DOCTYPE html><html><body>x</body></html>",
            "<html lang=\"en\"><body>y</body></html>",
            "\n  <!doctype html>\n<p>z</p>\n",
        ];
        for doc in docs {
            assert_eq!(render_html(doc, &options).unwrap(), doc);
        }
    }

    #[test]
    fn test_fragment_wrapped_unescaped() {
        let options = RenderOptions::default();
        let html = render_html("<h2>Hi & bye</h2>", &options).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div class=\"container\">\n<h2>Hi & bye</h2>\n</div>"));
        assert!(html.contains("href=\"/css/styles.css\""));
        assert!(html.contains("highlight.min.js"));
        assert!(html.contains("hljs.highlightElement"));
        assert!(html.contains("prefers-color-scheme: dark"));
    }

    #[test]
    fn test_empty_fragment() {
        let html = render_html("", &RenderOptions::default()).unwrap();
        assert!(html.contains("<div class=\"container\">\n\n</div>"));
        assert!(html.contains("</html>"));
    }
}
