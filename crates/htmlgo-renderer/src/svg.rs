//! SVG dialect: a centered viewer with PNG export.

use crate::options::RenderOptions;
use crate::shell::Shell;
use crate::templates::{SVG_VIEWER_CSS, SVG_VIEWER_JS};
use crate::{Dialect, RenderError};

const MISSING_SVG_NOTICE: &str =
    "<p class=\"svg-error\">SVG failed to load or the content is not valid SVG.</p>";

/// Render SVG content into the viewer.
///
/// The markup is inserted unescaped. When it contains no `<svg` element a
/// visible notice is placed ahead of it.
pub fn render_svg(content: &str, options: &RenderOptions) -> Result<String, RenderError> {
    let has_root = contains_svg_element(content);
    if !has_root {
        tracing::warn!(len = content.len(), "svg content has no <svg> element");
    }

    let mut body = String::with_capacity(content.len() + 512);
    body.push_str("<div id=\"svg-container\">\n");
    if !has_root {
        body.push_str(MISSING_SVG_NOTICE);
        body.push('\n');
    }
    body.push_str(content);
    body.push_str("\n</div>\n");
    body.push_str(
        "<div id=\"context-menu\" class=\"context-menu\">\
         <div class=\"context-menu-item\" id=\"export-png\">Export as PNG</div></div>",
    );

    Shell::new(&options.viewer)
        .style(SVG_VIEWER_CSS)
        .body_script(SVG_VIEWER_JS)
        .finish(&body)
        .map_err(RenderError::assembly(Dialect::Svg))
}

/// Case-insensitive search for an `<svg` start tag.
fn contains_svg_element(content: &str) -> bool {
    content
        .as_bytes()
        .windows(5)
        .any(|w| {
            w[..4].eq_ignore_ascii_case(b"<svg")
                && (w[4].is_ascii_whitespace() || matches!(w[4], b'>' | b'/'))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_svg_embedded_raw() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10"/></svg>"#;
        let html = render_svg(svg, &RenderOptions::default()).unwrap();

        assert!(html.contains(&format!("<div id=\"svg-container\">\n{svg}\n</div>")));
        assert!(!html.contains("svg-error\">SVG failed"));
        assert!(html.contains("id=\"export-png\""));
        assert!(html.contains("svg-export-"));
    }

    #[test]
    fn test_missing_svg_notice() {
        let content = "<p>not an svg</p>";
        let html = render_svg(content, &RenderOptions::default()).unwrap();

        let notice = html.find(MISSING_SVG_NOTICE).unwrap();
        let original = html.find(content).unwrap();
        assert!(notice < original);
    }

    #[test]
    fn test_svg_after_prolog() {
        let content = "<?xml version=\"1.0\"?>\n<SVG viewBox=\"0 0 1 1\"></SVG>";
        let html = render_svg(content, &RenderOptions::default()).unwrap();
        assert!(!html.contains(MISSING_SVG_NOTICE));
        assert!(html.contains(content));
    }

    #[test]
    fn test_contains_svg_element() {
        assert!(contains_svg_element("<svg>"));
        assert!(contains_svg_element("text <svg\nwidth=\"1\"/>"));
        assert!(!contains_svg_element("<svgx>"));
        assert!(!contains_svg_element("svg"));
        assert!(!contains_svg_element("<svg"));
    }
}
