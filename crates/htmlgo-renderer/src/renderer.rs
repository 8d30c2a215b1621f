//! Dialect dispatch.

use std::sync::Arc;

use crate::diagram::{ClientOnly, DiagramRenderer};
use crate::options::RenderOptions;
use crate::{Dialect, RenderError, html, markdown, mermaid, svg};

/// Renders stored content into standalone HTML documents.
///
/// Holds immutable options and a shared server-side diagram renderer, so a
/// single instance can serve many threads. Without
/// [`with_diagram_renderer`](Self::with_diagram_renderer) every diagram is
/// rendered in the browser.
///
/// ```
/// use htmlgo_renderer::{Dialect, RenderOptions, Renderer};
///
/// let renderer = Renderer::new(RenderOptions::default());
/// let html = renderer.render("# Hello", None).unwrap();
/// assert!(html.contains("<h1 id=\"hello\">Hello</h1>"));
/// ```
#[derive(Clone)]
pub struct Renderer {
    options: RenderOptions,
    diagrams: Arc<dyn DiagramRenderer>,
}

impl Renderer {
    #[must_use]
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            diagrams: Arc::new(ClientOnly),
        }
    }

    /// Use `renderer` for server-side diagram rendering.
    #[must_use]
    pub fn with_diagram_renderer(mut self, renderer: impl DiagramRenderer + 'static) -> Self {
        self.diagrams = Arc::new(renderer);
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render `content` as `dialect`, or as Markdown when no dialect is given.
    pub fn render(&self, content: &str, dialect: Option<Dialect>) -> Result<String, RenderError> {
        let dialect = dialect.unwrap_or(Dialect::Markdown);
        tracing::debug!(%dialect, len = content.len(), "rendering");
        match dialect {
            Dialect::Html => self.render_html(content),
            Dialect::Markdown => self.render_markdown(content),
            Dialect::Svg => self.render_svg(content),
            Dialect::Mermaid => self.render_mermaid(content),
        }
    }

    /// Render with a stored dialect name; unknown names fall back to Markdown.
    pub fn render_named(&self, content: &str, name: &str) -> Result<String, RenderError> {
        let dialect = Dialect::parse(name);
        if dialect.is_none() {
            tracing::debug!(name, "unknown dialect name, rendering as markdown");
        }
        self.render(content, dialect)
    }

    pub fn render_html(&self, content: &str) -> Result<String, RenderError> {
        html::render_html(content, &self.options)
    }

    pub fn render_markdown(&self, content: &str) -> Result<String, RenderError> {
        markdown::render_markdown(content, &self.options, self.diagrams.as_ref())
    }

    pub fn render_svg(&self, content: &str) -> Result<String, RenderError> {
        svg::render_svg(content, &self.options)
    }

    pub fn render_mermaid(&self, content: &str) -> Result<String, RenderError> {
        mermaid::render_mermaid(content, &self.options, self.diagrams.as_ref())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_renderer_is_send_sync() {
        assert_send_sync::<Renderer>();
    }

    #[test]
    fn test_missing_dialect_is_markdown() {
        let renderer = Renderer::default();
        let html = renderer.render("**bold**", None).unwrap();
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_named() {
        let renderer = Renderer::default();
        assert!(
            renderer
                .render_named("<svg></svg>", "SVG")
                .unwrap()
                .contains("id=\"svg-container\"")
        );
        assert!(renderer.render_named("*x*", "plaintext").unwrap().contains("<em>x</em>"));
        assert!(renderer.render_named("*x*", "md").unwrap().contains("<em>x</em>"));
    }

    #[test]
    fn test_every_dialect_is_a_document() {
        let renderer = Renderer::default();
        let cases = [
            ("<p>fragment</p>", Dialect::Html),
            ("# md", Dialect::Markdown),
            ("<svg></svg>", Dialect::Svg),
            ("graph TD\nA-->B", Dialect::Mermaid),
        ];
        for (content, dialect) in cases {
            let html = renderer.render(content, Some(dialect)).unwrap();
            let open = html.find("<html").unwrap();
            let close = html.rfind("</html>").unwrap();
            assert!(open < close, "{dialect}");
        }
    }
}
