//! Markdown dialect.
//!
//! Conversion runs through [`MarkdownRenderer`] with a
//! [`DiagramBlockProcessor`] claiming diagram and SVG blocks. Content that is
//! nothing but a bare diagram definition skips Markdown parsing entirely.

mod code_block;
mod diagrams;
mod highlight;
mod renderer;

pub use code_block::{CodeBlockProcessor, ProcessResult};
pub use diagrams::DiagramBlockProcessor;
pub use highlight::grammar_for;
pub use renderer::{MarkdownRenderer, RenderResult};

use crate::detect::{has_fence_marker, is_standalone_diagram};
use crate::diagram::DiagramRenderer;
use crate::mermaid::bundle_config;
use crate::options::RenderOptions;
use crate::shell::Shell;
use crate::templates::{DIAGRAM_BUNDLE_JS, HIGHLIGHT_INIT_JS, MARKDOWN_CSS};
use crate::{Dialect, RenderError};

/// Render Markdown content into a themed document.
///
/// `renderer` is used only when `diagrams.prerender_markdown` is set.
pub fn render_markdown(
    content: &str,
    options: &RenderOptions,
    renderer: &dyn DiagramRenderer,
) -> Result<String, RenderError> {
    let (html, title) = if !has_fence_marker(content) && is_standalone_diagram(content) {
        tracing::debug!(len = content.len(), "markdown is a bare diagram, skipping parse");
        (diagrams::diagram_placeholder(content.trim()), None)
    } else {
        let mut processor = DiagramBlockProcessor::new();
        if options.diagrams.prerender_markdown {
            processor = processor.with_prerender(renderer, options.diagrams.settings());
        }
        let result = MarkdownRenderer::new(options.markdown.clone())
            .with_processor(processor)
            .render_markdown(content)
            .map_err(RenderError::assembly(Dialect::Markdown))?;
        (result.html, result.title)
    };

    let mut shell = Shell::new(&options.viewer);
    if let Some(title) = title {
        shell = shell.title(title);
    }
    shell
        .stylesheet(&options.viewer.markdown_stylesheet)
        .stylesheet(&options.assets.highlight_css)
        .style(MARKDOWN_CSS)
        .head_script_src(&options.assets.mermaid_js)
        .head_script(bundle_config(&options.diagrams))
        .head_script(DIAGRAM_BUNDLE_JS)
        .body_script_src(&options.assets.highlight_js)
        .body_script(HIGHLIGHT_INIT_JS)
        .finish(&format!("<div class=\"markdown-body\">\n{html}\n</div>"))
        .map_err(RenderError::assembly(Dialect::Markdown))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::{ClientOnly, DiagramError, DiagramSettings};

    struct Panicking;

    impl DiagramRenderer for Panicking {
        fn render_svg(&self, _: &str, _: &DiagramSettings) -> Result<String, DiagramError> {
            panic!("server renderer must not be called");
        }
    }

    #[test]
    fn test_bare_diagram_short_circuit() {
        let html =
            render_markdown("graph TD\nA-->B", &RenderOptions::default(), &Panicking).unwrap();
        assert!(html.contains(
            "<div class=\"markdown-body\">\n<div class=\"mermaid\">graph TD\nA--&gt;B</div>\n</div>"
        ));
        assert!(html.contains("mermaid.min.js"));
        assert!(!html.contains("<p>"));
    }

    #[test]
    fn test_fence_anywhere_disables_short_circuit() {
        let content = "graph TD\nA-->B\n\n```js\nx\n```";
        let html = render_markdown(content, &RenderOptions::default(), &ClientOnly).unwrap();
        assert!(html.contains("<p>graph TD"));
        assert!(html.contains("language-javascript"));
    }

    #[test]
    fn test_title_from_first_h1() {
        let html =
            render_markdown("# Release Notes\n\ntext", &RenderOptions::default(), &ClientOnly)
                .unwrap();
        assert!(html.contains("<title>Release Notes</title>"));
        let html = render_markdown("no heading", &RenderOptions::default(), &ClientOnly).unwrap();
        assert!(html.contains("<title>HTML-GO Viewer</title>"));
    }

    #[test]
    fn test_client_placeholders_without_prerender() {
        let content = "# Doc\n\n```mermaid\ngraph TD\nA-->B\n```\n";
        let html = render_markdown(content, &RenderOptions::default(), &Panicking).unwrap();
        assert!(html.contains("<div class=\"mermaid\">graph TD\nA--&gt;B</div>"));
    }
}
