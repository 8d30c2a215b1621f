//! Mermaid dialect: server-side SVG first, in-browser rendering second.

use crate::detect::{diagram_kind, strip_fence_lines};
use crate::diagram::{DiagramOutcome, DiagramRenderer};
use crate::options::{DiagramOptions, RenderOptions};
use crate::shell::Shell;
use crate::state::escape_html;
use crate::templates::{CLIENT_DIAGRAM_CSS, DIAGRAM_BUNDLE_JS, STATIC_DIAGRAM_CSS};
use crate::{Dialect, RenderError};

/// Render a Mermaid diagram definition.
///
/// Fence delimiter lines are dropped before rendering. The source is
/// offered to `renderer`; on success the SVG is embedded in a static page,
/// otherwise the page loads the diagram engine and renders in the browser.
pub fn render_mermaid(
    content: &str,
    options: &RenderOptions,
    renderer: &dyn DiagramRenderer,
) -> Result<String, RenderError> {
    let source = strip_fence_lines(content);
    let source = source.trim();
    tracing::debug!(kind = diagram_kind(source).unwrap_or("unknown"), "rendering mermaid");

    let document = match DiagramOutcome::attempt(renderer, source, &options.diagrams.settings()) {
        DiagramOutcome::Rendered(svg) => static_document(&svg, options),
        DiagramOutcome::Deferred(source) => client_document(&source, options),
    };
    document.map_err(RenderError::assembly(Dialect::Mermaid))
}

fn static_document(svg: &str, options: &RenderOptions) -> Result<String, std::fmt::Error> {
    let body = format!("<div class=\"mermaid-container\">\n{svg}\n</div>");
    Shell::new(&options.viewer)
        .style(STATIC_DIAGRAM_CSS)
        .finish(&body)
}

fn client_document(source: &str, options: &RenderOptions) -> Result<String, std::fmt::Error> {
    let body = format!("<div class=\"mermaid\">{}</div>", escape_html(source));
    Shell::new(&options.viewer)
        .style(CLIENT_DIAGRAM_CSS)
        .head_script_src(&options.assets.mermaid_js)
        .head_script(bundle_config(&options.diagrams))
        .head_script(DIAGRAM_BUNDLE_JS)
        .finish(&body)
}

/// Inline script setting the client bundle's polling parameters.
pub(crate) fn bundle_config(diagrams: &DiagramOptions) -> String {
    format!(
        "window.HTMLGO_DIAGRAMS = {{ pollMs: {}, maxAttempts: {} }};",
        diagrams.poll_interval_ms, diagrams.max_attempts
    )
}
