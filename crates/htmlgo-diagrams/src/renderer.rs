//! [`DiagramRenderer`] backed by a Kroki server.

use std::time::Duration;

use htmlgo_renderer::{DiagramError, DiagramErrorKind, DiagramRenderer, DiagramSettings};
use ureq::Agent;

use crate::consts::{DEFAULT_KROKI_URL, DEFAULT_TIMEOUT};
use crate::kroki::{DiagramRequest, create_agent, send_diagram_request};
use crate::svg::{clamp_svg_dimensions, strip_google_fonts_import};

/// Renders Mermaid diagrams to SVG through Kroki.
///
/// Every request is bounded by the configured timeout (10 seconds by
/// default). The returned SVG has web-font imports removed and its size
/// clamped to the requested canvas.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use htmlgo_diagrams::KrokiRenderer;
/// use htmlgo_renderer::{RenderOptions, Renderer};
///
/// let kroki = KrokiRenderer::new("https://kroki.io").timeout(Duration::from_secs(5));
/// let renderer = Renderer::new(RenderOptions::default()).with_diagram_renderer(kroki);
/// let html = renderer.render_mermaid("graph TD\nA-->B").unwrap();
/// ```
#[derive(Debug)]
pub struct KrokiRenderer {
    kroki_url: String,
    timeout: Duration,
    agent: Agent,
}

impl KrokiRenderer {
    #[must_use]
    pub fn new(kroki_url: impl Into<String>) -> Self {
        Self {
            kroki_url: kroki_url.into(),
            timeout: DEFAULT_TIMEOUT,
            agent: create_agent(DEFAULT_TIMEOUT),
        }
    }

    /// Set the HTTP timeout for Kroki requests.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self.agent = create_agent(timeout);
        self
    }

    pub fn kroki_url(&self) -> &str {
        &self.kroki_url
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for KrokiRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_KROKI_URL)
    }
}

impl DiagramRenderer for KrokiRenderer {
    fn render_svg(&self, source: &str, settings: &DiagramSettings) -> Result<String, DiagramError> {
        let request = DiagramRequest {
            language: "mermaid",
            source,
            theme: &settings.theme,
        };
        let svg = send_diagram_request(&self.agent, &request, &self.kroki_url, "svg")?;
        if !svg.contains("<svg") {
            return Err(DiagramErrorKind::InvalidSvg.into());
        }
        tracing::debug!(bytes = svg.len(), "kroki rendered diagram");

        let svg = strip_google_fonts_import(svg.trim());
        Ok(clamp_svg_dimensions(&svg, settings.width, settings.height))
    }
}
