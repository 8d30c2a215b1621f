//! Server-side diagram rendering seam.
//!
//! Mermaid sources are first offered to a [`DiagramRenderer`]. Whatever it
//! returns is folded into a [`DiagramOutcome`]: either a finished SVG, or the
//! source deferred to the in-browser engine.

/// Canvas and theme for a single server-side render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramSettings {
    pub width: u32,
    pub height: u32,
    pub theme: String,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            theme: "default".to_owned(),
        }
    }
}

/// Server-side diagram rendering failure.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct DiagramError {
    pub kind: DiagramErrorKind,
}

/// Kind of server-side diagram rendering failure.
#[derive(Debug, thiserror::Error)]
pub enum DiagramErrorKind {
    /// Transport failure or HTTP status >= 400 (message carries the body).
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("I/O error: {0}")]
    Io(String),
    /// Output did not contain an `<svg` element.
    #[error("renderer returned no SVG element")]
    InvalidSvg,
    /// No server-side renderer is configured.
    #[error("server-side diagram rendering disabled")]
    Disabled,
}

impl From<DiagramErrorKind> for DiagramError {
    fn from(kind: DiagramErrorKind) -> Self {
        Self { kind }
    }
}

/// Renders diagram source to SVG outside the browser.
///
/// Implementations must bound their own latency (e.g. an HTTP timeout);
/// the caller blocks on [`render_svg`](Self::render_svg).
pub trait DiagramRenderer: Send + Sync {
    fn render_svg(&self, source: &str, settings: &DiagramSettings) -> Result<String, DiagramError>;
}

/// Renderer used when no server-side backend is configured. Always fails
/// with [`DiagramErrorKind::Disabled`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientOnly;

impl DiagramRenderer for ClientOnly {
    fn render_svg(
        &self,
        _source: &str,
        _settings: &DiagramSettings,
    ) -> Result<String, DiagramError> {
        Err(DiagramErrorKind::Disabled.into())
    }
}

/// Result of a server-side render attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagramOutcome {
    /// Static SVG markup, ready to embed.
    Rendered(String),
    /// Raw diagram source, left for the browser.
    Deferred(String),
}

impl DiagramOutcome {
    /// Try `renderer`, deferring to the client on any failure.
    ///
    /// Failures other than [`DiagramErrorKind::Disabled`] are logged at `warn`.
    pub fn attempt(
        renderer: &dyn DiagramRenderer,
        source: &str,
        settings: &DiagramSettings,
    ) -> Self {
        let result = renderer.render_svg(source, settings).and_then(|svg| {
            if svg.contains("<svg") {
                Ok(svg)
            } else {
                Err(DiagramErrorKind::InvalidSvg.into())
            }
        });

        match result {
            Ok(svg) => Self::Rendered(svg),
            Err(DiagramError {
                kind: DiagramErrorKind::Disabled,
            }) => {
                tracing::debug!("server-side diagram rendering disabled, deferring to client");
                Self::Deferred(source.to_owned())
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    len = source.len(),
                    "server-side diagram render failed, deferring to client"
                );
                Self::Deferred(source.to_owned())
            }
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}
