//! Server-side Mermaid rendering via [Kroki](https://kroki.io).
//!
//! [`KrokiRenderer`] plugs into [`htmlgo_renderer::Renderer`] as its
//! [`DiagramRenderer`](htmlgo_renderer::DiagramRenderer). Failures surface
//! as [`DiagramError`](htmlgo_renderer::DiagramError) and make the renderer
//! fall back to in-browser rendering.

mod consts;
mod kroki;
mod renderer;
mod svg;

pub use consts::{DEFAULT_KROKI_URL, DEFAULT_TIMEOUT};
pub use kroki::{DiagramRequest, create_agent, send_diagram_request};
pub use renderer::KrokiRenderer;
pub use svg::{clamp_svg_dimensions, strip_google_fonts_import};
