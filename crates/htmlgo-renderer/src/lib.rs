//! Content classification and standalone HTML rendering for HTML-GO.
//!
//! A stored page is one of four [`Dialect`]s. [`classify`] decides which
//! when the dialect is not declared, and [`Renderer`] turns the content into
//! a complete HTML document:
//!
//! - **HTML**: full documents pass through untouched, fragments get a shell.
//! - **Markdown**: GFM conversion with diagram, SVG and highlighted code
//!   blocks, plus a client-side diagram bundle.
//! - **SVG**: a centered viewer with PNG export.
//! - **Mermaid**: server-side SVG through a [`DiagramRenderer`], falling back
//!   to in-browser rendering.
//!
//! # Quick Start
//!
//! ```
//! use htmlgo_renderer::{Renderer, RenderOptions, classify};
//!
//! let content = "sequenceDiagram\n  Alice->>Bob: Hello";
//! let dialect = classify(content, None);
//! let html = Renderer::new(RenderOptions::default())
//!     .render(content, Some(dialect))
//!     .unwrap();
//! assert!(html.contains("class=\"mermaid\""));
//! ```

mod detect;
mod diagram;
mod dialect;
mod error;
mod html;
pub mod markdown;
mod mermaid;
mod options;
mod renderer;
mod shell;
mod state;
mod svg;
mod templates;

pub use detect::{
    DIAGRAM_GRAMMARS, DiagramGrammar, diagram_kind, has_fence_marker, is_standalone_diagram,
    looks_like_mermaid, strip_fence_lines,
};
pub use diagram::{
    ClientOnly, DiagramError, DiagramErrorKind, DiagramOutcome, DiagramRenderer, DiagramSettings,
};
pub use dialect::{Dialect, UnknownDialect, classify, is_html_document};
pub use error::RenderError;
pub use options::{AssetUrls, DiagramOptions, MarkdownOptions, RenderOptions, ViewerOptions};
pub use renderer::Renderer;
pub use state::{escape_html, slugify};
