//! Kroki HTTP client.
//!
//! Diagrams are sent as `POST {server}/{language}/svg` with the source as a
//! `text/plain` body. Diagram options travel as `Kroki-Diagram-Options-*`
//! headers.

use std::time::Duration;

use htmlgo_renderer::{DiagramError, DiagramErrorKind};
use ureq::Agent;

/// A single diagram to render.
#[derive(Clone, Debug)]
pub struct DiagramRequest<'a> {
    /// Kroki endpoint name (e.g., `mermaid`).
    pub language: &'a str,
    pub source: &'a str,
    /// Theme sent as `Kroki-Diagram-Options-Theme`; omitted when empty.
    pub theme: &'a str,
}

/// Create an HTTP agent whose every request is bounded by `timeout`.
///
/// Non-2xx statuses are returned as responses so the error body can be read.
pub fn create_agent(timeout: Duration) -> Agent {
    Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into()
}

/// Send a diagram to Kroki and return the response body.
///
/// HTTP statuses >= 400 become [`DiagramErrorKind::Http`] carrying the
/// response body.
pub fn send_diagram_request(
    agent: &Agent,
    request: &DiagramRequest<'_>,
    server_url: &str,
    format: &str,
) -> Result<String, DiagramError> {
    let url = format!(
        "{}/{}/{format}",
        server_url.trim_end_matches('/'),
        request.language
    );

    let mut call = agent.post(&url).header("Content-Type", "text/plain");
    if !request.theme.is_empty() {
        call = call.header("Kroki-Diagram-Options-Theme", request.theme);
    }
    let response = call
        .send(request.source.as_bytes())
        .map_err(|e| DiagramErrorKind::Http(e.to_string()))?;

    let status = response.status().as_u16();
    let mut body = response.into_body();

    if status >= 400 {
        let error_body = body
            .read_to_string()
            .unwrap_or_else(|_| String::from("(unable to read error body)"));
        return Err(DiagramErrorKind::Http(format!("HTTP {status}: {}", error_body.trim())).into());
    }

    body.read_to_string()
        .map_err(|e| DiagramErrorKind::Io(e.to_string()).into())
}
