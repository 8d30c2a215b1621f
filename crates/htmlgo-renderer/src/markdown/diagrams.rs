//! Mermaid and SVG code blocks inside Markdown.

use std::collections::HashMap;

use rand::RngExt;

use super::code_block::{CodeBlockProcessor, ProcessResult};
use crate::detect::looks_like_mermaid;
use crate::diagram::{DiagramOutcome, DiagramRenderer, DiagramSettings};
use crate::state::escape_html;

const PLACEHOLDER_SUFFIX: &str = "-->";

/// Client-side diagram placeholder holding the escaped source.
pub fn diagram_placeholder(source: &str) -> String {
    format!("<div class=\"mermaid\">{}</div>", escape_html(source.trim_end()))
}

/// Claims `mermaid`-tagged blocks, untagged or mistagged blocks whose body
/// is a diagram, and `svg` blocks.
///
/// Diagrams become client-side placeholders. When a server-side renderer
/// is attached they are instead emitted as markers and rendered in
/// [`post_process`](CodeBlockProcessor::post_process), each falling back to
/// a placeholder on its own.
///
/// Markers carry a random per-processor nonce (`<!--DIAGRAM_<nonce>_N-->`),
/// so raw HTML comments in the Markdown source are never mistaken for them.
pub struct DiagramBlockProcessor<'a> {
    prerender: Option<(&'a dyn DiagramRenderer, DiagramSettings)>,
    extracted: Vec<(usize, String)>,
    marker_prefix: String,
}

impl<'a> DiagramBlockProcessor<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prerender: None,
            extracted: Vec::new(),
            marker_prefix: format!("<!--DIAGRAM_{:016x}_", rand::rng().random::<u64>()),
        }
    }

    fn marker(&self, index: usize) -> String {
        format!("{}{index}{PLACEHOLDER_SUFFIX}", self.marker_prefix)
    }

    /// Render diagrams on the server with `renderer`.
    #[must_use]
    pub fn with_prerender(
        mut self,
        renderer: &'a dyn DiagramRenderer,
        settings: DiagramSettings,
    ) -> Self {
        self.prerender = Some((renderer, settings));
        self
    }
}

impl Default for DiagramBlockProcessor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBlockProcessor for DiagramBlockProcessor<'_> {
    fn process(&mut self, language: &str, source: &str, index: usize) -> ProcessResult {
        if !language.eq_ignore_ascii_case("mermaid") && !looks_like_mermaid(source) {
            if language.eq_ignore_ascii_case("svg") {
                return ProcessResult::Inline(format!(
                    "<div class=\"embedded-svg-container\">{source}</div>"
                ));
            }
            return ProcessResult::PassThrough;
        }
        if self.prerender.is_none() {
            return ProcessResult::Inline(diagram_placeholder(source));
        }
        self.extracted.push((index, source.to_owned()));
        ProcessResult::Placeholder(self.marker(index))
    }

    fn post_process(&mut self, html: &mut String) {
        let Some((renderer, settings)) = &self.prerender else {
            return;
        };
        if self.extracted.is_empty() {
            return;
        }

        let mut replacements = Replacements::new(&self.marker_prefix, self.extracted.len());
        for (index, source) in self.extracted.drain(..) {
            let block = match DiagramOutcome::attempt(*renderer, source.trim(), settings) {
                DiagramOutcome::Rendered(svg) => format!("<div class=\"diagram\">{svg}</div>"),
                DiagramOutcome::Deferred(source) => diagram_placeholder(&source),
            };
            replacements.add(index, block);
        }
        replacements.apply(html);
    }
}

/// Placeholder replacements applied in a single pass.
struct Replacements<'p> {
    prefix: &'p str,
    map: HashMap<usize, String>,
}

impl<'p> Replacements<'p> {
    fn new(prefix: &'p str, capacity: usize) -> Self {
        Self {
            prefix,
            map: HashMap::with_capacity(capacity),
        }
    }

    fn add(&mut self, index: usize, content: String) {
        self.map.insert(index, content);
    }

    /// Replace every known `{prefix}N-->` marker; unknown ones are kept.
    fn apply(self, html: &mut String) {
        if self.map.is_empty() {
            return;
        }

        let mut result = String::with_capacity(html.len());
        let mut remaining = html.as_str();

        while let Some(start) = remaining.find(self.prefix) {
            result.push_str(&remaining[..start]);
            let after_prefix = &remaining[start + self.prefix.len()..];
            let Some(end) = after_prefix.find(PLACEHOLDER_SUFFIX) else {
                result.push_str(&remaining[start..]);
                remaining = "";
                break;
            };
            let marker_len = self.prefix.len() + end + PLACEHOLDER_SUFFIX.len();
            match after_prefix[..end]
                .parse::<usize>()
                .ok()
                .and_then(|i| self.map.get(&i))
            {
                Some(replacement) => result.push_str(replacement),
                None => result.push_str(&remaining[start..start + marker_len]),
            }
            remaining = &remaining[start + marker_len..];
        }
        result.push_str(remaining);

        *html = result;
    }
}
