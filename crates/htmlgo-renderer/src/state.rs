//! Event-processing state for the Markdown renderer.

use std::collections::HashMap;

use pulldown_cmark::Alignment;

/// Buffer for the fenced or indented code block being collected.
#[derive(Default)]
pub struct CodeBlockState {
    active: bool,
    /// Raw info string of the fence, empty for indented blocks.
    info: String,
    buffer: String,
}

impl CodeBlockState {
    /// Begin collecting a block with the given fence info string.
    pub fn start(&mut self, info: impl Into<String>) {
        self.active = true;
        self.info = info.into();
        self.buffer.clear();
    }

    /// Stop collecting and return `(info, body)`.
    pub fn end(&mut self) -> (String, String) {
        self.active = false;
        (
            std::mem::take(&mut self.info),
            std::mem::take(&mut self.buffer),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// Column alignment tracking for GFM tables.
#[derive(Default)]
pub struct TableState {
    in_head: bool,
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.in_head = false;
        self.cell_index = 0;
    }

    pub fn start_head(&mut self) {
        self.in_head = true;
        self.cell_index = 0;
    }

    pub fn end_head(&mut self) {
        self.in_head = false;
    }

    pub fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    pub fn is_in_head(&self) -> bool {
        self.in_head
    }

    /// Inline style attribute for the current cell, empty when unaligned.
    pub fn current_alignment_style(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => r#" style="text-align:left""#,
            Some(Alignment::Center) => r#" style="text-align:center""#,
            Some(Alignment::Right) => r#" style="text-align:right""#,
            Some(Alignment::None) | None => "",
        }
    }
}

/// Alt text capture while inside an image.
#[derive(Default)]
pub struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    pub fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// A finished heading ready to be written.
#[derive(Debug, PartialEq, Eq)]
pub struct CompletedHeading {
    pub level: u8,
    pub id: String,
    /// Inner HTML, with inline formatting preserved.
    pub html: String,
}

/// Heading buffers, slug ids and document title capture.
///
/// Heading content is buffered until the heading ends so the id can be
/// derived from its plain text.
#[derive(Default)]
pub struct HeadingState {
    title: Option<String>,
    current_level: Option<u8>,
    text: String,
    html: String,
    id_counts: HashMap<String, usize>,
}

impl HeadingState {
    pub fn is_active(&self) -> bool {
        self.current_level.is_some()
    }

    pub fn start_heading(&mut self, level: u8) {
        self.current_level = Some(level);
        self.text.clear();
        self.html.clear();
    }

    /// Finish the current heading.
    ///
    /// The first H1 seen becomes the document title.
    pub fn complete_heading(&mut self) -> Option<CompletedHeading> {
        let level = self.current_level.take()?;
        let text = std::mem::take(&mut self.text);
        let html = std::mem::take(&mut self.html);

        if level == 1 && self.title.is_none() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                self.title = Some(trimmed.to_owned());
            }
        }

        let id = self.generate_id(&text);
        Some(CompletedHeading { level, id, html })
    }

    fn generate_id(&mut self, text: &str) -> String {
        let mut base_id = slugify(text);
        if base_id.is_empty() {
            base_id = "section".to_owned();
        }
        let count = self.id_counts.entry(base_id.clone()).or_default();
        let id = match *count {
            0 => base_id,
            n => format!("{base_id}-{n}"),
        };
        *count += 1;
        id
    }

    pub fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    pub fn html_buffer(&mut self) -> &mut String {
        &mut self.html
    }

    pub fn take_title(&mut self) -> Option<String> {
        self.title.take()
    }
}

/// Convert text to a URL-safe slug.
///
/// Lowercases ASCII alphanumerics, collapses whitespace, dashes and
/// underscores into single dashes, and drops everything else.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true;

    for c in text.trim().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Escape text for use in HTML content or attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#039;"),
            _ => result.push(c),
        }
    }
    result
}
