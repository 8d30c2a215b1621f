//! Event-driven Markdown to HTML conversion.

use std::fmt::{self, Write};

use pulldown_cmark::{
    BlockQuoteKind, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use super::code_block::{CodeBlockProcessor, ProcessResult, fence_language};
use super::highlight::write_code_block;
use crate::options::MarkdownOptions;
use crate::state::{CodeBlockState, HeadingState, ImageState, TableState, escape_html};

/// Output of a Markdown conversion.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// HTML fragment.
    pub html: String,
    /// Text of the first H1, if any.
    pub title: Option<String>,
}

/// Markdown renderer with pluggable code block processors.
///
/// Processors are checked in order; the first returning a non-`PassThrough`
/// result wins. After conversion every processor's `post_process` runs over
/// the output.
pub struct MarkdownRenderer<'a> {
    output: String,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    heading: HeadingState,
    pending_image: Option<(String, String)>,
    processors: Vec<Box<dyn CodeBlockProcessor + 'a>>,
    code_block_index: usize,
    options: MarkdownOptions,
    /// Open blockquotes; `Some` for GitHub alerts.
    alert_stack: Vec<Option<BlockQuoteKind>>,
}

impl<'a> MarkdownRenderer<'a> {
    #[must_use]
    pub fn new(options: MarkdownOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            heading: HeadingState::default(),
            pending_image: None,
            processors: Vec::new(),
            code_block_index: 0,
            options,
            alert_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_processor<P: CodeBlockProcessor + 'a>(mut self, processor: P) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Parser options for the configured extensions.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::empty();
        if self.options.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM;
        }
        if self.options.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    /// Parse and render `markdown`.
    pub fn render_markdown(&mut self, markdown: &str) -> Result<RenderResult, fmt::Error> {
        let parser = Parser::new_ext(markdown, self.parser_options());
        self.render(parser)
    }

    /// Render a stream of parser events.
    pub fn render<'e, I>(&mut self, events: I) -> Result<RenderResult, fmt::Error>
    where
        I: Iterator<Item = Event<'e>>,
    {
        for event in events {
            self.process_event(event)?;
        }

        let mut html = std::mem::take(&mut self.output);
        for processor in &mut self.processors {
            processor.post_process(&mut html);
        }

        Ok(RenderResult {
            html,
            title: self.heading.take_title(),
        })
    }

    fn process_event(&mut self, event: Event<'_>) -> fmt::Result {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => {
                self.text(&text);
                Ok(())
            }
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_inline(&html);
                Ok(())
            }
            Event::SoftBreak => {
                self.soft_break();
                Ok(())
            }
            Event::HardBreak => {
                self.push_inline("<br>\n");
                Ok(())
            }
            Event::Rule => {
                self.output.push_str("<hr>\n");
                Ok(())
            }
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" disabled checked> "#
                } else {
                    r#"<input type="checkbox" disabled> "#
                });
                Ok(())
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                self.text(&math);
                Ok(())
            }
            Event::FootnoteReference(_) => Ok(()),
        }
    }

    /// Write inline content to the heading buffer when inside a heading.
    /// Markup inside image alt text is dropped.
    fn push_inline(&mut self, content: &str) {
        if self.image.is_active() {
            return;
        }
        if self.heading.is_active() {
            self.heading.html_buffer().push_str(content);
        } else {
            self.output.push_str(content);
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) -> fmt::Result {
        match tag {
            Tag::Paragraph => self.output.push_str("<p>"),
            Tag::Heading { level, .. } => self.heading.start_heading(heading_level(level)),
            Tag::BlockQuote(kind) => {
                self.alert_stack.push(kind);
                match kind {
                    Some(kind) => {
                        let (class, title) = alert_label(kind);
                        write!(
                            self.output,
                            r#"<div class="markdown-alert markdown-alert-{class}"><p class="markdown-alert-title">{title}</p>"#
                        )?;
                    }
                    None => self.output.push_str("<blockquote>\n"),
                }
            }
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info,
                    CodeBlockKind::Indented => CowStr::Borrowed(""),
                };
                self.code.start(fence_language(&info));
            }
            Tag::List(start) => match start {
                Some(1) => self.output.push_str("<ol>\n"),
                Some(n) => writeln!(self.output, r#"<ol start="{n}">"#)?,
                None => self.output.push_str("<ul>\n"),
            },
            Tag::Item => self.output.push_str("<li>"),
            Tag::FootnoteDefinition(_) | Tag::HtmlBlock | Tag::MetadataBlock(_) => {}
            Tag::DefinitionList => self.output.push_str("<dl>"),
            Tag::DefinitionListTitle => self.output.push_str("<dt>"),
            Tag::DefinitionListDefinition => self.output.push_str("<dd>"),
            Tag::Table(alignments) => {
                self.table.start(alignments);
                self.output.push_str("<table>");
            }
            Tag::TableHead => {
                self.table.start_head();
                self.output.push_str("<thead><tr>");
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let align = self.table.current_alignment_style();
                let cell = if self.table.is_in_head() { "th" } else { "td" };
                write!(self.output, "<{cell}{align}>")?;
            }
            Tag::Emphasis => self.push_inline("<em>"),
            Tag::Strong => self.push_inline("<strong>"),
            Tag::Strikethrough => self.push_inline("<del>"),
            Tag::Superscript => self.push_inline("<sup>"),
            Tag::Subscript => self.push_inline("<sub>"),
            Tag::Link {
                dest_url, title, ..
            } => {
                let link = if title.is_empty() {
                    format!(r#"<a href="{}">"#, escape_html(&dest_url))
                } else {
                    format!(
                        r#"<a href="{}" title="{}">"#,
                        escape_html(&dest_url),
                        escape_html(&title)
                    )
                };
                self.push_inline(&link);
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image.start();
                self.pending_image = Some((dest_url.into_string(), title.into_string()));
            }
        }
        Ok(())
    }

    fn end_tag(&mut self, tag: TagEnd) -> fmt::Result {
        match tag {
            TagEnd::Paragraph => self.output.push_str("</p>\n"),
            TagEnd::Heading(_) => {
                if let Some(heading) = self.heading.complete_heading() {
                    writeln!(
                        self.output,
                        r#"<h{level} id="{id}">{html}</h{level}>"#,
                        level = heading.level,
                        id = heading.id,
                        html = heading.html.trim()
                    )?;
                }
            }
            TagEnd::BlockQuote(_) => match self.alert_stack.pop() {
                Some(Some(_)) => self.output.push_str("</div>\n"),
                _ => self.output.push_str("</blockquote>\n"),
            },
            TagEnd::CodeBlock => self.finish_code_block()?,
            TagEnd::List(ordered) => self
                .output
                .push_str(if ordered { "</ol>\n" } else { "</ul>\n" }),
            TagEnd::Item => self.output.push_str("</li>\n"),
            TagEnd::FootnoteDefinition | TagEnd::HtmlBlock | TagEnd::MetadataBlock(_) => {}
            TagEnd::DefinitionList => self.output.push_str("</dl>\n"),
            TagEnd::DefinitionListTitle => self.output.push_str("</dt>"),
            TagEnd::DefinitionListDefinition => self.output.push_str("</dd>"),
            TagEnd::Table => self.output.push_str("</tbody></table>\n"),
            TagEnd::TableHead => {
                self.output.push_str("</tr></thead><tbody>");
                self.table.end_head();
            }
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output
                    .push_str(if self.table.is_in_head() { "</th>" } else { "</td>" });
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.push_inline("</em>"),
            TagEnd::Strong => self.push_inline("</strong>"),
            TagEnd::Strikethrough => self.push_inline("</del>"),
            TagEnd::Superscript => self.push_inline("</sup>"),
            TagEnd::Subscript => self.push_inline("</sub>"),
            TagEnd::Link => self.push_inline("</a>"),
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some((src, title)) = self.pending_image.take() {
                    let mut img =
                        format!(r#"<img src="{}" alt="{}""#, escape_html(&src), escape_html(&alt));
                    if !title.is_empty() {
                        write!(img, r#" title="{}""#, escape_html(&title))?;
                    }
                    img.push('>');
                    self.push_inline(&img);
                }
            }
        }
        Ok(())
    }

    fn finish_code_block(&mut self) -> fmt::Result {
        let (language, source) = self.code.end();
        let index = self.code_block_index;
        self.code_block_index += 1;

        for processor in &mut self.processors {
            match processor.process(&language, &source, index) {
                ProcessResult::Placeholder(html) | ProcessResult::Inline(html) => {
                    self.output.push_str(&html);
                    self.output.push('\n');
                    return Ok(());
                }
                ProcessResult::PassThrough => {}
            }
        }

        write_code_block(&mut self.output, &language, &source)?;
        self.output.push('\n');
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if self.code.is_active() {
            self.code.push_str(text);
        } else if self.image.is_active() {
            self.image.push_str(text);
        } else if self.heading.is_active() {
            self.heading.push_text(text);
            self.heading.html_buffer().push_str(&escape_html(text));
        } else {
            self.output.push_str(&escape_html(text));
        }
    }

    fn inline_code(&mut self, code: &str) -> fmt::Result {
        if self.image.is_active() {
            self.image.push_str(code);
            return Ok(());
        }
        if self.heading.is_active() {
            self.heading.push_text(code);
        }
        self.push_inline(&format!("<code>{}</code>", escape_html(code)));
        Ok(())
    }

    fn soft_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else if self.heading.is_active() {
            // Setext headings span lines; keep the title and slug on one line
            self.heading.push_text(" ");
            self.heading.html_buffer().push(' ');
        } else if self.options.hard_breaks {
            self.push_inline("<br>\n");
        } else {
            self.push_inline("\n");
        }
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn alert_label(kind: BlockQuoteKind) -> (&'static str, &'static str) {
    match kind {
        BlockQuoteKind::Note => ("note", "Note"),
        BlockQuoteKind::Tip => ("tip", "Tip"),
        BlockQuoteKind::Important => ("important", "Important"),
        BlockQuoteKind::Warning => ("warning", "Warning"),
        BlockQuoteKind::Caution => ("caution", "Caution"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(markdown: &str) -> RenderResult {
        MarkdownRenderer::new(MarkdownOptions::default())
            .render_markdown(markdown)
            .unwrap()
    }

    fn render_plain(markdown: &str) -> RenderResult {
        let options = MarkdownOptions {
            gfm: false,
            hard_breaks: false,
            smart_punctuation: false,
        };
        MarkdownRenderer::new(options).render_markdown(markdown).unwrap()
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(render("Hello, world!").html, "<p>Hello, world!</p>\n");
    }

    #[test]
    fn test_heading_with_id_and_title() {
        let result = render("# My *Title*\n\n## Section Title");
        assert_eq!(
            result.html,
            "<h1 id=\"my-title\">My <em>Title</em></h1>\n<h2 id=\"section-title\">Section Title</h2>\n"
        );
        assert_eq!(result.title, Some("My Title".to_owned()));
    }

    #[test]
    fn test_setext_heading_spanning_lines() {
        let result = render("Release\nNotes\n=====\n\nbody");
        assert!(
            result
                .html
                .starts_with("<h1 id=\"release-notes\">Release Notes</h1>\n"),
            "{}",
            result.html
        );
        assert!(!result.html.contains("<br>"));
        assert_eq!(result.title, Some("Release Notes".to_owned()));
    }

    #[test]
    fn test_no_h1_no_title() {
        assert_eq!(render("## Only a section").title, None);
    }

    #[test]
    fn test_heading_with_inline_code() {
        let result = render("## The `run` command");
        assert_eq!(
            result.html,
            "<h2 id=\"the-run-command\">The <code>run</code> command</h2>\n"
        );
    }

    #[test]
    fn test_soft_break_as_br() {
        assert_eq!(render("line one\nline two").html, "<p>line one<br>\nline two</p>\n");
        assert_eq!(render_plain("line one\nline two").html, "<p>line one\nline two</p>\n");
    }

    #[test]
    fn test_smart_punctuation() {
        assert_eq!(
            render("\"quoted\" -- dash...").html,
            "<p>\u{201c}quoted\u{201d} \u{2013} dash\u{2026}</p>\n"
        );
        assert_eq!(render_plain("\"quoted\"").html, "<p>&quot;quoted&quot;</p>\n");
    }

    #[test]
    fn test_text_escaped() {
        assert_eq!(render_plain("a < b & c").html, "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn test_raw_html_passes_through() {
        let result = render("<div class=\"x\">hi</div>\n\ntext");
        assert!(result.html.starts_with("<div class=\"x\">hi</div>"));
        assert!(result.html.ends_with("<p>text</p>\n"));
    }

    #[test]
    fn test_table_with_alignment() {
        let result = render("| A | B |\n|:--|--:|\n| 1 | 2 |");
        assert_eq!(
            result.html,
            "<table><thead><tr><th style=\"text-align:left\">A</th><th style=\"text-align:right\">B</th></tr></thead>\
             <tbody><tr><td style=\"text-align:left\">1</td><td style=\"text-align:right\">2</td></tr></tbody></table>\n"
        );
    }

    #[test]
    fn test_gfm_disabled_no_table() {
        let result = render_plain("| A |\n|---|\n| 1 |");
        assert!(!result.html.contains("<table>"));
    }

    #[test]
    fn test_strikethrough_and_tasks() {
        let result = render("~~gone~~\n\n- [x] done\n- [ ] todo");
        assert!(result.html.contains("<del>gone</del>"));
        assert!(result.html.contains(r#"<li><input type="checkbox" disabled checked> done</li>"#));
        assert!(result.html.contains(r#"<li><input type="checkbox" disabled> todo</li>"#));
    }

    #[test]
    fn test_ordered_list_start() {
        let result = render("3. three\n4. four");
        assert_eq!(result.html, "<ol start=\"3\">\n<li>three</li>\n<li>four</li>\n</ol>\n");
    }

    #[test]
    fn test_alert() {
        let result = render("> [!WARNING]\n> Careful");
        assert_eq!(
            result.html,
            "<div class=\"markdown-alert markdown-alert-warning\"><p class=\"markdown-alert-title\">Warning</p><p>Careful</p>\n</div>\n"
        );
    }

    #[test]
    fn test_plain_blockquote() {
        assert_eq!(render("> quoted").html, "<blockquote>\n<p>quoted</p>\n</blockquote>\n");
    }

    #[test]
    fn test_link_and_image() {
        let result = render("[site](https://example.com \"Home\") ![a *b*](/x.png)");
        assert_eq!(
            result.html,
            "<p><a href=\"https://example.com\" title=\"Home\">site</a> <img src=\"/x.png\" alt=\"a b\"></p>\n"
        );
    }

    #[test]
    fn test_code_block_highlight_classes() {
        let result = render("```rust\nfn main() {}\n```\n\n```\nplain\n```\n\n    indented\n");
        assert!(result.html.starts_with(
            "<pre><code class=\"hljs language-rust\">fn main() {}\n</code></pre>\n\
             <pre><code class=\"hljs\">plain\n</code></pre>\n"
        ));
        assert!(result.html.contains("<pre><code class=\"hljs\">indented"));
    }

    struct Tagged;

    impl CodeBlockProcessor for Tagged {
        fn process(&mut self, language: &str, source: &str, index: usize) -> ProcessResult {
            if language == "note" {
                ProcessResult::Inline(format!(
                    "<aside data-index=\"{index}\">{}</aside>",
                    source.trim()
                ))
            } else {
                ProcessResult::PassThrough
            }
        }
    }

    #[test]
    fn test_processor_claims_block() {
        let mut renderer = MarkdownRenderer::new(MarkdownOptions::default()).with_processor(Tagged);
        let result = renderer
            .render_markdown("```js\nx\n```\n\n```note\nremember\n```")
            .unwrap();
        assert_eq!(
            result.html,
            "<pre><code class=\"hljs language-javascript\">x\n</code></pre>\n<aside data-index=\"1\">remember</aside>\n"
        );
    }
}
