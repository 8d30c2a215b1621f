//! Code block processors.
//!
//! Processors are registered with the [`MarkdownRenderer`](super::MarkdownRenderer)
//! and consulted in order for every fenced or indented code block. The first
//! processor returning something other than [`ProcessResult::PassThrough`]
//! decides the output; unclaimed blocks become highlighted code.

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Emit a placeholder now and replace it in
    /// [`post_process`](CodeBlockProcessor::post_process).
    Placeholder(String),
    /// Emit this HTML in place of the block.
    Inline(String),
    /// Not handled by this processor.
    PassThrough,
}

/// Handler for special code blocks.
pub trait CodeBlockProcessor {
    /// Process one block.
    ///
    /// `language` is the first word of the fence info string, empty for
    /// indented blocks and bare fences. `index` counts code blocks from zero
    /// in document order.
    fn process(&mut self, language: &str, source: &str, index: usize) -> ProcessResult;

    /// Replace placeholders after the whole document has been converted.
    fn post_process(&mut self, _html: &mut String) {}
}

/// Language tag of a fence info string (`rust ignore` yields `rust`).
#[must_use]
pub fn fence_language(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_language() {
        assert_eq!(fence_language("rust"), "rust");
        assert_eq!(fence_language("python title=main.py"), "python");
        assert_eq!(fence_language("  mermaid  "), "mermaid");
        assert_eq!(fence_language(""), "");
        assert_eq!(fence_language("   "), "");
    }

    struct Upper;

    impl CodeBlockProcessor for Upper {
        fn process(&mut self, language: &str, source: &str, index: usize) -> ProcessResult {
            match language {
                "upper" => ProcessResult::Inline(source.to_uppercase()),
                "later" => ProcessResult::Placeholder(format!("[[{index}]]")),
                _ => ProcessResult::PassThrough,
            }
        }
    }

    #[test]
    fn test_processor_results() {
        let mut p = Upper;
        assert_eq!(p.process("upper", "abc", 0), ProcessResult::Inline("ABC".to_owned()));
        assert_eq!(p.process("later", "abc", 3), ProcessResult::Placeholder("[[3]]".to_owned()));
        assert_eq!(p.process("rust", "abc", 0), ProcessResult::PassThrough);

        let mut html = String::from("<p>x</p>");
        p.post_process(&mut html);
        assert_eq!(html, "<p>x</p>");
    }
}
