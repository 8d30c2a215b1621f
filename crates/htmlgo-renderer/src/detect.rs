//! Mermaid diagram detection.
//!
//! Detection is driven by [`DIAGRAM_GRAMMARS`], an ordered table of
//! line-anchored keyword patterns. Supporting a new diagram type is a
//! table edit.

use std::sync::LazyLock;

use regex::Regex;

/// Leading-keyword grammar for one diagram type.
pub struct DiagramGrammar {
    /// Short name used in logs (e.g., "flowchart").
    pub name: &'static str,
    /// Pattern matched against the start of a line.
    pattern: &'static str,
}

/// Ordered diagram grammars. The first matching entry wins.
pub const DIAGRAM_GRAMMARS: &[DiagramGrammar] = &[
    DiagramGrammar {
        name: "flowchart",
        pattern: r"(graph|flowchart)\s+(TB|TD|BT|RL|LR)\b",
    },
    DiagramGrammar {
        name: "sequence",
        pattern: r"sequenceDiagram\b",
    },
    DiagramGrammar {
        name: "class",
        pattern: r"classDiagram\b",
    },
    DiagramGrammar {
        name: "state",
        pattern: r"stateDiagram(-v2)?\b",
    },
    DiagramGrammar {
        name: "er",
        pattern: r"erDiagram\b",
    },
    DiagramGrammar {
        name: "gantt",
        pattern: r"gantt\b",
    },
    DiagramGrammar {
        name: "pie",
        pattern: r"pie\b",
    },
    DiagramGrammar {
        name: "journey",
        pattern: r"journey\b",
    },
    DiagramGrammar {
        name: "git",
        pattern: r"gitGraph\b",
    },
    DiagramGrammar {
        name: "mindmap",
        pattern: r"mindmap\b",
    },
    DiagramGrammar {
        name: "timeline",
        pattern: r"timeline\b",
    },
    DiagramGrammar {
        name: "c4",
        pattern: r"C4Context\b",
    },
];

/// Compiled grammars in table order.
///
/// Line-anchored variants (`(?m)^...`) are used for whole-text scans,
/// start-anchored ones for single-line checks.
struct CompiledGrammar {
    name: &'static str,
    any_line: Regex,
    line_start: Regex,
}

static COMPILED: LazyLock<Vec<CompiledGrammar>> = LazyLock::new(|| {
    DIAGRAM_GRAMMARS
        .iter()
        .map(|g| CompiledGrammar {
            name: g.name,
            any_line: Regex::new(&format!("(?m)^{}", g.pattern)).unwrap(),
            line_start: Regex::new(&format!("^{}", g.pattern)).unwrap(),
        })
        .collect()
});

/// Check whether any line of `text` starts a Mermaid diagram definition.
///
/// Matching is case-sensitive and anchored at the start of a line, so prose
/// that merely mentions a keyword mid-sentence does not match.
///
/// ```
/// use htmlgo_renderer::looks_like_mermaid;
///
/// assert!(looks_like_mermaid("flowchart TD\nA-->B"));
/// assert!(!looks_like_mermaid("I like flowcharts"));
/// ```
#[must_use]
pub fn looks_like_mermaid(text: &str) -> bool {
    diagram_kind(text).is_some()
}

/// Name of the first grammar (in table order) matching any line of `text`.
#[must_use]
pub fn diagram_kind(text: &str) -> Option<&'static str> {
    COMPILED
        .iter()
        .find(|g| g.any_line.is_match(text))
        .map(|g| g.name)
}

/// Check whether `text` as a whole is a diagram definition.
///
/// Fence delimiter lines, blank lines and `%%` comment/directive lines are
/// skipped; the first remaining line must match a grammar. Lines are
/// trimmed first, so an indented document still counts, unlike
/// [`looks_like_mermaid`] which anchors on unindented lines.
#[must_use]
pub fn is_standalone_diagram(text: &str) -> bool {
    first_significant_line(text)
        .is_some_and(|line| COMPILED.iter().any(|g| g.line_start.is_match(line)))
}

/// Whether `text` contains a fenced code marker anywhere.
#[must_use]
pub fn has_fence_marker(text: &str) -> bool {
    text.contains("```") || text.contains("~~~")
}

/// Drop fenced-code delimiter lines, keeping everything else verbatim.
#[must_use]
pub fn strip_fence_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !is_fence_delimiter(line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn first_significant_line(text: &str) -> Option<&str> {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !is_fence_delimiter(line) && !line.starts_with("%%"))
}

/// A line opening or closing a fenced code block (info string allowed).
fn is_fence_delimiter(line: &str) -> bool {
    line.starts_with("```") || line.starts_with("~~~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flowchart_detected() {
        assert!(looks_like_mermaid("flowchart TD\nA-->B"));
        assert!(looks_like_mermaid("graph LR\n  A --> B"));
        assert_eq!(diagram_kind("graph LR\n  A --> B"), Some("flowchart"));
    }

    #[test]
    fn test_flowchart_requires_direction() {
        assert!(!looks_like_mermaid("graph\nA-->B"));
        assert!(!looks_like_mermaid("flowchart XX"));
    }

    #[test]
    fn test_prose_mention_not_detected() {
        assert!(!looks_like_mermaid("I like flowcharts"));
        assert!(!looks_like_mermaid("We drew a sequenceDiagram yesterday"));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!looks_like_mermaid("SEQUENCEDIAGRAM"));
        assert!(!looks_like_mermaid("Gantt"));
    }

    #[test]
    fn test_keyword_on_later_line() {
        let text = "Some intro\nsequenceDiagram\n  Alice->>Bob: Hi";
        assert!(looks_like_mermaid(text));
        assert_eq!(diagram_kind(text), Some("sequence"));
    }

    #[test]
    fn test_indented_keyword_not_anchored() {
        assert!(!looks_like_mermaid("    sequenceDiagram"));
    }

    #[test]
    fn test_standalone_ignores_indentation() {
        let indented = "    sequenceDiagram\n    A->>B: hi";
        assert!(is_standalone_diagram(indented));
        assert!(!looks_like_mermaid(indented));
    }

    #[test]
    fn test_all_grammars() {
        let samples = [
            ("flowchart TB\nA-->B", "flowchart"),
            ("sequenceDiagram\nA->>B: hi", "sequence"),
            ("classDiagram\nclass A", "class"),
            ("stateDiagram-v2\n[*] --> S", "state"),
            ("stateDiagram\n[*] --> S", "state"),
            ("erDiagram\nA ||--o{ B : has", "er"),
            ("gantt\ntitle Plan", "gantt"),
            ("pie title Pets\n\"Dogs\" : 3", "pie"),
            ("journey\ntitle Day", "journey"),
            ("gitGraph\ncommit", "git"),
            ("mindmap\n  root", "mindmap"),
            ("timeline\ntitle History", "timeline"),
            ("C4Context\ntitle System", "c4"),
        ];
        for (text, expected) in samples {
            assert_eq!(diagram_kind(text), Some(expected), "failed for {text:?}");
        }
    }

    #[test]
    fn test_word_boundary() {
        assert!(!looks_like_mermaid("pies are great"));
        assert!(!looks_like_mermaid("ganttchart"));
    }

    #[test]
    fn test_standalone_first_line() {
        assert!(is_standalone_diagram("sequenceDiagram\nA->>B: hi"));
        assert!(is_standalone_diagram("\n\n  graph TD\n  A-->B\n"));
        assert!(!is_standalone_diagram("# Title\n\nsequenceDiagram"));
    }

    #[test]
    fn test_standalone_skips_fences_and_directives() {
        assert!(is_standalone_diagram("```mermaid\ngraph TD\nA-->B\n```"));
        assert!(is_standalone_diagram(
            "%%{init: {'theme': 'dark'}}%%\nflowchart LR\nA-->B"
        ));
    }

    #[test]
    fn test_standalone_empty() {
        assert!(!is_standalone_diagram(""));
        assert!(!is_standalone_diagram("```\n```"));
    }

    #[test]
    fn test_standalone_crlf() {
        assert!(is_standalone_diagram("graph TD\r\nA-->B\r\n"));
    }

    #[test]
    fn test_strip_fence_lines() {
        assert_eq!(
            strip_fence_lines("```mermaid\ngraph TD\n  A-->B\n```\n"),
            "graph TD\n  A-->B"
        );
        assert_eq!(strip_fence_lines("pie\n\"a\": 1"), "pie\n\"a\": 1");
    }

    #[test]
    fn test_has_fence_marker() {
        assert!(has_fence_marker("text\n```rust\nfn main() {}\n```"));
        assert!(has_fence_marker("~~~\ncode\n~~~"));
        assert!(!has_fence_marker("graph TD\nA-->B"));
    }
}
