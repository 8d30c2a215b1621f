//! `htmlgo detect` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use htmlgo_renderer::{Dialect, classify, diagram_kind};
use htmlgo_store::extract_title;
use serde::Serialize;

use crate::error::CliError;
use crate::input::read_input;

/// Arguments for the detect command.
#[derive(Args)]
pub(crate) struct DetectArgs {
    /// Input file (`-` reads standard input).
    input: PathBuf,

    /// Print a JSON object with dialect, title and diagram type.
    #[arg(long)]
    json: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Serialize)]
struct Detection {
    dialect: Dialect,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagram: Option<&'static str>,
}

impl Detection {
    fn of(content: &str) -> Self {
        let dialect = classify(content, None);
        Self {
            dialect,
            title: extract_title(content, dialect),
            diagram: match dialect {
                Dialect::Mermaid => diagram_kind(content),
                Dialect::Html | Dialect::Markdown | Dialect::Svg => None,
            },
        }
    }
}

impl DetectArgs {
    /// Execute the detect command.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let content = read_input(&self.input)?;
        let detection = Detection::of(&content);
        tracing::info!(input = %self.input.display(), dialect = %detection.dialect, "detected");

        let mut stdout = std::io::stdout().lock();
        if self.json {
            serde_json::to_writer(&mut stdout, &detection)?;
            writeln!(stdout)?;
        } else {
            writeln!(stdout, "{}", detection.dialect)?;
        }
        Ok(())
    }
}
