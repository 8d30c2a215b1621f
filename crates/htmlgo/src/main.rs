//! HTML-GO CLI.
//!
//! Provides commands for:
//! - `render`: Render pages to standalone HTML documents
//! - `detect`: Report the dialect of a page

mod commands;
mod error;
mod input;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{DetectArgs, RenderArgs};
use output::Output;

/// HTML-GO - render HTML, Markdown, SVG and Mermaid pages.
#[derive(Parser)]
#[command(name = "htmlgo", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one or more pages to HTML.
    Render(RenderArgs),
    /// Print the dialect of a page.
    Detect(DetectArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG
    let verbose = match &cli.command {
        Commands::Render(args) => args.verbose,
        Commands::Detect(args) => args.verbose,
    };
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Render(args) => args.execute(),
        Commands::Detect(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
