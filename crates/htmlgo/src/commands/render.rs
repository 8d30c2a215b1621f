//! `htmlgo render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use htmlgo_config::{CliSettings, Config};
use htmlgo_diagrams::KrokiRenderer;
use htmlgo_renderer::{Dialect, Renderer, classify};
use rayon::prelude::*;

use crate::error::CliError;
use crate::input::{output_path, read_input};
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input files (`-` reads standard input).
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Content dialect: html, markdown, svg or mermaid (default: detect).
    #[arg(short, long)]
    dialect: Option<Dialect>,

    /// Output file (default: standard output).
    #[arg(short, long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Directory receiving `<stem>.html` for each input.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover htmlgo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kroki server URL for server-side diagram rendering (overrides config).
    #[arg(long, env = "HTMLGO_KROKI_URL")]
    kroki_url: Option<String>,

    /// Render diagrams in the browser only.
    #[arg(long, conflicts_with = "kroki_url")]
    client_only: bool,

    /// Kroki request timeout in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Pre-render diagrams embedded in Markdown on the server.
    #[arg(long)]
    prerender: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, an input cannot be read or
    /// an output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        if self.inputs.len() > 1 && self.out_dir.is_none() {
            return Err(CliError::Validation(
                "multiple inputs require --out-dir".to_owned(),
            ));
        }

        let cli_settings = CliSettings {
            kroki_url: self.kroki_url,
            client_only: self.client_only,
            timeout_secs: self.timeout,
            prerender_markdown: self.prerender.then_some(true),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "loaded configuration");
        }
        let renderer = build_renderer(&config);

        let Some(out_dir) = self.out_dir else {
            // Validated above: exactly one input
            let input = &self.inputs[0];
            let html = render_input(&renderer, input, self.dialect)?;
            return match self.output {
                Some(path) => {
                    std::fs::write(&path, html)?;
                    output.success(&format!("Wrote {}", path.display()));
                    Ok(())
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(html.as_bytes())?;
                    stdout.flush()?;
                    Ok(())
                }
            };
        };

        std::fs::create_dir_all(&out_dir)?;
        let results: Vec<(&PathBuf, Result<PathBuf, CliError>)> = self
            .inputs
            .par_iter()
            .map(|input| {
                let result = render_input(&renderer, input, self.dialect).and_then(|html| {
                    let target = output_path(input, &out_dir);
                    std::fs::write(&target, html)?;
                    Ok(target)
                });
                (input, result)
            })
            .collect();

        let total = results.len();
        let mut failed = 0;
        for (input, result) in results {
            match result {
                Ok(target) => {
                    output.success(&format!("{} -> {}", input.display(), target.display()));
                }
                Err(err) => {
                    failed += 1;
                    output.warning(&format!("{}: {err}", input.display()));
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Batch { failed, total });
        }
        output.info(&format!("Rendered {total} pages into {}", out_dir.display()));
        Ok(())
    }
}

/// Build a renderer from configuration, with Kroki when a URL is set.
pub(crate) fn build_renderer(config: &Config) -> Renderer {
    let renderer = Renderer::new(config.render_options());
    match &config.diagrams.kroki_url {
        Some(url) => {
            tracing::info!(kroki_url = %url, "server-side diagram rendering enabled");
            let kroki = KrokiRenderer::new(url.clone()).timeout(config.diagrams.timeout());
            renderer.with_diagram_renderer(kroki)
        }
        None => renderer,
    }
}

fn render_input(
    renderer: &Renderer,
    input: &Path,
    dialect: Option<Dialect>,
) -> Result<String, CliError> {
    let content = read_input(input)?;
    let dialect = dialect.unwrap_or_else(|| classify(&content, None));
    tracing::info!(input = %input.display(), %dialect, "rendering");
    Ok(renderer.render(&content, Some(dialect))?)
}
