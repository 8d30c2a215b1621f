//! CLI error types.

use std::path::PathBuf;

use htmlgo_config::ConfigError;
use htmlgo_renderer::RenderError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{}: {source}", .path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{failed} of {total} inputs failed to render")]
    Batch { failed: usize, total: usize },

    #[error("{0}")]
    Validation(String),
}
