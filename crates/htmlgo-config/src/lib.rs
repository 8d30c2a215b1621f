//! Configuration management for HTML-GO.
//!
//! Parses `htmlgo.toml` with serde and discovers it in the working directory
//! or any parent. Every section is optional; missing values fall back to the
//! stock viewer defaults.
//!
//! ```toml
//! [viewer]
//! lang = "en"
//! title = "Pastebin"
//!
//! [assets]
//! mermaid_js = "${CDN:-https://cdn.jsdelivr.net}/npm/mermaid/dist/mermaid.min.js"
//!
//! [diagrams]
//! kroki_url = "${KROKI_URL}"
//! timeout_secs = 5
//! prerender_markdown = true
//!
//! [markdown]
//! hard_breaks = false
//! ```
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` (error if unset) and `${VAR:-default}` are expanded in
//! `diagrams.kroki_url` and every `assets` URL.

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use htmlgo_renderer::{AssetUrls, DiagramOptions, MarkdownOptions, RenderOptions, ViewerOptions};
use serde::Deserialize;

const CONFIG_FILENAME: &str = "htmlgo.toml";

const MAX_TIMEOUT_SECS: u64 = 120;
const MAX_CANVAS: u32 = 10_000;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub kroki_url: Option<String>,
    /// Disable server-side diagram rendering even when a Kroki URL is set.
    pub client_only: bool,
    pub timeout_secs: Option<u64>,
    pub prerender_markdown: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub viewer: ViewerConfig,
    pub assets: AssetsConfig,
    pub diagrams: DiagramsConfig,
    pub markdown: MarkdownConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// `[viewer]`: metadata of the generated document shell.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub lang: String,
    pub title: String,
    pub icon_base: String,
    pub theme_color: String,
    pub stylesheet: String,
    pub markdown_stylesheet: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        let ViewerOptions {
            lang,
            title,
            icon_base,
            theme_color,
            stylesheet,
            markdown_stylesheet,
        } = ViewerOptions::default();
        Self {
            lang,
            title,
            icon_base,
            theme_color,
            stylesheet,
            markdown_stylesheet,
        }
    }
}

/// `[assets]`: client-side script and stylesheet URLs.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    pub highlight_js: String,
    pub highlight_css: String,
    pub mermaid_js: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        let AssetUrls {
            highlight_js,
            highlight_css,
            mermaid_js,
        } = AssetUrls::default();
        Self {
            highlight_js,
            highlight_css,
            mermaid_js,
        }
    }
}

/// `[diagrams]`: server-side and in-browser diagram rendering.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DiagramsConfig {
    /// Kroki server URL. Diagrams are rendered in the browser only when unset.
    pub kroki_url: Option<String>,
    /// HTTP timeout for a single Kroki request.
    pub timeout_secs: u64,
    pub width: u32,
    pub height: u32,
    pub theme: String,
    pub prerender_markdown: bool,
    pub poll_interval_ms: u32,
    pub max_attempts: u32,
}

impl Default for DiagramsConfig {
    fn default() -> Self {
        let defaults = DiagramOptions::default();
        Self {
            kroki_url: None,
            timeout_secs: 10,
            width: defaults.width,
            height: defaults.height,
            theme: defaults.theme,
            prerender_markdown: defaults.prerender_markdown,
            poll_interval_ms: defaults.poll_interval_ms,
            max_attempts: defaults.max_attempts,
        }
    }
}

impl DiagramsConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// `[markdown]`: extension switches.
#[derive(Debug, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkdownConfig {
    pub gfm: bool,
    pub hard_breaks: bool,
    pub smart_punctuation: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        let MarkdownOptions {
            gfm,
            hard_breaks,
            smart_punctuation,
        } = MarkdownOptions::default();
        Self {
            gfm,
            hard_breaks,
            smart_punctuation,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`diagrams.kroki_url`").
        field: String,
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

fn require_range<T>(
    value: T,
    range: std::ops::RangeInclusive<T>,
    field: &str,
) -> Result<(), ConfigError>
where
    T: PartialOrd + std::fmt::Display,
{
    if !range.contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{field} must be between {} and {}, got {value}",
            range.start(),
            range.end()
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise
    /// searches for `htmlgo.toml` in the current directory and its parents,
    /// falling back to defaults. CLI settings take precedence over file
    /// values and the result is validated once more.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, the file
    /// cannot be parsed, or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Search for `htmlgo.toml` in `start` and its parents.
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load and validate a specific file.
    ///
    /// # Errors
    ///
    /// Returns error if reading, parsing, expansion or validation fails.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(kroki_url) = &settings.kroki_url {
            self.diagrams.kroki_url = Some(kroki_url.clone());
        }
        if settings.client_only {
            self.diagrams.kroki_url = None;
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.diagrams.timeout_secs = timeout_secs;
        }
        if let Some(prerender) = settings.prerender_markdown {
            self.diagrams.prerender_markdown = prerender;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.viewer.lang, "viewer.lang")?;
        self.validate_diagrams()
    }

    fn validate_diagrams(&self) -> Result<(), ConfigError> {
        let diagrams = &self.diagrams;
        if let Some(kroki_url) = &diagrams.kroki_url {
            require_non_empty(kroki_url, "diagrams.kroki_url")?;
            require_http_url(kroki_url, "diagrams.kroki_url")?;
        }
        require_range(diagrams.timeout_secs, 1..=MAX_TIMEOUT_SECS, "diagrams.timeout_secs")?;
        require_range(diagrams.width, 1..=MAX_CANVAS, "diagrams.width")?;
        require_range(diagrams.height, 1..=MAX_CANVAS, "diagrams.height")?;
        if diagrams.max_attempts == 0 {
            return Err(ConfigError::Validation(
                "diagrams.max_attempts must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(url) = &self.diagrams.kroki_url {
            self.diagrams.kroki_url = Some(expand::expand_env(url, "diagrams.kroki_url")?);
        }

        let assets = &mut self.assets;
        assets.highlight_js = expand::expand_env(&assets.highlight_js, "assets.highlight_js")?;
        assets.highlight_css = expand::expand_env(&assets.highlight_css, "assets.highlight_css")?;
        assets.mermaid_js = expand::expand_env(&assets.mermaid_js, "assets.mermaid_js")?;

        Ok(())
    }

    /// Build the immutable options consumed by the renderer.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        let viewer = &self.viewer;
        let diagrams = &self.diagrams;
        RenderOptions {
            viewer: ViewerOptions {
                lang: viewer.lang.clone(),
                title: viewer.title.clone(),
                icon_base: viewer.icon_base.trim_end_matches('/').to_owned(),
                theme_color: viewer.theme_color.clone(),
                stylesheet: viewer.stylesheet.clone(),
                markdown_stylesheet: viewer.markdown_stylesheet.clone(),
            },
            assets: AssetUrls {
                highlight_js: self.assets.highlight_js.clone(),
                highlight_css: self.assets.highlight_css.clone(),
                mermaid_js: self.assets.mermaid_js.clone(),
            },
            diagrams: DiagramOptions {
                width: diagrams.width,
                height: diagrams.height,
                theme: diagrams.theme.clone(),
                prerender_markdown: diagrams.prerender_markdown,
                poll_interval_ms: diagrams.poll_interval_ms,
                max_attempts: diagrams.max_attempts,
            },
            markdown: MarkdownOptions {
                gfm: self.markdown.gfm,
                hard_breaks: self.markdown.hard_breaks,
                smart_punctuation: self.markdown.smart_punctuation,
            },
        }
    }
}
