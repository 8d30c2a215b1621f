//! Render options threaded through every renderer call.
//!
//! [`RenderOptions`] is immutable once built. Defaults reproduce the stock
//! HTML-GO viewer: `/icon/web` favicons, highlight.js 11.7.0 and the
//! jsDelivr Mermaid bundle.

/// Complete configuration for a [`Renderer`](crate::Renderer).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub viewer: ViewerOptions,
    pub assets: AssetUrls,
    pub diagrams: DiagramOptions,
    pub markdown: MarkdownOptions,
}

/// Document shell metadata shared by every dialect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewerOptions {
    /// Value of the `<html lang>` attribute.
    pub lang: String,
    /// Default document title.
    pub title: String,
    /// Base URL for favicon and touch icons, without trailing slash.
    pub icon_base: String,
    /// `theme-color` meta value.
    pub theme_color: String,
    /// Site stylesheet linked from HTML fragment shells.
    pub stylesheet: String,
    /// Stylesheet linked from Markdown documents.
    pub markdown_stylesheet: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            lang: "zh-CN".to_owned(),
            title: "HTML-GO Viewer".to_owned(),
            icon_base: "/icon/web".to_owned(),
            theme_color: "#6366f1".to_owned(),
            stylesheet: "/css/styles.css".to_owned(),
            markdown_stylesheet: "/css/markdown-bytedance.css".to_owned(),
        }
    }
}

/// Client-side script and stylesheet locations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetUrls {
    pub highlight_js: String,
    pub highlight_css: String,
    pub mermaid_js: String,
}

impl Default for AssetUrls {
    fn default() -> Self {
        Self {
            highlight_js: "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.7.0/highlight.min.js"
                .to_owned(),
            highlight_css:
                "https://cdnjs.cloudflare.com/ajax/libs/highlight.js/11.7.0/styles/atom-one-dark.min.css"
                    .to_owned(),
            mermaid_js: "https://cdn.jsdelivr.net/npm/mermaid/dist/mermaid.min.js".to_owned(),
        }
    }
}

/// Diagram rendering parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramOptions {
    /// Canvas bound for server-side rendering, in pixels.
    pub width: u32,
    pub height: u32,
    /// Theme passed to the server-side renderer.
    pub theme: String,
    /// Render fenced Markdown diagrams on the server, falling back per block.
    pub prerender_markdown: bool,
    /// Delay between client-side polls for unrendered placeholders.
    pub poll_interval_ms: u32,
    /// Client-side render attempts before a placeholder is marked failed.
    pub max_attempts: u32,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            theme: "default".to_owned(),
            prerender_markdown: false,
            poll_interval_ms: 1000,
            max_attempts: 10,
        }
    }
}

impl DiagramOptions {
    /// Settings handed to a [`DiagramRenderer`](crate::DiagramRenderer).
    #[must_use]
    pub fn settings(&self) -> crate::DiagramSettings {
        crate::DiagramSettings {
            width: self.width,
            height: self.height,
            theme: self.theme.clone(),
        }
    }
}

/// Markdown extension switches.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkdownOptions {
    /// Tables, strikethrough, task lists and alerts.
    pub gfm: bool,
    /// Render soft line breaks as `<br>`.
    pub hard_breaks: bool,
    pub smart_punctuation: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            hard_breaks: true,
            smart_punctuation: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.viewer.icon_base, "/icon/web");
        assert_eq!(options.viewer.theme_color, "#6366f1");
        assert_eq!(options.diagrams.width, 800);
        assert_eq!(options.diagrams.height, 600);
        assert_eq!(options.diagrams.theme, "default");
        assert!(!options.diagrams.prerender_markdown);
        assert!(options.markdown.gfm);
        assert!(options.assets.highlight_js.contains("11.7.0"));
    }

    #[test]
    fn test_settings_from_options() {
        let options = DiagramOptions {
            width: 1024,
            height: 768,
            theme: "forest".to_owned(),
            ..Default::default()
        };
        let settings = options.settings();
        assert_eq!(settings.width, 1024);
        assert_eq!(settings.height, 768);
        assert_eq!(settings.theme, "forest");
    }
}
