//! Standalone document shell shared by all renderers.

use std::fmt::{self, Write};

use crate::options::ViewerOptions;
use crate::state::escape_html;

/// Builder for a complete `<!DOCTYPE html>` document.
///
/// Every shell carries charset, viewport, favicon, touch-icon and
/// theme-color metadata from [`ViewerOptions`]; callers add stylesheets,
/// inline styles and scripts, then supply the body markup to
/// [`finish`](Self::finish).
pub struct Shell<'a> {
    viewer: &'a ViewerOptions,
    title: String,
    stylesheets: Vec<&'a str>,
    styles: Vec<&'a str>,
    head_scripts: Vec<Script<'a>>,
    body_scripts: Vec<Script<'a>>,
}

enum Script<'a> {
    Src(&'a str),
    Inline(String),
}

impl<'a> Shell<'a> {
    pub fn new(viewer: &'a ViewerOptions) -> Self {
        Self {
            viewer,
            title: viewer.title.clone(),
            stylesheets: Vec::new(),
            styles: Vec::new(),
            head_scripts: Vec::new(),
            body_scripts: Vec::new(),
        }
    }

    /// Override the default document title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn stylesheet(mut self, href: &'a str) -> Self {
        self.stylesheets.push(href);
        self
    }

    #[must_use]
    pub fn style(mut self, css: &'a str) -> Self {
        self.styles.push(css);
        self
    }

    #[must_use]
    pub fn head_script_src(mut self, src: &'a str) -> Self {
        self.head_scripts.push(Script::Src(src));
        self
    }

    #[must_use]
    pub fn head_script(mut self, js: impl Into<String>) -> Self {
        self.head_scripts.push(Script::Inline(js.into()));
        self
    }

    #[must_use]
    pub fn body_script_src(mut self, src: &'a str) -> Self {
        self.body_scripts.push(Script::Src(src));
        self
    }

    #[must_use]
    pub fn body_script(mut self, js: impl Into<String>) -> Self {
        self.body_scripts.push(Script::Inline(js.into()));
        self
    }

    /// Assemble the document around `body`, which is inserted verbatim.
    pub fn finish(self, body: &str) -> Result<String, fmt::Error> {
        let viewer = self.viewer;
        let mut html = String::with_capacity(body.len() + 4096);

        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"{}\">", escape_html(&viewer.lang))?;
        html.push_str("<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        writeln!(html, "<title>{}</title>", escape_html(&self.title))?;

        let icons = escape_html(viewer.icon_base.trim_end_matches('/'));
        writeln!(html, "<link rel=\"icon\" href=\"{icons}/favicon.ico\" sizes=\"any\">")?;
        writeln!(
            html,
            "<link rel=\"apple-touch-icon\" href=\"{icons}/apple-touch-icon.png\">"
        )?;
        for size in [192, 512] {
            writeln!(
                html,
                "<link rel=\"icon\" type=\"image/png\" sizes=\"{size}x{size}\" href=\"{icons}/icon-{size}.png\">"
            )?;
        }
        writeln!(
            html,
            "<meta name=\"theme-color\" content=\"{}\">",
            escape_html(&viewer.theme_color)
        )?;
        html.push_str("<meta name=\"apple-mobile-web-app-capable\" content=\"yes\">\n");
        html.push_str(
            "<meta name=\"apple-mobile-web-app-status-bar-style\" content=\"black-translucent\">\n",
        );
        html.push_str("<meta name=\"apple-mobile-web-app-title\" content=\"HTML-GO\">\n");

        for href in &self.stylesheets {
            writeln!(html, "<link rel=\"stylesheet\" href=\"{}\">", escape_html(href))?;
        }
        for css in &self.styles {
            writeln!(html, "<style>{css}</style>")?;
        }
        for script in &self.head_scripts {
            write_script(&mut html, script)?;
        }
        html.push_str("</head>\n<body>\n");
        html.push_str(body);
        html.push('\n');
        for script in &self.body_scripts {
            write_script(&mut html, script)?;
        }
        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}

fn write_script(html: &mut String, script: &Script<'_>) -> fmt::Result {
    match script {
        Script::Src(src) => writeln!(html, "<script src=\"{}\"></script>", escape_html(src)),
        Script::Inline(js) => writeln!(html, "<script>{js}</script>"),
    }
}
