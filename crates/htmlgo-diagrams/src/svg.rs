//! Post-processing of SVG returned by Kroki.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static GOOGLE_FONTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@import\s+url\([^)]*fonts\.googleapis\.com[^)]*\)\s*;?").unwrap()
});

/// Root element `width` attribute in pixels.
static SVG_WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(<svg[^>]*\s)width="(\d+(?:\.\d+)?)(?:px)?""#).unwrap());

/// Root element `height` attribute in pixels.
static SVG_HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(<svg[^>]*\s)height="(\d+(?:\.\d+)?)(?:px)?""#).unwrap());

/// Strip web-font `@import` rules so the page makes no font requests.
#[must_use]
pub fn strip_google_fonts_import(svg: &str) -> String {
    GOOGLE_FONTS_RE.replace_all(svg, "").into_owned()
}

/// Shrink the root element's pixel `width`/`height` to fit inside
/// `max_width` x `max_height`, preserving aspect ratio.
///
/// SVGs without both numeric attributes, or already within bounds, are
/// returned unchanged.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn clamp_svg_dimensions(svg: &str, max_width: u32, max_height: u32) -> String {
    let parse = |re: &Regex| -> Option<f64> { re.captures(svg)?.get(2)?.as_str().parse().ok() };
    let (Some(width), Some(height)) = (parse(&SVG_WIDTH_RE), parse(&SVG_HEIGHT_RE)) else {
        return svg.to_owned();
    };
    if width <= 0.0 || height <= 0.0 {
        return svg.to_owned();
    }

    let scale = (f64::from(max_width) / width)
        .min(f64::from(max_height) / height)
        .min(1.0);
    if scale >= 1.0 {
        return svg.to_owned();
    }

    let new_width = (width * scale).round().max(1.0) as u32;
    let new_height = (height * scale).round().max(1.0) as u32;

    let result = SVG_WIDTH_RE.replace(svg, |caps: &Captures| {
        format!(r#"{}width="{new_width}""#, &caps[1])
    });
    let result = SVG_HEIGHT_RE.replace(&result, |caps: &Captures| {
        format!(r#"{}height="{new_height}""#, &caps[1])
    });
    result.into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_strip_google_fonts_import() {
        let svg = "<svg><style>@import url('https://fonts.googleapis.com/css?family=Roboto');\
                   .a{fill:red}</style></svg>";
        assert_eq!(strip_google_fonts_import(svg), "<svg><style>.a{fill:red}</style></svg>");
    }

    #[test]
    fn test_strip_keeps_other_imports() {
        let svg = "<svg><style>@import url('/local.css');</style></svg>";
        assert_eq!(strip_google_fonts_import(svg), svg);
    }

    #[test]
    fn test_clamp_preserves_aspect_ratio() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="1600" height="600"><g/></svg>"#;
        assert_eq!(
            clamp_svg_dimensions(svg, 800, 600),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="300"><g/></svg>"#
        );
    }

    #[test]
    fn test_clamp_uses_tighter_bound() {
        let svg = r#"<svg width="400px" height="1200px"></svg>"#;
        assert_eq!(
            clamp_svg_dimensions(svg, 800, 600),
            r#"<svg width="200" height="600"></svg>"#
        );
    }

    #[test]
    fn test_clamp_within_bounds_unchanged() {
        let svg = r#"<svg width="320" height="240"></svg>"#;
        assert_eq!(clamp_svg_dimensions(svg, 800, 600), svg);
    }

    #[test]
    fn test_clamp_relative_size_unchanged() {
        let svg = r#"<svg width="100%" style="max-width: 2000px;" viewBox="0 0 2000 900"></svg>"#;
        assert_eq!(clamp_svg_dimensions(svg, 800, 600), svg);
    }

    #[test]
    fn test_clamp_ignores_child_elements() {
        let svg = r#"<svg width="1000" height="500"><rect width="1000" height="500"/></svg>"#;
        assert_eq!(
            clamp_svg_dimensions(svg, 800, 600),
            r#"<svg width="800" height="400"><rect width="1000" height="500"/></svg>"#
        );
    }
}
