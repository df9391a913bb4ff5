//! Asset pipeline for the demo shells.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// CSS for the demo site shell (layout, sidebar, typography).
    pub fn site_css() -> String {
        SITE_CSS.to_string()
    }

    /// The widget theme stylesheet served as its own asset.
    pub fn widget_css() -> String {
        vitrine_tweet::theme_css().to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const SITE_CSS: &str = r#"/* vitrine demo shell */

:root {
  --sidebar-width: 240px;
  --content-max-width: 680px;
  --shell-bg: #ffffff;
  --shell-fg: #111111;
  --shell-muted: #f4f4f5;
  --shell-border: #e4e4e7;
  --shell-accent: #1d9bf0;
}

:root.dark,
:root[data-theme="dark"] {
  --shell-bg: #0b0f14;
  --shell-fg: #e7e9ea;
  --shell-muted: #161b22;
  --shell-border: #2b3440;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--shell-bg);
  color: var(--shell-fg);
  line-height: 1.6;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: 100vh;
}

.sidebar {
  background: var(--shell-muted);
  border-right: 1px solid var(--shell-border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-logo {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--shell-fg);
  text-decoration: none;
}

.nav-list {
  list-style: none;
  margin-top: 1.5rem;
}

.nav-item a {
  display: block;
  padding: 0.5rem 0.75rem;
  color: var(--shell-fg);
  text-decoration: none;
  border-radius: 0.375rem;
}

.nav-item a:hover {
  background: var(--shell-border);
}

.nav-item.active > a {
  background: var(--shell-accent);
  color: #ffffff;
}

.main {
  padding: 2.5rem;
}

.page {
  max-width: var(--content-max-width);
  margin: 0 auto;
}

.page-description {
  color: #71767b;
  margin-bottom: 1.5rem;
}

.content h1 {
  margin-bottom: 1rem;
}

.content p {
  margin-bottom: 1rem;
}

.content pre {
  background: var(--shell-muted);
  padding: 1rem;
  border-radius: 0.5rem;
  overflow-x: auto;
  margin-bottom: 1rem;
}

.tweet-embed {
  margin: 1.5rem 0;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minifies_the_site_css() {
        let css = AssetPipeline::site_css();
        let minified = AssetPipeline::minify_css(&css).unwrap();

        assert!(minified.len() < css.len());
        assert!(minified.contains(".layout"));
    }

    #[test]
    fn widget_css_matches_the_tweet_theme() {
        assert_eq!(AssetPipeline::widget_css(), vitrine_tweet::theme_css());
    }

    #[test]
    fn rejects_unparseable_css() {
        assert!(AssetPipeline::minify_css("not { valid").is_err());
    }
}
