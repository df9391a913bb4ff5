//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use vitrine_pages::{parse_page, render_content, PageMeta};
use vitrine_tweet::FixtureProvider;

use crate::assets::AssetPipeline;
use crate::templates::{NavItem, PageContext, TemplateEngine};

/// Configuration for building the demo site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory containing demo pages
    pub pages_dir: PathBuf,

    /// Directory containing tweet fixtures
    pub fixtures_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from("pages"),
            fixtures_dir: PathBuf::from("fixtures"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "vitrine demos".to_string(),
        }
    }
}

/// Result of a build.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of pages generated
    pub pages: usize,

    /// Number of tweet embeds rendered
    pub embeds: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read pages directory: {0}")]
    ReadError(String),

    #[error("Failed to parse page {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A page queued for building.
#[derive(Debug)]
struct PageInfo {
    source: String,
    meta: Option<PageMeta>,
    slug: String,
    output_path: PathBuf,
}

/// Static demo site builder.
pub struct SiteBuilder {
    config: BuildConfig,
    provider: Arc<FixtureProvider>,
    templates: TemplateEngine,
}

impl SiteBuilder {
    /// Create a builder for a configuration.
    pub fn new(config: BuildConfig) -> Self {
        let provider = Arc::new(FixtureProvider::new(&config.fixtures_dir));
        Self {
            config,
            provider,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.discover_pages()?;
        let nav = self.build_navigation(&pages);

        let results: Vec<Result<usize, BuildError>> = pages
            .par_iter()
            .map(|page| self.build_page(page, &nav))
            .collect();

        let mut total_embeds = 0;
        for result in results {
            total_embeds += result?;
        }

        self.generate_assets()?;
        self.generate_sitemap(&pages)?;

        Ok(BuildResult {
            pages: pages.len(),
            embeds: total_embeds,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover demo pages, sorted by frontmatter order.
    fn discover_pages(&self) -> Result<Vec<PageInfo>, BuildError> {
        if !self.config.pages_dir.exists() {
            return Err(BuildError::ReadError(format!(
                "Pages directory not found: {}",
                self.config.pages_dir.display()
            )));
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(&self.config.pages_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let source = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let parsed = parse_page(&source).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("index")
                .to_string();
            let slug = parsed
                .meta
                .as_ref()
                .and_then(|meta| meta.slug.clone())
                .unwrap_or(stem);

            let output_path = if slug == "index" {
                self.config.output_dir.join("index.html")
            } else {
                self.config.output_dir.join(&slug).join("index.html")
            };

            pages.push(PageInfo {
                source,
                meta: parsed.meta,
                slug,
                output_path,
            });
        }

        pages.sort_by_key(|page| page.meta.as_ref().and_then(|m| m.order).unwrap_or(999));
        Ok(pages)
    }

    /// Build navigation entries from page frontmatter.
    fn build_navigation(&self, pages: &[PageInfo]) -> Vec<NavItem> {
        pages
            .iter()
            .filter(|page| page.meta.as_ref().map(|m| m.nav).unwrap_or(true))
            .map(|page| NavItem {
                title: page
                    .meta
                    .as_ref()
                    .map(|m| m.title.clone())
                    .unwrap_or_else(|| page.slug.clone()),
                path: self.slug_url(&page.slug),
                active: false,
            })
            .collect()
    }

    fn slug_url(&self, slug: &str) -> String {
        if slug == "index" {
            self.config.base_url.clone()
        } else {
            format!("{}{}/", self.config.base_url, slug)
        }
    }

    /// Build a single page. Returns the number of embeds rendered.
    fn build_page(&self, page: &PageInfo, nav: &[NavItem]) -> Result<usize, BuildError> {
        let rendered =
            render_content(&page.source, self.provider.as_ref()).map_err(|e| {
                BuildError::ParseError {
                    path: page.slug.clone(),
                    message: e.to_string(),
                }
            })?;

        let mut nav = nav.to_vec();
        let own_url = self.slug_url(&page.slug);
        for item in &mut nav {
            item.active = item.path == own_url;
        }

        let ctx = PageContext {
            title: page
                .meta
                .as_ref()
                .map(|m| m.title.clone())
                .unwrap_or_else(|| "Untitled".to_string()),
            site_title: self.config.title.clone(),
            description: page.meta.as_ref().and_then(|m| m.description.clone()),
            content: rendered.html,
            nav,
            base_url: self.config.base_url.clone(),
            styles: vec![
                format!("{}assets/site.css", self.config.base_url),
                format!("{}assets/tweet-theme.css", self.config.base_url),
            ],
            scripts: vec![],
        };

        let html = self
            .templates
            .render_page(&ctx)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        if let Some(parent) = page.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }
        fs::write(&page.output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!("built {} ({} embeds)", page.slug, rendered.embeds);
        Ok(rendered.embeds)
    }

    /// Write the site and widget stylesheets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        for (name, css) in [
            ("site.css", AssetPipeline::site_css()),
            ("tweet-theme.css", AssetPipeline::widget_css()),
        ] {
            let css = if self.config.minify {
                AssetPipeline::minify_css(&css).unwrap_or(css)
            } else {
                css
            };
            fs::write(assets_dir.join(name), css)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        Ok(())
    }

    /// Write sitemap.xml and robots.txt.
    fn generate_sitemap(&self, pages: &[PageInfo]) -> Result<(), BuildError> {
        let urls: Vec<String> = pages
            .iter()
            .map(|page| {
                format!(
                    "  <url>\n    <loc>{}{}</loc>\n  </url>",
                    self.config.base_url.trim_end_matches('/'),
                    self.slug_url(&page.slug)
                )
            })
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const TWEET_JSON: &str = r#"{
        "id_str": "standard",
        "text": "hello from the static build",
        "user": { "name": "Vitrine", "screen_name": "vitrine" }
    }"#;

    fn scaffold(temp: &Path) -> BuildConfig {
        let pages = temp.join("pages");
        let fixtures = temp.join("fixtures");
        fs::create_dir_all(&pages).unwrap();
        fs::create_dir_all(&fixtures).unwrap();
        fs::write(fixtures.join("standard.json"), TWEET_JSON).unwrap();

        BuildConfig {
            pages_dir: pages,
            fixtures_dir: fixtures,
            output_dir: temp.join("dist"),
            minify: false,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn builds_a_site_with_an_isolated_embed() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::write(
            config.pages_dir.join("index.md"),
            "---\ntitle: Gallery\norder: 1\n---\n\n# Gallery\n\n```tweet isolated\nstandard\n```\n",
        )
        .unwrap();

        let result = SiteBuilder::new(config.clone()).build().await.unwrap();

        assert_eq!(result.pages, 1);
        assert_eq!(result.embeds, 1);

        let html = fs::read_to_string(config.output_dir.join("index.html")).unwrap();
        assert!(html.contains("<template shadowrootmode=\"open\">"));
        assert!(html.contains("hello from the static build"));
        assert!(config.output_dir.join("assets/site.css").exists());
        assert!(config.output_dir.join("assets/tweet-theme.css").exists());
    }

    #[tokio::test]
    async fn slugged_pages_land_in_their_own_directories() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::write(
            config.pages_dir.join("isolation.md"),
            "---\ntitle: Isolation\n---\n\n# Isolation demo\n",
        )
        .unwrap();

        SiteBuilder::new(config.clone()).build().await.unwrap();

        let html =
            fs::read_to_string(config.output_dir.join("isolation").join("index.html")).unwrap();
        assert!(html.contains("Isolation demo"));
    }

    #[tokio::test]
    async fn writes_sitemap_and_robots() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::write(
            config.pages_dir.join("index.md"),
            "---\ntitle: Home\n---\n\n# Home\n",
        )
        .unwrap();

        SiteBuilder::new(config.clone()).build().await.unwrap();

        let sitemap = fs::read_to_string(config.output_dir.join("sitemap.xml")).unwrap();
        assert!(sitemap.contains("<loc>/</loc>"));
        assert!(config.output_dir.join("robots.txt").exists());
    }

    #[tokio::test]
    async fn nav_orders_pages_by_frontmatter() {
        let temp = tempdir().unwrap();
        let config = scaffold(temp.path());
        fs::write(
            config.pages_dir.join("second.md"),
            "---\ntitle: Second\norder: 2\n---\n\nB\n",
        )
        .unwrap();
        fs::write(
            config.pages_dir.join("first.md"),
            "---\ntitle: First\norder: 1\n---\n\nA\n",
        )
        .unwrap();

        SiteBuilder::new(config.clone()).build().await.unwrap();

        let html =
            fs::read_to_string(config.output_dir.join("first").join("index.html")).unwrap();
        let first = html.find(">First<").unwrap();
        let second = html.find(">Second<").unwrap();
        assert!(first < second);
    }
}
