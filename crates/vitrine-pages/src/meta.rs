//! Page frontmatter.

use serde::Deserialize;

/// YAML frontmatter of a demo page.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PageMeta {
    /// Page title (required)
    pub title: String,

    /// Short description for the page header and sitemap
    #[serde(default)]
    pub description: Option<String>,

    /// Order in navigation (lower = first)
    #[serde(default)]
    pub order: Option<i32>,

    /// Whether to show in navigation
    #[serde(default = "default_true")]
    pub nav: bool,

    /// Custom slug override
    #[serde(default)]
    pub slug: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Errors that can occur when reading frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum MetaError {
    #[error("unclosed frontmatter block, missing closing ---")]
    Unclosed,

    #[error("invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),
}

/// Split a page into its frontmatter and the markdown that follows.
///
/// A page without a leading `---` fence simply has no frontmatter.
pub fn extract_meta(source: &str) -> Result<(Option<PageMeta>, &str), MetaError> {
    let trimmed = source.trim_start();
    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close) = after_open.find("\n---") else {
        return Err(MetaError::Unclosed);
    };

    let yaml = after_open[..close].trim();
    let rest = &after_open[close + 4..];

    let meta: PageMeta =
        serde_yaml::from_str(yaml).map_err(|e| MetaError::InvalidYaml(e.to_string()))?;

    Ok((Some(meta), rest.trim_start()))
}
