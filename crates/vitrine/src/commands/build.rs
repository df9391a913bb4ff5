//! Static site build command.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;
use vitrine_static::{BuildConfig, SiteBuilder};

/// Configuration file structure (embeds.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    pages: PagesConfig,
    #[serde(default)]
    fixtures: FixturesConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PagesConfig {
    dir: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FixturesConfig {
    dir: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BuildSettings {
    output: String,
    minify: bool,
    title: String,
    base_url: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            dir: "pages".to_string(),
        }
    }
}

impl Default for FixturesConfig {
    fn default() -> Self {
        Self {
            dir: "fixtures".to_string(),
        }
    }
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: "dist".to_string(),
            minify: true,
            title: "vitrine demos".to_string(),
            base_url: "/".to_string(),
        }
    }
}

/// Load configuration from embeds.toml if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config() -> Result<ConfigFile> {
    let config_path = PathBuf::from("embeds.toml");
    if config_path.exists() {
        let content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read embeds.toml: {}", e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse embeds.toml: {}", e))?;
        tracing::info!("Loaded config from embeds.toml");
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Run the build command.
pub async fn run(output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building demo site...");

    let file_config = load_config()?;

    let config = BuildConfig {
        pages_dir: PathBuf::from(&file_config.pages.dir),
        fixtures_dir: PathBuf::from(&file_config.fixtures.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.build.output)),
        minify: minify.unwrap_or(file_config.build.minify),
        base_url: file_config.build.base_url,
        title: file_config.build.title,
    };

    let result = SiteBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages with {} embeds in {}ms",
        result.pages,
        result.embeds,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            [pages]
            dir = "demos"

            [fixtures]
            dir = "tweets"

            [build]
            output = "public"
            minify = false
            title = "My embeds"
            base_url = "/embeds/"
            "#,
        )
        .unwrap();

        assert_eq!(config.pages.dir, "demos");
        assert_eq!(config.fixtures.dir, "tweets");
        assert_eq!(config.build.output, "public");
        assert!(!config.build.minify);
        assert_eq!(config.build.title, "My embeds");
        assert_eq!(config.build.base_url, "/embeds/");
    }

    #[test]
    fn missing_tables_fall_back_to_defaults() {
        let config: ConfigFile = toml::from_str("[pages]\ndir = \"pages\"\n").unwrap();

        assert_eq!(config.fixtures.dir, "fixtures");
        assert_eq!(config.build.output, "dist");
        assert!(config.build.minify);
    }
}
