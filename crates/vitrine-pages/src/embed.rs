//! Tweet embed blocks.
//!
//! A fenced code block whose info string starts with `tweet` embeds a tweet
//! widget. Options follow on the info string (`theme=dark`, `isolated`); the
//! body carries the tweet id on its first line and an optional
//! `fallback: <text>` line.

use std::str::FromStr;

use vitrine_isolate::ThemeMode;

/// One parsed ```tweet block.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbedBlock {
    /// Tweet id resolved through the provider
    pub id: String,
    /// Requested theme mode (default `auto`)
    pub theme: ThemeMode,
    /// Whether to render behind an isolation boundary
    pub isolated: bool,
    /// Text shown when the id resolves to nothing
    pub fallback: Option<String>,
}

/// Errors that can occur when parsing an embed block.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("tweet block is missing an id on its first line")]
    MissingId,

    #[error("unknown theme mode: {0}")]
    UnknownTheme(String),

    #[error("unknown tweet block option: {0}")]
    UnknownOption(String),
}

/// Whether a fenced block's info string marks a tweet embed.
pub fn is_embed_info(info: &str) -> bool {
    matches!(info.split_whitespace().next(), Some("tweet"))
}

impl EmbedBlock {
    /// Parse a block from its info string and body.
    pub fn parse(info: &str, body: &str) -> Result<Self, EmbedError> {
        let mut theme = ThemeMode::Auto;
        let mut isolated = false;

        for option in info.split_whitespace().skip(1) {
            match option.split_once('=') {
                Some(("theme", value)) => {
                    theme = ThemeMode::from_str(value)
                        .map_err(|_| EmbedError::UnknownTheme(value.to_string()))?;
                }
                Some(("isolated", value)) => {
                    isolated = value != "false";
                }
                None if option == "isolated" => isolated = true,
                _ => return Err(EmbedError::UnknownOption(option.to_string())),
            }
        }

        let mut lines = body.lines();
        let id = lines
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or(EmbedError::MissingId)?
            .to_string();

        let fallback = body.lines().map(str::trim).find_map(|line| {
            line.strip_prefix("fallback:")
                .map(|text| text.trim().to_string())
        });

        Ok(Self {
            id,
            theme,
            isolated,
            fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn recognizes_tweet_info_strings() {
        assert!(is_embed_info("tweet"));
        assert!(is_embed_info("tweet theme=dark isolated"));
        assert!(!is_embed_info("rust"));
        assert!(!is_embed_info(""));
    }

    #[test]
    fn parses_a_bare_block() {
        let block = EmbedBlock::parse("tweet", "standard\n").unwrap();

        assert_eq!(block.id, "standard");
        assert_eq!(block.theme, ThemeMode::Auto);
        assert!(!block.isolated);
        assert!(block.fallback.is_none());
    }

    #[test]
    fn parses_options_and_fallback() {
        let block = EmbedBlock::parse(
            "tweet theme=dark isolated",
            "quoted\nfallback: Post unavailable right now\n",
        )
        .unwrap();

        assert_eq!(block.id, "quoted");
        assert_eq!(block.theme, ThemeMode::Dark);
        assert!(block.isolated);
        assert_eq!(block.fallback.as_deref(), Some("Post unavailable right now"));
    }

    #[test]
    fn isolated_can_be_switched_off_explicitly() {
        let block = EmbedBlock::parse("tweet isolated=false", "standard").unwrap();
        assert!(!block.isolated);
    }

    #[test]
    fn rejects_empty_bodies_and_unknown_options() {
        assert!(matches!(
            EmbedBlock::parse("tweet", "\n  \n"),
            Err(EmbedError::MissingId)
        ));
        assert!(matches!(
            EmbedBlock::parse("tweet theme=sepia", "standard"),
            Err(EmbedError::UnknownTheme(_))
        ));
        assert!(matches!(
            EmbedBlock::parse("tweet autoplay", "standard"),
            Err(EmbedError::UnknownOption(_))
        ));
    }
}
