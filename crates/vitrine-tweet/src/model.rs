//! Syndication-shaped tweet data model.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;

/// A tweet as delivered by the syndication JSON shape.
///
/// Unknown fields are ignored so fixtures may carry the full upstream payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Tweet {
    pub id_str: String,
    pub text: String,

    #[serde(default)]
    pub created_at: Option<String>,

    pub user: TweetUser,

    #[serde(default)]
    pub favorite_count: u64,

    #[serde(default)]
    pub conversation_count: u64,

    /// Code-point range of the displayable slice of `text`
    #[serde(default)]
    pub display_text_range: Option<[usize; 2]>,

    #[serde(default)]
    pub entities: TweetEntities,

    #[serde(default)]
    pub in_reply_to_screen_name: Option<String>,

    #[serde(default)]
    pub quoted_tweet: Option<Box<Tweet>>,
}

impl Tweet {
    /// Permalink of this tweet.
    pub fn url(&self) -> String {
        format!(
            "https://x.com/{}/status/{}",
            self.user.screen_name, self.id_str
        )
    }

    /// Parsed creation time, accepting both RFC 3339 and the legacy
    /// `Tue Mar 21 20:50:14 +0000 2023` format.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        let raw = self.created_at.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%a %b %d %H:%M:%S %z %Y"))
            .ok()
    }

    /// Creation time formatted for the widget footer.
    pub fn formatted_created_at(&self) -> Option<String> {
        self.created_at()
            .map(|time| time.format("%-I:%M %p · %b %-d, %Y").to_string())
    }
}

/// The tweet's author.
#[derive(Debug, Clone, Deserialize)]
pub struct TweetUser {
    pub name: String,
    pub screen_name: String,

    #[serde(default)]
    pub profile_image_url_https: String,

    #[serde(default)]
    pub verified: bool,

    #[serde(default)]
    pub is_blue_verified: bool,
}

impl TweetUser {
    /// Whether to show a verified badge.
    pub fn is_verified(&self) -> bool {
        self.verified || self.is_blue_verified
    }

    /// Profile permalink.
    pub fn url(&self) -> String {
        format!("https://x.com/{}", self.screen_name)
    }
}

/// Entity index lists carried alongside the tweet text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TweetEntities {
    #[serde(default)]
    pub hashtags: Vec<TagEntity>,

    #[serde(default)]
    pub urls: Vec<UrlEntity>,

    #[serde(default)]
    pub user_mentions: Vec<MentionEntity>,

    #[serde(default)]
    pub symbols: Vec<TagEntity>,
}

/// A hashtag or cashtag symbol entity.
#[derive(Debug, Clone, Deserialize)]
pub struct TagEntity {
    /// Code-point [start, end) into the tweet text
    pub indices: [usize; 2],
    pub text: String,
}

/// A shortened URL entity.
#[derive(Debug, Clone, Deserialize)]
pub struct UrlEntity {
    pub indices: [usize; 2],
    pub url: String,

    #[serde(default)]
    pub display_url: String,

    #[serde(default)]
    pub expanded_url: String,
}

/// A user-mention entity.
#[derive(Debug, Clone, Deserialize)]
pub struct MentionEntity {
    pub indices: [usize; 2],
    pub screen_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIXTURE: &str = r#"{
        "__typename": "Tweet",
        "id_str": "1234567890",
        "text": "Just shipped #rust support! https://t.co/abc @ferris",
        "created_at": "Tue Mar 21 20:50:14 +0000 2023",
        "user": {
            "name": "Vitrine",
            "screen_name": "vitrine",
            "profile_image_url_https": "https://pbs.example.com/avatar.jpg",
            "verified": false,
            "is_blue_verified": true
        },
        "favorite_count": 42,
        "conversation_count": 5,
        "display_text_range": [0, 52],
        "entities": {
            "hashtags": [{ "indices": [13, 18], "text": "rust" }],
            "urls": [{
                "indices": [28, 44],
                "url": "https://t.co/abc",
                "display_url": "example.com",
                "expanded_url": "https://example.com"
            }],
            "user_mentions": [{ "indices": [45, 52], "screen_name": "ferris" }],
            "symbols": []
        },
        "lang": "en"
    }"#;

    #[test]
    fn deserializes_the_fixture_shape() {
        let tweet: Tweet = serde_json::from_str(FIXTURE).unwrap();

        assert_eq!(tweet.id_str, "1234567890");
        assert_eq!(tweet.user.screen_name, "vitrine");
        assert!(tweet.user.is_verified());
        assert_eq!(tweet.favorite_count, 42);
        assert_eq!(tweet.entities.hashtags.len(), 1);
        assert_eq!(tweet.entities.urls[0].display_url, "example.com");
        assert_eq!(tweet.display_text_range, Some([0, 52]));
        assert!(tweet.quoted_tweet.is_none());
    }

    #[test]
    fn ignores_unknown_fields() {
        // __typename and lang above are not part of the model.
        assert!(serde_json::from_str::<Tweet>(FIXTURE).is_ok());
    }

    #[test]
    fn parses_legacy_and_rfc3339_timestamps() {
        let mut tweet: Tweet = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(
            tweet.formatted_created_at().as_deref(),
            Some("8:50 PM · Mar 21, 2023")
        );

        tweet.created_at = Some("2023-03-21T20:50:14+00:00".to_string());
        assert_eq!(
            tweet.formatted_created_at().as_deref(),
            Some("8:50 PM · Mar 21, 2023")
        );

        tweet.created_at = Some("not a date".to_string());
        assert!(tweet.formatted_created_at().is_none());
    }

    #[test]
    fn builds_permalinks() {
        let tweet: Tweet = serde_json::from_str(FIXTURE).unwrap();

        assert_eq!(tweet.url(), "https://x.com/vitrine/status/1234567890");
        assert_eq!(tweet.user.url(), "https://x.com/vitrine");
    }
}
