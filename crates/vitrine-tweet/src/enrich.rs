//! Tweet text enrichment.
//!
//! Entity indices count Unicode code points, not bytes, so the text is
//! sliced over a `char` vector.

use crate::model::Tweet;

/// One segment of enriched tweet text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextToken {
    /// Plain text (may contain newlines)
    Text(String),
    Hashtag { text: String, url: String },
    Mention { screen_name: String, url: String },
    Url { display: String, href: String },
}

struct Span {
    start: usize,
    end: usize,
    token: TextToken,
}

/// Slice a tweet's text into tokens using its entity indices and display
/// range.
///
/// Entities outside the display range are dropped; overlapping entities keep
/// the earlier one. Malformed indices are clamped rather than rejected.
pub fn enrich_text(tweet: &Tweet) -> Vec<TextToken> {
    let chars: Vec<char> = tweet.text.chars().collect();
    let (range_start, range_end) = match tweet.display_text_range {
        Some([start, end]) => (start.min(chars.len()), end.min(chars.len())),
        None => (0, chars.len()),
    };

    let mut spans = collect_spans(tweet);
    spans.retain(|span| span.start >= range_start && span.end <= range_end);
    spans.sort_by_key(|span| span.start);

    let mut tokens = Vec::new();
    let mut cursor = range_start;

    for span in spans {
        if span.start < cursor || span.end < span.start {
            continue;
        }
        push_text(&mut tokens, &chars, cursor, span.start);
        tokens.push(span.token);
        cursor = span.end;
    }
    push_text(&mut tokens, &chars, cursor, range_end);

    tokens
}

fn collect_spans(tweet: &Tweet) -> Vec<Span> {
    let mut spans = Vec::new();

    for tag in &tweet.entities.hashtags {
        spans.push(Span {
            start: tag.indices[0],
            end: tag.indices[1],
            token: TextToken::Hashtag {
                text: tag.text.clone(),
                url: format!("https://x.com/hashtag/{}", tag.text),
            },
        });
    }

    for symbol in &tweet.entities.symbols {
        spans.push(Span {
            start: symbol.indices[0],
            end: symbol.indices[1],
            token: TextToken::Hashtag {
                text: symbol.text.clone(),
                url: format!("https://x.com/search?q=%24{}", symbol.text),
            },
        });
    }

    for mention in &tweet.entities.user_mentions {
        spans.push(Span {
            start: mention.indices[0],
            end: mention.indices[1],
            token: TextToken::Mention {
                screen_name: mention.screen_name.clone(),
                url: format!("https://x.com/{}", mention.screen_name),
            },
        });
    }

    for url in &tweet.entities.urls {
        let display = if url.display_url.is_empty() {
            url.url.clone()
        } else {
            url.display_url.clone()
        };
        let href = if url.expanded_url.is_empty() {
            url.url.clone()
        } else {
            url.expanded_url.clone()
        };
        spans.push(Span {
            start: url.indices[0],
            end: url.indices[1],
            token: TextToken::Url { display, href },
        });
    }

    spans
}

fn push_text(tokens: &mut Vec<TextToken>, chars: &[char], start: usize, end: usize) {
    if start >= end {
        return;
    }
    let text: String = chars[start..end].iter().collect();
    tokens.push(TextToken::Text(text));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MentionEntity, TagEntity, TweetEntities, TweetUser, UrlEntity};
    use pretty_assertions::assert_eq;

    fn tweet(text: &str, entities: TweetEntities, range: Option<[usize; 2]>) -> Tweet {
        Tweet {
            id_str: "1".to_string(),
            text: text.to_string(),
            created_at: None,
            user: TweetUser {
                name: "Test".to_string(),
                screen_name: "test".to_string(),
                profile_image_url_https: String::new(),
                verified: false,
                is_blue_verified: false,
            },
            favorite_count: 0,
            conversation_count: 0,
            display_text_range: range,
            entities,
            in_reply_to_screen_name: None,
            quoted_tweet: None,
        }
    }

    #[test]
    fn plain_text_stays_a_single_token() {
        let tokens = enrich_text(&tweet("just some words", TweetEntities::default(), None));
        assert_eq!(tokens, vec![TextToken::Text("just some words".to_string())]);
    }

    #[test]
    fn slices_hashtags_mentions_and_urls() {
        let entities = TweetEntities {
            hashtags: vec![TagEntity {
                indices: [6, 11],
                text: "rust".to_string(),
            }],
            user_mentions: vec![MentionEntity {
                indices: [12, 19],
                screen_name: "ferris".to_string(),
            }],
            urls: vec![UrlEntity {
                indices: [20, 36],
                url: "https://t.co/abc".to_string(),
                display_url: "example.com".to_string(),
                expanded_url: "https://example.com".to_string(),
            }],
            symbols: vec![],
        };

        let tokens = enrich_text(&tweet(
            "hello #rust @ferris https://t.co/abc",
            entities,
            None,
        ));

        assert_eq!(
            tokens,
            vec![
                TextToken::Text("hello ".to_string()),
                TextToken::Hashtag {
                    text: "rust".to_string(),
                    url: "https://x.com/hashtag/rust".to_string(),
                },
                TextToken::Text(" ".to_string()),
                TextToken::Mention {
                    screen_name: "ferris".to_string(),
                    url: "https://x.com/ferris".to_string(),
                },
                TextToken::Text(" ".to_string()),
                TextToken::Url {
                    display: "example.com".to_string(),
                    href: "https://example.com".to_string(),
                },
            ]
        );
    }

    #[test]
    fn indices_count_code_points_not_bytes() {
        // "héllo " is 6 code points but 7 bytes.
        let entities = TweetEntities {
            hashtags: vec![TagEntity {
                indices: [6, 11],
                text: "rust".to_string(),
            }],
            ..TweetEntities::default()
        };

        let tokens = enrich_text(&tweet("héllo #rust", entities, None));

        assert_eq!(tokens[0], TextToken::Text("héllo ".to_string()));
        assert!(matches!(tokens[1], TextToken::Hashtag { .. }));
    }

    #[test]
    fn display_range_trims_trailing_media_links() {
        let entities = TweetEntities {
            urls: vec![UrlEntity {
                indices: [6, 22],
                url: "https://t.co/pic".to_string(),
                display_url: "pic.x.com".to_string(),
                expanded_url: String::new(),
            }],
            ..TweetEntities::default()
        };

        let tokens = enrich_text(&tweet("photo https://t.co/pic", entities, Some([0, 5])));

        assert_eq!(tokens, vec![TextToken::Text("photo".to_string())]);
    }

    #[test]
    fn out_of_bounds_indices_are_clamped() {
        let tokens = enrich_text(&tweet("short", TweetEntities::default(), Some([0, 400])));
        assert_eq!(tokens, vec![TextToken::Text("short".to_string())]);
    }
}
