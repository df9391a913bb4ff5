//! Tweet widgets for vitrine.
//!
//! Provides the syndication-shaped tweet data model, text-entity enrichment,
//! the presentational widgets (card, skeleton, not-found), tweet providers,
//! the widget theme stylesheet, and the isolated-embed wrapper that mounts a
//! tweet behind a style-isolation boundary.

pub mod enrich;
pub mod isolated;
pub mod model;
pub mod provider;
pub mod theme;
pub mod widgets;

pub use enrich::{enrich_text, TextToken};
pub use isolated::{IsolatedTweet, IsolatedTweetProps};
pub use model::{MentionEntity, TagEntity, Tweet, TweetEntities, TweetUser, UrlEntity};
pub use provider::{FixtureProvider, MemoryProvider, ProviderError, TweetProvider};
pub use theme::theme_css;
pub use widgets::{EmbeddedTweet, TweetNotFound, TweetSkeleton};
