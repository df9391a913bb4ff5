//! The isolated-embed wrapper.
//!
//! A thin composition over [`IsolationBoundary`] and the standard tweet
//! widgets: it keeps `theme`, `class_name`, `style`, and `fallback` for
//! itself and hands the tweet id to the provider/widget pair.

use vitrine_dom::{Document, NodeId};
use vitrine_isolate::{BoundaryProps, IsolationBoundary, ThemeMode};

use crate::provider::TweetProvider;
use crate::widgets::{EmbeddedTweet, TweetNotFound};

/// Props for [`IsolatedTweet::mount`].
#[derive(Debug, Clone, Default)]
pub struct IsolatedTweetProps {
    /// Tweet id to resolve through the provider
    pub id: String,
    /// Theme mode for the boundary (default `auto`)
    pub theme: ThemeMode,
    /// Class list for the boundary's host element
    pub class_name: Option<String>,
    /// Inline style for the boundary's host element
    pub style: Option<String>,
    /// Text shown when the id resolves to nothing
    pub fallback: Option<String>,
}

/// A tweet card mounted behind a style-isolation boundary.
pub struct IsolatedTweet {
    boundary: IsolationBoundary,
}

impl IsolatedTweet {
    /// Mount under a parent element.
    ///
    /// Provider failures degrade to the fallback/not-found card; they never
    /// propagate out of the embed.
    pub fn mount(
        doc: &mut Document,
        parent: NodeId,
        provider: &dyn TweetProvider,
        props: &IsolatedTweetProps,
    ) -> Self {
        let mut boundary = IsolationBoundary::mount(
            doc,
            parent,
            BoundaryProps {
                theme: props.theme,
                class_name: props.class_name.clone(),
                style: props.style.clone(),
            },
        );

        // In a degraded environment only the host element renders.
        if boundary.target().is_some() {
            let content = render_content(doc, provider, &props.id, props.fallback.as_deref());
            boundary.project(doc, &[content]);
        }

        Self { boundary }
    }

    /// The boundary's outer host element.
    pub fn host(&self) -> NodeId {
        self.boundary.host()
    }

    /// Whether the embed actually rendered behind a boundary.
    pub fn is_isolated(&self) -> bool {
        self.boundary.is_isolated()
    }

    /// Unmount, releasing the boundary and its subscriptions.
    pub fn unmount(self, doc: &mut Document) {
        self.boundary.unmount(doc);
    }
}

fn render_content(
    doc: &mut Document,
    provider: &dyn TweetProvider,
    id: &str,
    fallback: Option<&str>,
) -> NodeId {
    match provider.tweet(id) {
        Ok(Some(tweet)) => EmbeddedTweet::render(doc, &tweet),
        Ok(None) => TweetNotFound::render(doc, fallback),
        Err(err) => {
            tracing::warn!("failed to resolve tweet {}: {}", id, err);
            TweetNotFound::render(doc, fallback)
        }
    }
}
