//! Demo page rendering.
//!
//! Each page renders against a private [`Document`] carrying the widget
//! theme stylesheet, so parallel builds share nothing. Isolated blocks go
//! through the isolated-embed wrapper and serialize as declarative
//! shadow-DOM templates; plain blocks render the card in the page flow with
//! the resolved theme on a wrapper element.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};

use vitrine_dom::Document;
use vitrine_isolate::resolve_theme;
use vitrine_tweet::{
    theme_css, EmbeddedTweet, IsolatedTweet, IsolatedTweetProps, TweetNotFound, TweetProvider,
};

use crate::embed::{is_embed_info, EmbedBlock};
use crate::meta::{extract_meta, PageMeta};
use crate::parser::{markdown_options, PageError};

/// A fully rendered demo page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// Parsed frontmatter (if present)
    pub meta: Option<PageMeta>,

    /// Page body HTML, embeds spliced in place of their blocks
    pub html: String,

    /// Number of tweet embeds rendered
    pub embeds: usize,
}

/// Render a demo page's content to HTML, resolving embeds through the
/// provider.
pub fn render_content(
    source: &str,
    provider: &dyn TweetProvider,
) -> Result<RenderedPage, PageError> {
    let (meta, content) = extract_meta(source)?;

    let mut doc = Document::new();
    doc.install_style_source(theme_css());

    let mut events: Vec<Event> = Vec::new();
    let mut pending: Option<(String, String)> = None;
    let mut embeds = 0;

    for event in Parser::new_ext(content, markdown_options()) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if is_embed_info(&info) =>
            {
                pending = Some((info.to_string(), String::new()));
            }
            Event::Text(text) if pending.is_some() => {
                if let Some((_, body)) = pending.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) if pending.is_some() => {
                let (info, body) = pending.take().unwrap_or_default();
                let block = EmbedBlock::parse(&info, &body)?;
                let rendered = render_embed(&mut doc, provider, &block);
                embeds += 1;
                events.push(Event::Html(CowStr::from(rendered)));
            }
            other => {
                if pending.is_none() {
                    events.push(other);
                }
            }
        }
    }

    let mut out = String::new();
    html::push_html(&mut out, events.into_iter());

    Ok(RenderedPage {
        meta,
        html: out,
        embeds,
    })
}

fn render_embed(doc: &mut Document, provider: &dyn TweetProvider, block: &EmbedBlock) -> String {
    let root = doc.root();

    if block.isolated {
        let embed = IsolatedTweet::mount(
            doc,
            root,
            provider,
            &IsolatedTweetProps {
                id: block.id.clone(),
                theme: block.theme,
                class_name: Some("tweet-embed".to_string()),
                style: None,
                fallback: block.fallback.clone(),
            },
        );
        return doc.outer_html(embed.host());
    }

    let wrapper = doc.create_element("div");
    let _ = doc.set_attribute(wrapper, "class", "tweet-embed");
    let theme = resolve_theme(doc, block.theme);
    let _ = doc.set_attribute(wrapper, "data-theme", theme.as_str());

    let card = match provider.tweet(&block.id) {
        Ok(Some(tweet)) => EmbeddedTweet::render(doc, &tweet),
        Ok(None) => TweetNotFound::render(doc, block.fallback.as_deref()),
        Err(err) => {
            tracing::warn!("failed to resolve tweet {}: {}", block.id, err);
            TweetNotFound::render(doc, block.fallback.as_deref())
        }
    };
    let _ = doc.append_child(wrapper, card);
    let _ = doc.append_child(root, wrapper);

    doc.outer_html(wrapper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_tweet::{MemoryProvider, Tweet};

    fn provider() -> MemoryProvider {
        let tweet: Tweet = serde_json::from_str(
            r#"{
                "id_str": "standard",
                "text": "hello from the gallery",
                "user": { "name": "Vitrine", "screen_name": "vitrine" }
            }"#,
        )
        .unwrap();
        [tweet].into_iter().collect()
    }

    #[test]
    fn splices_plain_embeds_into_the_page_flow() {
        let source = "# Gallery\n\n```tweet theme=dark\nstandard\n```\n\nDone.\n";

        let page = render_content(source, &provider()).unwrap();

        assert_eq!(page.embeds, 1);
        assert!(page.html.contains("<h1>Gallery</h1>"));
        assert!(page.html.contains("hello from the gallery"));
        assert!(page.html.contains(r#"data-theme="dark""#));
        assert!(!page.html.contains("shadowrootmode"));
        assert!(page.html.contains("<p>Done.</p>"));
    }

    #[test]
    fn isolated_embeds_serialize_as_declarative_templates() {
        let source = "```tweet isolated\nstandard\n```\n";

        let page = render_content(source, &provider()).unwrap();

        assert!(page.html.contains("<template shadowrootmode=\"open\">"));
        // The widget stylesheet was cloned into the boundary.
        assert!(page.html.contains("--tweet-bg"));
        assert!(page.html.contains("hello from the gallery"));
    }

    #[test]
    fn missing_tweets_fall_back_without_failing_the_page() {
        let source = "```tweet\nmissing\nfallback: Not available\n```\n";

        let page = render_content(source, &provider()).unwrap();

        assert_eq!(page.embeds, 1);
        assert!(page.html.contains("Not available"));
    }

    #[test]
    fn keeps_frontmatter_out_of_the_rendered_body() {
        let source = "---\ntitle: Demo\n---\n\n# Demo\n";

        let page = render_content(source, &provider()).unwrap();

        assert_eq!(page.meta.unwrap().title, "Demo");
        assert!(!page.html.contains("title:"));
    }
}
