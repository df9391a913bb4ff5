//! Presentational tweet widgets.
//!
//! Each widget renders into a [`Document`] and returns its root node, so the
//! caller decides where it lands: the page flow or an isolation boundary.

use vitrine_dom::{Document, NodeId};

use crate::enrich::{enrich_text, TextToken};
use crate::model::Tweet;

/// The full tweet card.
pub struct EmbeddedTweet;

impl EmbeddedTweet {
    /// Render a tweet card. The returned node is detached.
    pub fn render(doc: &mut Document, tweet: &Tweet) -> NodeId {
        let container = doc.create_element("div");
        let _ = doc.set_attribute(container, "class", "vitrine-tweet");

        let overlay = doc.create_element("a");
        let _ = doc.set_attribute(overlay, "class", "tweet-overlay");
        let _ = doc.set_attribute(overlay, "href", &tweet.url());
        let _ = doc.set_attribute(overlay, "target", "_blank");
        let _ = doc.set_attribute(overlay, "rel", "noopener noreferrer");
        let _ = doc.set_attribute(overlay, "aria-label", "View post on X");
        let _ = doc.append_child(container, overlay);

        let article = doc.create_element("article");
        let _ = doc.append_child(container, article);

        render_header(doc, article, tweet);
        render_reply_line(doc, article, tweet);
        render_body(doc, article, tweet);

        if let Some(quoted) = &tweet.quoted_tweet {
            let quote = render_quoted(doc, quoted);
            let _ = doc.append_child(article, quote);
        }

        render_footer(doc, article, tweet);

        container
    }
}

/// Loading placeholder.
pub struct TweetSkeleton;

impl TweetSkeleton {
    pub fn render(doc: &mut Document) -> NodeId {
        let container = doc.create_element("div");
        let _ = doc.set_attribute(container, "class", "vitrine-tweet-skeleton");
        let _ = doc.set_attribute(container, "aria-busy", "true");

        for width in ["40%", "100%", "80%"] {
            let bar = doc.create_element("div");
            let _ = doc.set_attribute(bar, "class", "skeleton-bar");
            let _ = doc.set_attribute(bar, "style", &format!("width: {width}"));
            let _ = doc.append_child(container, bar);
        }

        container
    }
}

/// Placeholder for an id that resolved to nothing.
pub struct TweetNotFound;

impl TweetNotFound {
    pub fn render(doc: &mut Document, message: Option<&str>) -> NodeId {
        let container = doc.create_element("div");
        let _ = doc.set_attribute(container, "class", "vitrine-tweet tweet-not-found");

        let p = doc.create_element("p");
        let text = doc.create_text(message.unwrap_or("This post is unavailable."));
        let _ = doc.append_child(p, text);
        let _ = doc.append_child(container, p);

        container
    }
}

fn render_header(doc: &mut Document, parent: NodeId, tweet: &Tweet) {
    let header = doc.create_element("div");
    let _ = doc.set_attribute(header, "class", "tweet-header");

    let avatar_link = doc.create_element("a");
    let _ = doc.set_attribute(avatar_link, "href", &tweet.user.url());
    let avatar = doc.create_element("img");
    let _ = doc.set_attribute(avatar, "class", "tweet-avatar");
    let _ = doc.set_attribute(avatar, "src", &tweet.user.profile_image_url_https);
    let _ = doc.set_attribute(avatar, "alt", &tweet.user.name);
    let _ = doc.append_child(avatar_link, avatar);
    let _ = doc.append_child(header, avatar_link);

    let names = doc.create_element("div");

    let name = doc.create_element("span");
    let _ = doc.set_attribute(name, "class", "tweet-name");
    let name_text = doc.create_text(&tweet.user.name);
    let _ = doc.append_child(name, name_text);
    let _ = doc.append_child(names, name);

    if tweet.user.is_verified() {
        let badge = doc.create_element("span");
        let _ = doc.set_attribute(badge, "class", "tweet-verified");
        let _ = doc.set_attribute(badge, "aria-label", "Verified account");
        let badge_text = doc.create_text("✓");
        let _ = doc.append_child(badge, badge_text);
        let _ = doc.append_child(names, badge);
    }

    let screen_name = doc.create_element("div");
    let _ = doc.set_attribute(screen_name, "class", "tweet-screen-name");
    let screen_name_text = doc.create_text(&format!("@{}", tweet.user.screen_name));
    let _ = doc.append_child(screen_name, screen_name_text);
    let _ = doc.append_child(names, screen_name);

    let _ = doc.append_child(header, names);
    let _ = doc.append_child(parent, header);
}

fn render_reply_line(doc: &mut Document, parent: NodeId, tweet: &Tweet) {
    let Some(screen_name) = &tweet.in_reply_to_screen_name else {
        return;
    };
    let line = doc.create_element("div");
    let _ = doc.set_attribute(line, "class", "tweet-replying-to");
    let text = doc.create_text(&format!("Replying to @{screen_name}"));
    let _ = doc.append_child(line, text);
    let _ = doc.append_child(parent, line);
}

fn render_body(doc: &mut Document, parent: NodeId, tweet: &Tweet) {
    let body = doc.create_element("p");
    let _ = doc.set_attribute(body, "class", "tweet-body");

    for token in enrich_text(tweet) {
        match token {
            TextToken::Text(text) => render_text_with_breaks(doc, body, &text),
            TextToken::Hashtag { text, url } => {
                render_link(doc, body, &format!("#{text}"), &url);
            }
            TextToken::Mention { screen_name, url } => {
                render_link(doc, body, &format!("@{screen_name}"), &url);
            }
            TextToken::Url { display, href } => {
                render_link(doc, body, &display, &href);
            }
        }
    }

    let _ = doc.append_child(parent, body);
}

fn render_text_with_breaks(doc: &mut Document, parent: NodeId, text: &str) {
    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            let br = doc.create_element("br");
            let _ = doc.append_child(parent, br);
        }
        if !line.is_empty() {
            let node = doc.create_text(line);
            let _ = doc.append_child(parent, node);
        }
    }
}

fn render_link(doc: &mut Document, parent: NodeId, label: &str, href: &str) {
    let a = doc.create_element("a");
    let _ = doc.set_attribute(a, "href", href);
    let _ = doc.set_attribute(a, "target", "_blank");
    let _ = doc.set_attribute(a, "rel", "noopener noreferrer");
    let text = doc.create_text(label);
    let _ = doc.append_child(a, text);
    let _ = doc.append_child(parent, a);
}

/// Quoted tweets render as a nested, non-clickable card: header and body
/// only, no overlay link, no footer.
fn render_quoted(doc: &mut Document, tweet: &Tweet) -> NodeId {
    let quoted = doc.create_element("div");
    let _ = doc.set_attribute(quoted, "class", "tweet-quoted");

    render_header(doc, quoted, tweet);
    render_body(doc, quoted, tweet);

    quoted
}

fn render_footer(doc: &mut Document, parent: NodeId, tweet: &Tweet) {
    let footer = doc.create_element("div");
    let _ = doc.set_attribute(footer, "class", "tweet-footer");

    let likes = doc.create_element("span");
    let likes_text = doc.create_text(&format!("{} Likes", format_count(tweet.favorite_count)));
    let _ = doc.append_child(likes, likes_text);
    let _ = doc.append_child(footer, likes);

    let replies = doc.create_element("span");
    let replies_text = doc.create_text(&format!(
        "{} Replies",
        format_count(tweet.conversation_count)
    ));
    let _ = doc.append_child(replies, replies_text);
    let _ = doc.append_child(footer, replies);

    if let Some(date) = tweet.formatted_created_at() {
        let time = doc.create_element("span");
        let time_text = doc.create_text(&date);
        let _ = doc.append_child(time, time_text);
        let _ = doc.append_child(footer, time);
    }

    let _ = doc.append_child(parent, footer);
}

fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, c) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
