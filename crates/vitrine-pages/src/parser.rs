//! Demo page parser.

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::embed::{is_embed_info, EmbedBlock, EmbedError};
use crate::meta::{extract_meta, MetaError, PageMeta};

/// A parsed demo page.
#[derive(Debug, Clone)]
pub struct DemoPage {
    /// Parsed frontmatter (if present)
    pub meta: Option<PageMeta>,

    /// Markdown content (without frontmatter)
    pub content: String,

    /// Tweet embed blocks, in document order
    pub embeds: Vec<EmbedBlock>,
}

/// Errors that can occur when parsing a demo page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("frontmatter error: {0}")]
    Meta(#[from] MetaError),

    #[error("invalid tweet embed: {0}")]
    Embed(#[from] EmbedError),
}

pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parse a demo page, extracting frontmatter and its tweet embed blocks.
pub fn parse_page(source: &str) -> Result<DemoPage, PageError> {
    let (meta, content) = extract_meta(source)?;

    let mut embeds = Vec::new();
    let mut pending: Option<(String, String)> = None;

    for event in Parser::new_ext(content, markdown_options()) {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if is_embed_info(&info) =>
            {
                pending = Some((info.to_string(), String::new()));
            }
            Event::Text(text) => {
                if let Some((_, body)) = pending.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, body)) = pending.take() {
                    embeds.push(EmbedBlock::parse(&info, &body)?);
                }
            }
            _ => {}
        }
    }

    Ok(DemoPage {
        meta,
        content: content.to_string(),
        embeds,
    })
}
