//! Demo page format for vitrine.
//!
//! Pages are markdown files with YAML frontmatter and fenced ```tweet blocks
//! that embed tweet widgets, optionally behind a style-isolation boundary.

pub mod embed;
pub mod meta;
pub mod parser;
pub mod render;

pub use embed::{EmbedBlock, EmbedError};
pub use meta::{extract_meta, MetaError, PageMeta};
pub use parser::{parse_page, DemoPage, PageError};
pub use render::{render_content, RenderedPage};
