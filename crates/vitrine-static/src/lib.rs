//! Static demo site builder for vitrine.
//!
//! Renders the demo pages (including their style-isolated embeds) to a
//! distributable directory with assets, a sitemap, and robots.txt.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, SiteBuilder};
pub use templates::{NavItem, PageContext, TemplateEngine};
