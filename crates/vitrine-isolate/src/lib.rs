//! Style isolation for vitrine embeds.
//!
//! Mounts content inside an isolated rendering boundary, snapshots the host
//! document's style rules into it, and keeps a light/dark theme resolved from
//! the requested mode, the host document's theme marker, and the system
//! color-scheme preference.

pub mod boundary;
pub mod cloner;
pub mod theme;

pub use boundary::{BoundaryProps, IsolationBoundary};
pub use cloner::clone_document_styles;
pub use theme::{resolve_theme, ResolvedTheme, ThemeMode, ThemeResolver, UnknownThemeMode};
