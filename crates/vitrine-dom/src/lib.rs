//! Host-document model backing vitrine's style-isolated embeds.
//!
//! This crate provides the DOM-like environment the widgets render into: an
//! element arena with attribute/class mutation observation, a system
//! color-scheme signal, ordered style sources, isolated rendering boundaries,
//! and declarative HTML serialization.

pub mod document;
pub mod serialize;
pub mod style;

pub use document::{
    BoundaryId, ColorScheme, Document, DomError, MutationRecord, NodeId, ObserverHandle,
};
pub use style::{StyleSheet, StyleSource};
