//! One-shot style snapshot cloning.

use vitrine_dom::{Document, StyleSheet};

/// Clone every readable style source of a document into independent sheets.
///
/// Unreadable (cross-origin) sources are skipped silently; partial isolation
/// is the accepted degraded behavior. Source order is preserved so later
/// sheets override earlier ones, matching host semantics. This is a snapshot:
/// host style changes after cloning are not reflected.
pub fn clone_document_styles(doc: &Document) -> Vec<StyleSheet> {
    let mut sheets = Vec::new();

    for source in doc.style_sources() {
        match source.rules() {
            Some(rules) => {
                let css = rules.join("\n");
                sheets.push(StyleSheet::from_css_text(&css));
            }
            None => {
                tracing::debug!(href = source.href(), "skipping unreadable style source");
            }
        }
    }

    sheets
}
