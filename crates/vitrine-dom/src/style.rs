//! Style sources and independent style sheets.
//!
//! CSS text is split into top-level rules with lightningcss so cloned sheets
//! preserve host ordering rule by rule. Parsing runs in error-recovery mode:
//! invalid rules are dropped, never fatal.

use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::{ParserOptions, StyleSheet as CssSheet};
use lightningcss::traits::ToCss;

/// One style source reachable from a host document.
///
/// Readable sources expose their rule text; cross-origin sources are opaque
/// markers that cloning must skip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSource {
    kind: SourceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SourceKind {
    Readable(Vec<String>),
    CrossOrigin(String),
}

impl StyleSource {
    /// Build a readable source from CSS text.
    pub fn readable(css: &str) -> Self {
        Self {
            kind: SourceKind::Readable(split_rules(css)),
        }
    }

    /// Build an opaque cross-origin source.
    pub fn cross_origin(href: &str) -> Self {
        Self {
            kind: SourceKind::CrossOrigin(href.to_string()),
        }
    }

    /// Rule text of a readable source, or `None` when reading is not allowed.
    pub fn rules(&self) -> Option<&[String]> {
        match &self.kind {
            SourceKind::Readable(rules) => Some(rules),
            SourceKind::CrossOrigin(_) => None,
        }
    }

    /// Location of a cross-origin source.
    pub fn href(&self) -> Option<&str> {
        match &self.kind {
            SourceKind::Readable(_) => None,
            SourceKind::CrossOrigin(href) => Some(href),
        }
    }
}

/// An independent, exclusively-owned style sheet.
///
/// Boundaries adopt these; they never alias a document's style sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<String>,
}

impl StyleSheet {
    /// Compile CSS text into a sheet, dropping unparseable rules.
    pub fn from_css_text(css: &str) -> Self {
        Self {
            rules: split_rules(css),
        }
    }

    /// The sheet's rules, in source order.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Full CSS text of the sheet.
    pub fn css_text(&self) -> String {
        self.rules.join("\n")
    }
}

/// Split CSS text into the text of its top-level rules.
fn split_rules(css: &str) -> Vec<String> {
    let options = ParserOptions {
        error_recovery: true,
        ..ParserOptions::default()
    };

    let sheet = match CssSheet::parse(css, options) {
        Ok(sheet) => sheet,
        Err(err) => {
            tracing::warn!("unparseable style source: {}", err);
            return Vec::new();
        }
    };

    let mut rules = Vec::new();
    for rule in &sheet.rules.0 {
        match rule.to_css_string(PrinterOptions::default()) {
            Ok(text) if !text.is_empty() => rules.push(text),
            Ok(_) => {}
            Err(err) => tracing::warn!("unprintable style rule: {}", err),
        }
    }
    rules
}
