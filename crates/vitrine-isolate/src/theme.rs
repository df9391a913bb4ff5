//! Theme resolution against host-document and system signals.

use std::fmt;
use std::str::FromStr;

use vitrine_dom::{ColorScheme, Document, NodeId, ObserverHandle};

/// Requested theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    Auto,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::Auto => "auto",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown theme mode.
#[derive(Debug, thiserror::Error)]
#[error("unknown theme mode: {0} (expected light, dark, or auto)")]
pub struct UnknownThemeMode(String);

impl FromStr for ThemeMode {
    type Err = UnknownThemeMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            "auto" => Ok(ThemeMode::Auto),
            other => Err(UnknownThemeMode(other.to_string())),
        }
    }
}

/// Effective theme, always `light` or `dark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    pub fn as_str(self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }
}

impl fmt::Display for ResolvedTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The host document's explicit theme marker, if present.
///
/// A `data-theme` attribute or a `dark`/`light` class on the document root
/// counts as a marker.
fn document_theme(doc: &Document) -> Option<ResolvedTheme> {
    let root = doc.root();
    let attr = doc.attribute(root, "data-theme");

    if attr == Some("dark") || doc.has_class(root, "dark") {
        return Some(ResolvedTheme::Dark);
    }
    if attr == Some("light") || doc.has_class(root, "light") {
        return Some(ResolvedTheme::Light);
    }
    None
}

fn system_theme(doc: &Document) -> ResolvedTheme {
    match doc.color_scheme() {
        ColorScheme::Dark => ResolvedTheme::Dark,
        ColorScheme::Light => ResolvedTheme::Light,
    }
}

/// Compute the effective theme for a mode.
///
/// Fixed modes resolve to themselves. `auto` prefers the document's theme
/// marker over the system color-scheme preference, so a page can force a
/// theme regardless of OS setting.
pub fn resolve_theme(doc: &Document, mode: ThemeMode) -> ResolvedTheme {
    match mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::Auto => document_theme(doc).unwrap_or_else(|| system_theme(doc)),
    }
}

fn apply_theme(doc: &mut Document, host: NodeId, mode: ThemeMode) {
    let theme = resolve_theme(doc, mode);
    // The host may already be gone while an unmount is in flight.
    let _ = doc.set_attribute(host, "data-theme", theme.as_str());
}

/// Keeps a host element's `data-theme` attribute current.
///
/// In `auto` mode the resolver holds two subscriptions: one on the system
/// color-scheme signal and one on root `class`/`data-theme` mutations. Both
/// are released on [`detach`](Self::detach) or when the mode leaves `auto`.
/// The resolver writes only its own host's attribute, never the document
/// root.
pub struct ThemeResolver {
    mode: ThemeMode,
    host: NodeId,
    media: Option<ObserverHandle>,
    mutation: Option<ObserverHandle>,
}

impl ThemeResolver {
    /// Attach a resolver to a host element, writing the initial theme.
    pub fn attach(doc: &mut Document, host: NodeId, mode: ThemeMode) -> Self {
        let mut resolver = Self {
            mode,
            host,
            media: None,
            mutation: None,
        };
        apply_theme(doc, host, mode);
        resolver.subscribe(doc);
        resolver
    }

    /// The mode this resolver runs in.
    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// The theme currently in effect for this resolver.
    pub fn resolved(&self, doc: &Document) -> ResolvedTheme {
        resolve_theme(doc, self.mode)
    }

    /// Switch modes, re-resolving and rewiring subscriptions as needed.
    pub fn set_mode(&mut self, doc: &mut Document, mode: ThemeMode) {
        if mode == self.mode {
            return;
        }
        self.unsubscribe(doc);
        self.mode = mode;
        apply_theme(doc, self.host, mode);
        self.subscribe(doc);
    }

    /// Release both subscriptions. No attribute writes happen afterwards.
    pub fn detach(&mut self, doc: &mut Document) {
        self.unsubscribe(doc);
    }

    fn subscribe(&mut self, doc: &mut Document) {
        if self.mode != ThemeMode::Auto {
            return;
        }

        let host = self.host;
        self.media = Some(doc.watch_color_scheme(move |doc, _| {
            apply_theme(doc, host, ThemeMode::Auto);
        }));

        let root = doc.root();
        self.mutation = Some(doc.observe_attributes(
            root,
            &["class", "data-theme"],
            move |doc, _| {
                apply_theme(doc, host, ThemeMode::Auto);
            },
        ));
    }

    fn unsubscribe(&mut self, doc: &mut Document) {
        if let Some(handle) = self.media.take() {
            doc.disconnect(handle);
        }
        if let Some(handle) = self.mutation.take() {
            doc.disconnect(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(doc: &mut Document) -> NodeId {
        let root = doc.root();
        let host = doc.create_element("div");
        doc.append_child(root, host).unwrap();
        host
    }

    #[test]
    fn fixed_modes_ignore_document_and_system_signals() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_attribute(root, "data-theme", "dark").unwrap();
        doc.set_color_scheme(ColorScheme::Dark);

        assert_eq!(resolve_theme(&doc, ThemeMode::Light), ResolvedTheme::Light);
        assert_eq!(resolve_theme(&doc, ThemeMode::Dark), ResolvedTheme::Dark);
    }

    #[test]
    fn document_marker_outranks_system_preference() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.set_attribute(root, "data-theme", "dark").unwrap();
        doc.set_color_scheme(ColorScheme::Light);

        assert_eq!(resolve_theme(&doc, ThemeMode::Auto), ResolvedTheme::Dark);
    }

    #[test]
    fn auto_falls_back_to_system_preference() {
        let mut doc = Document::new();
        doc.set_color_scheme(ColorScheme::Dark);

        assert_eq!(resolve_theme(&doc, ThemeMode::Auto), ResolvedTheme::Dark);
    }

    #[test]
    fn class_markers_count_as_document_theme() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.add_class(root, "dark").unwrap();

        assert_eq!(resolve_theme(&doc, ThemeMode::Auto), ResolvedTheme::Dark);
    }

    #[test]
    fn unmarked_documents_resolve_light_by_default() {
        let doc = Document::new();
        assert_eq!(resolve_theme(&doc, ThemeMode::Auto), ResolvedTheme::Light);
    }

    #[test]
    fn attach_writes_the_initial_theme() {
        let mut doc = Document::new();
        let host = host(&mut doc);

        ThemeResolver::attach(&mut doc, host, ThemeMode::Auto);

        assert_eq!(doc.attribute(host, "data-theme"), Some("light"));
    }

    #[test]
    fn fixed_modes_hold_no_subscriptions() {
        let mut doc = Document::new();
        let host = host(&mut doc);

        ThemeResolver::attach(&mut doc, host, ThemeMode::Dark);

        assert_eq!(doc.media_observer_count(), 0);
        assert_eq!(doc.attribute_observer_count(), 0);
        assert_eq!(doc.attribute(host, "data-theme"), Some("dark"));
    }

    #[test]
    fn marker_changes_update_the_host_attribute() {
        let mut doc = Document::new();
        let root = doc.root();
        let host = host(&mut doc);

        ThemeResolver::attach(&mut doc, host, ThemeMode::Auto);
        assert_eq!(doc.attribute(host, "data-theme"), Some("light"));

        doc.set_attribute(root, "data-theme", "dark").unwrap();
        assert_eq!(doc.attribute(host, "data-theme"), Some("dark"));

        doc.remove_attribute(root, "data-theme").unwrap();
        assert_eq!(doc.attribute(host, "data-theme"), Some("light"));
    }

    #[test]
    fn system_changes_update_the_host_attribute() {
        let mut doc = Document::new();
        let host = host(&mut doc);

        ThemeResolver::attach(&mut doc, host, ThemeMode::Auto);

        doc.set_color_scheme(ColorScheme::Dark);
        assert_eq!(doc.attribute(host, "data-theme"), Some("dark"));
    }

    #[test]
    fn detach_stops_all_attribute_writes() {
        let mut doc = Document::new();
        let root = doc.root();
        let host = host(&mut doc);

        let mut resolver = ThemeResolver::attach(&mut doc, host, ThemeMode::Auto);
        resolver.detach(&mut doc);

        doc.set_color_scheme(ColorScheme::Dark);
        doc.set_attribute(root, "data-theme", "dark").unwrap();

        assert_eq!(doc.attribute(host, "data-theme"), Some("light"));
        assert_eq!(doc.media_observer_count(), 0);
        assert_eq!(doc.attribute_observer_count(), 0);
    }

    #[test]
    fn leaving_auto_releases_subscriptions() {
        let mut doc = Document::new();
        let host = host(&mut doc);

        let mut resolver = ThemeResolver::attach(&mut doc, host, ThemeMode::Auto);
        assert_eq!(doc.media_observer_count(), 1);
        assert_eq!(doc.attribute_observer_count(), 1);

        resolver.set_mode(&mut doc, ThemeMode::Light);
        assert_eq!(doc.media_observer_count(), 0);
        assert_eq!(doc.attribute_observer_count(), 0);
        assert_eq!(doc.attribute(host, "data-theme"), Some("light"));

        resolver.set_mode(&mut doc, ThemeMode::Auto);
        assert_eq!(doc.media_observer_count(), 1);
        assert_eq!(doc.attribute_observer_count(), 1);
    }

    #[test]
    fn parses_theme_modes_from_strings() {
        assert_eq!("light".parse::<ThemeMode>().unwrap(), ThemeMode::Light);
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!("auto".parse::<ThemeMode>().unwrap(), ThemeMode::Auto);
        assert!("sepia".parse::<ThemeMode>().is_err());
    }
}
