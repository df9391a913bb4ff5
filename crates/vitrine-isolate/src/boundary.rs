//! The isolation boundary component.

use vitrine_dom::{BoundaryId, Document, NodeId};

use crate::cloner::clone_document_styles;
use crate::theme::{ThemeMode, ThemeResolver};

/// Props for mounting an [`IsolationBoundary`].
#[derive(Debug, Clone, Default)]
pub struct BoundaryProps {
    /// Requested theme mode (default `auto`)
    pub theme: ThemeMode,
    /// Class list for the outer host element
    pub class_name: Option<String>,
    /// Inline style for the outer host element
    pub style: Option<String>,
}

/// Hosts children inside an isolated rendering boundary.
///
/// The outer host element stays in normal page flow; on first mount the
/// component attaches the boundary, snapshots the document's styles into it,
/// and creates a projection target that children are rendered into. The
/// resolved theme is published as a `data-theme` attribute on the host.
///
/// In a document without isolation support only the host element renders; a
/// later mount effect in a capable document attaches the boundary then.
pub struct IsolationBoundary {
    host: NodeId,
    boundary: Option<BoundaryId>,
    target: Option<NodeId>,
    resolver: ThemeResolver,
}

impl IsolationBoundary {
    /// Mount the component under a parent element.
    pub fn mount(doc: &mut Document, parent: NodeId, props: BoundaryProps) -> Self {
        let host = doc.create_element("div");
        if let Some(class) = &props.class_name {
            let _ = doc.set_attribute(host, "class", class);
        }
        if let Some(style) = &props.style {
            let _ = doc.set_attribute(host, "style", style);
        }
        let _ = doc.append_child(parent, host);

        let resolver = ThemeResolver::attach(doc, host, props.theme);

        let mut component = Self {
            host,
            boundary: None,
            target: None,
            resolver,
        };
        component.mount_effect(doc);
        component
    }

    /// Run the boundary-creation effect.
    ///
    /// One-shot: a second invocation (a double-invoked lifecycle) is a no-op
    /// once a boundary exists. Creation, style cloning, and target creation
    /// run in that order within this single call.
    pub fn mount_effect(&mut self, doc: &mut Document) {
        if self.boundary.is_some() {
            return;
        }

        let boundary = match doc.attach_boundary(self.host) {
            Ok(boundary) => boundary,
            Err(err) => {
                // Unsupported environment or a concurrent attach: degrade to
                // rendering the bare host element.
                tracing::debug!("isolation boundary not attached: {}", err);
                return;
            }
        };

        let sheets = clone_document_styles(doc);
        let _ = doc.adopt_style_sheets(boundary, sheets);

        let target = doc.create_element("div");
        let _ = doc.boundary_append(boundary, target);

        self.boundary = Some(boundary);
        self.target = Some(target);
    }

    /// Project children into the boundary's target, replacing any previous
    /// projection. Without a boundary this is a no-op.
    pub fn project(&mut self, doc: &mut Document, children: &[NodeId]) {
        let Some(target) = self.target else {
            return;
        };
        let _ = doc.clear_children(target);
        for &child in children {
            let _ = doc.append_child(target, child);
        }
    }

    /// Change the theme mode; the host's `data-theme` updates in place.
    pub fn set_theme(&mut self, doc: &mut Document, mode: ThemeMode) {
        self.resolver.set_mode(doc, mode);
    }

    /// The outer host element.
    pub fn host(&self) -> NodeId {
        self.host
    }

    /// The projection target inside the boundary, once one exists.
    pub fn target(&self) -> Option<NodeId> {
        self.target
    }

    /// Whether a boundary is attached (false in degraded environments).
    pub fn is_isolated(&self) -> bool {
        self.boundary.is_some()
    }

    /// Unmount the component, releasing subscriptions, the boundary, and the
    /// host subtree.
    pub fn unmount(mut self, doc: &mut Document) {
        self.resolver.detach(doc);
        let _ = doc.remove_subtree(self.host);
    }
}
