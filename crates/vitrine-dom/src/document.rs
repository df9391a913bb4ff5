//! Element arena, mutation observation, and isolation boundaries.

use crate::style::{StyleSheet, StyleSource};

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// Handle to an isolation boundary attached to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryId(pub(crate) usize);

/// System color-scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// A single attribute mutation delivered to observers.
#[derive(Debug, Clone)]
pub struct MutationRecord {
    /// Node whose attribute changed
    pub target: NodeId,
    /// Attribute name
    pub attribute: String,
    /// Value before the change
    pub old_value: Option<String>,
}

/// Handle returned from observer registration. Used to disconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverHandle {
    kind: ObserverKind,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObserverKind {
    Attribute,
    Media,
}

/// Errors that can occur when using the host-document model.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    #[error("node does not exist in this document")]
    MissingNode,

    #[error("node is not an element")]
    NotAnElement,

    #[error("element already has an isolation boundary")]
    BoundaryExists,

    #[error("this document does not support isolation boundaries")]
    IsolationUnsupported,

    #[error("boundary does not exist in this document")]
    MissingBoundary,
}

pub(crate) enum NodeData {
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) boundary: Option<BoundaryId>,
}

pub(crate) struct Boundary {
    pub(crate) sheets: Vec<StyleSheet>,
    pub(crate) children: Vec<NodeId>,
}

type AttributeCallback = Box<dyn FnMut(&mut Document, &MutationRecord)>;
type MediaCallback = Box<dyn FnMut(&mut Document, ColorScheme)>;

struct AttributeObserver {
    target: NodeId,
    filter: Vec<String>,
    // Taken out of the slot while its callback runs, so dispatch never
    // re-enters the same observer.
    callback: Option<AttributeCallback>,
}

impl AttributeObserver {
    fn matches(&self, attribute: &str) -> bool {
        self.filter.is_empty() || self.filter.iter().any(|name| name == attribute)
    }
}

struct MediaObserver {
    callback: Option<MediaCallback>,
}

/// An in-memory host document.
///
/// Owns every node, style source, boundary, and observer registration created
/// against it. Handles are plain indices and only valid for the document that
/// issued them.
pub struct Document {
    nodes: Vec<Option<Node>>,
    root: NodeId,
    style_sources: Vec<StyleSource>,
    boundaries: Vec<Option<Boundary>>,
    color_scheme: ColorScheme,
    attribute_observers: Vec<Option<AttributeObserver>>,
    media_observers: Vec<Option<MediaObserver>>,
    supports_isolation: bool,
}

impl Document {
    /// Create a browser-like document with isolation support.
    pub fn new() -> Self {
        Self::with_isolation(true)
    }

    /// Create a document for server-side rendering.
    ///
    /// Reports no isolation support; attempts to attach a boundary return
    /// [`DomError::IsolationUnsupported`].
    pub fn server_side() -> Self {
        Self::with_isolation(false)
    }

    fn with_isolation(supports_isolation: bool) -> Self {
        let root = Node {
            data: NodeData::Element {
                tag: "html".to_string(),
                attributes: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
            boundary: None,
        };

        Self {
            nodes: vec![Some(root)],
            root: NodeId(0),
            style_sources: Vec::new(),
            boundaries: Vec::new(),
            color_scheme: ColorScheme::Light,
            attribute_observers: Vec::new(),
            media_observers: Vec::new(),
            supports_isolation,
        }
    }

    /// The document root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether this document can host isolation boundaries.
    pub fn supports_isolation(&self) -> bool {
        self.supports_isolation
    }

    // --- nodes ---

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(Node {
            data: NodeData::Element {
                tag: tag.to_string(),
                attributes: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
            boundary: None,
        })
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(Node {
            data: NodeData::Text(text.to_string()),
            parent: None,
            children: Vec::new(),
            boundary: None,
        })
    }

    fn push_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Element tag name, or `None` for text nodes and missing nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match self.node(id)?.data {
            NodeData::Element { ref tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    /// Text content of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.node(id)?.data {
            NodeData::Text(ref text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    /// Child nodes, in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Append a child, detaching it from any previous parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.node(child).is_none() {
            return Err(DomError::MissingNode);
        }
        match self.node(parent) {
            None => return Err(DomError::MissingNode),
            Some(node) => {
                if matches!(node.data, NodeData::Text(_)) {
                    return Err(DomError::NotAnElement);
                }
            }
        }

        self.detach(child);

        self.node_mut(parent)
            .ok_or(DomError::MissingNode)?
            .children
            .push(child);
        self.node_mut(child).ok_or(DomError::MissingNode)?.parent = Some(parent);

        Ok(())
    }

    /// Remove every child of a node, releasing their subtrees.
    pub fn clear_children(&mut self, parent: NodeId) -> Result<(), DomError> {
        let children = self
            .node(parent)
            .ok_or(DomError::MissingNode)?
            .children
            .clone();
        for child in children {
            self.remove_subtree(child)?;
        }
        Ok(())
    }

    /// Remove a node and its whole subtree, releasing any boundaries in it.
    pub fn remove_subtree(&mut self, id: NodeId) -> Result<(), DomError> {
        if self.node(id).is_none() {
            return Err(DomError::MissingNode);
        }
        self.detach(id);
        self.free_subtree(id);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node.children.retain(|&child| child != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    fn free_subtree(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id.0).and_then(|slot| slot.take()) else {
            return;
        };
        if let Some(boundary_id) = node.boundary {
            if let Some(boundary) = self.boundaries.get_mut(boundary_id.0).and_then(|b| b.take()) {
                for child in boundary.children {
                    self.free_subtree(child);
                }
            }
        }
        for child in node.children {
            self.free_subtree(child);
        }
    }

    // --- attributes and classes ---

    /// Read an attribute value.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.node(id)?.data {
            NodeData::Element { ref attributes, .. } => attributes
                .iter()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value.as_str()),
            NodeData::Text(_) => None,
        }
    }

    /// Set an attribute and notify matching observers.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let node = self.node_mut(id).ok_or(DomError::MissingNode)?;
        let NodeData::Element { attributes, .. } = &mut node.data else {
            return Err(DomError::NotAnElement);
        };

        let old_value = match attributes.iter_mut().find(|(attr, _)| attr == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value.to_string())),
            None => {
                attributes.push((name.to_string(), value.to_string()));
                None
            }
        };

        self.dispatch_attribute_mutation(MutationRecord {
            target: id,
            attribute: name.to_string(),
            old_value,
        });
        Ok(())
    }

    /// Remove an attribute and notify matching observers.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        let node = self.node_mut(id).ok_or(DomError::MissingNode)?;
        let NodeData::Element { attributes, .. } = &mut node.data else {
            return Err(DomError::NotAnElement);
        };

        let position = attributes.iter().position(|(attr, _)| attr == name);
        let Some(position) = position else {
            return Ok(());
        };
        let (_, old_value) = attributes.remove(position);

        self.dispatch_attribute_mutation(MutationRecord {
            target: id,
            attribute: name.to_string(),
            old_value: Some(old_value),
        });
        Ok(())
    }

    /// Whether the element's class list contains `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .map(|list| list.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Add a class, dispatching a `class` attribute mutation.
    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        if self.has_class(id, class) {
            return Ok(());
        }
        let list = match self.attribute(id, "class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        };
        self.set_attribute(id, "class", &list)
    }

    /// Remove a class, dispatching a `class` attribute mutation.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let Some(existing) = self.attribute(id, "class") else {
            return Ok(());
        };
        let list = existing
            .split_whitespace()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attribute(id, "class", &list)
    }

    // --- observers ---

    /// Observe attribute mutations on one node.
    ///
    /// An empty filter matches every attribute; otherwise only mutations of
    /// the named attributes are delivered.
    pub fn observe_attributes(
        &mut self,
        target: NodeId,
        filter: &[&str],
        callback: impl FnMut(&mut Document, &MutationRecord) + 'static,
    ) -> ObserverHandle {
        let index = self.attribute_observers.len();
        self.attribute_observers.push(Some(AttributeObserver {
            target,
            filter: filter.iter().map(|name| name.to_string()).collect(),
            callback: Some(Box::new(callback)),
        }));
        ObserverHandle {
            kind: ObserverKind::Attribute,
            index,
        }
    }

    /// Observe changes of the system color-scheme preference.
    pub fn watch_color_scheme(
        &mut self,
        callback: impl FnMut(&mut Document, ColorScheme) + 'static,
    ) -> ObserverHandle {
        let index = self.media_observers.len();
        self.media_observers.push(Some(MediaObserver {
            callback: Some(Box::new(callback)),
        }));
        ObserverHandle {
            kind: ObserverKind::Media,
            index,
        }
    }

    /// Disconnect an observer. Disconnecting twice is a no-op.
    pub fn disconnect(&mut self, handle: ObserverHandle) {
        match handle.kind {
            ObserverKind::Attribute => {
                if let Some(slot) = self.attribute_observers.get_mut(handle.index) {
                    *slot = None;
                }
            }
            ObserverKind::Media => {
                if let Some(slot) = self.media_observers.get_mut(handle.index) {
                    *slot = None;
                }
            }
        }
    }

    /// Number of connected attribute observers.
    pub fn attribute_observer_count(&self) -> usize {
        self.attribute_observers
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    /// Number of connected color-scheme observers.
    pub fn media_observer_count(&self) -> usize {
        self.media_observers
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }

    fn dispatch_attribute_mutation(&mut self, record: MutationRecord) {
        for index in 0..self.attribute_observers.len() {
            let mut callback = match self.attribute_observers[index].as_mut() {
                Some(observer)
                    if observer.target == record.target
                        && observer.matches(&record.attribute) =>
                {
                    match observer.callback.take() {
                        Some(callback) => callback,
                        None => continue,
                    }
                }
                _ => continue,
            };

            callback(self, &record);

            // The callback may have disconnected this observer.
            if let Some(observer) = self.attribute_observers[index].as_mut() {
                observer.callback = Some(callback);
            }
        }
    }

    // --- system color scheme ---

    /// Current system color-scheme preference.
    pub fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    /// Change the system color-scheme preference.
    ///
    /// Observers are notified only on an actual change, matching media-query
    /// change events.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        if self.color_scheme == scheme {
            return;
        }
        self.color_scheme = scheme;

        for index in 0..self.media_observers.len() {
            let mut callback = match self.media_observers[index].as_mut() {
                Some(observer) => match observer.callback.take() {
                    Some(callback) => callback,
                    None => continue,
                },
                None => continue,
            };

            callback(self, scheme);

            if let Some(observer) = self.media_observers[index].as_mut() {
                observer.callback = Some(callback);
            }
        }
    }

    // --- style sources ---

    /// Install a readable style source from CSS text.
    pub fn install_style_source(&mut self, css: &str) {
        self.style_sources.push(StyleSource::readable(css));
    }

    /// Install an opaque cross-origin style source.
    pub fn install_cross_origin_source(&mut self, href: &str) {
        self.style_sources.push(StyleSource::cross_origin(href));
    }

    /// The document's style sources, in installation order.
    pub fn style_sources(&self) -> &[StyleSource] {
        &self.style_sources
    }

    // --- boundaries ---

    /// Attach an isolation boundary to an element.
    ///
    /// Fails if the document does not support isolation, the element is
    /// missing, or the element already hosts a boundary.
    pub fn attach_boundary(&mut self, host: NodeId) -> Result<BoundaryId, DomError> {
        if !self.supports_isolation {
            return Err(DomError::IsolationUnsupported);
        }
        let node = self.node(host).ok_or(DomError::MissingNode)?;
        if matches!(node.data, NodeData::Text(_)) {
            return Err(DomError::NotAnElement);
        }
        if node.boundary.is_some() {
            return Err(DomError::BoundaryExists);
        }

        let id = BoundaryId(self.boundaries.len());
        self.boundaries.push(Some(Boundary {
            sheets: Vec::new(),
            children: Vec::new(),
        }));
        self.node_mut(host).ok_or(DomError::MissingNode)?.boundary = Some(id);
        Ok(id)
    }

    /// The boundary attached to an element, if any.
    pub fn boundary_of(&self, host: NodeId) -> Option<BoundaryId> {
        self.node(host)?.boundary
    }

    pub(crate) fn boundary(&self, id: BoundaryId) -> Option<&Boundary> {
        self.boundaries.get(id.0).and_then(|slot| slot.as_ref())
    }

    fn boundary_mut(&mut self, id: BoundaryId) -> Option<&mut Boundary> {
        self.boundaries.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Replace the boundary's adopted style sheets.
    pub fn adopt_style_sheets(
        &mut self,
        id: BoundaryId,
        sheets: Vec<StyleSheet>,
    ) -> Result<(), DomError> {
        self.boundary_mut(id).ok_or(DomError::MissingBoundary)?.sheets = sheets;
        Ok(())
    }

    /// The boundary's adopted style sheets, in adoption order.
    pub fn adopted_style_sheets(&self, id: BoundaryId) -> Result<&[StyleSheet], DomError> {
        Ok(&self.boundary(id).ok_or(DomError::MissingBoundary)?.sheets)
    }

    /// Append a top-level child inside the boundary.
    pub fn boundary_append(&mut self, id: BoundaryId, child: NodeId) -> Result<(), DomError> {
        if self.node(child).is_none() {
            return Err(DomError::MissingNode);
        }
        self.detach(child);
        self.boundary_mut(id)
            .ok_or(DomError::MissingBoundary)?
            .children
            .push(child);
        Ok(())
    }

    /// The boundary's top-level children.
    pub fn boundary_children(&self, id: BoundaryId) -> Result<&[NodeId], DomError> {
        Ok(&self.boundary(id).ok_or(DomError::MissingBoundary)?.children)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
