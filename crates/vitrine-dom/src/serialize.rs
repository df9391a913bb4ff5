//! Declarative HTML serialization.
//!
//! Elements hosting an isolation boundary serialize with a
//! `<template shadowrootmode="open">` first child carrying the boundary's
//! adopted sheets as `<style>` elements, in adoption order, followed by the
//! boundary's content.

use crate::document::{Document, NodeData, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Serialize a node and its subtree to HTML.
    ///
    /// Missing nodes serialize to an empty string.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize only a node's children (and boundary content, if any).
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_contents(id, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        match &node.data {
            NodeData::Text(text) => out.push_str(&escape_text(text)),
            NodeData::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attribute(value));
                    out.push('"');
                }
                out.push('>');

                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }

                self.write_contents(id, out);

                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    fn write_contents(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.node(id) else {
            return;
        };

        if let Some(boundary) = node.boundary.and_then(|b| self.boundary(b)) {
            out.push_str("<template shadowrootmode=\"open\">");
            for sheet in &boundary.sheets {
                out.push_str("<style>");
                out.push_str(&sheet.css_text());
                out.push_str("</style>");
            }
            for &child in &boundary.children {
                self.write_node(child, out);
            }
            out.push_str("</template>");
        }

        for &child in &node.children {
            self.write_node(child, out);
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
