// src/document/tree.rs

//! Owned XML tree for the device configuration document.
//!
//! Elements live in an arena and are addressed by [`NodeId`]. The tree keeps
//! text nodes (including whitespace between elements) so that a document can
//! be re-serialised after a single `value` has been overwritten. Comments and
//! processing instructions are dropped on parse.

use std::fmt;
use std::str::FromStr;

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};

use crate::errors::{ConfsyncError, Result};

/// Handle to an element inside an [`XmlDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
enum XmlChild {
    Element(NodeId),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<XmlChild>,
}

/// The full configuration document received from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    elements: Vec<Element>,
    root: NodeId,
    declaration: bool,
}

fn xml_err(err: impl fmt::Display) -> ConfsyncError {
    ConfsyncError::XmlError(err.to_string())
}

impl XmlDocument {
    /// Parse a complete document. Exactly one root element is required.
    pub fn parse(source: &str) -> Result<Self> {
        let mut reader = Reader::from_str(source);
        reader.config_mut().trim_text(false);

        let mut elements: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;
        let mut declaration = false;

        loop {
            match reader.read_event()? {
                Event::Decl(_) => declaration = true,
                Event::Start(e) => {
                    let id = open_element(&mut elements, &stack, &mut root, &e)?;
                    stack.push(id);
                }
                Event::Empty(e) => {
                    open_element(&mut elements, &stack, &mut root, &e)?;
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Text(t) => {
                    let text = t.unescape().map_err(xml_err)?.into_owned();
                    push_text(&mut elements, &stack, text)?;
                }
                Event::CData(c) => {
                    let text = String::from_utf8_lossy(&c).into_owned();
                    push_text(&mut elements, &stack, text)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(ConfsyncError::XmlError(format!(
                "unexpected end of document inside <{}>",
                elements[open.0].name
            )));
        }

        let root = root.ok_or_else(|| xml_err("document has no root element"))?;
        Ok(Self {
            elements,
            root,
            declaration,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Tag name of an element.
    pub fn name(&self, id: NodeId) -> &str {
        &self.elements[id.0].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.elements[id.0].parent
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.elements[id.0]
            .attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Element children in document order.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.elements[id.0].children.iter().filter_map(|c| match c {
            XmlChild::Element(child) => Some(*child),
            XmlChild::Text(_) => None,
        })
    }

    /// First element child with the given tag name.
    pub fn child_named(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id).find(|child| self.name(*child) == name)
    }

    /// All element descendants of `id` (excluding `id`) in document order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).collect();
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let before = stack.len();
            stack.extend(self.children(next));
            stack[before..].reverse();
        }
        out
    }

    /// Concatenated direct text content of an element (no descendants).
    pub fn text(&self, id: NodeId) -> String {
        self.elements[id.0]
            .children
            .iter()
            .filter_map(|c| match c {
                XmlChild::Text(t) => Some(t.as_str()),
                XmlChild::Element(_) => None,
            })
            .collect()
    }

    /// Replace the direct text content of an element, keeping its element
    /// children.
    pub fn set_text(&mut self, id: NodeId, value: &str) {
        let children = &mut self.elements[id.0].children;
        children.retain(|c| matches!(c, XmlChild::Element(_)));
        children.insert(0, XmlChild::Text(value.to_string()));
    }

    /// Serialise the whole document.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::new();
        if self.declaration {
            out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        }
        self.write_element(self.root, &mut out);
        out
    }

    fn write_element(&self, id: NodeId, out: &mut String) {
        let element = &self.elements[id.0];
        out.push('<');
        out.push_str(&element.name);
        for (key, value) in &element.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value.as_str()));
            out.push('"');
        }
        out.push('>');
        for child in &element.children {
            match child {
                XmlChild::Element(child) => self.write_element(*child, out),
                XmlChild::Text(text) => out.push_str(&escape(text.as_str())),
            }
        }
        out.push_str("</");
        out.push_str(&element.name);
        out.push('>');
    }
}

fn open_element(
    elements: &mut Vec<Element>,
    stack: &[NodeId],
    root: &mut Option<NodeId>,
    start: &BytesStart<'_>,
) -> Result<NodeId> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(xml_err)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(xml_err)?.into_owned();
        attributes.push((key, value));
    }

    let id = NodeId(elements.len());
    let parent = stack.last().copied();

    match parent {
        Some(parent) => elements[parent.0].children.push(XmlChild::Element(id)),
        None if root.is_some() => {
            return Err(ConfsyncError::XmlError(format!(
                "second root element <{name}>"
            )));
        }
        None => *root = Some(id),
    }

    elements.push(Element {
        name,
        attributes,
        parent,
        children: Vec::new(),
    });
    Ok(id)
}

fn push_text(elements: &mut [Element], stack: &[NodeId], text: String) -> Result<()> {
    match stack.last() {
        Some(parent) => {
            elements[parent.0].children.push(XmlChild::Text(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ConfsyncError::XmlError(format!(
            "text outside the root element: {:?}",
            text.trim()
        ))),
    }
}

impl FromStr for XmlDocument {
    type Err = ConfsyncError;

    fn from_str(s: &str) -> Result<Self> {
        XmlDocument::parse(s)
    }
}

impl fmt::Display for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_xml_string())
    }
}
