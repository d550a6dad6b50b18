// src/document/descriptor.rs

//! Field descriptors: the editable shape of a node, derived at render time.
//!
//! A field node looks like:
//!
//! ```xml
//! <freq>
//!   <inputtype>number</inputtype>
//!   <value>505</value>
//!   <minvalue>100</minvalue>
//!   <maxvalue>2000</maxvalue>
//! </freq>
//! ```
//!
//! Nodes without an `inputtype` child are plain status values and are shown
//! read-only with their own text. A declared `readonly` field shows its
//! `value`.

use thiserror::Error;

use crate::types::InputKind;

use super::tree::{NodeId, XmlDocument};

/// Numeric constraints of a `number` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub kind: InputKind,
    /// Current value exactly as stored (not trimmed).
    pub value: String,
    pub bounds: Option<Bounds>,
    /// Option labels of a `selectionlist`, in document order.
    pub options: Option<Vec<String>>,
}

impl FieldDescriptor {
    /// Check state of a checkbox; only the literal `true` is checked.
    pub fn checked(&self) -> bool {
        self.kind == InputKind::Checkbox && self.value == "true"
    }

    /// Selected option index of a selection list. Only the canonical decimal
    /// form counts, so `01` or ` 1` is not an index.
    pub fn selected_index(&self) -> Option<usize> {
        match self.kind {
            InputKind::SelectionList => self
                .value
                .parse::<usize>()
                .ok()
                .filter(|index| index.to_string() == self.value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescribeError {
    #[error("unsupported input type '{0}'")]
    UnsupportedKind(String),

    #[error("field has no <{0}> element")]
    MissingChild(&'static str),

    #[error("malformed <{element}>: {reason}")]
    Malformed {
        element: &'static str,
        reason: String,
    },
}

/// Read the field descriptor of `node`.
pub fn describe(doc: &XmlDocument, node: NodeId) -> Result<FieldDescriptor, DescribeError> {
    let Some(inputtype) = doc.child_named(node, "inputtype") else {
        return Ok(FieldDescriptor {
            kind: InputKind::Readonly,
            value: doc.text(node).trim().to_string(),
            bounds: None,
            options: None,
        });
    };
    let kind = doc
        .text(inputtype)
        .parse::<InputKind>()
        .map_err(DescribeError::UnsupportedKind)?;

    let value = doc
        .child_named(node, "value")
        .map(|v| doc.text(v))
        .ok_or(DescribeError::MissingChild("value"))?;

    let mut descriptor = FieldDescriptor {
        kind,
        value,
        bounds: None,
        options: None,
    };

    match kind {
        InputKind::Number => descriptor.bounds = read_bounds(doc, node)?,
        InputKind::SelectionList => {
            let list = doc
                .child_named(node, "list")
                .ok_or(DescribeError::MissingChild("list"))?;
            let options = doc
                .children(list)
                .map(|option| doc.text(option).trim().to_string())
                .collect();
            if descriptor.selected_index().is_none() {
                return Err(DescribeError::Malformed {
                    element: "value",
                    reason: format!("'{}' is not an option index", descriptor.value),
                });
            }
            descriptor.options = Some(options);
        }
        _ => {}
    }

    Ok(descriptor)
}

fn read_bounds(doc: &XmlDocument, node: NodeId) -> Result<Option<Bounds>, DescribeError> {
    let min = doc.child_named(node, "minvalue");
    let max = doc.child_named(node, "maxvalue");

    match (min, max) {
        (None, None) => Ok(None),
        (Some(min), Some(max)) => Ok(Some(Bounds {
            min: parse_bound(doc, min, "minvalue")?,
            max: parse_bound(doc, max, "maxvalue")?,
        })),
        (Some(_), None) => Err(DescribeError::MissingChild("maxvalue")),
        (None, Some(_)) => Err(DescribeError::MissingChild("minvalue")),
    }
}

fn parse_bound(doc: &XmlDocument, node: NodeId, element: &'static str) -> Result<i64, DescribeError> {
    let raw = doc.text(node);
    raw.trim().parse().map_err(|_| DescribeError::Malformed {
        element,
        reason: format!("'{}' is not an integer", raw.trim()),
    })
}
