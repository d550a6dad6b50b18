// src/document/path.rs

//! TagPath parsing and resolution.
//!
//! Two addressing forms are accepted:
//!
//! - legacy name addressing: `frontend.fbcLinked`. The last segment is the
//!   field's tag name, the segments before it locate the containing subtree.
//! - selector addressing: `tuner freq`, `frontend > fbc fbcLinked`, using the
//!   descendant (whitespace) and child (`>`) combinators over tag names.
//!
//! Both forms compile to the same list of [`Step`]s. Resolution collects the
//! full match set; more than one match is reported as
//! [`PathError::Ambiguous`] rather than silently taking the first node.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::tree::{NodeId, XmlDocument};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("empty tag path")]
    Empty,

    #[error("invalid tag path '{path}': {reason}")]
    Invalid { path: String, reason: String },

    #[error("tag path '{path}' matches {count} nodes")]
    Ambiguous { path: String, count: usize },
}

/// Which syntax a path was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Addressing {
    Legacy,
    Selector,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Step {
    combinator: Combinator,
    name: String,
}

/// Address of a subtree or field inside the configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TagPath {
    addressing: Addressing,
    steps: Vec<Step>,
}

impl TagPath {
    pub fn parse(input: &str) -> Result<Self, PathError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(PathError::Empty);
        }

        if trimmed.contains(|c: char| c.is_whitespace() || c == '>') {
            parse_selector(trimmed)
        } else {
            parse_legacy(trimmed)
        }
    }

    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Tag name of the addressed field (the last step).
    pub fn leaf_name(&self) -> &str {
        self.steps.last().map(|s| s.name.as_str()).unwrap_or_default()
    }

    /// Path to the direct child `name` of whatever this path addresses.
    ///
    /// The result always uses selector addressing.
    pub fn child(&self, name: &str) -> TagPath {
        let mut steps = self.steps.clone();
        steps.push(Step {
            combinator: Combinator::Child,
            name: name.to_string(),
        });
        TagPath {
            addressing: Addressing::Selector,
            steps,
        }
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> PathError {
    PathError::Invalid {
        path: path.to_string(),
        reason: reason.into(),
    }
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':')
}

fn check_name(path: &str, name: &str) -> Result<(), PathError> {
    match name.chars().find(|c| !is_name_char(*c)) {
        Some(bad) => Err(invalid(path, format!("unexpected character '{bad}' in '{name}'"))),
        None => Ok(()),
    }
}

fn parse_legacy(path: &str) -> Result<TagPath, PathError> {
    let mut steps = Vec::new();
    for segment in path.split('.') {
        if segment.is_empty() {
            return Err(invalid(path, "empty segment"));
        }
        check_name(path, segment)?;
        steps.push(Step {
            combinator: Combinator::Descendant,
            name: segment.to_string(),
        });
    }
    Ok(TagPath {
        addressing: Addressing::Legacy,
        steps,
    })
}

fn parse_selector(path: &str) -> Result<TagPath, PathError> {
    let spaced = path.replace('>', " > ");
    let mut steps = Vec::new();
    let mut pending_child = false;

    for token in spaced.split_whitespace() {
        if token == ">" {
            if steps.is_empty() {
                return Err(invalid(path, "selector starts with '>'"));
            }
            if pending_child {
                return Err(invalid(path, "repeated '>' combinator"));
            }
            pending_child = true;
            continue;
        }

        check_name(path, token)?;
        let combinator = if pending_child {
            Combinator::Child
        } else {
            Combinator::Descendant
        };
        steps.push(Step {
            combinator,
            name: token.to_string(),
        });
        pending_child = false;
    }

    if pending_child {
        return Err(invalid(path, "selector ends with '>'"));
    }

    Ok(TagPath {
        addressing: Addressing::Selector,
        steps,
    })
}

impl FromStr for TagPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagPath::parse(s)
    }
}

impl fmt::Display for TagPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                match (self.addressing, step.combinator) {
                    (Addressing::Legacy, _) => f.write_str(".")?,
                    (Addressing::Selector, Combinator::Descendant) => f.write_str(" ")?,
                    (Addressing::Selector, Combinator::Child) => f.write_str(" > ")?,
                }
            }
            f.write_str(&step.name)?;
        }
        Ok(())
    }
}

/// Every element matching `path`, in document order.
pub fn matches(doc: &XmlDocument, path: &TagPath) -> Vec<NodeId> {
    let mut current: BTreeSet<NodeId> = BTreeSet::new();

    for (i, step) in path.steps.iter().enumerate() {
        let mut next = BTreeSet::new();

        if i == 0 {
            let root = doc.root();
            let candidates = std::iter::once(root).chain(doc.descendants(root));
            next.extend(candidates.filter(|n| doc.name(*n) == step.name));
        } else {
            for node in &current {
                match step.combinator {
                    Combinator::Descendant => next.extend(
                        doc.descendants(*node)
                            .into_iter()
                            .filter(|n| doc.name(*n) == step.name),
                    ),
                    Combinator::Child => next.extend(
                        doc.children(*node).filter(|n| doc.name(*n) == step.name),
                    ),
                }
            }
        }

        if next.is_empty() {
            return Vec::new();
        }
        current = next;
    }

    current.into_iter().collect()
}

/// Resolve `path` to at most one element.
///
/// A missing path is `Ok(None)`: optional fields vary across firmware
/// versions. More than one match is an error.
pub fn resolve(doc: &XmlDocument, path: &TagPath) -> Result<Option<NodeId>, PathError> {
    let found = matches(doc, path);
    match found.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        many => Err(PathError::Ambiguous {
            path: path.to_string(),
            count: many.len(),
        }),
    }
}
