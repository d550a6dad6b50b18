// src/diagnostic.rs

//! User-visible diagnostics (the blocking alerts of the device web UI).

use std::fmt;

use crate::document::TagPath;

/// Something the user has to be told about. None of these are fatal: the
/// page keeps rendering and the engine keeps running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An `ip` field was committed with text that is not a dotted quad.
    InvalidIp { path: TagPath, value: String },
    /// A node declares an `inputtype` no renderer handles.
    UnsupportedKind { path: TagPath, kind: String },
    /// A node declares a known kind but its sub-structure is unusable.
    MalformedField { path: TagPath, reason: String },
    /// A path matched more than one node.
    AmbiguousPath { path: String, count: usize },
    /// A commit targeted a path that no longer resolves.
    AbsentCommitPath { path: TagPath },
}

impl Diagnostic {
    /// Path the diagnostic refers to, as written.
    pub fn path(&self) -> String {
        match self {
            Diagnostic::InvalidIp { path, .. }
            | Diagnostic::UnsupportedKind { path, .. }
            | Diagnostic::MalformedField { path, .. }
            | Diagnostic::AbsentCommitPath { path } => path.to_string(),
            Diagnostic::AmbiguousPath { path, .. } => path.clone(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::InvalidIp { value, .. } => {
                write!(f, "You have entered an invalid IP address! ({value})")
            }
            Diagnostic::UnsupportedKind { path, kind } => {
                write!(f, "Unsupported input type '{kind}' for {path}")
            }
            Diagnostic::MalformedField { path, reason } => {
                write!(f, "Cannot display {path}: {reason}")
            }
            Diagnostic::AmbiguousPath { path, count } => {
                write!(f, "Path '{path}' matches {count} nodes")
            }
            Diagnostic::AbsentCommitPath { path } => {
                write!(f, "Cannot save {path}: it is not in the current document")
            }
        }
    }
}
