// src/document/mod.rs

//! The configuration document and everything that reads it.
//!
//! - [`tree`]: owned XML tree with text mutation and serialisation.
//! - [`path`]: TagPath parsing and resolution to exactly zero or one node.
//! - [`descriptor`]: derives the editable shape of a resolved node.

pub mod descriptor;
pub mod path;
pub mod tree;

pub use descriptor::{describe, Bounds, DescribeError, FieldDescriptor};
pub use path::{resolve, Addressing, PathError, TagPath};
pub use tree::{NodeId, XmlDocument};
