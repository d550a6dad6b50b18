// src/render/mod.rs

//! Document → HTML rendering.
//!
//! - [`registry`] maps an input kind to its renderer.
//! - [`row`] composes label + field rows and assembles the page table.
//! - [`control`] holds the typed bindings each interactive field declares.
//! - [`html`] has the escaping helpers.

pub mod control;
pub mod html;
pub mod registry;
pub mod row;

pub use control::{Action, Binding, Control, Trigger};
pub use registry::{RenderFn, RenderedField, RendererRegistry};
pub use row::{build_page, build_row, PageLayout, RenderedPage, Row, RowOutcome, RowSpec};
