// src/render/row.rs

//! Row builder and page assembly.
//!
//! A row whose path does not resolve is omitted entirely: this is how
//! optional or firmware-dependent fields disappear from the table.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::diagnostic::Diagnostic;
use crate::document::{describe, resolve, DescribeError, PathError, TagPath, XmlDocument};

use super::control::Control;
use super::html::escape_text;
use super::registry::RendererRegistry;

/// One configured table row: a label and the path of the field it shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    pub label: String,
    pub path: TagPath,
}

impl RowSpec {
    pub fn new(label: impl Into<String>, path: TagPath) -> Self {
        Self {
            label: label.into(),
            path,
        }
    }
}

/// The rows of one page, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageLayout {
    pub title: Option<String>,
    pub rows: Vec<RowSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub markup: String,
    pub control: Option<Control>,
    /// Set when the field cell had to be left empty.
    pub diagnostic: Option<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// The path is not in the document; no `<tr>` is produced.
    Omitted,
    Row(Row),
}

fn row_markup(label: &str, field: &str) -> String {
    format!(
        "<tr><td align=\"left\">{}</td><td align=\"left\">{field}</td></tr>",
        escape_text(label)
    )
}

fn empty_row(label: &str, diagnostic: Diagnostic) -> RowOutcome {
    RowOutcome::Row(Row {
        markup: row_markup(label, ""),
        control: None,
        diagnostic: Some(diagnostic),
    })
}

/// Build the row for `path`.
pub fn build_row(
    label: &str,
    doc: &XmlDocument,
    path: &TagPath,
    registry: &RendererRegistry,
) -> RowOutcome {
    let node = match resolve(doc, path) {
        Ok(Some(node)) => node,
        Ok(None) => {
            debug!(%path, "row path absent; omitting row");
            return RowOutcome::Omitted;
        }
        Err(PathError::Ambiguous { path, count }) => {
            return empty_row(label, Diagnostic::AmbiguousPath { path, count });
        }
        Err(other) => {
            return empty_row(
                label,
                Diagnostic::MalformedField {
                    path: path.clone(),
                    reason: other.to_string(),
                },
            );
        }
    };

    let descriptor = match describe(doc, node) {
        Ok(descriptor) => descriptor,
        Err(DescribeError::UnsupportedKind(kind)) => {
            return empty_row(
                label,
                Diagnostic::UnsupportedKind {
                    path: path.clone(),
                    kind,
                },
            );
        }
        Err(other) => {
            return empty_row(
                label,
                Diagnostic::MalformedField {
                    path: path.clone(),
                    reason: other.to_string(),
                },
            );
        }
    };

    match registry.render(path, &descriptor) {
        Ok(field) => RowOutcome::Row(Row {
            markup: row_markup(label, &field.markup),
            control: field.control,
            diagnostic: None,
        }),
        Err(diagnostic) => empty_row(label, diagnostic),
    }
}

/// A rendered table plus the controls it contains, keyed by path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedPage {
    pub html: String,
    pub controls: BTreeMap<TagPath, Control>,
    pub diagnostics: Vec<Diagnostic>,
    pub rows_rendered: usize,
    pub rows_omitted: usize,
}

impl RenderedPage {
    pub fn control(&self, path: &TagPath) -> Option<&Control> {
        self.controls.get(path)
    }
}

/// Render every row of `layout` against `doc` into one `<table>`.
pub fn build_page(
    layout: &PageLayout,
    doc: &XmlDocument,
    registry: &RendererRegistry,
) -> RenderedPage {
    let mut page = RenderedPage::default();
    let mut html = String::from("<table class=\"confsync\">");
    if let Some(title) = &layout.title {
        html.push_str("<caption>");
        html.push_str(&escape_text(title));
        html.push_str("</caption>");
    }

    for spec in &layout.rows {
        match build_row(&spec.label, doc, &spec.path, registry) {
            RowOutcome::Omitted => page.rows_omitted += 1,
            RowOutcome::Row(row) => {
                html.push_str(&row.markup);
                if let Some(control) = row.control {
                    page.controls.insert(control.path.clone(), control);
                }
                if let Some(diagnostic) = row.diagnostic {
                    warn!(path = %spec.path, %diagnostic, "row rendered without a field");
                    page.diagnostics.push(diagnostic);
                }
                page.rows_rendered += 1;
            }
        }
    }

    html.push_str("</table>");
    page.html = html;
    page
}
