// src/render/registry.rs

//! Input renderer registry: one markup generator per [`InputKind`].
//!
//! Every interactive renderer binds focus to [`Action::Suspend`] and blur to
//! [`Action::Resume`]; a field never re-renders while it has focus.

use std::collections::BTreeMap;
use std::fmt;

use crate::diagnostic::Diagnostic;
use crate::document::{FieldDescriptor, TagPath};
use crate::types::InputKind;

use super::control::{Action, Binding, Control, Trigger};
use super::html::{attr, escape_text};

/// Output of a single renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub markup: String,
    /// `None` for read-only fields.
    pub control: Option<Control>,
}

pub type RenderFn = fn(&TagPath, &FieldDescriptor) -> RenderedField;

pub struct RendererRegistry {
    renderers: BTreeMap<InputKind, RenderFn>,
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RendererRegistry")
            .field("kinds", &self.renderers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl RendererRegistry {
    pub fn empty() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Registry with the renderers the device UI knows about.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(InputKind::Checkbox, render_checkbox);
        registry.register(InputKind::Ip, render_ip);
        registry.register(InputKind::Text, render_text);
        registry.register(InputKind::Number, render_number);
        registry.register(InputKind::SelectionList, render_selection_list);
        registry.register(InputKind::Readonly, render_readonly);
        registry
    }

    /// Register (or replace) the renderer for `kind`.
    pub fn register(&mut self, kind: InputKind, renderer: RenderFn) {
        self.renderers.insert(kind, renderer);
    }

    pub fn supports(&self, kind: InputKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Render a described field, or report the kind as unsupported.
    pub fn render(
        &self,
        path: &TagPath,
        descriptor: &FieldDescriptor,
    ) -> Result<RenderedField, Diagnostic> {
        match self.renderers.get(&descriptor.kind) {
            Some(renderer) => Ok(renderer(path, descriptor)),
            None => Err(Diagnostic::UnsupportedKind {
                path: path.clone(),
                kind: descriptor.kind.to_string(),
            }),
        }
    }
}

const EDIT_SESSION: [Binding; 2] = [
    Binding::new(Trigger::Focus, Action::Suspend),
    Binding::new(Trigger::Blur, Action::Resume),
];

fn control(path: &TagPath, kind: InputKind, commit: &[Binding]) -> Control {
    let mut bindings = EDIT_SESSION.to_vec();
    bindings.extend_from_slice(commit);
    Control {
        path: path.clone(),
        kind,
        bindings,
        option_count: None,
    }
}

/// Attributes shared by every control: identity, kind and bindings.
fn identity_attrs(control: &Control) -> String {
    let path = control.path.to_string();
    let mut out = String::new();
    out.push_str(&attr("id", &path));
    out.push_str(&attr("name", &path));
    out.push_str(&attr("data-path", &path));
    out.push_str(&attr("data-kind", control.kind.as_str()));
    out.push_str(&attr("data-bind", &control.bind_attribute()));
    out
}

fn render_checkbox(path: &TagPath, descriptor: &FieldDescriptor) -> RenderedField {
    let control = control(
        path,
        InputKind::Checkbox,
        &[Binding::new(Trigger::Click, Action::Commit)],
    );
    let checked = if descriptor.checked() { " checked" } else { "" };
    let markup = format!(
        "<input type=\"checkbox\"{}{checked}/>",
        identity_attrs(&control)
    );
    RenderedField {
        markup,
        control: Some(control),
    }
}

fn render_ip(path: &TagPath, descriptor: &FieldDescriptor) -> RenderedField {
    let control = control(
        path,
        InputKind::Ip,
        &[Binding::new(Trigger::Enter, Action::CommitValidIp)],
    );
    let markup = format!(
        "<input type=\"text\"{}{}/>",
        identity_attrs(&control),
        attr("value", &descriptor.value)
    );
    RenderedField {
        markup,
        control: Some(control),
    }
}

const TEXT_COMMITS: [Binding; 3] = [
    Binding::new(Trigger::Click, Action::Commit),
    Binding::new(Trigger::Change, Action::Commit),
    Binding::new(Trigger::Enter, Action::Commit),
];

fn render_text(path: &TagPath, descriptor: &FieldDescriptor) -> RenderedField {
    let control = control(path, InputKind::Text, &TEXT_COMMITS);
    let markup = format!(
        "<input type=\"text\"{}{}/>",
        identity_attrs(&control),
        attr("value", &descriptor.value)
    );
    RenderedField {
        markup,
        control: Some(control),
    }
}

fn render_number(path: &TagPath, descriptor: &FieldDescriptor) -> RenderedField {
    let control = control(path, InputKind::Number, &TEXT_COMMITS);
    let mut markup = format!(
        "<input type=\"number\"{}{}",
        identity_attrs(&control),
        attr("value", &descriptor.value)
    );
    if let Some(bounds) = descriptor.bounds {
        markup.push_str(&attr("min", &bounds.min.to_string()));
        markup.push_str(&attr("max", &bounds.max.to_string()));
    }
    markup.push_str("/>");
    RenderedField {
        markup,
        control: Some(control),
    }
}

fn render_selection_list(path: &TagPath, descriptor: &FieldDescriptor) -> RenderedField {
    let options = descriptor.options.as_deref().unwrap_or_default();
    let mut control = control(
        path,
        InputKind::SelectionList,
        &[Binding::new(Trigger::Change, Action::Commit)],
    );
    control.option_count = Some(options.len());

    let selected = descriptor.selected_index();
    let mut markup = format!("<select{}>", identity_attrs(&control));
    for (index, label) in options.iter().enumerate() {
        markup.push_str("<option");
        markup.push_str(&attr("value", &index.to_string()));
        if selected == Some(index) {
            markup.push_str(" selected");
        }
        markup.push('>');
        markup.push_str(&escape_text(label));
        markup.push_str("</option>");
    }
    markup.push_str("</select>");

    RenderedField {
        markup,
        control: Some(control),
    }
}

fn render_readonly(_path: &TagPath, descriptor: &FieldDescriptor) -> RenderedField {
    RenderedField {
        markup: escape_text(&descriptor.value).into_owned(),
        control: None,
    }
}
