// src/engine/interaction.rs

//! Interpreting UI interactions against a control's declared bindings.

use std::sync::LazyLock;

use regex::Regex;

use crate::diagnostic::Diagnostic;
use crate::document::FieldDescriptor;
use crate::render::{Action, Control};
use crate::types::InputKind;

use super::{EditEvent, FieldValue, UiInteraction};

static IPV4: LazyLock<Regex> = LazyLock::new(|| {
    let octet = "(25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)";
    Regex::new(&format!(r"^{octet}\.{octet}\.{octet}\.{octet}$"))
        .expect("static IPv4 pattern is valid")
});

/// Dotted-quad check: exactly four octets, each 0-255.
pub fn is_valid_ipv4(value: &str) -> bool {
    IPV4.is_match(value)
}

/// What the core has to do in response to one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reaction {
    BeginEdit,
    EndEdit,
    Commit(EditEvent),
    Alert(Diagnostic),
}

/// Follow the bindings of `control` for the interaction's trigger.
pub fn react(control: &Control, interaction: &UiInteraction) -> Vec<Reaction> {
    let mut reactions = Vec::new();

    for action in control.actions_for(interaction.trigger) {
        match action {
            Action::Suspend => reactions.push(Reaction::BeginEdit),
            Action::Resume => reactions.push(Reaction::EndEdit),
            Action::Commit => {
                if let Some(reaction) = commit_reaction(control, interaction.value.as_deref()) {
                    reactions.push(reaction);
                }
            }
            Action::CommitValidIp => {
                let Some(raw) = interaction.value.as_deref() else {
                    continue;
                };
                if is_valid_ipv4(raw) {
                    reactions.push(Reaction::Commit(EditEvent::new(
                        control.path.clone(),
                        FieldValue::Text(raw.to_string()),
                    )));
                } else {
                    reactions.push(Reaction::Alert(Diagnostic::InvalidIp {
                        path: control.path.clone(),
                        value: raw.to_string(),
                    }));
                }
            }
        }
    }

    reactions
}

fn commit_reaction(control: &Control, raw: Option<&str>) -> Option<Reaction> {
    let raw = raw?;
    let reaction = match parse_field_value(control.kind, control.option_count, raw) {
        Ok(value) => Reaction::Commit(EditEvent::new(control.path.clone(), value)),
        Err(reason) => Reaction::Alert(Diagnostic::MalformedField {
            path: control.path.clone(),
            reason,
        }),
    };
    Some(reaction)
}

/// Convert a UI-reported value into the value shape of a field of `kind`.
///
/// `option_count` bounds the index of a selection list. The `ip` gate is not
/// applied here; see [`checked_edit`].
pub fn parse_field_value(
    kind: InputKind,
    option_count: Option<usize>,
    raw: &str,
) -> Result<FieldValue, String> {
    match kind {
        InputKind::Checkbox => match raw.trim().to_lowercase().as_str() {
            "true" | "on" | "checked" | "1" => Ok(FieldValue::Flag(true)),
            "false" | "off" | "" | "0" => Ok(FieldValue::Flag(false)),
            other => Err(format!("'{other}' is not a check state")),
        },
        InputKind::SelectionList => {
            let index: usize = raw
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not an option index", raw.trim()))?;
            match option_count {
                Some(count) if index >= count => Err(format!(
                    "option index {index} out of range (0..{count})"
                )),
                _ => Ok(FieldValue::Index(index)),
            }
        }
        InputKind::Readonly => Err("field is read-only".to_string()),
        _ => Ok(FieldValue::Text(raw.to_string())),
    }
}

/// Apply the value rules of the described field to an edit that did not
/// come through a control's bindings.
///
/// Returns the edit in the field's value shape, or the alert that blocks it.
pub fn checked_edit(descriptor: &FieldDescriptor, edit: EditEvent) -> Result<EditEvent, Diagnostic> {
    let raw = edit.value.to_string();
    if descriptor.kind == InputKind::Ip {
        return if is_valid_ipv4(&raw) {
            Ok(EditEvent::new(edit.path, FieldValue::Text(raw)))
        } else {
            Err(Diagnostic::InvalidIp {
                path: edit.path,
                value: raw,
            })
        };
    }

    let option_count = descriptor.options.as_ref().map(Vec::len);
    match parse_field_value(descriptor.kind, option_count, &raw) {
        Ok(value) => Ok(EditEvent::new(edit.path, value)),
        Err(reason) => Err(Diagnostic::MalformedField {
            path: edit.path,
            reason,
        }),
    }
}
