// src/engine/event_handlers.rs

//! Event handling logic for the core runtime.

use tracing::{debug, info, warn};

use crate::diagnostic::Diagnostic;
use crate::document::{describe, resolve, DescribeError, PathError, XmlDocument};
use crate::render::{build_page, RenderedPage};
use crate::types::AbsentCommitPolicy;

use super::core::SyncState;
use super::interaction::{checked_edit, react, Reaction};
use super::{EditEvent, UiInteraction};

/// Command produced by the pure core, to be executed by the outer IO shell.
#[derive(Debug, Clone)]
pub enum CoreCommand {
    /// Start an asynchronous fetch of the document.
    FetchDocument { resource: String },
    /// Dispatch a POST of the full serialised document. Fire-and-forget.
    PostDocument { resource: String, body: String },
    /// Show a freshly rendered page.
    Present(RenderedPage),
    /// Show a blocking alert to the user.
    Alert(Diagnostic),
}

/// Decision returned by the core after handling a single `SyncEvent`.
#[derive(Debug, Clone)]
pub struct CoreStep {
    /// Commands the IO shell should execute.
    pub commands: Vec<CoreCommand>,
    /// Whether the outer runtime loop should keep running.
    pub keep_running: bool,
}

impl CoreStep {
    pub(crate) fn continue_with(commands: Vec<CoreCommand>) -> Self {
        Self {
            commands,
            keep_running: true,
        }
    }
}

/// Handle a poll tick.
///
/// While any edit session is open the tick is dropped. A tick that arrives
/// while the previous fetch is still outstanding is dropped as well.
pub fn handle_poll_tick(state: &mut SyncState) -> CoreStep {
    if state.suspension.is_suspended() {
        debug!("poll tick dropped: refresh suspended by an open edit");
        return CoreStep::continue_with(Vec::new());
    }
    if state.fetch_in_flight {
        debug!("poll tick dropped: previous fetch still in flight");
        return CoreStep::continue_with(Vec::new());
    }

    state.fetch_in_flight = true;
    CoreStep::continue_with(vec![CoreCommand::FetchDocument {
        resource: state.resource.clone(),
    }])
}

/// Handle the completion of a document fetch.
///
/// On success the document is replaced in full and the page re-rendered,
/// unless an edit session opened while the fetch was in flight.
pub fn handle_document_fetched(
    state: &mut SyncState,
    result: std::result::Result<XmlDocument, String>,
) -> CoreStep {
    state.fetch_in_flight = false;

    let document = match result {
        Ok(document) => document,
        Err(err) => {
            warn!(resource = %state.resource, error = %err, "fetch failed; no update this tick");
            return CoreStep::continue_with(Vec::new());
        }
    };

    if state.suspension.is_suspended() {
        debug!("fetched document discarded: refresh suspended by an open edit");
        return CoreStep::continue_with(Vec::new());
    }

    let page = build_page(&state.layout, &document, &state.registry);
    state.document = Some(document);

    let mut commands = Vec::new();
    let previous = state.page.take();
    for diagnostic in &page.diagnostics {
        let already_shown = previous
            .as_ref()
            .is_some_and(|p| p.diagnostics.contains(diagnostic));
        if !already_shown {
            commands.push(CoreCommand::Alert(diagnostic.clone()));
        }
    }

    debug!(
        rows = page.rows_rendered,
        omitted = page.rows_omitted,
        "document replaced; page re-rendered"
    );
    commands.push(CoreCommand::Present(page.clone()));
    state.page = Some(page);

    CoreStep::continue_with(commands)
}

/// Handle an interaction on a rendered control.
pub fn handle_interaction(state: &mut SyncState, interaction: UiInteraction) -> CoreStep {
    let control = match state.page.as_ref().and_then(|p| p.control(&interaction.path)) {
        Some(control) => control.clone(),
        None => {
            debug!(path = %interaction.path, "interaction on unknown control ignored");
            return CoreStep::continue_with(Vec::new());
        }
    };

    let mut commands = Vec::new();
    for reaction in react(&control, &interaction) {
        match reaction {
            Reaction::BeginEdit => {
                if !state.open_edits.contains_key(&control.path) {
                    let token = state.suspension.begin(control.path.clone());
                    state.open_edits.insert(control.path.clone(), token);
                }
            }
            Reaction::EndEdit => {
                if let Some(token) = state.open_edits.remove(&control.path) {
                    state.suspension.end(token);
                }
            }
            Reaction::Commit(edit) => commands.extend(handle_commit(state, edit)),
            Reaction::Alert(diagnostic) => {
                warn!(path = %control.path, %diagnostic, "interaction rejected");
                commands.push(CoreCommand::Alert(diagnostic));
            }
        }
    }

    CoreStep::continue_with(commands)
}

/// Commit an edit: write the value into the document, then post the whole
/// document.
///
/// The edit is checked against the field's kind first, whether it came from
/// a control or not: an invalid value raises an alert and leaves the
/// document untouched. The mutation and serialisation both happen here,
/// before the POST command leaves the core, so a send can never overtake its
/// write.
pub fn handle_commit(state: &mut SyncState, edit: EditEvent) -> Vec<CoreCommand> {
    let Some(document) = state.document.as_mut() else {
        warn!(path = %edit.path, "commit before any document was loaded");
        return absent_commit(state.policy, edit);
    };

    let field = match resolve(document, &edit.path) {
        Ok(Some(field)) => field,
        Ok(None) => return absent_commit(state.policy, edit),
        Err(PathError::Ambiguous { path, count }) => {
            warn!(%path, count, "commit path is ambiguous; edit dropped");
            return vec![CoreCommand::Alert(Diagnostic::AmbiguousPath { path, count })];
        }
        Err(other) => {
            warn!(path = %edit.path, error = %other, "commit path invalid; edit dropped");
            return Vec::new();
        }
    };

    let descriptor = match describe(document, field) {
        Ok(descriptor) => descriptor,
        Err(DescribeError::UnsupportedKind(kind)) => {
            warn!(path = %edit.path, %kind, "commit to unsupported field; edit dropped");
            return vec![CoreCommand::Alert(Diagnostic::UnsupportedKind {
                path: edit.path,
                kind,
            })];
        }
        Err(other) => {
            warn!(path = %edit.path, error = %other, "commit to malformed field; edit dropped");
            return vec![CoreCommand::Alert(Diagnostic::MalformedField {
                path: edit.path,
                reason: other.to_string(),
            })];
        }
    };

    let edit = match checked_edit(&descriptor, edit) {
        Ok(edit) => edit,
        Err(diagnostic) => {
            warn!(path = %diagnostic.path(), %diagnostic, "commit rejected");
            return vec![CoreCommand::Alert(diagnostic)];
        }
    };

    let Some(node) = document.child_named(field, "value") else {
        return absent_commit(state.policy, edit);
    };
    let value = edit.value.to_string();
    document.set_text(node, &value);
    info!(path = %edit.path, %value, "committing edit");
    vec![CoreCommand::PostDocument {
        resource: state.resource.clone(),
        body: document.to_xml_string(),
    }]
}

fn absent_commit(policy: AbsentCommitPolicy, edit: EditEvent) -> Vec<CoreCommand> {
    warn!(path = %edit.path, value = %edit.value, "commit path absent; edit dropped");
    match policy {
        AbsentCommitPolicy::Drop => Vec::new(),
        AbsentCommitPolicy::Report => vec![CoreCommand::Alert(Diagnostic::AbsentCommitPath {
            path: edit.path,
        })],
    }
}
