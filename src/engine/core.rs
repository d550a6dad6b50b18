// src/engine/core.rs

//! Pure core runtime state machine.
//!
//! This module contains a synchronous, deterministic "core runtime" that
//! consumes [`SyncEvent`]s and produces:
//! - an updated core state (document, last rendered page, edit sessions)
//! - a list of "commands" describing what the IO shell should do next
//!
//! The async/IO-heavy shell (`engine::runtime::Runtime`) is responsible for:
//! - reading events from the channel
//! - running fetches and posts on the transport
//! - handing pages and alerts to the presenter
//!
//! The core is intended to be extensively unit tested without any Tokio,
//! channels, network, or filesystem.

use std::collections::HashMap;

use crate::document::{TagPath, XmlDocument};
use crate::engine::event_handlers::{
    handle_commit, handle_document_fetched, handle_interaction, handle_poll_tick, CoreStep,
};
use crate::engine::suspension::{EditToken, SuspensionSet};
use crate::engine::SyncEvent;
use crate::render::{PageLayout, RenderedPage, RendererRegistry};
use crate::types::AbsentCommitPolicy;

/// Everything the event handlers operate on.
#[derive(Debug)]
pub struct SyncState {
    pub(crate) resource: String,
    pub(crate) layout: PageLayout,
    pub(crate) registry: RendererRegistry,
    pub(crate) policy: AbsentCommitPolicy,
    pub(crate) document: Option<XmlDocument>,
    pub(crate) page: Option<RenderedPage>,
    pub(crate) suspension: SuspensionSet,
    /// Edit sessions opened by focus on a control, closed by its blur.
    pub(crate) open_edits: HashMap<TagPath, EditToken>,
    pub(crate) fetch_in_flight: bool,
}

/// Pure core runtime.
///
/// It owns the only copy of the configuration document and has **no**
/// channels, no Tokio types, and does not perform any IO.
#[derive(Debug)]
pub struct CoreRuntime {
    state: SyncState,
}

impl CoreRuntime {
    pub fn new(
        resource: impl Into<String>,
        layout: PageLayout,
        registry: RendererRegistry,
        policy: AbsentCommitPolicy,
    ) -> Self {
        Self {
            state: SyncState {
                resource: resource.into(),
                layout,
                registry,
                policy,
                document: None,
                page: None,
                suspension: SuspensionSet::new(),
                open_edits: HashMap::new(),
                fetch_in_flight: false,
            },
        }
    }

    /// Current document, if one has been loaded.
    pub fn document(&self) -> Option<&XmlDocument> {
        self.state.document.as_ref()
    }

    /// Most recently rendered page.
    pub fn page(&self) -> Option<&RenderedPage> {
        self.state.page.as_ref()
    }

    pub fn is_suspended(&self) -> bool {
        self.state.suspension.is_suspended()
    }

    /// Open an edit session outside of control bindings. Background refresh
    /// stays paused until the token is passed to [`CoreRuntime::end_edit`].
    pub fn begin_edit(&mut self, path: TagPath) -> EditToken {
        self.state.suspension.begin(path)
    }

    pub fn end_edit(&mut self, token: EditToken) -> bool {
        self.state.suspension.end(token)
    }

    /// Handle a single sync event, updating core state and returning the
    /// resulting commands for the IO shell.
    pub fn step(&mut self, event: SyncEvent) -> CoreStep {
        match event {
            SyncEvent::PollTick => handle_poll_tick(&mut self.state),
            SyncEvent::DocumentFetched { result } => {
                handle_document_fetched(&mut self.state, result)
            }
            SyncEvent::Interaction(interaction) => {
                handle_interaction(&mut self.state, interaction)
            }
            SyncEvent::Commit(edit) => {
                CoreStep::continue_with(handle_commit(&mut self.state, edit))
            }
            SyncEvent::ShutdownRequested => CoreStep {
                commands: Vec::new(),
                keep_running: false,
            },
        }
    }
}
