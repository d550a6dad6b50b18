// src/engine/mod.rs

//! Live synchronisation engine.
//!
//! The configuration document has two writers: the poller, which replaces it
//! wholesale, and the commit protocol, which mutates one `value` in place.
//! Both reach the document only through [`SyncEvent`]s applied one at a time
//! by the core, so no lock around the document is needed.
//!
//! The pure core state machine lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`]. [`suspension`] holds the edit-session tokens
//! that pause background refresh, [`interaction`] turns UI interactions into
//! reactions by following the bindings each control declared, and [`poller`]
//! produces the periodic ticks.

use std::fmt;

use crate::document::{TagPath, XmlDocument};
use crate::render::Trigger;

/// Value carried by an edit, in the shape the control produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    Index(usize),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Flag(flag) => write!(f, "{flag}"),
            FieldValue::Index(index) => write!(f, "{index}"),
        }
    }
}

/// A user-originated change, consumed exactly once by the commit protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditEvent {
    pub path: TagPath,
    pub value: FieldValue,
}

impl EditEvent {
    pub fn new(path: TagPath, value: FieldValue) -> Self {
        Self { path, value }
    }
}

/// A raw interaction on a rendered control. `value` is the control's current
/// value as the UI reports it (check state, selected index or text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiInteraction {
    pub path: TagPath,
    pub trigger: Trigger,
    pub value: Option<String>,
}

/// Events flowing into the runtime from the poller, transport and UI.
#[derive(Debug, Clone)]
pub enum SyncEvent {
    /// The poll interval elapsed.
    PollTick,
    /// A document fetch finished.
    DocumentFetched {
        result: std::result::Result<XmlDocument, String>,
    },
    /// The user interacted with a rendered control.
    Interaction(UiInteraction),
    /// Commit a value directly, bypassing control bindings.
    Commit(EditEvent),
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod event_handlers;
pub mod interaction;
pub mod poller;
pub mod runtime;
pub mod suspension;

pub use self::core::CoreRuntime;
pub use event_handlers::{CoreCommand, CoreStep};
pub use interaction::is_valid_ipv4;
pub use poller::spawn_poller;
pub use runtime::Runtime;
pub use suspension::{EditToken, SuspensionSet};
