// src/engine/suspension.rs

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::document::TagPath;

/// Edit-session token. Issued when an edit starts and handed back when it
/// ends; refresh stays paused while any token is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EditToken(u64);

impl fmt::Display for EditToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "edit#{}", self.0)
    }
}

/// The poller's "paused-by" set.
///
/// Two states: active (empty set) and suspended (at least one token).
/// A poll tick that arrives while suspended is dropped, never deferred.
#[derive(Debug, Default)]
pub struct SuspensionSet {
    next_token: u64,
    paused_by: BTreeMap<EditToken, TagPath>,
}

impl SuspensionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an edit session on `path`.
    pub fn begin(&mut self, path: TagPath) -> EditToken {
        self.next_token += 1;
        let token = EditToken(self.next_token);
        debug!(%token, %path, "refresh suspended");
        self.paused_by.insert(token, path);
        token
    }

    /// End an edit session. Returns `false` for a token that was not open.
    pub fn end(&mut self, token: EditToken) -> bool {
        match self.paused_by.remove(&token) {
            Some(path) => {
                debug!(%token, %path, remaining = self.paused_by.len(), "edit session ended");
                true
            }
            None => false,
        }
    }

    pub fn is_suspended(&self) -> bool {
        !self.paused_by.is_empty()
    }

    /// Paths currently being edited.
    pub fn paused_by(&self) -> impl Iterator<Item = (&EditToken, &TagPath)> {
        self.paused_by.iter()
    }
}
