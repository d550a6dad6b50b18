// src/render/control.rs

//! Typed commit bindings carried alongside the rendered markup.
//!
//! The markup carries the same information in its `data-bind` attribute, but
//! the engine never reads it back from HTML: it looks up the [`Control`] by
//! its [`TagPath`].

use std::fmt;
use std::str::FromStr;

use crate::document::TagPath;
use crate::types::InputKind;

/// A user interaction on a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    Focus,
    Blur,
    Click,
    /// Enter key pressed inside the control.
    Enter,
    /// Value changed and the control lost focus (or a select changed).
    Change,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Focus => "focus",
            Trigger::Blur => "blur",
            Trigger::Click => "click",
            Trigger::Enter => "enter",
            Trigger::Change => "change",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trigger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "focus" => Ok(Trigger::Focus),
            "blur" => Ok(Trigger::Blur),
            "click" => Ok(Trigger::Click),
            "enter" => Ok(Trigger::Enter),
            "change" => Ok(Trigger::Change),
            other => Err(format!("unknown trigger '{other}'")),
        }
    }
}

/// What a binding does when its trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Begin an edit session: background refresh is suspended.
    Suspend,
    /// End the edit session opened by `Suspend`.
    Resume,
    Commit,
    /// Commit only if the value is a dotted-quad IPv4 address.
    CommitValidIp,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Suspend => "suspend",
            Action::Resume => "resume",
            Action::Commit => "commit",
            Action::CommitValidIp => "commit-ip",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub trigger: Trigger,
    pub action: Action,
}

impl Binding {
    pub const fn new(trigger: Trigger, action: Action) -> Self {
        Self { trigger, action }
    }
}

/// An interactive control emitted by a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub path: TagPath,
    pub kind: InputKind,
    pub bindings: Vec<Binding>,
    /// Number of options for selection lists.
    pub option_count: Option<usize>,
}

impl Control {
    /// Actions bound to `trigger`, in declaration order.
    pub fn actions_for(&self, trigger: Trigger) -> impl Iterator<Item = Action> + '_ {
        self.bindings
            .iter()
            .filter(move |b| b.trigger == trigger)
            .map(|b| b.action)
    }

    /// `data-bind` attribute value, e.g. `focus:suspend blur:resume enter:commit`.
    pub fn bind_attribute(&self) -> String {
        self.bindings
            .iter()
            .map(|b| format!("{}:{}", b.trigger, b.action.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
