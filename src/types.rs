use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// What the commit protocol does when the edited path no longer resolves.
///
/// - `Drop`: log the edit at warn level and post nothing (default).
/// - `Report`: same as `Drop`, and additionally surface an alert to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsentCommitPolicy {
    Drop,
    Report,
}

impl Default for AbsentCommitPolicy {
    fn default() -> Self {
        AbsentCommitPolicy::Drop
    }
}

impl FromStr for AbsentCommitPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(AbsentCommitPolicy::Drop),
            "report" => Ok(AbsentCommitPolicy::Report),
            other => Err(format!(
                "invalid absent_commit: {other} (expected \"drop\" or \"report\")"
            )),
        }
    }
}

/// Input kind declared by a node's `inputtype` child.
///
/// `Readonly` is implied when the child is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    Checkbox,
    Ip,
    Text,
    Number,
    SelectionList,
    Readonly,
}

impl InputKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Checkbox => "checkbox",
            InputKind::Ip => "ip",
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::SelectionList => "selectionlist",
            InputKind::Readonly => "readonly",
        }
    }

    /// Whether the kind renders an editable control.
    pub fn is_interactive(&self) -> bool {
        !matches!(self, InputKind::Readonly)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "checkbox" => Ok(InputKind::Checkbox),
            "ip" => Ok(InputKind::Ip),
            "text" => Ok(InputKind::Text),
            "number" => Ok(InputKind::Number),
            "selectionlist" => Ok(InputKind::SelectionList),
            "readonly" => Ok(InputKind::Readonly),
            other => Err(other.to_string()),
        }
    }
}
