// src/console.rs

//! Line-oriented front-end for `confsync watch --interactive`.
//!
//! Each stdin line is one interaction on a rendered control:
//!
//! ```text
//! focus tuner freq
//! enter tuner freq = 600
//! blur tuner freq
//! click fbcLinked = true
//! change diseqcType = 1
//! quit
//! ```
//!
//! The path is everything between the trigger word and ` = `.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::document::TagPath;
use crate::engine::{SyncEvent, UiInteraction};
use crate::render::Trigger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Interaction(UiInteraction),
    Quit,
}

/// Parse one console line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    if line == "quit" || line == "exit" {
        return Ok(Some(ConsoleCommand::Quit));
    }

    let (word, rest) = line
        .split_once(char::is_whitespace)
        .ok_or_else(|| format!("expected '<trigger> <path>', got '{line}'"))?;
    let trigger: Trigger = word.parse()?;

    let (path, value) = match rest.split_once(" = ") {
        Some((path, value)) => (path, Some(value.to_string())),
        None => match rest.trim_end().strip_suffix(" =") {
            Some(path) => (path, Some(String::new())),
            None => (rest, None),
        },
    };
    let path = TagPath::parse(path).map_err(|e| e.to_string())?;

    if value.is_none() && matches!(trigger, Trigger::Enter | Trigger::Change) {
        return Err(format!("'{trigger}' needs a value: {trigger} <path> = <value>"));
    }

    Ok(Some(ConsoleCommand::Interaction(UiInteraction {
        path,
        trigger,
        value,
    })))
}

/// Read interactions from stdin and forward them to the runtime.
pub fn spawn_console(runtime_tx: mpsc::Sender<SyncEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => {
                    debug!("stdin closed; console stopping");
                    break;
                }
                Err(err) => {
                    warn!(error = %err, "failed to read stdin; console stopping");
                    break;
                }
            };

            let event = match parse_line(&line) {
                Ok(Some(ConsoleCommand::Interaction(interaction))) => {
                    SyncEvent::Interaction(interaction)
                }
                Ok(Some(ConsoleCommand::Quit)) => SyncEvent::ShutdownRequested,
                Ok(None) => continue,
                Err(err) => {
                    eprintln!("confsync: {err}");
                    continue;
                }
            };

            let quit = matches!(event, SyncEvent::ShutdownRequested);
            if runtime_tx.send(event).await.is_err() || quit {
                break;
            }
        }
    })
}
