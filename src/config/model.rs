// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::render::PageLayout;
use crate::types::AbsentCommitPolicy;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [device]
/// base_url = "http://192.168.1.20:8875"
/// document = "config.xml"
/// poll_interval_ms = 2000
///
/// [sync]
/// absent_commit = "report"
///
/// [page]
/// title = "Configure"
///
/// [[page.row]]
/// label = "SSDP announce interval"
/// path = "ssdpInterval"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub device: DeviceSection,

    #[serde(default)]
    pub sync: SyncSection,

    #[serde(default)]
    pub page: PageSection,
}

/// `[device]` section: where the document lives and how often to poll it.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceSection {
    /// Base URL of the tuner server's web interface.
    pub base_url: String,

    /// Name of the document on the device, relative to `base_url`.
    #[serde(default = "default_document")]
    pub document: String,

    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_document() -> String {
    "config.xml".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_request_timeout_ms() -> u64 {
    5000
}

/// `[sync]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncSection {
    /// `"drop"` (default) or `"report"`.
    #[serde(default)]
    pub absent_commit: AbsentCommitPolicy,
}

/// `[page]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageSection {
    #[serde(default)]
    pub title: Option<String>,

    /// `[[page.row]]` entries in display order.
    #[serde(default, rename = "row")]
    pub rows: Vec<RowConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RowConfig {
    pub label: String,
    /// TagPath of the field, legacy (`fbc.fbcLinked`) or selector
    /// (`frontend fbcLinked`) form.
    pub path: String,
}

/// Validated configuration. Only obtainable through `TryFrom<RawConfigFile>`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub device: DeviceSection,
    pub sync: SyncSection,
    pub layout: PageLayout,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(device: DeviceSection, sync: SyncSection, layout: PageLayout) -> Self {
        Self {
            device,
            sync,
            layout,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.device.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.device.request_timeout_ms)
    }

    /// Page title, falling back to the document name.
    pub fn title(&self) -> &str {
        self.layout
            .title
            .as_deref()
            .unwrap_or(self.device.document.as_str())
    }
}
