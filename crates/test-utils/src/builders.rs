#![allow(dead_code)]

use confsync::config::{
    ConfigFile, DeviceSection, PageSection, RawConfigFile, RowConfig, SyncSection,
};
use confsync::document::TagPath;
use confsync::render::{PageLayout, RowSpec};
use confsync::types::AbsentCommitPolicy;

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                device: DeviceSection {
                    base_url: "http://192.168.1.20:8875".to_string(),
                    document: "config.xml".to_string(),
                    poll_interval_ms: 2000,
                    request_timeout_ms: 5000,
                },
                sync: SyncSection::default(),
                page: PageSection::default(),
            },
        }
    }

    pub fn with_row(mut self, label: &str, path: &str) -> Self {
        self.config.page.rows.push(RowConfig {
            label: label.to_string(),
            path: path.to_string(),
        });
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.config.page.title = Some(title.to_string());
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.config.device.base_url = url.to_string();
        self
    }

    pub fn with_document(mut self, document: &str) -> Self {
        self.config.device.document = document.to_string();
        self
    }

    pub fn with_poll_interval_ms(mut self, ms: u64) -> Self {
        self.config.device.poll_interval_ms = ms;
        self
    }

    pub fn with_absent_commit(mut self, policy: AbsentCommitPolicy) -> Self {
        self.config.sync.absent_commit = policy;
        self
    }

    /// The raw, unvalidated config (for validation tests).
    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `PageLayout`, for tests that skip the config layer.
#[derive(Default)]
pub struct LayoutBuilder {
    layout: PageLayout,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.layout.title = Some(title.to_string());
        self
    }

    pub fn row(mut self, label: &str, path: &str) -> Self {
        let path = TagPath::parse(path).expect("test path must parse");
        self.layout.rows.push(RowSpec::new(label, path));
        self
    }

    pub fn build(self) -> PageLayout {
        self.layout
    }
}

/// Parse a path, panicking on invalid input.
pub fn path(s: &str) -> TagPath {
    TagPath::parse(s).expect("test path must parse")
}

/// The tuner document used across the tests.
///
/// Contains one field of every kind, a read-only status value, and two
/// frontends that both have a `fbcLinked` field (ambiguous by tag name).
pub const TUNER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<data>
  <tuner>
    <freq><inputtype>number</inputtype><value>505</value><minvalue>100</minvalue><maxvalue>2000</maxvalue></freq>
    <delsys>dvbs2</delsys>
  </tuner>
  <ipaddress><inputtype>ip</inputtype><value>192.168.1.20</value></ipaddress>
  <hostname><inputtype>text</inputtype><value>satpi &amp; co</value></hostname>
  <ssdpEnabled><inputtype>checkbox</inputtype><value>true</value></ssdpEnabled>
  <diseqcType>
    <inputtype>selectionlist</inputtype>
    <value>1</value>
    <list><option0>DiSEqc Switch</option0><option1>Unicable (EN50494)</option1><option2>Jess/Unicable 2 (EN50607)</option2></list>
  </diseqcType>
  <reset><inputtype>submit</inputtype><value>0</value></reset>
  <frontend0><fbc><fbcLinked><inputtype>checkbox</inputtype><value>false</value></fbcLinked></fbc></frontend0>
  <frontend1><fbc><fbcLinked><inputtype>checkbox</inputtype><value>true</value></fbcLinked></fbc></frontend1>
</data>
"#;

/// The scenario document: a single numeric field.
pub const FREQ_XML: &str = "<tuner><freq><inputtype>number</inputtype><value>505</value><minvalue>100</minvalue><maxvalue>2000</maxvalue></freq></tuner>";
