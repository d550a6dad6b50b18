// tests/config_loading.rs

use std::error::Error;
use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use confsync::config::{load_and_validate, load_from_path, ConfigFile};
use confsync::document::Addressing;
use confsync::errors::ConfsyncError;
use confsync::types::AbsentCommitPolicy;
use confsync_test_utils::builders::{path, ConfigFileBuilder};

type TestResult = Result<(), Box<dyn Error>>;

fn write_config(toml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(toml.as_bytes()).expect("write temp config");
    file
}

fn expect_config_error(result: confsync::errors::Result<ConfigFile>, needle: &str) {
    match result {
        Err(ConfsyncError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "message {msg:?} should mention {needle:?}")
        }
        other => panic!("expected a config error mentioning {needle:?}, got {other:?}"),
    }
}

#[test]
fn full_config_loads_with_rows_in_order() -> TestResult {
    let file = write_config(
        r#"
[device]
base_url = "http://192.168.1.20:8875"
document = "config.xml"
poll_interval_ms = 1500
request_timeout_ms = 800

[sync]
absent_commit = "report"

[page]
title = "Configure"

[[page.row]]
label = "Frequency"
path = "tuner freq"

[[page.row]]
label = "FBC linked"
path = "frontend0.fbc.fbcLinked"
"#,
    );

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.poll_interval(), Duration::from_millis(1500));
    assert_eq!(cfg.request_timeout(), Duration::from_millis(800));
    assert_eq!(cfg.sync.absent_commit, AbsentCommitPolicy::Report);
    assert_eq!(cfg.title(), "Configure");

    let rows = &cfg.layout.rows;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].label, "Frequency");
    assert_eq!(rows[0].path, path("tuner freq"));
    assert_eq!(rows[1].path.addressing(), Addressing::Legacy);
    Ok(())
}

#[test]
fn defaults_are_applied() -> TestResult {
    let file = write_config(
        r#"
[device]
base_url = "https://tuner.local/"

[[page.row]]
label = "Host"
path = "hostname"
"#,
    );

    let cfg = load_and_validate(file.path())?;

    assert_eq!(cfg.device.document, "config.xml");
    assert_eq!(cfg.poll_interval(), Duration::from_millis(2000));
    assert_eq!(cfg.request_timeout(), Duration::from_millis(5000));
    assert_eq!(cfg.sync.absent_commit, AbsentCommitPolicy::Drop);
    // Without a page title the document name is used.
    assert_eq!(cfg.title(), "config.xml");
    Ok(())
}

#[test]
fn raw_load_does_not_validate() -> TestResult {
    let file = write_config(
        r#"
[device]
base_url = "ftp://tuner.local"
poll_interval_ms = 1
"#,
    );

    let raw = load_from_path(file.path())?;
    assert_eq!(raw.device.poll_interval_ms, 1);
    assert!(raw.page.rows.is_empty());
    Ok(())
}

#[test]
fn missing_file_is_an_io_error() {
    let result = load_and_validate("/definitely/not/here/Confsync.toml");
    assert!(matches!(result, Err(ConfsyncError::IoError(_))));
}

#[test]
fn unknown_absent_commit_policy_is_a_toml_error() {
    let file = write_config(
        r#"
[device]
base_url = "http://tuner.local"

[sync]
absent_commit = "ignore"
"#,
    );
    assert!(matches!(
        load_and_validate(file.path()),
        Err(ConfsyncError::TomlError(_))
    ));
}

#[test]
fn missing_device_section_is_a_toml_error() {
    let file = write_config("[[page.row]]\nlabel = \"Host\"\npath = \"hostname\"\n");
    assert!(matches!(
        load_and_validate(file.path()),
        Err(ConfsyncError::TomlError(_))
    ));
}

#[test]
fn invalid_settings_are_rejected() {
    expect_config_error(
        ConfigFile::try_from(ConfigFileBuilder::new().with_base_url("not a url").with_row("Host", "hostname").raw()),
        "not a valid URL",
    );
    expect_config_error(
        ConfigFile::try_from(ConfigFileBuilder::new().with_base_url("ftp://tuner.local").with_row("Host", "hostname").raw()),
        "http or https",
    );
    expect_config_error(
        ConfigFile::try_from(ConfigFileBuilder::new().with_document("  ").with_row("Host", "hostname").raw()),
        "document",
    );
    expect_config_error(
        ConfigFile::try_from(ConfigFileBuilder::new().with_poll_interval_ms(50).with_row("Host", "hostname").raw()),
        "poll_interval_ms",
    );
    expect_config_error(ConfigFile::try_from(ConfigFileBuilder::new().raw()), "at least one");
}

#[test]
fn row_paths_are_checked() {
    expect_config_error(
        ConfigFile::try_from(ConfigFileBuilder::new().with_row("Broken", "tuner..freq").raw()),
        "row 'Broken' has an invalid path",
    );
    // Same path written two ways is still the same row.
    expect_config_error(
        ConfigFile::try_from(
            ConfigFileBuilder::new()
                .with_row("Frequency", "tuner freq")
                .with_row("Again", "tuner   freq")
                .raw(),
        ),
        "more than one row",
    );
}

#[test]
fn builder_produces_a_valid_config() {
    let cfg = ConfigFileBuilder::new()
        .with_title("Tuner")
        .with_absent_commit(AbsentCommitPolicy::Report)
        .with_row("Frequency", "tuner freq")
        .build();

    assert_eq!(cfg.title(), "Tuner");
    assert_eq!(cfg.layout.rows.len(), 1);
}
