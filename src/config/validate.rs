// src/config/validate.rs

use std::collections::HashSet;

use reqwest::Url;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::document::TagPath;
use crate::errors::{ConfsyncError, Result};
use crate::render::{PageLayout, RowSpec};

const MIN_POLL_INTERVAL_MS: u64 = 100;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::ConfsyncError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_device(&raw)?;
        let layout = build_layout(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.device, raw.sync, layout))
    }
}

fn validate_device(cfg: &RawConfigFile) -> Result<()> {
    let device = &cfg.device;

    let url = Url::parse(&device.base_url).map_err(|e| {
        ConfsyncError::ConfigError(format!(
            "[device].base_url '{}' is not a valid URL: {e}",
            device.base_url
        ))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfsyncError::ConfigError(format!(
            "[device].base_url must use http or https (got '{}')",
            url.scheme()
        )));
    }

    if device.document.trim().is_empty() {
        return Err(ConfsyncError::ConfigError(
            "[device].document must not be empty".to_string(),
        ));
    }

    if device.poll_interval_ms < MIN_POLL_INTERVAL_MS {
        return Err(ConfsyncError::ConfigError(format!(
            "[device].poll_interval_ms must be >= {MIN_POLL_INTERVAL_MS} (got {})",
            device.poll_interval_ms
        )));
    }

    if device.request_timeout_ms == 0 {
        return Err(ConfsyncError::ConfigError(
            "[device].request_timeout_ms must be >= 1 (got 0)".to_string(),
        ));
    }

    Ok(())
}

fn build_layout(cfg: &RawConfigFile) -> Result<PageLayout> {
    if cfg.page.rows.is_empty() {
        return Err(ConfsyncError::ConfigError(
            "config must contain at least one [[page.row]] entry".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    let mut rows = Vec::with_capacity(cfg.page.rows.len());

    for row in &cfg.page.rows {
        let path = TagPath::parse(&row.path).map_err(|e| {
            ConfsyncError::ConfigError(format!("row '{}' has an invalid path: {e}", row.label))
        })?;
        if !seen.insert(path.clone()) {
            return Err(ConfsyncError::ConfigError(format!(
                "path '{path}' appears in more than one row"
            )));
        }
        rows.push(RowSpec::new(row.label.clone(), path));
    }

    Ok(PageLayout {
        title: cfg.page.title.clone(),
        rows,
    })
}
