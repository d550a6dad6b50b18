// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

use crate::document::path::PathError;

#[derive(Error, Debug)]
pub enum ConfsyncError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("XML error: {0}")]
    XmlError(String),

    #[error("Path error: {0}")]
    Path(#[from] PathError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<quick_xml::Error> for ConfsyncError {
    fn from(err: quick_xml::Error) -> Self {
        ConfsyncError::XmlError(err.to_string())
    }
}

impl From<reqwest::Error> for ConfsyncError {
    fn from(err: reqwest::Error) -> Self {
        ConfsyncError::Transport(err.to_string())
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ConfsyncError>;
