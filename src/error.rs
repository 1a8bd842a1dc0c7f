//! Error types for ingestion, configuration and export.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn file content into series.
///
/// Individual malformed cells never produce an error; only a source with no
/// usable content does.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("CSV content is empty or unreadable ({reason})")]
    EmptyOrUnreadable { reason: String },
}

impl IngestError {
    pub(crate) fn empty() -> Self {
        IngestError::EmptyOrUnreadable {
            reason: "no content".to_string(),
        }
    }

    pub(crate) fn unreadable(reason: impl Into<String>) -> Self {
        IngestError::EmptyOrUnreadable {
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("HOME env var not set")]
    NoHome,
    #[error("Failed to access config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config file {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Config serialization error: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Captured image is empty")]
    EmptyCapture,
    #[error("Captured pixel buffer does not match {width}x{height}")]
    SizeMismatch { width: u32, height: u32 },
    #[error("Failed to write PNG: {0}")]
    Image(#[from] image::ImageError),
}
