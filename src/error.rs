//! Error types for the content pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::content::validator::ValidationError;

/// Errors produced while loading, rendering or validating content
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Parse error in {document}: {message}")]
    Parse { document: String, message: String },

    #[error("Invalid content in {document}: {source}")]
    Validation {
        document: String,
        #[source]
        source: ValidationError,
    },

    #[error("IO error at {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Content task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ContentError {
    pub(crate) fn parse(document: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            document: document.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The validation failure behind this error, if any
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type Result<T, E = ContentError> = std::result::Result<T, E>;
