use std::path::PathBuf;

use thiserror::Error;

/// Classifies suffix source errors for programmatic matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceErrorKind {
    /// Required path or URL not configured
    NotConfigured,
    /// HTTP request to the categories page failed
    FetchFailed,
    /// Page or snapshot did not contain usable suffix data
    InvalidData,
    /// Snapshot open/read/write failure
    FileError,
}

/// br-domains error types
#[derive(Error, Debug)]
pub enum BrDomainError {
    #[error("Empty suffix set")]
    EmptySuffixSet,

    #[error("Invalid suffix: {0}")]
    InvalidSuffix(String),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Suffix source error: {message}")]
    SourceError {
        kind: SourceErrorKind,
        message: String,
    },

    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("file {0:?} not found.")]
    InputNotFound(PathBuf),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl BrDomainError {
    pub(crate) fn source_error(kind: SourceErrorKind, message: impl Into<String>) -> Self {
        BrDomainError::SourceError {
            kind,
            message: message.into(),
        }
    }

    /// Whether this error means a matcher could not be built from its suffix set.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            BrDomainError::EmptySuffixSet
                | BrDomainError::InvalidSuffix(_)
                | BrDomainError::PatternError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BrDomainError>;
