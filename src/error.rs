use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification callers can branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IoFailure,
    ParseFailure,
    SchemaMismatch,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{context} ({path}): {source}")]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid record: {message}")]
    Parse { message: String },

    #[error("Schema mismatch in {file}: expected {expected} columns, found {found}")]
    SchemaMismatch {
        file: String,
        expected: usize,
        found: usize,
    },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Io { .. } => ErrorKind::IoFailure,
            StoreError::Parse { .. } => ErrorKind::ParseFailure,
            StoreError::SchemaMismatch { .. } => ErrorKind::SchemaMismatch,
        }
    }

    pub(crate) fn io(
        context: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        StoreError::Io {
            context,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(message: impl Into<String>) -> Self {
        StoreError::Parse {
            message: message.into(),
        }
    }
}

impl From<csv::Error> for StoreError {
    fn from(err: csv::Error) -> Self {
        StoreError::parse(err.to_string())
    }
}
