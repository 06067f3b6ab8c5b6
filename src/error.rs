use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or parsing a kernel counter source.
#[derive(Debug, Error)]
pub enum SampleError {
    #[error("{}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}: expected {expected} fields, found {found}")]
    ParseShortfall {
        source_name: &'static str,
        expected: usize,
        found: usize,
    },
}

impl SampleError {
    pub fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SampleError::SourceUnavailable {
            path: path.into(),
            source,
        }
    }
}

/// Failures while parsing a single `/proc/<pid>/stat` record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record has no parenthesized name field")]
    MissingName,

    #[error("record tail has {found} fields, tick counts need {expected}")]
    ShortTail { expected: usize, found: usize },
}
