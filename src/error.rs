use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input came up empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyInput {
    FlowLogs,
    Tags,
}

impl fmt::Display for EmptyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyInput::FlowLogs => write!(f, "No flow logs found"),
            EmptyInput::Tags => write!(f, "No tags found"),
        }
    }
}

/// Fatal errors for a counting run. No report is produced when one of these is returned.
#[derive(Error, Debug)]
pub enum FlowTagError {
    #[error("{0}")]
    EmptyInput(EmptyInput),

    #[error("aggregation failed: {0}")]
    Aggregation(#[source] RecordError),
}

/// Per-line and per-record problems. Only a counter overflow stops a batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Invalid record: {fields:?}")]
    MalformedRecord { fields: Vec<String> },

    #[error("Invalid tag lookup: {row:?}")]
    MalformedTagRow { row: Vec<String> },

    #[error("Protocol '{protocol}' not found in protocol mappings")]
    UnknownProtocol { protocol: String },

    #[error("count for '{key}' overflowed")]
    CounterOverflow { key: String },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to create report directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FlowTagError>;
