//! Crate error types.
//!
//! Row-level parse failures are recoverable (callers skip the row), timing
//! failures are not.

use std::path::PathBuf;

use thiserror::Error;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading lyric files or building keyframe timelines
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<PathBuf>,
    },

    /// A row or field that could not be parsed
    #[error("Parse error in {file:?} row {row}, field `{field}`: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<PathBuf>,
        /// One-based row (line) number.
        row: usize,
        /// Name of the offending field.
        field: &'static str,
        /// Description of the parse failure.
        message: String,
    },

    /// Lyric start times that cannot produce an ordered keyframe sequence
    #[error(
        "Timing order error: line {index} starts at {current}s after a line starting at {previous}s; \
         consecutive lines must be at least {hold_epsilon}s apart"
    )]
    TimingOrder {
        /// Zero-based index of the line that starts too early.
        index: usize,
        /// Start time of the preceding line.
        previous: f64,
        /// Start time of the offending line.
        current: f64,
        /// Minimum spacing required between consecutive lines.
        hold_epsilon: f64,
    },

    /// A start time that is negative, NaN or infinite
    #[error("Invalid start time {value}s for line {index}")]
    InvalidStartTime {
        /// Zero-based index of the line.
        index: usize,
        /// The rejected start time.
        value: f64,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a row-level parse error without file context
    pub fn parse(row: usize, field: &'static str, message: impl Into<String>) -> Self {
        Self::Parse {
            file: None,
            row,
            field,
            message: message.into(),
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Attach a file path to a parse or IO error that has none yet
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::Parse { file: None, row, field, message } => Self::Parse {
                file: Some(path.into()),
                row,
                field,
                message,
            },
            Self::Io { source, path: None } => Self::Io { source, path: Some(path.into()) },
            other => other,
        }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
