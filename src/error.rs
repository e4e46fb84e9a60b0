//! Probe error types
//!
//! Errors never cross the public check boundary: [`crate::probe::CheckContext`]
//! turns every [`ProbeError`] into a failed [`crate::ProbeResult`] and writes the
//! message to the configuration log.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    /// The tool could not be located on the search path
    #[error("{0} not found")]
    ToolNotFound(String),

    /// The tool ran and failed, or could not be started at all
    #[error("error running {program}: {reason}")]
    ExecutionFailed { program: String, reason: String },

    /// The request itself is unusable (empty program, bad quoting)
    #[error("Invalid probe request: {0}")]
    InvalidRequest(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ProbeError {
    pub fn execution_failed(program: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ExecutionFailed {
            program: program.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Short message for the result line of the configuration log
    pub fn result_message(&self) -> String {
        match self {
            ProbeError::ToolNotFound(tool) => format!("{} not found", tool),
            ProbeError::ExecutionFailed { program, .. } => format!("error running {}", program),
            ProbeError::InvalidRequest(msg) => format!("invalid request: {}", msg),
            ProbeError::Io { path, .. } => format!("cache error at {}", path.display()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
