use std::path::PathBuf;
use thiserror::Error;

/// Failure of a single build step, surfaced to the orchestrator as-is
#[derive(Debug, Error)]
pub enum BuildError {
    /// Missing or contradicting configuration, nothing was synthesized or executed
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// External tool could not be launched or exited with an error
    #[error("Command {command:?} failed: {reason}")]
    Subprocess { command: String, reason: String },

    /// Writing the Dockerfile or a launch script failed
    #[error("Could not write {path:?}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
