//! Error types for helm invocations

use thiserror::Error;

/// Failures crossing the helm subprocess boundary
#[derive(Debug, Error)]
pub enum HelmError {
    #[error("helm {command} exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    #[error("helm {command} timed out after {seconds}s")]
    Timeout { command: String, seconds: u64 },

    #[error("Failed to launch helm: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Result type for helm invocations
pub type Result<T> = std::result::Result<T, HelmError>;
