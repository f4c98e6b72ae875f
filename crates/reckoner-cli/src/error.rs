//! CLI error types with exit code handling
//!
//! Maps engine errors onto user-facing diagnostics and process exit codes.

use miette::Diagnostic;
use reckoner_export::ExportError;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// The export pipeline failed (splitting, resolution, manifest)
    #[error("Export failed: {message}")]
    #[diagnostic(code(reckoner::cli::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// The helm invocation itself failed
    #[error("Helm error: {message}")]
    #[diagnostic(code(reckoner::cli::helm))]
    Helm {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// Filesystem failure
    #[error("IO error: {message}")]
    #[diagnostic(code(reckoner::cli::io))]
    Io { message: String },
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Export { .. } => exit_codes::EXPORT_ERROR,
            CliError::Helm { .. } => exit_codes::HELM_ERROR,
            CliError::Io { .. } => exit_codes::IO_ERROR,
        }
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::Helm(inner) => CliError::Helm {
                message: inner.to_string(),
                help: Some(
                    "Check that helm is on PATH and can reach the cluster (helm version)"
                        .to_string(),
                ),
            },
            ExportError::Filesystem { .. } => CliError::Io {
                message: err.to_string(),
            },
            ExportError::RepositoryResolution { .. } => CliError::Export {
                message: err.to_string(),
                help: Some(
                    "Add the chart's repository with 'helm repo add', or adjust --ignore-repo"
                        .to_string(),
                ),
            },
            other => CliError::Export {
                message: other.to_string(),
                help: None,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
