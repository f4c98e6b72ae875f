//! Error types for the export pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Failures during an export run
///
/// Every variant is fatal: per-release failures abort the whole export so
/// an emitted manifest is always complete and internally consistent.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Core(#[from] reckoner_core::CoreError),

    #[error(transparent)]
    Helm(#[from] reckoner_helm::HelmError),

    #[error(
        "No acceptable repository found for chart '{chart}' (required by release(s): {})",
        .releases.join(", ")
    )]
    RepositoryResolution {
        chart: String,
        releases: Vec<String>,
    },

    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub(crate) fn filesystem(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Filesystem { path, source }
    }
}

/// Result type for export operations
pub type Result<T> = std::result::Result<T, ExportError>;
