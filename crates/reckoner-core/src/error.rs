//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Malformed table output: {message}")]
    MalformedTable { message: String },

    #[error("No semantic version suffix in chart token: {token}")]
    VersionSplit { token: String },

    #[error("Malformed release listing: {message}")]
    MalformedReleaseList { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Unknown repository: {name}")]
    UnknownRepository { name: String },

    #[error("Failed to serialize manifest: {0}")]
    YamlSerialize(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
