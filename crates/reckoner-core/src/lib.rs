//! Reckoner Core - Types and pure logic for reconstructing declarative
//! manifests from live Helm state
//!
//! This crate provides the foundational pieces used throughout reckoner:
//! - `table`: Parser for helm's tab-delimited CLI tables
//! - `chart`: Splitter recovering chart name and version from a combined token
//! - `fields`: camelCase to snake_case normalization for live JSON
//! - `release`: Typed records for installed releases
//! - `manifest`: The course-file document and its append-only builder
//!
//! Everything here is pure: no subprocess invocation and no filesystem I/O.

pub mod chart;
pub mod error;
pub mod fields;
pub mod manifest;
pub mod release;
pub mod table;

pub use chart::{ChartIdentity, split_chart};
pub use error::{CoreError, Result};
pub use fields::{camel_to_snake, normalize_keys};
pub use manifest::{ChartEntry, ManifestBuilder, ManifestDocument, MinimumVersions, RepositoryRef};
pub use release::{ReleaseRecord, parse_release_list};
pub use table::{TabularRecord, parse_table};
