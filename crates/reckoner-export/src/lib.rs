//! Reckoner Export - the state-reconciliation engine
//!
//! Turns the live, imperative state of a Helm-controlled namespace back
//! into a declarative course file. The pipeline is strictly sequential:
//! enumerate releases, split each chart token, re-derive the source
//! repository (memoized per chart), capture effective values to disk, and
//! write the manifest once at the very end - so a failed run never leaves
//! a partial manifest behind.

pub mod error;
pub mod export;
pub mod resolver;
pub mod values;

pub use error::{ExportError, Result};
pub use export::{ExportOptions, Exporter};
pub use resolver::RepositoryResolver;
pub use values::ValuesWriter;
