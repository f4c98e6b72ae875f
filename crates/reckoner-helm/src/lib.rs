//! Reckoner Helm - the external-collaborator boundary
//!
//! Everything reckoner learns about live state comes from the `helm`
//! executable, treated as an opaque command producing text and JSON. This
//! crate defines the [`HelmClient`] trait covering the four queries the
//! export pipeline needs, a [`HelmCli`] implementation driving the real
//! binary with a bounded per-invocation timeout, and a [`MockHelm`] for
//! tests that scripts outputs and counts invocations.

pub mod cli;
pub mod client;
pub mod error;
pub mod mock;

pub use cli::HelmCli;
pub use client::HelmClient;
pub use error::{HelmError, Result};
pub use mock::{CallCounts, MockHelm};
