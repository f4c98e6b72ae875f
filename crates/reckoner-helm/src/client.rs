//! The helm query surface used by the export pipeline

use async_trait::async_trait;

use crate::error::Result;

/// The live-state queries the export pipeline issues against helm.
///
/// Every method returns the tool's raw output - JSON for the release
/// listing, tab-delimited tables for repositories and search results, raw
/// YAML for values. Parsing lives with the callers so the boundary stays
/// exactly the shape of the external tool.
///
/// Implementations must be Send + Sync for use across async tasks.
#[async_trait]
pub trait HelmClient: Send + Sync {
    /// `helm list --namespace=<ns> --output=json`
    async fn list_releases(&self, namespace: &str) -> Result<String>;

    /// `helm repo list` - tab-delimited table with name and url columns.
    async fn repo_list(&self) -> Result<String>;

    /// `helm search <chart> --version=<version>` - tab-delimited table
    /// whose name column holds `repo/chart` pairs.
    async fn search(&self, chart: &str, version: &str) -> Result<String>;

    /// `helm get values <release>` - the release's effective values as raw
    /// YAML, returned verbatim.
    async fn get_values(&self, release: &str) -> Result<String>;

    /// The helm client version string.
    async fn version(&self) -> Result<String>;
}
