//! Mock helm client for testing
//!
//! Scripts canned outputs per query and counts invocations, so tests can
//! assert things like "one search per distinct chart" without a cluster.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::HelmClient;
use crate::error::{HelmError, Result};

/// In-memory [`HelmClient`] with scripted outputs.
#[derive(Debug, Clone, Default)]
pub struct MockHelm {
    releases_json: String,
    repo_table: String,
    search_tables: HashMap<String, String>,
    values: HashMap<String, String>,
    version: String,
    calls: Arc<Mutex<CallCounts>>,
}

/// Invocation counts for test assertions.
#[derive(Debug, Default, Clone)]
pub struct CallCounts {
    pub list_releases: usize,
    pub repo_list: usize,
    pub get_values: usize,
    /// Chart names passed to `search`, in call order.
    pub searches: Vec<String>,
}

impl MockHelm {
    pub fn new() -> Self {
        Self {
            version: "v3.14.0".to_string(),
            ..Self::default()
        }
    }

    /// Script the JSON release listing.
    pub fn with_releases(mut self, json: impl Into<String>) -> Self {
        self.releases_json = json.into();
        self
    }

    /// Script the `repo list` table.
    pub fn with_repositories(mut self, table: impl Into<String>) -> Self {
        self.repo_table = table.into();
        self
    }

    /// Script the search result table for one chart name.
    pub fn with_search(mut self, chart: impl Into<String>, table: impl Into<String>) -> Self {
        self.search_tables.insert(chart.into(), table.into());
        self
    }

    /// Script the values output for one release name.
    pub fn with_values(mut self, release: impl Into<String>, yaml: impl Into<String>) -> Self {
        self.values.insert(release.into(), yaml.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn call_counts(&self) -> CallCounts {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HelmClient for MockHelm {
    async fn list_releases(&self, _namespace: &str) -> Result<String> {
        self.calls.lock().unwrap().list_releases += 1;
        Ok(self.releases_json.clone())
    }

    async fn repo_list(&self) -> Result<String> {
        self.calls.lock().unwrap().repo_list += 1;
        Ok(self.repo_table.clone())
    }

    async fn search(&self, chart: &str, _version: &str) -> Result<String> {
        self.calls.lock().unwrap().searches.push(chart.to_string());
        // An unscripted chart yields a header-only table: no matches.
        Ok(self
            .search_tables
            .get(chart)
            .cloned()
            .unwrap_or_else(|| "NAME\tCHART VERSION\tDESCRIPTION\n".to_string()))
    }

    async fn get_values(&self, release: &str) -> Result<String> {
        self.calls.lock().unwrap().get_values += 1;
        self.values.get(release).cloned().ok_or_else(|| {
            HelmError::CommandFailed {
                command: format!("get values {release}"),
                status: 1,
                stderr: format!("release: \"{release}\" not found"),
            }
        })
    }

    async fn version(&self) -> Result<String> {
        Ok(self.version.clone())
    }
}
