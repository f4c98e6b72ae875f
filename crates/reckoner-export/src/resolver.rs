//! Repository attribution for installed charts
//!
//! Live release metadata does not retain provenance, so the source
//! repository is re-derived by searching the advertised chart indices for
//! the exact chart/version pair. Multiple repositories may mirror the same
//! chart; a preference pattern (by default, any repository name containing
//! `stable`) breaks the tie and an operator-supplied ignore set excludes
//! known-stale mirrors.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use reckoner_core::parse_table;
use reckoner_helm::HelmClient;

use crate::error::Result;

static DEFAULT_PREFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new("stable").expect("valid preference pattern"));

/// Resolves charts to repository names, memoized per chart.
///
/// The cache is a plain single-writer map: the pipeline is sequential, so
/// each resolution sees every previous one. One external search is issued
/// per distinct chart per run, no matter how many releases use it.
#[derive(Debug)]
pub struct RepositoryResolver {
    preference: Regex,
    ignore: HashSet<String>,
    cache: HashMap<String, String>,
}

impl RepositoryResolver {
    pub fn new(ignore: impl IntoIterator<Item = String>) -> Self {
        Self::with_preference(DEFAULT_PREFERENCE.clone(), ignore)
    }

    /// Override the preferred-repository pattern.
    pub fn with_preference(preference: Regex, ignore: impl IntoIterator<Item = String>) -> Self {
        Self {
            preference,
            ignore: ignore.into_iter().collect(),
            cache: HashMap::new(),
        }
    }

    /// Determine the source repository for `chart` at `version`.
    ///
    /// Candidates come back as `repo/chart` rows; the first one whose
    /// repository part matches the preference pattern and is not ignored
    /// wins. `Ok(None)` means no candidate qualified - the caller decides
    /// that this sinks the export, because a manifest with an unknown
    /// repository is not reproducible.
    pub async fn resolve(
        &mut self,
        client: &dyn HelmClient,
        chart: &str,
        version: &str,
    ) -> Result<Option<String>> {
        if let Some(repository) = self.cache.get(chart) {
            return Ok(Some(repository.clone()));
        }

        let table = client.search(chart, version).await?;
        for candidate in parse_table(&table)? {
            let Some(name) = candidate.get("name") else {
                continue;
            };
            let repository = name.split('/').next().unwrap_or(name);
            if self.preference.is_match(repository) && !self.ignore.contains(repository) {
                tracing::debug!(chart, version, repository, "resolved chart repository");
                self.cache.insert(chart.to_string(), repository.to_string());
                return Ok(Some(repository.to_string()));
            }
        }
        tracing::debug!(chart, version, "no acceptable repository candidate");
        Ok(None)
    }
}
