//! The course-file document and its append-only builder
//!
//! The manifest is the declarative artifact of an export run: namespace,
//! the repositories actually referenced, version floors, and one chart
//! entry per release. Serialization is deterministic - fields appear in
//! declaration order and both maps keep insertion order - so repeated
//! exports of an unchanged namespace diff clean.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::release::ReleaseRecord;

/// A repository reference as recorded in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRef {
    pub url: String,
}

/// Version floors recorded for reproducibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinimumVersions {
    /// Helm client version observed during the export.
    pub helm: String,
    /// Version of the reckoner that generated the manifest.
    pub reckoner: String,
}

/// One chart entry, keyed in the document by release name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartEntry {
    /// Base chart name (version suffix stripped).
    pub chart: String,
    /// Resolved source repository name.
    pub repository: String,
    /// Bare `X.Y.Z` version string.
    pub version: String,
    /// Values files captured for this release.
    pub files: Vec<PathBuf>,
}

/// The declarative manifest for one namespace.
///
/// Invariants: `repositories` holds exactly the repository names referenced
/// by `charts` entries, and `charts` keys are release names in enumeration
/// order. Built once per export via [`ManifestBuilder`], serialized once,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub namespace: String,
    pub repositories: IndexMap<String, RepositoryRef>,
    pub minimum_versions: MinimumVersions,
    pub helm_args: Vec<String>,
    pub charts: IndexMap<String, ChartEntry>,
}

impl ManifestDocument {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Append-only builder enforcing the repositories/charts invariant.
///
/// Holds the full repository table discovered from the live state; only
/// repositories actually referenced by a chart make it into the document.
#[derive(Debug)]
pub struct ManifestBuilder {
    document: ManifestDocument,
    known_repositories: IndexMap<String, RepositoryRef>,
}

impl ManifestBuilder {
    pub fn new(
        namespace: impl Into<String>,
        known_repositories: IndexMap<String, RepositoryRef>,
        helm_version: impl Into<String>,
        reckoner_version: impl Into<String>,
    ) -> Self {
        Self {
            document: ManifestDocument {
                namespace: namespace.into(),
                repositories: IndexMap::new(),
                minimum_versions: MinimumVersions {
                    helm: helm_version.into(),
                    reckoner: reckoner_version.into(),
                },
                helm_args: Vec::new(),
                charts: IndexMap::new(),
            },
            known_repositories,
        }
    }

    /// Record a release's chart under its release name and pull the
    /// repository into the document.
    ///
    /// Fails with [`CoreError::UnknownRepository`] if `repository` is not in
    /// the known-repository table; a manifest naming a repository without a
    /// URL would not be reproducible.
    pub fn add_chart(
        &mut self,
        repository: &str,
        chart: &str,
        version: &str,
        release: &ReleaseRecord,
    ) -> Result<()> {
        let reference = self
            .known_repositories
            .get(repository)
            .ok_or_else(|| CoreError::UnknownRepository {
                name: repository.to_string(),
            })?
            .clone();
        self.document
            .repositories
            .insert(repository.to_string(), reference);
        self.document.charts.insert(
            release.name.clone(),
            ChartEntry {
                chart: chart.to_string(),
                repository: repository.to_string(),
                version: version.to_string(),
                files: release.values_file.iter().cloned().collect(),
            },
        );
        Ok(())
    }

    pub fn build(self) -> ManifestDocument {
        self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn known_repositories() -> IndexMap<String, RepositoryRef> {
        let mut repos = IndexMap::new();
        repos.insert(
            "stable".to_string(),
            RepositoryRef {
                url: "https://charts.helm.sh/stable".to_string(),
            },
        );
        repos.insert(
            "incubator".to_string(),
            RepositoryRef {
                url: "https://charts.helm.sh/incubator".to_string(),
            },
        );
        repos
    }

    fn release(name: &str, chart: &str) -> ReleaseRecord {
        ReleaseRecord {
            name: name.to_string(),
            chart: chart.to_string(),
            namespace: "infra".to_string(),
            revision: "1".to_string(),
            status: "DEPLOYED".to_string(),
            values_file: None,
        }
    }

    #[test]
    fn test_add_chart_records_entry_and_repository() {
        let mut builder = ManifestBuilder::new("infra", known_repositories(), "v3.14.0", "0.1.0");
        builder
            .add_chart("stable", "centrifugo", "2.0.1", &release("centrifugo", "centrifugo-2.0.1"))
            .unwrap();
        let doc = builder.build();
        assert_eq!(doc.charts["centrifugo"].repository, "stable");
        assert_eq!(doc.charts["centrifugo"].version, "2.0.1");
        assert_eq!(
            doc.repositories["stable"].url,
            "https://charts.helm.sh/stable"
        );
    }

    #[test]
    fn test_unknown_repository_is_rejected() {
        let mut builder = ManifestBuilder::new("infra", known_repositories(), "v3.14.0", "0.1.0");
        let err = builder
            .add_chart("mirror", "centrifugo", "2.0.1", &release("centrifugo", "centrifugo-2.0.1"))
            .unwrap_err();
        assert!(matches!(err, CoreError::UnknownRepository { .. }));
        let doc = builder.build();
        assert!(doc.charts.is_empty());
        assert!(doc.repositories.is_empty());
    }

    #[test]
    fn test_repositories_match_chart_references() {
        let mut builder = ManifestBuilder::new("infra", known_repositories(), "v3.14.0", "0.1.0");
        builder
            .add_chart("stable", "centrifugo", "2.0.1", &release("centrifugo", "centrifugo-2.0.1"))
            .unwrap();
        builder
            .add_chart("stable", "centrifugo", "2.0.1", &release("centrifugo-2", "centrifugo-2.0.1"))
            .unwrap();
        builder
            .add_chart(
                "incubator",
                "cluster-autoscaler",
                "1.0.0",
                &release("autoscaler", "cluster-autoscaler-1.0.0"),
            )
            .unwrap();
        let doc = builder.build();

        let referenced: BTreeSet<&str> = doc
            .charts
            .values()
            .map(|entry| entry.repository.as_str())
            .collect();
        let recorded: BTreeSet<&str> = doc.repositories.keys().map(String::as_str).collect();
        assert_eq!(referenced, recorded);
    }

    #[test]
    fn test_charts_keep_enumeration_order() {
        let mut builder = ManifestBuilder::new("infra", known_repositories(), "v3.14.0", "0.1.0");
        for name in ["zebra", "alpha", "middle"] {
            builder
                .add_chart("stable", "centrifugo", "2.0.1", &release(name, "centrifugo-2.0.1"))
                .unwrap();
        }
        let doc = builder.build();
        let keys: Vec<&str> = doc.charts.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zebra", "alpha", "middle"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut builder = ManifestBuilder::new("infra", known_repositories(), "v3.14.0", "0.1.0");
        builder
            .add_chart("stable", "centrifugo", "2.0.1", &release("centrifugo", "centrifugo-2.0.1"))
            .unwrap();
        let yaml = builder.build().to_yaml().unwrap();
        insta::assert_snapshot!(yaml, @r###"
        namespace: infra
        repositories:
          stable:
            url: https://charts.helm.sh/stable
        minimum_versions:
          helm: v3.14.0
          reckoner: 0.1.0
        helm_args: []
        charts:
          centrifugo:
            chart: centrifugo
            repository: stable
            version: 2.0.1
            files: []
        "###);
    }

    #[test]
    fn test_roundtrip() {
        let mut builder = ManifestBuilder::new("infra", known_repositories(), "v3.14.0", "0.1.0");
        builder
            .add_chart("stable", "centrifugo", "2.0.1", &release("centrifugo", "centrifugo-2.0.1"))
            .unwrap();
        let doc = builder.build();
        let parsed: ManifestDocument = serde_yaml::from_str(&doc.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed.namespace, "infra");
        assert_eq!(parsed.charts["centrifugo"].chart, "centrifugo");
    }
}
