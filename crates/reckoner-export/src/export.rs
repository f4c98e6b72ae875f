//! The export orchestrator
//!
//! Drives one namespace from live state to a written course file:
//! repositories and helm version first, then per release (in enumeration
//! order) chart splitting, repository resolution, and values capture,
//! and finally a single manifest write. Chart tokens are all split before
//! any filesystem work, so an unidentifiable chart aborts the run before
//! anything touches disk.

use std::collections::HashMap;
use std::path::PathBuf;

use indexmap::IndexMap;

use reckoner_core::{
    ChartIdentity, ManifestBuilder, ReleaseRecord, RepositoryRef, parse_release_list, parse_table,
    split_chart,
};
use reckoner_helm::HelmClient;

use crate::error::{ExportError, Result};
use crate::resolver::RepositoryResolver;
use crate::values::ValuesWriter;

/// Configuration for one export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Namespace whose live state is being exported.
    pub namespace: String,
    /// Output root; the manifest lands under `<dest>/reckoner_files/`.
    pub dest: PathBuf,
    /// Repository names excluded from resolution.
    pub ignore_repo: Vec<String>,
    /// Recorded in the manifest's `minimum_versions.reckoner`.
    pub generator_version: String,
}

/// Drives the export pipeline for one namespace.
pub struct Exporter<'a> {
    client: &'a dyn HelmClient,
    namespace: String,
    dest: PathBuf,
    resolver: RepositoryResolver,
    values: ValuesWriter,
    generator_version: String,
}

impl<'a> Exporter<'a> {
    pub fn new(client: &'a dyn HelmClient, options: ExportOptions) -> Self {
        let values = ValuesWriter::new(&options.dest, &options.namespace);
        Self {
            client,
            resolver: RepositoryResolver::new(options.ignore_repo),
            values,
            namespace: options.namespace,
            dest: options.dest,
            generator_version: options.generator_version,
        }
    }

    /// Where the manifest will be written.
    pub fn export_path(&self) -> PathBuf {
        self.dest
            .join("reckoner_files")
            .join(format!("{}.yaml", self.namespace))
    }

    /// Run the export to completion and return the manifest path.
    ///
    /// Any failure - an unsplittable chart token, an unresolvable
    /// repository, a helm error, a filesystem error - aborts the run, and
    /// since the manifest is only written here at the very end, no partial
    /// manifest ever exists.
    pub async fn run(&mut self) -> Result<PathBuf> {
        let repositories = self.fetch_repositories().await?;
        let helm_version = self.client.version().await?;
        let releases = parse_release_list(&self.client.list_releases(&self.namespace).await?)?;
        tracing::info!(
            namespace = %self.namespace,
            releases = releases.len(),
            "exporting namespace"
        );

        // Split every chart token up front: identification failures abort
        // before any values file is written.
        let mut entries: Vec<(ReleaseRecord, ChartIdentity)> = releases
            .into_iter()
            .map(|release| {
                let identity = split_chart(&release.chart)?;
                Ok((release, identity))
            })
            .collect::<Result<_>>()?;

        let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
        for (release, identity) in &entries {
            dependents
                .entry(identity.base_name.clone())
                .or_default()
                .push(release.name.clone());
        }

        let mut manifest = ManifestBuilder::new(
            &self.namespace,
            repositories,
            helm_version,
            &self.generator_version,
        );

        for (release, identity) in &mut entries {
            let version = identity.bare_version();
            let repository = self
                .resolver
                .resolve(self.client, &identity.base_name, &version)
                .await?
                .ok_or_else(|| ExportError::RepositoryResolution {
                    chart: identity.base_name.clone(),
                    releases: dependents.remove(&identity.base_name).unwrap_or_default(),
                })?;
            self.values
                .materialize(self.client, &identity.base_name, release)
                .await?;
            manifest.add_chart(&repository, &identity.base_name, &version, release)?;
        }

        let path = self.export_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ExportError::filesystem(parent))?;
        }
        let document = manifest.build();
        std::fs::write(&path, document.to_yaml()?).map_err(ExportError::filesystem(&path))?;
        tracing::info!(path = %path.display(), "wrote manifest");
        Ok(path)
    }

    async fn fetch_repositories(&self) -> Result<IndexMap<String, RepositoryRef>> {
        let table = self.client.repo_list().await?;
        let mut repositories = IndexMap::new();
        for record in parse_table(&table)? {
            let (Some(name), Some(url)) = (record.get("name"), record.get("url")) else {
                tracing::warn!(?record, "skipping repository row without name/url");
                continue;
            };
            repositories.insert(name.clone(), RepositoryRef { url: url.clone() });
        }
        Ok(repositories)
    }
}
