//! Per-release values capture
//!
//! Each release's effective values are fetched as raw YAML and written
//! verbatim - no reparse, no reserialize - so the captured file matches
//! what helm reports byte for byte. The destination path nests the
//! namespace (split on its first two hyphens, at most three segments)
//! above the chart name: `<dest>/<ns-segments>/<chart>/<release>.yaml`.

use std::path::PathBuf;

use reckoner_core::ReleaseRecord;
use reckoner_helm::HelmClient;

use crate::error::{ExportError, Result};

/// Writes per-release values files under a destination root.
#[derive(Debug, Clone)]
pub struct ValuesWriter {
    dest: PathBuf,
    namespace: String,
}

impl ValuesWriter {
    pub fn new(dest: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            dest: dest.into(),
            namespace: namespace.into(),
        }
    }

    /// Destination path for one release's values file.
    pub fn target_path(&self, chart: &str, release_name: &str) -> PathBuf {
        let mut path = self.dest.clone();
        for segment in self.namespace.splitn(3, '-') {
            path.push(segment);
        }
        path.push(chart);
        path.push(format!("{release_name}.yaml"));
        path
    }

    /// Fetch and write the effective values of `release`, recording the
    /// path on the record. Re-running overwrites deterministically.
    pub async fn materialize(
        &self,
        client: &dyn HelmClient,
        chart: &str,
        release: &mut ReleaseRecord,
    ) -> Result<PathBuf> {
        let values = client.get_values(&release.name).await?;
        let path = self.target_path(chart, &release.name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ExportError::filesystem(parent))?;
        }
        std::fs::write(&path, values).map_err(ExportError::filesystem(&path))?;
        tracing::info!(path = %path.display(), "created values file");
        release.values_file = Some(path.clone());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reckoner_helm::MockHelm;

    fn release(name: &str, chart: &str) -> ReleaseRecord {
        ReleaseRecord {
            name: name.to_string(),
            chart: chart.to_string(),
            namespace: "prod-us-east".to_string(),
            revision: "1".to_string(),
            status: "DEPLOYED".to_string(),
            values_file: None,
        }
    }

    #[test]
    fn test_namespace_splits_into_at_most_three_segments() {
        let writer = ValuesWriter::new("/out", "prod-us-east-1");
        assert_eq!(
            writer.target_path("centrifugo", "centrifugo"),
            PathBuf::from("/out/prod/us/east-1/centrifugo/centrifugo.yaml")
        );
    }

    #[test]
    fn test_unhyphenated_namespace_is_one_segment() {
        let writer = ValuesWriter::new("/out", "infra");
        assert_eq!(
            writer.target_path("redis", "cache"),
            PathBuf::from("/out/infra/redis/cache.yaml")
        );
    }

    #[tokio::test]
    async fn test_materialize_writes_values_verbatim() {
        let yaml = "replicas: 3\nimage:\n  tag: '1.8.4'   # pinned\n";
        let mock = MockHelm::new().with_values("centrifugo", yaml);
        let dir = tempfile::tempdir().unwrap();
        let writer = ValuesWriter::new(dir.path(), "prod-us-east");

        let mut rel = release("centrifugo", "centrifugo-2.0.1");
        let path = writer
            .materialize(&mock, "centrifugo", &mut rel)
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), yaml);
        assert_eq!(rel.values_file.as_deref(), Some(path.as_path()));
        assert!(path.ends_with("prod/us/east/centrifugo/centrifugo.yaml"));
    }

    #[tokio::test]
    async fn test_materialize_is_idempotent() {
        let mock = MockHelm::new().with_values("centrifugo", "a: 1\n");
        let dir = tempfile::tempdir().unwrap();
        let writer = ValuesWriter::new(dir.path(), "infra");

        let mut rel = release("centrifugo", "centrifugo-2.0.1");
        let first = writer
            .materialize(&mock, "centrifugo", &mut rel)
            .await
            .unwrap();
        let second = writer
            .materialize(&mock, "centrifugo", &mut rel)
            .await
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second).unwrap(), "a: 1\n");
    }

    #[tokio::test]
    async fn test_unwritable_destination_surfaces_path() {
        let mock = MockHelm::new().with_values("centrifugo", "a: 1\n");
        let writer = ValuesWriter::new("/proc/nonexistent", "infra");
        let mut rel = release("centrifugo", "centrifugo-2.0.1");
        let err = writer
            .materialize(&mock, "centrifugo", &mut rel)
            .await
            .unwrap_err();
        assert!(matches!(err, ExportError::Filesystem { .. }));
    }
}
