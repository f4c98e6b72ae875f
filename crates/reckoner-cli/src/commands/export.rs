//! Export command

use std::path::Path;
use std::time::Duration;

use reckoner_export::{ExportOptions, Exporter};
use reckoner_helm::HelmCli;

use crate::error::Result;

pub async fn run(
    namespace: &str,
    dest: &Path,
    ignore_repo: &[String],
    helm_args: &[String],
    timeout_secs: u64,
) -> Result<()> {
    let client = HelmCli::new()
        .with_extra_args(helm_args.to_vec())
        .with_timeout(Duration::from_secs(timeout_secs));

    let options = ExportOptions {
        namespace: namespace.to_string(),
        dest: dest.to_path_buf(),
        ignore_repo: ignore_repo.to_vec(),
        generator_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mut exporter = Exporter::new(&client, options);
    let path = exporter.run().await?;

    println!("Exported namespace '{}' to {}", namespace, path.display());
    Ok(())
}
