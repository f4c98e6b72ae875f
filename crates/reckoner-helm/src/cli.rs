//! Helm invocation via the real binary

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::client::HelmClient;
use crate::error::{HelmError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// [`HelmClient`] implementation driving the `helm` executable.
///
/// Each invocation is bounded by a timeout; helm itself has none, and a
/// hung cluster connection would otherwise stall the whole export.
#[derive(Debug, Clone)]
pub struct HelmCli {
    binary: PathBuf,
    extra_args: Vec<String>,
    timeout: Duration,
}

impl Default for HelmCli {
    fn default() -> Self {
        Self::new()
    }
}

impl HelmCli {
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("helm"),
            extra_args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a specific helm binary instead of resolving `helm` from PATH.
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Arguments prepended to every invocation (e.g. `--kube-context`).
    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.join(" ");
        tracing::debug!(%command, "invoking helm");

        let mut cmd = Command::new(&self.binary);
        cmd.args(&self.extra_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| HelmError::Timeout {
                command: command.clone(),
                seconds: self.timeout.as_secs(),
            })??;

        if !output.status.success() {
            return Err(HelmError::CommandFailed {
                command,
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl HelmClient for HelmCli {
    async fn list_releases(&self, namespace: &str) -> Result<String> {
        self.run(&["list", &format!("--namespace={namespace}"), "--output=json"])
            .await
    }

    async fn repo_list(&self) -> Result<String> {
        self.run(&["repo", "list"]).await
    }

    async fn search(&self, chart: &str, version: &str) -> Result<String> {
        self.run(&["search", chart, &format!("--version={version}")])
            .await
    }

    async fn get_values(&self, release: &str) -> Result<String> {
        self.run(&["get", "values", release]).await
    }

    async fn version(&self) -> Result<String> {
        let raw = self.run(&["version", "--short", "--client"]).await?;
        let trimmed = raw.trim();
        // Older clients prefix the short form with "Client: ".
        Ok(trimmed.strip_prefix("Client: ").unwrap_or(trimmed).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Exercises spawn/exit-status handling against a shell stand-in; the
    // real helm binary is not required for unit tests.
    fn fake_helm(script: &str) -> (tempfile::TempDir, HelmCli) {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("helm");
        std::fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        let cli = HelmCli::new().with_binary(&path);
        (dir, cli)
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let (_dir, cli) = fake_helm("echo hello");
        let out = cli.repo_list().await.unwrap();
        assert_eq!(out.trim(), "hello");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_command_failed() {
        let (_dir, cli) = fake_helm("echo 'no cluster' >&2; exit 1");
        let err = cli.repo_list().await.unwrap_err();
        match err {
            HelmError::CommandFailed { status, stderr, .. } => {
                assert_eq!(status, 1);
                assert_eq!(stderr, "no cluster");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let cli = HelmCli::new().with_binary("/nonexistent/helm");
        assert!(matches!(
            cli.repo_list().await.unwrap_err(),
            HelmError::Spawn(_)
        ));
    }

    #[tokio::test]
    async fn test_slow_invocation_times_out() {
        let (_dir, cli) = fake_helm("sleep 5");
        let cli = cli.with_timeout(Duration::from_millis(100));
        assert!(matches!(
            cli.repo_list().await.unwrap_err(),
            HelmError::Timeout { .. }
        ));
    }

    #[tokio::test]
    async fn test_version_strips_client_prefix() {
        let (_dir, cli) = fake_helm("echo 'Client: v2.16.1+ge13bc94'");
        assert_eq!(cli.version().await.unwrap(), "v2.16.1+ge13bc94");
    }
}
