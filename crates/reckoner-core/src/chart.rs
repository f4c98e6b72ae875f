//! Chart identifier splitting
//!
//! Helm's release listing reports the chart as a single combined token such
//! as `centrifugo-2.0.1` or `spotify-docker-gc-1.2.3`. Chart names may
//! themselves contain hyphens and even version-looking runs, so the split
//! anchors at the end of the token: the accepted version is the last
//! hyphen-delimited suffix that parses as a full semantic version.

use semver::Version;

use crate::error::{CoreError, Result};

/// A chart token resolved into its base name and semantic version.
///
/// Derived on demand from a release's chart token, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartIdentity {
    pub base_name: String,
    pub version: Version,
}

impl ChartIdentity {
    /// The bare `MAJOR.MINOR.PATCH` string, prerelease and build stripped.
    pub fn bare_version(&self) -> String {
        format!(
            "{}.{}.{}",
            self.version.major, self.version.minor, self.version.patch
        )
    }
}

/// Split a `<name>-<semver>` token into chart name and version.
///
/// Hyphen positions are scanned right to left and the first suffix that is
/// a complete strict semver (`X.Y.Z[-pre][+build]`) wins, so a token like
/// `apps-1.0-collector-2.3.4` splits as (`apps-1.0-collector`, `2.3.4`).
/// A token with no version-shaped suffix is a [`CoreError::VersionSplit`];
/// the full token is never silently returned as the base name.
pub fn split_chart(token: &str) -> Result<ChartIdentity> {
    for (idx, _) in token.match_indices('-').rev() {
        let base = &token[..idx];
        if base.is_empty() {
            continue;
        }
        if let Ok(version) = Version::parse(&token[idx + 1..]) {
            return Ok(ChartIdentity {
                base_name: base.to_string(),
                version,
            });
        }
    }
    Err(CoreError::VersionSplit {
        token: token.to_string(),
    })
}
