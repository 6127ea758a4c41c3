//! Registry trait for looking up published engine versions

#[cfg(test)]
use mockall::automock;

use semver::VersionReq;
use serde::Deserialize;

use crate::version::error::FetchError;

/// The parts of a published `package.json` the resolver needs
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PackageManifest {
    pub version: String,
}

/// Trait for looking up a published package manifest
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetches the manifest of the closest published version matching `range`
    ///
    /// # Arguments
    /// * `range` - Version constraint, e.g. `<=4.18.0`
    ///
    /// # Returns
    /// * `Ok(PackageManifest)` - Manifest of the matched version
    /// * `Err(FetchError)` - If the request fails, the status is not 2xx,
    ///   or the body is not a valid manifest
    async fn fetch_manifest(&self, range: &VersionReq) -> Result<PackageManifest, FetchError>;
}
