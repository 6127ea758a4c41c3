//! Engine version resolution for data proxy clients
//!
//! Maps the version a client declares onto the engine version the proxy
//! should run:
//! - Released clients (`major.minor.patch`) address the identically numbered engine
//! - Pre-release and locally built (`0.0.0`) clients address the closest
//!   published version at or below the bundled engine
//! - Anything else is rejected

use std::sync::Arc;

use tracing::debug;

use crate::config::{
    ClientConfig, DEV_SENTINEL_VERSION, ENGINE_VERSION, EnvironmentView, INCOMPATIBLE_ENGINE_PIN,
};
use crate::version::error::ResolveError;
use crate::version::registry::PackageRegistry;
use crate::version::semver::{EngineVersion, is_release_version, split_prerelease};

/// Resolves the engine version a client should address
///
/// Holds no state between calls; a single instance can be shared freely.
#[derive(Clone)]
pub struct VersionResolver {
    registry: Arc<dyn PackageRegistry>,
    engine_version: String,
}

impl VersionResolver {
    /// Creates a resolver for the engine bundled with this build
    pub fn new(registry: Arc<dyn PackageRegistry>) -> Self {
        Self::with_engine_version(registry, ENGINE_VERSION)
    }

    /// Creates a resolver for an explicit engine version
    pub fn with_engine_version(
        registry: Arc<dyn PackageRegistry>,
        engine_version: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            engine_version: engine_version.into(),
        }
    }

    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }

    /// Resolve the engine version for `config`
    ///
    /// # Returns
    /// * `Ok(String)` - The engine version to address
    /// * `Err(ResolveError::UnsupportedVersionFormat)` - If the client version has an unknown shape
    /// * `Err(ResolveError::UpstreamFetch)` - If the registry lookup fails
    pub async fn resolve(
        &self,
        config: &ClientConfig,
        env: &EnvironmentView,
    ) -> Result<String, ResolveError> {
        if let Some(forced) = &env.forced_version {
            debug!("Using forced engine version {}", forced);
            return Ok(forced.clone());
        }

        let client_version = config.client_version();
        let (version, suffix) = split_prerelease(client_version);

        if suffix.is_none() && is_release_version(version) {
            return Ok(version.to_string());
        }

        if suffix.is_some() || client_version == DEV_SENTINEL_VERSION {
            return self.resolve_prerelease(client_version, env).await;
        }

        Err(ResolveError::UnsupportedVersionFormat(
            client_version.to_string(),
        ))
    }

    async fn resolve_prerelease(
        &self,
        client_version: &str,
        env: &EnvironmentView,
    ) -> Result<String, ResolveError> {
        if env.test_mode {
            debug!("Test mode enabled, using local engine for {}", client_version);
            return Ok(DEV_SENTINEL_VERSION.to_string());
        }

        let engine = EngineVersion::parse(&self.engine_version)?;

        if engine.lacks_data_proxy_support() {
            return Ok(INCOMPATIBLE_ENGINE_PIN.to_string());
        }

        let range = engine.max_range();
        debug!(
            "Looking up published engine {} for client {}",
            range, client_version
        );
        let manifest = self.registry.fetch_manifest(&range).await?;

        Ok(manifest.version)
    }
}
