//! unpkg CDN implementation

use semver::VersionReq;
use tracing::{debug, warn};

use crate::config::{DEFAULT_PACKAGE, DEFAULT_REGISTRY_URL, RegistryConfig};
use crate::version::error::{EMPTY_BODY_PLACEHOLDER, FetchError};
use crate::version::registry::{PackageManifest, PackageRegistry};

/// Registry implementation serving `package.json` files over unpkg-style URLs
pub struct UnpkgRegistry {
    client: reqwest::Client,
    base_url: String,
    package: String,
}

impl UnpkgRegistry {
    /// Creates a new UnpkgRegistry for `package` under a custom base URL
    pub fn new(base_url: &str, package: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("dataproxy-version")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            package: package.to_string(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(&config.url, &config.package)
    }

    /// `<base>/<package>@<range>/package.json`
    fn manifest_url(&self, range: &VersionReq) -> String {
        format!("{}/{}@{}/package.json", self.base_url, self.package, range)
    }
}

impl Default for UnpkgRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_REGISTRY_URL, DEFAULT_PACKAGE)
    }
}

#[async_trait::async_trait]
impl PackageRegistry for UnpkgRegistry {
    async fn fetch_manifest(&self, range: &VersionReq) -> Result<PackageManifest, FetchError> {
        let url = self.manifest_url(range);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("registry returned status {}: {}", status, url);
            return Err(FetchError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: if body.is_empty() {
                    EMPTY_BODY_PLACEHOLDER.to_string()
                } else {
                    body
                },
            });
        }

        let body = response.text().await?;
        debug!("length of body fetched from {}: {}", url, body.len());

        serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse package manifest ({}): {}", e, body);
            FetchError::Parse(e)
        })
    }
}
