//! Registry test utilities

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use semver::VersionReq;

use dataproxy_version::version::error::FetchError;
use dataproxy_version::version::registry::{PackageManifest, PackageRegistry};
use dataproxy_version::version::resolver::VersionResolver;

/// Mock registry for testing
///
/// Answers every lookup with a fixed response and records the requested ranges.
pub struct MockRegistry {
    response: Result<String, (u16, String)>,
    calls: AtomicUsize,
    ranges: std::sync::Mutex<Vec<String>>,
}

impl MockRegistry {
    pub fn with_version(version: &str) -> Self {
        Self {
            response: Ok(version.to_string()),
            calls: AtomicUsize::new(0),
            ranges: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            response: Err((status, body.to_string())),
            calls: AtomicUsize::new(0),
            ranges: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ranges(&self) -> Vec<String> {
        self.ranges.lock().unwrap().clone()
    }
}

#[async_trait]
impl PackageRegistry for MockRegistry {
    async fn fetch_manifest(&self, range: &VersionReq) -> Result<PackageManifest, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ranges.lock().unwrap().push(range.to_string());

        match &self.response {
            Ok(version) => Ok(PackageManifest {
                version: version.clone(),
            }),
            Err((status, body)) => Err(FetchError::Status {
                status: *status,
                status_text: String::new(),
                body: body.clone(),
            }),
        }
    }
}

/// Create a resolver for `engine_version` backed by a shared mock registry
pub fn create_test_resolver(
    engine_version: &str,
    registry: MockRegistry,
) -> (Arc<MockRegistry>, VersionResolver) {
    let registry = Arc::new(registry);
    let resolver = VersionResolver::with_engine_version(registry.clone(), engine_version);
    (registry, resolver)
}
