use std::sync::LazyLock;

use regex::Regex;
use semver::{Comparator, Op, Version, VersionReq};

use crate::version::error::ResolveError;

/// `major.minor.patch` with a non-zero, leading-zero-free major
static RELEASE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]*\.[0-9]+\.[0-9]+$").expect("valid regex"));

/// Split a version string on its first hyphen.
///
/// Everything after the first hyphen is the pre-release suffix, including
/// any further hyphens.
///
/// Examples:
/// - "1.2.3" -> ("1.2.3", None)
/// - "1.2.3-dev.4" -> ("1.2.3", Some("dev.4"))
/// - "1.2.3-dev-4" -> ("1.2.3", Some("dev-4"))
pub fn split_prerelease(version: &str) -> (&str, Option<&str>) {
    match version.split_once('-') {
        Some((core, suffix)) => (core, Some(suffix)),
        None => (version, None),
    }
}

/// Whether `version` is a plain released `major.minor.patch` version
pub fn is_release_version(version: &str) -> bool {
    RELEASE_VERSION.is_match(version)
}

/// The engine version bundled with a build, stripped of any pre-release suffix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineVersion {
    version: Version,
}

impl EngineVersion {
    /// Parse an engine version constant such as "4.18.0" or "4.18.0-dev.12".
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let (core, _) = split_prerelease(raw);
        let version =
            Version::parse(core).map_err(|_| ResolveError::InvalidEngineVersion(raw.to_string()))?;
        Ok(Self { version })
    }

    pub fn major(&self) -> u64 {
        self.version.major
    }

    pub fn minor(&self) -> u64 {
        self.version.minor
    }

    pub fn patch(&self) -> u64 {
        self.version.patch
    }

    /// The 4.17 engine line cannot serve data proxy clients.
    pub fn lacks_data_proxy_support(&self) -> bool {
        self.version.major == 4 && self.version.minor == 17
    }

    /// Constraint matching the closest published version at or below this one
    pub fn max_range(&self) -> VersionReq {
        VersionReq {
            comparators: vec![Comparator {
                op: Op::LessEq,
                major: self.version.major,
                minor: Some(self.version.minor),
                patch: Some(self.version.patch),
                pre: semver::Prerelease::EMPTY,
            }],
        }
    }
}
