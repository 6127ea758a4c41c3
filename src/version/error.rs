use thiserror::Error;

/// Placeholder reported when the registry answers with an empty body
pub const EMPTY_BODY_PLACEHOLDER: &str = "<empty body>";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Unsupported client version {0:?}: only `major.minor.patch` versions are supported")]
    UnsupportedVersionFormat(String),

    #[error("Invalid bundled engine version: {0:?}")]
    InvalidEngineVersion(String),

    #[error("Failed to fetch a compatible engine version: {0}")]
    UpstreamFetch(#[from] FetchError),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Registry returned status {status} {status_text}, response body: {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("Invalid package manifest: {0}")]
    Parse(#[from] serde_json::Error),
}
