//! Client configuration constants and the runtime configuration record.

use crate::error::ConfigError;
use serde::Deserialize;
use std::time::Duration;

/// Durable storage slot holding the active search term.
pub const SEARCH_STORAGE_KEY: &str = "search";

/// Route of the searchable gallery view.
pub const GALLERY_PATH: &str = "/photos";

/// Routes under this prefix keep the persisted search term.
pub const UPLOAD_PATH_PREFIX: &str = "/upload";

/// Query parameter carrying the search term on collection reads.
pub const SEARCH_QUERY_PARAM: &str = "search";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// What the controller does with the record returned by a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPolicy {
    /// Hand the record back to the caller and leave `photos` untouched.
    #[default]
    LeaveToCaller,
    /// Patch the returned record into `photos` by id.
    Reconcile,
}

/// Runtime configuration for the synchronization core.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub gallery_path: String,
    pub upload_path_prefix: String,
    pub storage_key: String,
    /// Upper bound for any single remote call. `None` waits forever.
    pub request_timeout_ms: Option<u64>,
    pub mutation_policy: MutationPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            gallery_path: GALLERY_PATH.to_string(),
            upload_path_prefix: UPLOAD_PATH_PREFIX.to_string(),
            storage_key: SEARCH_STORAGE_KEY.to_string(),
            request_timeout_ms: Some(DEFAULT_REQUEST_TIMEOUT_MS),
            mutation_policy: MutationPolicy::default(),
        }
    }
}

impl ClientConfig {
    /// Parses a JSON document; missing fields fall back to the defaults.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gallery_routes() {
        let config = ClientConfig::default();
        assert_eq!(config.gallery_path, "/photos");
        assert_eq!(config.upload_path_prefix, "/upload");
        assert_eq!(config.storage_key, "search");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.mutation_policy, MutationPolicy::LeaveToCaller);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = ClientConfig::from_json(
            r#"{"api_base_url": "https://pixly.example", "mutation_policy": "reconcile", "request_timeout_ms": null}"#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://pixly.example");
        assert_eq!(config.mutation_policy, MutationPolicy::Reconcile);
        assert_eq!(config.request_timeout(), None);
        assert_eq!(config.gallery_path, GALLERY_PATH);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ClientConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
