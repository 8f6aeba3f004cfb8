//! npm registry API implementation

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::RegistryError;
use crate::registry::Registry;
use crate::types::RegistryMetadata;

/// Default base URL for npm registry
pub const DEFAULT_BASE_URL: &str = "https://registry.npmjs.org";

/// Response from npm registry API
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    repository: Option<serde_json::Value>,
}

/// Extract the URL from the `repository` field
///
/// Accepts `{"type": "git", "url": "..."}` and the shorthand string form. Any
/// other shape (arrays in old packuments, a non-string `url`) yields `None`.
fn repository_url(repository: serde_json::Value) -> Option<String> {
    match repository {
        serde_json::Value::String(url) => Some(url),
        serde_json::Value::Object(fields) => fields
            .get("url")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// Registry implementation for npm registry API
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("dep-digest")
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    async fn fetch_metadata(&self, package_name: &str) -> Result<RegistryMetadata, RegistryError> {
        let encoded_name = Self::encode_package_name(package_name);
        let url = format!("{}/{}", self.base_url, encoded_name);
        debug!("Fetching npm metadata: {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package_info: NpmPackageResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse npm registry response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let NpmPackageResponse {
            mut dist_tags,
            repository,
        } = package_info;

        let latest_version = dist_tags.remove("latest").ok_or_else(|| {
            RegistryError::InvalidResponse(format!(
                "Missing dist-tags.latest for {}",
                package_name
            ))
        })?;

        Ok(RegistryMetadata {
            latest_version,
            repository_url: repository.and_then(repository_url),
        })
    }
}
