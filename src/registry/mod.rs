//! Registry trait for fetching package metadata from a remote source

#[cfg(test)]
use mockall::automock;

use crate::error::RegistryError;
use crate::types::RegistryMetadata;

pub mod npm;

pub use npm::NpmRegistry;

/// Trait for fetching package metadata from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Fetches the latest version and repository link for a package
    ///
    /// # Arguments
    /// * `package_name` - The name of the package (e.g., "lodash", "@types/node")
    ///
    /// # Returns
    /// * `Ok(RegistryMetadata)` - Latest version and optional repository URL
    /// * `Err(RegistryError)` - If the fetch fails or the response is unusable
    async fn fetch_metadata(&self, package_name: &str) -> Result<RegistryMetadata, RegistryError>;
}
