//! Hand-written collaborators for pipeline tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use dep_digest::changelog::ChangelogResolver;
use dep_digest::error::RegistryError;
use dep_digest::pipeline::EnrichmentPipeline;
use dep_digest::registry::Registry;
use dep_digest::types::{RegistryMetadata, RepoIdentifier};
use dep_digest::vulnerability::StaticVulnerabilityLookup;

/// Mock registry for testing
///
/// Unknown packages return `RegistryError::NotFound`.
#[derive(Default)]
pub struct MockRegistry {
    packages: HashMap<String, (RegistryMetadata, Duration)>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(self, package: &str, latest: &str, repository_url: Option<&str>) -> Self {
        self.with_delayed_package(package, latest, repository_url, Duration::ZERO)
    }

    /// Package whose lookup takes `delay` to complete
    pub fn with_delayed_package(
        mut self,
        package: &str,
        latest: &str,
        repository_url: Option<&str>,
        delay: Duration,
    ) -> Self {
        self.packages.insert(
            package.to_string(),
            (
                RegistryMetadata {
                    latest_version: latest.to_string(),
                    repository_url: repository_url.map(|s| s.to_string()),
                },
                delay,
            ),
        );
        self
    }
}

#[async_trait]
impl Registry for MockRegistry {
    async fn fetch_metadata(&self, package_name: &str) -> Result<RegistryMetadata, RegistryError> {
        match self.packages.get(package_name) {
            Some((metadata, delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(metadata.clone())
            }
            None => Err(RegistryError::NotFound(package_name.to_string())),
        }
    }
}

/// Changelog resolver that returns "notes for owner/repo" and records each call
#[derive(Default, Clone)]
pub struct RecordingChangelogResolver {
    calls: Arc<Mutex<Vec<RepoIdentifier>>>,
}

impl RecordingChangelogResolver {
    pub fn calls(&self) -> Vec<RepoIdentifier> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChangelogResolver for RecordingChangelogResolver {
    async fn resolve(&self, repo: &RepoIdentifier) -> String {
        self.calls.lock().unwrap().push(repo.clone());
        format!("notes for {}", repo)
    }
}

/// Create a pipeline over mock collaborators with no vulnerability delay
pub fn create_test_pipeline(
    registry: MockRegistry,
    changelog: RecordingChangelogResolver,
    concurrency: usize,
) -> EnrichmentPipeline {
    EnrichmentPipeline::new(
        Arc::new(registry),
        Arc::new(changelog),
        Arc::new(StaticVulnerabilityLookup::with_entries(
            Default::default(),
            Duration::ZERO,
        )),
    )
    .with_concurrency(concurrency)
}
