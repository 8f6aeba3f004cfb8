//! Per-package enrichment pipeline
//!
//! For every [`PackageRequest`] the pipeline:
//! 1. fetches registry metadata (failure skips the package),
//! 2. resolves release notes when the repository is on GitHub,
//! 3. looks up the vulnerability status,
//! 4. renders the notes to HTML and compares versions,
//!
//! then emits one [`EnrichedRecord`]. Records are yielded in input order even
//! when several packages are processed at the same time.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, error, info};

use crate::changelog::{
    ChangelogResolver, GitHubChangelogResolver, NO_CHANGELOG, parse_repository_url,
};
use crate::config::Config;
use crate::error::{CheckError, RegistryError};
use crate::input::parse_packages;
use crate::markdown::render_markdown;
use crate::output::RecordWriter;
use crate::registry::{NpmRegistry, Registry};
use crate::types::{EnrichedRecord, PackageRequest};
use crate::version::compare_versions;
use crate::vulnerability::{StaticVulnerabilityLookup, VulnerabilityLookup};

/// Counts of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records handed to the sink
    pub emitted: usize,
    /// Packages dropped because the registry lookup failed
    pub skipped: usize,
}

pub struct EnrichmentPipeline {
    registry: Arc<dyn Registry>,
    changelog: Arc<dyn ChangelogResolver>,
    vulnerabilities: Arc<dyn VulnerabilityLookup>,
    concurrency: usize,
}

impl EnrichmentPipeline {
    /// Create a sequential pipeline from its collaborators
    pub fn new(
        registry: Arc<dyn Registry>,
        changelog: Arc<dyn ChangelogResolver>,
        vulnerabilities: Arc<dyn VulnerabilityLookup>,
    ) -> Self {
        Self {
            registry,
            changelog,
            vulnerabilities,
            concurrency: 1,
        }
    }

    /// Build the npm + GitHub pipeline described by `config`
    pub fn from_config(config: &Config) -> Self {
        let registry = NpmRegistry::new(&config.registry_url);
        let changelog =
            GitHubChangelogResolver::new(&config.github_api_url, &config.github_raw_url)
                .with_token(config.github_token.clone())
                .with_branch(&config.changelog_branch);
        let vulnerabilities = StaticVulnerabilityLookup::with_entries(
            config.known_vulnerabilities.clone(),
            Duration::from_millis(config.vulnerability_delay_ms),
        );

        Self::new(
            Arc::new(registry),
            Arc::new(changelog),
            Arc::new(vulnerabilities),
        )
        .with_concurrency(config.effective_concurrency())
    }

    /// Maximum number of packages in flight at once (at least one)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Enrich a single package
    ///
    /// Only the registry lookup can fail; every later stage degrades to a fallback value.
    pub async fn enrich(&self, request: &PackageRequest) -> Result<EnrichedRecord, RegistryError> {
        let metadata = self.registry.fetch_metadata(&request.name).await?;
        debug!(
            "{}: latest version {}, repository {:?}",
            request.name, metadata.latest_version, metadata.repository_url
        );

        let changelog = self
            .resolve_changelog(metadata.repository_url.as_deref())
            .await;

        let vulnerability_status = self
            .vulnerabilities
            .check(&request.name, &request.declared_version)
            .await;

        Ok(EnrichedRecord {
            name: request.name.clone(),
            declared_version: request.declared_version.clone(),
            update_status: compare_versions(&request.declared_version, &metadata.latest_version),
            latest_version: metadata.latest_version,
            vulnerability_status,
            changelog_html: render_markdown(&changelog),
        })
    }

    async fn resolve_changelog(&self, repository_url: Option<&str>) -> String {
        let Some(url) = repository_url else {
            return NO_CHANGELOG.to_string();
        };

        match parse_repository_url(url) {
            Some(repo) => self.changelog.resolve(&repo).await,
            None => {
                debug!("Repository URL is not on GitHub: {}", url);
                NO_CHANGELOG.to_string()
            }
        }
    }

    /// Per-request results, in input order
    fn outcomes(
        &self,
        requests: Vec<PackageRequest>,
    ) -> impl Stream<Item = (PackageRequest, Result<EnrichedRecord, RegistryError>)> + '_ {
        stream::iter(requests)
            .map(move |request| async move {
                let result = self.enrich(&request).await;
                (request, result)
            })
            .buffered(self.concurrency)
    }

    /// Lazily enrich `requests`, yielding records in input order as they complete
    ///
    /// Packages whose registry lookup fails are logged and left out.
    pub fn stream(&self, requests: Vec<PackageRequest>) -> impl Stream<Item = EnrichedRecord> + '_ {
        self.outcomes(requests)
            .filter_map(|(request, result)| async move {
                result
                    .inspect_err(|e| log_skipped(&request, e))
                    .ok()
            })
    }

    /// Enrich `requests`, handing each record to `sink` as soon as it is ready
    ///
    /// Stops at the first sink error.
    pub async fn run<F, E>(&self, requests: Vec<PackageRequest>, mut sink: F) -> Result<RunSummary, E>
    where
        F: FnMut(&EnrichedRecord) -> Result<(), E>,
    {
        let total = requests.len();
        info!(
            "Checking {} packages (concurrency {})",
            total, self.concurrency
        );

        let mut summary = RunSummary::default();
        let mut outcomes = std::pin::pin!(self.outcomes(requests));

        while let Some((request, result)) = outcomes.next().await {
            match result {
                Ok(record) => {
                    sink(&record)?;
                    summary.emitted += 1;
                }
                Err(e) => {
                    log_skipped(&request, &e);
                    summary.skipped += 1;
                }
            }
        }

        info!(
            "Finished: {} of {} packages reported, {} skipped",
            summary.emitted, total, summary.skipped
        );
        Ok(summary)
    }
}

/// Parse `content`, enrich every package and write the records to `writer`
///
/// Input is validated before any request is sent, so malformed input fails
/// without touching the network or the writer.
pub async fn check<W>(content: &str, config: &Config, writer: &mut W) -> Result<RunSummary, CheckError>
where
    W: RecordWriter + ?Sized,
{
    let requests = parse_packages(content)?;
    let pipeline = EnrichmentPipeline::from_config(config);

    let summary = pipeline
        .run(requests, |record| writer.write_record(record))
        .await?;
    writer.finish()?;

    Ok(summary)
}

fn log_skipped(request: &PackageRequest, e: &RegistryError) {
    error!("Error fetching data for package {}: {}", request.name, e);
}
