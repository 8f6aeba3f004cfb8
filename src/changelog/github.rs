//! GitHub release notes / CHANGELOG.md resolver

use serde::Deserialize;
use tracing::{debug, warn};

use crate::changelog::{ChangelogResolver, EMPTY_RELEASE_NOTES, NO_CHANGELOG};
use crate::types::RepoIdentifier;

/// Default base URL for GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default base URL for raw repository content
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

/// Branch the CHANGELOG.md fallback is read from
pub const DEFAULT_BRANCH: &str = "main";

/// Response from GitHub latest release API
#[derive(Debug, Deserialize)]
struct Release {
    body: Option<String>,
}

/// Resolves release notes from the latest GitHub release, falling back to
/// CHANGELOG.md on the configured branch
pub struct GitHubChangelogResolver {
    client: reqwest::Client,
    api_url: String,
    raw_url: String,
    branch: String,
    token: Option<String>,
}

impl GitHubChangelogResolver {
    /// Creates a new resolver with custom API and raw content base URLs
    pub fn new(api_url: &str, raw_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("dep-digest")
                .build()
                .expect("Failed to create HTTP client"),
            api_url: api_url.trim_end_matches('/').to_string(),
            raw_url: raw_url.trim_end_matches('/').to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            token: None,
        }
    }

    /// Sends `Authorization: token <token>` with every request
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_branch(mut self, branch: &str) -> Self {
        self.branch = branch.to_string();
        self
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.token {
            Some(token) => request.header("Authorization", format!("token {}", token)),
            None => request,
        }
    }

    /// Returns `Ok(None)` when the repository has no published release
    async fn fetch_latest_release(
        &self,
        repo: &RepoIdentifier,
    ) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.api_url, repo.owner, repo.repo
        );

        let response = self
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("GitHub API returned status {}: {}", status, url);
            return Ok(None);
        }

        let release: Release = response.json().await?;
        let notes = release
            .body
            .filter(|body| !body.is_empty())
            .unwrap_or_else(|| EMPTY_RELEASE_NOTES.to_string());

        Ok(Some(notes))
    }

    /// Returns `Ok(None)` when CHANGELOG.md does not exist on the branch
    async fn fetch_changelog_file(
        &self,
        repo: &RepoIdentifier,
    ) -> Result<Option<String>, reqwest::Error> {
        let url = format!(
            "{}/{}/{}/{}/CHANGELOG.md",
            self.raw_url, repo.owner, repo.repo, self.branch
        );

        let response = self.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("Changelog request returned status {}: {}", status, url);
            return Ok(None);
        }

        let text = response.text().await?;
        Ok(Some(text).filter(|t| !t.trim().is_empty()))
    }

    async fn try_resolve(&self, repo: &RepoIdentifier) -> Result<Option<String>, reqwest::Error> {
        if let Some(notes) = self.fetch_latest_release(repo).await? {
            return Ok(Some(notes));
        }
        self.fetch_changelog_file(repo).await
    }
}

impl Default for GitHubChangelogResolver {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_RAW_URL)
    }
}

#[async_trait::async_trait]
impl ChangelogResolver for GitHubChangelogResolver {
    async fn resolve(&self, repo: &RepoIdentifier) -> String {
        match self.try_resolve(repo).await {
            Ok(Some(notes)) => notes,
            Ok(None) => {
                debug!("No release notes or changelog found for {}", repo);
                NO_CHANGELOG.to_string()
            }
            Err(e) => {
                warn!("Error fetching changelog for {}: {}", repo, e);
                NO_CHANGELOG.to_string()
            }
        }
    }
}
