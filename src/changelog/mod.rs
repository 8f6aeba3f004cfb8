//! Release notes and changelog retrieval

#[cfg(test)]
use mockall::automock;

use crate::types::RepoIdentifier;

pub mod github;
pub mod repo_url;

pub use github::GitHubChangelogResolver;
pub use repo_url::parse_repository_url;

/// Text used when no release notes or changelog could be found
pub const NO_CHANGELOG: &str = "No specific new features listed.";

/// Text used when the latest release exists but has an empty body
pub const EMPTY_RELEASE_NOTES: &str = "No release notes available.";

/// Trait for obtaining human-readable release notes for a repository
///
/// Implementations absorb every failure and return a fallback text instead,
/// so the returned string is never empty.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ChangelogResolver: Send + Sync {
    async fn resolve(&self, repo: &RepoIdentifier) -> String;
}
