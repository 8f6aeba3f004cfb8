//! Common types shared by the pipeline stages

use serde::Serialize;

use crate::version::UpdateStatus;

/// A package to check, as supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageRequest {
    /// Package name (e.g., "lodash", "@types/node")
    pub name: String,
    /// Version the caller currently depends on (e.g., "^4.17.0")
    pub declared_version: String,
}

impl PackageRequest {
    pub fn new(name: impl Into<String>, declared_version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_version: declared_version.into(),
        }
    }
}

/// Package metadata returned by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryMetadata {
    /// Version pointed to by the "latest" dist-tag
    pub latest_version: String,
    /// Source repository URL, if the package declares one
    pub repository_url: Option<String>,
}

/// Owner/repository pair on the source-hosting service
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoIdentifier {
    pub owner: String,
    pub repo: String,
}

impl RepoIdentifier {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }
}

impl std::fmt::Display for RepoIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Fully enriched result for a single package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub name: String,
    pub declared_version: String,
    pub latest_version: String,
    pub update_status: UpdateStatus,
    pub vulnerability_status: String,
    /// Release notes or changelog rendered to HTML
    pub changelog_html: String,
}
