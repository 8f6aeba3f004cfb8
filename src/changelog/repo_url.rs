//! Repository URL parsing

use std::sync::LazyLock;

use regex::Regex;

use crate::types::RepoIdentifier;

/// `github.com/owner/repo` or `github.com:owner/repo`, with an optional `.git` suffix
static GITHUB_REPO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"github\.com[/:]([^/]+)/([^/]+)").expect("GitHub repository pattern is valid")
});

/// Extract the owner/repo pair from a repository URL
///
/// Accepts HTTPS (`https://github.com/o/r`), npm-style (`git+https://github.com/o/r.git`)
/// and SSH (`git@github.com:o/r.git`) forms. Returns `None` for anything else.
pub fn parse_repository_url(url: &str) -> Option<RepoIdentifier> {
    let captures = GITHUB_REPO_RE.captures(url)?;
    let owner = captures.get(1)?.as_str();
    let repo = captures.get(2)?.as_str();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    Some(RepoIdentifier::new(owner, repo))
}
