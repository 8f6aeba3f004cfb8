//! Vulnerability status lookup
//!
//! Only a static table is available for now; the trait is the seam where a real
//! advisory database client would plug in.

use std::time::Duration;

use indexmap::IndexMap;
use tokio::time::sleep;

#[cfg(test)]
use mockall::automock;

use crate::config::DEFAULT_VULNERABILITY_DELAY_MS;

/// Status reported for packages absent from the table
pub const NO_KNOWN_VULNERABILITIES: &str = "No known vulnerabilities";

/// Trait for looking up the vulnerability status of a package version
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VulnerabilityLookup: Send + Sync {
    /// Returns a human-readable status; never fails
    async fn check(&self, package_name: &str, version: &str) -> String;
}

/// Lookup backed by a fixed name -> status table with simulated latency
pub struct StaticVulnerabilityLookup {
    known: IndexMap<String, String>,
    delay: Duration,
}

impl StaticVulnerabilityLookup {
    pub fn new(known: IndexMap<String, String>, delay: Duration) -> Self {
        Self { known, delay }
    }

    /// Built-in table plus `extra` entries, which override built-in ones
    pub fn with_entries(extra: IndexMap<String, String>, delay: Duration) -> Self {
        let mut known = Self::builtin_entries();
        known.extend(extra);
        Self::new(known, delay)
    }

    fn builtin_entries() -> IndexMap<String, String> {
        IndexMap::from([
            (
                "example-package".to_string(),
                "1 critical, 2 moderate".to_string(),
            ),
            (
                "another-package".to_string(),
                NO_KNOWN_VULNERABILITIES.to_string(),
            ),
        ])
    }
}

impl Default for StaticVulnerabilityLookup {
    fn default() -> Self {
        Self::new(
            Self::builtin_entries(),
            Duration::from_millis(DEFAULT_VULNERABILITY_DELAY_MS),
        )
    }
}

#[async_trait::async_trait]
impl VulnerabilityLookup for StaticVulnerabilityLookup {
    async fn check(&self, package_name: &str, _version: &str) -> String {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        self.known
            .get(package_name)
            .cloned()
            .unwrap_or_else(|| NO_KNOWN_VULNERABILITIES.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn lookup() -> StaticVulnerabilityLookup {
        StaticVulnerabilityLookup::new(
            StaticVulnerabilityLookup::builtin_entries(),
            Duration::ZERO,
        )
    }

    #[rstest]
    #[case("example-package", "1.0.0", "1 critical, 2 moderate")]
    #[case("another-package", "2.0.0", "No known vulnerabilities")]
    #[case("left-pad", "1.0.0", "No known vulnerabilities")]
    #[case("", "", "No known vulnerabilities")]
    #[tokio::test]
    async fn check_returns_status_from_table(
        #[case] name: &str,
        #[case] version: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(lookup().check(name, version).await, expected);
    }

    #[tokio::test]
    async fn check_is_idempotent_and_ignores_version() {
        let lookup = lookup();

        let first = lookup.check("example-package", "1.0.0").await;
        let second = lookup.check("example-package", "1.0.0").await;
        let other_version = lookup.check("example-package", "9.9.9").await;

        assert_eq!(first, second);
        assert_eq!(first, other_version);
    }

    #[tokio::test]
    async fn with_entries_overrides_builtin_table() {
        let lookup = StaticVulnerabilityLookup::with_entries(
            IndexMap::from([
                ("example-package".to_string(), "patched".to_string()),
                ("event-stream".to_string(), "1 critical".to_string()),
            ]),
            Duration::ZERO,
        );

        assert_eq!(lookup.check("example-package", "1.0.0").await, "patched");
        assert_eq!(lookup.check("event-stream", "3.3.6").await, "1 critical");
    }

    #[tokio::test]
    async fn check_waits_for_configured_delay() {
        let lookup = StaticVulnerabilityLookup::new(IndexMap::new(), Duration::from_millis(20));

        let started = std::time::Instant::now();
        lookup.check("left-pad", "1.0.0").await;

        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
