use semver::Version;
use serde::Serialize;

/// How a declared version relates to the registry's latest version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateStatus {
    /// Declared version is the latest
    Latest,
    /// A newer version has been published
    Outdated,
    /// Declared version is newer than latest (pre-release or development)
    Newer,
    /// Either version could not be parsed
    Invalid,
}

/// Parse a version string into a semver::Version, normalizing partial versions.
///
/// Handles partial versions like "1" or "1.2" by padding with zeros.
/// Does NOT strip range operators (use `strip_range_operator` first if needed).
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Strip a leading npm range operator and `v` prefix
///
/// "^1.2.3" -> "1.2.3", ">= 2.0" -> "2.0", "v3" -> "3"
pub fn strip_range_operator(version: &str) -> &str {
    version
        .trim()
        .trim_start_matches(['^', '~', '>', '<', '='])
        .trim_start()
        .trim_start_matches('v')
}

/// Compare the declared version against the latest published version
pub fn compare_versions(declared: &str, latest: &str) -> UpdateStatus {
    let (Some(declared), Some(latest)) = (
        parse_version(strip_range_operator(declared)),
        parse_version(strip_range_operator(latest)),
    ) else {
        return UpdateStatus::Invalid;
    };

    match declared.cmp(&latest) {
        std::cmp::Ordering::Equal => UpdateStatus::Latest,
        std::cmp::Ordering::Less => UpdateStatus::Outdated,
        std::cmp::Ordering::Greater => UpdateStatus::Newer,
    }
}
