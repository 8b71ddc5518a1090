//! Shared version-ordering helpers

use std::cmp::Ordering;

use semver::Version;

/// Parse a version string into a semver::Version, normalizing partial
/// versions by padding with zeros.
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

/// Order two version strings the way the registry orders releases.
///
/// Versions that parse order by their numeric tuple; anything unparseable
/// sorts below every parseable version, and ties fall back to plain string
/// order so the result is total.
pub fn compare_version_strings(a: &str, b: &str) -> Ordering {
    match (parse_version(a), parse_version(b)) {
        (Some(parsed_a), Some(parsed_b)) => parsed_a.cmp(&parsed_b).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => a.cmp(b),
    }
}
