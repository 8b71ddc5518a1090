//! Version requirement interpretation
//!
//! Turns a requirement string into a [`MatchPolicy`]. This is a deliberate
//! approximation, not a semver range solver: caret and tilde requirements
//! collapse to prefixes, and anything carrying a comparison operator must
//! match an available version string verbatim.

use std::sync::LazyLock;

use regex::Regex;

/// Bare numeric requirement: `1`, `1.2` or `1.2.3`
static NUMERIC_REQUIREMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+){0,2}$").expect("valid regex"));

/// How a version requirement selects among available versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Any version qualifies; the newest wins
    Any,
    /// Only the exact version string qualifies
    Exact(String),
    /// Versions starting with the prefix qualify; the newest wins
    Prefix(String),
}

impl MatchPolicy {
    /// Interpret a requirement string.
    ///
    /// - `*` accepts any version
    /// - `^1.2.3` keeps the leading component (prefix `1.`), `~1.2.3` the
    ///   leading two (prefix `1.2.`)
    /// - a bare `1`, `1.2` or `1.2.3` becomes a prefix on itself
    /// - requirements with `<`, `>` or `=`, and anything else we cannot
    ///   interpret, are matched as exact version strings
    pub fn from_requirement(requirement: &str) -> Self {
        let requirement = requirement.trim();
        if requirement == "*" {
            return Self::Any;
        }

        let (stripped, keep_components) = if let Some(rest) = requirement.strip_prefix('^') {
            (rest, Some(1))
        } else if let Some(rest) = requirement.strip_prefix('~') {
            (rest, Some(2))
        } else {
            (requirement, None)
        };

        // Comparison operators are beyond the prefix rules; the literal
        // text either names a published version or matches nothing.
        if stripped.contains(['<', '>', '=']) {
            return Self::Exact(stripped.to_string());
        }

        if let Some(count) = keep_components {
            return match leading_components(stripped, count) {
                Some(prefix) => Self::Prefix(prefix),
                None => Self::Exact(stripped.to_string()),
            };
        }

        if NUMERIC_REQUIREMENT.is_match(stripped) {
            return Self::Prefix(format!("{stripped}."));
        }

        Self::Exact(stripped.to_string())
    }

    /// Check whether an available version satisfies this policy.
    ///
    /// A prefix also accepts the version it was built from: requirement
    /// `1.0.197` produces prefix `1.0.197.`, which version `1.0.197`
    /// itself must satisfy.
    pub fn matches(&self, version: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(exact) => version == exact,
            Self::Prefix(prefix) => {
                version.starts_with(prefix) || prefix.strip_suffix('.') == Some(version)
            }
        }
    }
}

/// Join up to `count` leading numeric components with a trailing dot.
/// Returns None when the first component is not numeric.
fn leading_components(version: &str, count: usize) -> Option<String> {
    let components: Vec<&str> = version
        .split('.')
        .take(count)
        .take_while(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
        .collect();

    if components.is_empty() {
        return None;
    }
    Some(format!("{}.", components.join(".")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("*", MatchPolicy::Any)]
    #[case(" * ", MatchPolicy::Any)]
    #[case("1", MatchPolicy::Prefix("1.".to_string()))]
    #[case("1.0", MatchPolicy::Prefix("1.0.".to_string()))]
    #[case("1.0.197", MatchPolicy::Prefix("1.0.197.".to_string()))]
    #[case("^1.2.3", MatchPolicy::Prefix("1.".to_string()))]
    #[case("^1", MatchPolicy::Prefix("1.".to_string()))]
    #[case("~1.2.3", MatchPolicy::Prefix("1.2.".to_string()))]
    #[case("~1", MatchPolicy::Prefix("1.".to_string()))]
    #[case(">=1.2", MatchPolicy::Exact(">=1.2".to_string()))]
    #[case("=1.2.3", MatchPolicy::Exact("=1.2.3".to_string()))]
    #[case("<2", MatchPolicy::Exact("<2".to_string()))]
    #[case("1.0.0-beta.1", MatchPolicy::Exact("1.0.0-beta.1".to_string()))]
    #[case("^abc", MatchPolicy::Exact("abc".to_string()))]
    fn from_requirement_returns_expected_policy(
        #[case] requirement: &str,
        #[case] expected: MatchPolicy,
    ) {
        assert_eq!(MatchPolicy::from_requirement(requirement), expected);
    }

    #[rstest]
    #[case(MatchPolicy::Any, "0.0.1", true)]
    #[case(MatchPolicy::Prefix("1.".to_string()), "1.2.3", true)]
    #[case(MatchPolicy::Prefix("1.".to_string()), "11.0.0", false)]
    #[case(MatchPolicy::Prefix("1.0.197.".to_string()), "1.0.197", true)]
    #[case(MatchPolicy::Prefix("1.2.".to_string()), "1.20.0", false)]
    #[case(MatchPolicy::Exact("1.2.3".to_string()), "1.2.3", true)]
    #[case(MatchPolicy::Exact("1.2.3".to_string()), "1.2.30", false)]
    fn matches_applies_policy(
        #[case] policy: MatchPolicy,
        #[case] version: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(policy.matches(version), expected);
    }
}
