//! `[dependencies]` fragment parser

use indexmap::IndexMap;
use tracing::debug;

/// Error type for fragment parsing
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The fragment is not valid TOML
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The parsed document has no dependencies table
    #[error("Missing [dependencies] table")]
    MissingDependencies,
}

/// Parse the text that would appear under a `[dependencies]` heading of a
/// Cargo manifest.
///
/// The heading itself is prepended here, so callers pass just the entry
/// lines. Returns crate name -> version requirement, in declaration order.
///
/// Only the requirement is extracted: a bare string is the requirement, a
/// table contributes its `version` field, and a table without one (e.g.
/// path or git dependencies) or any other value shape falls back to `"*"`.
pub fn parse_fragment(fragment: &str) -> Result<IndexMap<String, String>, ParseError> {
    let wrapped = format!("[dependencies]\n{fragment}");
    let doc: toml::Table = toml::from_str(&wrapped)?;

    let dependencies = doc
        .get("dependencies")
        .and_then(|value| value.as_table())
        .ok_or(ParseError::MissingDependencies)?;

    let mut requirements = IndexMap::with_capacity(dependencies.len());
    for (name, value) in dependencies {
        let requirement = match value {
            toml::Value::String(requirement) => requirement.clone(),
            toml::Value::Table(table) => table
                .get("version")
                .and_then(|version| version.as_str())
                .unwrap_or("*")
                .to_string(),
            // No recognizable version requirement, take anything
            _ => "*".to_string(),
        };
        requirements.insert(name.clone(), requirement);
    }

    debug!("parsed {} dependency entries", requirements.len());
    Ok(requirements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fragment_extracts_bare_requirement_strings() {
        let result = parse_fragment(r#"serde = "1.0.197""#).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result["serde"], "1.0.197");
    }

    #[test]
    fn parse_fragment_extracts_version_from_table_entries() {
        let fragment = r#"
            serde = { version = "1", features = ["derive"] }
            tokio = { version = "1.49", default-features = false }
        "#;

        let result = parse_fragment(fragment).unwrap();

        assert_eq!(result["serde"], "1");
        assert_eq!(result["tokio"], "1.49");
    }

    #[test]
    fn parse_fragment_falls_back_to_wildcard_for_table_without_version() {
        let result = parse_fragment(r#"local = { path = "../local" }"#).unwrap();

        assert_eq!(result["local"], "*");
    }

    #[test]
    fn parse_fragment_falls_back_to_wildcard_for_unrecognized_value_shapes() {
        let result = parse_fragment("odd = 1\nodder = [\"a\", \"b\"]").unwrap();

        assert_eq!(result["odd"], "*");
        assert_eq!(result["odder"], "*");
    }

    #[test]
    fn parse_fragment_handles_dotted_keys() {
        let result = parse_fragment(r#"serde.version = "1.0""#).unwrap();

        assert_eq!(result["serde"], "1.0");
    }

    #[test]
    fn parse_fragment_preserves_declaration_order() {
        let fragment = "zebra = \"1\"\nalpha = \"2\"\nmiddle = \"3\"";

        let result = parse_fragment(fragment).unwrap();
        let names: Vec<&str> = result.keys().map(String::as_str).collect();

        assert_eq!(names, vec!["zebra", "alpha", "middle"]);
    }

    #[test]
    fn parse_fragment_returns_empty_map_for_empty_fragment() {
        let result = parse_fragment("").unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn parse_fragment_fails_on_invalid_toml() {
        let result = parse_fragment("serde = ");

        assert!(matches!(result, Err(ParseError::Toml(_))));
    }
}
