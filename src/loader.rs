// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Reads the snake configuration document from disk.
//!
//! Loading happens in two passes: the text is first decoded as a generic YAML
//! value so that a missing `github` key can be reported as such, then the
//! mapping is deserialized into [`SnakeConfig`] with defaults applied.

use std::{fs, path::Path};

use serde_yaml::Value;
use tracing::debug;

use crate::{
    config::SnakeConfig,
    error::{self, Error}
};

/// Top-level keys that must be present in every configuration.
const REQUIRED_FIELDS: &[&str] = &["github"];

/// Loads the configuration from the provided YAML file path.
///
/// # Errors
///
/// Returns [`Error::ConfigNotFound`] when the file does not exist,
/// [`Error::ConfigRead`] for other I/O failures, and the errors of
/// [`parse_config`] for the contents.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use snakegen::load_config;
///
/// # fn main() -> Result<(), snakegen::Error> {
/// let config = load_config(Path::new("snake-config.yaml"))?;
/// println!("{} outputs", config.outputs.len());
/// # Ok(())
/// # }
/// ```
pub fn load_config(path: &Path) -> Result<SnakeConfig, Error> {
    debug!("Reading configuration from {}", path.display());
    let contents =
        fs::read_to_string(path).map_err(|source| error::config_io_error(path, source))?;
    parse_config(&contents)
}

/// Parses the configuration from an in-memory YAML document.
///
/// A null or empty document is reported as missing the `github` key.
///
/// # Errors
///
/// Returns [`Error::ConfigParse`] when the YAML is malformed, the top level is
/// not a mapping, or a field has the wrong type, and [`Error::MissingField`]
/// when a required top-level key is absent.
pub fn parse_config(contents: &str) -> Result<SnakeConfig, Error> {
    let document: Value = serde_yaml::from_str(contents)?;
    if document.is_null() {
        return Err(Error::missing_field(REQUIRED_FIELDS[0]));
    }

    let mapping: serde_yaml::Mapping = serde_yaml::from_value(document)?;
    for field in REQUIRED_FIELDS {
        if !mapping.contains_key(*field) {
            return Err(Error::missing_field(*field));
        }
    }

    let config: SnakeConfig = serde_yaml::from_value(Value::Mapping(mapping))?;
    debug!(
        outputs = config.outputs.len(),
        automation = config.automation.enabled,
        readme = config.readme_integration.enabled,
        "Parsed configuration"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{load_config, parse_config};
    use crate::{
        config::{OutputKind, SplicePosition, TagStyle},
        error::Error
    };

    const SCENARIO: &str = r#"
github:
  username: alice
outputs:
  - path: a.svg
    type: svg
  - path: b-dark.svg
    type: svg
    palette: github-dark
readme_integration:
  enabled: true
  position: top
"#;

    #[test]
    fn parses_scenario_document() {
        let config = parse_config(SCENARIO).expect("expected configuration to parse");

        assert_eq!(config.github.resolved_username(), "alice");
        assert_eq!(config.outputs.len(), 2);
        assert_eq!(config.outputs[1].kind, Some(OutputKind::Svg));
        assert_eq!(config.outputs[1].palette.as_deref(), Some("github-dark"));
        assert!(config.readme_integration.enabled);
        assert_eq!(config.readme_integration.position, SplicePosition::Top);
        assert_eq!(config.readme_integration.tag_type, TagStyle::Picture);
    }

    #[test]
    fn missing_github_is_reported_as_missing_field() {
        let error = parse_config("outputs: []\n").expect_err("expected missing field");
        match error {
            Error::MissingField {
                field
            } => assert_eq!(field, "github"),
            other => panic!("unexpected error variant: {other:?}")
        }
    }

    #[test]
    fn null_document_is_missing_github() {
        let error = parse_config("~\n").expect_err("expected missing field");
        assert!(matches!(error, Error::MissingField { .. }));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let error = parse_config("github: [unterminated\n").expect_err("expected parse error");
        assert!(matches!(error, Error::ConfigParse { .. }));
    }

    #[test]
    fn non_mapping_document_is_parse_error() {
        let error = parse_config("- github\n- outputs\n").expect_err("expected parse error");
        assert!(matches!(error, Error::ConfigParse { .. }));
    }

    #[test]
    fn wrongly_typed_field_is_parse_error() {
        let yaml = "github:\n  username: alice\noutputs: not-a-list\n";
        let error = parse_config(yaml).expect_err("expected parse error");
        assert!(matches!(error, Error::ConfigParse { .. }));
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create temp file");
        file.write_all(SCENARIO.as_bytes()).expect("failed to write config");

        let config = load_config(file.path()).expect("expected configuration to load");
        assert_eq!(config.outputs[0].output_line(0), "a.svg");
    }

    #[test]
    fn load_config_reports_missing_file() {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        let path = dir.path().join("snake-config.yaml");

        let error = load_config(&path).expect_err("expected not found error");
        match error {
            Error::ConfigNotFound {
                path: stored
            } => assert_eq!(stored, path),
            other => panic!("unexpected error variant: {other:?}")
        }
    }
}
