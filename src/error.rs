#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the generator crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint, so the lint is disabled
//! for this module.

use std::path::{Path, PathBuf};

/// Unified error type returned by the loader, the writers and the CLI.
///
/// Every variant is fatal for a generation run. The CLI prints the
/// [`std::fmt::Display`] form on a single line and exits with status 1.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// The configuration file does not exist.
    #[error("configuration file {path:?} not found")]
    ConfigNotFound {
        /// Location that was probed.
        path: PathBuf
    },
    /// Any other I/O failure while reading the configuration.
    #[error("failed to read configuration from {path:?}: {source}")]
    ConfigRead {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// The configuration is not valid YAML or a field has the wrong shape.
    #[error("error parsing YAML configuration: {source}")]
    ConfigParse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// A required top-level field is absent.
    #[error("required field '{field}' missing from configuration")]
    MissingField {
        /// Name of the missing field.
        field: String
    },
    /// Reading an existing file that is about to be rewritten failed.
    #[error("failed to read {path:?}: {source}")]
    Read {
        /// File that could not be read.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Writing a generated file failed.
    #[error("failed to write {path:?}: {source}")]
    Write {
        /// Destination that could not be written.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Moving an existing file aside failed.
    #[error("failed to back up {path:?} to {backup:?}: {source}")]
    Backup {
        /// File that was being backed up.
        path:   PathBuf,
        /// Intended backup location.
        backup: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a [`Error::MissingField`] for the named key.
    pub fn missing_field<F>(field: F) -> Self
    where
        F: Into<String>
    {
        Self::MissingField {
            field: field.into()
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// Matches the [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::ConfigParse {
            source
        }
    }
}

/// Maps an I/O error raised while reading the configuration.
///
/// `NotFound` becomes [`Error::ConfigNotFound`]; every other kind is wrapped
/// in [`Error::ConfigRead`].
pub fn config_io_error(path: &Path, source: std::io::Error) -> Error {
    if source.kind() == std::io::ErrorKind::NotFound {
        return Error::ConfigNotFound {
            path: path.to_path_buf()
        };
    }

    Error::ConfigRead {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Read`] variant capturing the failing path and source.
pub fn read_error(path: &Path, source: std::io::Error) -> Error {
    Error::Read {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Write`] variant capturing the failing path and source.
pub fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Backup`] variant for a failed rename.
pub fn backup_error(path: &Path, backup: &Path, source: std::io::Error) -> Error {
    Error::Backup {
        path: path.to_path_buf(),
        backup: backup.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{self, ErrorKind},
        path::Path
    };

    use super::Error;

    #[test]
    fn missing_field_constructor_populates_field() {
        let error = Error::missing_field("github");
        match error {
            Error::MissingField {
                ref field
            } => assert_eq!(field, "github"),
            other => panic!("expected missing field error, got {other:?}")
        }
        assert_eq!(
            Error::missing_field("github").to_string(),
            "required field 'github' missing from configuration"
        );
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::missing_field("github");
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn not_found_maps_to_config_not_found() {
        let path = Path::new("snake-config.yaml");
        let error = super::config_io_error(path, io::Error::new(ErrorKind::NotFound, "missing"));

        match error {
            Error::ConfigNotFound {
                path: ref stored
            } => assert_eq!(stored, path),
            other => panic!("expected not found error, got {other:?}")
        }
        assert_eq!(
            super::config_io_error(path, io::Error::new(ErrorKind::NotFound, "missing"))
                .to_string(),
            "configuration file \"snake-config.yaml\" not found"
        );
    }

    #[test]
    fn other_io_kinds_map_to_config_read() {
        let path = Path::new("/tmp/snake-config.yaml");
        let error =
            super::config_io_error(path, io::Error::new(ErrorKind::PermissionDenied, "denied"));

        match error {
            Error::ConfigRead {
                path: ref stored,
                ref source
            } => {
                assert_eq!(stored, path);
                assert_eq!(source.kind(), ErrorKind::PermissionDenied);
            }
            other => panic!("expected read error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::ConfigParse { .. }));
    }

    #[test]
    fn backup_error_helper_keeps_both_paths() {
        let error = super::backup_error(
            Path::new("README.md"),
            Path::new("README.md.backup"),
            io::Error::new(ErrorKind::PermissionDenied, "denied")
        );

        match error {
            Error::Backup {
                ref path,
                ref backup,
                ..
            } => {
                assert_eq!(path, Path::new("README.md"));
                assert_eq!(backup, Path::new("README.md.backup"));
            }
            other => panic!("expected backup error, got {other:?}")
        }
    }
}
