// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! File operations for generated artifacts.
//!
//! Writes are plain overwrites without a temp-file rename, so an interrupted
//! run can leave a truncated file behind; re-running the generator restores
//! it.

use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf}
};

use tracing::debug;

use crate::error::{self, Error};

/// Suffix appended to files moved aside before an overwrite.
pub const BACKUP_SUFFIX: &str = ".backup";

/// Writes `contents` to `path`, creating parent directories first.
///
/// Any existing file at `path` is overwritten.
///
/// # Errors
///
/// Returns [`Error::Write`] when the parent directory cannot be created or the
/// write fails.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use snakegen::write_file;
///
/// # fn example() -> Result<(), snakegen::Error> {
/// write_file(Path::new(".github/workflows/generate-snake.yml"), "name: demo\n")?;
/// # Ok(())
/// # }
/// ```
pub fn write_file(path: &Path, contents: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        debug!("Creating directory {}", parent.display());
        fs::create_dir_all(parent).map_err(|e| error::write_error(parent, e))?;
    }

    fs::write(path, contents).map_err(|e| error::write_error(path, e))
}

/// Returns `<path>.backup`.
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, BACKUP_SUFFIX)
}

/// Moves `path` to `<path>.backup` and returns the backup location.
///
/// A backup left by an earlier run is first renamed to the lowest free
/// `<path>.backup.<n>`, so the newest backup always sits at `<path>.backup`
/// and older ones are kept.
///
/// # Errors
///
/// Returns [`Error::Backup`] when either rename fails.
pub fn backup_file(path: &Path) -> Result<PathBuf, Error> {
    let backup = backup_path(path);

    if backup.exists() {
        let rotated = next_free_rotation(&backup);
        debug!("Rotating {} to {}", backup.display(), rotated.display());
        fs::rename(&backup, &rotated).map_err(|e| error::backup_error(&backup, &rotated, e))?;
    }

    fs::rename(path, &backup).map_err(|e| error::backup_error(path, &backup, e))?;
    Ok(backup)
}

fn next_free_rotation(backup: &Path) -> PathBuf {
    (1usize..)
        .map(|index| with_suffix(backup, &format!(".{index}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| with_suffix(backup, ".old"))
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_file_creates_parent_directories() {
        let dir = tempdir().expect("failed to create tempdir");
        let dest = dir.path().join(".github/workflows/generate-snake.yml");

        write_file(&dest, "name: test\n").expect("write_file failed");

        let content = fs::read_to_string(&dest).expect("failed to read dest");
        assert_eq!(content, "name: test\n");
    }

    #[test]
    fn write_file_overwrites_existing_content() {
        let dir = tempdir().expect("failed to create tempdir");
        let dest = dir.path().join("out.yml");
        fs::write(&dest, "a much longer previous body").expect("failed to seed file");

        write_file(&dest, "short").expect("write_file failed");

        assert_eq!(fs::read_to_string(&dest).expect("failed to read dest"), "short");
    }

    #[test]
    fn write_file_reports_unwritable_destination() {
        let dir = tempdir().expect("failed to create tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").expect("failed to seed file");

        let error = write_file(&blocker.join("nested.yml"), "x").expect_err("expected failure");
        assert!(matches!(error, Error::Write { .. }));
    }

    #[test]
    fn backup_path_appends_suffix() {
        assert_eq!(backup_path(Path::new("docs/README.md")), Path::new("docs/README.md.backup"));
    }

    #[test]
    fn backup_file_moves_content_aside() {
        let dir = tempdir().expect("failed to create tempdir");
        let readme = dir.path().join("README.md");
        fs::write(&readme, "Hello").expect("failed to seed README");

        let backup = backup_file(&readme).expect("backup failed");

        assert_eq!(backup, dir.path().join("README.md.backup"));
        assert!(!readme.exists());
        assert_eq!(fs::read_to_string(&backup).expect("failed to read backup"), "Hello");
    }

    #[test]
    fn backup_file_rotates_previous_backups() {
        let dir = tempdir().expect("failed to create tempdir");
        let readme = dir.path().join("README.md");

        fs::write(&readme, "first").expect("failed to seed README");
        backup_file(&readme).expect("first backup failed");
        fs::write(&readme, "second").expect("failed to seed README");
        backup_file(&readme).expect("second backup failed");
        fs::write(&readme, "third").expect("failed to seed README");
        backup_file(&readme).expect("third backup failed");

        let read = |name: &str| fs::read_to_string(dir.path().join(name)).expect("missing backup");
        assert_eq!(read("README.md.backup"), "third");
        assert_eq!(read("README.md.backup.1"), "first");
        assert_eq!(read("README.md.backup.2"), "second");
    }

    #[test]
    fn backup_file_reports_missing_source() {
        let dir = tempdir().expect("failed to create tempdir");
        let error = backup_file(&dir.path().join("absent.md")).expect_err("expected failure");
        assert!(matches!(error, Error::Backup { .. }));
    }
}
