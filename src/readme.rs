// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Embeds the generated snake graphics into a README.
//!
//! The first SVG output is the primary image. An SVG output whose path
//! mentions "dark" becomes the dark-theme source of a `<picture>` element, so
//! the viewer picks the variant matching its color scheme.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf}
};

use tracing::{debug, info, warn};

use crate::{
    config::{OutputKind, SnakeConfig, SplicePosition, TagStyle},
    error::{self, Error},
    file
};

const IMAGE_ALT: &str = "Snake Contribution Graphics";

/// Result of a README update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeOutcome {
    /// No README existed; a new one holding only the markup was written.
    Created,
    /// The previous README was moved to `backup` and the merged text written.
    Updated {
        /// Location of the previous content.
        backup: PathBuf
    },
    /// The README already contained the markup and was left untouched.
    Unchanged
}

/// Builds the README markup for the configured outputs.
///
/// Returns `None` when README integration is disabled or no output is an
/// SVG.
///
/// # Example
///
/// ```
/// use snakegen::{compose_markup, parse_config};
///
/// let config = parse_config(
///     "github: {username: alice}\noutputs: [{path: a.svg, type: svg}]\nreadme_integration: {enabled: true}\n"
/// )
/// .expect("valid configuration");
/// assert_eq!(
///     compose_markup(&config).as_deref(),
///     Some("<img src=\"a.svg\" alt=\"Snake Contribution Graphics\" />")
/// );
/// ```
pub fn compose_markup(config: &SnakeConfig) -> Option<String> {
    let integration = &config.readme_integration;
    if !integration.enabled {
        return None;
    }

    let svg_paths: Vec<String> = config
        .outputs
        .iter()
        .enumerate()
        .filter(|(index, spec)| spec.resolved_kind(*index) == OutputKind::Svg)
        .map(|(index, spec)| spec.resolved_path(index))
        .collect();

    let Some(primary) = svg_paths.first() else {
        debug!("README integration enabled but no SVG output is configured");
        return None;
    };
    let dark = svg_paths
        .iter()
        .find(|path| path.to_ascii_lowercase().contains("dark"));

    let markup = match (integration.tag_type, dark) {
        (TagStyle::Picture, Some(dark)) => picture_markup(primary, dark),
        _ => img_markup(primary)
    };
    Some(markup)
}

fn picture_markup(primary: &str, dark: &str) -> String {
    let primary = escape_html(primary);
    let dark = escape_html(dark);

    format!(
        "<picture>\n  <source media=\"(prefers-color-scheme: dark)\" srcset=\"{dark}\" />\n  \
         <source media=\"(prefers-color-scheme: light)\" srcset=\"{primary}\" />\n  <img \
         alt=\"{IMAGE_ALT}\" src=\"{primary}\" />\n</picture>"
    )
}

fn img_markup(primary: &str) -> String {
    format!("<img src=\"{}\" alt=\"{IMAGE_ALT}\" />", escape_html(primary))
}

/// Places `markup` relative to the existing README text.
///
/// * `top`: markup, a blank line, then the original text.
/// * `bottom`: the original text, a blank line, then the markup.
/// * `middle`: on the line boundary at half of the original's line count.
/// * line `n`: after the first `n` lines; `0` behaves like `top` and values
///   past the end like `bottom`.
/// * unrecognized values behave like `top`.
///
/// Without an original README the result is the markup followed by a newline.
pub fn splice(original: Option<&str>, markup: &str, position: &SplicePosition) -> String {
    let Some(original) = original else {
        return format!("{markup}\n");
    };

    match position {
        SplicePosition::Top | SplicePosition::Unrecognized(_) => prepend(markup, original),
        SplicePosition::Bottom => append(original, markup),
        SplicePosition::Middle => {
            let lines = original.split_inclusive('\n').count();
            insert_after_lines(original, markup, lines / 2)
        }
        SplicePosition::Line(lines) => insert_after_lines(original, markup, *lines)
    }
}

fn prepend(markup: &str, original: &str) -> String {
    format!("{markup}\n\n{original}")
}

fn append(original: &str, markup: &str) -> String {
    format!("{original}\n\n{markup}\n")
}

fn insert_after_lines(original: &str, markup: &str, lines: usize) -> String {
    if lines == 0 {
        return prepend(markup, original);
    }

    let offset: usize = original.split_inclusive('\n').take(lines).map(str::len).sum();
    if offset >= original.len() {
        return append(original, markup);
    }

    // `offset` sits right after a newline, so `head` ends with one.
    let (head, tail) = original.split_at(offset);
    format!("{head}\n{markup}\n\n{tail}")
}

/// Writes `markup` into the README at `readme_path`.
///
/// An existing README is read, moved to `<path>.backup` (older backups are
/// rotated, see [`file::backup_file`]) and replaced by the merged text. When
/// the README already contains `markup` nothing is touched.
///
/// # Errors
///
/// Returns [`Error::Read`] when the existing README cannot be read,
/// [`Error::Backup`] when it cannot be moved aside, and [`Error::Write`] when
/// the new content cannot be written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use snakegen::{SplicePosition, update_readme};
///
/// # fn main() -> Result<(), snakegen::Error> {
/// update_readme(
///     Path::new("README.md"),
///     "<img src=\"dist/snake.svg\" alt=\"Snake Contribution Graphics\" />",
///     &SplicePosition::Bottom
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn update_readme(
    readme_path: &Path,
    markup: &str,
    position: &SplicePosition
) -> Result<ReadmeOutcome, Error> {
    let original = match fs::read_to_string(readme_path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => return Err(error::read_error(readme_path, e))
    };

    if original.as_deref().is_some_and(|content| content.contains(markup)) {
        info!("{} already embeds the snake graphics", readme_path.display());
        return Ok(ReadmeOutcome::Unchanged);
    }

    if let SplicePosition::Unrecognized(raw) = position {
        warn!("Unrecognized README position '{raw}', inserting at the top");
    }
    let merged = splice(original.as_deref(), markup, position);

    let outcome = if original.is_some() {
        let backup = file::backup_file(readme_path)?;
        info!("Backed up existing README to {}", backup.display());
        ReadmeOutcome::Updated {
            backup
        }
    } else {
        ReadmeOutcome::Created
    };

    info!("Writing README to {} ({position})", readme_path.display());
    file::write_file(readme_path, &merged)?;

    Ok(outcome)
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
