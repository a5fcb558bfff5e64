// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! End-to-end generation run.
//!
//! [`generate`] writes the workflow file and, when README integration applies,
//! updates the README. Every path in the configuration is resolved against the
//! `root` directory handed in by the caller.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::{
    config::SnakeConfig,
    error::Error,
    file,
    readme::{self, ReadmeOutcome},
    workflow::{WORKFLOW_PATH, WorkflowPlan}
};

/// Files produced by a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Location of the written workflow file.
    pub workflow: PathBuf,
    /// README location and outcome, when integration applied.
    pub readme:   Option<ReadmeReport>
}

/// README part of a [`GenerationReport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadmeReport {
    /// README location.
    pub path:    PathBuf,
    /// What happened to it.
    pub outcome: ReadmeOutcome
}

/// Runs the generation for `config` inside `root`.
///
/// The workflow is always written. The README is only touched when
/// [`readme::compose_markup`] produces markup.
///
/// # Errors
///
/// Propagates write, read and backup failures from the file and README
/// helpers. The workflow is written before the README is considered, so a
/// README failure leaves the workflow in place.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use snakegen::{generate, load_config};
///
/// # fn main() -> Result<(), snakegen::Error> {
/// let config = load_config(Path::new("snake-config.yaml"))?;
/// let report = generate(&config, Path::new("."))?;
/// println!("Created GitHub workflow: {}", report.workflow.display());
/// # Ok(())
/// # }
/// ```
pub fn generate(config: &SnakeConfig, root: &Path) -> Result<GenerationReport, Error> {
    let plan = WorkflowPlan::from_config(config);
    info!(
        outputs = plan.outputs.len(),
        scheduled = plan.schedule.is_some(),
        auto_commit = plan.commit.is_some(),
        "Rendering workflow"
    );

    let workflow = root.join(WORKFLOW_PATH);
    file::write_file(&workflow, &plan.render())?;
    info!("Wrote workflow to {}", workflow.display());

    let readme = match readme::compose_markup(config) {
        Some(markup) => {
            let integration = &config.readme_integration;
            let path = root.join(&integration.readme_path);
            let outcome = readme::update_readme(&path, &markup, &integration.position)?;
            Some(ReadmeReport {
                path,
                outcome
            })
        }
        None => None
    };

    Ok(GenerationReport {
        workflow,
        readme
    })
}
