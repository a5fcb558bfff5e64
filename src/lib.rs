//! Utilities for automating snake contribution graphics.
//!
//! The library loads a YAML configuration describing which snake images to
//! generate and how often, renders a GitHub Actions workflow driving the
//! `Platane/snk` generator, and optionally embeds the resulting images into a
//! README.

mod config;
mod error;
mod file;
mod generator;
mod loader;
mod readme;
mod workflow;

pub use config::{
    AutomationSettings, DEFAULT_CONFIG_PATH, GithubSettings, OutputKind, OutputSpec,
    ReadmeIntegration, SnakeConfig, SplicePosition, TagStyle
};
pub use error::Error;
pub use file::{backup_file, backup_path, write_file};
pub use generator::{GenerationReport, ReadmeReport, generate};
pub use loader::{load_config, parse_config};
pub use readme::{ReadmeOutcome, compose_markup, splice, update_readme};
pub use workflow::{CommitStep, DEFAULT_OUTPUT, WORKFLOW_PATH, WorkflowPlan, render_workflow};
