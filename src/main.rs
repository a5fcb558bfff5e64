//! Command-line interface for the snakegen binary.
//!
//! The CLI takes an optional configuration path, writes the snake workflow
//! into the current directory and optionally updates the README. Progress is
//! printed to stdout; diagnostics go through `tracing` to stderr and are
//! controlled with `RUST_LOG`.

use std::{
    io,
    path::{Path, PathBuf},
    process
};

use clap::Parser;
use snakegen::{
    DEFAULT_CONFIG_PATH, Error, GenerationReport, ReadmeOutcome, generate, load_config
};
use tracing_subscriber::EnvFilter;

/// Command line interface for generating snake contribution automation.
#[derive(Debug, Parser)]
#[command(
    name = "snakegen",
    version,
    about = "Generate a GitHub workflow for snake contribution graphics"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(value_name = "CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main() {
    init_tracing();

    if let Err(error) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration loading and file writing errors.
fn run() -> Result<(), Error> {
    let cli = Cli::parse();

    println!("Snake Contribution Generator");
    println!("{}", "=".repeat(40));

    let report = run_in(&cli, Path::new("."))?;
    print_summary(&report);

    Ok(())
}

/// Loads the configuration named by `cli` and generates files under `root`.
fn run_in(cli: &Cli, root: &Path) -> Result<GenerationReport, Error> {
    let config = load_config(&cli.config)?;
    println!("Loaded configuration from {}", cli.config.display());

    let report = generate(&config, root)?;
    println!("Created GitHub workflow: {}", report.workflow.display());

    if let Some(readme) = &report.readme {
        match &readme.outcome {
            ReadmeOutcome::Updated {
                backup
            } => {
                println!("Backed up existing README to {}", backup.display());
                println!("Updated {} with snake graphics", readme.path.display());
            }
            ReadmeOutcome::Created => {
                println!("Created {} with snake graphics", readme.path.display());
            }
            ReadmeOutcome::Unchanged => {
                println!("{} already shows the snake graphics", readme.path.display());
            }
        }
    }

    Ok(report)
}

fn print_summary(report: &GenerationReport) {
    println!();
    println!("Snake contribution automation setup complete!");
    println!();
    println!("Next steps:");
    println!("1. Make sure the username in your configuration is your GitHub username");
    println!("2. Customize the output configurations as needed");
    println!("3. Commit and push {}", report.workflow.display());
    println!("4. Your snake graphics will be generated according to your schedule");
    if let Some(readme) = &report.readme {
        println!("5. Review {} before committing it", readme.path.display());
    }
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, run_in};

    #[test]
    fn cli_defaults_to_snake_config() {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME")]).expect("failed to parse CLI");
        assert_eq!(cli.config, Path::new("snake-config.yaml"));
    }

    #[test]
    fn cli_accepts_positional_config_path() {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "configs/snake.yaml"])
            .expect("failed to parse CLI");
        assert_eq!(cli.config, Path::new("configs/snake.yaml"));
    }

    #[test]
    fn cli_rejects_unknown_flags() {
        assert!(Cli::try_parse_from([env!("CARGO_PKG_NAME"), "--pretty"]).is_err());
    }

    #[test]
    fn run_in_writes_workflow_under_root() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("snake-config.yaml");
        fs::write(&config_path, "github:\n  username: alice\n").expect("failed to write config");

        let cli = Cli {
            config: config_path
        };
        let report = run_in(&cli, temp.path()).expect("run failed");

        assert!(report.workflow.exists());
        assert!(report.readme.is_none());
    }

    #[test]
    fn run_in_reports_missing_github_without_writing() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("snake-config.yaml");
        fs::write(&config_path, "outputs: []\n").expect("failed to write config");

        let cli = Cli {
            config: config_path
        };
        let error = run_in(&cli, temp.path()).expect_err("expected missing field");

        assert!(matches!(error, snakegen::Error::MissingField { .. }));
        assert!(!temp.path().join(".github").exists());
    }
}
