// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! GitHub Actions workflow rendering.
//!
//! Rendering is split in two steps. [`WorkflowPlan::from_config`] resolves
//! every configuration option into the values that appear in the file (trigger
//! branches, optional schedule, output lines, optional commit step), and
//! [`WorkflowPlan::render`] turns the plan into YAML text. Both steps are pure,
//! so the same configuration always yields byte-identical output.

use crate::config::SnakeConfig;

/// Location of the generated workflow, relative to the repository root.
pub const WORKFLOW_PATH: &str = ".github/workflows/generate-snake.yml";
/// Output requested from the generator when the configuration lists none.
pub const DEFAULT_OUTPUT: &str = "github-contribution-grid-snake.svg";

const WORKFLOW_NAME: &str = "Generate Snake Contributions";
const JOB_NAME: &str = "generate-snake";
const CHECKOUT_ACTION: &str = "actions/checkout@v4";
const GENERATOR_ACTION: &str = "Platane/snk@v3";
const TRIGGER_BRANCHES: [&str; 2] = ["main", "master"];
/// Shell command assigning the `DATE` variable consumed by commit messages.
const DATE_ASSIGNMENT: &str = "DATE=\"$(date -u +%Y-%m-%d)\"";

/// Resolved contents of the generated workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowPlan {
    /// Value of the generator's `github_user_name` input.
    pub username: String,
    /// Branches watched by the `push` and `pull_request` triggers.
    pub branches: Vec<String>,
    /// Cron expression of the scheduled trigger, if any.
    pub schedule: Option<String>,
    /// One generator output per entry, query string included.
    pub outputs:  Vec<String>,
    /// Commit step appended after generation, if any.
    pub commit:   Option<CommitStep>
}

/// Commit-and-push step of the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitStep {
    /// Branch receiving the push.
    pub branch:  String,
    /// Message template; `${DATE}` is expanded by the runner's shell.
    pub message: String
}

impl WorkflowPlan {
    /// Resolves the plan for the provided configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use snakegen::{WorkflowPlan, parse_config};
    ///
    /// let config = parse_config("github:\n  username: alice\n").expect("valid configuration");
    /// let plan = WorkflowPlan::from_config(&config);
    /// assert_eq!(plan.outputs, vec!["github-contribution-grid-snake.svg".to_owned()]);
    /// assert_eq!(plan.schedule.as_deref(), Some("0 0 1,15 * *"));
    /// ```
    pub fn from_config(config: &SnakeConfig) -> Self {
        let automation = &config.automation;

        let mut outputs: Vec<String> = config
            .outputs
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.output_line(index))
            .collect();
        if outputs.is_empty() {
            outputs.push(DEFAULT_OUTPUT.to_owned());
        }

        let schedule = automation
            .enabled
            .then(|| automation.schedule.trim().to_owned());

        let commit = automation.auto_commit.then(|| CommitStep {
            branch:  automation.resolved_commit_branch().to_owned(),
            message: automation.commit_message.clone()
        });

        Self {
            username: config.github.resolved_username().to_owned(),
            branches: TRIGGER_BRANCHES.iter().map(|branch| (*branch).to_owned()).collect(),
            schedule,
            outputs,
            commit
        }
    }

    /// Returns the generator outputs, one per line, without indentation.
    pub fn output_block(&self) -> String {
        self.outputs.iter().map(|line| format!("{line}\n")).collect()
    }

    /// Renders the workflow file.
    pub fn render(&self) -> String {
        let mut workflow = format!("name: {WORKFLOW_NAME}\n\n");
        workflow.push_str(&self.render_triggers());
        workflow.push('\n');
        workflow.push_str(&self.render_job());
        workflow
    }

    fn render_triggers(&self) -> String {
        let branches = self
            .branches
            .iter()
            .map(|branch| yaml_double_quoted(branch))
            .collect::<Vec<_>>()
            .join(", ");

        let mut triggers = String::from("on:\n");
        triggers.push_str(&format!("  push:\n    branches: [{branches}]\n"));
        triggers.push_str(&format!("  pull_request:\n    branches: [{branches}]\n"));
        triggers.push_str("  workflow_dispatch:\n");
        if let Some(cron) = &self.schedule {
            triggers.push_str(&format!(
                "  schedule:\n    - cron: {}\n",
                yaml_double_quoted(cron)
            ));
        }
        triggers
    }

    fn render_job(&self) -> String {
        let mut job = format!("jobs:\n  {JOB_NAME}:\n    runs-on: ubuntu-latest\n");
        if self.commit.is_some() {
            job.push_str("    permissions:\n      contents: write\n");
        }

        job.push_str("\n    steps:\n");
        job.push_str(&format!(
            "      - name: Checkout repository\n        uses: {CHECKOUT_ACTION}\n"
        ));

        job.push_str(&format!(
            "\n      - name: Generate snake contribution graphics\n        uses: \
             {GENERATOR_ACTION}\n        with:\n          github_user_name: {}\n          \
             outputs: |\n",
            self.username
        ));
        for line in &self.outputs {
            job.push_str(&format!("            {line}\n"));
        }

        if let Some(commit) = &self.commit {
            job.push_str(&commit.render());
        }

        job
    }
}

impl CommitStep {
    fn render(&self) -> String {
        let mut step = String::from(
            "\n      - name: Commit changes\n        if: github.event_name != 'pull_request'\n        \
             run: |\n"
        );
        let commands = [
            "git config --local user.email \"action@github.com\"".to_owned(),
            "git config --local user.name \"GitHub Action\"".to_owned(),
            "git add .".to_owned(),
            DATE_ASSIGNMENT.to_owned(),
            format!(
                "git diff --staged --quiet || git commit -m {}",
                shell_double_quoted(&self.message)
            ),
            format!("git push origin {}", shell_double_quoted(&format!("HEAD:{}", self.branch)))
        ];
        for command in &commands {
            step.push_str(&format!("          {command}\n"));
        }
        step.push_str("        env:\n          GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}\n");
        step
    }
}

/// Renders the workflow for a configuration in one call.
pub fn render_workflow(config: &SnakeConfig) -> String {
    WorkflowPlan::from_config(config).render()
}

fn yaml_double_quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}

/// Quotes for a POSIX shell while leaving `$` expansions such as `${DATE}`
/// active.
fn shell_double_quoted(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('`', "\\`");
    format!("\"{escaped}\"")
}
