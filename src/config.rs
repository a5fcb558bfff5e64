// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Configuration document types describing snake outputs and automation.
//!
//! The types mirror the YAML document consumed by the CLI. Every section
//! except `github` is optional, and a section written as an empty key (for
//! example `automation:` with nothing below it) behaves as if it was omitted.
//! Helper methods derive the values the workflow and README renderers need.

use std::{fmt, path::Path};

use serde::{Deserialize, Deserializer, de};
use serde_yaml::Value;

/// Configuration path used when the CLI receives no argument.
pub const DEFAULT_CONFIG_PATH: &str = "snake-config.yaml";
/// Username expression resolved by GitHub Actions when none is configured.
pub const DEFAULT_USERNAME: &str = "${{ github.repository_owner }}";
/// Cron expression used for scheduled runs: the 1st and 15th of each month.
pub const DEFAULT_SCHEDULE: &str = "0 0 1,15 * *";
/// Branch receiving the generated graphics.
pub const DEFAULT_COMMIT_BRANCH: &str = "main";
/// Commit message template; `${DATE}` is substituted by the CI runner.
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update snake contributions on ${DATE}";
/// README updated when integration is enabled.
pub const DEFAULT_README_PATH: &str = "README.md";

/// Root configuration document.
///
/// # Examples
///
/// ```
/// use snakegen::SnakeConfig;
///
/// let yaml = r#"
/// github:
///   username: octocat
/// outputs:
///   - path: dist/snake.svg
///     type: svg
/// "#;
/// let config: SnakeConfig = serde_yaml::from_str(yaml).expect("valid configuration");
/// assert_eq!(config.outputs.len(), 1);
/// assert!(config.automation.enabled);
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SnakeConfig {
    /// GitHub account whose contributions are rendered.
    #[serde(deserialize_with = "null_as_default")]
    pub github:             GithubSettings,
    /// Requested renderings, in the order they are passed to the generator.
    #[serde(default, deserialize_with = "null_as_default")]
    pub outputs:            Vec<OutputSpec>,
    /// Scheduling and commit policy of the generated workflow.
    #[serde(default, deserialize_with = "null_as_default")]
    pub automation:         AutomationSettings,
    /// README embedding options.
    #[serde(default, alias = "readme", deserialize_with = "null_as_default")]
    pub readme_integration: ReadmeIntegration
}

/// The `github` section.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct GithubSettings {
    /// Account name passed to the generator action.
    #[serde(default, alias = "user")]
    pub username: Option<String>
}

impl GithubSettings {
    /// Returns the configured username, or the Actions expression resolving
    /// the repository owner when the value is missing or blank.
    pub fn resolved_username(&self) -> &str {
        self.username
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_USERNAME)
    }
}

/// One requested rendering.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct OutputSpec {
    /// Destination of the generated image, relative to the repository root.
    #[serde(default)]
    pub path:        Option<String>,
    /// Image format; inferred from the path extension when omitted.
    #[serde(default, rename = "type")]
    pub kind:        Option<OutputKind>,
    /// Named color palette understood by the generator.
    #[serde(default)]
    pub palette:     Option<String>,
    /// Snake color override.
    #[serde(default, alias = "color-snake", alias = "colorSnake")]
    pub color_snake: Option<String>,
    /// Comma separated dot colors override.
    #[serde(default, alias = "color-dots", alias = "colorDots")]
    pub color_dots:  Option<String>
}

impl OutputSpec {
    /// Returns the output path, falling back to `output-<index>.svg` when the
    /// entry has no usable path.
    ///
    /// # Examples
    ///
    /// ```
    /// use snakegen::OutputSpec;
    ///
    /// let spec = OutputSpec::default();
    /// assert_eq!(spec.resolved_path(2), "output-2.svg");
    /// ```
    pub fn resolved_path(&self, index: usize) -> String {
        self.path
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or_else(|| format!("output-{index}.svg"), str::to_owned)
    }

    /// Returns the declared kind, or the kind implied by the path extension.
    pub fn resolved_kind(&self, index: usize) -> OutputKind {
        self.kind
            .unwrap_or_else(|| OutputKind::from_path(&self.resolved_path(index)))
    }

    /// Builds the `?key=value&...` suffix from the non-empty color options.
    ///
    /// Parameters always appear in the order `palette`, `color_snake`,
    /// `color_dots`. Returns an empty string when none is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use snakegen::OutputSpec;
    ///
    /// let spec = OutputSpec {
    ///     palette: Some("github-dark".to_owned()),
    ///     color_dots: Some("#161b22,#01311f".to_owned()),
    ///     ..OutputSpec::default()
    /// };
    /// assert_eq!(spec.query_string(), "?palette=github-dark&color_dots=#161b22,#01311f");
    /// ```
    pub fn query_string(&self) -> String {
        let params: Vec<String> = [
            ("palette", &self.palette),
            ("color_snake", &self.color_snake),
            ("color_dots", &self.color_dots)
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| format!("{key}={value}"))
        })
        .collect();

        if params.is_empty() {
            String::new()
        } else {
            format!("?{}", params.join("&"))
        }
    }

    /// Returns the line handed to the generator action: path plus query.
    pub fn output_line(&self, index: usize) -> String {
        format!("{}{}", self.resolved_path(index), self.query_string())
    }
}

/// Image formats produced by the generator.
///
/// Declared types and path extensions are both matched ignoring ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputKind {
    /// Static SVG; the only kind embedded in READMEs.
    Svg,
    /// Animated GIF.
    Gif,
    /// Any other declared format.
    Other
}

impl OutputKind {
    /// Maps a format name such as `svg` or `GIF` to its kind.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("svg") {
            Self::Svg
        } else if name.eq_ignore_ascii_case("gif") {
            Self::Gif
        } else {
            Self::Other
        }
    }

    fn from_path(path: &str) -> Self {
        Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Other, Self::from_name)
    }
}

impl<'de> Deserialize<'de> for OutputKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        match Value::deserialize(deserializer)? {
            Value::String(name) => Ok(Self::from_name(&name)),
            other => Err(de::Error::custom(format_args!(
                "output type must be a string, found {}",
                scalar_text(&other)
            )))
        }
    }
}

/// The `automation` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AutomationSettings {
    /// Adds the scheduled trigger when `true`.
    pub enabled:        bool,
    /// Cron expression for the scheduled trigger.
    pub schedule:       String,
    /// Emits the commit-and-push step when `true`.
    pub auto_commit:    bool,
    /// Branch the generated graphics are pushed to.
    #[serde(alias = "branch")]
    pub commit_branch:  String,
    /// Commit message template.
    pub commit_message: String
}

impl AutomationSettings {
    /// Returns the push target, or [`DEFAULT_COMMIT_BRANCH`] when the value is
    /// blank.
    pub fn resolved_commit_branch(&self) -> &str {
        let branch = self.commit_branch.trim();
        if branch.is_empty() { DEFAULT_COMMIT_BRANCH } else { branch }
    }
}

impl Default for AutomationSettings {
    fn default() -> Self {
        Self {
            enabled:        true,
            schedule:       DEFAULT_SCHEDULE.to_owned(),
            auto_commit:    true,
            commit_branch:  DEFAULT_COMMIT_BRANCH.to_owned(),
            commit_message: DEFAULT_COMMIT_MESSAGE.to_owned()
        }
    }
}

/// The `readme_integration` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReadmeIntegration {
    /// Rewrites the README when `true`.
    pub enabled:     bool,
    /// Markup flavour used for the embed.
    #[serde(alias = "tag_style")]
    pub tag_type:    TagStyle,
    /// Where the markup is inserted.
    pub position:    SplicePosition,
    /// README location relative to the working directory.
    #[serde(alias = "path")]
    pub readme_path: String
}

impl Default for ReadmeIntegration {
    fn default() -> Self {
        Self {
            enabled:     false,
            tag_type:    TagStyle::Picture,
            position:    SplicePosition::Top,
            readme_path: DEFAULT_README_PATH.to_owned()
        }
    }
}

/// Markup flavour for the README embed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStyle {
    /// `<picture>` with light and dark sources when a dark variant exists.
    #[default]
    Picture,
    /// Plain `<img>`; also used for unrecognized values.
    #[serde(other)]
    Img
}

/// Where generated markup goes relative to the existing README text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SplicePosition {
    /// Before the existing content.
    #[default]
    Top,
    /// After the existing content.
    Bottom,
    /// At the line boundary nearest the middle of the existing content.
    Middle,
    /// After the given number of lines.
    Line(usize),
    /// Anything else; placed like [`SplicePosition::Top`].
    Unrecognized(String)
}

impl SplicePosition {
    /// Interprets a textual position.
    ///
    /// Keywords are matched case-insensitively and a bare number is read as a
    /// line count.
    ///
    /// # Examples
    ///
    /// ```
    /// use snakegen::SplicePosition;
    ///
    /// assert_eq!(SplicePosition::parse(" Bottom "), SplicePosition::Bottom);
    /// assert_eq!(SplicePosition::parse("12"), SplicePosition::Line(12));
    /// ```
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("top") {
            return Self::Top;
        }
        if trimmed.eq_ignore_ascii_case("bottom") {
            return Self::Bottom;
        }
        if trimmed.eq_ignore_ascii_case("middle") {
            return Self::Middle;
        }
        match trimmed.parse::<usize>() {
            Ok(line) => Self::Line(line),
            Err(_) => Self::Unrecognized(value.to_owned())
        }
    }
}

impl fmt::Display for SplicePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("top"),
            Self::Bottom => f.write_str("bottom"),
            Self::Middle => f.write_str("middle"),
            Self::Line(line) => write!(f, "line {line}"),
            Self::Unrecognized(raw) => write!(f, "'{raw}'")
        }
    }
}

impl<'de> Deserialize<'de> for SplicePosition {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawPosition {
            Line(usize),
            Name(String),
            Other(Value)
        }

        Ok(match RawPosition::deserialize(deserializer)? {
            RawPosition::Line(line) => Self::Line(line),
            RawPosition::Name(name) => Self::parse(&name),
            RawPosition::Other(Value::Null) => Self::Top,
            RawPosition::Other(value) => Self::Unrecognized(scalar_text(&value))
        })
    }
}

/// Renders a YAML value the way it was most likely written in the document.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        other => serde_yaml::to_string(other)
            .map(|text| text.trim_end().to_owned())
            .unwrap_or_default()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
