//! Step configuration
//!
//! Inputs are read through an [`InputSource`]. On a GitHub runner that is
//! [`EnvInputs`], which follows the Actions convention of exposing each step
//! input `name` as the environment variable `INPUT_<NAME>` (upper-cased, spaces
//! replaced by underscores, hyphens kept).
//!
//! # Inputs
//!
//! - `api-key`: comma-separated API keys - **required**
//! - `project`: comma-separated project ids, same length as `api-key` - **required**
//! - `artifact-path`, `test-cucumber-path`, `test-junit-path`, `spdx-json-path`:
//!   glob patterns, one per line
//! - `api-url`: service base URL - default: "https://app.ketryx.com"
//! - `version`, `build-name`: optional build metadata
//! - `commit-sha`: default: `GITHUB_SHA`
//! - `check-dependencies-status`, `check-changes-status`, `check-release-status`:
//!   booleans - default: false
//!
//! # Example
//!
//! ```
//! use ketryx_report::config::{MapInputs, RunInputs};
//!
//! let source = MapInputs::new()
//!     .with_input("api-key", "KXK1,KXK2")
//!     .with_input("project", "KXPRJ1,KXPRJ2")
//!     .with_input("artifact-path", "dist/*.tar.gz\ntarget/release/app");
//!
//! let inputs = RunInputs::read(&source);
//! let pairs = inputs.credential_pairs().unwrap();
//! assert_eq!(pairs.len(), 2);
//! assert_eq!(inputs.patterns.artifact_path.len(), 2);
//! ```

use crate::upload::ArtifactType;
use reqwest::Url;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://app.ketryx.com";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `api-key` and `project` lists differ in length
    #[error("The number of api-keys must match the number of projects")]
    CredentialCountMismatch { api_keys: usize, projects: usize },

    /// A required input was empty or absent
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    /// A boolean input had a value outside the accepted spellings
    #[error("Input does not meet YAML 1.2 \"Core Schema\" specification: {name}. Supported boolean values: true | True | TRUE | false | False | FALSE")]
    InvalidBoolean { name: String },

    /// `api-url` is not an http(s) URL with a host
    #[error("Invalid api-url '{0}': expected an http:// or https:// URL")]
    InvalidApiUrl(String),
}

/// Where named inputs and runner environment values come from
pub trait InputSource {
    /// Raw value of a step input, `None` when unset
    fn input(&self, name: &str) -> Option<String>;

    /// Raw value of a runner environment variable such as `GITHUB_SHA`
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads inputs from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvInputs;

impl EnvInputs {
    pub fn input_var_name(name: &str) -> String {
        format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
    }
}

impl InputSource for EnvInputs {
    fn input(&self, name: &str) -> Option<String> {
        env::var(Self::input_var_name(name)).ok()
    }

    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

/// In-memory input source
#[derive(Debug, Clone, Default)]
pub struct MapInputs {
    inputs: HashMap<String, String>,
    vars: HashMap<String, String>,
}

impl MapInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl InputSource for MapInputs {
    fn input(&self, name: &str) -> Option<String> {
        self.inputs.get(name).cloned()
    }

    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

/// Trimmed input value, empty when unset
pub fn get_input(source: &dyn InputSource, name: &str) -> String {
    source
        .input(name)
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Non-empty trimmed lines of an input
pub fn get_multiline_input(source: &dyn InputSource, name: &str) -> Vec<String> {
    source
        .input(name)
        .unwrap_or_default()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// Boolean input, `false` when unset or empty
pub fn get_boolean_input(source: &dyn InputSource, name: &str) -> Result<bool, ConfigError> {
    match get_input(source, name).as_str() {
        "" | "false" | "False" | "FALSE" => Ok(false),
        "true" | "True" | "TRUE" => Ok(true),
        _ => Err(ConfigError::InvalidBoolean {
            name: name.to_string(),
        }),
    }
}

fn optional_input(source: &dyn InputSource, name: &str) -> Option<String> {
    Some(get_input(source, name)).filter(|v| !v.is_empty())
}

fn optional_var(source: &dyn InputSource, name: &str) -> Option<String> {
    source
        .var(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-split without dropping empty entries, so list lengths stay comparable
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',').map(|s| s.trim().to_string()).collect()
}

/// Glob patterns for the four reported file categories
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPatterns {
    pub artifact_path: Vec<String>,
    pub test_cucumber_path: Vec<String>,
    pub test_junit_path: Vec<String>,
    pub spdx_json_path: Vec<String>,
}

impl PathPatterns {
    pub fn for_type(&self, artifact_type: ArtifactType) -> &[String] {
        match artifact_type {
            ArtifactType::Artifact => &self.artifact_path,
            ArtifactType::CucumberJson => &self.test_cucumber_path,
            ArtifactType::JunitXml => &self.test_junit_path,
            ArtifactType::SpdxJson => &self.spdx_json_path,
        }
    }

    pub fn is_empty(&self) -> bool {
        ArtifactType::ALL
            .iter()
            .all(|kind| self.for_type(*kind).is_empty())
    }
}

/// Build metadata shared by every credential/project pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// Service base URL without a trailing slash
    pub api_url: String,
    pub version: Option<String>,
    pub commit_sha: Option<String>,
    pub build_name: Option<String>,
    pub repository_url: Option<String>,
    /// Link back to the workflow run
    pub source_url: Option<String>,
    pub check_dependencies_status: bool,
    pub check_changes_status: bool,
    pub check_release_status: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            version: None,
            commit_sha: None,
            build_name: None,
            repository_url: None,
            source_url: None,
            check_dependencies_status: false,
            check_changes_status: false,
            check_release_status: false,
        }
    }
}

impl BuildSettings {
    pub fn read(source: &dyn InputSource) -> Result<Self, ConfigError> {
        let api_url = normalize_api_url(&get_input(source, "api-url"))?;

        let repository_url = match (
            optional_var(source, "GITHUB_SERVER_URL"),
            optional_var(source, "GITHUB_REPOSITORY"),
        ) {
            (Some(server), Some(repo)) => Some(format!("{}/{}", server.trim_end_matches('/'), repo)),
            _ => None,
        };
        let source_url = match (&repository_url, optional_var(source, "GITHUB_RUN_ID")) {
            (Some(repo_url), Some(run_id)) => Some(format!("{}/actions/runs/{}", repo_url, run_id)),
            _ => None,
        };

        Ok(Self {
            api_url,
            version: optional_input(source, "version"),
            commit_sha: optional_input(source, "commit-sha")
                .or_else(|| optional_var(source, "GITHUB_SHA")),
            build_name: optional_input(source, "build-name"),
            repository_url,
            source_url,
            check_dependencies_status: get_boolean_input(source, "check-dependencies-status")?,
            check_changes_status: get_boolean_input(source, "check-changes-status")?,
            check_release_status: get_boolean_input(source, "check-release-status")?,
        })
    }
}

fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    if raw.is_empty() {
        return Ok(DEFAULT_API_URL.to_string());
    }
    let has_host = Url::parse(raw)
        .map(|url| {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        })
        .unwrap_or(false);
    if !has_host {
        return Err(ConfigError::InvalidApiUrl(raw.to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

/// One API key and the project it reports to
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub project: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("project", &self.project)
            .finish()
    }
}

/// Everything the step reads before the first pass.
///
/// Only the key and project lists are checked up front. A malformed shared
/// setting is kept as an error and fails each pass that uses it.
#[derive(Clone)]
pub struct RunInputs {
    pub api_keys: Vec<String>,
    pub projects: Vec<String>,
    pub patterns: PathPatterns,
    pub settings: Result<BuildSettings, ConfigError>,
}

impl fmt::Debug for RunInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted: Vec<&str> = self.api_keys.iter().map(|_| "***").collect();
        f.debug_struct("RunInputs")
            .field("api_keys", &redacted)
            .field("projects", &self.projects)
            .field("patterns", &self.patterns)
            .field("settings", &self.settings)
            .finish()
    }
}

impl RunInputs {
    pub fn read(source: &dyn InputSource) -> Self {
        Self {
            api_keys: split_list(&get_input(source, "api-key")),
            projects: split_list(&get_input(source, "project")),
            patterns: PathPatterns {
                artifact_path: get_multiline_input(source, "artifact-path"),
                test_cucumber_path: get_multiline_input(source, "test-cucumber-path"),
                test_junit_path: get_multiline_input(source, "test-junit-path"),
                spdx_json_path: get_multiline_input(source, "spdx-json-path"),
            },
            settings: BuildSettings::read(source),
        }
    }

    /// Zips the key and project lists, failing when their lengths differ
    pub fn credential_pairs(&self) -> Result<Vec<Credentials>, ConfigError> {
        if self.api_keys.len() != self.projects.len() {
            return Err(ConfigError::CredentialCountMismatch {
                api_keys: self.api_keys.len(),
                projects: self.projects.len(),
            });
        }

        Ok(self
            .api_keys
            .iter()
            .zip(&self.projects)
            .map(|(api_key, project)| Credentials {
                api_key: api_key.clone(),
                project: project.clone(),
            })
            .collect())
    }

    /// Builds the per-pass input for one pair
    pub fn action_input(&self, credentials: &Credentials) -> Result<ActionInput, ConfigError> {
        if credentials.api_key.is_empty() {
            return Err(ConfigError::MissingInput("api-key".to_string()));
        }
        if credentials.project.is_empty() {
            return Err(ConfigError::MissingInput("project".to_string()));
        }

        Ok(ActionInput {
            api_key: credentials.api_key.clone(),
            project: credentials.project.clone(),
            patterns: self.patterns.clone(),
            settings: self.settings.clone()?,
        })
    }
}

/// Configuration of a single pass
#[derive(Clone, PartialEq, Eq)]
pub struct ActionInput {
    pub api_key: String,
    pub project: String,
    pub patterns: PathPatterns,
    pub settings: BuildSettings,
}

impl fmt::Debug for ActionInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInput")
            .field("api_key", &"***")
            .field("project", &self.project)
            .field("patterns", &self.patterns)
            .field("settings", &self.settings)
            .finish()
    }
}
