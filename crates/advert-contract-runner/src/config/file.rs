// crates/advert-contract-runner/src/config/file.rs
// ============================================================================
// Module: Runner Configuration File
// Description: TOML-backed run settings and validation.
// Purpose: Load run settings from disk with size limits and strict keys.
// Dependencies: advert-contract-core, serde, toml
// ============================================================================

//! ## Overview
//! [`RunnerConfig`] is parsed from TOML with unknown keys rejected. The
//! default file is optional; an explicit path (flag or
//! [`CONFIG_ENV_VAR`]) must exist.
//! Invariants:
//! - A validated config always yields a valid [`ContractModel`] and a
//!   non-empty scenario selection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use advert_contract_core::ContractModel;
use advert_contract_core::ContractSettings;
use advert_contract_core::RouteTable;
use serde::Deserialize;
use serde::Serialize;
use url::Url;

use crate::config::ConfigError;
use crate::config::env::EnvOverrides;
use crate::config::env::read_env_strict;
use crate::scenario::ScenarioKind;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "advert-contract.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "ADVERT_CONTRACT_CONFIG";
/// Service exercised when no base URL is configured.
pub const DEFAULT_BASE_URL: &str = "https://qa-internship.avito.com";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 256 * 1024;
/// Maximum total config path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default request timeout in milliseconds.
pub(crate) const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 120_000;
/// Default number of concurrently running scenarios.
pub(crate) const DEFAULT_JOBS: usize = 4;
/// Maximum number of concurrently running scenarios.
pub(crate) const MAX_JOBS: usize = 64;
/// Default number of creations in the uniqueness scenario.
pub(crate) const DEFAULT_UNIQUENESS_SAMPLES: usize = 3;
/// Maximum number of creations in the uniqueness scenario.
pub(crate) const MAX_UNIQUENESS_SAMPLES: usize = 100;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Base URL of the service under test.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Run seed; drawn at random when absent.
    pub seed: Option<u64>,
    /// Maximum scenarios running at once.
    pub jobs: usize,
    /// Contract tunables.
    pub contract: ContractSettings,
    /// Versions selected per operation.
    pub routes: RouteTable,
    /// Scenario selection.
    pub scenarios: ScenarioSettings,
    /// Artifact output.
    pub artifacts: ArtifactSettings,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            seed: None,
            jobs: DEFAULT_JOBS,
            contract: ContractSettings::default(),
            routes: RouteTable::default(),
            scenarios: ScenarioSettings::default(),
            artifacts: ArtifactSettings::default(),
        }
    }
}

/// Scenario selection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioSettings {
    /// Scenario names to run; empty runs the full catalog.
    pub include: Vec<String>,
    /// Number of creations checked by the uniqueness scenario.
    pub uniqueness_samples: usize,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            uniqueness_samples: DEFAULT_UNIQUENESS_SAMPLES,
        }
    }
}

/// Artifact output settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactSettings {
    /// Directory receiving the report and transcript; none disables artifacts.
    pub dir: Option<PathBuf>,
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl RunnerConfig {
    /// Loads configuration from disk and validates it.
    ///
    /// Resolution order: `path`, then [`CONFIG_ENV_VAR`], then
    /// [`DEFAULT_CONFIG_NAME`] in the working directory. Only the default
    /// file may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when reading, parsing, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        if !explicit && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", resolved.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies environment overrides and revalidates.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the overridden config is invalid.
    pub fn apply_env(&mut self, overrides: &EnvOverrides) -> Result<(), ConfigError> {
        if let Some(base_url) = &overrides.base_url {
            self.base_url.clone_from(base_url);
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(timeout) = overrides.timeout {
            self.timeout_ms = u64::try_from(timeout.as_millis())
                .map_err(|_| ConfigError::Invalid("timeout is too large".to_string()))?;
        }
        if let Some(jobs) = overrides.jobs {
            self.jobs = jobs;
        }
        self.validate()
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|err| ConfigError::Invalid(format!("base_url is not a url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid("base_url must use http or https".to_string()));
        }
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        if !(1 ..= MAX_JOBS).contains(&self.jobs) {
            return Err(ConfigError::Invalid(format!("jobs must be between 1 and {MAX_JOBS}")));
        }
        if !(2 ..= MAX_UNIQUENESS_SAMPLES).contains(&self.scenarios.uniqueness_samples) {
            return Err(ConfigError::Invalid(format!(
                "scenarios.uniqueness_samples must be between 2 and {MAX_UNIQUENESS_SAMPLES}"
            )));
        }
        self.contract_model()?;
        self.selected_scenarios()?;
        Ok(())
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Builds the contract model described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when routes or contract settings are invalid.
    pub fn contract_model(&self) -> Result<ContractModel, ConfigError> {
        ContractModel::new(self.routes.clone(), &self.contract)
            .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Resolves the scenario selection against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a name is unknown or refers to a
    /// statistics version that is not configured.
    pub fn selected_scenarios(&self) -> Result<Vec<ScenarioKind>, ConfigError> {
        let catalog = ScenarioKind::catalog(&self.routes);
        if self.scenarios.include.is_empty() {
            return Ok(catalog);
        }
        let mut selected = Vec::new();
        for name in &self.scenarios.include {
            let kind = catalog
                .iter()
                .copied()
                .find(|kind| kind.name() == name.trim())
                .ok_or_else(|| ConfigError::Invalid(format!("unknown scenario: {name}")))?;
            if !selected.contains(&kind) {
                selected.push(kind);
            }
        }
        Ok(selected)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path and reports whether it was given explicitly.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Some(env_path) = read_env_strict(CONFIG_ENV_VAR)?
        && !env_path.trim().is_empty()
    {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), false))
}
