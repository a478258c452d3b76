// crates/advert-contract-runner/src/config/env.rs
// ============================================================================
// Module: Runner Environment
// Description: Environment-backed overrides for run settings.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8, empty values, and unparsable numbers fail
//! closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use crate::config::ConfigError;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerEnv {
    /// Base URL override.
    BaseUrl,
    /// Run seed override (unsigned integer).
    Seed,
    /// Request timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Concurrent scenario limit override (positive integer).
    Jobs,
}

impl RunnerEnv {
    /// All override keys.
    pub const ALL: [Self; 4] = [Self::BaseUrl, Self::Seed, Self::TimeoutSeconds, Self::Jobs];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "ADVERT_CONTRACT_BASE_URL",
            Self::Seed => "ADVERT_CONTRACT_SEED",
            Self::TimeoutSeconds => "ADVERT_CONTRACT_TIMEOUT_SEC",
            Self::Jobs => "ADVERT_CONTRACT_JOBS",
        }
    }
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Typed overrides derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnvOverrides {
    /// Base URL override.
    pub base_url: Option<String>,
    /// Run seed override.
    pub seed: Option<u64>,
    /// Request timeout override.
    pub timeout: Option<Duration>,
    /// Concurrent scenario limit override.
    pub jobs: Option<usize>,
}

impl EnvOverrides {
    /// Loads overrides from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is not valid UTF-8, is
    /// empty, or fails to parse.
    pub fn load() -> Result<Self, ConfigError> {
        let base_url = read_env_nonempty(RunnerEnv::BaseUrl.as_str())?;
        let seed = read_env_nonempty(RunnerEnv::Seed.as_str())?
            .map(|value| parse_u64(RunnerEnv::Seed.as_str(), &value))
            .transpose()?;
        let timeout = read_env_nonempty(RunnerEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(RunnerEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let jobs = read_env_nonempty(RunnerEnv::Jobs.as_str())?
            .map(|value| parse_positive(RunnerEnv::Jobs.as_str(), &value))
            .transpose()?;
        Ok(Self {
            base_url,
            seed,
            timeout,
            jobs,
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, ConfigError> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{name} must be valid UTF-8")))
    })
}

/// Reads an environment variable, trimmed, and rejects empty values.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] when the value is not valid UTF-8 or is
/// empty after trimming.
pub fn read_env_nonempty(name: &str) -> Result<Option<String>, ConfigError> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => {
            Err(ConfigError::Invalid(format!("{name} must not be empty")))
        }
        Some(value) => Ok(Some(value.trim().to_string())),
        None => Ok(None),
    }
}

/// Parses an unsigned integer.
fn parse_u64(name: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be an unsigned integer")))
}

/// Parses a positive integer.
fn parse_positive(name: &str, raw: &str) -> Result<usize, ConfigError> {
    let value: usize = raw
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{name} must be a positive integer")))?;
    if value == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(value)
}

/// Parses a positive timeout value in seconds.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] naming `name` when the value is not a
/// positive integer.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs: u64 = raw.trim().parse().map_err(|_| {
        ConfigError::Invalid(format!("{name} must be a positive integer number of seconds"))
    })?;
    if secs == 0 {
        return Err(ConfigError::Invalid(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_secs(secs))
}
