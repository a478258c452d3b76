// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Target, timeout, and artifact settings for contract system tests.
// Purpose: Turn system-test environment variables into runner configurations.
// Dependencies: advert-contract-runner
// ============================================================================

//! ## Overview
//! System tests run against the in-process stub unless a target service URL
//! is configured. Environment values go through the runner's strict readers,
//! so empty values, invalid UTF-8, and bad numbers fail the same way they do
//! for the CLI.
//! Invariants:
//! - The timeout override only lengthens the default request timeout.
//! - A configured target must pass the runner's base URL validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use advert_contract_runner::ConfigError;
use advert_contract_runner::RunnerConfig;
use advert_contract_runner::config::env::parse_timeout_seconds;
use advert_contract_runner::config::env::read_env_nonempty;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Per-request timeout used when no override is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Directory receiving per-test artifacts when no root is configured.
pub const DEFAULT_ARTIFACT_ROOT: &str = "target/system-tests";

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Directory receiving one subdirectory per test.
    ArtifactRoot,
    /// External service URL; the in-process stub is used otherwise.
    TargetUrl,
    /// Minimum request timeout in seconds.
    TimeoutSeconds,
}

impl SystemTestEnv {
    /// Every system-test environment key.
    pub const ALL: [Self; 3] = [Self::ArtifactRoot, Self::TargetUrl, Self::TimeoutSeconds];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ArtifactRoot => "ADVERT_CONTRACT_SYSTEM_TEST_ARTIFACT_ROOT",
            Self::TargetUrl => "ADVERT_CONTRACT_SYSTEM_TEST_TARGET_URL",
            Self::TimeoutSeconds => "ADVERT_CONTRACT_SYSTEM_TEST_TIMEOUT_SEC",
        }
    }
}

// ============================================================================
// SECTION: Config
// ============================================================================

/// System test settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Artifact root override.
    pub artifact_root: Option<PathBuf>,
    /// External service URL.
    pub target_url: Option<String>,
    /// Minimum request timeout.
    pub min_timeout: Option<Duration>,
}

impl SystemTestConfig {
    /// Loads settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is not valid UTF-8, is
    /// empty, is not a positive timeout, or is not an http(s) service URL.
    pub fn load() -> Result<Self, ConfigError> {
        let artifact_root =
            read_env_nonempty(SystemTestEnv::ArtifactRoot.as_str())?.map(PathBuf::from);
        let target_url = read_env_nonempty(SystemTestEnv::TargetUrl.as_str())?
            .map(|value| check_target_url(SystemTestEnv::TargetUrl.as_str(), value))
            .transpose()?;
        let min_timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        Ok(Self {
            artifact_root,
            target_url,
            min_timeout,
        })
    }

    /// Returns the per-request timeout for contract runs.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        self.min_timeout.map_or(DEFAULT_REQUEST_TIMEOUT, |min| min.max(DEFAULT_REQUEST_TIMEOUT))
    }

    /// Builds a seeded runner configuration targeting `base_url`.
    #[must_use]
    pub fn runner_config(&self, base_url: &str, seed: u64) -> RunnerConfig {
        RunnerConfig {
            base_url: base_url.to_string(),
            timeout_ms: u64::try_from(self.request_timeout().as_millis()).unwrap_or(u64::MAX),
            seed: Some(seed),
            ..RunnerConfig::default()
        }
    }

    /// Returns the artifact directory for `test_name`.
    #[must_use]
    pub fn artifact_dir(&self, test_name: &str) -> PathBuf {
        self.artifact_root
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_ARTIFACT_ROOT))
            .join(test_name)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Accepts a target only when the runner would accept it as a base URL.
fn check_target_url(name: &str, value: String) -> Result<String, ConfigError> {
    let candidate = RunnerConfig {
        base_url: value,
        ..RunnerConfig::default()
    };
    candidate.validate().map_err(|err| ConfigError::Invalid(format!("{name}: {err}")))?;
    Ok(candidate.base_url)
}
