// crates/advert-contract-runner/src/config/mod.rs
// ============================================================================
// Module: Runner Configuration
// Description: TOML configuration with environment overrides.
// Purpose: Resolve run settings from file, environment, and defaults.
// Dependencies: serde, toml, thiserror
// ============================================================================

//! ## Overview
//! Configuration is layered: defaults, then the TOML file, then environment
//! overrides. The CLI applies its own flags last. Every layer is validated
//! before a run starts.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod env;
pub mod file;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use env::EnvOverrides;
pub use env::RunnerEnv;
pub use file::ArtifactSettings;
pub use file::CONFIG_ENV_VAR;
pub use file::DEFAULT_BASE_URL;
pub use file::DEFAULT_CONFIG_NAME;
pub use file::RunnerConfig;
pub use file::ScenarioSettings;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}
