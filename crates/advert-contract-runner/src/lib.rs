// crates/advert-contract-runner/src/lib.rs
// ============================================================================
// Module: Advert Contract Runner Library
// Description: Scenario catalog, engine, configuration, and reports.
// Purpose: Verify a live advertisement service against its contract.
// Dependencies: advert-contract-core, advert-contract-http, tokio
// ============================================================================

//! ## Overview
//! The runner turns a [`RunnerConfig`] into a set of [`ScenarioKind`]s,
//! executes them through any [`advert_contract_http::Transport`], and
//! collects a [`RunReport`]. Scenarios are independent; a failing scenario
//! never stops the others.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod engine;
pub mod report;
pub mod scenario;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::EnvOverrides;
pub use config::RunnerConfig;
pub use engine::Engine;
pub use engine::EngineSettings;
pub use report::ReportError;
pub use report::RunReport;
pub use report::RunTotals;
pub use report::ScenarioReport;
pub use report::ScenarioStatus;
pub use report::Verdict;
pub use report::write_artifacts;
pub use scenario::FailureKind;
pub use scenario::IdLedger;
pub use scenario::ScenarioContext;
pub use scenario::ScenarioKind;
pub use scenario::StepFailure;
pub use scenario::StepRecord;
