// crates/advert-contract-runner/src/report.rs
// ============================================================================
// Module: Run Reports
// Description: Scenario results, run totals, and report artifacts.
// Purpose: Render a run as canonical JSON and a markdown summary.
// Dependencies: crate::scenario, serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`RunReport`] lists one [`ScenarioReport`] per selected scenario, in
//! catalog order, plus totals. JSON output uses RFC 8785 canonicalization so
//! two runs with the same seed and outcomes render byte-identical reports
//! apart from durations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::scenario::FailureKind;
use crate::scenario::StepFailure;
use crate::scenario::StepRecord;

// ============================================================================
// SECTION: Artifact Names
// ============================================================================

/// File name of the canonical JSON report.
pub const REPORT_JSON: &str = "report.json";
/// File name of the markdown summary.
pub const SUMMARY_MARKDOWN: &str = "summary.md";
/// File name of the HTTP transcript.
pub const TRANSCRIPT_JSON: &str = "transcript.json";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while rendering or writing reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Filesystem failure.
    #[error("report io error: {0}")]
    Io(String),
    /// Serialization failure.
    #[error("report serialization error: {0}")]
    Serialize(String),
}

// ============================================================================
// SECTION: Scenario Reports
// ============================================================================

/// Final state of one scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every step met the contract.
    Passed,
    /// A step observed a contract violation.
    Failed,
    /// A step could not obtain a usable response.
    Errored,
}

impl ScenarioStatus {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Errored => "errored",
        }
    }
}

/// Result of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name.
    pub name: String,
    /// Scenario description.
    pub description: String,
    /// Seed of the scenario's fixture generator.
    pub seed: u64,
    /// Final status.
    pub status: ScenarioStatus,
    /// Executed steps in order.
    pub steps: Vec<StepRecord>,
    /// First failing step, if any.
    pub failure: Option<StepFailure>,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

impl ScenarioReport {
    /// Builds a report from a scenario outcome.
    #[must_use]
    pub fn from_outcome(
        name: &str,
        description: &str,
        seed: u64,
        steps: Vec<StepRecord>,
        outcome: Result<(), StepFailure>,
        duration_ms: u64,
    ) -> Self {
        let (status, failure) = match outcome {
            Ok(()) => (ScenarioStatus::Passed, None),
            Err(failure) if failure.is_violation() => (ScenarioStatus::Failed, Some(failure)),
            Err(failure) => (ScenarioStatus::Errored, Some(failure)),
        };
        Self {
            name: name.to_string(),
            description: description.to_string(),
            seed,
            status,
            steps,
            failure,
            duration_ms,
        }
    }
}

// ============================================================================
// SECTION: Run Reports
// ============================================================================

/// Scenario counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Scenarios executed.
    pub total: usize,
    /// Scenarios passed.
    pub passed: usize,
    /// Scenarios with contract violations.
    pub failed: usize,
    /// Scenarios with infrastructure errors.
    pub errored: usize,
}

impl RunTotals {
    /// Counts statuses across scenario reports.
    #[must_use]
    pub fn tally(scenarios: &[ScenarioReport]) -> Self {
        let mut totals = Self {
            total: scenarios.len(),
            ..Self::default()
        };
        for scenario in scenarios {
            match scenario.status {
                ScenarioStatus::Passed => totals.passed += 1,
                ScenarioStatus::Failed => totals.failed += 1,
                ScenarioStatus::Errored => totals.errored += 1,
            }
        }
        totals
    }
}

/// Overall verdict of a run, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every scenario passed.
    Conformant,
    /// At least one contract violation.
    Violations,
    /// Infrastructure errors and no violation.
    Incomplete,
}

impl Verdict {
    /// Returns the process exit code for the verdict.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        match self {
            Self::Conformant => 0,
            Self::Violations => 1,
            Self::Incomplete => 2,
        }
    }

    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conformant => "conformant",
            Self::Violations => "violations",
            Self::Incomplete => "incomplete",
        }
    }
}

/// Report of a full contract run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Service base URL.
    pub base_url: String,
    /// Root fixture seed.
    pub seed: u64,
    /// Counts per status.
    pub totals: RunTotals,
    /// Scenario results in catalog order.
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    /// Builds a run report and its totals.
    #[must_use]
    pub fn new(base_url: impl Into<String>, seed: u64, scenarios: Vec<ScenarioReport>) -> Self {
        Self {
            base_url: base_url.into(),
            seed,
            totals: RunTotals::tally(&scenarios),
            scenarios,
        }
    }

    /// Returns the verdict. Violations outrank infrastructure errors.
    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        if self.totals.failed > 0 {
            Verdict::Violations
        } else if self.totals.errored > 0 {
            Verdict::Incomplete
        } else {
            Verdict::Conformant
        }
    }

    /// Returns the scenarios that did not pass.
    pub fn failures(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|scenario| scenario.status != ScenarioStatus::Passed)
    }

    /// Renders the report as canonical JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Serialize`] when canonicalization fails.
    pub fn to_canonical_json(&self) -> Result<Vec<u8>, ReportError> {
        serde_jcs::to_vec(self).map_err(|err| ReportError::Serialize(err.to_string()))
    }

    /// Renders the markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Contract Run Summary\n\n");
        out.push_str("## Status\n\n");
        let _ = writeln!(out, "- Base URL: {}", self.base_url);
        let _ = writeln!(out, "- Seed: {}", self.seed);
        let _ = writeln!(out, "- Verdict: {}", self.verdict().as_str());
        let _ = writeln!(
            out,
            "- Scenarios: {} total, {} passed, {} failed, {} errored",
            self.totals.total, self.totals.passed, self.totals.failed, self.totals.errored
        );
        out.push_str("\n## Failures\n\n");
        let mut any = false;
        for scenario in self.failures() {
            any = true;
            let _ = writeln!(out, "### {} ({})\n", scenario.name, scenario.status.as_str());
            if let Some(failure) = &scenario.failure {
                render_failure(&mut out, failure);
            }
            out.push('\n');
        }
        if !any {
            out.push_str("- None\n\n");
        }
        out.push_str("## Scenarios\n\n");
        for scenario in &self.scenarios {
            let _ = writeln!(
                out,
                "- {}: {} ({} steps, seed {})",
                scenario.name,
                scenario.status.as_str(),
                scenario.steps.len(),
                scenario.seed
            );
        }
        out
    }
}

/// Appends one failure block to a markdown summary.
fn render_failure(out: &mut String, failure: &StepFailure) {
    let _ = writeln!(out, "- Step: {}", failure.step);
    let _ = writeln!(out, "- Operation: {}", failure.operation);
    let _ = writeln!(out, "- Request: {}", failure.route);
    match &failure.kind {
        FailureKind::Contract {
            expectation,
            violations,
        } => {
            if let Some(expectation) = expectation {
                let _ = writeln!(out, "- Expected: {expectation}");
            }
            for violation in violations {
                let _ = writeln!(out, "- Violation: {violation}");
            }
        }
        FailureKind::Infrastructure {
            error,
        } => {
            let _ = writeln!(out, "- Error: {error}");
        }
    }
}

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Writes the report, summary, and transcript into `dir`.
///
/// # Errors
///
/// Returns [`ReportError`] when the directory cannot be created or a file
/// cannot be written.
pub fn write_artifacts<T: Serialize>(
    dir: &Path,
    report: &RunReport,
    transcript: &[T],
) -> Result<Vec<PathBuf>, ReportError> {
    fs::create_dir_all(dir).map_err(|err| ReportError::Io(format!("{}: {err}", dir.display())))?;
    let report_path = write_file(dir, REPORT_JSON, &report.to_canonical_json()?)?;
    let summary_path = write_file(dir, SUMMARY_MARKDOWN, report.to_markdown().as_bytes())?;
    let transcript_bytes =
        serde_jcs::to_vec(transcript).map_err(|err| ReportError::Serialize(err.to_string()))?;
    let transcript_path = write_file(dir, TRANSCRIPT_JSON, &transcript_bytes)?;
    Ok(vec![report_path, summary_path, transcript_path])
}

/// Writes one artifact file.
fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, ReportError> {
    let path = dir.join(name);
    fs::write(&path, bytes).map_err(|err| ReportError::Io(format!("{}: {err}", path.display())))?;
    Ok(path)
}
