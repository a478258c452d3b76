// system-tests/tests/helpers/artifacts.rs
// ============================================================================
// Module: Test Artifacts
// Description: Per-test artifact directories built from contract run reports.
// Purpose: Keep every run's report, summary, and transcript for inspection.
// Dependencies: system-tests, advert-contract-runner, serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`TestReporter`] owns one directory per test. Each recorded run lands in
//! its own subdirectory through the runner's artifact writer, and the test
//! summary lists those runs by verdict and totals.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use advert_contract_runner::RunTotals;
use serde::Serialize;
use system_tests::config::SystemTestConfig;

use super::harness::ContractRun;

/// Canonical JSON test summary.
const SUMMARY_JSON: &str = "test_summary.json";
/// Markdown test summary.
const SUMMARY_MARKDOWN: &str = "test_summary.md";

/// One recorded contract run.
#[derive(Debug, Serialize)]
struct RecordedRun {
    label: String,
    base_url: String,
    seed: u64,
    verdict: &'static str,
    totals: RunTotals,
    files: Vec<String>,
}

/// Serialized test summary.
#[derive(Debug, Serialize)]
struct TestSummary<'a> {
    test_name: &'a str,
    outcome: &'a str,
    runs: &'a [RecordedRun],
    notes: &'a [String],
}

/// Records contract runs for one test and writes its summary.
pub struct TestReporter {
    test_name: String,
    dir: PathBuf,
    runs: Vec<RecordedRun>,
    notes: Vec<String>,
    finalized: bool,
}

impl TestReporter {
    /// Creates the artifact directory for `test_name`.
    pub fn new(test_name: &str) -> Result<Self, String> {
        let config = SystemTestConfig::load().map_err(|err| err.to_string())?;
        let dir = config.artifact_dir(test_name);
        fs::create_dir_all(&dir).map_err(|err| format!("{}: {err}", dir.display()))?;
        Ok(Self {
            test_name: test_name.to_string(),
            dir,
            runs: Vec::new(),
            notes: Vec::new(),
            finalized: false,
        })
    }

    /// Returns the test's artifact directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `run`'s report, summary, and transcript under `label`.
    pub fn record(&mut self, label: &str, run: &ContractRun) -> Result<PathBuf, String> {
        let run_dir = self.dir.join(label);
        let written = run.write_artifacts(&run_dir)?;
        let files = written
            .iter()
            .filter_map(|path| path.file_name())
            .map(|name| format!("{label}/{}", name.to_string_lossy()))
            .collect();
        self.runs.push(RecordedRun {
            label: label.to_string(),
            base_url: run.report.base_url.clone(),
            seed: run.report.seed,
            verdict: run.report.verdict().as_str(),
            totals: run.report.totals,
            files,
        });
        Ok(run_dir)
    }

    /// Adds a line to the summary notes.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    /// Writes the summary for a test that reached its end.
    pub fn finish(&mut self) -> Result<(), String> {
        self.write_summary("pass")
    }

    fn write_summary(&mut self, outcome: &str) -> Result<(), String> {
        let summary = TestSummary {
            test_name: &self.test_name,
            outcome,
            runs: &self.runs,
            notes: &self.notes,
        };
        let json = serde_jcs::to_vec(&summary).map_err(|err| err.to_string())?;
        write_file(&self.dir.join(SUMMARY_JSON), &json)?;
        write_file(&self.dir.join(SUMMARY_MARKDOWN), summary_markdown(&summary).as_bytes())?;
        self.finalized = true;
        Ok(())
    }
}

impl Drop for TestReporter {
    fn drop(&mut self) {
        if self.finalized {
            return;
        }
        let outcome = if std::thread::panicking() { "panic" } else { "failed" };
        let _ = self.write_summary(outcome);
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), String> {
    fs::write(path, bytes).map_err(|err| format!("{}: {err}", path.display()))
}

fn summary_markdown(summary: &TestSummary<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", summary.test_name);
    let _ = writeln!(out, "- Outcome: {}\n", summary.outcome);
    out.push_str("## Runs\n\n");
    if summary.runs.is_empty() {
        out.push_str("- None\n");
    }
    for run in summary.runs {
        let _ = writeln!(
            out,
            "- {}: {} against {} (seed {}, {} of {} passed), see `{}/summary.md`",
            run.label,
            run.verdict,
            run.base_url,
            run.seed,
            run.totals.passed,
            run.totals.total,
            run.label
        );
    }
    if !summary.notes.is_empty() {
        out.push_str("\n## Notes\n\n");
        for note in summary.notes {
            let _ = writeln!(out, "- {note}");
        }
    }
    out
}
