// system-tests/tests/suites/conformance.rs
// ============================================================================
// Module: Conformance Tests
// Description: Full contract runs over HTTP against a faithful service.
// Purpose: Validate that a conforming service yields a conformant verdict.
// Dependencies: system-tests helpers, advert-contract-runner
// ============================================================================

//! ## Overview
//! Runs the contract catalog over real HTTP against the in-process stub (or an
//! external target when configured) and checks verdicts, artifacts, and seeded
//! repeatability.

use advert_contract_runner::ScenarioStatus;
use advert_contract_runner::Verdict;
use helpers::artifacts::TestReporter;
use helpers::harness::ContractRun;
use helpers::harness::resolve_target;
use helpers::harness::run_config;
use helpers::harness::run_contract;
use helpers::service_stub::spawn_service_stub;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn full_catalog_is_conformant_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("full_catalog_is_conformant_over_http")?;
    let stub = spawn_service_stub().await?;
    let config = run_config(stub.base_url(), 7)?;

    let run = run_contract(&config).await?;
    let run_dir = reporter.record("run", &run)?;

    require_eq(&run.report.scenarios.len(), &19, "catalog size")?;
    require_eq(&run.report.verdict(), &Verdict::Conformant, "verdict")?;
    require_eq(&run.report.totals.passed, &run.report.scenarios.len(), "passed count")?;
    require(
        run.transcript.iter().all(|entry| entry.status.is_some()),
        "every exchange received a response",
    )?;
    require_eq(&stub.request_count(), &run.transcript.len(), "stub saw every request")?;

    let report_bytes = std::fs::read(run_dir.join("report.json"))?;
    let reread: advert_contract_runner::RunReport = serde_json::from_slice(&report_bytes)?;
    require_eq(&reread, &run.report, "report.json round trip")?;
    let summary = std::fs::read_to_string(run_dir.join("summary.md"))?;
    require(summary.contains("- Verdict: conformant"), "summary states the verdict")?;
    require(run_dir.join("transcript.json").is_file(), "transcript written")?;

    reporter.finish()?;
    let test_summary = std::fs::read_to_string(reporter.dir().join("test_summary.md"))?;
    require(test_summary.contains("- run: conformant against"), "test summary lists the run")?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn seeded_runs_repeat_request_payloads() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("seeded_runs_repeat_request_payloads")?;

    let first_stub = spawn_service_stub().await?;
    let first = run_contract(&run_config(first_stub.base_url(), 99)?).await?;
    reporter.record("first", &first)?;

    let second_stub = spawn_service_stub().await?;
    let second = run_contract(&run_config(second_stub.base_url(), 99)?).await?;
    reporter.record("second", &second)?;

    let first_seeds: Vec<u64> = first.report.scenarios.iter().map(|scenario| scenario.seed).collect();
    let second_seeds: Vec<u64> =
        second.report.scenarios.iter().map(|scenario| scenario.seed).collect();
    require_eq(&first_seeds, &second_seeds, "scenario seeds")?;
    require_eq(&request_payloads(&first)?, &request_payloads(&second)?, "request payloads")?;

    reporter.note(format!("{} exchanges repeated under seed 99", first.transcript.len()));
    reporter.finish()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_scenario_removes_the_advertisement() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("delete_scenario_removes_the_advertisement")?;
    let stub = spawn_service_stub().await?;
    let mut config = run_config(stub.base_url(), 3)?;
    config.scenarios.include = vec!["delete_advertisement".to_string()];

    let run = run_contract(&config).await?;
    reporter.record("run", &run)?;

    require_eq(&run.report.scenarios.len(), &1, "selected scenarios")?;
    require_eq(&run.report.scenarios[0].status, &ScenarioStatus::Passed, "status")?;
    require_eq(&stub.item_count(), &0, "items left in stub")?;
    let delete_statuses: Vec<Option<u16>> = run
        .transcript
        .iter()
        .filter(|entry| entry.path.starts_with("/api/2/item/"))
        .map(|entry| entry.status)
        .collect();
    require_eq(&delete_statuses, &vec![Some(200), Some(404)], "delete statuses")?;

    reporter.note("second delete answered 404");
    reporter.finish()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn configured_target_completes_without_infrastructure_errors()
-> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("configured_target_completes")?;
    let target = resolve_target().await?;
    let config = run_config(&target.base_url, 11)?;

    let run = run_contract(&config).await?;
    reporter.record("run", &run)?;
    let errored: Vec<&str> = run
        .report
        .scenarios
        .iter()
        .filter(|scenario| scenario.status == ScenarioStatus::Errored)
        .map(|scenario| scenario.name.as_str())
        .collect();

    require(errored.is_empty(), format!("scenarios errored: {errored:?}"))?;
    reporter.note(format!("stub: {}", target.stub.is_some()));
    reporter.finish()?;
    Ok(())
}

/// Serialized request bodies, sorted; scenarios may be scheduled in any order.
fn request_payloads(run: &ContractRun) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut payloads = Vec::new();
    for entry in &run.transcript {
        if let Some(request) = &entry.request {
            payloads.push(serde_json::to_string(request)?);
        }
    }
    payloads.sort();
    Ok(payloads)
}

fn require(condition: bool, message: impl Into<String>) -> Result<(), Box<dyn std::error::Error>> {
    if condition { Ok(()) } else { Err(message.into().into()) }
}

fn require_eq<T: PartialEq + std::fmt::Debug>(
    left: &T,
    right: &T,
    context: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if left == right {
        Ok(())
    } else {
        Err(format!("{context}: left={left:?} right={right:?}").into())
    }
}
