// system-tests/tests/suites/violations.rs
// ============================================================================
// Module: Violation Detection Tests
// Description: Contract runs against deliberately broken services.
// Purpose: Validate that shape breaks surface as attributed violations.
// Dependencies: system-tests helpers, advert-contract-runner
// ============================================================================

//! ## Overview
//! Each test injects one fault into the stub and checks that the run fails
//! with a violation attributed to the right scenario, step, and field.

use advert_contract_runner::FailureKind;
use advert_contract_runner::ScenarioReport;
use advert_contract_runner::ScenarioStatus;
use advert_contract_runner::Verdict;
use helpers::artifacts::TestReporter;
use helpers::harness::run_config;
use helpers::harness::run_contract;
use helpers::service_stub::StubFault;
use helpers::service_stub::spawn_faulty_service_stub;

use crate::helpers;

#[tokio::test(flavor = "multi_thread")]
async fn read_returning_an_object_is_a_violation() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("read_returning_an_object_is_a_violation")?;
    let stub = spawn_faulty_service_stub(StubFault::ReadReturnsObject).await?;
    let mut config = run_config(stub.base_url(), 21)?;
    config.scenarios.include = vec!["create_advertisement".to_string(), "read_by_id".to_string()];

    let run = run_contract(&config).await?;
    reporter.record("run", &run)?;

    require_eq(&run.report.verdict(), &Verdict::Violations, "verdict")?;
    require_eq(&run.report.verdict().exit_code(), &1, "exit code")?;
    require_eq(
        &scenario(&run.report.scenarios, "create_advertisement")?.status,
        &ScenarioStatus::Passed,
        "create status",
    )?;
    let read = scenario(&run.report.scenarios, "read_by_id")?;
    require_eq(&read.status, &ScenarioStatus::Failed, "read status")?;
    let failure = read.failure.as_ref().ok_or("read failure missing")?;
    require_eq(&failure.step.as_str(), &"read", "failing step")?;
    require(failure.is_violation(), "failure is a contract violation")?;

    reporter.note(failure.to_string());
    reporter.finish()?;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn dropped_v2_counter_is_reported_at_its_field() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("dropped_v2_counter_is_reported_at_its_field")?;
    let stub = spawn_faulty_service_stub(StubFault::StatisticsV2DropsContacts).await?;
    let mut config = run_config(stub.base_url(), 22)?;
    config.scenarios.include = vec!["statistics_v1".to_string(), "statistics_v2".to_string()];

    let run = run_contract(&config).await?;

    require_eq(
        &scenario(&run.report.scenarios, "statistics_v1")?.status,
        &ScenarioStatus::Passed,
        "v1 status",
    )?;
    let v2 = scenario(&run.report.scenarios, "statistics_v2")?;
    require_eq(&v2.status, &ScenarioStatus::Failed, "v2 status")?;
    let failure = v2.failure.as_ref().ok_or("v2 failure missing")?;
    let FailureKind::Contract {
        violations, ..
    } = &failure.kind
    else {
        return Err(format!("expected contract failure, got {failure}").into());
    };
    let paths: Vec<&str> = violations.iter().map(|violation| violation.path.as_str()).collect();
    require_eq(&paths, &vec!["/0/contacts"], "violation paths")?;

    let run_dir = reporter.record("run", &run)?;
    let markdown = std::fs::read_to_string(run_dir.join("summary.md"))?;
    require(markdown.contains("### statistics_v2 (failed)"), "summary lists the failure")?;
    reporter.note("statistics_v2 flagged /0/contacts");
    reporter.finish()?;
    Ok(())
}

fn scenario<'a>(
    scenarios: &'a [ScenarioReport],
    name: &str,
) -> Result<&'a ScenarioReport, Box<dyn std::error::Error>> {
    scenarios
        .iter()
        .find(|scenario| scenario.name == name)
        .ok_or_else(|| format!("scenario {name} missing from report").into())
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
