// crates/advert-contract-runner/src/engine.rs
// ============================================================================
// Module: Scenario Engine
// Description: Bounded-concurrency execution of contract scenarios.
// Purpose: Run selected scenarios and collect reports in catalog order.
// Dependencies: crate::scenario, crate::report, tokio, tracing
// ============================================================================

//! ## Overview
//! The engine runs each scenario as an independent task, bounded by a
//! semaphore sized by `jobs`. Every scenario gets a child fixture seed drawn
//! from the root seed in catalog order, so a scenario's inputs depend only on
//! the root seed and the route table, never on scheduling or selection.
//! Reports come back in the order scenarios were requested.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Instant;

use advert_contract_core::ContractModel;
use advert_contract_core::FixtureGenerator;
use advert_contract_core::Operation;
use advert_contract_http::Transport;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::info;
use tracing::warn;

use crate::config::RunnerConfig;
use crate::report::ScenarioReport;
use crate::report::ScenarioStatus;
use crate::scenario::FailureKind;
use crate::scenario::IdLedger;
use crate::scenario::ScenarioContext;
use crate::scenario::ScenarioKind;
use crate::scenario::StepFailure;

// ============================================================================
// SECTION: Settings
// ============================================================================

/// Engine tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    /// Root fixture seed.
    pub seed: u64,
    /// Maximum scenarios in flight.
    pub jobs: usize,
    /// Creations performed by the uniqueness scenario.
    pub uniqueness_samples: usize,
}

impl EngineSettings {
    /// Derives settings from a run configuration, drawing a seed when none is set.
    #[must_use]
    pub fn from_config(config: &RunnerConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| FixtureGenerator::from_entropy().seed());
        Self {
            seed,
            jobs: config.jobs,
            uniqueness_samples: config.scenarios.uniqueness_samples,
        }
    }
}

// ============================================================================
// SECTION: Engine
// ============================================================================

/// Executes contract scenarios against a transport.
#[derive(Clone)]
pub struct Engine {
    /// Shared transport.
    transport: Arc<dyn Transport>,
    /// Shared contract model.
    model: Arc<ContractModel>,
    /// Engine tuning.
    settings: EngineSettings,
}

impl Engine {
    /// Creates an engine.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        model: Arc<ContractModel>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            transport,
            model,
            settings,
        }
    }

    /// Returns the root seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.settings.seed
    }

    /// Returns the contract model.
    #[must_use]
    pub fn model(&self) -> &ContractModel {
        &self.model
    }

    /// Returns the child seed assigned to each scenario of the catalog.
    #[must_use]
    pub fn scenario_seeds(&self) -> Vec<(ScenarioKind, u64)> {
        let mut root = FixtureGenerator::from_seed(self.settings.seed);
        ScenarioKind::catalog(self.model.routes())
            .into_iter()
            .map(|kind| (kind, root.derive_seed()))
            .collect()
    }

    /// Runs scenarios and returns one report per scenario, in request order.
    pub async fn run(&self, scenarios: &[ScenarioKind]) -> Vec<ScenarioReport> {
        let seeds = self.scenario_seeds();
        let semaphore = Arc::new(Semaphore::new(self.settings.jobs.max(1)));
        let ledger = Arc::new(IdLedger::new());
        info!(
            scenarios = scenarios.len(),
            jobs = self.settings.jobs,
            seed = self.settings.seed,
            "contract run started"
        );

        let mut joins = JoinSet::new();
        for (index, kind) in scenarios.iter().copied().enumerate() {
            let seed = seeds
                .iter()
                .find_map(|(candidate, seed)| (*candidate == kind).then_some(*seed))
                .unwrap_or(self.settings.seed);
            let transport = Arc::clone(&self.transport);
            let model = Arc::clone(&self.model);
            let ledger = Arc::clone(&ledger);
            let semaphore = Arc::clone(&semaphore);
            let samples = self.settings.uniqueness_samples;
            joins.spawn(async move {
                let _permit = semaphore.acquire_owned().await;
                let report = run_scenario(&*transport, &model, &ledger, kind, seed, samples).await;
                (index, report)
            });
        }

        let mut slots: Vec<Option<ScenarioReport>> = vec![None; scenarios.len()];
        while let Some(result) = joins.join_next().await {
            match result {
                Ok((index, report)) => {
                    if let Some(slot) = slots.get_mut(index) {
                        *slot = Some(report);
                    }
                }
                Err(err) => warn!(error = %err, "scenario task aborted"),
            }
        }

        let reports: Vec<ScenarioReport> = slots
            .into_iter()
            .zip(scenarios)
            .map(|(slot, kind)| slot.unwrap_or_else(|| aborted_report(*kind, self.settings.seed)))
            .collect();
        let failed = reports.iter().filter(|report| report.status != ScenarioStatus::Passed).count();
        info!(scenarios = reports.len(), failed, "contract run finished");
        reports
    }
}

// ============================================================================
// SECTION: Scenario Execution
// ============================================================================

/// Runs one scenario to completion.
async fn run_scenario(
    transport: &dyn Transport,
    model: &ContractModel,
    ledger: &IdLedger,
    kind: ScenarioKind,
    seed: u64,
    uniqueness_samples: usize,
) -> ScenarioReport {
    let started = Instant::now();
    let fixtures = FixtureGenerator::from_seed(seed);
    let mut context = ScenarioContext::new(transport, model, ledger, fixtures, uniqueness_samples);
    let outcome = context.run(kind).await;
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    match &outcome {
        Ok(()) => info!(scenario = kind.name(), duration_ms, "scenario passed"),
        Err(failure) => warn!(scenario = kind.name(), failure = %failure, "scenario did not pass"),
    }
    ScenarioReport::from_outcome(
        kind.name(),
        kind.description(),
        seed,
        context.into_steps(),
        outcome,
        duration_ms,
    )
}

/// Report for a scenario whose task ended without producing one.
fn aborted_report(kind: ScenarioKind, seed: u64) -> ScenarioReport {
    let failure = StepFailure {
        step: "scenario".to_string(),
        operation: Operation::Create,
        route: String::new(),
        kind: FailureKind::Infrastructure {
            error: "scenario task aborted".to_string(),
        },
    };
    ScenarioReport::from_outcome(kind.name(), kind.description(), seed, Vec::new(), Err(failure), 0)
}
