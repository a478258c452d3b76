// system-tests/tests/helpers/harness.rs
// ============================================================================
// Module: Contract Run Harness
// Description: Builds and runs the contract engine over HTTP for system-tests.
// Purpose: Share run wiring between suites.
// Dependencies: system-tests, advert-contract-http, advert-contract-runner
// ============================================================================

use std::net::SocketAddr;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use advert_contract_http::HttpTransport;
use advert_contract_http::HttpTransportConfig;
use advert_contract_http::Transport;
use advert_contract_http::TranscriptEntry;
use advert_contract_runner::Engine;
use advert_contract_runner::EngineSettings;
use advert_contract_runner::RunReport;
use advert_contract_runner::RunnerConfig;
use advert_contract_runner::write_artifacts;
use system_tests::config::SystemTestConfig;

use super::service_stub::ServiceStubHandle;
use super::service_stub::spawn_service_stub;

/// Completed contract run with its HTTP transcript.
pub struct ContractRun {
    /// Aggregated run report.
    pub report: RunReport,
    /// Every exchange the transport recorded.
    pub transcript: Vec<TranscriptEntry>,
}

impl ContractRun {
    /// Writes the report, summary, and transcript into `dir`.
    pub fn write_artifacts(&self, dir: &std::path::Path) -> Result<Vec<PathBuf>, String> {
        write_artifacts(dir, &self.report, &self.transcript).map_err(|err| err.to_string())
    }
}

/// Service under test: the in-process stub or an external target.
pub struct Target {
    /// Base URL handed to the transport.
    pub base_url: String,
    /// Stub kept alive for the duration of the run.
    pub stub: Option<ServiceStubHandle>,
}

/// Resolves the external target when configured, else spawns a faithful stub.
pub async fn resolve_target() -> Result<Target, String> {
    let config = SystemTestConfig::load().map_err(|err| err.to_string())?;
    if let Some(base_url) = config.target_url {
        return Ok(Target {
            base_url,
            stub: None,
        });
    }
    let stub = spawn_service_stub().await?;
    Ok(Target {
        base_url: stub.base_url().to_string(),
        stub: Some(stub),
    })
}

/// Allocates a free loopback address; nothing listens on it afterwards.
pub fn allocate_bind_addr() -> Result<SocketAddr, String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("failed to bind loopback: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("failed to read listener address: {err}"))?;
    drop(listener);
    Ok(addr)
}

/// Builds a seeded run configuration for `base_url`.
pub fn run_config(base_url: &str, seed: u64) -> Result<RunnerConfig, String> {
    let config = SystemTestConfig::load().map_err(|err| err.to_string())?;
    Ok(config.runner_config(base_url, seed))
}

/// Runs the selected scenarios over HTTP.
pub async fn run_contract(config: &RunnerConfig) -> Result<ContractRun, String> {
    config.validate().map_err(|err| err.to_string())?;
    let model = config.contract_model().map_err(|err| err.to_string())?;
    let scenarios = config.selected_scenarios().map_err(|err| err.to_string())?;
    let mut transport_config = HttpTransportConfig::new(config.base_url.clone());
    transport_config.timeout = config.timeout();
    let transport =
        Arc::new(HttpTransport::new(&transport_config).map_err(|err| err.to_string())?);
    let shared: Arc<dyn Transport> = transport.clone();
    let engine = Engine::new(shared, Arc::new(model), EngineSettings::from_config(config));
    let reports = engine.run(&scenarios).await;
    Ok(ContractRun {
        report: RunReport::new(config.base_url.clone(), engine.seed(), reports),
        transcript: transport.transcript(),
    })
}
