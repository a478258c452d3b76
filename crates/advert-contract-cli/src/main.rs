// crates/advert-contract-cli/src/main.rs
// ============================================================================
// Module: Advert Contract CLI Entry Point
// Description: Command dispatcher for contract runs against a live service.
// Purpose: Resolve configuration, run scenarios, and report with exit codes.
// Dependencies: advert-contract-runner, advert-contract-http, clap, tokio,
//               tracing-subscriber
// ============================================================================

//! ## Overview
//! `advert-contract run` verifies a service against the advertisement
//! contract and exits `0` when conformant, `1` on any contract violation, and
//! `2` when only infrastructure failures occurred. Reports go to stdout; logs
//! go to stderr so stdout stays machine-readable.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use advert_contract_http::HttpTransport;
use advert_contract_http::HttpTransportConfig;
use advert_contract_http::Transport;
use advert_contract_runner::Engine;
use advert_contract_runner::EngineSettings;
use advert_contract_runner::EnvOverrides;
use advert_contract_runner::RunReport;
use advert_contract_runner::RunnerConfig;
use advert_contract_runner::ScenarioKind;
use advert_contract_runner::write_artifacts;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter.
const LOG_ENV: &str = "ADVERT_CONTRACT_LOG";
/// Log filter used when [`LOG_ENV`] is unset.
const DEFAULT_LOG_FILTER: &str = "info";
/// Exit code for errors raised before any scenario ran.
const SETUP_FAILURE_EXIT: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "advert-contract", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run contract scenarios against a service.
    Run(RunCommand),
    /// List the scenario catalog.
    Scenarios(ScenariosCommand),
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
struct RunCommand {
    /// Config file path (defaults to advert-contract.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Service base URL.
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,
    /// Root fixture seed.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// Maximum scenarios running at once.
    #[arg(long, value_name = "N")]
    jobs: Option<usize>,
    /// Scenario to run (repeatable; defaults to the full catalog).
    #[arg(long = "scenario", value_name = "NAME")]
    scenarios: Vec<String>,
    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
    /// Directory receiving report, summary, and transcript files.
    #[arg(long, value_name = "DIR")]
    artifacts: Option<PathBuf>,
}

/// Arguments for the `scenarios` command.
#[derive(Args, Debug)]
struct ScenariosCommand {
    /// Config file path whose route table shapes the catalog.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Report formats.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Canonical JSON.
    Json,
    /// Markdown summary.
    Markdown,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    init_logging()?;
    match cli.command {
        Commands::Run(command) => command_run(command).await,
        Commands::Scenarios(command) => command_scenarios(&command),
    }
}

/// Installs the stderr log subscriber.
fn init_logging() -> CliResult<()> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| CliError::new(format!("failed to initialize logging: {err}")))
}

// ============================================================================
// SECTION: Run Command
// ============================================================================

/// Executes the `run` command.
async fn command_run(command: RunCommand) -> CliResult<ExitCode> {
    let config = resolve_run_config(&command)?;
    let scenarios = config.selected_scenarios().map_err(|err| CliError::new(err.to_string()))?;
    let (engine, transport) = build_engine(&config)?;
    info!(base_url = %config.base_url, seed = engine.seed(), "starting contract run");
    let reports = engine.run(&scenarios).await;
    let report = RunReport::new(config.base_url.clone(), engine.seed(), reports);

    if let Some(dir) = command.artifacts.as_deref().or(config.artifacts.dir.as_deref()) {
        write_report_artifacts(dir, &report, &transport)?;
    }
    emit_report(&report, command.format)?;
    Ok(ExitCode::from(report.verdict().exit_code()))
}

/// Builds the HTTP transport and an engine sharing it.
fn build_engine(config: &RunnerConfig) -> CliResult<(Engine, Arc<HttpTransport>)> {
    let model = config.contract_model().map_err(|err| CliError::new(err.to_string()))?;
    let mut transport_config = HttpTransportConfig::new(config.base_url.clone());
    transport_config.timeout = config.timeout();
    let transport = Arc::new(
        HttpTransport::new(&transport_config).map_err(|err| CliError::new(err.to_string()))?,
    );
    let shared: Arc<dyn Transport> = transport.clone();
    let engine = Engine::new(shared, Arc::new(model), EngineSettings::from_config(config));
    Ok((engine, transport))
}

/// Loads the config file, then applies environment and flag overrides.
fn resolve_run_config(command: &RunCommand) -> CliResult<RunnerConfig> {
    let mut config =
        RunnerConfig::load(command.config.as_deref()).map_err(|err| CliError::new(err.to_string()))?;
    let overrides = EnvOverrides::load().map_err(|err| CliError::new(err.to_string()))?;
    config.apply_env(&overrides).map_err(|err| CliError::new(err.to_string()))?;
    apply_flag_overrides(&mut config, command);
    config.validate().map_err(|err| CliError::new(err.to_string()))?;
    Ok(config)
}

/// Applies command-line flags on top of file and environment settings.
fn apply_flag_overrides(config: &mut RunnerConfig, command: &RunCommand) {
    if let Some(base_url) = &command.base_url {
        config.base_url.clone_from(base_url);
    }
    if let Some(seed) = command.seed {
        config.seed = Some(seed);
    }
    if let Some(jobs) = command.jobs {
        config.jobs = jobs;
    }
    if !command.scenarios.is_empty() {
        config.scenarios.include.clone_from(&command.scenarios);
    }
}

/// Writes report, summary, and transcript files.
fn write_report_artifacts(
    dir: &Path,
    report: &RunReport,
    transport: &HttpTransport,
) -> CliResult<()> {
    let written = write_artifacts(dir, report, &transport.transcript())
        .map_err(|err| CliError::new(err.to_string()))?;
    info!(dir = %dir.display(), files = written.len(), "artifacts written");
    Ok(())
}

/// Writes the report to stdout in the selected format.
fn emit_report(report: &RunReport, format: OutputFormat) -> CliResult<()> {
    let bytes = match format {
        OutputFormat::Json => report.to_canonical_json().map_err(|err| CliError::new(err.to_string()))?,
        OutputFormat::Markdown => report.to_markdown().into_bytes(),
    };
    write_stdout_bytes_with_newline(&bytes)
}

// ============================================================================
// SECTION: Scenarios Command
// ============================================================================

/// Executes the `scenarios` command.
fn command_scenarios(command: &ScenariosCommand) -> CliResult<ExitCode> {
    let config =
        RunnerConfig::load(command.config.as_deref()).map_err(|err| CliError::new(err.to_string()))?;
    for line in catalog_lines(&config) {
        write_stdout_line(&line).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    }
    Ok(ExitCode::SUCCESS)
}

/// Renders one `name<TAB>description` line per catalog scenario.
fn catalog_lines(config: &RunnerConfig) -> Vec<String> {
    ScenarioKind::catalog(&config.routes)
        .into_iter()
        .map(|kind| format!("{}\t{}", kind.name(), kind.description()))
        .collect()
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout with a trailing newline.
fn write_stdout_bytes_with_newline(bytes: &[u8]) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(bytes)
        .and_then(|()| stdout.write_all(b"\n"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns the setup failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::from(SETUP_FAILURE_EXIT)
}
