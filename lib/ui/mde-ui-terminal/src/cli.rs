use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use mde_application::{Validator, standard_probes};
use mde_domain::{ResourceKind, ScopeConfig, ScopeOverrides};
use mde_ports::ProbeSet;
use mde_ui_presentation::catalog_lines;
use tracing::info;

use crate::backend::{Backend, GcloudBackend};
use crate::logging::init_tracing;
use crate::sink::{JsonSink, TextSink};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Check a deployment's live resources against the expected topology.
#[derive(Debug, Parser)]
#[command(name = "validate-topology", version)]
pub struct Cli {
    /// Project that owns the deployment.
    pub project_id: String,

    /// Warehouse dataset holding the ingestion tables.
    pub dataset_name: String,

    /// Cluster running the deployed workloads.
    #[arg(long, env = "MDE_CLUSTER_NAME")]
    pub cluster_name: Option<String>,

    /// Namespace of the deployed workloads.
    #[arg(long, env = "MDE_NAMESPACE")]
    pub namespace: Option<String>,

    /// Region of the streaming jobs.
    #[arg(long, env = "MDE_REGION")]
    pub region: Option<String>,

    /// YAML file with cluster_name / namespace / region defaults.
    #[arg(long, env = "MDE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Only run these phases (repeatable).
    #[arg(long = "phase", value_parser = parse_phase)]
    pub phases: Vec<ResourceKind>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Print the expected resources and exit without probing.
    #[arg(long)]
    pub list: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_phase(raw: &str) -> Result<ResourceKind, String> {
    raw.parse()
}

pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Build the immutable scope: flags and environment first, then the
/// optional config file, then defaults.
pub fn resolve_scope(cli: &Cli) -> Result<ScopeConfig> {
    let flags = ScopeOverrides {
        cluster_name: cli.cluster_name.clone(),
        namespace: cli.namespace.clone(),
        region: cli.region.clone(),
    };
    let file = match &cli.config {
        Some(path) => ScopeOverrides::load_from_path(path)?,
        None => ScopeOverrides::default(),
    };
    let scope = ScopeConfig::with_overrides(
        cli.project_id.as_str(),
        cli.dataset_name.as_str(),
        flags.or(file),
    )?;
    Ok(scope)
}

/// Run one invocation against `backend`, writing the report to `out`.
/// `Ok` carries the exit code of a completed run; `Err` is fatal and
/// happens before any outcome is written.
pub async fn execute<W: Write>(cli: &Cli, backend: &dyn Backend, out: &mut W) -> Result<i32> {
    let scope = resolve_scope(cli)?;

    if cli.list {
        let validator = Validator::new(scope, ProbeSet::empty())?.select_phases(&cli.phases);
        for line in catalog_lines(validator.expectations(), validator.phases()) {
            writeln!(out, "{line}").context("failed to write catalog")?;
        }
        return Ok(0);
    }

    let clients = backend.clients(&scope);
    let probes = standard_probes(&clients, &scope);
    let validator = Validator::new(scope, probes)?.select_phases(&cli.phases);
    validator.preflight(backend.dependencies())?;

    let scope = validator.scope();
    info!(
        project = scope.project_id(),
        dataset = scope.dataset_name(),
        cluster = scope.cluster_name(),
        expectations = validator.expectations().len(),
        "starting topology validation"
    );
    let run = match cli.format {
        OutputFormat::Text => validator.run(&mut TextSink::new(out)).await?,
        OutputFormat::Json => validator.run(&mut JsonSink::new(out, scope)).await?,
    };
    Ok(run.exit_code())
}

/// Process entry point; returns the exit code.
pub async fn main_exit() -> i32 {
    dotenv::dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = err.print();
            return code;
        }
    };
    init_tracing(cli.verbose);

    let backend = GcloudBackend::from_env();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match execute(&cli, &backend, &mut out).await {
        Ok(code) => code,
        Err(err) => {
            let message = format!("{err:#}");
            tracing::debug!(error = %message, "validation aborted");
            eprintln!("validate-topology: {message}");
            1
        }
    }
}
