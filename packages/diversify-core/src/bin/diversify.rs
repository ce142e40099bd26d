//! Diversify CLI - two-asset diversification analysis from the command line.
//!
//! Prints JSON (`ApiResponse`) by default so the output can feed other tools;
//! `--format table` prints the percent tables instead.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use diversify_core::{
    analyze, builtin_datasets,
    report::{portfolio_table, summary_table, write_report},
    ApiResponse, InputSource, RawReturns, ReportConfig, SourceKind,
};

#[derive(Parser)]
#[command(name = "diversify")]
#[command(about = "Two-asset portfolio risk, return and diversification benefit")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.diversify/config.json or $DIVERSIFY_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute statistics, the portfolio grid and the diversification benefit
    Analyze {
        #[command(flatten)]
        input: InputArgs,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Write the one-page HTML report
    Report {
        #[command(flatten)]
        input: InputArgs,
        /// Report path (defaults to <output_dir>/diversification-report.html)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the built-in datasets
    Datasets,
    /// Show or initialise the configuration
    Config {
        /// Write the effective configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Dataset to analyse (defaults to the configured source)
    #[arg(long, value_enum)]
    source: Option<SourceKind>,
    /// S returns in percent, comma-separated; empty fields are missing values
    #[arg(short, long, requires = "t", allow_hyphen_values = true)]
    s: Option<String>,
    /// T returns in percent, comma-separated
    #[arg(short, long, requires = "s", allow_hyphen_values = true)]
    t: Option<String>,
    /// JSON file with {"s": [...], "t": [...]} percent columns
    #[arg(short, long, conflicts_with_all = ["s", "t"])]
    input: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(ReportConfig::default_path);

    let result = match cli.command {
        Commands::Analyze { input, format } => handle_analyze(&config_path, input, format),
        Commands::Report { input, output } => handle_report(&config_path, input, output),
        Commands::Datasets => Ok(to_json(&ApiResponse::ok(json!({
            "datasets": builtin_datasets(),
        })))),
        Commands::Config { init } => handle_config(&config_path, init),
    };

    match result {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            println!("{}", to_json(&ApiResponse::<()>::err(format!("{:#}", e))));
            ExitCode::FAILURE
        }
    }
}

fn to_json<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| format!(r#"{{"ok":false,"error":"serialization failed: {}"}}"#, e))
}

fn load_config(path: &PathBuf) -> anyhow::Result<ReportConfig> {
    ReportConfig::load_from_path(path)
        .with_context(|| format!("reading config {}", path.display()))
}

fn resolve_source(args: InputArgs, config: &ReportConfig) -> anyhow::Result<InputSource> {
    if let Some(path) = args.input {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading input {}", path.display()))?;
        let raw = RawReturns::from_json(&content)
            .with_context(|| format!("parsing input {}", path.display()))?;
        return Ok(InputSource::UserSupplied(raw));
    }

    if let (Some(s), Some(t)) = (args.s, args.t) {
        return Ok(InputSource::UserSupplied(RawReturns::from_csv_columns(&s, &t)?));
    }

    match args.source.unwrap_or(config.default_source) {
        SourceKind::Reference => Ok(InputSource::Reference),
        SourceKind::Simplified => Ok(InputSource::Simplified),
        SourceKind::User => anyhow::bail!("user source needs --s/--t or --input"),
    }
}

fn handle_analyze(
    config_path: &PathBuf,
    input: InputArgs,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let config = load_config(config_path)?;
    let source = resolve_source(input, &config)?;
    let analysis = analyze(&source.resolve())?;

    Ok(match format {
        OutputFormat::Json => to_json(&ApiResponse::ok(json!({
            "source": source.kind(),
            "analysis": analysis,
        }))),
        OutputFormat::Table => format!(
            "{}\n{}",
            summary_table(&analysis, config.decimals),
            portfolio_table(&analysis, config.decimals)
        ),
    })
}

fn handle_report(
    config_path: &PathBuf,
    input: InputArgs,
    output: Option<PathBuf>,
) -> anyhow::Result<String> {
    let config = load_config(config_path)?;
    let source = resolve_source(input, &config)?;
    let analysis = analyze(&source.resolve())?;

    let path = output.unwrap_or_else(|| config.report_path("diversification-report.html"));
    write_report(&analysis, &config, &path)
        .with_context(|| format!("writing report {}", path.display()))?;

    Ok(to_json(&ApiResponse::ok(json!({
        "report": path,
        "min_risk": analysis.diversification.min_risk,
    }))))
}

fn handle_config(config_path: &PathBuf, init: bool) -> anyhow::Result<String> {
    let config = load_config(config_path)?;
    if init {
        config
            .save_to_path(config_path)
            .with_context(|| format!("writing config {}", config_path.display()))?;
    }

    Ok(to_json(&ApiResponse::ok(json!({
        "path": config_path,
        "config": config,
    }))))
}
