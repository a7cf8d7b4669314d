//! Ad Insights: reads ad-performance rows as JSON and prints the kill /
//! scale / test report.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use insights_core::{AdRecord, AnalysisOutput, AppConfig, InsightsError, InsightsResult};
use insights_reporting::{InsightsEngine, NarrativeSource};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "ad-insights")]
#[command(about = "Classify ads into kill, scale and test lists from a performance export")]
#[command(version)]
struct Cli {
    /// JSON array of ad rows; reads stdin when omitted or `-`
    input: Option<PathBuf>,

    /// TOML file with threshold and report settings
    #[arg(long, env = "AD_INSIGHTS_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Cap every display list at this many entries (overrides config)
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Narrative only
    Text,
    /// Narrative and summary as JSON
    Json,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ad_insights=info,insights_reporting=info".into()),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let records = read_records(cli.input.as_deref()).context("loading ad rows")?;
    info!(rows = records.len(), "Records loaded");

    let engine = InsightsEngine::new(config);
    let output = engine.generate(&records)?;
    info!(source = engine.name(), "Report generated");

    println!("{}", render(&output, cli.format)?);
    Ok(())
}

/// Defaults < file < env < `--top`. A missing or broken config is only
/// tolerated when no file was named explicitly.
fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) if cli.config.is_none() => {
            warn!(error = %e, "Failed to load config, using defaults");
            AppConfig::default()
        }
        Err(e) => return Err(e).context("loading configuration file"),
    };

    if let Some(top) = cli.top {
        config.report = config.report.with_uniform_limit(top);
        config.validate().context("applying --top")?;
    }
    Ok(config)
}

fn reads_stdin(input: Option<&Path>) -> bool {
    input.is_none_or(|path| path.as_os_str() == "-")
}

fn read_records(input: Option<&Path>) -> InsightsResult<Vec<AdRecord>> {
    match input {
        Some(path) if !reads_stdin(input) => parse_records(BufReader::new(File::open(path)?)),
        _ => parse_records(std::io::stdin().lock()),
    }
}

fn parse_records<R: Read>(reader: R) -> InsightsResult<Vec<AdRecord>> {
    serde_json::from_reader(reader).map_err(|e| {
        InsightsError::InvalidInput(format!("expected a JSON array of ad rows: {e}"))
    })
}

fn render(output: &AnalysisOutput, format: OutputFormat) -> InsightsResult<String> {
    Ok(match format {
        OutputFormat::Text => output.narrative.clone(),
        OutputFormat::Json => serde_json::to_string_pretty(output)?,
    })
}
