//! FeatureLab CLI: build, inspect, and schema commands.
//!
//! Commands:
//! - `build`: build feature tables for every configured ticker and export them
//! - `inspect`: print shape, leading rows and missing counts for one ticker
//! - `columns`: print the output schema produced by a feature config

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use featurelab_core::{FeatureConfig, FeaturePipeline};
use featurelab_runner::{build_ticker, load_frame, run, OutputFormat, RunConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "featurelab",
    about = "FeatureLab CLI: stock price feature engineering"
)]
struct Cli {
    /// Log at debug level (per-stage detail).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where prices come from and which slice of them to use.
#[derive(Args)]
struct SourceArgs {
    /// Path to a TOML run config. Flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Wide price CSV (date,AAPL,MSFT,...).
    #[arg(long)]
    input: Option<PathBuf>,

    /// Use synthetic prices when no input file is available.
    #[arg(long, default_value_t = false)]
    synthetic: bool,

    /// Start date (YYYY-MM-DD), inclusive.
    #[arg(long)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD), inclusive.
    #[arg(long)]
    end: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build feature tables for every ticker and write them with a manifest.
    Build {
        #[command(flatten)]
        source: SourceArgs,

        /// Tickers to build (e.g., AAPL,MSFT). Defaults to the config's list.
        #[arg(long, value_delimiter = ',')]
        tickers: Vec<String>,

        /// Output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format: csv or parquet.
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Build one ticker and print a summary of its feature table.
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Ticker to inspect.
        #[arg(long, default_value = "AAPL")]
        ticker: String,

        /// Number of leading rows to print.
        #[arg(long, default_value_t = 5)]
        head: usize,
    },
    /// Print the output columns for a feature config.
    Columns {
        /// TOML file holding a feature config. Defaults to the built-in settings.
        #[arg(long)]
        features: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            source,
            tickers,
            output_dir,
            format,
        } => run_build(source, tickers, output_dir, format),
        Commands::Inspect {
            source,
            ticker,
            head,
        } => run_inspect(source, ticker, head),
        Commands::Columns { features } => run_columns(features),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the run config (or defaults) and apply command-line overrides.
fn resolve_config(source: SourceArgs) -> Result<RunConfig> {
    let mut config = match &source.config {
        Some(path) => RunConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => RunConfig::default(),
    };
    if source.input.is_some() {
        config.input = source.input;
    }
    if source.synthetic {
        config.synthetic = true;
    }
    if source.start.is_some() {
        config.start = source.start;
    }
    if source.end.is_some() {
        config.end = source.end;
    }
    Ok(config)
}

fn run_build(
    source: SourceArgs,
    tickers: Vec<String>,
    output_dir: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let mut config = resolve_config(source)?;
    if !tickers.is_empty() {
        config.tickers = tickers;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(format) = format {
        config.format = format;
    }

    let summary = run(&config).context("feature build failed")?;
    let manifest = &summary.manifest;

    println!(
        "{:<8} {:>8} {:>8}  {:<10}  {:<10}",
        "ticker", "rows_in", "rows_out", "first", "last"
    );
    for entry in &manifest.tickers {
        println!(
            "{:<8} {:>8} {:>8}  {:<10}  {:<10}",
            entry.ticker,
            entry.rows_in,
            entry.rows_out,
            entry.first_date.map(|d| d.to_string()).unwrap_or_default(),
            entry.last_date.map(|d| d.to_string()).unwrap_or_default(),
        );
    }
    for failure in &manifest.failures {
        eprintln!("Error for {}: {}", failure.ticker, failure.error);
    }
    println!("Manifest written to: {}", summary.manifest_path.display());

    if !manifest.failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn run_inspect(source: SourceArgs, ticker: String, head: usize) -> Result<()> {
    let mut config = resolve_config(source)?;
    config.tickers = vec![ticker.clone()];
    config.validate()?;

    let loaded = load_frame(&config)?;
    let pipeline = FeaturePipeline::new(&config.features)?;
    let built = build_ticker(&loaded.frame, &ticker, &pipeline)
        .with_context(|| format!("failed to build features for {ticker}"))?;

    println!(
        "{ticker}: {} observations -> {} complete rows ({:?} data)",
        built.rows_in,
        built.table.len(),
        loaded.source
    );
    print!("{}", built.table.summary(head));
    Ok(())
}

fn run_columns(features: Option<PathBuf>) -> Result<()> {
    let config = match features {
        Some(path) => FeatureConfig::from_file(&path)
            .with_context(|| format!("failed to load feature config {}", path.display()))?,
        None => FeatureConfig::default(),
    };
    let pipeline = FeaturePipeline::new(&config)?;

    for stage in pipeline.stages() {
        for column in stage.columns() {
            println!("{column:<20} {}", stage.name());
        }
    }
    println!();
    println!(
        "warmup: {} rows, horizon: {} rows, config hash: {}",
        pipeline.warmup(),
        pipeline.horizon(),
        config.config_hash()?
    );
    Ok(())
}
