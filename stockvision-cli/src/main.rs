//! StockVision CLI: forecast and symbol resolution commands.
//!
//! Commands:
//! - `forecast`: run the forecast pipeline for one symbol and print the result
//! - `resolve`: show which symbol and data source a request would end up using

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stockvision_core::data::ExchangeConfig;
use stockvision_core::domain::DataSource;
use stockvision_runner::{
    confidence_label, save_artifacts, trend_label, ForecastOutput, ForecastRequest, Pipeline,
    PipelineConfig, DEFAULT_HORIZON_DAYS,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "stockvision_core=info,stockvision_runner=info,stockvision=info";

#[derive(Parser)]
#[command(
    name = "stockvision",
    about = "StockVision CLI: stock price forecasting"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast future closing prices for a symbol.
    Forecast {
        /// Ticker symbol (e.g., AAPL, TCS, INFY.NS).
        symbol: String,

        /// Start of the history window (YYYY-MM-DD).
        #[arg(long)]
        start: String,

        /// End of the history window (YYYY-MM-DD).
        #[arg(long)]
        end: String,

        /// Model: linear, heuristic, or both.
        #[arg(long, default_value = "linear")]
        model: String,

        /// Number of future days to predict. Defaults to the config value.
        #[arg(long)]
        horizon: Option<usize>,

        /// Path to a TOML pipeline config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Offline mode: never contact the live source.
        #[arg(long, default_value_t = false)]
        offline: bool,

        /// Seed for model noise. Overrides the config seed.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the labelled output as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Save forecast.json and series.csv under this directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Resolve a symbol and report where its history comes from.
    Resolve {
        /// Ticker symbol.
        symbol: String,

        /// Start date (YYYY-MM-DD). Defaults to one year before the end date.
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Path to a TOML pipeline config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Offline mode: never contact the live source.
        #[arg(long, default_value_t = false)]
        offline: bool,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Forecast {
            symbol,
            start,
            end,
            model,
            horizon,
            config,
            offline,
            seed,
            json,
            output_dir,
        } => {
            let mut pipeline_config = load_config(config.as_deref(), offline)?;
            if seed.is_some() {
                pipeline_config.forecast.seed = seed;
            }
            let horizon = horizon.unwrap_or(pipeline_config.forecast.default_horizon_days);
            let request = ForecastRequest::new(symbol, start, end, model).with_horizon(horizon);
            run_forecast(&pipeline_config, &request, json, output_dir.as_deref())
        }
        Commands::Resolve {
            symbol,
            start,
            end,
            config,
            offline,
        } => {
            let pipeline_config = load_config(config.as_deref(), offline)?;
            run_resolve(&pipeline_config, &symbol, start.as_deref(), end.as_deref())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, offline: bool) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };
    if offline {
        config.provider.offline = true;
    }
    Ok(config)
}

fn run_forecast(
    config: &PipelineConfig,
    request: &ForecastRequest,
    json: bool,
    output_dir: Option<&Path>,
) -> Result<()> {
    let pipeline = Pipeline::from_config(config)?;
    let output = pipeline.run(request)?;

    if let Some(dir) = output_dir {
        let run_dir = save_artifacts(&output, dir)?;
        info!(path = %run_dir.display(), "artifacts saved");
    }

    if json {
        let labeled = output.labeled();
        println!("{}", serde_json::to_string_pretty(&labeled)?);
    } else {
        print_summary(&output);
    }

    Ok(())
}

fn run_resolve(
    config: &PipelineConfig,
    symbol: &str,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<()> {
    let end_date = match end {
        Some(s) => parse_date(s)?,
        None => chrono::Local::now().date_naive(),
    };
    let start_date = match start {
        Some(s) => parse_date(s)?,
        None => end_date - chrono::Duration::days(365),
    };

    let pipeline = Pipeline::from_config(config)?;
    let provider = pipeline.provider();
    let first_try = provider.exchange().resolve(symbol);
    let series = provider.fetch(symbol, start_date, end_date);

    println!("Symbol:         {}", ExchangeConfig::normalize(symbol));
    println!("First Lookup:   {first_try}");
    println!("Resolved:       {}", series.resolved_symbol());
    println!("Data Source:    {}", series.data_source());
    println!(
        "Rows:           {} ({} to {})",
        series.len(),
        series.first_date(),
        series.last_date()
    );
    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}': expected YYYY-MM-DD"))
}

fn print_summary(output: &ForecastOutput) {
    println!();
    println!("=== Forecast ===");
    println!("Symbol:         {}", output.symbol);
    println!("Resolved:       {}", output.resolved_symbol);
    println!("Model:          {}", output.model_used);
    println!("Data Source:    {}", output.data_source);
    if let (Some(first), Some(last)) = (output.historical.first(), output.historical.last()) {
        println!(
            "History:        {} rows ({} to {})",
            output.historical.len(),
            first.date,
            last.date
        );
        println!("Last Close:     {:.2}", last.price);
    }
    println!();
    println!("--- Prediction ---");
    if let (Some(first), Some(last)) = (output.predicted.first(), output.predicted.last()) {
        println!(
            "Horizon:        {} days ({} to {})",
            output.predicted.len(),
            first.date,
            last.date
        );
        println!("Final Price:    {:.2}", last.price);
    }
    println!("Trend:          {}", trend_label(output.trend.as_str()));
    println!(
        "Confidence:     {:.1}% ({})",
        output.confidence_level * 100.0,
        confidence_label(output.confidence_level)
    );
    println!("MAE:            {:.2}", output.mae);
    println!("RMSE:           {:.2}", output.rmse);

    if let Some(comparison) = &output.comparison {
        println!();
        println!("--- Comparison ---");
        for (name, result) in [
            ("linear_regression", &comparison.linear_regression),
            ("heuristic", &comparison.heuristic),
        ] {
            println!(
                "{name:<18} trend={:<8} confidence={:.2} mae={:.2} rmse={:.2}",
                result.trend.as_str(),
                result.confidence_level,
                result.mae,
                result.rmse
            );
        }
    }

    if output.data_source == DataSource::Synthetic {
        println!();
        println!("WARNING: Forecast based on SYNTHETIC data");
    }
}
