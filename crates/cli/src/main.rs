//! # rustful-audit
//!
//! Command-line runner for the sales forecast, fraud detection, and invoice
//! processing analyses. Reports are written as pretty-printed JSON.

use std::fs;
use std::path::{Path, PathBuf};

use analysis::{
    run_fraud_detection, run_invoice_processing, run_sales_forecast, InvoiceConfig, RunConfig,
};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "rustful-audit")]
#[command(about = "Anomaly detection and forecasting over CSV uploads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flag unusual periods in a sales history and forecast the target
    Forecast {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        run: RunArgs,

        /// Periods to forecast (1 to 24)
        #[arg(long)]
        horizon: Option<usize>,

        /// Seasonal period; chosen from the date cadence when omitted
        #[arg(long)]
        period: Option<usize>,

        /// Confidence level of the forecast band
        #[arg(long)]
        confidence: Option<f64>,
    },

    /// Score transactions and summarize the suspicious ones
    Fraud {
        #[command(flatten)]
        io: IoArgs,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Segment revenue, flag suspicious invoices, and audit job budgets
    Invoice {
        #[command(flatten)]
        io: IoArgs,

        /// Expected share of anomalous invoices (0.001 to 0.1)
        #[arg(long)]
        contamination: Option<f64>,

        /// Seed for the isolation forest
        #[arg(long)]
        seed: Option<u64>,

        /// Budget per job as a multiple of the mean job total
        #[arg(long)]
        budget_factor: Option<f64>,

        /// Quantile above which an invoice counts as high value
        #[arg(long)]
        high_value_quantile: Option<f64>,
    },
}

#[derive(Args)]
struct IoArgs {
    /// Input CSV file
    #[arg(short, long)]
    input: PathBuf,

    /// JSON file with run parameters; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (optional, defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct RunArgs {
    /// Expected share of anomalous rows (0.001 to 0.1)
    #[arg(long)]
    contamination: Option<f64>,

    /// Target column
    #[arg(short, long)]
    target: Option<String>,

    /// Date column
    #[arg(short, long)]
    date: Option<String>,

    /// Column to count flagged rows by (repeatable)
    #[arg(short, long = "group-by")]
    group_by: Vec<String>,

    /// Seed for the isolation forest
    #[arg(long)]
    seed: Option<u64>,

    /// Number of isolation trees
    #[arg(long)]
    trees: Option<usize>,
}

impl RunArgs {
    fn apply(self, mut config: RunConfig) -> RunConfig {
        if let Some(contamination) = self.contamination {
            config.contamination = contamination;
        }
        if self.target.is_some() {
            config.target_column = self.target;
        }
        if self.date.is_some() {
            config.date_column = self.date;
        }
        if !self.group_by.is_empty() {
            config.group_by_columns = self.group_by;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(trees) = self.trees {
            config.n_trees = trees;
        }
        config
    }
}

/// Parameters from `--config`, or defaults when no file is given.
fn load_config<T: DeserializeOwned + Default>(path: Option<&Path>) -> Result<T> {
    let Some(path) = path else {
        return Ok(T::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read input {}", path.display()))
}

fn write_report<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write output {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Forecast {
            io,
            run,
            horizon,
            period,
            confidence,
        } => {
            let mut config = run.apply(load_config(io.config.as_deref())?);
            if let Some(horizon) = horizon {
                config.forecast_horizon = horizon;
            }
            if period.is_some() {
                config.seasonal_period = period;
            }
            if let Some(confidence) = confidence {
                config.confidence_level = confidence;
            }
            let report = run_sales_forecast(&read_input(&io.input)?, &config)?;
            write_report(&report, io.output.as_deref())
        }

        Commands::Fraud { io, run } => {
            let config = run.apply(load_config(io.config.as_deref())?);
            let report = run_fraud_detection(&read_input(&io.input)?, &config)?;
            write_report(&report, io.output.as_deref())
        }

        Commands::Invoice {
            io,
            contamination,
            seed,
            budget_factor,
            high_value_quantile,
        } => {
            let mut config: InvoiceConfig = load_config(io.config.as_deref())?;
            if let Some(contamination) = contamination {
                config.contamination = contamination;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(factor) = budget_factor {
                config.budget_factor = factor;
            }
            if let Some(quantile) = high_value_quantile {
                config.high_value_quantile = quantile;
            }
            let report = run_invoice_processing(&read_input(&io.input)?, &config)?;
            write_report(&report, io.output.as_deref())
        }
    }
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rustful_audit=info,analysis=info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "rustful-audit",
            "fraud",
            "--input",
            "tx.csv",
            "--contamination",
            "0.05",
            "-g",
            "city",
            "--group-by",
            "type",
        ])
        .unwrap();
        let Commands::Fraud { io, run } = cli.command else {
            panic!("expected fraud command");
        };
        assert_eq!(io.input, PathBuf::from("tx.csv"));

        let config = run.apply(RunConfig::default());
        assert_eq!(config.contamination, 0.05);
        assert_eq!(config.group_by_columns, vec!["city", "type"]);
        assert_eq!(config.forecast_horizon, 12);
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let cli = Cli::try_parse_from(["rustful-audit", "forecast", "-i", "sales.csv"]).unwrap();
        let Commands::Forecast { run, .. } = cli.command else {
            panic!("expected forecast command");
        };
        let from_file: RunConfig =
            serde_json::from_str(r#"{"target_column": "revenue", "seed": 7}"#).unwrap();

        let config = run.apply(from_file);
        assert_eq!(config.target_column.as_deref(), Some("revenue"));
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config: InvoiceConfig = load_config(None).unwrap();
        assert_eq!(config, InvoiceConfig::default());
        assert!(load_config::<RunConfig>(Some(Path::new("does/not/exist.json"))).is_err());
    }

    #[test]
    fn test_input_is_required() {
        assert!(Cli::try_parse_from(["rustful-audit", "invoice"]).is_err());
    }
}
