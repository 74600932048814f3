//! VarLab CLI: historical-simulation VaR from the command line.
//!
//! Commands:
//! - `portfolio`: portfolio VaR from a trade file (or a TOML run config)
//! - `single`: standalone VaR of one trade given inline scenario values
//! - `sweep`: portfolio VaR at several confidence levels
//! - `interactive`: prompt-driven console session

mod interactive;

use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use varlab_runner::export::export_sweep_csv;
use varlab_runner::{
    load_trades, run_portfolio, run_single_trade, save_report, ConfidenceSweep, PortfolioReport,
    RunConfig,
};

#[derive(Parser)]
#[command(
    name = "varlab",
    about = "VarLab CLI: historical-simulation Value-at-Risk"
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. info, varlab_runner=debug).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Portfolio VaR from a trade file or a TOML run config.
    Portfolio {
        /// Trade CSV file (header row, then id,scenario values,realized P&L).
        #[arg(long)]
        trades: Option<PathBuf>,

        /// Confidence level in [0, 1]. Required with --trades.
        #[arg(long)]
        confidence: Option<f64>,

        /// Path to a TOML run config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full report as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Write report.json and contributions.csv here. Overrides the config.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Standalone VaR of one trade.
    Single {
        /// Realized P&L of the trade; must appear among the values.
        #[arg(long, allow_negative_numbers = true)]
        pnl: f64,

        /// Scenario values separated by semicolons, e.g. "100;200;250".
        #[arg(long, allow_hyphen_values = true)]
        values: String,

        /// Declared number of values; a different count is rejected.
        #[arg(long)]
        count: Option<usize>,

        /// Confidence level in [0, 1].
        #[arg(long)]
        confidence: f64,
    },
    /// Portfolio VaR at several confidence levels.
    Sweep {
        /// Trade CSV file.
        #[arg(long)]
        trades: Option<PathBuf>,

        /// Comma-separated confidence levels, e.g. 0.9,0.95,0.99.
        #[arg(long, value_delimiter = ',')]
        levels: Vec<f64>,

        /// TOML run config; its sweep_levels are used when --levels is absent.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Evaluate levels one after another instead of in parallel.
        #[arg(long, default_value_t = false)]
        sequential: bool,

        /// Print CSV (confidence_level,total,error) instead of a table.
        #[arg(long, default_value_t = false)]
        csv: bool,
    },
    /// Prompt for inputs on the console.
    Interactive {
        /// Single-trade session instead of the portfolio session.
        #[arg(long, default_value_t = false)]
        single: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Portfolio {
            trades,
            confidence,
            config,
            json,
            output_dir,
        } => portfolio_cmd(trades, confidence, config, json, output_dir),
        Commands::Single {
            pnl,
            values,
            count,
            confidence,
        } => {
            let var = run_single_trade(&values, count, pnl, confidence)?;
            println!("VaR for the trade: {var:?}");
            Ok(())
        }
        Commands::Sweep {
            trades,
            levels,
            config,
            sequential,
            csv,
        } => sweep_cmd(trades, levels, config, sequential, csv),
        Commands::Interactive { single } => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut out = io::stdout();
            if single {
                interactive::single_trade_session(&mut input, &mut out)
            } else {
                interactive::portfolio_session(&mut input, &mut out)
            }
        }
    }
}

/// `RUST_LOG` wins; otherwise `--log-level`. Logs go to stderr so stdout
/// stays clean for results.
fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(
    trades: Option<PathBuf>,
    confidence: Option<f64>,
    config: Option<PathBuf>,
) -> Result<RunConfig> {
    match (trades, config) {
        (Some(_), Some(_)) => bail!("--trades and --config are mutually exclusive"),
        (None, None) => bail!("one of --trades or --config is required"),
        (None, Some(path)) => {
            if confidence.is_some() {
                bail!("--confidence cannot be combined with --config; set it in the config file");
            }
            Ok(RunConfig::from_file(&path)?)
        }
        (Some(path), None) => {
            let Some(level) = confidence else {
                bail!("--confidence is required with --trades");
            };
            Ok(RunConfig::new(path, level))
        }
    }
}

fn portfolio_cmd(
    trades: Option<PathBuf>,
    confidence: Option<f64>,
    config_path: Option<PathBuf>,
    json: bool,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = resolve_config(trades, confidence, config_path)?;
    if output_dir.is_some() {
        config.output.dir = output_dir;
    }

    let report = run_portfolio(&config)?;

    if json {
        let text = serde_json::to_string_pretty(&report).context("failed to serialize report")?;
        println!("{text}");
    } else {
        print_summary(&report);
    }

    match &config.output.dir {
        Some(dir) => {
            let paths = save_report(dir, &report)?;
            eprintln!("Report saved to: {}", paths.report_json.display());
        }
        None => tracing::debug!("no output directory configured; skipping artifacts"),
    }

    Ok(())
}

fn sweep_cmd(
    trades: Option<PathBuf>,
    levels: Vec<f64>,
    config_path: Option<PathBuf>,
    sequential: bool,
    csv: bool,
) -> Result<()> {
    let (trades_path, levels) = match (trades, config_path) {
        (Some(_), Some(_)) => bail!("--trades and --config are mutually exclusive"),
        (None, None) => bail!("one of --trades or --config is required"),
        (Some(path), None) => (path, levels),
        (None, Some(path)) => {
            let config = RunConfig::from_file(&path)?;
            let levels = if levels.is_empty() {
                config.calculation.sweep_levels
            } else {
                levels
            };
            (config.input.trades_path, levels)
        }
    };
    if levels.is_empty() {
        bail!("no confidence levels to sweep; pass --levels or set calculation.sweep_levels");
    }

    let trades = load_trades(&trades_path)?;
    let points = ConfidenceSweep::new()
        .with_parallelism(!sequential)
        .run(&trades, &levels);

    if csv {
        print!("{}", export_sweep_csv(&points)?);
        return Ok(());
    }

    println!("{:>12}  {:>16}", "Confidence", "Portfolio VaR");
    for p in &points {
        match (&p.total, &p.error) {
            (Some(total), _) => println!("{:>12}  {:>16}", p.confidence_level, total),
            (None, Some(err)) => println!("{:>12}  error: {err}", p.confidence_level),
            (None, None) => println!("{:>12}  {:>16}", p.confidence_level, "-"),
        }
    }
    Ok(())
}

fn print_summary(report: &PortfolioReport) {
    let pv = &report.portfolio;
    println!();
    println!("=== Portfolio VaR ===");
    if let Some(source) = &report.source {
        println!("Source:         {source}");
    }
    println!("Trades:         {}", report.trade_count);
    println!("Scenarios:      {}", report.scenario_len);
    println!("Confidence:     {}", pv.confidence_level);
    println!(
        "Dataset hash:   {}",
        report.dataset_hash.get(..16).unwrap_or(&report.dataset_hash)
    );
    println!();
    println!("--- Per-trade VaR ---");
    for c in &pv.contributions {
        println!("{:<14}  realized {:>14}  VaR {:>14}", c.trade_id, c.realized_pnl, c.var);
    }
    println!();
    println!("Portfolio VaR: {}", pv.total);
}
