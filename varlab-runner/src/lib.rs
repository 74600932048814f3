//! VarLab Runner: trade loading, run configuration, reports and sweeps.
//!
//! This crate builds on `varlab-core` to provide:
//! - Trade file loading and scenario-string parsing
//! - TOML run configuration
//! - Portfolio and single-trade runners with dataset fingerprinting
//! - Parallel confidence-level sweeps
//! - JSON and CSV report export

pub mod config;
pub mod export;
pub mod runner;
pub mod sweep;
pub mod trade_loader;
pub mod values;

pub use config::{CalculationConfig, ConfigError, InputConfig, OutputConfig, RunConfig};
pub use export::{save_report, write_contributions_csv, write_report_json, ReportPaths};
pub use runner::{
    compute_dataset_hash, run_portfolio, run_portfolio_from_trades, run_single_trade,
    PortfolioReport, RunError, SCHEMA_VERSION,
};
pub use sweep::{ConfidenceSweep, SweepPoint};
pub use trade_loader::{load_trades, read_trades, LoadError};
pub use values::{parse_historical_values, parse_number, parse_scenarios, ValueError};
