//! VaR runner: wires together trade loading, the core calculators and reports.
//!
//! Three entry points:
//! - `run_portfolio()`: loads trades named by a `RunConfig`, then computes. Used by CLI.
//! - `run_portfolio_from_trades()`: takes pre-loaded trades. Used by tests and sweeps.
//! - `run_single_trade()`: parses a semicolon-separated scenario string and computes
//!   the standalone VaR of one trade.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use varlab_core::engine::compute_single_trade_var;
use varlab_core::{PortfolioVar, Trade, VarError};

use crate::config::{ConfigError, RunConfig};
use crate::trade_loader::{load_trades, LoadError};
use crate::values::{parse_historical_values, parse_scenarios, ValueError};

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("input error: {0}")]
    Value(#[from] ValueError),
    #[error("{0}")]
    Var(#[from] VarError),
}

/// Current schema version for persisted reports.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a portfolio VaR run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    /// Trade file the portfolio was loaded from, if any.
    pub source: Option<String>,
    /// BLAKE3 hash over the trade data, for reproducibility checks.
    pub dataset_hash: String,
    pub trade_count: usize,
    /// Common scenario-vector length across all trades.
    pub scenario_len: usize,
    pub portfolio: PortfolioVar,
}

/// Default schema version for serde deserialization of older JSON without the field.
fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl PortfolioReport {
    pub fn total(&self) -> f64 {
        self.portfolio.total
    }
}

/// Load the configured trade file and compute the portfolio VaR.
pub fn run_portfolio(config: &RunConfig) -> Result<PortfolioReport, RunError> {
    config.validate()?;
    let path = config.input.trades_path.as_path();
    let trades = load_trades(path)?;
    run_portfolio_from_trades(&trades, config.calculation.confidence_level, Some(path))
}

/// Compute the portfolio VaR for pre-loaded trades. No I/O.
pub fn run_portfolio_from_trades(
    trades: &[Trade],
    confidence_level: f64,
    source: Option<&Path>,
) -> Result<PortfolioReport, RunError> {
    let portfolio = PortfolioVar::compute(trades, confidence_level)?;

    for c in &portfolio.contributions {
        tracing::debug!(
            trade = %c.trade_id,
            realized_pnl = c.realized_pnl,
            var = c.var,
            "trade VaR"
        );
    }
    tracing::info!(
        trades = trades.len(),
        confidence_level,
        total = portfolio.total,
        "computed portfolio VaR"
    );

    Ok(PortfolioReport {
        schema_version: SCHEMA_VERSION,
        source: source.map(|p| p.display().to_string()),
        dataset_hash: compute_dataset_hash(trades),
        trade_count: trades.len(),
        scenario_len: trades.first().map_or(0, Trade::scenario_len),
        portfolio,
    })
}

/// Standalone VaR of one trade given its scenario values as text.
///
/// With `expected_count`, the number of values must match exactly (the
/// interactive flow declares the count before entering the values).
pub fn run_single_trade(
    values_text: &str,
    expected_count: Option<usize>,
    realized_pnl: f64,
    confidence_level: f64,
) -> Result<f64, RunError> {
    let values = match expected_count {
        Some(count) => parse_historical_values(values_text, count)?,
        None => parse_scenarios(values_text)?,
    };
    let var = compute_single_trade_var(&values, realized_pnl, confidence_level)?;
    tracing::info!(
        scenarios = values.len(),
        realized_pnl,
        confidence_level,
        var,
        "computed single-trade VaR"
    );
    Ok(var)
}

/// Compute a deterministic BLAKE3 hash over all trade data.
///
/// Covers ids, scenario values and realized P&L in trade-list order, so any
/// change to the input (including reordering) changes the hash.
pub fn compute_dataset_hash(trades: &[Trade]) -> String {
    let mut hasher = blake3::Hasher::new();

    for trade in trades {
        hasher.update(trade.id.as_bytes());
        hasher.update(&(trade.scenario_pnl.len() as u64).to_le_bytes());
        for v in &trade.scenario_pnl {
            hasher.update(&v.to_le_bytes());
        }
        hasher.update(&trade.realized_pnl.to_le_bytes());
    }

    hasher.finalize().to_hex().to_string()
}
