//! Portfolio aggregation: per-trade VaR against the cross-sectional
//! realized P&L, summed into a portfolio figure.
//!
//! Every trade's VaR is measured against the *same* distribution: the
//! realized P&L of all trades in the portfolio, in trade-list order. A trade's
//! own scenario vector is only checked for length consistency and is not
//! consulted otherwise. Measuring each trade against its own scenarios is
//! what [`Trade::standalone_var`](crate::domain::Trade::standalone_var) does;
//! the two figures are not interchangeable.

use serde::{Deserialize, Serialize};

use crate::domain::Trade;
use crate::engine::compute_var;
use crate::error::VarError;
use crate::validation::{validate_confidence_level, validate_trades};

/// One trade's contribution to the portfolio VaR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeVar {
    pub trade_id: String,
    pub realized_pnl: f64,
    pub var: f64,
}

/// Portfolio VaR with its per-trade breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioVar {
    pub confidence_level: f64,
    /// Realized P&L of every trade, in trade-list order.
    pub cross_sectional_pnl: Vec<f64>,
    /// Per-trade VaR, in trade-list order.
    pub contributions: Vec<TradeVar>,
    /// Compensated sum of the contributions, accumulated in trade-list order.
    pub total: f64,
}

impl PortfolioVar {
    /// Validate `trades` and `confidence_level`, then compute every trade's VaR
    /// against the cross-sectional realized P&L.
    pub fn compute(trades: &[Trade], confidence_level: f64) -> Result<Self, VarError> {
        validate_trades(trades)?;
        validate_confidence_level(confidence_level)?;

        let cross_sectional_pnl = cross_sectional_pnl(trades);

        let contributions = trades
            .iter()
            .map(|trade| {
                let var = compute_var(&cross_sectional_pnl, trade.realized_pnl, confidence_level)?;
                Ok(TradeVar {
                    trade_id: trade.id.clone(),
                    realized_pnl: trade.realized_pnl,
                    var,
                })
            })
            .collect::<Result<Vec<_>, VarError>>()?;

        let total = compensated_sum(contributions.iter().map(|c| c.var));

        Ok(Self {
            confidence_level,
            cross_sectional_pnl,
            contributions,
            total,
        })
    }

    pub fn trade_count(&self) -> usize {
        self.contributions.len()
    }

    /// Contribution of the trade with the given id, if present.
    pub fn contribution(&self, trade_id: &str) -> Option<&TradeVar> {
        self.contributions.iter().find(|c| c.trade_id == trade_id)
    }
}

/// Realized P&L of each trade, one entry per trade, in trade-list order.
pub fn cross_sectional_pnl(trades: &[Trade]) -> Vec<f64> {
    trades.iter().map(|t| t.realized_pnl).collect()
}

/// Kahan-compensated sum in iteration order.
///
/// The running compensation is subtracted from each addend before it is
/// added, and once more from the final sum. When the compensated result is
/// NaN but the naive sum overflowed to an infinity, the infinity is returned.
pub fn compensated_sum(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    let mut simple = 0.0_f64;

    for v in values {
        let adjusted = v - compensation;
        let next = sum + adjusted;
        compensation = (next - sum) - adjusted;
        sum = next;
        simple += v;
    }

    let total = sum - compensation;
    if total.is_nan() && simple.is_infinite() {
        simple
    } else {
        total
    }
}

/// Portfolio VaR: the sum of per-trade VaRs measured against the
/// cross-sectional realized P&L.
///
/// # Examples
/// ```rust
/// use varlab_core::domain::Trade;
/// use varlab_core::portfolio::compute_portfolio_var;
///
/// let trades = vec![
///     Trade::new("T1", vec![100.0, 200.0], 250.0),
///     Trade::new("T2", vec![150.0, 250.0], 300.0),
/// ];
/// assert_eq!(compute_portfolio_var(&trades, 0.95).unwrap(), 50.0);
/// ```
pub fn compute_portfolio_var(trades: &[Trade], confidence_level: f64) -> Result<f64, VarError> {
    PortfolioVar::compute(trades, confidence_level).map(|p| p.total)
}
