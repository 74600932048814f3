//! Trade: one position with its scenario P&L vector and realized P&L.

use serde::{Deserialize, Serialize};

use crate::engine::compute_var;
use crate::error::VarError;

/// A single trade as seen by the VaR calculators.
///
/// `scenario_pnl` holds the historical or simulated P&L outcomes for this
/// trade; `realized_pnl` is its current P&L. The id is carried for
/// record-keeping only and never enters a calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub scenario_pnl: Vec<f64>,
    pub realized_pnl: f64,
}

impl Trade {
    pub fn new(id: impl Into<String>, scenario_pnl: Vec<f64>, realized_pnl: f64) -> Self {
        Self {
            id: id.into(),
            scenario_pnl,
            realized_pnl,
        }
    }

    /// Number of scenario outcomes attached to this trade.
    pub fn scenario_len(&self) -> usize {
        self.scenario_pnl.len()
    }

    /// VaR of this trade measured against its own scenario vector.
    ///
    /// This is the textbook historical-simulation figure. It does not take
    /// part in portfolio aggregation, which measures every trade against the
    /// cross-sectional realized P&L instead.
    pub fn standalone_var(&self, confidence_level: f64) -> Result<f64, VarError> {
        compute_var(&self.scenario_pnl, self.realized_pnl, confidence_level)
    }
}
