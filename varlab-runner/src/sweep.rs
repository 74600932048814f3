//! Confidence-level sweep over one portfolio.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use varlab_core::{compute_portfolio_var, Trade};

/// One confidence level's outcome.
///
/// A level that fails (for example a level whose percentile index falls
/// past the end of the distribution) records the error message instead of
/// aborting the whole sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub confidence_level: f64,
    pub total: Option<f64>,
    pub error: Option<String>,
}

impl SweepPoint {
    pub fn is_ok(&self) -> bool {
        self.total.is_some()
    }
}

/// Portfolio VaR evaluated at several confidence levels.
pub struct ConfidenceSweep {
    parallel: bool,
}

impl Default for ConfidenceSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfidenceSweep {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    /// Enables or disables parallel execution.
    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Evaluates every level against the same trades.
    ///
    /// Points come back in the order of `levels`, and each total is
    /// bit-identical to a sequential `compute_portfolio_var` call.
    pub fn run(&self, trades: &[Trade], levels: &[f64]) -> Vec<SweepPoint> {
        let points: Vec<SweepPoint> = if self.parallel {
            levels
                .par_iter()
                .map(|&level| evaluate(trades, level))
                .collect()
        } else {
            levels.iter().map(|&level| evaluate(trades, level)).collect()
        };

        let failed = points.iter().filter(|p| !p.is_ok()).count();
        if failed > 0 {
            tracing::warn!(failed, levels = levels.len(), "some sweep levels failed");
        }
        tracing::info!(levels = levels.len(), parallel = self.parallel, "sweep complete");
        points
    }
}

fn evaluate(trades: &[Trade], confidence_level: f64) -> SweepPoint {
    match compute_portfolio_var(trades, confidence_level) {
        Ok(total) => SweepPoint {
            confidence_level,
            total: Some(total),
            error: None,
        },
        Err(e) => SweepPoint {
            confidence_level,
            total: None,
            error: Some(e.to_string()),
        },
    }
}
