//! Input validation: pure precondition checks run before any computation.

use crate::domain::Trade;
use crate::error::VarError;

/// Reject confidence levels outside the closed interval `[0, 1]`.
///
/// NaN is rejected as well since it is not a member of the interval.
pub fn validate_confidence_level(level: f64) -> Result<(), VarError> {
    if !(0.0..=1.0).contains(&level) {
        return Err(VarError::ConfidenceOutOfRange(level));
    }
    Ok(())
}

pub fn validate_historical_values(values: &[f64]) -> Result<(), VarError> {
    if values.is_empty() {
        return Err(VarError::EmptyHistoricalValues);
    }
    Ok(())
}

/// Reject an empty trade list, or one whose scenario vectors differ in length.
///
/// The first trade's scenario length is the reference.
pub fn validate_trades(trades: &[Trade]) -> Result<(), VarError> {
    let first = trades.first().ok_or(VarError::EmptyTrades)?;
    let expected = first.scenario_len();

    if let Some(bad) = trades.iter().find(|t| t.scenario_len() != expected) {
        return Err(VarError::InconsistentScenarioLengths {
            trade_id: bad.id.clone(),
            expected,
            found: bad.scenario_len(),
        });
    }
    Ok(())
}
