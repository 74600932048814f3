//! Quantile VaR engine: historical simulation by sort and index selection.
//!
//! For a distribution of `n` P&L outcomes and a confidence level `c`, the
//! engine sorts a copy of the distribution ascending, picks the outcome at
//! `floor(n * (1 - c))`, and reports how far the target P&L sits above it:
//!
//! `VaR = target - sorted[floor(n * (1 - c))]`
//!
//! The target must be an exact member of the distribution. There is no
//! interpolation between scenario points and no tolerance on membership.

use crate::error::VarError;
use crate::validation::{validate_confidence_level, validate_historical_values};

/// Index of the percentile outcome in a sorted distribution of `len` values.
///
/// `confidence_level = 1` selects the minimum (index 0). `confidence_level = 0`
/// yields `len`, one past the end; callers must bounds-check the result.
pub fn percentile_index(len: usize, confidence_level: f64) -> usize {
    (len as f64 * (1.0 - confidence_level)).floor() as usize
}

/// Ascending copy of `values`. The input is left untouched.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Value identity used for membership: bit-for-bit equality, with every NaN
/// equal to every other NaN. `-0.0` and `0.0` are distinct values.
pub fn same_value(a: f64, b: f64) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

/// Historical-simulation VaR of `target` against `distribution`.
///
/// Fails with an invalid-argument error when the distribution is empty, the
/// confidence level is outside `[0, 1]`, `target` is not exactly equal to some
/// element of the distribution, or the percentile index falls outside the
/// distribution (which happens at `confidence_level = 0`).
///
/// # Examples
/// ```rust
/// use varlab_core::engine::compute_var;
///
/// let pnl = [100.0, 200.0, 250.0, 300.0, 400.0, 500.0];
/// let var = compute_var(&pnl, 250.0, 0.95).unwrap();
/// assert_eq!(var, 150.0);
/// ```
pub fn compute_var(
    distribution: &[f64],
    target: f64,
    confidence_level: f64,
) -> Result<f64, VarError> {
    validate_historical_values(distribution)?;
    validate_confidence_level(confidence_level)?;

    let sorted = sorted_copy(distribution);

    if !sorted.iter().any(|&v| same_value(v, target)) {
        return Err(VarError::TargetNotInDistribution { target });
    }

    let index = percentile_index(sorted.len(), confidence_level);
    let percentile = sorted
        .get(index)
        .copied()
        .ok_or(VarError::PercentileOutOfRange {
            index,
            len: sorted.len(),
            confidence_level,
        })?;

    Ok(target - percentile)
}

/// Single-trade entry point: `compute_var` under its external name.
pub fn compute_single_trade_var(
    distribution: &[f64],
    target: f64,
    confidence_level: f64,
) -> Result<f64, VarError> {
    compute_var(distribution, target, confidence_level)
}
