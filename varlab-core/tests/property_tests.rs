//! Property tests for engine and aggregation invariants.
//!
//! Uses proptest to verify:
//! 1. Minimum at full confidence: VaR of the minimum at level 1 is zero
//! 2. Membership: a target drawn from the distribution never fails membership
//! 3. Range: out-of-range confidence levels always fail
//! 4. Bounds: the result lies between target - max and target - min
//! 5. Aggregation: total is the in-order compensated sum of contributions, stays
//!    within rounding of the naive sum, and ignores scenario contents
//! 6. Consistency: differing scenario lengths always fail

use proptest::prelude::*;
use varlab_core::engine::{compute_var, sorted_copy};
use varlab_core::portfolio::{compensated_sum, compute_portfolio_var, PortfolioVar};
use varlab_core::{Trade, VarError};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_pnl() -> impl Strategy<Value = f64> {
    (-10_000.0..10_000.0_f64).prop_map(|p| (p * 100.0).round() / 100.0)
}

fn arb_distribution() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(arb_pnl(), 1..200)
}

/// Confidence levels that keep the percentile index inside the distribution.
fn arb_valid_level() -> impl Strategy<Value = f64> {
    0.001..=1.0_f64
}

fn arb_invalid_level() -> impl Strategy<Value = f64> {
    prop_oneof![-100.0..-1e-9_f64, (1.0 + 1e-9)..100.0_f64]
}

/// Distribution plus an index into it, so the target is always a member.
fn arb_distribution_with_member() -> impl Strategy<Value = (Vec<f64>, usize)> {
    arb_distribution().prop_flat_map(|d| {
        let len = d.len();
        (Just(d), 0..len)
    })
}

fn arb_trades() -> impl Strategy<Value = Vec<Trade>> {
    (1usize..20, 1usize..30).prop_flat_map(|(n_trades, n_scenarios)| {
        prop::collection::vec(
            (prop::collection::vec(arb_pnl(), n_scenarios), arb_pnl()),
            n_trades,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (scenarios, realized))| Trade::new(format!("T{i}"), scenarios, realized))
                .collect()
        })
    })
}

// ── 1. Minimum at full confidence ────────────────────────────────────

proptest! {
    #[test]
    fn min_at_full_confidence_is_zero(d in arb_distribution()) {
        let min = sorted_copy(&d)[0];
        prop_assert_eq!(compute_var(&d, min, 1.0).unwrap(), 0.0);
    }
}

// ── 2. Membership ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn member_target_never_fails_membership(
        (d, idx) in arb_distribution_with_member(),
        level in arb_valid_level(),
    ) {
        let result = compute_var(&d, d[idx], level);
        prop_assert!(result.is_ok(), "unexpected error: {:?}", result);
    }
}

// ── 3. Range ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn out_of_range_level_always_fails(
        (d, idx) in arb_distribution_with_member(),
        level in arb_invalid_level(),
    ) {
        prop_assert_eq!(
            compute_var(&d, d[idx], level),
            Err(VarError::ConfidenceOutOfRange(level))
        );
    }
}

// ── 4. Bounds ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn result_is_target_minus_some_member(
        (d, idx) in arb_distribution_with_member(),
        level in arb_valid_level(),
    ) {
        let target = d[idx];
        let var = compute_var(&d, target, level).unwrap();
        let sorted = sorted_copy(&d);
        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        prop_assert!(var <= target - min);
        prop_assert!(var >= target - max);
        prop_assert!(sorted.iter().any(|&v| target - v == var));
    }
}

// ── 5. Aggregation ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn total_is_compensated_sum_of_contributions(
        trades in arb_trades(),
        level in arb_valid_level(),
    ) {
        let pv = PortfolioVar::compute(&trades, level).unwrap();
        let expected = compensated_sum(pv.contributions.iter().map(|c| c.var));
        prop_assert_eq!(pv.total.to_bits(), expected.to_bits());
        prop_assert_eq!(compute_portfolio_var(&trades, level).unwrap(), pv.total);

        let naive: f64 = pv.contributions.iter().map(|c| c.var).sum();
        let magnitude: f64 = pv.contributions.iter().map(|c| c.var.abs()).sum();
        prop_assert!((pv.total - naive).abs() <= magnitude * 1e-12 + 1e-9);
    }

    #[test]
    fn scenario_contents_do_not_change_total(
        trades in arb_trades(),
        level in arb_valid_level(),
        fill in arb_pnl(),
    ) {
        let before = compute_portfolio_var(&trades, level).unwrap();
        let replaced: Vec<Trade> = trades
            .iter()
            .map(|t| Trade::new(t.id.clone(), vec![fill; t.scenario_len()], t.realized_pnl))
            .collect();
        let after = compute_portfolio_var(&replaced, level).unwrap();
        prop_assert_eq!(before.to_bits(), after.to_bits());
    }
}

// ── 6. Consistency ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn differing_lengths_always_fail(
        trades in arb_trades(),
        extra in 1usize..5,
        level in -2.0..2.0_f64,
    ) {
        let mut trades = trades;
        let last = trades.len() - 1;
        let mut scenarios = trades[last].scenario_pnl.clone();
        scenarios.extend(std::iter::repeat(0.0).take(extra));
        trades.push(Trade::new("ODD", scenarios, 0.0));
        let is_inconsistent = matches!(
            compute_portfolio_var(&trades, level),
            Err(VarError::InconsistentScenarioLengths { .. })
        );
        prop_assert!(is_inconsistent);
    }
}
