//! VarLab Core: historical-simulation Value-at-Risk.
//!
//! This crate contains the pure computation layer:
//! - Domain type (`Trade`: id, scenario P&L vector, realized P&L)
//! - Input validation (confidence level, non-empty values, scenario lengths)
//! - Quantile engine (sort, exact membership check, percentile selection)
//! - Portfolio aggregation against the cross-sectional realized P&L
//!
//! Nothing here performs I/O; file loading and presentation live in
//! `varlab-runner` and `varlab-cli`.

pub mod domain;
pub mod engine;
pub mod error;
pub mod portfolio;
pub mod validation;

pub use domain::Trade;
pub use engine::{compute_single_trade_var, compute_var};
pub use error::{ErrorKind, VarError};
pub use portfolio::{compute_portfolio_var, PortfolioVar, TradeVar};
