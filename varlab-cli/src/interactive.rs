//! Prompt-driven console sessions.
//!
//! Both sessions are generic over their input and output streams so they can
//! be driven from stdin/stdout or from in-memory buffers in tests. Calculation
//! failures are printed as messages, not returned; only I/O failures and a
//! premature end of input surface as errors.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{bail, Result};
use varlab_core::compute_portfolio_var;
use varlab_core::validation::validate_confidence_level;
use varlab_runner::{load_trades, parse_number, run_single_trade};

const BANNER: &str = "VaR Calculator Application";
const RULE: &str = "==========================";
const INVALID_CONFIDENCE: &str = "Invalid input! Confidence level must be between 0 and 1.";
const CONFIDENCE_PROMPT: &str = "Enter the confidence level (between 0 and 1): ";

/// Trade file + confidence level -> portfolio VaR.
pub fn portfolio_session<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    print_banner(out)?;

    let filename = prompt(input, out, "Enter the filename: ")?;
    let trades = match load_trades(Path::new(&filename)) {
        Ok(trades) => trades,
        Err(e) => {
            tracing::warn!(error = %e, "trade file could not be loaded");
            writeln!(out, "Error: Failed to read trades from the CSV file")?;
            return Ok(());
        }
    };

    let Some(confidence_level) = prompt_confidence(input, out)? else {
        return Ok(());
    };

    match compute_portfolio_var(&trades, confidence_level) {
        Ok(var) => writeln!(out, "Portfolio VaR: {var:?}")?,
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

/// Confidence level, P&L, declared count and semicolon values -> one trade's VaR.
pub fn single_trade_session<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    print_banner(out)?;

    let Some(confidence_level) = prompt_confidence(input, out)? else {
        return Ok(());
    };

    let pnl_text = prompt(input, out, "Enter the P&L value: ")?;
    let realized_pnl = match parse_number(&pnl_text) {
        Ok(v) => v,
        Err(e) => {
            writeln!(out, "{e}")?;
            return Ok(());
        }
    };

    let count_text = prompt(input, out, "Enter the number of historical values: ")?;
    let Ok(count) = count_text.parse::<usize>() else {
        writeln!(out, "invalid count '{count_text}'")?;
        return Ok(());
    };

    writeln!(out, "Enter the historical values separated by semicolons (;):")?;
    let values_text = read_line(input)?;

    match run_single_trade(&values_text, Some(count), realized_pnl, confidence_level) {
        Ok(var) => writeln!(out, "VaR for the trade: {var:?}")?,
        Err(e) => writeln!(out, "{e}")?,
    }
    Ok(())
}

fn print_banner<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{RULE}")?;
    Ok(())
}

/// Returns `None` after printing the rejection message when the level is
/// unparseable or outside `[0, 1]`.
fn prompt_confidence<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<Option<f64>> {
    let text = prompt(input, out, CONFIDENCE_PROMPT)?;
    let level = parse_number(&text)
        .ok()
        .filter(|&c| validate_confidence_level(c).is_ok());
    if level.is_none() {
        writeln!(out, "{INVALID_CONFIDENCE}")?;
    }
    Ok(level)
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, message: &str) -> Result<String> {
    write!(out, "{message}")?;
    out.flush()?;
    read_line(input)
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("unexpected end of input");
    }
    Ok(line.trim().to_string())
}
