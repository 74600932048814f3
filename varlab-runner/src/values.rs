//! Numeric token parsing for scenario values and realized P&L.
//!
//! Scenario vectors travel as a single semicolon-separated string
//! (`"100;200;250.5"`), both inside the trade file and on the single-trade
//! command line.

use thiserror::Error;

/// Separator between scenario values.
pub const SCENARIO_SEPARATOR: char = ';';

/// Malformed numeric input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("invalid numeric value '{0}'")]
    InvalidNumber(String),

    #[error(
        "number of historical values does not match the expected length: expected {expected}, found {found}"
    )]
    CountMismatch { expected: usize, found: usize },
}

/// Parse one finite number. Surrounding whitespace is ignored.
pub fn parse_number(token: &str) -> Result<f64, ValueError> {
    let trimmed = token.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValueError::InvalidNumber(trimmed.to_string())),
    }
}

/// Split on the scenario separator, dropping trailing empty tokens.
///
/// Text without a separator is a single token, even when empty. Text made only
/// of separators yields no tokens.
fn split_values(text: &str) -> Vec<&str> {
    let mut tokens: Vec<&str> = text.split(SCENARIO_SEPARATOR).collect();
    if tokens.len() > 1 {
        while tokens.last().is_some_and(|t| t.is_empty()) {
            tokens.pop();
        }
    }
    tokens
}

/// Parse a semicolon-separated list of scenario values.
///
/// Trailing empty tokens (`"1;2;"`) are dropped; an empty field or an empty
/// token in the middle of the list is an invalid number.
pub fn parse_scenarios(field: &str) -> Result<Vec<f64>, ValueError> {
    split_values(field).into_iter().map(parse_number).collect()
}

/// Parse scenario values whose count was declared up front.
///
/// Tokens are split the same way as [`parse_scenarios`]. The count is checked
/// before any token is parsed, so a short or long list is reported as a count
/// mismatch even when it also contains bad tokens.
pub fn parse_historical_values(text: &str, expected_count: usize) -> Result<Vec<f64>, ValueError> {
    let tokens = split_values(text);
    if tokens.len() != expected_count {
        return Err(ValueError::CountMismatch {
            expected: expected_count,
            found: tokens.len(),
        });
    }
    tokens.into_iter().map(parse_number).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_signed_numbers() {
        assert_eq!(parse_number("250").unwrap(), 250.0);
        assert_eq!(parse_number(" -12.5 ").unwrap(), -12.5);
        assert_eq!(parse_number("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn rejects_non_numeric_tokens() {
        assert_eq!(
            parse_number("abc"),
            Err(ValueError::InvalidNumber("abc".into()))
        );
        assert_eq!(parse_number(""), Err(ValueError::InvalidNumber(String::new())));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(parse_number("NaN").is_err());
        assert!(parse_number("inf").is_err());
    }

    #[test]
    fn scenario_list_in_order() {
        assert_eq!(
            parse_scenarios("100;200;250;300").unwrap(),
            vec![100.0, 200.0, 250.0, 300.0]
        );
    }

    #[test]
    fn scenario_list_drops_trailing_separators() {
        assert_eq!(parse_scenarios("1;2;;").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn scenario_list_rejects_interior_gap() {
        assert_eq!(
            parse_scenarios("1;;2"),
            Err(ValueError::InvalidNumber(String::new()))
        );
    }

    #[test]
    fn empty_scenario_field_is_invalid() {
        assert!(parse_scenarios("").is_err());
        assert!(parse_scenarios("  ").is_err());
    }

    #[test]
    fn declared_count_must_match() {
        assert_eq!(
            parse_historical_values("1;2;3", 4),
            Err(ValueError::CountMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(parse_historical_values("1;2;3", 3).unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn trailing_separator_not_counted() {
        assert_eq!(parse_historical_values("1;2;", 2).unwrap(), vec![1.0, 2.0]);
        assert_eq!(
            parse_historical_values("1;2;", 3),
            Err(ValueError::CountMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(parse_historical_values("1;2;", 2), parse_scenarios("1;2;"));
    }

    #[test]
    fn separators_only_is_zero_values() {
        assert_eq!(parse_historical_values(";;", 0).unwrap(), Vec::<f64>::new());
        assert!(parse_scenarios(";;").unwrap().is_empty());
    }

    #[test]
    fn count_checked_before_tokens() {
        assert!(matches!(
            parse_historical_values("1;x", 3),
            Err(ValueError::CountMismatch { .. })
        ));
        assert_eq!(
            parse_historical_values("1;x", 2),
            Err(ValueError::InvalidNumber("x".into()))
        );
    }
}
