//! Trade file loading.
//!
//! A trade file is comma-delimited with one header row and three fields per
//! record:
//!
//! ```text
//! trade_id,pnl_vector,pnl
//! T1,100;200;250;300;400;500,250
//! T2,150;250;300;350;450;550,300
//! ```
//!
//! The header names are not interpreted; only the field positions matter.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use varlab_core::Trade;

use crate::values::{parse_number, parse_scenarios, ValueError};

/// Number of fields in a trade record.
pub const TRADE_FIELDS: usize = 3;

/// Errors from the trade loading layer.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read trades from {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected 3 fields (id, scenario values, realized P&L), found {found}")]
    MalformedRow { line: u64, found: usize },

    #[error("line {line}: {source} in {field}")]
    InvalidValue {
        line: u64,
        field: &'static str,
        #[source]
        source: ValueError,
    },
}

/// Load trades from a file on disk.
pub fn load_trades(path: &Path) -> Result<Vec<Trade>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let trades = read_trades(file)?;
    tracing::info!(path = %path.display(), trades = trades.len(), "loaded trades");
    Ok(trades)
}

/// Read trades from any reader holding trade-file content.
pub fn read_trades<R: Read>(reader: R) -> Result<Vec<Trade>, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut trades = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != TRADE_FIELDS {
            return Err(LoadError::MalformedRow {
                line,
                found: record.len(),
            });
        }

        let invalid = |field: &'static str| {
            move |source: ValueError| LoadError::InvalidValue {
                line,
                field,
                source,
            }
        };

        let id = record[0].to_string();
        let scenario_pnl = parse_scenarios(&record[1]).map_err(invalid("scenario values"))?;
        let realized_pnl = parse_number(&record[2]).map_err(invalid("realized P&L"))?;

        tracing::debug!(line, id = %id, scenarios = scenario_pnl.len(), "parsed trade");
        trades.push(Trade::new(id, scenario_pnl, realized_pnl));
    }

    Ok(trades)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TRADES: &str = "\
trade_id,pnl_vector,pnl
T1,100;200;250;300;400;500,250
T2,150;250;300;350;450;550,300
";

    #[test]
    fn reads_records_after_header() {
        let trades = read_trades(TWO_TRADES.as_bytes()).unwrap();
        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].id, "T1");
        assert_eq!(
            trades[0].scenario_pnl,
            vec![100.0, 200.0, 250.0, 300.0, 400.0, 500.0]
        );
        assert_eq!(trades[1].realized_pnl, 300.0);
    }

    #[test]
    fn header_only_file_is_empty() {
        let trades = read_trades("trade_id,pnl_vector,pnl\n".as_bytes()).unwrap();
        assert!(trades.is_empty());
    }

    #[test]
    fn whitespace_around_fields_is_trimmed() {
        let data = "id,v,p\n T1 , 1 ; 2 ; 3 , 2 \n";
        let trades = read_trades(data.as_bytes()).unwrap();
        assert_eq!(trades[0].id, "T1");
        assert_eq!(trades[0].scenario_pnl, vec![1.0, 2.0, 3.0]);
        assert_eq!(trades[0].realized_pnl, 2.0);
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        let data = "id,v,p\nT1,1;2;3\n";
        match read_trades(data.as_bytes()) {
            Err(LoadError::MalformedRow { line, found }) => {
                assert_eq!(line, 2);
                assert_eq!(found, 2);
            }
            other => panic!("expected MalformedRow, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_scenario_reports_line_and_field() {
        let data = "id,v,p\nT1,1;2;3,2\nT2,1;oops;3,2\n";
        match read_trades(data.as_bytes()) {
            Err(LoadError::InvalidValue {
                line,
                field,
                source,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(field, "scenario values");
                assert_eq!(source, ValueError::InvalidNumber("oops".into()));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_realized_pnl_rejected() {
        let data = "id,v,p\nT1,1;2;3,two\n";
        let err = read_trades(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("realized P&L"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_trades(Path::new("/definitely/not/here/trades.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
