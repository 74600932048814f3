//! Report export: JSON report, per-trade CSV breakdown and sweep tables.
//!
//! Persisted reports carry a `schema_version`. Newer versions than this build
//! understands are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::runner::{PortfolioReport, SCHEMA_VERSION};
use crate::sweep::SweepPoint;

/// Files written by [`save_report`].
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub report_json: PathBuf,
    pub contributions_csv: PathBuf,
}

// ─── JSON ───────────────────────────────────────────────────────────

/// Serialize a report to pretty JSON.
pub fn export_json(report: &PortfolioReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize PortfolioReport to JSON")
}

/// Deserialize a report, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<PortfolioReport> {
    let report: PortfolioReport =
        serde_json::from_str(json).context("failed to deserialize PortfolioReport from JSON")?;
    if report.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            report.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(report)
}

pub fn write_report_json(path: &Path, report: &PortfolioReport) -> Result<()> {
    let json = export_json(report)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write report JSON {}", path.display()))?;
    Ok(())
}

// ─── CSV ────────────────────────────────────────────────────────────

/// Per-trade breakdown as CSV.
///
/// Columns: trade_id, realized_pnl, var
pub fn export_contributions_csv(report: &PortfolioReport) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["trade_id", "realized_pnl", "var"])?;

    for c in &report.portfolio.contributions {
        wtr.write_record([
            c.trade_id.clone(),
            c.realized_pnl.to_string(),
            c.var.to_string(),
        ])?;
    }

    finish_csv(wtr)
}

pub fn write_contributions_csv(path: &Path, report: &PortfolioReport) -> Result<()> {
    let csv = export_contributions_csv(report)?;
    std::fs::write(path, csv)
        .with_context(|| format!("failed to write contributions CSV {}", path.display()))?;
    Ok(())
}

/// Sweep points as CSV. Failed levels leave `total` empty and fill `error`.
///
/// Columns: confidence_level, total, error
pub fn export_sweep_csv(points: &[SweepPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["confidence_level", "total", "error"])?;

    for p in points {
        wtr.write_record([
            p.confidence_level.to_string(),
            p.total.map(|t| t.to_string()).unwrap_or_default(),
            p.error.clone().unwrap_or_default(),
        ])?;
    }

    finish_csv(wtr)
}

fn finish_csv(wtr: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

// ─── Artifact directory ─────────────────────────────────────────────

/// Write `report.json` and `contributions.csv` into `output_dir`, creating it
/// if needed.
pub fn save_report(output_dir: &Path, report: &PortfolioReport) -> Result<ReportPaths> {
    std::fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "failed to create report output directory {}",
            output_dir.display()
        )
    })?;

    let report_json = output_dir.join("report.json");
    write_report_json(&report_json, report)?;

    let contributions_csv = output_dir.join("contributions.csv");
    write_contributions_csv(&contributions_csv, report)?;

    tracing::info!(dir = %output_dir.display(), "saved report artifacts");
    Ok(ReportPaths {
        report_json,
        contributions_csv,
    })
}
