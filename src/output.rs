//! Output formatting and persistence for emissions reports.
//!
//! Supports pretty-printing, JSON files, and a CSV export of the daily series.

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::{DailyRow, EmissionsReport};
use csv::WriterBuilder;
use std::fs::File;

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes any serializable value to `path` as pretty-printed JSON, replacing
/// any existing file.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    debug!(path, "JSON written");
    Ok(())
}

/// Writes the report's daily series to a CSV file with a
/// `date,emissions_kg` header, one row per day in chronological order.
pub fn write_daily_csv(path: &str, report: &EmissionsReport) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for (day, kg) in &report.daily {
        writer.serialize(DailyRow {
            date: day.to_string(),
            emissions_kg: *kg,
        })?;
    }
    writer.flush()?;

    debug!(path, rows = report.daily.len(), "Daily CSV written");
    Ok(())
}
