//! CSV parser for emission datasets.

use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::record::EmissionRecord;

/// Column positions resolved from the header row.
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    emissions_kg: Option<usize>,
    emissions: Option<usize>,
    amount: Option<usize>,
    category: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Columns {
            date: find("date"),
            emissions_kg: find("emissions_kg"),
            emissions: find("emissions"),
            amount: find("amount"),
            category: find("category"),
        }
    }
}

/// Parses a number, treating anything unparseable, absent or non-finite as `0.0`.
///
/// Lenient on purpose: one bad cell must not abort a whole report.
pub fn parse_numeric_or_default(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn cell<'a>(row: &'a StringRecord, idx: Option<usize>) -> &'a str {
    idx.and_then(|i| row.get(i)).unwrap_or("")
}

/// Parses comma-separated text with a header row into [`EmissionRecord`]s.
///
/// Blank lines are skipped. Each line is one row split on `,`; quote
/// characters are ordinary text. Short rows yield empty cells for the missing
/// columns; long rows are accepted and the extra cells ignored.
///
/// # Errors
///
/// Returns an error only if the underlying CSV reader fails (e.g. invalid
/// UTF-8 in a field); cell contents never cause an error.
pub fn parse_records(text: &str) -> Result<Vec<EmissionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let columns = Columns::from_headers(rdr.headers().context("reading CSV header row")?);
    debug!(?columns, "Resolved dataset columns");

    let mut records = Vec::new();
    for (line, result) in rdr.records().enumerate() {
        let row = result.with_context(|| format!("reading CSV row {}", line + 1))?;

        let emissions = match cell(&row, columns.emissions_kg) {
            "" => cell(&row, columns.emissions),
            value => value,
        };

        records.push(
            EmissionRecord::new(cell(&row, columns.date), parse_numeric_or_default(emissions))
                .with_category(cell(&row, columns.category))
                .with_amount(parse_numeric_or_default(cell(&row, columns.amount))),
        );
    }

    debug!(rows = records.len(), "Parsed emission records");
    Ok(records)
}
