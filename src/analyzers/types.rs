//! Data types served by the reporting endpoints.

use crate::analyzers::period::{Day, Month, Week};
use crate::analyzers::trend::Trend;
use crate::record::EmissionRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Full emissions summary for one dataset, serialized as the response body of
/// the `csv-analysis` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionsReport {
    pub total_emissions: f64,
    pub daily: BTreeMap<Day, f64>,
    pub weekly: BTreeMap<Week, f64>,
    pub monthly: BTreeMap<Month, f64>,
    pub trend: Trend,
    pub sample: Vec<EmissionRecord>,

    pub total_records: usize,
    pub undated_records: usize,
    pub average_daily: f64,
    pub by_category: BTreeMap<String, f64>,
}

/// One row of the daily-series CSV export.
#[derive(Debug, Serialize)]
pub struct DailyRow {
    pub date: String,
    pub emissions_kg: f64,
}
