use crate::analyzers::aggregate::{EmissionsAggregate, aggregate_records};
use crate::analyzers::forecast::{Forecast, forecast_daily};
use crate::analyzers::period::WeekNumbering;
use crate::analyzers::trend::classify;
use crate::analyzers::types::EmissionsReport;
use crate::analyzers::utility::ratio;
use crate::parser::parse_records;
use crate::source::DatasetSource;
use anyhow::Result;
use tracing::info;

/// Turns an aggregate into the served report, classifying the daily trend.
pub fn build_report(agg: EmissionsAggregate) -> EmissionsReport {
    let trend = classify(&agg.daily_series());
    let average_daily = ratio(agg.total, agg.record_count);

    EmissionsReport {
        total_emissions: agg.total,
        daily: agg.daily,
        weekly: agg.weekly,
        monthly: agg.monthly,
        trend,
        sample: agg.sample,
        total_records: agg.record_count,
        undated_records: agg.undated_count,
        average_daily,
        by_category: agg.by_category,
    }
}

/// Parses, aggregates and classifies raw CSV text in one pass.
pub fn report_from_text(text: &str, weeks: WeekNumbering) -> Result<EmissionsReport> {
    let records = parse_records(text)?;
    Ok(build_report(aggregate_records(&records, weeks)))
}

/// Loads a dataset and computes its full report from scratch.
///
/// Nothing is cached: each call re-reads the source.
#[tracing::instrument(skip(source), fields(source = %source.describe()))]
pub async fn analyze<S: DatasetSource + ?Sized>(
    source: &S,
    weeks: WeekNumbering,
) -> Result<EmissionsReport> {
    let text = source.load().await?;
    let report = report_from_text(&text, weeks)?;

    info!(
        rows = report.total_records,
        days = report.daily.len(),
        undated = report.undated_records,
        total = report.total_emissions,
        trend = %report.trend,
        "Dataset analyzed"
    );
    Ok(report)
}

/// Loads a dataset and projects its daily series `horizon` days ahead.
///
/// `Ok(None)` means the dataset has fewer than two dated days.
#[tracing::instrument(skip(source), fields(source = %source.describe()))]
pub async fn forecast_source<S: DatasetSource + ?Sized>(
    source: &S,
    horizon: usize,
) -> Result<Option<Forecast>> {
    let text = source.load().await?;
    let records = parse_records(&text)?;
    // week numbering does not affect the daily series
    let agg = aggregate_records(&records, WeekNumbering::default());

    let result = forecast_daily(&agg.daily, horizon);
    match &result {
        Some(fc) => info!(history = fc.history, slope = fc.slope, "Forecast computed"),
        None => info!(days = agg.daily.len(), "Not enough daily data to forecast"),
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::trend::Trend;
    use crate::source::InlineSource;

    #[test]
    fn test_report_two_days() {
        let text = "date,emissions_kg\n2024-01-01,10\n2024-01-02,20\n";
        let report = report_from_text(text, WeekNumbering::Legacy).unwrap();

        assert_eq!(report.total_emissions, 30.0);
        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.trend, Trend::Flat);
        assert_eq!(report.average_daily, 15.0);
        assert_eq!(report.total_records, 2);
    }

    #[test]
    fn test_average_is_per_row() {
        let text = "date,emissions_kg\n2024-01-01,10\n2024-01-01,20\n,30\n";
        let report = report_from_text(text, WeekNumbering::Legacy).unwrap();

        assert_eq!(report.daily.len(), 1);
        assert_eq!(report.total_records, 3);
        assert_eq!(report.average_daily, 20.0);
    }

    #[test]
    fn test_report_json_shape() {
        let text = "date,emissions_kg\n2024-01-01,10\n,5\n";
        let report = report_from_text(text, WeekNumbering::Legacy).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["totalEmissions"], 15.0);
        assert_eq!(json["daily"]["2024-01-01"], 10.0);
        assert_eq!(json["weekly"]["2024-W1"], 10.0);
        assert_eq!(json["monthly"]["2024-01"], 10.0);
        assert_eq!(json["trend"], "flat");
        assert_eq!(json["sample"].as_array().map(|s| s.len()), Some(2));
        assert_eq!(json["undatedRecords"], 1);
        assert_eq!(json["byCategory"]["Other"], 15.0);
    }

    #[test]
    fn test_report_with_no_rows() {
        let report = report_from_text("date,emissions_kg\n", WeekNumbering::Legacy).unwrap();

        assert_eq!(report.total_emissions, 0.0);
        assert_eq!(report.average_daily, 0.0);
        assert_eq!(report.trend, Trend::Flat);
    }

    #[tokio::test]
    async fn test_analyze_inline_source() {
        let source = InlineSource::new("date,emissions_kg\n2024-02-01,abc\n");
        let report = analyze(&source, WeekNumbering::Legacy).await.unwrap();

        assert_eq!(report.total_emissions, 0.0);
        assert_eq!(report.daily.values().next(), Some(&0.0));
    }

    #[tokio::test]
    async fn test_forecast_source_needs_two_days() {
        let source = InlineSource::new("date,emissions_kg\n2024-01-01,10\n2024-01-01,3\n");
        assert!(forecast_source(&source, 7).await.unwrap().is_none());

        let source = InlineSource::new("date,emissions_kg\n2024-01-01,10\n2024-01-02,12\n");
        let fc = forecast_source(&source, 7).await.unwrap().unwrap();
        assert_eq!(fc.points.len(), 7);
        assert_eq!(fc.history, 2);
    }
}
