use crate::analyzers::period::{Day, Month, Week, WeekNumbering};
use crate::record::EmissionRecord;
use std::collections::BTreeMap;
use tracing::debug;

/// Number of leading records kept for the preview sample.
pub const SAMPLE_SIZE: usize = 10;

/// Bucketed sums over a set of [`EmissionRecord`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionsAggregate {
    pub total: f64,
    pub daily: BTreeMap<Day, f64>,
    pub weekly: BTreeMap<Week, f64>,
    pub monthly: BTreeMap<Month, f64>,
    pub by_category: BTreeMap<String, f64>,
    pub record_count: usize,

    // rows without a usable date: counted in `total`, absent from buckets
    pub undated_count: usize,
    pub undated_total: f64,

    pub sample: Vec<EmissionRecord>,
}

/// Sums emissions into daily, weekly and monthly buckets.
///
/// Every record counts toward `total` and its category. Records with an
/// empty or unparseable date are left out of all three bucket maps; every
/// other record lands in exactly one key of each.
pub fn aggregate_records(records: &[EmissionRecord], weeks: WeekNumbering) -> EmissionsAggregate {
    let mut agg = EmissionsAggregate {
        record_count: records.len(),
        sample: records.iter().take(SAMPLE_SIZE).cloned().collect(),
        ..Default::default()
    };

    for record in records {
        let kg = record.emissions_kg;
        agg.total += kg;
        *agg.by_category.entry(record.category.clone()).or_default() += kg;

        let Some(day) = Day::parse(&record.date) else {
            if !record.is_undated() {
                debug!(date = %record.date, "Unparseable date, row left out of buckets");
            }
            agg.undated_count += 1;
            agg.undated_total += kg;
            continue;
        };

        *agg.daily.entry(day).or_default() += kg;
        *agg.weekly.entry(weeks.week_of(day)).or_default() += kg;
        *agg.monthly.entry(Month::of(day)).or_default() += kg;
    }

    agg
}

impl EmissionsAggregate {
    /// Daily sums in chronological order.
    pub fn daily_series(&self) -> Vec<f64> {
        self.daily.values().copied().collect()
    }
}
