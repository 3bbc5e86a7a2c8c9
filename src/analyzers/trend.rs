use crate::analyzers::utility::mean;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of buckets averaged at each end of the series.
pub const TREND_WINDOW: usize = 7;

/// Direction of a daily emissions series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Flat,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => f.write_str("increasing"),
            Trend::Decreasing => f.write_str("decreasing"),
            Trend::Flat => f.write_str("flat"),
        }
    }
}

/// Classifies a chronologically ordered series by comparing the mean of its
/// first [`TREND_WINDOW`] values with the mean of its last ones.
///
/// | Condition                     | Trend      |
/// |-------------------------------|------------|
/// | last > first * 1.05           | increasing |
/// | last < first * 0.95           | decreasing |
/// | otherwise                     | flat       |
///
/// Shorter series use overlapping windows; an empty series is flat.
pub fn classify(series: &[f64]) -> Trend {
    let head = &series[..series.len().min(TREND_WINDOW)];
    let tail = &series[series.len().saturating_sub(TREND_WINDOW)..];

    let avg_first = mean(head);
    let avg_last = mean(tail);

    match avg_last {
        l if l > avg_first * 1.05 => Trend::Increasing,
        l if l < avg_first * 0.95 => Trend::Decreasing,
        _ => Trend::Flat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_series_is_flat() {
        assert_eq!(classify(&[]), Trend::Flat);
    }

    #[test]
    fn test_constant_series_is_flat() {
        assert_eq!(classify(&[4.2; 30]), Trend::Flat);
    }

    #[test]
    fn test_two_points_use_identical_windows() {
        assert_eq!(classify(&[10.0, 20.0]), Trend::Flat);
    }

    #[test]
    fn test_increasing() {
        let mut series = vec![10.0; 7];
        series.extend([15.0; 7]);
        assert_eq!(classify(&series), Trend::Increasing);
    }

    #[test]
    fn test_decreasing() {
        let mut series = vec![10.0; 7];
        series.extend([9.0; 7]);
        assert_eq!(classify(&series), Trend::Decreasing);
    }

    #[test]
    fn test_threshold_boundaries() {
        let mut series = vec![100.0; 7];
        series.extend([105.0; 7]);
        assert_eq!(classify(&series), Trend::Flat);

        let mut series = vec![100.0; 7];
        series.extend([95.0; 7]);
        assert_eq!(classify(&series), Trend::Flat);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Increasing).unwrap(), "\"increasing\"");
    }
}
