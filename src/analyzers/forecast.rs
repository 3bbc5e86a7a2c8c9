//! Naive linear projection of the daily emissions series.
//!
//! Ordinary least squares over `x = 1..=n`, extrapolated a few steps ahead.
//! No seasonality and no intervals: callers should present the result as a
//! rough indication only.

use crate::analyzers::period::Day;
use chrono::Days;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default number of projected steps.
pub const DEFAULT_HORIZON: usize = 7;

/// Upper bound on projected steps; larger requests are clamped.
pub const MAX_HORIZON: usize = 365;

/// `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Fits `values[i]` against `x = i + 1`.
    ///
    /// Returns `None` for fewer than two values, where the regression is
    /// undefined.
    pub fn fit(values: &[f64]) -> Option<LinearFit> {
        if values.len() < 2 {
            return None;
        }

        let n = values.len() as f64;
        let (mut sum_x, mut sum_y) = (0.0_f64, 0.0_f64);
        let (mut sum_xy, mut sum_x2) = (0.0_f64, 0.0_f64);
        for (i, &y) in values.iter().enumerate() {
            let x = (i + 1) as f64;
            sum_x += x;
            sum_y += y;
            sum_xy += x * y;
            sum_x2 += x * x;
        }

        let denom = n * sum_x2 - sum_x * sum_x;
        let slope = (n * sum_xy - sum_x * sum_y) / denom;
        let intercept = (sum_y - slope * sum_x) / n;

        Some(LinearFit { slope, intercept })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Heuristic confidence in percent: steeper slopes read as less certain.
///
/// Not a statistical measure.
pub fn confidence(slope: f64) -> f64 {
    (100.0 - slope.abs() * 10.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub step: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<Day>,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub slope: f64,
    pub intercept: f64,
    pub confidence: f64,
    pub history: usize,
    pub points: Vec<ForecastPoint>,
}

/// Projects `horizon` values past the end of `values`.
///
/// Returns `None` when fewer than two values are available. `horizon` is
/// capped at [`MAX_HORIZON`].
pub fn forecast(values: &[f64], horizon: usize) -> Option<Forecast> {
    let fit = LinearFit::fit(values)?;
    let n = values.len();
    let horizon = horizon.min(MAX_HORIZON);

    let points = (1..=horizon)
        .map(|k| ForecastPoint {
            step: n + k,
            date: None,
            value: fit.predict((n + k) as f64),
        })
        .collect();

    Some(Forecast {
        slope: fit.slope,
        intercept: fit.intercept,
        confidence: confidence(fit.slope),
        history: n,
        points,
    })
}

/// Like [`forecast`], over a daily bucket map, labelling each point with the
/// calendar day following the last observed one.
///
/// Gaps in the observed days are ignored: the series is treated as
/// consecutive steps.
pub fn forecast_daily(daily: &BTreeMap<Day, f64>, horizon: usize) -> Option<Forecast> {
    let values: Vec<f64> = daily.values().copied().collect();
    let mut result = forecast(&values, horizon)?;

    if let Some(last) = daily.keys().next_back() {
        for (k, point) in result.points.iter_mut().enumerate() {
            point.date = last
                .date()
                .checked_add_days(Days::new(k as u64 + 1))
                .map(Day);
        }
    }

    Some(result)
}

/// Parses a horizon argument, accepting `1..=MAX_HORIZON`.
pub fn parse_horizon(raw: &str) -> anyhow::Result<usize> {
    let horizon: usize = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("'{raw}' is not a whole number of days"))?;
    anyhow::ensure!(
        (1..=MAX_HORIZON).contains(&horizon),
        "horizon must be between 1 and {MAX_HORIZON} days, got {horizon}"
    );
    Ok(horizon)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_fit_requires_two_values() {
        assert!(LinearFit::fit(&[]).is_none());
        assert!(LinearFit::fit(&[3.0]).is_none());
        assert!(forecast(&[3.0], DEFAULT_HORIZON).is_none());
    }

    #[test]
    fn test_fit_unit_slope() {
        let fc = forecast(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0], DEFAULT_HORIZON).unwrap();

        assert!((fc.slope - 1.0).abs() < EPS);
        assert!(fc.intercept.abs() < EPS);
        let values: Vec<f64> = fc.points.iter().map(|p| p.value).collect();
        for (got, want) in values.iter().zip(8..=14) {
            assert!((got - want as f64).abs() < EPS, "got {got}, want {want}");
        }
        assert_eq!(fc.points.first().map(|p| p.step), Some(8));
    }

    #[test]
    fn test_recovers_arbitrary_line() {
        let (a, b) = (-2.5, 40.0);
        let series: Vec<f64> = (1..=20).map(|i| a * i as f64 + b).collect();
        let fit = LinearFit::fit(&series).unwrap();

        assert!((fit.slope - a).abs() < 1e-9);
        assert!((fit.intercept - b).abs() < 1e-9);

        let fc = forecast(&series, 3).unwrap();
        for p in &fc.points {
            assert!((p.value - (a * p.step as f64 + b)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_constant_series_has_zero_slope() {
        let fc = forecast(&[5.0, 5.0, 5.0], 2).unwrap();
        assert!(fc.slope.abs() < EPS);
        assert!((fc.confidence - 100.0).abs() < EPS);
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(confidence(0.0), 100.0);
        assert_eq!(confidence(-3.0), 70.0);
        assert_eq!(confidence(25.0), 0.0);
    }

    #[test]
    fn test_forecast_daily_labels_dates() {
        let mut daily = BTreeMap::new();
        daily.insert(Day::parse("2024-02-27").unwrap(), 1.0);
        daily.insert(Day::parse("2024-02-28").unwrap(), 2.0);

        let fc = forecast_daily(&daily, 2).unwrap();
        let dates: Vec<String> = fc
            .points
            .iter()
            .filter_map(|p| p.date.map(|d| d.to_string()))
            .collect();

        assert_eq!(dates, vec!["2024-02-29", "2024-03-01"]);
    }

    #[test]
    fn test_huge_horizon_is_capped() {
        let fc = forecast(&[1.0, 2.0], usize::MAX).unwrap();

        assert_eq!(fc.points.len(), MAX_HORIZON);
        assert_eq!(fc.points.last().map(|p| p.step), Some(2 + MAX_HORIZON));
    }

    #[test]
    fn test_parse_horizon_bounds() {
        assert_eq!(parse_horizon("7").unwrap(), 7);
        assert_eq!(parse_horizon("365").unwrap(), MAX_HORIZON);
        assert!(parse_horizon("0").is_err());
        assert!(parse_horizon("366").is_err());
        assert!(parse_horizon("18446744073709551615").is_err());
        assert!(parse_horizon("-1").is_err());
        assert!(parse_horizon("week").is_err());
    }
}
