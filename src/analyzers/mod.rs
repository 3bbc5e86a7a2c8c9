//! Emissions aggregation, trend classification and forecasting.
//!
//! Parsed records are summed into daily, weekly and monthly buckets, the
//! daily series is labelled increasing / decreasing / flat, and a linear
//! fit projects it a few days ahead.

pub mod aggregate;
pub mod analyzer;
pub mod forecast;
pub mod period;
pub mod trend;
pub mod types;
pub mod utility;
