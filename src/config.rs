//! Process-wide settings, built once at startup and handed to the server.

use crate::analyzers::forecast::DEFAULT_HORIZON;
use crate::analyzers::period::WeekNumbering;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "0.0.0.0:5050";
pub const DEFAULT_CARBON_DATASET: &str = "data/enhanced_carbon_emissions_data.csv";
pub const DEFAULT_URBAN_DATASET: &str = "data/carbon_emissions_with_energy.csv";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind: String,
    pub carbon_dataset: PathBuf,
    pub urban_dataset: PathBuf,
    pub week_numbering: WeekNumbering,
    pub forecast_horizon: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            bind: DEFAULT_BIND.to_string(),
            carbon_dataset: PathBuf::from(DEFAULT_CARBON_DATASET),
            urban_dataset: PathBuf::from(DEFAULT_URBAN_DATASET),
            week_numbering: WeekNumbering::Legacy,
            forecast_horizon: DEFAULT_HORIZON,
        }
    }
}
