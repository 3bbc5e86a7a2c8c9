//! Routes: /health, /api/carbon/csv-analysis, /api/urban/csv-analysis and
//! /api/carbon/forecast

use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::analyzers::analyzer::{analyze, forecast_source};
use crate::analyzers::forecast::Forecast;
use crate::analyzers::period::WeekNumbering;
use crate::analyzers::types::EmissionsReport;
use crate::config::AppConfig;
use crate::server::error::ApiError;
use crate::source::{DatasetSource, FileSource};

/// Read-only state shared by all handlers.
#[derive(Clone)]
pub struct ApiState {
    pub carbon: Arc<dyn DatasetSource>,
    pub urban: Arc<dyn DatasetSource>,
    pub week_numbering: WeekNumbering,
    pub forecast_horizon: usize,
}

impl ApiState {
    /// File-backed state for the datasets named in `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        ApiState {
            carbon: Arc::new(FileSource::new(&config.carbon_dataset)),
            urban: Arc::new(FileSource::new(&config.urban_dataset)),
            week_numbering: config.week_numbering,
            forecast_horizon: config.forecast_horizon,
        }
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/carbon/csv-analysis", get(carbon_analysis))
        .route("/api/urban/csv-analysis", get(urban_analysis))
        .route("/api/carbon/forecast", get(carbon_forecast))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Full report over the carbon-tracking dataset.
pub async fn carbon_analysis(
    State(state): State<ApiState>,
) -> Result<Json<EmissionsReport>, ApiError> {
    analyze(state.carbon.as_ref(), state.week_numbering)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to analyze carbon CSV", e))
}

/// Full report over the urban-planning dataset.
pub async fn urban_analysis(
    State(state): State<ApiState>,
) -> Result<Json<EmissionsReport>, ApiError> {
    analyze(state.urban.as_ref(), state.week_numbering)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal("Failed to analyze urban CSV", e))
}

/// Linear projection of the carbon dataset's daily series.
pub async fn carbon_forecast(State(state): State<ApiState>) -> Result<Json<Forecast>, ApiError> {
    let forecast = forecast_source(state.carbon.as_ref(), state.forecast_horizon)
        .await
        .map_err(|e| ApiError::internal("Failed to forecast carbon emissions", e))?;

    forecast
        .map(Json)
        .ok_or_else(|| ApiError::unprocessable("At least two days of data are needed to forecast"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::trend::Trend;
    use crate::source::InlineSource;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    fn state(carbon: &str, urban: &str) -> ApiState {
        ApiState {
            carbon: Arc::new(InlineSource::new(carbon)),
            urban: Arc::new(InlineSource::new(urban)),
            week_numbering: WeekNumbering::Legacy,
            forecast_horizon: 7,
        }
    }

    #[tokio::test]
    async fn test_carbon_analysis() {
        let st = state("date,emissions_kg\n2024-01-01,10\n2024-01-02,20\n", "");
        let Json(report) = carbon_analysis(State(st)).await.unwrap();

        assert_eq!(report.total_emissions, 30.0);
        assert_eq!(report.trend, Trend::Flat);
    }

    #[tokio::test]
    async fn test_urban_analysis_uses_urban_dataset() {
        let st = state("", "date,emissions\n2024-05-01,7\n");
        let Json(report) = urban_analysis(State(st)).await.unwrap();

        assert_eq!(report.total_emissions, 7.0);
    }

    #[tokio::test]
    async fn test_forecast_insufficient_data_is_422() {
        let st = state("date,emissions_kg\n2024-01-01,10\n", "");
        let err = carbon_forecast(State(st)).await.unwrap_err();

        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_forecast_ok() {
        let st = state("date,emissions_kg\n2024-01-01,1\n2024-01-02,2\n2024-01-03,3\n", "");
        let Json(fc) = carbon_forecast(State(st)).await.unwrap();

        assert_eq!(fc.points.len(), 7);
        assert!((fc.points[0].value - 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_missing_dataset_is_500() {
        let st = ApiState {
            carbon: Arc::new(FileSource::new("/nonexistent/emissions.csv")),
            ..state("", "")
        };
        let err = carbon_analysis(State(st)).await.unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.details.unwrap().contains("failed to read dataset"));
    }
}
