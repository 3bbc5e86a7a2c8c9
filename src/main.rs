//! CLI entry point for the emissions rater.
//!
//! Provides subcommands for serving the JSON report endpoints, analyzing a
//! single dataset file, and forecasting its daily series.

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use emissions_rater::analyzers::analyzer::{analyze, forecast_source};
use emissions_rater::analyzers::forecast::{DEFAULT_HORIZON, parse_horizon};
use emissions_rater::analyzers::period::WeekNumbering;
use emissions_rater::config::{
    AppConfig, DEFAULT_BIND, DEFAULT_CARBON_DATASET, DEFAULT_URBAN_DATASET,
};
use emissions_rater::output::{print_json, write_daily_csv, write_json};
use emissions_rater::server::{ApiState, router};
use emissions_rater::source::FileSource;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "emissions_rater")]
#[command(about = "Aggregate and forecast dated emissions datasets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the report and forecast endpoints over HTTP
    Serve(ServeArgs),
    /// Analyze a dataset file and log the report as JSON
    Analyze {
        /// Path to the CSV (or .csv.gz) dataset
        #[arg(value_name = "FILE")]
        source: String,

        /// Optional: write the daily series to this CSV file
        #[arg(short, long)]
        output: Option<String>,

        /// Optional: write the full report to this JSON file
        #[arg(long)]
        json: Option<String>,

        /// Week bucketing scheme: legacy or iso8601
        #[arg(short, long, default_value_t = WeekNumbering::Legacy)]
        week_numbering: WeekNumbering,
    },
    /// Project a dataset's daily series with a linear fit
    Forecast {
        /// Path to the CSV (or .csv.gz) dataset
        #[arg(value_name = "FILE")]
        source: String,

        /// Number of days to project
        #[arg(long, default_value_t = DEFAULT_HORIZON, value_parser = parse_horizon)]
        horizon: usize,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND)]
    bind: String,

    /// Dataset behind /api/carbon/*
    #[arg(long, env = "CARBON_DATASET", default_value = DEFAULT_CARBON_DATASET)]
    carbon_dataset: PathBuf,

    /// Dataset behind /api/urban/*
    #[arg(long, env = "URBAN_DATASET", default_value = DEFAULT_URBAN_DATASET)]
    urban_dataset: PathBuf,

    /// Week bucketing scheme: legacy or iso8601
    #[arg(long, env = "WEEK_NUMBERING", default_value_t = WeekNumbering::Legacy)]
    week_numbering: WeekNumbering,

    /// Number of days projected by /api/carbon/forecast
    #[arg(
        long,
        env = "FORECAST_HORIZON",
        default_value_t = DEFAULT_HORIZON,
        value_parser = parse_horizon
    )]
    forecast_horizon: usize,
}

impl From<ServeArgs> for AppConfig {
    fn from(args: ServeArgs) -> Self {
        AppConfig {
            bind: args.bind,
            carbon_dataset: args.carbon_dataset,
            urban_dataset: args.urban_dataset,
            week_numbering: args.week_numbering,
            forecast_horizon: args.forecast_horizon,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/emissions_rater.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("emissions_rater.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            serve(args.into()).await?;
        }
        Commands::Analyze {
            source,
            output,
            json,
            week_numbering,
        } => {
            let report = analyze(&FileSource::new(&source), week_numbering).await?;
            print_json(&report)?;

            if let Some(path) = output {
                write_daily_csv(&path, &report)?;
                info!(path = %path, "Daily series written");
            }
            if let Some(path) = json {
                write_json(&path, &report)?;
                info!(path = %path, "Report written");
            }
        }
        Commands::Forecast { source, horizon } => {
            match forecast_source(&FileSource::new(&source), horizon).await? {
                Some(forecast) => print_json(&forecast)?,
                None => bail!("'{source}' needs at least two dated days to forecast"),
            }
        }
    }

    Ok(())
}

/// Binds the HTTP listener and serves until Ctrl+C.
#[tracing::instrument(skip_all, fields(bind = %config.bind))]
async fn serve(config: AppConfig) -> Result<()> {
    let app = router(ApiState::from_config(&config));

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    info!(
        carbon_dataset = %config.carbon_dataset.display(),
        urban_dataset = %config.urban_dataset.display(),
        week_numbering = %config.week_numbering,
        "Listening on http://{}",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
