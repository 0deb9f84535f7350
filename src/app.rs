//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - resolves and checks the run configuration
//! - loads the model once and hands it to the pipeline
//! - prints the prediction table
//! - writes the report and optional exports

use std::path::PathBuf;

use chrono::{Days, Local, NaiveDate};
use clap::Parser;
use log::info;

use crate::cli::{Command, PredictArgs};
use crate::domain::{Covariates, DateRange, ForecastConfig, ForecastRequest, PredictionSeries, VariationRecord};
use crate::error::AppError;
use crate::plot::PlottersChart;
use crate::report::{format_run_summary, format_table, series_stats};

pub mod pipeline;

/// Environment variable naming the default model file.
pub const MODEL_ENV: &str = "TEMPCAST_MODEL";
/// Environment variable naming the chart font file.
pub const FONT_ENV: &str = "TEMPCAST_FONT";
pub const DEFAULT_MODEL_PATH: &str = "temperature_model.json";

/// Accepted humidity (%) at the input layer.
pub const HUMIDITY_BOUNDS: (f64, f64) = (30.0, 100.0);
/// Accepted wind speed (km/h) at the input layer.
pub const WIND_SPEED_BOUNDS: (f64, f64) = (0.0, 50.0);

/// Days added to the start date when `--end` is omitted.
const DEFAULT_SPAN_DAYS: u64 = 6;

/// Entry point for the `tempcast` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Predict(args) => handle_predict(args, OutputMode::Full),
        Command::Table(args) => handle_predict(args, OutputMode::TableOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    TableOnly,
}

fn handle_predict(args: PredictArgs, mode: OutputMode) -> Result<(), AppError> {
    let today = Local::now().date_naive();
    let config = config_from_args(&args, today, |key| std::env::var(key).ok())?;

    // Loaded once per process and passed down; nothing global.
    let model = crate::io::read_model_json(&config.model_path)?;

    match mode {
        OutputMode::TableOnly => {
            let out = pipeline::run_predictions(&config.request, &model)?;
            print_table(&config, &out.range, &out.series, &out.variations);
            export_csv(&config, &out.variations)?;
        }
        OutputMode::Full => {
            let renderer = PlottersChart {
                width: config.chart_width,
                height: config.chart_height,
                font_path: config.font_path.clone(),
            };
            let run = pipeline::run_forecast(&config.request, &model, &renderer)?;
            print_table(&config, &run.range, &run.series, &run.variations);

            crate::io::write_bytes(&config.output, &run.report.bytes, "report")?;
            if let Some(path) = &config.export_chart {
                crate::io::write_bytes(path, &run.chart.png, "chart")?;
            }
            export_csv(&config, &run.variations)?;

            println!("Report written to {}", config.output.display());
        }
    }

    Ok(())
}

fn print_table(
    config: &ForecastConfig,
    range: &DateRange,
    series: &PredictionSeries,
    variations: &[VariationRecord],
) {
    if !config.show_table {
        return;
    }
    let stats = series_stats(series);
    println!(
        "{}",
        format_run_summary(range, config.request.covariates, stats.as_ref())
    );
    println!("{}", format_table(variations));
}

fn export_csv(config: &ForecastConfig, variations: &[VariationRecord]) -> Result<(), AppError> {
    if let Some(path) = &config.export_csv {
        crate::io::write_predictions_csv(path, variations)?;
    }
    Ok(())
}

/// Resolve CLI flags, environment and defaults into a run configuration.
///
/// `env` looks up environment variables (after `.env` has been loaded). The
/// date range itself is not checked here; the pipeline rejects an inverted
/// range.
pub fn config_from_args(
    args: &PredictArgs,
    today: NaiveDate,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ForecastConfig, AppError> {
    check_bounds("Humidity", args.humidity, HUMIDITY_BOUNDS)?;
    check_bounds("Wind speed", args.wind_speed, WIND_SPEED_BOUNDS)?;

    let start = args.start.unwrap_or(today);
    let end = match args.end {
        Some(end) => end,
        None => start
            .checked_add_days(Days::new(DEFAULT_SPAN_DAYS))
            .ok_or_else(|| AppError::new(2, format!("Start date {start} is out of range.")))?,
    };

    let model_path = args
        .model
        .clone()
        .or_else(|| env(MODEL_ENV).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));
    let font_path = args.font.clone().or_else(|| env(FONT_ENV).map(PathBuf::from));

    let config = ForecastConfig {
        request: ForecastRequest {
            start,
            end,
            covariates: Covariates {
                humidity: args.humidity,
                wind_speed: args.wind_speed,
            },
        },
        model_path,
        font_path,
        chart_width: args.width,
        chart_height: args.height,
        show_table: !args.no_table,
        output: args.output.clone(),
        export_chart: args.chart.clone(),
        export_csv: args.export.clone(),
    };
    info!(
        "forecast {} to {} (humidity {}%, wind {} km/h), model {}",
        config.request.start,
        config.request.end,
        args.humidity,
        args.wind_speed,
        config.model_path.display()
    );
    Ok(config)
}

fn check_bounds(name: &str, value: f64, (lo, hi): (f64, f64)) -> Result<(), AppError> {
    if !(lo..=hi).contains(&value) {
        return Err(AppError::new(
            2,
            format!("{name} must be between {lo} and {hi}, got {value}."),
        ));
    }
    Ok(())
}

/// Rewrite argv so `tempcast` defaults to `tempcast predict`.
///
/// Rules:
/// - `tempcast`                       -> `tempcast predict`
/// - `tempcast --humidity 70 ...`     -> `tempcast predict --humidity 70 ...`
/// - `tempcast --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("predict".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "predict" | "table");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "predict flags".
    if arg1.starts_with('-') {
        argv.insert(1, "predict".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}
