//! Command-line parsing for the temperature forecaster.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the prediction and reporting code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tempcast", version, about = "Daily temperature forecast with chart and PDF report")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict temperatures, print the table, and write the PDF report.
    Predict(PredictArgs),
    /// Print the prediction table only (no chart, no report).
    Table(PredictArgs),
}

/// Options shared by `predict` and `table`.
#[derive(Debug, Parser, Clone)]
pub struct PredictArgs {
    /// First day of the forecast (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "DATE")]
    pub start: Option<NaiveDate>,

    /// Last day of the forecast, inclusive (YYYY-MM-DD). Defaults to start + 6 days.
    #[arg(long, value_name = "DATE")]
    pub end: Option<NaiveDate>,

    /// Relative humidity in percent (30-100).
    #[arg(long, default_value_t = 60.0)]
    pub humidity: f64,

    /// Wind speed in km/h (0-50).
    #[arg(long, default_value_t = 10.0)]
    pub wind_speed: f64,

    /// Model JSON file. Defaults to $TEMPCAST_MODEL, then `temperature_model.json`.
    #[arg(long, value_name = "JSON")]
    pub model: Option<PathBuf>,

    /// Where to write the PDF report.
    #[arg(short = 'o', long, default_value = "Temperature_Prediction_Report.pdf")]
    pub output: PathBuf,

    /// Also write the chart PNG to this path.
    #[arg(long, value_name = "PNG")]
    pub chart: Option<PathBuf>,

    /// Export the prediction table to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// TrueType font for chart text. Defaults to $TEMPCAST_FONT, then common system fonts.
    #[arg(long, value_name = "TTF")]
    pub font: Option<PathBuf>,

    /// Chart width (pixels).
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    /// Chart height (pixels).
    #[arg(long, default_value_t = 400)]
    pub height: u32,

    /// Do not print the prediction table.
    #[arg(long)]
    pub no_table: bool,
}
