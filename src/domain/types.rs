//! Shared domain types.
//!
//! Every run builds these fresh and drops them once the report exists; none
//! of them is persisted by the pipeline itself.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};

use crate::error::PipelineError;

/// An inclusive, validated range of calendar days.
///
/// The only constructor rejects `start > end`; a range is never swapped or
/// clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PipelineError> {
        if start > end {
            return Err(PipelineError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included.
    pub fn day_count(&self) -> usize {
        (self.end - self.start).num_days() as usize + 1
    }

    /// Every day from `start` to `end` inclusive, ascending.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// The two scalar weather inputs, broadcast to every day of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Covariates {
    /// Relative humidity (%).
    pub humidity: f64,
    /// Wind speed (km/h).
    pub wind_speed: f64,
}

/// One model input row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub date: NaiveDate,
    pub humidity: f64,
    pub wind_speed: f64,
    /// 1-based ordinal day within the year (1..=366).
    pub day_of_year: u32,
}

impl FeatureRow {
    pub fn new(date: NaiveDate, covariates: Covariates) -> Self {
        Self {
            date,
            humidity: covariates.humidity,
            wind_speed: covariates.wind_speed,
            day_of_year: date.ordinal(),
        }
    }

    /// Row in predictor column order: `[humidity, wind_speed, day_of_year]`.
    pub fn as_array(&self) -> [f64; 3] {
        [self.humidity, self.wind_speed, f64::from(self.day_of_year)]
    }
}

/// Ordered feature rows, one per day of the range.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureMatrix {
    pub rows: Vec<FeatureRow>,
}

impl FeatureMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Numeric view handed to the predictor.
    pub fn to_arrays(&self) -> Vec<[f64; 3]> {
        self.rows.iter().map(FeatureRow::as_array).collect()
    }
}

/// A predicted temperature for one day, rounded to 2 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionRecord {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Predictions in the same order as the feature matrix they came from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PredictionSeries {
    pub records: Vec<PredictionRecord>,
}

impl PredictionSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.temperature)
    }
}

/// A prediction paired with its change from the previous day.
///
/// `change` is `None` for the first day of a series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariationRecord {
    pub date: NaiveDate,
    pub temperature: f64,
    pub change: Option<f64>,
}

/// A rendered chart, PNG-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The text the report lays out, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportContent {
    pub title: String,
    pub parameter_lines: Vec<String>,
    pub ledger_heading: String,
    pub ledger_lines: Vec<String>,
}

/// The finished PDF plus the content it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifact {
    pub bytes: Vec<u8>,
    pub content: ReportContent,
    /// Number of pages in the PDF.
    pub pages: usize,
}

/// Raw inputs of one forecast run.
///
/// Dates are kept unvalidated here so the pipeline itself is the one refusing
/// an inverted range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub covariates: Covariates,
}

impl ForecastRequest {
    pub fn range(&self) -> Result<DateRange, PipelineError> {
        DateRange::new(self.start, self.end)
    }
}

/// A full run's configuration as understood by the front-end.
///
/// This is derived from CLI flags, environment (`.env`) and defaults.
#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub request: ForecastRequest,
    pub model_path: PathBuf,
    pub font_path: Option<PathBuf>,
    pub chart_width: u32,
    pub chart_height: u32,

    pub show_table: bool,
    pub output: PathBuf,
    pub export_chart: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn date_range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2024, 1, 3), date(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InvalidRange {
                start: date(2024, 1, 3),
                end: date(2024, 1, 1),
            }
        );
    }

    #[test]
    fn date_range_days_are_inclusive() {
        let range = DateRange::new(date(2023, 12, 30), date(2024, 1, 2)).unwrap();
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(range.day_count(), 4);
        assert_eq!(days.first(), Some(&date(2023, 12, 30)));
        assert_eq!(days.last(), Some(&date(2024, 1, 2)));
    }

    #[test]
    fn feature_row_array_order() {
        let row = FeatureRow::new(
            date(2024, 12, 31),
            Covariates {
                humidity: 60.0,
                wind_speed: 10.0,
            },
        );
        assert_eq!(row.as_array(), [60.0, 10.0, 366.0]);
    }
}
