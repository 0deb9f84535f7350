//! Reporting: variations, formatted text, and the PDF report.
//!
//! We keep formatting code in one place so:
//! - the prediction code stays clean and testable
//! - output changes are localized (the ledger text is an external contract)

pub mod format;
pub mod pdf;

pub use format::*;
pub use pdf::*;

use log::debug;

use crate::domain::{PredictionSeries, VariationRecord};
use crate::math::round2;

/// Summary statistics over a prediction series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStats {
    pub n_days: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Compute the day-over-day change series.
///
/// Each record's change is its temperature minus the previous record's,
/// rounded to 2 decimals; the first record has none. The subtraction is purely
/// positional: dates are carried through, not re-checked for contiguity.
pub fn compute_variations(series: &PredictionSeries) -> Vec<VariationRecord> {
    let mut out = Vec::with_capacity(series.len());
    let mut prev: Option<f64> = None;
    for r in &series.records {
        out.push(VariationRecord {
            date: r.date,
            temperature: r.temperature,
            change: prev.map(|p| round2(r.temperature - p)),
        });
        prev = Some(r.temperature);
    }
    debug!("computed {} variation records", out.len());
    out
}

/// Min / max / mean of the predicted temperatures, or `None` for an empty series.
pub fn series_stats(series: &PredictionSeries) -> Option<SeriesStats> {
    if series.is_empty() {
        return None;
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for t in series.temperatures() {
        min = min.min(t);
        max = max.max(t);
        sum += t;
    }
    Some(SeriesStats {
        n_days: series.len(),
        min,
        max,
        mean: sum / series.len() as f64,
    })
}
