//! Shared forecast pipeline used by every front-end command.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! range check -> features -> predictions -> variations -> chart -> report
//!
//! The pipeline is purely in-memory. The predictor and the chart renderer are
//! injected so callers decide which model and drawing backend a run uses, and
//! writing any of the results to disk is left to the caller.

use log::info;

use crate::domain::{ChartImage, DateRange, ForecastRequest, PredictionSeries, ReportArtifact, VariationRecord};
use crate::error::PipelineError;
use crate::features::build_features;
use crate::models::{Predictor, predict_series};
use crate::plot::ChartRenderer;
use crate::report::{compose_report, compute_variations};

/// Predictions and variations for a run, without chart or report.
#[derive(Debug, Clone)]
pub struct PredictionOutput {
    pub range: DateRange,
    pub series: PredictionSeries,
    pub variations: Vec<VariationRecord>,
}

/// All computed outputs of a single full run.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    pub range: DateRange,
    pub series: PredictionSeries,
    pub variations: Vec<VariationRecord>,
    pub chart: ChartImage,
    pub report: ReportArtifact,
}

/// Run the prediction stages only: features, predictions, variations.
pub fn run_predictions(request: &ForecastRequest, predictor: &dyn Predictor) -> Result<PredictionOutput, PipelineError> {
    // 1) Refuse an inverted range before building anything.
    let range = request.range()?;

    // 2) Build features and predict.
    let matrix = build_features(&range, request.covariates)?;
    let series = predict_series(&matrix, predictor)?;

    // 3) Day-over-day changes.
    let variations = compute_variations(&series);

    Ok(PredictionOutput {
        range,
        series,
        variations,
    })
}

/// Execute the full pipeline and return every intermediate product.
///
/// The first failing stage aborts the run; no partial report is produced.
pub fn run_forecast(
    request: &ForecastRequest,
    predictor: &dyn Predictor,
    renderer: &dyn ChartRenderer,
) -> Result<ForecastRun, PipelineError> {
    let PredictionOutput {
        range,
        series,
        variations,
    } = run_predictions(request, predictor)?;

    // 4) Chart, then the report that embeds it.
    let chart = renderer.render(&series)?;
    let report = compose_report(&range, request.covariates, &series, &variations, &chart)?;

    info!(
        "forecast {}..={}: {} days, report {} bytes",
        range.start(),
        range.end(),
        series.len(),
        report.bytes.len()
    );

    Ok(ForecastRun {
        range,
        series,
        variations,
        chart,
        report,
    })
}
