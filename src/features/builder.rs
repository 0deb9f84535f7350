//! Feature matrix builder.
//!
//! One row per calendar day of the range, in ascending date order. Humidity
//! and wind speed are broadcast unchanged; only the day-of-year varies.
//! Bounds on the covariates belong to the input layer, so any finite value is
//! accepted here.

use log::debug;

use crate::domain::{Covariates, DateRange, FeatureMatrix, FeatureRow};
use crate::error::PipelineError;

/// Build the feature matrix for `range`.
pub fn build_features(range: &DateRange, covariates: Covariates) -> Result<FeatureMatrix, PipelineError> {
    if !covariates.humidity.is_finite() {
        return Err(PipelineError::InvalidInput(format!(
            "humidity must be a finite number, got {}",
            covariates.humidity
        )));
    }
    if !covariates.wind_speed.is_finite() {
        return Err(PipelineError::InvalidInput(format!(
            "wind speed must be a finite number, got {}",
            covariates.wind_speed
        )));
    }

    let mut rows = Vec::with_capacity(range.day_count());
    rows.extend(range.days().map(|date| FeatureRow::new(date, covariates)));

    debug!(
        "built {} feature rows for {}..={}",
        rows.len(),
        range.start(),
        range.end()
    );

    Ok(FeatureMatrix { rows })
}
