//! The predictor seam.
//!
//! The pipeline treats the regression model as a black box with the signature
//! `rows of [humidity, wind_speed, day_of_year] -> one float per row`. It is
//! injected as `&dyn Predictor`, so a run can use the model loaded at startup
//! or a deterministic stub.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::PredictorError;

/// Number of input features per row.
pub const FEATURE_COUNT: usize = 3;

/// A synchronous, blocking regression model.
///
/// Implementations must return exactly one value per input row, in input
/// order. The engine treats anything else as a fatal prediction failure.
pub trait Predictor {
    fn predict(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, PredictorError>;
}

impl<F> Predictor for F
where
    F: Fn(&[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, PredictorError>,
{
    fn predict(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, PredictorError> {
        self(rows)
    }
}

/// Pre-trained linear regression: `y = intercept + x · coefficients`.
///
/// Coefficients are in feature order `[humidity, wind_speed, day_of_year]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: [f64; FEATURE_COUNT],
}

impl LinearModel {
    /// All parameters must be finite.
    pub fn validate(&self) -> Result<(), PredictorError> {
        let finite = self.intercept.is_finite() && self.coefficients.iter().all(|c| c.is_finite());
        if !finite {
            return Err(PredictorError::new("Linear model has non-finite parameters."));
        }
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn predict(&self, rows: &[[f64; FEATURE_COUNT]]) -> Result<Vec<f64>, PredictorError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let x = DMatrix::from_row_iterator(rows.len(), FEATURE_COUNT, rows.iter().flatten().copied());
        let beta = DVector::from_row_slice(&self.coefficients);
        let y = x * beta;
        Ok(y.iter().map(|v| v + self.intercept).collect())
    }
}
