//! Prediction engine.
//!
//! Hands the numeric feature rows to the injected predictor, checks that one
//! value came back per row, rounds each to 2 decimals and pairs it with its
//! date. No retries and no fallback: any predictor problem fails the run.

use log::debug;

use crate::domain::{FeatureMatrix, PredictionRecord, PredictionSeries};
use crate::error::PipelineError;
use crate::math::round2;
use crate::models::Predictor;

/// Run `predictor` over `matrix`.
pub fn predict_series(matrix: &FeatureMatrix, predictor: &dyn Predictor) -> Result<PredictionSeries, PipelineError> {
    let inputs = matrix.to_arrays();
    let outputs = predictor
        .predict(&inputs)
        .map_err(|e| PipelineError::PredictionFailure(format!("predictor error: {e}")))?;

    if outputs.len() != matrix.len() {
        return Err(PipelineError::PredictionFailure(format!(
            "expected {} predictions (one per feature row), predictor returned {}",
            matrix.len(),
            outputs.len()
        )));
    }

    let mut records = Vec::with_capacity(outputs.len());
    for (row, &raw) in matrix.rows.iter().zip(outputs.iter()) {
        if !raw.is_finite() {
            return Err(PipelineError::PredictionFailure(format!(
                "non-finite prediction {raw} for {}",
                row.date
            )));
        }
        records.push(PredictionRecord {
            date: row.date,
            temperature: round2(raw),
        });
    }

    debug!("predicted {} temperatures", records.len());
    Ok(PredictionSeries { records })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Covariates, DateRange};
    use crate::error::PredictorError;
    use crate::features::build_features;
    use chrono::NaiveDate;

    fn matrix(days: u32) -> FeatureMatrix {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, days).unwrap();
        let range = DateRange::new(start, end).unwrap();
        build_features(
            &range,
            Covariates {
                humidity: 60.0,
                wind_speed: 10.0,
            },
        )
        .unwrap()
    }

    #[test]
    fn rounds_and_pairs_with_dates() {
        let stub = |_: &[[f64; 3]]| -> Result<Vec<f64>, PredictorError> { Ok(vec![5.001, 5.999, 4.5]) };
        let series = predict_series(&matrix(3), &stub).unwrap();

        let temps: Vec<f64> = series.temperatures().collect();
        assert_eq!(temps, vec![5.0, 6.0, 4.5]);
        assert_eq!(series.records[2].date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
    }

    #[test]
    fn exact_halves_round_to_even() {
        let stub = |_: &[[f64; 3]]| -> Result<Vec<f64>, PredictorError> { Ok(vec![5.125, 2.625]) };
        let series = predict_series(&matrix(2), &stub).unwrap();
        let temps: Vec<f64> = series.temperatures().collect();
        assert_eq!(temps, vec![5.12, 2.62]);
    }

    #[test]
    fn predictor_sees_feature_order() {
        let stub = |rows: &[[f64; 3]]| -> Result<Vec<f64>, PredictorError> {
            Ok(rows.iter().map(|r| r[0] + r[1] + r[2]).collect())
        };
        let series = predict_series(&matrix(2), &stub).unwrap();
        let temps: Vec<f64> = series.temperatures().collect();
        assert_eq!(temps, vec![71.0, 72.0]);
    }

    #[test]
    fn length_mismatch_is_a_prediction_failure() {
        let stub = |_: &[[f64; 3]]| -> Result<Vec<f64>, PredictorError> { Ok(vec![1.0, 2.0]) };
        let err = predict_series(&matrix(3), &stub).unwrap_err();
        match err {
            PipelineError::PredictionFailure(msg) => {
                assert!(msg.contains("expected 3"), "{msg}");
                assert!(msg.contains("returned 2"), "{msg}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn predictor_error_is_surfaced() {
        let stub = |_: &[[f64; 3]]| -> Result<Vec<f64>, PredictorError> {
            Err(PredictorError::new("model file corrupt"))
        };
        let err = predict_series(&matrix(1), &stub).unwrap_err();
        assert!(err.to_string().contains("model file corrupt"));
    }

    #[test]
    fn non_finite_output_names_the_day() {
        let stub = |_: &[[f64; 3]]| -> Result<Vec<f64>, PredictorError> { Ok(vec![1.0, f64::INFINITY]) };
        let err = predict_series(&matrix(2), &stub).unwrap_err();
        assert!(err.to_string().contains("2024-01-02"));
    }

    #[test]
    fn rounded_values_match_raw_outputs() {
        let raw = [12.3456, -0.004, 7.777, 20.0];
        let stub = move |_: &[[f64; 3]]| -> Result<Vec<f64>, PredictorError> { Ok(raw.to_vec()) };
        let series = predict_series(&matrix(4), &stub).unwrap();
        for (rec, &r) in series.records.iter().zip(raw.iter()) {
            assert_eq!(rec.temperature, round2(r));
            assert_eq!(round2(rec.temperature), rec.temperature);
        }
    }
}
