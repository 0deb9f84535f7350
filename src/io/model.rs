//! Read the pre-trained model file.
//!
//! Model JSON is the portable form of a fitted linear regression:
//!
//! ```json
//! { "intercept": 31.2, "coefficients": [-0.12, -0.08, 0.015] }
//! ```
//!
//! Coefficients follow the feature order `[humidity, wind_speed, day_of_year]`.

use std::fs::File;
use std::path::Path;

use log::info;

use crate::error::AppError;
use crate::models::LinearModel;

/// Read and validate a model JSON file.
pub fn read_model_json(path: &Path) -> Result<LinearModel, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open model JSON '{}': {e}", path.display())))?;
    let model: LinearModel =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid model JSON: {e}")))?;
    model
        .validate()
        .map_err(|e| AppError::new(2, format!("Invalid model '{}': {e}", path.display())))?;

    info!("loaded model from {}", path.display());
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("tempcast_{}_{name}", std::process::id()))
    }

    #[test]
    fn reads_a_model_file() {
        let path = temp_path("model_ok.json");
        let mut f = File::create(&path).unwrap();
        write!(f, r#"{{"intercept": 30.0, "coefficients": [-0.1, -0.2, 0.01]}}"#).unwrap();
        drop(f);

        let model = read_model_json(&path).unwrap();
        assert_eq!(model.intercept, 30.0);
        assert_eq!(model.coefficients, [-0.1, -0.2, 0.01]);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn wrong_coefficient_count_is_rejected() {
        let path = temp_path("model_bad.json");
        std::fs::write(&path, r#"{"intercept": 30.0, "coefficients": [1.0, 2.0]}"#).unwrap();

        let err = read_model_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid model JSON"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_model_json(Path::new("/no/such/model.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
