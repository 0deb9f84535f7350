//! Error types.
//!
//! - `PipelineError`: typed failure of one forecast run, tagged by stage.
//! - `PredictorError`: failure reported by an injected predictor.
//! - `AppError`: what the binary prints, plus the process exit code.

use chrono::NaiveDate;
use thiserror::Error;

/// Pipeline stage that produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Features,
    Prediction,
    Render,
    Compose,
}

impl Stage {
    pub fn display_name(self) -> &'static str {
        match self {
            Stage::Features => "feature builder",
            Stage::Prediction => "prediction engine",
            Stage::Render => "chart renderer",
            Stage::Compose => "report composer",
        }
    }
}

/// A fail-fast error from a single forecast run.
///
/// Nothing is retried; the first failing stage aborts the run and no report
/// is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Invalid date range: start date {start} is after end date {end}.")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Prediction failed: {0}")]
    PredictionFailure(String),

    #[error("Chart rendering failed: {0}")]
    RenderFailure(String),

    #[error("Report composition failed: {0}")]
    ComposeFailure(String),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::InvalidRange { .. } | PipelineError::InvalidInput(_) => Stage::Features,
            PipelineError::PredictionFailure(_) => Stage::Prediction,
            PipelineError::RenderFailure(_) => Stage::Render,
            PipelineError::ComposeFailure(_) => Stage::Compose,
        }
    }
}

/// Failure reported by a `Predictor` implementation.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{0}")]
pub struct PredictorError(String);

impl PredictorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        // 2 = bad input, 3 = model, 4 = output generation.
        let exit_code = match err.stage() {
            Stage::Features => 2,
            Stage::Prediction => 3,
            Stage::Render | Stage::Compose => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
