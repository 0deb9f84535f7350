//! Prediction models.
//!
//! - `predictor`: the opaque `Predictor` seam and the linear model used by the binary
//! - `engine`: runs a predictor over a feature matrix and builds the prediction series

pub mod engine;
pub mod predictor;

pub use engine::*;
pub use predictor::*;
