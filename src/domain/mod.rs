//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run inputs (`DateRange`, `Covariates`, `ForecastRequest`)
//! - per-day pipeline values (`FeatureRow`, `PredictionRecord`, `VariationRecord`)
//! - outputs (`ChartImage`, `ReportArtifact`)

pub mod types;

pub use types::*;
