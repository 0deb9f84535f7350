//! Feature construction.
//!
//! Turns a validated date range plus the two weather covariates into the
//! per-day model input rows.

pub mod builder;

pub use builder::*;
