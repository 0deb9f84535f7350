//! `tempcast` library crate.
//!
//! The binary (`tempcast`) is a thin wrapper around this library so that:
//!
//! - the forecast pipeline is testable without spawning processes
//! - the predictor and chart backend can be swapped by other front-ends
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod features;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
