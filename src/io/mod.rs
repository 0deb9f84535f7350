//! Input/output helpers.
//!
//! - model JSON loading (`model`)
//! - report/chart/CSV writers (`export`)

pub mod export;
pub mod model;

pub use export::*;
pub use model::*;
