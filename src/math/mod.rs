//! Numeric helpers shared by the prediction and variation stages.

pub mod rounding;

pub use rounding::*;
