//! Chart rendering.
//!
//! - `chart`: the `ChartRenderer` seam and the Plotters line chart
//! - `font`: one-time TrueType font registration for chart text

pub mod chart;
pub mod font;

pub use chart::*;
