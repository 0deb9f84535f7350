//! Plotters-powered line chart of the predicted temperatures.
//!
//! The chart is drawn into an in-memory RGB buffer with the bitmap backend and
//! encoded to PNG; nothing touches the filesystem. Days are placed on an
//! integer axis (day index) so every day gets exactly one tick, labelled with
//! its date.

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat, RgbImage};
use log::debug;
use plotters::prelude::*;

use crate::domain::{ChartImage, PredictionSeries};
use crate::error::PipelineError;
use crate::plot::font::{CHART_FONT_FAMILY, ensure_chart_font};

pub const CHART_TITLE: &str = "Predicted Temperature Trend";
pub const X_LABEL: &str = "Date";
pub const Y_LABEL: &str = "Predicted Temperature (°C)";

/// Renders a prediction series to an image.
pub trait ChartRenderer {
    fn render(&self, series: &PredictionSeries) -> Result<ChartImage, PipelineError>;
}

/// The default line chart.
#[derive(Debug, Clone)]
pub struct PlottersChart {
    pub width: u32,
    pub height: u32,
    /// Font file for chart text; system fonts are searched when `None`.
    pub font_path: Option<PathBuf>,
}

impl Default for PlottersChart {
    /// 10x4 inches at 100 dpi.
    fn default() -> Self {
        Self {
            width: 1000,
            height: 400,
            font_path: None,
        }
    }
}

impl ChartRenderer for PlottersChart {
    fn render(&self, series: &PredictionSeries) -> Result<ChartImage, PipelineError> {
        if series.is_empty() {
            return Err(PipelineError::RenderFailure("cannot chart an empty series".to_string()));
        }
        if self.width < 200 || self.height < 150 {
            return Err(PipelineError::RenderFailure(format!(
                "chart size {}x{} is too small",
                self.width, self.height
            )));
        }
        ensure_chart_font(self.font_path.as_deref()).map_err(PipelineError::RenderFailure)?;

        let mut buf = vec![0u8; self.width as usize * self.height as usize * 3];
        draw_line_chart(&mut buf, (self.width, self.height), series)
            .map_err(|e| PipelineError::RenderFailure(e.to_string()))?;

        let png = encode_png(buf, self.width, self.height)?;
        debug!(
            "rendered {}x{} chart for {} days ({} bytes)",
            self.width,
            self.height,
            series.len(),
            png.len()
        );

        Ok(ChartImage {
            png,
            width: self.width,
            height: self.height,
        })
    }
}

fn draw_line_chart(
    buf: &mut [u8],
    size: (u32, u32),
    series: &PredictionSeries,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::with_buffer(buf, size).into_drawing_area();
    root.fill(&WHITE)?;

    let n = series.len() as i32;
    let (y0, y1) = y_bounds(series);
    let labels: Vec<String> = series.records.iter().map(|r| r.date.to_string()).collect();

    let mut chart = ChartBuilder::on(&root)
        .caption(CHART_TITLE, (CHART_FONT_FAMILY, 22).into_font())
        .margin(12)
        .x_label_area_size(95)
        .y_label_area_size(60)
        // One empty slot either side keeps the end markers off the axes.
        .build_cartesian_2d(-1..n, y0..y1)?;

    chart
        .configure_mesh()
        .x_labels(series.len() + 2)
        .x_label_formatter(&|i| tick_label(&labels, *i))
        .x_label_style(
            (CHART_FONT_FAMILY, 12)
                .into_font()
                .transform(FontTransform::Rotate90),
        )
        .y_label_style((CHART_FONT_FAMILY, 12).into_font())
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style((CHART_FONT_FAMILY, 14).into_font())
        .draw()?;

    let orange = RGBColor(255, 165, 0);
    let points: Vec<(i32, f64)> = series
        .records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as i32, r.temperature))
        .collect();

    chart.draw_series(LineSeries::new(points.iter().copied(), orange.stroke_width(2)))?;
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, orange.filled())))?;

    root.present()?;
    Ok(())
}

/// Date label for a day index; padding ticks stay blank.
fn tick_label(labels: &[String], index: i32) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| labels.get(i))
        .cloned()
        .unwrap_or_default()
}

/// Y range with 10% headroom, widened to ±1°C for flat series.
fn y_bounds(series: &PredictionSeries) -> (f64, f64) {
    let (lo, hi) = series
        .temperatures()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| (lo.min(t), hi.max(t)));
    let span = hi - lo;
    if span < 1e-9 {
        return (lo - 1.0, hi + 1.0);
    }
    let pad = span * 0.1;
    (lo - pad, hi + pad)
}

fn encode_png(buf: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>, PipelineError> {
    let img = RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| PipelineError::RenderFailure("chart buffer has the wrong size".to_string()))?;
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| PipelineError::RenderFailure(format!("PNG encoding failed: {e}")))?;
    Ok(png)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PredictionRecord;
    use crate::plot::font::locate_font;
    use chrono::NaiveDate;

    fn series(temps: &[f64]) -> PredictionSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        PredictionSeries {
            records: temps
                .iter()
                .enumerate()
                .map(|(i, &t)| PredictionRecord {
                    date: start + chrono::Days::new(i as u64),
                    temperature: t,
                })
                .collect(),
        }
    }

    #[test]
    fn empty_series_is_a_render_failure() {
        let err = PlottersChart::default().render(&series(&[])).unwrap_err();
        assert!(matches!(err, PipelineError::RenderFailure(_)));
    }

    #[test]
    fn tiny_canvas_is_a_render_failure() {
        let chart = PlottersChart {
            width: 10,
            height: 10,
            font_path: None,
        };
        assert!(chart.render(&series(&[1.0])).is_err());
    }

    #[test]
    fn y_bounds_pad_the_data() {
        let (lo, hi) = y_bounds(&series(&[5.0, 6.0, 4.5]));
        assert!(lo < 4.5 && hi > 6.0);
        assert!((lo - 4.35).abs() < 1e-9);
        assert!((hi - 6.15).abs() < 1e-9);

        let (lo, hi) = y_bounds(&series(&[20.0]));
        assert_eq!((lo, hi), (19.0, 21.0));
    }

    #[test]
    fn tick_labels_cover_each_day_once() {
        let labels = vec!["2024-01-01".to_string(), "2024-01-02".to_string()];
        assert_eq!(tick_label(&labels, -1), "");
        assert_eq!(tick_label(&labels, 0), "2024-01-01");
        assert_eq!(tick_label(&labels, 1), "2024-01-02");
        assert_eq!(tick_label(&labels, 2), "");
    }

    /// Font for the rendering tests: `TEMPCAST_FONT` first, then system fonts.
    fn test_font() -> Option<PathBuf> {
        let pinned = std::env::var_os(crate::app::FONT_ENV).map(PathBuf::from);
        let font = locate_font(pinned.as_deref());
        if font.is_none() {
            eprintln!("skipping chart rendering test: no TrueType font (set {})", crate::app::FONT_ENV);
        }
        font
    }

    #[test]
    fn renders_png_when_a_font_is_available() {
        let Some(font) = test_font() else {
            return;
        };
        let chart = PlottersChart {
            font_path: Some(font),
            ..PlottersChart::default()
        };
        let rendered = chart.render(&series(&[5.0, 6.0, 4.5])).unwrap();
        assert!(rendered.png.starts_with(&[0x89, b'P', b'N', b'G']));
        assert_eq!((rendered.width, rendered.height), (1000, 400));

        let decoded = image::load_from_memory_with_format(&rendered.png, ImageFormat::Png).unwrap();
        assert_eq!(decoded.to_rgb8().dimensions(), (1000, 400));
    }

    #[test]
    fn same_series_renders_identical_bytes() {
        let Some(font) = test_font() else {
            return;
        };
        let chart = PlottersChart {
            font_path: Some(font),
            ..PlottersChart::default()
        };
        let temps: Vec<f64> = (0..30).map(|i| 10.0 + (i as f64 * 0.7).sin() * 4.0).collect();
        let first = chart.render(&series(&temps)).unwrap();
        let second = chart.render(&series(&temps)).unwrap();
        assert_eq!(first.png, second.png);
    }
}
