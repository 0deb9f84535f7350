//! PDF report composer.
//!
//! Layout (A4 portrait, coordinates in mm from the top of the page):
//!
//! - title, bold 16pt, centered
//! - parameter summary lines, 12pt
//! - chart image at x = 10, top = 60, 190 wide
//! - ledger heading and one 11pt line per day, continuing on new pages
//!
//! No numbers are computed here beyond layout positions; all text comes from
//! `report::format`.

use image::{DynamicImage, GenericImageView, ImageFormat};
use log::debug;
use printpdf::{
    BuiltinFont, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use crate::domain::{ChartImage, Covariates, DateRange, PredictionSeries, ReportArtifact, VariationRecord};
use crate::error::PipelineError;
use crate::report::format::{REPORT_TITLE, report_content};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 20.0;

const CHART_X_MM: f32 = 10.0;
const CHART_TOP_MM: f32 = 60.0;
const CHART_WIDTH_MM: f32 = 190.0;
/// The ledger never starts above this line, whatever the chart height.
const LEDGER_TOP_MM: f32 = 150.0;

const TITLE_PT: f32 = 16.0;
const BODY_PT: f32 = 12.0;
const LEDGER_PT: f32 = 11.0;

const MM_PER_INCH: f32 = 25.4;
const MM_PER_PT: f32 = MM_PER_INCH / 72.0;
const LAYER_NAME: &str = "Layer 1";

/// Compose the report for one run.
///
/// `series` and `variations` must describe the same days in the same order;
/// any disagreement is reported with the offending record.
pub fn compose_report(
    range: &DateRange,
    covariates: Covariates,
    series: &PredictionSeries,
    variations: &[VariationRecord],
    chart: &ChartImage,
) -> Result<ReportArtifact, PipelineError> {
    check_records(series, variations)?;

    let content = report_content(range, covariates, variations);
    let chart_image = decode_chart(chart)?;

    let (doc, page, layer) = PdfDocument::new(REPORT_TITLE, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| PipelineError::ComposeFailure(format!("Failed to add report font: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| PipelineError::ComposeFailure(format!("Failed to add report font: {e}")))?;

    let pages = {
        let mut layout = PageLayout {
            layer: doc.get_page(page).get_layer(layer),
            doc: &doc,
            y: MARGIN_MM,
            pages: 1,
        };

        // Header.
        layout.cell(&content.title, TITLE_PT, 10.0, Align::Center, &bold);
        layout.skip(10.0);
        for line in &content.parameter_lines {
            layout.cell(line, BODY_PT, 10.0, Align::Left, &regular);
        }

        // Chart.
        let chart_height_mm = place_chart(&layout.layer, chart_image);

        // Ledger.
        layout.y = LEDGER_TOP_MM.max(CHART_TOP_MM + chart_height_mm + 5.0);
        layout.cell(&content.ledger_heading, LEDGER_PT, 10.0, Align::Left, &regular);
        for line in &content.ledger_lines {
            layout.cell(line, LEDGER_PT, 8.0, Align::Left, &regular);
        }
        layout.pages
    };

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| PipelineError::ComposeFailure(format!("Failed to encode PDF: {e}")))?;

    debug!(
        "composed report: {} ledger lines, {} page(s), {} bytes",
        content.ledger_lines.len(),
        pages,
        bytes.len()
    );

    Ok(ReportArtifact { bytes, content, pages })
}

fn check_records(series: &PredictionSeries, variations: &[VariationRecord]) -> Result<(), PipelineError> {
    if series.len() != variations.len() {
        return Err(PipelineError::ComposeFailure(format!(
            "series has {} records but variations has {}",
            series.len(),
            variations.len()
        )));
    }
    for (i, (p, v)) in series.records.iter().zip(variations).enumerate() {
        if p.date != v.date || p.temperature != v.temperature {
            return Err(PipelineError::ComposeFailure(format!(
                "record {i} ({}) does not match its variation ({})",
                p.date, v.date
            )));
        }
        if !v.temperature.is_finite() || v.change.is_some_and(|c| !c.is_finite()) {
            return Err(PipelineError::ComposeFailure(format!(
                "record {i} ({}) has a non-finite value",
                v.date
            )));
        }
    }
    Ok(())
}

fn decode_chart(chart: &ChartImage) -> Result<DynamicImage, PipelineError> {
    image::load_from_memory_with_format(&chart.png, ImageFormat::Png)
        .map_err(|e| PipelineError::ComposeFailure(format!("Chart image is not a valid PNG: {e}")))
}

/// Draw the chart at its fixed position and return its height in mm.
///
/// The image is scaled to the fixed width; a chart that would run past the
/// bottom margin is shrunk to fit instead.
fn place_chart(layer: &PdfLayerReference, chart: DynamicImage) -> f32 {
    let (px_w, px_h) = chart.dimensions();
    let max_height_mm = PAGE_HEIGHT_MM - CHART_TOP_MM - BOTTOM_MARGIN_MM;

    let mut dpi = px_w as f32 / (CHART_WIDTH_MM / MM_PER_INCH);
    let mut height_mm = px_h as f32 / dpi * MM_PER_INCH;
    if height_mm > max_height_mm {
        dpi = px_h as f32 / (max_height_mm / MM_PER_INCH);
        height_mm = max_height_mm;
    }

    Image::from_dynamic_image(&chart).add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(CHART_X_MM)),
            translate_y: Some(Mm(PAGE_HEIGHT_MM - CHART_TOP_MM - height_mm)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
    height_mm
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
}

/// Top-down line writer with automatic page breaks.
struct PageLayout<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    /// Distance of the next line's top edge from the top of the page (mm).
    y: f32,
    pages: usize,
}

impl PageLayout<'_> {
    fn cell(&mut self, text: &str, size_pt: f32, height_mm: f32, align: Align, font: &IndirectFontRef) {
        if self.y + height_mm > PAGE_HEIGHT_MM - BOTTOM_MARGIN_MM {
            self.new_page();
        }
        // Vertically center the glyphs in the cell.
        let baseline = self.y + height_mm / 2.0 + size_pt * MM_PER_PT * 0.35;
        let x = match align {
            Align::Left => MARGIN_MM,
            Align::Center => ((PAGE_WIDTH_MM - approx_text_width_mm(text, size_pt)) / 2.0).max(MARGIN_MM),
        };
        self.layer
            .use_text(text, size_pt, Mm(x), Mm(PAGE_HEIGHT_MM - baseline), font);
        self.y += height_mm;
    }

    fn skip(&mut self, height_mm: f32) {
        self.y += height_mm;
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = MARGIN_MM;
        self.pages += 1;
    }
}

/// Rough Helvetica advance width (average glyph ~0.55 em).
fn approx_text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * 0.55 * MM_PER_PT
}

/// Encode a small solid-color PNG. Used by tests that need a valid chart
/// without rasterizing text.
#[cfg(test)]
pub(crate) fn solid_png(width: u32, height: u32) -> ChartImage {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([255, 165, 0]));
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
        .unwrap();
    ChartImage { png, width, height }
}
