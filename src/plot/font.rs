//! Chart font registration.
//!
//! Plotters is built with `ab_glyph`, which draws only fonts registered at
//! runtime. We load one TrueType file and register it as `sans-serif` the first
//! time a chart is rendered; the outcome (success or the reason for failure) is
//! kept for the rest of the process.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::{debug, warn};
use plotters::style::{FontStyle, register_font};

/// Family name the chart code asks for.
pub const CHART_FONT_FAMILY: &str = "sans-serif";

/// Common locations of a plain sans-serif TrueType font.
const FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The explicit path of the first request, and what it registered.
static REGISTERED: OnceLock<(Option<PathBuf>, Result<PathBuf, String>)> = OnceLock::new();

/// Find a usable font file: the explicit path if given, else the first
/// existing candidate.
pub fn locate_font(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        warn!("chart font '{}' not found, trying system fonts", path.display());
    }
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

/// Register the chart font once per process.
///
/// Later calls return the first outcome. Asking for a different explicit
/// path afterwards only logs a warning; the registered font stays.
pub fn ensure_chart_font(explicit: Option<&Path>) -> Result<(), String> {
    let (requested, outcome) =
        REGISTERED.get_or_init(|| (explicit.map(Path::to_path_buf), register_from(explicit)));
    if conflicts_with_registered(requested.as_deref(), explicit) {
        warn!(
            "chart font already registered for this process; ignoring '{}'",
            explicit.map(|p| p.display().to_string()).unwrap_or_default()
        );
    }
    outcome
        .as_ref()
        .map(|path| debug!("using chart font {}", path.display()))
        .map_err(Clone::clone)
}

/// True when `explicit` names a font other than the one first requested.
fn conflicts_with_registered(requested: Option<&Path>, explicit: Option<&Path>) -> bool {
    matches!(explicit, Some(path) if requested != Some(path))
}

fn register_from(explicit: Option<&Path>) -> Result<PathBuf, String> {
    let path = locate_font(explicit).ok_or_else(|| {
        "No TrueType font found for chart text; set TEMPCAST_FONT or pass --font.".to_string()
    })?;
    let bytes = std::fs::read(&path)
        .map_err(|e| format!("Failed to read chart font '{}': {e}", path.display()))?;

    // ab_glyph keeps a `'static` reference to the font data.
    let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
    register_font(CHART_FONT_FAMILY, FontStyle::Normal, bytes)
        .map_err(|_| format!("'{}' is not a usable TrueType font", path.display()))?;

    Ok(path)
}
