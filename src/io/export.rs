//! Write run outputs to disk.
//!
//! The pipeline only produces bytes; these helpers are how the binary
//! persists them. The CSV mirrors the terminal table so it is easy to consume
//! in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::domain::VariationRecord;
use crate::error::AppError;

/// Write raw bytes (report PDF, chart PNG) to `path`.
pub fn write_bytes(path: &Path, bytes: &[u8], what: &str) -> Result<(), AppError> {
    std::fs::write(path, bytes)
        .map_err(|e| AppError::new(2, format!("Failed to write {what} '{}': {e}", path.display())))?;
    info!("wrote {what} to {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Write the per-day prediction table to a CSV file.
///
/// The change cell is empty for the first day.
pub fn write_predictions_csv(path: &Path, rows: &[VariationRecord]) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    // Header
    writeln!(file, "date,predicted_temperature_c,temperature_change_c")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for r in rows {
        writeln!(
            file,
            "{},{:.2},{}",
            r.date,
            r.temperature,
            r.change.map(|c| format!("{c:.2}")).unwrap_or_default(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
