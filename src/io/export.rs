//! Write the filtered-records CSV export to disk.
//!
//! The export parallels the chart query (same builder, same parameters) but
//! targets the raw-records endpoint; the returned bytes are saved verbatim
//! and never parsed client-side.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::AppError;

/// Suggested filename when the user does not pick one.
pub const DEFAULT_EXPORT_FILENAME: &str = "crime_data.csv";

/// Save raw export bytes to `path`.
pub fn write_csv_export(path: &Path, bytes: &[u8]) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export file '{}': {e}", path.display()),
        )
    })?;
    file.write_all(bytes).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to write export file '{}': {e}", path.display()),
        )
    })?;
    Ok(())
}
