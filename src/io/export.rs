//! CSV export of the load-profile chart data.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::report::LoadBar;

/// Column header for load-profile CSV export.
const HEADER: &str = "label,kind,peak_kw,grid_ceiling_kw,over_ceiling";

/// Exports the load profile to a CSV file at the given path.
///
/// Writes a header row followed by one row per bar. Every row carries the
/// grid ceiling so the file can be charted on its own.
///
/// # Arguments
///
/// * `bars` - Load profile from [`crate::report::load_profile`]
/// * `grid_ceiling_kw` - Effective supply limit for the reference line
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(bars: &[LoadBar], grid_ceiling_kw: f64, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(bars, grid_ceiling_kw, buf)
}

/// Writes the load profile as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(bars: &[LoadBar], grid_ceiling_kw: f64, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for bar in bars {
        wtr.write_record(&[
            bar.label.clone(),
            bar.kind.to_string(),
            format!("{:.2}", bar.peak_kw),
            format!("{:.2}", grid_ceiling_kw),
            (bar.peak_kw > grid_ceiling_kw).to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
