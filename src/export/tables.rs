//! CSV writers for the practice dataset and summary tables

use crate::error::Result;
use crate::practice::Practice;
use crate::summary::RevenueSummary;
use log::info;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const PRACTICES_FILE: &str = "practices.csv";
pub const OVERALL_FILE: &str = "summary_overall.csv";
pub const BY_CANTON_FILE: &str = "summary_by_canton.csv";
pub const BY_TREATMENT_FILE: &str = "summary_by_treatment.csv";
pub const BY_PHYSIO_FILE: &str = "summary_by_physio.csv";

/// Write any serializable rows as CSV with a header line
pub fn write_rows<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the practice dataset
pub fn write_practices<W: Write>(writer: W, practices: &[Practice]) -> Result<()> {
    write_rows(writer, practices)
}

/// Write the dataset and all four summaries into `dir`, creating it if needed
///
/// Returns the paths written, dataset first.
pub fn write_all(dir: &Path, practices: &[Practice], summary: &RevenueSummary) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(5);
    let mut create = |name: &str| -> Result<fs::File> {
        let path = dir.join(name);
        let file = fs::File::create(&path)?;
        written.push(path);
        Ok(file)
    };

    write_practices(create(PRACTICES_FILE)?, practices)?;
    write_rows(create(OVERALL_FILE)?, std::slice::from_ref(&summary.overall))?;
    write_rows(create(BY_CANTON_FILE)?, &summary.by_canton)?;
    write_rows(create(BY_TREATMENT_FILE)?, &summary.by_treatment)?;
    write_rows(create(BY_PHYSIO_FILE)?, &summary.by_physio)?;

    info!("Wrote {} tables to {}", written.len(), dir.display());
    Ok(written)
}
