//! Dummy-encoded design matrix for an external OLS regression
//!
//! Response is `total_annual_revenue`. Numeric regressors are taken as-is;
//! the main treatment is one-hot encoded against a baseline category (the
//! most probable tariff), which gets no column.

use crate::error::Result;
use crate::practice::Practice;
use crate::tariff::ReferenceTables;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const RESPONSE_COLUMN: &str = "total_annual_revenue";

pub const DESIGN_MATRIX_FILE: &str = "design_matrix.csv";

/// Regression inputs with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    /// Regressor names, intercept first
    pub columns: Vec<String>,
    /// One row of regressor values per practice
    pub rows: Vec<Vec<f64>>,
    pub response: Vec<f64>,
    /// Treatment code absorbed into the intercept
    pub baseline_treatment: String,
}

impl DesignMatrix {
    pub fn build(practices: &[Practice], tables: &ReferenceTables) -> Self {
        let baseline = tables.baseline_tariff().code.clone();
        let dummies: Vec<&str> = tables
            .all_tariffs()
            .iter()
            .map(|t| t.code.as_str())
            .filter(|code| *code != baseline)
            .collect();

        let mut columns: Vec<String> = ["intercept", "n_physio", "n_treatments_per_day", "multiplier"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        columns.extend(dummies.iter().map(|code| format!("treatment_{}", code)));

        let rows = practices
            .iter()
            .map(|p| {
                let mut row = vec![1.0, p.n_physio as f64, p.n_treatments_per_day as f64, p.multiplier];
                row.extend(dummies.iter().map(|code| if p.treatment_code == *code { 1.0 } else { 0.0 }));
                row
            })
            .collect();

        Self {
            columns,
            rows,
            response: practices.iter().map(|p| p.total_annual_revenue).collect(),
            baseline_treatment: baseline,
        }
    }

    /// Write as CSV: response column followed by the regressors
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![RESPONSE_COLUMN.to_string()];
        header.extend(self.columns.iter().cloned());
        csv_writer.write_record(&header)?;

        for (y, row) in self.response.iter().zip(&self.rows) {
            let mut record = vec![y.to_string()];
            record.extend(row.iter().map(|v| v.to_string()));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Write `design_matrix.csv` into `dir`, creating it if needed
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(DESIGN_MATRIX_FILE);
        self.write_csv(fs::File::create(&path)?)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::{SimulationEngine, SimulationParams};

    #[test]
    fn test_dummy_encoding() {
        let tables = ReferenceTables::swiss_physio().unwrap();
        let params = SimulationParams { n_practices: 60, ..Default::default() };
        let practices = SimulationEngine::new(&tables, params).unwrap().run_seeded().unwrap();

        let design = DesignMatrix::build(&practices, &tables);
        assert_eq!(design.baseline_treatment, "7301");
        // 4 numeric columns + 6 non-baseline treatments
        assert_eq!(design.columns.len(), 10);
        assert!(!design.columns.contains(&"treatment_7301".to_string()));
        assert_eq!(design.rows.len(), 60);

        for (row, p) in design.rows.iter().zip(&practices) {
            assert_eq!(row.len(), design.columns.len());
            let active: f64 = row[4..].iter().sum();
            if p.treatment_code == "7301" {
                assert_eq!(active, 0.0);
            } else {
                assert_eq!(active, 1.0);
                let col = format!("treatment_{}", p.treatment_code);
                let idx = design.columns.iter().position(|c| *c == col).unwrap();
                assert_eq!(row[idx], 1.0);
            }
        }
    }

    #[test]
    fn test_write_csv_header() {
        let tables = ReferenceTables::swiss_physio().unwrap();
        let design = DesignMatrix::build(&[], &tables);

        let mut buf = Vec::new();
        design.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("total_annual_revenue,intercept,n_physio,"));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_write_to_dir() {
        let tables = ReferenceTables::swiss_physio().unwrap();
        let design = DesignMatrix::build(&[], &tables);
        let dir = tempfile::tempdir().unwrap();

        let path = design.write_to_dir(&dir.path().join("out")).unwrap();
        assert_eq!(path, dir.path().join("out").join(DESIGN_MATRIX_FILE));
        assert!(fs::read_to_string(&path).unwrap().starts_with(RESPONSE_COLUMN));

        // A regular file where the directory should be
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, "").unwrap();
        assert!(matches!(design.write_to_dir(&blocked), Err(crate::SimError::Io(_))));
    }
}
