//! Simulation parameters

use crate::error::{Result, SimError};
use crate::practice::RevenueParams;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parameters for a simulation run
///
/// Any field missing from a parameter file takes its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of practices to simulate
    /// Default: 160
    #[serde(default = "default_n_practices")]
    pub n_practices: usize,

    /// Seed of the random stream
    /// Default: 42
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Working days per month
    /// Default: 21
    #[serde(default = "default_working_days")]
    pub working_days_per_month: u32,

    /// CHF per tariff point (1.0 = points are reported as CHF)
    #[serde(default = "default_point_rate")]
    pub point_to_chf_rate: f64,
}

fn default_n_practices() -> usize { 160 }
fn default_seed() -> u64 { 42 }
fn default_working_days() -> u32 { 21 }
fn default_point_rate() -> f64 { 1.0 }

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            n_practices: 160,
            seed: 42,
            working_days_per_month: 21,
            point_to_chf_rate: 1.0,
        }
    }
}

impl SimulationParams {
    /// Load parameters from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let params: Self = serde_json::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n_practices == 0 {
            return Err(SimError::config("n_practices must be at least 1"));
        }
        if self.n_practices > u32::MAX as usize {
            return Err(SimError::config("n_practices exceeds the practice id range"));
        }
        if self.working_days_per_month == 0 {
            return Err(SimError::config("working_days_per_month must be at least 1"));
        }
        if !self.point_to_chf_rate.is_finite() || self.point_to_chf_rate < 0.0 {
            return Err(SimError::config(format!(
                "point_to_chf_rate must be finite and non-negative, got {}",
                self.point_to_chf_rate
            )));
        }
        Ok(())
    }

    pub fn revenue_params(&self) -> RevenueParams {
        RevenueParams {
            working_days_per_month: self.working_days_per_month,
            point_to_chf_rate: self.point_to_chf_rate,
        }
    }
}
