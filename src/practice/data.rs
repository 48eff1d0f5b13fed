//! Practice record types, one per pipeline stage
//!
//! A practice moves through three shapes: sampled codes, resolved tariff
//! attributes, and the final fully computed [`Practice`] row.

use crate::error::{Result, SimError};
use serde::Serialize;

/// Sampled attributes of a practice, before any table lookup
#[derive(Debug, Clone, PartialEq)]
pub struct SampledPractice {
    /// Sequential id, 1..=N
    pub id: u32,
    pub n_physio: u32,
    pub n_treatments_per_day: u32,
    pub treatment_code: String,
    pub canton_code: String,
}

/// A sampled practice joined against the reference tables
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPractice {
    pub sampled: SampledPractice,
    pub treatment_name: String,
    /// Tariff points per session of the main treatment
    pub points: u32,
    /// Canton tariff point value multiplier
    pub multiplier: f64,
}

/// Intermediate stages of the base revenue formula
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RevenueBreakdown {
    pub points_per_session: f64,
    pub points_per_day: f64,
    pub points_per_month: f64,
    pub points_per_month_practice: f64,
    pub points_per_year: f64,
    pub base_annual_revenue: f64,
}

/// Annual supplement totals of a practice
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SupplementTotals {
    /// CHF equivalent of all triggered point supplements
    pub points_annual: f64,
    /// Sum of all triggered flat CHF supplements
    pub flat_annual: f64,
}

/// Fully computed practice, one row of the output dataset
///
/// Field order is the column order of the exported table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Practice {
    pub id: u32,
    pub n_physio: u32,
    pub n_treatments_per_day: u32,
    pub treatment_code: String,
    pub treatment_name: String,
    pub points: u32,
    pub canton_code: String,
    pub multiplier: f64,
    pub points_per_session: f64,
    pub points_per_day: f64,
    pub points_per_month: f64,
    pub points_per_month_practice: f64,
    pub points_per_year: f64,
    pub base_annual_revenue: f64,
    pub supplement_points_annual: f64,
    pub supplement_flat_annual: f64,
    pub total_annual_revenue: f64,
}

impl Practice {
    /// Combine the stage outputs into the final row
    pub fn assemble(resolved: ResolvedPractice, revenue: RevenueBreakdown, supplements: SupplementTotals) -> Self {
        let ResolvedPractice { sampled, treatment_name, points, multiplier } = resolved;

        Self {
            id: sampled.id,
            n_physio: sampled.n_physio,
            n_treatments_per_day: sampled.n_treatments_per_day,
            treatment_code: sampled.treatment_code,
            treatment_name,
            points,
            canton_code: sampled.canton_code,
            multiplier,
            points_per_session: revenue.points_per_session,
            points_per_day: revenue.points_per_day,
            points_per_month: revenue.points_per_month,
            points_per_month_practice: revenue.points_per_month_practice,
            points_per_year: revenue.points_per_year,
            base_annual_revenue: revenue.base_annual_revenue,
            supplement_points_annual: supplements.points_annual,
            supplement_flat_annual: supplements.flat_annual,
            total_annual_revenue: revenue.base_annual_revenue
                + supplements.points_annual
                + supplements.flat_annual,
        }
    }

    /// All floating-point fields with their column names
    pub fn numeric_fields(&self) -> [(&'static str, f64); 10] {
        [
            ("multiplier", self.multiplier),
            ("points_per_session", self.points_per_session),
            ("points_per_day", self.points_per_day),
            ("points_per_month", self.points_per_month),
            ("points_per_month_practice", self.points_per_month_practice),
            ("points_per_year", self.points_per_year),
            ("base_annual_revenue", self.base_annual_revenue),
            ("supplement_points_annual", self.supplement_points_annual),
            ("supplement_flat_annual", self.supplement_flat_annual),
            ("total_annual_revenue", self.total_annual_revenue),
        ]
    }

    /// Reject rows carrying negative or non-finite numbers
    pub fn check_domain(&self) -> Result<()> {
        for (field, value) in self.numeric_fields() {
            if !value.is_finite() || value < 0.0 {
                return Err(SimError::NumericDomain {
                    practice_id: self.id,
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}
