//! Base revenue calculator
//!
//! Pure multiplicative chain from session points to annual revenue. Every
//! stage is kept on the record; nothing is rounded along the way.

use super::{ResolvedPractice, RevenueBreakdown};

/// Months per year used to annualize monthly points
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Calendar and conversion inputs of the revenue formula
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevenueParams {
    pub working_days_per_month: u32,
    /// CHF per tariff point after the canton multiplier
    pub point_to_chf_rate: f64,
}

/// Compute the base revenue stages for a resolved practice
pub fn calculate(practice: &ResolvedPractice, params: &RevenueParams) -> RevenueBreakdown {
    let points_per_session = practice.points as f64 * practice.multiplier;
    let points_per_day = practice.sampled.n_treatments_per_day as f64 * points_per_session;
    let points_per_month = points_per_day * params.working_days_per_month as f64;
    let points_per_month_practice = points_per_month * practice.sampled.n_physio as f64;
    let points_per_year = points_per_month_practice * MONTHS_PER_YEAR;
    let base_annual_revenue = points_per_year * params.point_to_chf_rate;

    RevenueBreakdown {
        points_per_session,
        points_per_day,
        points_per_month,
        points_per_month_practice,
        points_per_year,
        base_annual_revenue,
    }
}
