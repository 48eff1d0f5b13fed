//! Supplement engine
//!
//! Each practice evaluates every supplement rule in canonical order, drawing
//! exactly one uniform value per rule whether or not the rule triggers. Across
//! a dataset the draws are therefore consumed practice-major, rule-minor.

use super::{ResolvedPractice, SupplementTotals};
use crate::tariff::{SupplementRule, SupplementValue};
use rand::Rng;

/// Fraction of working days a triggered point supplement is billed on
///
/// Fixed modelling constant; all numeric fixtures depend on its value.
pub const TRIGGERED_DAY_FRACTION: f64 = 0.6;

/// Working days per year on which a triggered point supplement is billed
pub fn triggered_days_per_year(working_days_per_month: u32) -> f64 {
    working_days_per_month as f64 * 12.0 * TRIGGERED_DAY_FRACTION
}

/// Annual contribution of one active rule
pub fn contribution(rule: &SupplementRule, practice: &ResolvedPractice, working_days_per_month: u32) -> SupplementTotals {
    match rule.value {
        SupplementValue::Points(points) => SupplementTotals {
            points_annual: points as f64
                * practice.sampled.n_treatments_per_day as f64
                * triggered_days_per_year(working_days_per_month)
                * practice.multiplier,
            flat_annual: 0.0,
        },
        SupplementValue::AnnualFlat(chf) => SupplementTotals {
            points_annual: 0.0,
            flat_annual: chf,
        },
    }
}

/// Draw triggers for all rules and fold the active contributions
pub fn apply<R: Rng + ?Sized>(
    practice: &ResolvedPractice,
    rules: &[SupplementRule],
    working_days_per_month: u32,
    rng: &mut R,
) -> SupplementTotals {
    rules.iter().fold(SupplementTotals::default(), |acc, rule| {
        let draw: f64 = rng.gen();
        if draw < rule.trigger_probability {
            let add = contribution(rule, practice, working_days_per_month);
            SupplementTotals {
                points_annual: acc.points_annual + add.points_annual,
                flat_annual: acc.flat_annual + add.flat_annual,
            }
        } else {
            acc
        }
    })
}
