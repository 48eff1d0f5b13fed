//! Join sampled practice codes against the reference tables

use super::{ResolvedPractice, SampledPractice};
use crate::error::Result;
use crate::tariff::ReferenceTables;

/// Resolve treatment and canton codes into tariff attributes
///
/// Fails with a lookup error if either code is missing from its table.
pub fn resolve(sampled: &SampledPractice, tables: &ReferenceTables) -> Result<ResolvedPractice> {
    let tariff = tables.tariff_for(&sampled.treatment_code)?;
    let multiplier = tables.multiplier_for(&sampled.canton_code)?;

    Ok(ResolvedPractice {
        sampled: sampled.clone(),
        treatment_name: tariff.name.clone(),
        points: tariff.points,
        multiplier,
    })
}
