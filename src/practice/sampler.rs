//! Random practice sampler
//!
//! Draw order is part of the reproducibility contract. Each field is drawn
//! as one batch over all practices, in this order:
//! 1. `n_physio` for practices 1..=n
//! 2. `n_treatments_per_day` for practices 1..=n
//! 3. treatment code (weighted by tariff probability) for practices 1..=n
//! 4. canton code (equal weight) for practices 1..=n
//!
//! Changing this order changes every result under the same seed.

use super::SampledPractice;
use crate::error::{Result, SimError};
use crate::tariff::ReferenceTables;
use log::debug;
use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::Rng;

/// Continuous range drawn for the number of physiotherapists
pub const PHYSIO_RANGE: (f64, f64) = (1.0, 6.0);

/// Continuous range drawn for treatments per physiotherapist and day
pub const TREATMENTS_PER_DAY_RANGE: (f64, f64) = (8.0, 20.0);

/// Samples practice attributes from the reference tables
pub struct PracticeSampler<'a> {
    tables: &'a ReferenceTables,
}

impl<'a> PracticeSampler<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self { tables }
    }

    /// Draw `n` practices with ids 1..=n
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Vec<SampledPractice>> {
        let n_physio = draw_rounded(&mut *rng, PHYSIO_RANGE, n);
        let n_treatments = draw_rounded(&mut *rng, TREATMENTS_PER_DAY_RANGE, n);

        let tariffs = self.tables.all_tariffs();
        let weighted = WeightedIndex::new(tariffs.iter().map(|t| t.probability))
            .map_err(|e| SimError::config(format!("invalid tariff weights: {}", e)))?;
        let treatment_idx: Vec<usize> = (0..n).map(|_| weighted.sample(&mut *rng)).collect();

        let cantons = self.tables.all_cantons();
        let uniform = Uniform::from(0..cantons.len());
        let canton_idx: Vec<usize> = (0..n).map(|_| uniform.sample(&mut *rng)).collect();

        let practices: Vec<SampledPractice> = (0..n)
            .map(|i| SampledPractice {
                id: (i + 1) as u32,
                n_physio: n_physio[i],
                n_treatments_per_day: n_treatments[i],
                treatment_code: tariffs[treatment_idx[i]].code.clone(),
                canton_code: cantons[canton_idx[i]].code.clone(),
            })
            .collect();

        debug!("Sampled {} practices", practices.len());
        Ok(practices)
    }
}

/// Draw `n` continuous uniform values on `[lo, hi]` and round each to the
/// nearest integer, ties to even
///
/// The endpoints only collect half the mass of interior integers; this is
/// the intended distribution, not a discrete uniform.
fn draw_rounded<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f64, f64), n: usize) -> Vec<u32> {
    let dist = Uniform::new_inclusive(lo, hi);
    (0..n).map(|_| dist.sample(&mut *rng).round_ties_even() as u32).collect()
}
