//! Simulation pipeline: sample → join → revenue → supplements
//!
//! The random stream is injected by the caller. The sampler consumes its
//! batched draws first, then the supplement engine consumes one draw per
//! (practice, rule) pair, practice-major. Stages never share mutable state
//! across practices apart from the stream itself.

use super::SimulationParams;
use crate::error::Result;
use crate::practice::{joiner, revenue, supplement, Practice, PracticeSampler};
use crate::tariff::ReferenceTables;
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Runs the practice pipeline against a set of reference tables
pub struct SimulationEngine<'a> {
    tables: &'a ReferenceTables,
    params: SimulationParams,
}

impl<'a> SimulationEngine<'a> {
    pub fn new(tables: &'a ReferenceTables, params: SimulationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { tables, params })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Run with a fresh ChaCha8 stream seeded from `params.seed`
    pub fn run_seeded(&self) -> Result<Vec<Practice>> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);
        self.run(&mut rng)
    }

    /// Run the full pipeline with the given random stream
    pub fn run<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Practice>> {
        let revenue_params = self.params.revenue_params();
        let working_days = self.params.working_days_per_month;
        let rules = self.tables.all_supplements();

        info!("Sampling {} practices (seed {})", self.params.n_practices, self.params.seed);
        let sampled = PracticeSampler::new(self.tables).generate(self.params.n_practices, &mut *rng)?;

        let mut practices = Vec::with_capacity(sampled.len());
        for s in &sampled {
            let resolved = joiner::resolve(s, self.tables)?;
            let base = revenue::calculate(&resolved, &revenue_params);
            let supplements = supplement::apply(&resolved, rules, working_days, &mut *rng);

            let practice = Practice::assemble(resolved, base, supplements);
            practice.check_domain()?;

            debug!(
                "Practice {}: {} in {}, base {:.2}, supplements {:.2} + {:.2}",
                practice.id,
                practice.treatment_code,
                practice.canton_code,
                practice.base_annual_revenue,
                practice.supplement_points_annual,
                practice.supplement_flat_annual,
            );
            practices.push(practice);
        }

        info!("Computed revenue for {} practices", practices.len());
        Ok(practices)
    }
}
