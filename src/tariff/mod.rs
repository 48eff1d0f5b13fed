//! Reference tariff tables: canton multipliers, treatment tariffs, supplements
//!
//! All three tables are closed sets. They are validated once at construction
//! and are read-only afterwards; every lookup of an unknown code is an error.

mod canton;
mod treatment;
mod supplement;

pub use canton::{CantonMultiplier, default_cantons};
pub use treatment::{TreatmentTariff, default_tariffs};
pub use supplement::{SupplementRule, SupplementValue, default_supplements};

use crate::error::{Result, SimError};
use std::collections::HashSet;

/// Allowed deviation of the summed treatment probabilities from 1.0
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Validated reference tables
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    cantons: Vec<CantonMultiplier>,
    tariffs: Vec<TreatmentTariff>,
    supplements: Vec<SupplementRule>,
}

impl ReferenceTables {
    /// Build and validate tables from explicit rows (canonical order = given order)
    pub fn new(
        cantons: Vec<CantonMultiplier>,
        tariffs: Vec<TreatmentTariff>,
        supplements: Vec<SupplementRule>,
    ) -> Result<Self> {
        let tables = Self { cantons, tariffs, supplements };
        tables.validate()?;
        Ok(tables)
    }

    /// The Swiss physiotherapy tariff tables
    pub fn swiss_physio() -> Result<Self> {
        Self::new(default_cantons(), default_tariffs(), default_supplements()?)
    }

    fn validate(&self) -> Result<()> {
        if self.cantons.is_empty() || self.tariffs.is_empty() {
            return Err(SimError::config("canton and tariff tables must not be empty"));
        }

        check_unique("canton", self.cantons.iter().map(|c| c.code.as_str()))?;
        check_unique("tariff", self.tariffs.iter().map(|t| t.code.as_str()))?;
        check_unique("supplement", self.supplements.iter().map(|s| s.code.as_str()))?;

        for canton in &self.cantons {
            if !canton.multiplier.is_finite() || canton.multiplier <= 0.0 {
                return Err(SimError::config(format!(
                    "canton {} has invalid multiplier {}",
                    canton.code, canton.multiplier
                )));
            }
        }

        for tariff in &self.tariffs {
            if tariff.points == 0 {
                return Err(SimError::config(format!("tariff {} has zero points", tariff.code)));
            }
            if !(tariff.probability > 0.0 && tariff.probability <= 1.0) {
                return Err(SimError::config(format!(
                    "tariff {} has probability {} outside (0, 1]",
                    tariff.code, tariff.probability
                )));
            }
        }

        let total: f64 = self.tariffs.iter().map(|t| t.probability).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(SimError::config(format!(
                "tariff probabilities sum to {}, expected 1.0",
                total
            )));
        }

        for rule in &self.supplements {
            if !(0.0..=1.0).contains(&rule.trigger_probability) {
                return Err(SimError::config(format!(
                    "supplement {} has trigger probability {} outside [0, 1]",
                    rule.code, rule.trigger_probability
                )));
            }
            if let SupplementValue::AnnualFlat(chf) = rule.value {
                if !chf.is_finite() || chf < 0.0 {
                    return Err(SimError::config(format!(
                        "supplement {} has invalid flat amount {}",
                        rule.code, chf
                    )));
                }
            }
        }

        Ok(())
    }

    /// Multiplier for a canton code
    pub fn multiplier_for(&self, canton_code: &str) -> Result<f64> {
        self.canton_for(canton_code).map(|c| c.multiplier)
    }

    pub fn canton_for(&self, canton_code: &str) -> Result<&CantonMultiplier> {
        self.cantons
            .iter()
            .find(|c| c.code == canton_code)
            .ok_or_else(|| SimError::lookup("canton", canton_code))
    }

    pub fn tariff_for(&self, code: &str) -> Result<&TreatmentTariff> {
        self.tariffs
            .iter()
            .find(|t| t.code == code)
            .ok_or_else(|| SimError::lookup("tariff", code))
    }

    pub fn all_cantons(&self) -> &[CantonMultiplier] {
        &self.cantons
    }

    pub fn all_tariffs(&self) -> &[TreatmentTariff] {
        &self.tariffs
    }

    pub fn all_supplements(&self) -> &[SupplementRule] {
        &self.supplements
    }

    /// Most probable treatment (first in canonical order on ties),
    /// used as the regression baseline category
    pub fn baseline_tariff(&self) -> &TreatmentTariff {
        self.tariffs
            .iter()
            .fold(&self.tariffs[0], |best, t| if t.probability > best.probability { t } else { best })
    }
}

fn check_unique<'a>(table: &str, codes: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for code in codes {
        if !seen.insert(code) {
            return Err(SimError::config(format!("duplicate {} code '{}'", table, code)));
        }
    }
    Ok(())
}
