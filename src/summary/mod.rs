//! Grouped revenue summaries over the simulated dataset
//!
//! Produces the overall summary plus one row per canton, treatment and staff
//! count. Groups follow the reference domain in canonical order, so a group
//! that drew no practices is still reported (count 0) and the counts of every
//! grouping sum to the dataset size.

mod stats;

pub use stats::SummaryStats;

use crate::practice::sampler::PHYSIO_RANGE;
use crate::practice::Practice;
use crate::tariff::ReferenceTables;
use log::warn;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Revenue statistics for one canton
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CantonSummary {
    pub canton_code: String,
    pub multiplier: f64,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Revenue statistics for one main treatment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreatmentSummary {
    pub treatment_code: String,
    pub treatment_name: String,
    pub points: u32,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Revenue statistics for one physiotherapist count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhysioSummary {
    pub n_physio: u32,
    pub count: usize,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std_dev: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// All summaries of `total_annual_revenue`
#[derive(Debug, Clone, PartialEq)]
pub struct RevenueSummary {
    pub overall: SummaryStats,
    pub by_canton: Vec<CantonSummary>,
    pub by_treatment: Vec<TreatmentSummary>,
    pub by_physio: Vec<PhysioSummary>,
}

impl RevenueSummary {
    pub fn build(practices: &[Practice], tables: &ReferenceTables) -> Self {
        let revenues: Vec<f64> = practices.iter().map(|p| p.total_annual_revenue).collect();

        Self {
            overall: SummaryStats::from_values(&revenues),
            by_canton: by_canton(practices, tables),
            by_treatment: by_treatment(practices, tables),
            by_physio: by_physio(practices),
        }
    }
}

fn group_revenue<'p, K, F>(practices: &'p [Practice], key: F) -> HashMap<K, Vec<f64>>
where
    K: std::hash::Hash + Eq,
    F: Fn(&'p Practice) -> K,
{
    let mut groups: HashMap<K, Vec<f64>> = HashMap::new();
    for p in practices {
        groups.entry(key(p)).or_default().push(p.total_annual_revenue);
    }
    groups
}

fn stats_for<K: std::hash::Hash + Eq>(groups: &HashMap<K, Vec<f64>>, key: &K, label: &str) -> SummaryStats {
    let values = groups.get(key).map(Vec::as_slice).unwrap_or(&[]);
    if values.is_empty() {
        warn!("No practices sampled for {}", label);
    }
    SummaryStats::from_values(values)
}

pub fn by_canton(practices: &[Practice], tables: &ReferenceTables) -> Vec<CantonSummary> {
    let groups = group_revenue(practices, |p| p.canton_code.as_str());

    tables
        .all_cantons()
        .iter()
        .map(|canton| {
            let s = stats_for(&groups, &canton.code.as_str(), &format!("canton {}", canton.code));
            CantonSummary {
                canton_code: canton.code.clone(),
                multiplier: canton.multiplier,
                count: s.count,
                mean: s.mean,
                median: s.median,
                std_dev: s.std_dev,
                min: s.min,
                max: s.max,
            }
        })
        .collect()
}

pub fn by_treatment(practices: &[Practice], tables: &ReferenceTables) -> Vec<TreatmentSummary> {
    let groups = group_revenue(practices, |p| p.treatment_code.as_str());

    tables
        .all_tariffs()
        .iter()
        .map(|tariff| {
            let s = stats_for(&groups, &tariff.code.as_str(), &format!("treatment {}", tariff.code));
            TreatmentSummary {
                treatment_code: tariff.code.clone(),
                treatment_name: tariff.name.clone(),
                points: tariff.points,
                count: s.count,
                mean: s.mean,
                median: s.median,
                std_dev: s.std_dev,
                min: s.min,
                max: s.max,
            }
        })
        .collect()
}

pub fn by_physio(practices: &[Practice]) -> Vec<PhysioSummary> {
    let groups = group_revenue(practices, |p| p.n_physio);

    // Full staff-count domain, plus anything observed outside it
    let (lo, hi) = PHYSIO_RANGE;
    let mut keys: BTreeSet<u32> = (lo as u32..=hi as u32).collect();
    keys.extend(groups.keys().copied());

    keys.into_iter()
        .map(|n_physio| {
            let s = stats_for(&groups, &n_physio, &format!("{} physiotherapists", n_physio));
            PhysioSummary {
                n_physio,
                count: s.count,
                mean: s.mean,
                median: s.median,
                std_dev: s.std_dev,
                min: s.min,
                max: s.max,
            }
        })
        .collect()
}
