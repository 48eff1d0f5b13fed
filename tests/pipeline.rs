use approx::assert_abs_diff_eq;
use physio_revenue_sim::export::write_practices;
use physio_revenue_sim::practice::sampler::{PHYSIO_RANGE, TREATMENTS_PER_DAY_RANGE};
use physio_revenue_sim::practice::{joiner, supplement, SampledPractice};
use physio_revenue_sim::tariff::SupplementValue;
use physio_revenue_sim::{Practice, ReferenceTables, RevenueSummary, SimulationEngine, SimulationParams};
use rand::distributions::{Distribution, Uniform, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn run(params: SimulationParams) -> Vec<Practice> {
    let tables = ReferenceTables::swiss_physio().unwrap();
    SimulationEngine::new(&tables, params).unwrap().run_seeded().unwrap()
}

fn to_csv(practices: &[Practice]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_practices(&mut buf, practices).unwrap();
    buf
}

#[test]
fn determinism_byte_identical_tables() {
    let a = run(SimulationParams::default());
    let b = run(SimulationParams::default());

    assert_eq!(a.len(), 160);
    assert_eq!(a, b);
    assert_eq!(to_csv(&a), to_csv(&b));
}

#[test]
fn scenario_five_practices_reproducible() {
    let params = SimulationParams {
        n_practices: 5,
        seed: 42,
        working_days_per_month: 21,
        point_to_chf_rate: 1.0,
    };

    let first: Vec<f64> = run(params.clone()).iter().map(|p| p.total_annual_revenue).collect();
    let second: Vec<f64> = run(params).iter().map(|p| p.total_annual_revenue).collect();

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[test]
fn injected_stream_matches_seeded_run() {
    let tables = ReferenceTables::swiss_physio().unwrap();
    let params = SimulationParams { n_practices: 25, seed: 99, ..Default::default() };
    let engine = SimulationEngine::new(&tables, params).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    assert_eq!(engine.run(&mut rng).unwrap(), engine.run_seeded().unwrap());
}

fn replay_rounded<R: Rng>(rng: &mut R, (lo, hi): (f64, f64), n: usize) -> Vec<u32> {
    let dist = Uniform::new_inclusive(lo, hi);
    (0..n).map(|_| dist.sample(&mut *rng).round_ties_even() as u32).collect()
}

#[test]
fn random_stream_consumed_in_pipeline_order() {
    let tables = ReferenceTables::swiss_physio().unwrap();
    let n = 40;
    let params = SimulationParams { n_practices: n, seed: 2024, ..Default::default() };
    let engine = SimulationEngine::new(&tables, params).unwrap();
    let practices = engine.run(&mut ChaCha8Rng::seed_from_u64(2024)).unwrap();

    // Sampler batches: n_physio, treatments/day, weighted treatment, canton
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let n_physio = replay_rounded(&mut rng, PHYSIO_RANGE, n);
    let n_treatments = replay_rounded(&mut rng, TREATMENTS_PER_DAY_RANGE, n);

    let tariffs = tables.all_tariffs();
    let weighted = WeightedIndex::new(tariffs.iter().map(|t| t.probability)).unwrap();
    let treatment_idx: Vec<usize> = (0..n).map(|_| weighted.sample(&mut rng)).collect();

    let cantons = tables.all_cantons();
    let uniform = Uniform::from(0..cantons.len());
    let canton_idx: Vec<usize> = (0..n).map(|_| uniform.sample(&mut rng)).collect();

    // Supplement draws: practice-major, one per rule, active iff draw < p
    let rules = tables.all_supplements();
    let (mut triggered, mut skipped) = (0, 0);

    assert_eq!(practices.len(), n);
    for (i, p) in practices.iter().enumerate() {
        assert_eq!(p.n_physio, n_physio[i], "practice {} n_physio", p.id);
        assert_eq!(p.n_treatments_per_day, n_treatments[i], "practice {} treatments/day", p.id);
        assert_eq!(p.treatment_code, tariffs[treatment_idx[i]].code, "practice {} treatment", p.id);
        assert_eq!(p.canton_code, cantons[canton_idx[i]].code, "practice {} canton", p.id);

        let sampled = SampledPractice {
            id: (i + 1) as u32,
            n_physio: n_physio[i],
            n_treatments_per_day: n_treatments[i],
            treatment_code: tariffs[treatment_idx[i]].code.clone(),
            canton_code: cantons[canton_idx[i]].code.clone(),
        };
        let resolved = joiner::resolve(&sampled, &tables).unwrap();

        let (mut points, mut flat) = (0.0, 0.0);
        for rule in rules {
            let draw: f64 = rng.gen();
            if draw < rule.trigger_probability {
                let add = supplement::contribution(rule, &resolved, engine.params().working_days_per_month);
                points += add.points_annual;
                flat += add.flat_annual;
                triggered += 1;
            } else {
                skipped += 1;
            }
        }
        assert_abs_diff_eq!(p.supplement_points_annual, points, epsilon = 1e-6);
        assert_eq!(p.supplement_flat_annual, flat, "practice {} flat supplements", p.id);
    }

    assert!(triggered > 0 && skipped > 0);
}

#[test]
fn all_numeric_fields_non_negative_and_finite() {
    let practices = run(SimulationParams { n_practices: 1000, seed: 5, ..Default::default() });

    for p in &practices {
        for (field, value) in p.numeric_fields() {
            assert!(value.is_finite() && value >= 0.0, "practice {} {} = {}", p.id, field, value);
        }
        assert!(p.points > 0);
    }
}

#[test]
fn supplement_totals_bounded() {
    let tables = ReferenceTables::swiss_physio().unwrap();
    let flat_max: f64 = tables.all_supplements().iter().map(|r| r.value.flat_amount()).sum();
    assert_eq!(flat_max, 140.0);

    let flat_subsets = [0.0, 50.0, 90.0, 140.0];
    let days = 21.0 * 12.0 * 0.6;

    for p in run(SimulationParams { n_practices: 1000, seed: 17, ..Default::default() }) {
        assert!(flat_subsets.contains(&p.supplement_flat_annual));

        // Upper bound: every point rule triggered at once
        let all_points: f64 = tables
            .all_supplements()
            .iter()
            .filter_map(|r| match r.value {
                SupplementValue::Points(points) => Some(points as f64),
                SupplementValue::AnnualFlat(_) => None,
            })
            .map(|points| points * p.n_treatments_per_day as f64 * days * p.multiplier)
            .sum();
        assert!(p.supplement_points_annual >= 0.0);
        assert!(p.supplement_points_annual <= all_points + 1e-6);
    }
}

#[test]
fn group_coverage_counts_sum_to_n() {
    let tables = ReferenceTables::swiss_physio().unwrap();
    let practices = run(SimulationParams::default());
    let summary = RevenueSummary::build(&practices, &tables);

    assert_eq!(summary.overall.count, 160);
    assert!(summary.by_canton.len() <= 26);
    assert!(summary.by_treatment.len() <= 7);
    assert!(summary.by_physio.len() <= 6);

    assert_eq!(summary.by_canton.iter().map(|r| r.count).sum::<usize>(), 160);
    assert_eq!(summary.by_treatment.iter().map(|r| r.count).sum::<usize>(), 160);
    assert_eq!(summary.by_physio.iter().map(|r| r.count).sum::<usize>(), 160);
}

#[test]
fn ids_sequential_and_codes_resolvable() {
    let tables = ReferenceTables::swiss_physio().unwrap();
    let practices = run(SimulationParams::default());

    for (i, p) in practices.iter().enumerate() {
        assert_eq!(p.id as usize, i + 1);
        let tariff = tables.tariff_for(&p.treatment_code).unwrap();
        assert_eq!(tariff.name, p.treatment_name);
        assert_eq!(tariff.points, p.points);
        assert_eq!(tables.multiplier_for(&p.canton_code).unwrap(), p.multiplier);
    }
}
