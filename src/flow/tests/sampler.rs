use crate::flow::sampler::{FlowRateSampler, SamplerError};
use crate::utils::logging;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Tests that every consecutive pair averages to the mean:
/// - count=10, mean=20, bounds [1, 24)
/// - each pair sums to exactly 40
/// - all rates stay within bounds
#[test]
fn test_generate_pairs_sum_to_twice_mean() {
    logging::init_logging();
    let sampler = FlowRateSampler::new(20, 1, 24).expect("Failed to create sampler");
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let rates = sampler.generate(10, &mut rng).expect("Failed to generate rates");
        assert_eq!(rates.len(), 10);
        for pair in rates.chunks(2) {
            assert_eq!(pair[0] + pair[1], 40.0, "pair {:?} does not sum to 40", pair);
        }
        for rate in &rates {
            assert!((1.0..=24.0).contains(rate), "rate {} out of bounds", rate);
        }
    }
}

#[test]
fn test_generate_mean_is_exact() {
    let sampler = FlowRateSampler::new(20, 1, 50).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let rates = sampler.generate(50, &mut rng).unwrap();
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    assert_eq!(mean, 20.0);
}

#[test]
fn test_generate_is_reproducible_with_seed() {
    let sampler = FlowRateSampler::new(20, 1, 50).unwrap();
    let first = sampler.generate(20, &mut StdRng::seed_from_u64(99)).unwrap();
    let second = sampler.generate(20, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_generate_rates_are_whole_numbers() {
    let sampler = FlowRateSampler::new(20, 1, 50).unwrap();
    let rates = sampler.generate(40, &mut StdRng::seed_from_u64(3)).unwrap();
    assert!(rates.iter().all(|r| r.fract() == 0.0));
}

#[test]
fn test_narrow_acceptance_window() {
    // Only first draws 22 and 23 have a complement within [1, 24]
    let sampler = FlowRateSampler::new(23, 1, 24).unwrap();
    let rates = sampler.generate(100, &mut StdRng::seed_from_u64(11)).unwrap();
    assert!(rates.iter().all(|r| [22.0, 23.0, 24.0].contains(r)));
}

#[test]
fn test_zero_count_yields_empty_sequence() {
    let sampler = FlowRateSampler::new(20, 1, 24).unwrap();
    assert!(sampler.generate(0, &mut StdRng::seed_from_u64(0)).unwrap().is_empty());
}

#[test]
fn test_odd_count_is_rejected() {
    let sampler = FlowRateSampler::new(20, 1, 24).unwrap();
    assert_eq!(
        sampler.generate(7, &mut StdRng::seed_from_u64(0)),
        Err(SamplerError::OddCount(7))
    );
}

#[test]
fn test_unsatisfiable_bounds_are_rejected() {
    assert_eq!(
        FlowRateSampler::new(100, 1, 24).unwrap_err(),
        SamplerError::Unsatisfiable { mean: 100, lower: 1, upper: 24 }
    );
    // The draw never reaches 24, so its complement always exceeds the bound
    assert!(matches!(FlowRateSampler::new(24, 1, 24), Err(SamplerError::Unsatisfiable { .. })));
    assert!(matches!(FlowRateSampler::new(0, 1, 24), Err(SamplerError::Unsatisfiable { .. })));
}

#[test]
fn test_empty_range_is_rejected() {
    assert_eq!(
        FlowRateSampler::new(20, 24, 24).unwrap_err(),
        SamplerError::EmptyRange { lower: 24, upper: 24 }
    );
    assert!(matches!(FlowRateSampler::new(20, 30, 10), Err(SamplerError::EmptyRange { .. })));
}
