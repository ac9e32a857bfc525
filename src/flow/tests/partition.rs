use crate::flow::partition::{split_weights, FixedPartition, PartitionSource, RandomPartition};
use crate::types::constants::MAX_SPLIT_COUNT;
use rand::rngs::StdRng;
use rand::SeedableRng;
use super::assert_close;

#[test]
fn test_split_weights_sum_to_one() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..1_000 {
        let weights = split_weights(&mut rng);
        assert!(!weights.is_empty());
        assert!(weights.len() <= MAX_SPLIT_COUNT as usize);
        assert!(weights.iter().all(|w| *w > 0.0 && *w <= 1.0));
        assert_close(weights.iter().sum(), 1.0, "sum of weights");
    }
}

#[test]
fn test_split_weights_magnitude_granularity() {
    // Each weight is m / total with m in [1, 9], so ratios to the smallest stay within 9x
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..200 {
        let weights = split_weights(&mut rng);
        let smallest = weights.iter().cloned().fold(f64::INFINITY, f64::min);
        let largest = weights.iter().cloned().fold(0.0, f64::max);
        assert!(largest / smallest <= 9.0 + 1e-9);
    }
}

#[test]
fn test_random_partition_is_reproducible() {
    let mut first = RandomPartition::new(StdRng::seed_from_u64(1));
    let mut second = RandomPartition::new(StdRng::seed_from_u64(1));
    for _ in 0..20 {
        assert_eq!(first.split_weights(), second.split_weights());
    }
}

#[test]
fn test_fixed_partition() {
    let mut even = FixedPartition::even(4);
    assert_eq!(even.split_weights(), vec![0.25; 4]);
    assert_eq!(even.split_weights(), vec![0.25; 4]);
    assert!(FixedPartition::even(0).split_weights().is_empty());

    // Borrowed sources forward to the underlying one
    fn draw<P: PartitionSource>(mut source: P) -> Vec<f64> {
        source.split_weights()
    }
    let mut whole = FixedPartition::new(vec![1.0]);
    assert_eq!(draw(&mut whole), vec![1.0]);
}
