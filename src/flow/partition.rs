use crate::types::constants::{MAX_SPLIT_COUNT, MAX_SPLIT_MAGNITUDE};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

// ------------------------------------------------------------------------------------------------
// Partition Sources
// ------------------------------------------------------------------------------------------------

/// Produces the weights one flow is fractured into; weights are positive and sum to 1
pub trait PartitionSource {
    fn split_weights(&mut self) -> Vec<f64>;
}

impl<P: PartitionSource + ?Sized> PartitionSource for &mut P {
    fn split_weights(&mut self) -> Vec<f64> {
        (**self).split_weights()
    }
}

/// Draws a random number of sub-flows with random integer magnitudes
#[derive(Debug, Clone)]
pub struct RandomPartition<R> {
    rng: R,
}

impl<R: Rng> RandomPartition<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> PartitionSource for RandomPartition<R> {
    fn split_weights(&mut self) -> Vec<f64> {
        split_weights(&mut self.rng)
    }
}

/// Returns the same weights on every call
#[derive(Debug, Clone, PartialEq)]
pub struct FixedPartition {
    weights: Vec<f64>,
}

impl FixedPartition {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// `parts` equal shares; zero parts yields an empty partition
    pub fn even(parts: usize) -> Self {
        Self::new(vec![1.0 / parts as f64; parts])
    }
}

impl PartitionSource for FixedPartition {
    fn split_weights(&mut self) -> Vec<f64> {
        self.weights.clone()
    }
}

// ------------------------------------------------------------------------------------------------
// Weight Generation
// ------------------------------------------------------------------------------------------------

/// Draws a count in [1, 99]; a count of 1 leaves the flow whole, otherwise
/// `count` magnitudes in [1, 9] are normalized by their sum.
pub fn split_weights<R: Rng + ?Sized>(rng: &mut R) -> Vec<f64> {
    let count = rng.gen_range(1..=MAX_SPLIT_COUNT);
    if count == 1 {
        return vec![1.0];
    }
    let magnitude = Uniform::new_inclusive(1u32, MAX_SPLIT_MAGNITUDE);
    let magnitudes: Vec<u32> = (0..count).map(|_| magnitude.sample(rng)).collect();
    let total = f64::from(magnitudes.iter().sum::<u32>());
    magnitudes.into_iter().map(|m| f64::from(m) / total).collect()
}
