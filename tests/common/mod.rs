use rand::rngs::StdRng;
use rand::SeedableRng;

/// Batch settings of the reference single-server scenarios
pub const FLOW_COUNT: usize = 50;
pub const FLOW_MEAN: u32 = 20;
pub const FLOW_LOWER: u32 = 1;

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
