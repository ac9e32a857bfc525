//! Synthetic arrival-rate generation.
//!
//! Rates come in pairs `(a, 2·mean - a)`, so every consecutive pair averages
//! exactly to the target mean.

use crate::utils::logging;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SamplerError {
    #[error("Flow count must be even, got {0}")]
    OddCount(usize),
    #[error("Empty draw range [{lower}, {upper})")]
    EmptyRange { lower: u32, upper: u32 },
    #[error("No rate in [{lower}, {upper}) has a complement around mean {mean} inside [{lower}, {upper}]")]
    Unsatisfiable { mean: u32, lower: u32, upper: u32 },
}

/// Generates arrival rates paired around a fixed mean
#[derive(Debug, Clone)]
pub struct FlowRateSampler {
    mean: u32,
    lower_bound: u32,
    upper_bound: u32,
    draw: Uniform<u32>,
}

impl FlowRateSampler {
    /// Creates a sampler, failing if no draw could ever be accepted
    ///
    /// # Arguments
    /// * `mean` - Target mean of every generated pair
    /// * `lower_bound` - Smallest rate, inclusive for both the draw and its complement
    /// * `upper_bound` - Exclusive for the draw, inclusive for the complement
    pub fn new(mean: u32, lower_bound: u32, upper_bound: u32) -> Result<Self, SamplerError> {
        if lower_bound >= upper_bound {
            return Err(SamplerError::EmptyRange {
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        let sampler = Self {
            mean,
            lower_bound,
            upper_bound,
            draw: Uniform::new(lower_bound, upper_bound),
        };
        let (low, high) = sampler.acceptance_range();
        if low > high {
            return Err(SamplerError::Unsatisfiable {
                mean,
                lower: lower_bound,
                upper: upper_bound,
            });
        }
        Ok(sampler)
    }

    pub fn mean(&self) -> u32 {
        self.mean
    }

    pub fn bounds(&self) -> (u32, u32) {
        (self.lower_bound, self.upper_bound)
    }

    /// Generates `count` rates as `count / 2` consecutive complementary pairs
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Result<Vec<f64>, SamplerError> {
        if count % 2 != 0 {
            return Err(SamplerError::OddCount(count));
        }
        let mut rates = Vec::with_capacity(count);
        for _ in 0..count / 2 {
            let (first, second) = self.draw_pair(rng);
            rates.push(f64::from(first));
            rates.push(f64::from(second));
        }
        logging::log("FLOW_SAMPLER", &format!(
            "Generated {} rates around mean {} within [{}, {})",
            rates.len(), self.mean, self.lower_bound, self.upper_bound
        ));
        Ok(rates)
    }

    /// Rejection-samples one pair; terminates since the constructor checked the acceptance range
    fn draw_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (u32, u32) {
        let target = 2 * i64::from(self.mean);
        loop {
            let first = self.draw.sample(rng);
            let second = target - i64::from(first);
            if second >= i64::from(self.lower_bound) && second <= i64::from(self.upper_bound) {
                if let Ok(second) = u32::try_from(second) {
                    return (first, second);
                }
            }
        }
    }

    /// Inclusive range of first draws whose complement is in bounds
    fn acceptance_range(&self) -> (i64, i64) {
        let target = 2 * i64::from(self.mean);
        let lower = i64::from(self.lower_bound);
        let upper = i64::from(self.upper_bound);
        (lower.max(target - upper), (upper - 1).min(target - lower))
    }
}
