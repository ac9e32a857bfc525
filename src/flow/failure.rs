//! Failure-rate sources and the rank pairing between failure rates and flows.
//!
//! Failure rates are never paired at random: both the rates and the flows are
//! ordered ascending and matched index by index, so the smallest failure rate
//! always lands on the slowest flow.

use crate::types::constants::MIN_SURVIVAL;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FailureError {
    #[error("Expected {expected} failure rates, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
    #[error("Invalid failure rate: {0} (must be in [0, 1))")]
    InvalidRate(f64),
}

// ------------------------------------------------------------------------------------------------
// Failure Sources
// ------------------------------------------------------------------------------------------------

/// Produces one failure probability per flow
pub trait FailureSource {
    fn failure_rates(&mut self, count: usize) -> Vec<f64>;
}

impl<F: FailureSource + ?Sized> FailureSource for &mut F {
    fn failure_rates(&mut self, count: usize) -> Vec<f64> {
        (**self).failure_rates(count)
    }
}

/// Draws each failure rate as `1 - U(0.8, 1)`
#[derive(Debug, Clone)]
pub struct UniformFailure<R> {
    rng: R,
    survival: Uniform<f64>,
}

impl<R: Rng> UniformFailure<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            survival: Uniform::new(MIN_SURVIVAL, 1.0),
        }
    }
}

impl<R: Rng> FailureSource for UniformFailure<R> {
    fn failure_rates(&mut self, count: usize) -> Vec<f64> {
        (0..count)
            .map(|_| 1.0 - self.survival.sample(&mut self.rng))
            .collect()
    }
}

/// The same failure rate for every flow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedFailure(pub f64);

impl FailureSource for FixedFailure {
    fn failure_rates(&mut self, count: usize) -> Vec<f64> {
        vec![self.0; count]
    }
}

// ------------------------------------------------------------------------------------------------
// Assignment
// ------------------------------------------------------------------------------------------------

/// Failure rates matched to flows by ascending rank
#[derive(Debug, Clone, PartialEq)]
pub struct FailureAssignment {
    /// Flow indices ordered by ascending arrival rate (ties keep input order)
    order: Vec<usize>,
    /// Failure rates sorted ascending; `sorted_rates[k]` belongs to flow `order[k]`
    sorted_rates: Vec<f64>,
    /// Failure rate per flow, indexed like the input flows
    by_flow: Vec<f64>,
}

impl FailureAssignment {
    pub fn new(flows: &[f64], mut failure_rates: Vec<f64>) -> Result<Self, FailureError> {
        if failure_rates.len() != flows.len() {
            return Err(FailureError::CountMismatch {
                expected: flows.len(),
                actual: failure_rates.len(),
            });
        }
        if let Some(&bad) = failure_rates.iter().find(|r| !(**r >= 0.0 && **r < 1.0)) {
            return Err(FailureError::InvalidRate(bad));
        }

        failure_rates.sort_by(f64::total_cmp);
        let mut order: Vec<usize> = (0..flows.len()).collect();
        order.sort_by(|&a, &b| flows[a].total_cmp(&flows[b]));

        let mut by_flow = vec![0.0; flows.len()];
        for (rank, &flow_index) in order.iter().enumerate() {
            by_flow[flow_index] = failure_rates[rank];
        }

        Ok(Self {
            order,
            sorted_rates: failure_rates,
            by_flow,
        })
    }

    /// Flow indices from slowest to fastest
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Failure rate assigned to the flow at `flow_index` in the input batch
    pub fn rate_for(&self, flow_index: usize) -> f64 {
        self.by_flow[flow_index]
    }

    pub fn sorted_rates(&self) -> &[f64] {
        &self.sorted_rates
    }

    pub fn into_sorted_rates(self) -> Vec<f64> {
        self.sorted_rates
    }
}

/// Inflates a sojourn time for a flow losing `failure_rate` of its work
pub fn apply_failure(sojourn_time: f64, failure_rate: f64) -> f64 {
    sojourn_time / (1.0 - failure_rate)
}
