use crate::flow::failure::{apply_failure, FailureAssignment, FailureError, FailureSource, UniformFailure};
use crate::flow::merge::merge_groups;
use crate::flow::partition::{PartitionSource, RandomPartition};
use crate::queue_model::{sojourn_time, QueueError};
use crate::types::constants::FAILURE_STREAM;
use crate::types::{CompositionPolicy, CompositionResult, TrailingMerge};
use crate::utils::logging;
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ComposerError {
    #[error("Invalid service configuration: {0}")]
    InvalidService(QueueError),
    #[error("Flow {flow_index} cannot be evaluated: {source}")]
    Queue {
        flow_index: usize,
        #[source]
        source: QueueError,
    },
    #[error("Flow {flow_index} was split into zero sub-flows")]
    EmptyPartition { flow_index: usize },
    #[error("Failure assignment failed: {0}")]
    Failure(#[from] FailureError),
}

impl ComposerError {
    /// Whether fresh random draws could make the same call succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ComposerError::Queue { source: QueueError::Unstable { .. }, .. }
                | ComposerError::EmptyPartition { .. }
        )
    }
}

/// Randomly seeded composer used by the simulator
pub type SeededComposer = FlowComposer<RandomPartition<StdRng>, UniformFailure<StdRng>>;

// ------------------------------------------------------------------------------------------------
// Composer
// ------------------------------------------------------------------------------------------------

/// Applies split/merge/failure policies to batches of arrival rates and
/// reports the sojourn time of every resulting flow or group.
#[derive(Debug, Clone)]
pub struct FlowComposer<P, F> {
    service_rate: f64,
    server_count: u32,
    trailing_merge: TrailingMerge,
    partitions: P,
    failures: F,
}

impl SeededComposer {
    /// Partition and failure draws come from two independent streams derived from `seed`
    pub fn seeded(service_rate: f64, server_count: u32, seed: u64) -> Result<Self, ComposerError> {
        FlowComposer::new(
            service_rate,
            server_count,
            RandomPartition::new(StdRng::seed_from_u64(seed)),
            UniformFailure::new(StdRng::seed_from_u64(seed ^ FAILURE_STREAM)),
        )
    }

    pub fn from_entropy(service_rate: f64, server_count: u32) -> Result<Self, ComposerError> {
        FlowComposer::new(
            service_rate,
            server_count,
            RandomPartition::new(StdRng::from_entropy()),
            UniformFailure::new(StdRng::from_entropy()),
        )
    }
}

impl<P: PartitionSource, F: FailureSource> FlowComposer<P, F> {
    pub fn new(service_rate: f64, server_count: u32, partitions: P, failures: F) -> Result<Self, ComposerError> {
        if !(service_rate.is_finite() && service_rate > 0.0) {
            return Err(ComposerError::InvalidService(QueueError::InvalidServiceRate(service_rate)));
        }
        if server_count == 0 {
            return Err(ComposerError::InvalidService(QueueError::NoServers));
        }
        Ok(Self {
            service_rate,
            server_count,
            trailing_merge: TrailingMerge::default(),
            partitions,
            failures,
        })
    }

    pub fn with_trailing_merge(mut self, trailing_merge: TrailingMerge) -> Self {
        self.trailing_merge = trailing_merge;
        self
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    pub fn server_count(&self) -> u32 {
        self.server_count
    }

    /// Applies `policy` to `flows`
    pub fn apply(&mut self, policy: CompositionPolicy, flows: &[f64]) -> Result<CompositionResult, ComposerError> {
        logging::log("COMPOSER", &format!(
            "Applying {} to {} flows (mu={}, c={})",
            policy, flows.len(), self.service_rate, self.server_count
        ));
        let result = match policy {
            CompositionPolicy::Split => CompositionResult::new(policy, self.split(flows)?, None),
            CompositionPolicy::Merge => CompositionResult::new(policy, self.merge(flows)?, None),
            CompositionPolicy::SplitFailure => {
                let (mut times, failure_rates) = self.split_with_failure(flows)?;
                times.sort_by(f64::total_cmp);
                CompositionResult::new(policy, times, Some(failure_rates))
            }
            CompositionPolicy::MergeFailure => {
                let (times, failure_rates) = self.merge_with_failure(flows)?;
                CompositionResult::new(policy, times, Some(failure_rates))
            }
        };
        if let Some(mean) = result.mean() {
            logging::log("COMPOSER", &format!("{} produced {} values, mean Ws={:.6}", policy, result.len(), mean));
        }
        Ok(result)
    }

    fn split(&mut self, flows: &[f64]) -> Result<Vec<f64>, ComposerError> {
        flows
            .iter()
            .enumerate()
            .map(|(flow_index, &rate)| self.split_flow(flow_index, rate))
            .collect()
    }

    fn merge(&mut self, flows: &[f64]) -> Result<Vec<f64>, ComposerError> {
        merge_groups(flows, self.service_rate, self.trailing_merge)
            .into_iter()
            .map(|group| {
                if group.flows > 1 {
                    logging::log("COMPOSER", &format!(
                        "Merged {} flows starting at {} into rate {}",
                        group.flows, group.start, group.rate
                    ));
                }
                self.evaluate(group.start, group.rate)
            })
            .collect()
    }

    /// Flows are visited slowest first; the output is in that visiting order
    fn split_with_failure(&mut self, flows: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ComposerError> {
        let assignment = self.assign_failures(flows)?;
        let times = assignment
            .order()
            .iter()
            .map(|&flow_index| {
                let ws = self.split_flow(flow_index, flows[flow_index])?;
                Ok(apply_failure(ws, assignment.rate_for(flow_index)))
            })
            .collect::<Result<Vec<_>, ComposerError>>()?;
        Ok((times, assignment.into_sorted_rates()))
    }

    /// Same rank pairing as `split_with_failure`, output stays in input order
    fn merge_with_failure(&mut self, flows: &[f64]) -> Result<(Vec<f64>, Vec<f64>), ComposerError> {
        let assignment = self.assign_failures(flows)?;
        let times = flows
            .iter()
            .enumerate()
            .map(|(flow_index, &rate)| {
                let ws = self.split_flow(flow_index, rate)?;
                Ok(apply_failure(ws, assignment.rate_for(flow_index)))
            })
            .collect::<Result<Vec<_>, ComposerError>>()?;
        Ok((times, assignment.into_sorted_rates()))
    }

    fn assign_failures(&mut self, flows: &[f64]) -> Result<FailureAssignment, ComposerError> {
        let rates = self.failures.failure_rates(flows.len());
        Ok(FailureAssignment::new(flows, rates)?)
    }

    /// Mean Ws over the sub-flows of one randomly fractured flow
    fn split_flow(&mut self, flow_index: usize, rate: f64) -> Result<f64, ComposerError> {
        let weights = self.partitions.split_weights();
        if weights.is_empty() {
            return Err(ComposerError::EmptyPartition { flow_index });
        }
        let mut total = 0.0;
        for weight in &weights {
            total += self.evaluate(flow_index, weight * rate)?;
        }
        Ok(total / weights.len() as f64)
    }

    fn evaluate(&self, flow_index: usize, rate: f64) -> Result<f64, ComposerError> {
        sojourn_time(rate, self.service_rate, self.server_count)
            .map_err(|source| ComposerError::Queue { flow_index, source })
    }
}
