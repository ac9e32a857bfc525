use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod constants;

/// A composition policy applied to a batch of arrival flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositionPolicy {
    /// Fracture every flow into randomly weighted sub-flows
    Split,
    /// Combine consecutive flows whose rate equals the service rate
    Merge,
    /// Split, then scale every flow by its rank-paired failure rate; results sorted
    SplitFailure,
    /// Split with failure scaling; results kept in input order
    MergeFailure,
}

impl CompositionPolicy {
    pub const ALL: [CompositionPolicy; 4] = [
        CompositionPolicy::Split,
        CompositionPolicy::Merge,
        CompositionPolicy::SplitFailure,
        CompositionPolicy::MergeFailure,
    ];

    /// Whether the policy draws failure rates
    pub fn uses_failures(&self) -> bool {
        matches!(self, CompositionPolicy::SplitFailure | CompositionPolicy::MergeFailure)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompositionPolicy::Split => "split",
            CompositionPolicy::Merge => "merge",
            CompositionPolicy::SplitFailure => "split_failure",
            CompositionPolicy::MergeFailure => "merge_failure",
        }
    }
}

impl fmt::Display for CompositionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown composition policy: {0}")]
pub struct UnknownPolicy(pub String);

impl FromStr for CompositionPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompositionPolicy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s.trim())
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}

/// What the merge policy does with flows still accumulating when the input ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingMerge {
    /// Evaluate the pending merged flow as a final group
    #[default]
    Flush,
    /// Drop the pending merged flow
    Discard,
}

/// Sojourn times produced by one composition run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionResult {
    /// Policy that produced the result
    pub policy: CompositionPolicy,
    /// Mean sojourn time per flow (split policies) or per merged group (merge)
    pub sojourn_times: Vec<f64>,
    /// Failure rates drawn for the failure policies, sorted ascending
    pub failure_rates: Option<Vec<f64>>,
}

impl CompositionResult {
    pub fn new(policy: CompositionPolicy, sojourn_times: Vec<f64>, failure_rates: Option<Vec<f64>>) -> Self {
        Self {
            policy,
            sojourn_times,
            failure_rates,
        }
    }

    pub fn len(&self) -> usize {
        self.sojourn_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sojourn_times.is_empty()
    }

    /// Arithmetic mean of the sojourn times, `None` when nothing was produced
    pub fn mean(&self) -> Option<f64> {
        if self.sojourn_times.is_empty() {
            None
        } else {
            Some(self.sojourn_times.iter().sum::<f64>() / self.sojourn_times.len() as f64)
        }
    }
}
