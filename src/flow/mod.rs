//! Arrival-flow generation and composition.

pub mod composer;
pub mod failure;
pub mod merge;
pub mod partition;
pub mod sampler;

pub use composer::{ComposerError, FlowComposer, SeededComposer};
pub use failure::{FailureAssignment, FailureError, FailureSource, FixedFailure, UniformFailure};
pub use merge::{merge_groups, MergeAccumulator, MergeGroup, MergeState};
pub use partition::{split_weights, FixedPartition, PartitionSource, RandomPartition};
pub use sampler::{FlowRateSampler, SamplerError};

#[cfg(test)]
mod tests;
