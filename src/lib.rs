//! Closed-form M/M/1 and M/M/c queue metrics, and a simulator that splits,
//! merges and degrades batches of arrival flows before evaluating them.

pub mod types;
pub mod queue_model;
pub mod flow;
pub mod utils;

pub use types::{CompositionPolicy, CompositionResult, TrailingMerge};
pub use queue_model::{Queue, QueueError, QueueMetrics, QueueModel, QueueParameters};
pub use flow::{ComposerError, FlowComposer, FlowRateSampler, SamplerError, SeededComposer};
