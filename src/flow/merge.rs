use crate::types::TrailingMerge;

/// One flow, or a run of consecutive flows merged into one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeGroup {
    /// Index of the first input flow in the group
    pub start: usize,
    /// Number of input flows combined
    pub flows: usize,
    /// Combined arrival rate
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MergeState {
    Idle,
    Accumulating { start: usize, flows: usize, sum: f64 },
}

/// Sequential scan that merges runs of flows whose rate equals the service rate.
///
/// A matching flow is added to the running sum. A non-matching flow closes
/// the pending run (if any) and is then emitted as its own group.
#[derive(Debug, Clone)]
pub struct MergeAccumulator {
    service_rate: f64,
    next_index: usize,
    state: MergeState,
}

impl MergeAccumulator {
    pub fn new(service_rate: f64) -> Self {
        Self {
            service_rate,
            next_index: 0,
            state: MergeState::Idle,
        }
    }

    pub fn state(&self) -> MergeState {
        self.state
    }

    /// Feeds the next flow, appending every group it completes to `groups`
    pub fn push(&mut self, rate: f64, groups: &mut Vec<MergeGroup>) {
        let index = self.next_index;
        self.next_index += 1;

        // Exact match only
        if rate == self.service_rate {
            self.state = match self.state {
                MergeState::Idle => MergeState::Accumulating { start: index, flows: 1, sum: rate },
                MergeState::Accumulating { start, flows, sum } => MergeState::Accumulating {
                    start,
                    flows: flows + 1,
                    sum: sum + rate,
                },
            };
            return;
        }

        if let Some(pending) = self.take_pending() {
            groups.push(pending);
        }
        groups.push(MergeGroup { start: index, flows: 1, rate });
    }

    /// Ends the scan, returning the pending run if it should be kept
    pub fn finish(mut self, trailing: TrailingMerge) -> Option<MergeGroup> {
        match trailing {
            TrailingMerge::Flush => self.take_pending(),
            TrailingMerge::Discard => None,
        }
    }

    fn take_pending(&mut self) -> Option<MergeGroup> {
        match std::mem::replace(&mut self.state, MergeState::Idle) {
            MergeState::Idle => None,
            MergeState::Accumulating { start, flows, sum } => Some(MergeGroup { start, flows, rate: sum }),
        }
    }
}

/// Runs the whole merge scan over `flows`
pub fn merge_groups(flows: &[f64], service_rate: f64, trailing: TrailingMerge) -> Vec<MergeGroup> {
    let mut accumulator = MergeAccumulator::new(service_rate);
    let mut groups = Vec::with_capacity(flows.len());
    for &rate in flows {
        accumulator.push(rate, &mut groups);
    }
    groups.extend(accumulator.finish(trailing));
    groups
}
