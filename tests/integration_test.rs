mod common;

use common::{mean, rng, FLOW_COUNT, FLOW_LOWER, FLOW_MEAN};
use queueflow::{
    flow::{FixedFailure, FixedPartition},
    utils::logging,
    ComposerError, CompositionPolicy, FlowComposer, FlowRateSampler, Queue, QueueError, QueueModel,
    QueueParameters, SeededComposer,
};

#[test]
fn test_reference_queue_metrics() {
    logging::init_logging();
    let queue = Queue::new(QueueParameters::new(20.0, 25.0, 1).expect("Failed to create parameters"));
    let metrics = queue.metrics();
    logging::log("TEST", &format!("Reference metrics: {:?}", metrics));

    assert!((metrics.utilization - 0.8).abs() < 1e-12);
    assert!((metrics.p0 - 0.2).abs() < 1e-12);
    assert!((metrics.lq - 3.2).abs() < 1e-9);
    assert!((metrics.wq - 0.16).abs() < 1e-9);
    assert!((metrics.ws - 0.2).abs() < 1e-9);
    assert!((metrics.ls - 4.0).abs() < 1e-9);
}

/// Single-server merge over rates drawn from [1, 24): nothing reaches μ = 25,
/// so every flow is its own group and every group is stable
#[test]
fn test_mm1_merge_batch() {
    let sampler = FlowRateSampler::new(FLOW_MEAN, FLOW_LOWER, 24).unwrap();
    let flows = sampler.generate(FLOW_COUNT, &mut rng(1)).unwrap();
    assert!((mean(&flows) - f64::from(FLOW_MEAN)).abs() < 1e-12);

    let mut composer = SeededComposer::seeded(25.0, 1, 1).unwrap();
    let result = composer.apply(CompositionPolicy::Merge, &flows).unwrap();
    assert_eq!(result.len(), FLOW_COUNT);
    assert!(result.sojourn_times.iter().all(|ws| *ws > 1.0 / 25.0));
}

/// Twenty servers of rate 20 absorb every flow the sampler can produce
#[test]
fn test_mmc_split_batch() {
    let sampler = FlowRateSampler::new(FLOW_MEAN, FLOW_LOWER, 50).unwrap();
    let flows = sampler.generate(FLOW_COUNT, &mut rng(2)).unwrap();

    let mut composer = SeededComposer::seeded(20.0, 20, 2).unwrap();
    let split = composer.apply(CompositionPolicy::Split, &flows).unwrap();
    assert_eq!(split.len(), FLOW_COUNT);
    let split_mean = split.mean().unwrap();
    // Every sub-flow is served by a lightly loaded M/M/20, close to pure service time
    assert!(split_mean >= 1.0 / 20.0 && split_mean < 0.06, "mean Ws {}", split_mean);

    let failing = composer.apply(CompositionPolicy::MergeFailure, &flows).unwrap();
    assert_eq!(failing.len(), FLOW_COUNT);
    assert!(failing.mean().unwrap() > 1.0 / 20.0);
}

#[test]
fn test_mmc_merge_collapses_matching_flows() {
    let flows = [20.0, 20.0, 20.0, 5.0, 35.0, 20.0];
    let mut composer = FlowComposer::new(20.0, 20, FixedPartition::even(1), FixedFailure(0.0)).unwrap();
    let result = composer.apply(CompositionPolicy::Merge, &flows).unwrap();
    // [60], [5], [35], trailing [20]
    assert_eq!(result.len(), 4);
}

#[test]
fn test_unstable_sub_flow_is_not_hidden() {
    let mut composer = FlowComposer::new(25.0, 1, FixedPartition::new(vec![1.0]), FixedFailure(0.0)).unwrap();
    match composer.apply(CompositionPolicy::Split, &[49.0]) {
        Err(ComposerError::Queue { flow_index: 0, source: QueueError::Unstable { utilization } }) => {
            assert!(utilization > 1.0);
        }
        other => panic!("Expected an unstable-flow error, got {:?}", other),
    }
}

#[test]
fn test_policy_tags() {
    for policy in CompositionPolicy::ALL {
        assert_eq!(policy.as_str().parse::<CompositionPolicy>().unwrap(), policy);
    }
    assert!("fail".parse::<CompositionPolicy>().is_err());
    assert!(CompositionPolicy::SplitFailure.uses_failures());
    assert!(!CompositionPolicy::Merge.uses_failures());
}
