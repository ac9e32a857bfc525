use crate::flow::failure::{apply_failure, FailureAssignment, FailureError, FailureSource, FixedFailure, UniformFailure};
use crate::types::constants::MAX_FAILURE_RATE;
use rand::rngs::StdRng;
use rand::SeedableRng;
use super::assert_close;

#[test]
fn test_uniform_failure_rates_within_bounds() {
    let mut source = UniformFailure::new(StdRng::seed_from_u64(17));
    let rates = source.failure_rates(10_000);
    assert_eq!(rates.len(), 10_000);
    assert!(rates.iter().all(|r| *r > 0.0 && *r <= MAX_FAILURE_RATE + 1e-12));
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    assert!((mean - 0.1).abs() < 0.01, "mean failure rate {} should be near 0.1", mean);
}

#[test]
fn test_fixed_failure() {
    assert_eq!(FixedFailure(0.05).failure_rates(3), vec![0.05; 3]);
}

/// Tests rank pairing:
/// - flows [30, 10, 20] are ranked [1, 2, 0]
/// - failure rates [0.05, 0.15, 0.1] are sorted to [0.05, 0.1, 0.15]
/// - the slowest flow gets the smallest failure rate
#[test]
fn test_assignment_pairs_by_rank() {
    let flows = [30.0, 10.0, 20.0];
    let assignment = FailureAssignment::new(&flows, vec![0.05, 0.15, 0.1]).unwrap();

    assert_eq!(assignment.order(), &[1, 2, 0]);
    assert_eq!(assignment.sorted_rates(), &[0.05, 0.1, 0.15]);
    assert_eq!(assignment.rate_for(1), 0.05);
    assert_eq!(assignment.rate_for(2), 0.1);
    assert_eq!(assignment.rate_for(0), 0.15);
}

#[test]
fn test_assignment_ties_keep_input_order() {
    let flows = [20.0, 20.0, 5.0];
    let assignment = FailureAssignment::new(&flows, vec![0.2, 0.1, 0.0]).unwrap();
    assert_eq!(assignment.order(), &[2, 0, 1]);
    assert_eq!(assignment.rate_for(0), 0.1);
    assert_eq!(assignment.rate_for(1), 0.2);
}

#[test]
fn test_assignment_rejects_bad_input() {
    assert_eq!(
        FailureAssignment::new(&[1.0, 2.0], vec![0.1]).unwrap_err(),
        FailureError::CountMismatch { expected: 2, actual: 1 }
    );
    assert_eq!(
        FailureAssignment::new(&[1.0], vec![1.0]).unwrap_err(),
        FailureError::InvalidRate(1.0)
    );
    assert_eq!(
        FailureAssignment::new(&[1.0], vec![-0.1]).unwrap_err(),
        FailureError::InvalidRate(-0.1)
    );
}

#[test]
fn test_apply_failure() {
    assert_eq!(apply_failure(0.2, 0.0), 0.2);
    assert_close(apply_failure(0.2, 0.2), 0.25, "scaled Ws");
}
