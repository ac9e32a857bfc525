use crate::queue_model::{MM1Queue, MMCQueue, Queue, QueueModel, QueueParameters};
use super::assert_close;

const STABLE_CASES: &[(f64, f64, u32)] = &[
    (20.0, 25.0, 1),
    (1.0, 25.0, 1),
    (24.5, 25.0, 1),
    (30.0, 20.0, 2),
    (20.0, 20.0, 20),
    (390.0, 20.0, 20),
    (7.5, 3.0, 5),
];

/// M/M/1 formulas and M/M/c formulas at c = 1 describe the same queue
#[test]
fn test_mm1_matches_mmc_with_one_server() {
    for &(lambda, mu) in &[(20.0, 25.0), (1.0, 25.0), (24.9, 25.0), (0.3, 0.5)] {
        let params = QueueParameters::new(lambda, mu, 1).unwrap();
        let mm1 = MM1Queue::new(params).unwrap();
        let mmc = MMCQueue::new(params);

        assert_close(mm1.empty_probability(), mmc.empty_probability(), "P0");
        assert_close(mm1.mean_queue_length(), mmc.mean_queue_length(), "Lq");
        assert_close(mm1.mean_wait_time(), mmc.mean_wait_time(), "Wq");
        assert_close(mm1.mean_sojourn_time(), mmc.mean_sojourn_time(), "Ws");
        assert_close(mm1.mean_system_length(), mmc.mean_system_length(), "Ls");
        for n in 0..10 {
            assert_close(mm1.state_probability(n), mmc.state_probability(n), "Pn");
        }
    }
}

/// Σ Pn over n = 0 ..= N approaches 1
#[test]
fn test_state_probabilities_sum_to_one() {
    for &(lambda, mu, c) in STABLE_CASES {
        let queue = Queue::from_rates(lambda, mu, c).unwrap();
        let total: f64 = (0..20_000).map(|n| queue.state_probability(n)).sum();
        assert!(
            (total - 1.0).abs() < 1e-6,
            "Σ Pn for λ={}, μ={}, c={} was {}",
            lambda, mu, c, total
        );
    }
}

/// Ls = Lq + ρ·c
#[test]
fn test_little_law_identity() {
    for &(lambda, mu, c) in STABLE_CASES {
        let queue = Queue::from_rates(lambda, mu, c).unwrap();
        let rho = queue.parameters().utilization();
        assert_close(
            queue.mean_system_length(),
            queue.mean_queue_length() + rho * f64::from(c),
            "Ls",
        );
    }
}

#[test]
fn test_sojourn_time_grows_with_load() {
    let mut previous = 0.0;
    for lambda in [1.0, 5.0, 10.0, 15.0, 20.0, 24.0] {
        let ws = Queue::from_rates(lambda, 25.0, 1).unwrap().mean_sojourn_time();
        assert!(ws > previous, "Ws should increase with λ");
        previous = ws;
    }
}

#[test]
fn test_more_servers_shorten_waiting() {
    let two = Queue::from_rates(30.0, 20.0, 2).unwrap();
    let four = Queue::from_rates(30.0, 20.0, 4).unwrap();
    assert!(four.mean_wait_time() < two.mean_wait_time());
    assert!(four.mean_sojourn_time() >= 1.0 / 20.0);
}
