mod consistency;

/// Absolute tolerance used when comparing closed-form results
pub const TOLERANCE: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() <= TOLERANCE * expected.abs().max(1.0),
        "{}: expected {}, got {}",
        what,
        expected,
        actual
    );
}
