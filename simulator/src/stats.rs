//! Summary statistics for the sojourn times of a scenario run.

use serde::Serialize;

// ------------------------------------------------------------------------------------------------
// Statistics Tracking
// ------------------------------------------------------------------------------------------------

/// Aggregates over one sequence of sojourn times
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Number of values aggregated
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl SummaryStats {
    /// Computes the summary, or `None` for an empty sequence
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / count as f64;
        let (min, max) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        Some(Self {
            count,
            mean,
            min,
            max,
            std_dev: variance.sqrt(),
        })
    }

    /// Prints the summary under the given label
    pub fn print(&self, label: &str) {
        println!("SIMULATOR: === {} ===", label);
        println!("SIMULATOR: Values: {}", self.count);
        println!("SIMULATOR: Mean Ws: {:.4}", self.mean);
        println!("SIMULATOR: Min Ws: {:.4}", self.min);
        println!("SIMULATOR: Max Ws: {:.4}", self.max);
        println!("SIMULATOR: Std Dev: {:.4}", self.std_dev);
    }
}
