use crate::config::{ComparisonConfig, Config};
use crate::run_simulation::ScenarioError;
use crate::stats::SummaryStats;
use queueflow::{utils::logging, CompositionResult};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the results written for every scenario
pub const RESULTS_FILE: &str = "scenario_results.json";

/// Outcome of one scenario run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResults {
    pub scenario: String,
    pub started_at: String,
    pub config: Config,
    /// Seed of the batch that was kept
    pub seed: u64,
    /// Number of batches drawn before one composed cleanly
    pub attempts: u32,
    pub arrival_rates: Vec<f64>,
    pub result: CompositionResult,
    /// `None` when the policy produced no values
    pub summary: Option<SummaryStats>,
}

impl SimulationResults {
    /// Mean sojourn time of the run
    pub fn mean(&self) -> Option<f64> {
        self.result.mean()
    }

    pub fn print_summary(&self) {
        match &self.summary {
            Some(summary) => summary.print(&format!("{} ({})", self.scenario, self.result.policy)),
            None => println!("SIMULATOR: {} produced no values", self.scenario),
        }
        if let Some(failure_rates) = &self.result.failure_rates {
            if let Some(failures) = SummaryStats::from_values(failure_rates) {
                println!(
                    "SIMULATOR: Failure rates: {:.2}% to {:.2}% (mean {:.2}%)",
                    failures.min * 100.0,
                    failures.max * 100.0,
                    failures.mean * 100.0
                );
            }
        }
        if self.attempts > 1 {
            println!("SIMULATOR: Needed {} batches to draw a stable one", self.attempts);
        }
    }

    /// Saves the results as `<dir>/<scenario>/data/scenario_results.json`
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ScenarioError> {
        write_json(dir.as_ref(), &self.scenario, self)
    }
}

// ------------------------------------------------------------------------------------------------
// Comparison Results
// ------------------------------------------------------------------------------------------------

/// Means of one comparison repetition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRun {
    pub repetition: usize,
    pub seed: u64,
    pub attempts: u32,
    pub single_server_mean: f64,
    pub multi_server_mean: f64,
}

/// Outcome of the repeated single-server versus multi-server comparison
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResults {
    pub started_at: String,
    pub config: ComparisonConfig,
    /// One entry per repetition, in repetition order
    pub runs: Vec<ComparisonRun>,
    pub single_server: Option<SummaryStats>,
    pub multi_server: Option<SummaryStats>,
}

impl ComparisonResults {
    pub const NAME: &'static str = "comparison";

    pub fn new(started_at: String, config: ComparisonConfig, runs: Vec<ComparisonRun>) -> Self {
        let single: Vec<f64> = runs.iter().map(|run| run.single_server_mean).collect();
        let multi: Vec<f64> = runs.iter().map(|run| run.multi_server_mean).collect();
        Self {
            started_at,
            config,
            single_server: SummaryStats::from_values(&single),
            multi_server: SummaryStats::from_values(&multi),
            runs,
        }
    }

    pub fn print_summary(&self) {
        for run in &self.runs {
            println!(
                "SIMULATOR: Run {:>2}: M/M/1 {:.4} ----- M/M/c {:.4}",
                run.repetition + 1,
                run.single_server_mean,
                run.multi_server_mean
            );
        }
        if let Some(single) = &self.single_server {
            single.print("Single server (split)");
        }
        if let Some(multi) = &self.multi_server {
            multi.print("Multi server (split)");
        }
    }

    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ScenarioError> {
        write_json(dir.as_ref(), Self::NAME, self)
    }
}

fn write_json<T: Serialize>(dir: &Path, scenario: &str, value: &T) -> Result<PathBuf, ScenarioError> {
    let data_dir = dir.join(scenario).join("data");
    fs::create_dir_all(&data_dir)?;
    let path = data_dir.join(RESULTS_FILE);
    fs::write(&path, serde_json::to_string_pretty(value)?)?;
    logging::log("SIMULATOR", &format!("Saved results to {}", path.display()));
    Ok(path)
}
