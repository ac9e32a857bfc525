use crate::config::{Config, ConfigError, FlowConfig, QueueConfig};
use crate::stats::SummaryStats;
use crate::SimulationResults;
use chrono::Local;
use queueflow::{
    utils::logging,
    ComposerError, CompositionPolicy, CompositionResult, FlowRateSampler, SamplerError, SeededComposer,
    TrailingMerge,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Flow sampling failed: {0}")]
    Sampler(#[from] SamplerError),
    #[error("Composition failed: {0}")]
    Composer(#[from] ComposerError),
    #[error("Gave up after {attempts} attempts, last error: {last}")]
    RetriesExhausted { attempts: u32, last: ComposerError },
    #[error("Failed to write results: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Simulation task failed: {0}")]
    Task(String),
}

/// One successfully composed batch
#[derive(Debug, Clone)]
pub struct Batch {
    /// Seed the batch was drawn from
    pub seed: u64,
    /// Number of batches drawn, including this one
    pub attempts: u32,
    pub arrival_rates: Vec<f64>,
    pub result: CompositionResult,
}

// ------------------------------------------------------------------------------------------------
// Main Simulation Function
// ------------------------------------------------------------------------------------------------

/// Runs a single scenario: draws a batch of flows, composes it and summarizes the sojourn times.
///
/// Batches whose composition hits an unstable sub-flow are redrawn up to
/// `run_config.max_attempts` times.
pub fn run_scenario(name: &str, config: &Config) -> Result<SimulationResults, ScenarioError> {
    let started_at = Local::now();
    logging::log("SIMULATOR", &format!("=== Running scenario {} ===", name));
    logging::log("SIMULATOR", &format!("Start Time: {}", started_at.format("%Y-%m-%d %H:%M:%S")));
    logging::log("SIMULATOR", &format!("Policy: {}", config.composition_config.policy));
    logging::log("SIMULATOR", &format!(
        "Service Rate: {}, Servers: {}",
        config.queue_config.service_rate, config.queue_config.server_count
    ));

    let sampler = build_sampler(&config.flow_config)?;
    let mut master = master_rng(config.run_config.seed);
    let batch = with_retries(name, config.run_config.max_attempts, &mut master, |seed| {
        compose_batch(
            &sampler,
            config.flow_config.count,
            &config.queue_config,
            config.composition_config.policy,
            config.composition_config.trailing_merge,
            seed,
        )
    })?;

    let summary = SummaryStats::from_values(&batch.result.sojourn_times);
    Ok(SimulationResults {
        scenario: name.to_string(),
        started_at: started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        config: config.clone(),
        seed: batch.seed,
        attempts: batch.attempts,
        arrival_rates: batch.arrival_rates,
        result: batch.result,
        summary,
    })
}

/// Runs a scenario on tokio's blocking pool
pub async fn run_scenario_task(name: String, config: Config) -> Result<SimulationResults, ScenarioError> {
    tokio::task::spawn_blocking(move || run_scenario(&name, &config))
        .await
        .map_err(|e| ScenarioError::Task(e.to_string()))?
}

// ------------------------------------------------------------------------------------------------
// Helpers
// ------------------------------------------------------------------------------------------------

pub fn build_sampler(flow_config: &FlowConfig) -> Result<FlowRateSampler, SamplerError> {
    FlowRateSampler::new(flow_config.mean, flow_config.lower_bound, flow_config.upper_bound)
}

/// Seeded generator when a seed is configured, fresh entropy otherwise
pub fn master_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Draws one batch from `seed` and composes it
pub fn compose_batch(
    sampler: &FlowRateSampler,
    count: usize,
    queue_config: &QueueConfig,
    policy: CompositionPolicy,
    trailing_merge: TrailingMerge,
    seed: u64,
) -> Result<(Vec<f64>, CompositionResult), ScenarioError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let arrival_rates = sampler.generate(count, &mut rng)?;
    let mut composer = SeededComposer::seeded(queue_config.service_rate, queue_config.server_count, rng.gen())?
        .with_trailing_merge(trailing_merge);
    let result = composer.apply(policy, &arrival_rates)?;
    Ok((arrival_rates, result))
}

/// Calls `attempt` with fresh seeds until it succeeds, fails for a reason
/// new draws cannot fix, or `max_attempts` is reached
pub fn with_retries<F>(
    label: &str,
    max_attempts: u32,
    master: &mut StdRng,
    mut attempt: F,
) -> Result<Batch, ScenarioError>
where
    F: FnMut(u64) -> Result<(Vec<f64>, CompositionResult), ScenarioError>,
{
    let mut last = None;
    for attempts in 1..=max_attempts {
        let seed: u64 = master.gen();
        match attempt(seed) {
            Ok((arrival_rates, result)) => {
                return Ok(Batch {
                    seed,
                    attempts,
                    arrival_rates,
                    result,
                });
            }
            Err(ScenarioError::Composer(e)) if e.is_retryable() => {
                logging::log("SIMULATOR", &format!(
                    "{}: attempt {}/{} drew an unusable batch: {}",
                    label, attempts, max_attempts, e
                ));
                last = Some(e);
            }
            Err(e) => return Err(e),
        }
    }
    match last {
        Some(last) => Err(ScenarioError::RetriesExhausted {
            attempts: max_attempts,
            last,
        }),
        None => Err(ScenarioError::Config(ConfigError::ValidationError(
            "Max attempts must be positive".into(),
        ))),
    }
}
