use crate::config::{ComparisonConfig, QueueConfig};
use crate::run_simulation::{build_sampler, compose_batch, master_rng, with_retries, ScenarioError};
use crate::simulation_results::{ComparisonResults, ComparisonRun};
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use queueflow::{utils::logging, CompositionPolicy, CompositionResult, FlowRateSampler, TrailingMerge};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tokio::task::JoinSet;

/// Runs the repeated single-server versus multi-server comparison.
///
/// Every repetition draws its own batch of flows and splits it through both
/// queue configurations. Repetitions are independent and run concurrently on
/// tokio's blocking pool; results are reported in repetition order.
pub async fn run_comparison(config: ComparisonConfig) -> Result<ComparisonResults, ScenarioError> {
    let started_at = Local::now();
    logging::log("SIMULATOR", &format!(
        "=== Running comparison with {} repetitions ===", config.repetitions
    ));

    let sampler = Arc::new(build_sampler(&config.flow_config)?);
    let mut master = master_rng(config.run_config.seed);
    let progress_bar = create_progress_bar(config.repetitions as u64);

    let mut tasks = JoinSet::new();
    for repetition in 0..config.repetitions {
        let seed: u64 = master.gen();
        let sampler = Arc::clone(&sampler);
        let config = config.clone();
        tasks.spawn_blocking(move || run_repetition(repetition, seed, &sampler, &config));
    }

    let mut runs = Vec::with_capacity(config.repetitions);
    while let Some(joined) = tasks.join_next().await {
        let run = joined.map_err(|e| ScenarioError::Task(e.to_string()))??;
        progress_bar.inc(1);
        runs.push(run);
    }
    progress_bar.finish_with_message("comparison complete");
    runs.sort_by_key(|run| run.repetition);

    Ok(ComparisonResults::new(
        started_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        config,
        runs,
    ))
}

/// Draws one batch and splits it through both queue configurations, retrying on unstable draws
fn run_repetition(
    repetition: usize,
    seed: u64,
    sampler: &FlowRateSampler,
    config: &ComparisonConfig,
) -> Result<ComparisonRun, ScenarioError> {
    let label = format!("comparison run {}", repetition + 1);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut multi_server: Option<CompositionResult> = None;

    let batch = with_retries(&label, config.run_config.max_attempts, &mut rng, |batch_seed| {
        let (arrival_rates, single) = split_batch(sampler, config, &config.single_server, batch_seed)?;
        let (_, multi) = split_batch(sampler, config, &config.multi_server, batch_seed)?;
        multi_server = Some(multi);
        Ok((arrival_rates, single))
    })?;

    let multi_server_mean = multi_server.as_ref().and_then(CompositionResult::mean).unwrap_or(f64::NAN);
    Ok(ComparisonRun {
        repetition,
        seed: batch.seed,
        attempts: batch.attempts,
        single_server_mean: batch.result.mean().unwrap_or(f64::NAN),
        multi_server_mean,
    })
}

/// Same seed on both sides, so both queue configurations see the same flows
fn split_batch(
    sampler: &FlowRateSampler,
    config: &ComparisonConfig,
    queue_config: &QueueConfig,
    seed: u64,
) -> Result<(Vec<f64>, CompositionResult), ScenarioError> {
    compose_batch(
        sampler,
        config.flow_config.count,
        queue_config,
        CompositionPolicy::Split,
        TrailingMerge::Flush,
        seed,
    )
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let progress_bar = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} repetitions ({eta})")
    {
        progress_bar.set_style(style.progress_chars("##-"));
    }
    progress_bar
}
