use queueflow::utils::logging;
use simulator::{
    config::Config,
    interface::{SimulationType, SimulatorInterface},
    run_comparison, run_scenario_task,
    scenarios::{self, Scenario},
    ScenarioError,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_RESULTS_DIR: &str = "simulator/results";

// ------------------------------------------------------------------------------------------------
// Main
// ------------------------------------------------------------------------------------------------

/// Runs a single configuration file when one is given, the interactive menu otherwise
#[tokio::main]
async fn main() -> Result<(), ScenarioError> {
    let results_dir = results_dir();
    fs::create_dir_all(&results_dir)?;
    setup_logging(&results_dir);

    if let Some(path) = env::args().nth(1) {
        let config = Config::load(&path)?;
        let name = PathBuf::from(&path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        let results = run_scenario_task(name, config).await?;
        results.print_summary();
        results.save(&results_dir)?;
        return Ok(());
    }

    let interface = SimulatorInterface::new();
    loop {
        interface.show_menu();
        let outcome = match interface.get_user_choice()? {
            Some(SimulationType::Scenario(scenario)) => run_preset(scenario, &results_dir).await,
            Some(SimulationType::Comparison) => run_comparison_preset(&results_dir).await,
            Some(SimulationType::Exit) => {
                println!("Exiting...");
                break;
            }
            None => {
                println!("Invalid choice. Please enter a number from 0 to 7.");
                continue;
            }
        };
        if let Err(e) = outcome {
            eprintln!("Simulation failed: {}", e);
        }
    }

    Ok(())
}

async fn run_preset(scenario: Scenario, results_dir: &Path) -> Result<(), ScenarioError> {
    println!("Running {}...", scenario.title());
    let config = scenario.config()?;
    let results = run_scenario_task(scenario.name().to_string(), config).await?;
    results.print_summary();
    let path = results.save(results_dir)?;
    println!("Results written to {}", path.display());
    Ok(())
}

async fn run_comparison_preset(results_dir: &Path) -> Result<(), ScenarioError> {
    let config = scenarios::comparison_config()?;
    let results = run_comparison(config).await?;
    results.print_summary();
    let path = results.save(results_dir)?;
    println!("Results written to {}", path.display());
    Ok(())
}

fn results_dir() -> PathBuf {
    env::var("QUEUEFLOW_RESULTS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_RESULTS_DIR))
}

/// Sets up logging if ENABLE_LOGS environment variable is set
fn setup_logging(results_dir: &Path) {
    if env::var("ENABLE_LOGS").is_ok() {
        let log_path = results_dir.join("simulation.log");
        if let Err(e) = fs::remove_file(&log_path) {
            // Ignore error if file doesn't exist
            if e.kind() != std::io::ErrorKind::NotFound {
                eprintln!("Error deleting log file: {}", e);
            }
        }

        env::set_var("QUEUEFLOW_LOGGING", "true");
        env::set_var("QUEUEFLOW_LOG_TO_FILE", "true");
        env::set_var("QUEUEFLOW_LOG_FILE", log_path);
        logging::init_logging();
    }
}
