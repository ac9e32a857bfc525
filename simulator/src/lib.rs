pub mod config;
pub mod interface;
pub mod run_simulation;
pub mod scenarios;
pub mod simulation_results;
pub mod stats;

pub use config::{ComparisonConfig, Config, ConfigError};
pub use run_simulation::{run_scenario, run_scenario_task, ScenarioError};
pub use scenarios::{run_comparison, Scenario};
pub use simulation_results::{ComparisonResults, ComparisonRun, SimulationResults};
pub use stats::SummaryStats;
