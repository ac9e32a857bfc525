//! Bundled scenario presets.
//!
//! Each preset is a TOML file compiled into the binary, so presets run the
//! same way regardless of the working directory.

use crate::config::{ComparisonConfig, Config, ConfigError};

pub mod comparison;

pub use comparison::run_comparison;

/// Preset for the repeated M/M/1 versus M/M/c comparison
pub const COMPARISON_CONFIG: &str = include_str!("config_comparison.toml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    MM1Merge,
    MM1Split,
    MMCMerge,
    MMCSplit,
    MM1Failure,
    MMCFailure,
}

impl Scenario {
    pub const ALL: [Scenario; 6] = [
        Scenario::MM1Merge,
        Scenario::MM1Split,
        Scenario::MMCMerge,
        Scenario::MMCSplit,
        Scenario::MM1Failure,
        Scenario::MMCFailure,
    ];

    /// Directory-safe name, also used as the results sub-directory
    pub fn name(&self) -> &'static str {
        match self {
            Scenario::MM1Merge => "mm1_merge",
            Scenario::MM1Split => "mm1_split",
            Scenario::MMCMerge => "mmc_merge",
            Scenario::MMCSplit => "mmc_split",
            Scenario::MM1Failure => "mm1_failure",
            Scenario::MMCFailure => "mmc_failure",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Scenario::MM1Merge => "M/M/1 merge (lambda=20, mu=25, n=50)",
            Scenario::MM1Split => "M/M/1 split (lambda=20, mu=25, n=50)",
            Scenario::MMCMerge => "M/M/c merge (c=20, lambda=20, mu=20, n=50)",
            Scenario::MMCSplit => "M/M/c split (c=20, lambda=20, mu=20, n=50)",
            Scenario::MM1Failure => "M/M/1 split with failure rate up to 20% (lambda=20, mu=25, n=50)",
            Scenario::MMCFailure => "M/M/c split with failure rate up to 20% (c=20, lambda=20, mu=20, n=50)",
        }
    }

    pub fn config_source(&self) -> &'static str {
        match self {
            Scenario::MM1Merge => include_str!("config_mm1_merge.toml"),
            Scenario::MM1Split => include_str!("config_mm1_split.toml"),
            Scenario::MMCMerge => include_str!("config_mmc_merge.toml"),
            Scenario::MMCSplit => include_str!("config_mmc_split.toml"),
            Scenario::MM1Failure => include_str!("config_mm1_failure.toml"),
            Scenario::MMCFailure => include_str!("config_mmc_failure.toml"),
        }
    }

    pub fn config(&self) -> Result<Config, ConfigError> {
        Config::from_toml_str(self.config_source())
    }
}

pub fn comparison_config() -> Result<ComparisonConfig, ConfigError> {
    ComparisonConfig::from_toml_str(COMPARISON_CONFIG)
}
