//! Configuration loader and validator for the queueflow simulator.
//! Handles parsing, validation, and access to scenario configuration files.

use queueflow::{CompositionPolicy, TrailingMerge};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Retry budget used when a scenario file does not set one
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

// ------------------------------------------------------------------------------------------------
// Main Configuration Structs
// ------------------------------------------------------------------------------------------------

/// Main configuration struct for a single scenario run.
///
/// A scenario generates one batch of arrival flows, applies one composition
/// policy to it and reports the resulting sojourn times.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Service side of every evaluated queue
    pub queue_config: QueueConfig,
    /// How the batch of arrival rates is generated
    pub flow_config: FlowConfig,
    /// Which policy is applied to the batch
    pub composition_config: CompositionConfig,
    /// Seeding and retry behavior
    #[serde(default)]
    pub run_config: RunConfig,
}

/// Service rate and number of servers shared by every evaluated queue
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct QueueConfig {
    /// μ, jobs one server completes per unit of time
    pub service_rate: f64,
    /// c, number of parallel servers (1 selects the M/M/1 formulas)
    pub server_count: u32,
}

/// Parameters of the paired arrival-rate sampler
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct FlowConfig {
    /// Number of flows per batch (must be even)
    pub count: usize,
    /// Target mean of every generated pair
    pub mean: u32,
    /// Smallest rate, inclusive
    pub lower_bound: u32,
    /// Exclusive for the first draw of a pair, inclusive for its complement
    pub upper_bound: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct CompositionConfig {
    pub policy: CompositionPolicy,
    /// What the merge policy does with a run still open at the end of the batch
    #[serde(default)]
    pub trailing_merge: TrailingMerge,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Fixed seed for reproducible runs; fresh entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// How many batches may be drawn before an unstable configuration is reported
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Comparison Configuration
// ------------------------------------------------------------------------------------------------

/// Configuration for the repeated single-server versus multi-server comparison.
///
/// Every repetition draws a fresh batch of flows and splits it through both
/// queue configurations.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ComparisonConfig {
    pub flow_config: FlowConfig,
    pub single_server: QueueConfig,
    pub multi_server: QueueConfig,
    /// Number of batches to draw
    pub repetitions: usize,
    #[serde(default)]
    pub run_config: RunConfig,
}

// ------------------------------------------------------------------------------------------------
// Error Types and Validation
// ------------------------------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub trait ValidateConfig {
    fn validate(&self) -> Result<(), ConfigError>;
}

fn invalid(message: &str) -> Result<(), ConfigError> {
    Err(ConfigError::ValidationError(message.into()))
}

pub fn validate_queue_fields(queue_config: &QueueConfig) -> Result<(), ConfigError> {
    if !(queue_config.service_rate.is_finite() && queue_config.service_rate > 0.0) {
        return invalid("Service rate must be positive");
    }
    if queue_config.server_count == 0 {
        return invalid("Server count must be at least 1");
    }
    Ok(())
}

// Shared by every configuration type
pub fn validate_common_fields(flow_config: &FlowConfig, run_config: &RunConfig) -> Result<(), ConfigError> {
    if flow_config.count == 0 {
        return invalid("Flow count must be positive");
    }
    if flow_config.count % 2 != 0 {
        return invalid("Flow count must be even");
    }
    if flow_config.lower_bound == 0 {
        return invalid("Lower bound must be positive");
    }
    if flow_config.lower_bound >= flow_config.upper_bound {
        return invalid("Lower bound must be below upper bound");
    }
    if flow_config.mean < flow_config.lower_bound || flow_config.mean > flow_config.upper_bound {
        return invalid("Mean must lie within the flow bounds");
    }
    if run_config.max_attempts == 0 {
        return invalid("Max attempts must be positive");
    }
    Ok(())
}

impl ValidateConfig for Config {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_queue_fields(&self.queue_config)?;
        validate_common_fields(&self.flow_config, &self.run_config)
    }
}

impl ValidateConfig for ComparisonConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        validate_queue_fields(&self.single_server)?;
        validate_queue_fields(&self.multi_server)?;
        validate_common_fields(&self.flow_config, &self.run_config)?;
        if self.repetitions == 0 {
            return invalid("Repetitions must be positive");
        }
        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// Loading
// ------------------------------------------------------------------------------------------------

fn parse<T: DeserializeOwned + ValidateConfig>(source: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(source)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        parse(source)
    }
}

impl ComparisonConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml_str(&config_str)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        parse(source)
    }
}
