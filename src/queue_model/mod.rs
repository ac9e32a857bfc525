//! Steady-state metrics for M/M/1 and M/M/c queues.
//!
//! Parameters are validated once, when [`QueueParameters`] is built. Every
//! model built from valid parameters is stable (ρ < 1), so the metric
//! functions themselves cannot fail.

use serde::Serialize;
use thiserror::Error;

pub mod mm1;
pub mod mmc;

pub use mm1::MM1Queue;
pub use mmc::MMCQueue;

#[cfg(test)]
mod tests;

// ------------------------------------------------------------------------------------------------
// Errors
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueueError {
    #[error("Invalid arrival rate: {0} (must be finite and positive)")]
    InvalidArrivalRate(f64),
    #[error("Invalid service rate: {0} (must be finite and positive)")]
    InvalidServiceRate(f64),
    #[error("Server count must be at least 1")]
    NoServers,
    #[error("Unstable queue: utilization {utilization} must be below 1")]
    Unstable { utilization: f64 },
    #[error("Server count mismatch: expected {expected}, got {actual}")]
    ServerCountMismatch { expected: u32, actual: u32 },
}

// ------------------------------------------------------------------------------------------------
// Parameters
// ------------------------------------------------------------------------------------------------

/// Validated (λ, μ, c) triple describing a stable queue
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueParameters {
    arrival_rate: f64,
    service_rate: f64,
    server_count: u32,
    utilization: f64,
}

impl QueueParameters {
    /// Creates a new parameter set, rejecting anything that does not describe a stable queue
    ///
    /// # Arguments
    /// * `arrival_rate` - λ, jobs arriving per unit of time
    /// * `service_rate` - μ, jobs a single server completes per unit of time
    /// * `server_count` - c, number of identical parallel servers
    pub fn new(arrival_rate: f64, service_rate: f64, server_count: u32) -> Result<Self, QueueError> {
        if !(arrival_rate.is_finite() && arrival_rate > 0.0) {
            return Err(QueueError::InvalidArrivalRate(arrival_rate));
        }
        if !(service_rate.is_finite() && service_rate > 0.0) {
            return Err(QueueError::InvalidServiceRate(service_rate));
        }
        if server_count == 0 {
            return Err(QueueError::NoServers);
        }
        let utilization = arrival_rate / (f64::from(server_count) * service_rate);
        if !(utilization < 1.0) {
            return Err(QueueError::Unstable { utilization });
        }
        Ok(Self {
            arrival_rate,
            service_rate,
            server_count,
            utilization,
        })
    }

    pub fn arrival_rate(&self) -> f64 {
        self.arrival_rate
    }

    pub fn service_rate(&self) -> f64 {
        self.service_rate
    }

    pub fn server_count(&self) -> u32 {
        self.server_count
    }

    /// ρ = λ / (c·μ)
    pub fn utilization(&self) -> f64 {
        self.utilization
    }

    /// λ / μ, the offered load in Erlangs
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }
}

// ------------------------------------------------------------------------------------------------
// Model Trait
// ------------------------------------------------------------------------------------------------

/// Snapshot of every scalar metric of a queue, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueMetrics {
    pub utilization: f64,
    pub p0: f64,
    pub lq: f64,
    pub wq: f64,
    pub ws: f64,
    pub ls: f64,
}

/// Closed-form steady-state metrics of a queueing model
pub trait QueueModel {
    /// The validated parameters this model was built from
    fn parameters(&self) -> &QueueParameters;

    /// P0, the probability that the system is empty
    fn empty_probability(&self) -> f64;

    /// Pn, the probability of exactly `n` jobs in the system
    fn state_probability(&self, n: u32) -> f64;

    /// Lq, mean number of jobs waiting in the queue
    fn mean_queue_length(&self) -> f64;

    /// Ls, mean number of jobs in the system
    fn mean_system_length(&self) -> f64;

    /// Wq, mean time spent waiting before service
    fn mean_wait_time(&self) -> f64 {
        self.mean_queue_length() / self.parameters().arrival_rate()
    }

    /// Ws, mean sojourn time (waiting plus service)
    fn mean_sojourn_time(&self) -> f64 {
        self.mean_wait_time() + 1.0 / self.parameters().service_rate()
    }

    fn metrics(&self) -> QueueMetrics {
        QueueMetrics {
            utilization: self.parameters().utilization(),
            p0: self.empty_probability(),
            lq: self.mean_queue_length(),
            wq: self.mean_wait_time(),
            ws: self.mean_sojourn_time(),
            ls: self.mean_system_length(),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// Dispatch
// ------------------------------------------------------------------------------------------------

/// Picks the M/M/1 formula set for a single server and M/M/c otherwise
#[derive(Debug, Clone)]
pub enum Queue {
    SingleServer(MM1Queue),
    MultiServer(MMCQueue),
}

impl Queue {
    pub fn new(params: QueueParameters) -> Self {
        if params.server_count() == 1 {
            Queue::SingleServer(MM1Queue::from_single_server(params))
        } else {
            Queue::MultiServer(MMCQueue::new(params))
        }
    }

    /// Validates the rates and builds the matching model in one step
    pub fn from_rates(arrival_rate: f64, service_rate: f64, server_count: u32) -> Result<Self, QueueError> {
        QueueParameters::new(arrival_rate, service_rate, server_count).map(Self::new)
    }

    fn model(&self) -> &dyn QueueModel {
        match self {
            Queue::SingleServer(queue) => queue,
            Queue::MultiServer(queue) => queue,
        }
    }
}

impl QueueModel for Queue {
    fn parameters(&self) -> &QueueParameters {
        self.model().parameters()
    }

    fn empty_probability(&self) -> f64 {
        self.model().empty_probability()
    }

    fn state_probability(&self, n: u32) -> f64 {
        self.model().state_probability(n)
    }

    fn mean_queue_length(&self) -> f64 {
        self.model().mean_queue_length()
    }

    fn mean_system_length(&self) -> f64 {
        self.model().mean_system_length()
    }
}

/// Ws for the given rates, or the reason the queue cannot be evaluated
pub fn sojourn_time(arrival_rate: f64, service_rate: f64, server_count: u32) -> Result<f64, QueueError> {
    Queue::from_rates(arrival_rate, service_rate, server_count).map(|queue| queue.mean_sojourn_time())
}
