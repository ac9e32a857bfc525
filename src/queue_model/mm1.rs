use super::{QueueError, QueueModel, QueueParameters};

/// Single-server queue with Poisson arrivals and exponential service
#[derive(Debug, Clone)]
pub struct MM1Queue {
    params: QueueParameters,
}

impl MM1Queue {
    /// Creates an M/M/1 model, requiring exactly one server
    pub fn new(params: QueueParameters) -> Result<Self, QueueError> {
        if params.server_count() != 1 {
            return Err(QueueError::ServerCountMismatch {
                expected: 1,
                actual: params.server_count(),
            });
        }
        Ok(Self::from_single_server(params))
    }

    pub(crate) fn from_single_server(params: QueueParameters) -> Self {
        debug_assert_eq!(params.server_count(), 1);
        Self { params }
    }
}

impl QueueModel for MM1Queue {
    fn parameters(&self) -> &QueueParameters {
        &self.params
    }

    /// P0 = 1 - ρ
    fn empty_probability(&self) -> f64 {
        1.0 - self.params.utilization()
    }

    /// Pn = P0 · ρⁿ
    fn state_probability(&self, n: u32) -> f64 {
        self.empty_probability() * self.params.utilization().powf(f64::from(n))
    }

    /// Lq = ρ² / (1 - ρ)
    fn mean_queue_length(&self) -> f64 {
        let rho = self.params.utilization();
        rho * rho / (1.0 - rho)
    }

    /// Ls = Ws · λ
    fn mean_system_length(&self) -> f64 {
        self.mean_sojourn_time() * self.params.arrival_rate()
    }
}
