use super::{QueueModel, QueueParameters};

/// Multi-server queue with Poisson arrivals, exponential service and `c` identical servers
///
/// Powers and factorials are folded into running `f64` products so that large
/// server counts do not overflow.
#[derive(Debug, Clone)]
pub struct MMCQueue {
    params: QueueParameters,
    /// (λ/μ)ᶜ / c!
    saturation_term: f64,
    /// P0, cached since every other metric depends on it
    p0: f64,
}

impl MMCQueue {
    pub fn new(params: QueueParameters) -> Self {
        let load = params.offered_load();
        let servers = params.server_count();
        let rho = params.utilization();

        // n = 0 term is 1, then n = 1 ..= c-1
        let mut term = 1.0;
        let mut sum = 1.0;
        for n in 1..servers {
            term *= load / f64::from(n);
            sum += term;
        }
        let saturation_term = term * load / f64::from(servers);
        let p0 = 1.0 / (sum + saturation_term / (1.0 - rho));

        Self {
            params,
            saturation_term,
            p0,
        }
    }
}

impl QueueModel for MMCQueue {
    fn parameters(&self) -> &QueueParameters {
        &self.params
    }

    /// P0 = [ Σ_{n=0}^{c-1} (λ/μ)ⁿ/n! + (λ/μ)ᶜ/c! · 1/(1-ρ) ]⁻¹
    fn empty_probability(&self) -> f64 {
        self.p0
    }

    /// n < c: (λ/μ)ⁿ/n! · P0
    /// n ≥ c: (λ/μ)ⁿ / (c!·c^(n-c)) · P0, computed as (λ/μ)ᶜ/c! · ρ^(n-c) · P0
    fn state_probability(&self, n: u32) -> f64 {
        let servers = self.params.server_count();
        if n < servers {
            let load = self.params.offered_load();
            let term = (1..=n).fold(1.0, |acc, k| acc * load / f64::from(k));
            term * self.p0
        } else {
            let excess = f64::from(n - servers);
            self.saturation_term * self.params.utilization().powf(excess) * self.p0
        }
    }

    /// Lq = (λ/μ)ᶜ·ρ / (c!·(1-ρ)²) · P0
    fn mean_queue_length(&self) -> f64 {
        let rho = self.params.utilization();
        self.saturation_term * rho / ((1.0 - rho) * (1.0 - rho)) * self.p0
    }

    /// Ls = Lq + λ/μ
    fn mean_system_length(&self) -> f64 {
        self.mean_queue_length() + self.params.offered_load()
    }
}
