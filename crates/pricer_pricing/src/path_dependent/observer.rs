//! PathObserver: streaming statistics for path-dependent payoffs.
//!
//! Statistics are accumulated as prices are observed, so a payoff can be
//! settled without keeping the path:
//!
//! - **Arithmetic average**: running sum / count
//! - **Geometric average**: exp(running log sum / count)
//! - **Maximum** and **minimum** for barrier monitoring
//! - **Terminal**: the last observed price

/// Streaming path observation statistics.
///
/// # Example
///
/// ```
/// use pricer_pricing::path_dependent::PathObserver;
///
/// let mut observer = PathObserver::new();
/// observer.observe_path(&[100.0, 105.0, 110.0, 95.0]);
///
/// assert_eq!(observer.count(), 4);
/// assert_eq!(observer.arithmetic_average(), 102.5);
/// assert_eq!(observer.maximum(), 110.0);
/// assert_eq!(observer.terminal(), 95.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathObserver {
    /// Σ S_i
    running_sum: f64,
    /// Σ ln(S_i)
    running_log_sum: f64,
    running_max: f64,
    running_min: f64,
    count: usize,
    terminal: f64,
}

impl PathObserver {
    /// Creates an empty observer.
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: 0.0,
            running_log_sum: 0.0,
            running_max: f64::NEG_INFINITY,
            running_min: f64::INFINITY,
            count: 0,
            terminal: 0.0,
        }
    }

    /// Observes a price. Prices must be positive for the geometric average.
    #[inline]
    pub fn observe(&mut self, price: f64) {
        self.running_sum += price;
        self.running_log_sum += price.ln();
        self.running_max = self.running_max.max(price);
        self.running_min = self.running_min.min(price);
        self.count += 1;
        self.terminal = price;
    }

    /// Observes every point of `path` in order.
    #[inline]
    pub fn observe_path(&mut self, path: &[f64]) {
        for &price in path {
            self.observe(price);
        }
    }

    /// Resets all statistics. Call before reusing the observer on a new path.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// `Σ S_i / n`, or 0 with no observations.
    #[inline]
    pub fn arithmetic_average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.running_sum / self.count as f64
        }
    }

    /// `exp(Σ ln S_i / n)`, or 0 with no observations.
    #[inline]
    pub fn geometric_average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.running_log_sum / self.count as f64).exp()
        }
    }

    /// Maximum observed price, `-inf` before any observation.
    #[inline]
    pub fn maximum(&self) -> f64 {
        self.running_max
    }

    /// Minimum observed price, `+inf` before any observation.
    #[inline]
    pub fn minimum(&self) -> f64 {
        self.running_min
    }

    /// Last observed price.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.terminal
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Default for PathObserver {
    fn default() -> Self {
        Self::new()
    }
}
