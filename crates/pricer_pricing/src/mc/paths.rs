//! Geometric Brownian motion path generation.
//!
//! Paths use the exact log-space step
//!
//! ```text
//! S(t+dt) = S(t) × exp((r − q − σ²/2)dt + σ√dt × Z)
//! ```
//!
//! and are written into caller-owned buffers so the pricing loop reuses the
//! same allocation for every path. Index 0 holds the spot.

use pricer_core::market_data::MarketData;

use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Examples
///
/// ```rust
/// use pricer_core::market_data::MarketData;
/// use pricer_pricing::mc::GbmParams;
///
/// let market = MarketData::new(100.0, 0.05, 0.2, 0.01).unwrap();
/// let params = GbmParams::from_market(&market, 2.0);
/// assert_eq!(params.maturity, 2.0);
/// assert!((params.log_drift() - (0.05 - 0.01 - 0.02)).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Continuous dividend yield (q), annualised.
    pub dividend: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, dividend: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            dividend,
            volatility,
            maturity,
        }
    }

    /// Parameters for a validated market snapshot over `maturity`.
    #[inline]
    pub fn from_market(market: &MarketData, maturity: f64) -> Self {
        Self::new(
            market.spot(),
            market.rate(),
            market.dividend(),
            market.volatility(),
            maturity,
        )
    }

    /// Log-price drift r − q − σ²/2.
    #[inline]
    pub fn log_drift(&self) -> f64 {
        self.rate - self.dividend - 0.5 * self.volatility * self.volatility
    }

    /// Discount factor e^{−rT} to time zero.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Per-step drift and diffusion (drift·dt, σ√dt) for `steps` steps.
    #[inline]
    fn step_terms(&self, steps: usize) -> (f64, f64) {
        let dt = self.maturity / steps as f64;
        (self.log_drift() * dt, self.volatility * dt.sqrt())
    }
}

impl Default for GbmParams {
    fn default() -> Self {
        Self {
            spot: 100.0,
            rate: 0.05,
            dividend: 0.0,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

/// Fills `out` with one path of `steps + 1` points.
///
/// The buffer is cleared first and grows only on its first use.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{simulate_path, GbmParams};
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
/// let mut path = Vec::new();
/// simulate_path(&mut rng, &GbmParams::default(), 12, &mut path);
/// assert_eq!(path.len(), 13);
/// assert_eq!(path[0], 100.0);
/// ```
pub fn simulate_path(rng: &mut PricerRng, params: &GbmParams, steps: usize, out: &mut Vec<f64>) {
    let (drift_dt, vol_sqrt_dt) = params.step_terms(steps);
    out.clear();
    out.reserve(steps + 1);

    let mut spot = params.spot;
    out.push(spot);
    for _ in 0..steps {
        let z = rng.gen_normal();
        spot *= (drift_dt + vol_sqrt_dt * z).exp();
        out.push(spot);
    }
}

/// Fills `plus` and `minus` with mirrored paths driven by Z and −Z.
pub fn simulate_antithetic_pair(
    rng: &mut PricerRng,
    params: &GbmParams,
    steps: usize,
    plus: &mut Vec<f64>,
    minus: &mut Vec<f64>,
) {
    let (drift_dt, vol_sqrt_dt) = params.step_terms(steps);
    plus.clear();
    minus.clear();
    plus.reserve(steps + 1);
    minus.reserve(steps + 1);

    let (mut up, mut down) = (params.spot, params.spot);
    plus.push(up);
    minus.push(down);
    for _ in 0..steps {
        let z = rng.gen_normal();
        up *= (drift_dt + vol_sqrt_dt * z).exp();
        down *= (drift_dt - vol_sqrt_dt * z).exp();
        plus.push(up);
        minus.push(down);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::math::statistics::RunningStats;

    #[test]
    fn test_path_shape_and_positivity() {
        let mut rng = PricerRng::from_seed(1);
        let mut path = Vec::new();
        simulate_path(&mut rng, &GbmParams::default(), 50, &mut path);
        assert_eq!(path.len(), 51);
        assert!(path.iter().all(|s| *s > 0.0));
    }

    #[test]
    fn test_buffer_is_reused() {
        let mut rng = PricerRng::from_seed(1);
        let mut path = Vec::new();
        simulate_path(&mut rng, &GbmParams::default(), 10, &mut path);
        simulate_path(&mut rng, &GbmParams::default(), 4, &mut path);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn test_zero_volatility_is_deterministic_forward() {
        let params = GbmParams::new(100.0, 0.05, 0.02, 0.0, 2.0);
        let mut rng = PricerRng::from_seed(3);
        let mut path = Vec::new();
        simulate_path(&mut rng, &params, 8, &mut path);
        assert_relative_eq!(path[8], 100.0 * (0.03_f64 * 2.0).exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_antithetic_pair_mirrors_log_returns() {
        let params = GbmParams::default();
        let mut rng = PricerRng::from_seed(9);
        let (mut plus, mut minus) = (Vec::new(), Vec::new());
        simulate_antithetic_pair(&mut rng, &params, 20, &mut plus, &mut minus);
        let drift = params.log_drift() * params.maturity;
        let up = (plus[20] / params.spot).ln();
        let down = (minus[20] / params.spot).ln();
        assert_relative_eq!(up + down, 2.0 * drift, epsilon = 1e-10);
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        let params = GbmParams::default();
        let mut rng = PricerRng::from_seed(2024);
        let mut path = Vec::new();
        let mut stats = RunningStats::new();
        for _ in 0..20_000 {
            simulate_path(&mut rng, &params, 4, &mut path);
            stats.push(path[4]);
        }
        let forward = 100.0 * 0.05_f64.exp();
        let error = (stats.mean() - forward).abs();
        assert!(
            error < (4.0 * stats.std_error()).max(0.1),
            "mean {} vs forward {}",
            stats.mean(),
            forward
        );
    }
}
