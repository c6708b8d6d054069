//! Heston engine configuration: Fourier quadrature and simulation grids.

use crate::error::ConfigError;
use crate::mc::{validate_counts, DEFAULT_PATHS, DEFAULT_SEED, DEFAULT_STEPS};

/// Default number of trapezoid panels.
pub const DEFAULT_FOURIER_POINTS: usize = 1000;

/// Default truncation of the Fourier integral.
pub const DEFAULT_UPPER_LIMIT: f64 = 100.0;

/// Trapezoid quadrature over (0, `upper_limit`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::heston::FourierConfig;
///
/// let config = FourierConfig::builder().n_points(2000).build().unwrap();
/// assert_eq!(config.n_points(), 2000);
/// assert_eq!(config.upper_limit(), 100.0);
///
/// assert!(FourierConfig::builder().upper_limit(-1.0).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourierConfig {
    n_points: usize,
    upper_limit: f64,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_FOURIER_POINTS,
            upper_limit: DEFAULT_UPPER_LIMIT,
        }
    }
}

impl FourierConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> FourierConfigBuilder {
        FourierConfigBuilder::default()
    }

    /// Number of equal panels.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    /// Upper integration limit.
    #[inline]
    pub fn upper_limit(&self) -> f64 {
        self.upper_limit
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidParameter` for fewer than two panels or a
    /// non-positive or non-finite upper limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_points < 2 {
            return Err(ConfigError::InvalidParameter {
                name: "n_points",
                value: format!("{} is below 2", self.n_points),
            });
        }
        if !(self.upper_limit.is_finite() && self.upper_limit > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "upper_limit",
                value: format!("{} must be finite and positive", self.upper_limit),
            });
        }
        Ok(())
    }
}

/// Builder for [`FourierConfig`].
#[derive(Clone, Debug, Default)]
pub struct FourierConfigBuilder {
    n_points: Option<usize>,
    upper_limit: Option<f64>,
}

impl FourierConfigBuilder {
    /// Sets the number of trapezoid panels.
    #[inline]
    pub fn n_points(mut self, n_points: usize) -> Self {
        self.n_points = Some(n_points);
        self
    }

    /// Sets the upper integration limit.
    #[inline]
    pub fn upper_limit(mut self, upper_limit: f64) -> Self {
        self.upper_limit = Some(upper_limit);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`FourierConfig::validate`].
    pub fn build(self) -> Result<FourierConfig, ConfigError> {
        let defaults = FourierConfig::default();
        let config = FourierConfig {
            n_points: self.n_points.unwrap_or(defaults.n_points),
            upper_limit: self.upper_limit.unwrap_or(defaults.upper_limit),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Simulation grid for the Heston Monte Carlo pricer.
///
/// Defaults: 100,000 paths, 100 steps, seed 12345. The scheme draws one
/// correlated pair per step, so there is no antithetic switch.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::heston::HestonMcConfig;
///
/// let config = HestonMcConfig::builder().n_paths(20_000).seed(7).build().unwrap();
/// assert_eq!(config.n_paths(), 20_000);
/// assert_eq!(config.n_steps(), 100);
/// assert_eq!(config.seed(), 7);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonMcConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
}

impl Default for HestonMcConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
        }
    }
}

impl HestonMcConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> HestonMcConfigBuilder {
        HestonMcConfigBuilder::default()
    }

    /// Number of simulated paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Euler steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed every simulation starts from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidPathCount` or `ConfigError::InvalidStepCount`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_counts(self.n_paths, self.n_steps)
    }
}

/// Builder for [`HestonMcConfig`].
#[derive(Clone, Debug, Default)]
pub struct HestonMcConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
}

impl HestonMcConfigBuilder {
    /// Sets the number of paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of Euler steps.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// See [`HestonMcConfig::validate`].
    pub fn build(self) -> Result<HestonMcConfig, ConfigError> {
        let defaults = HestonMcConfig::default();
        let config = HestonMcConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            n_steps: self.n_steps.unwrap_or(defaults.n_steps),
            seed: self.seed.unwrap_or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }
}
