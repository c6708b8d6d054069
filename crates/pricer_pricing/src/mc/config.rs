//! Monte Carlo simulation configuration.

use crate::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 10_000;

/// Default number of simulation paths.
pub const DEFAULT_PATHS: usize = 100_000;

/// Default number of time steps per path.
pub const DEFAULT_STEPS: usize = 100;

/// Default seed shared by every simulation engine.
pub const DEFAULT_SEED: u64 = 12345;

/// Monte Carlo simulation configuration.
///
/// Immutable once built. Use [`MonteCarloConfigBuilder`] to construct
/// instances; fields left unset take the defaults (100,000 paths, 100 steps,
/// seed 12345, antithetic sampling on).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .antithetic(false)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_steps(), 252);
/// assert!(!config.antithetic());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    antithetic: bool,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
            antithetic: true,
        }
    }
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Requested number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed every pricing call starts from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Whether paths are generated in mirrored (Z, −Z) pairs.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Number of payoffs actually averaged.
    ///
    /// Antithetic sampling rounds an odd path count up to the next even one.
    ///
    /// ```rust
    /// use pricer_pricing::mc::MonteCarloConfig;
    ///
    /// let config = MonteCarloConfig::builder().n_paths(1_001).build().unwrap();
    /// assert_eq!(config.effective_paths(), 1_002);
    /// ```
    #[inline]
    pub fn effective_paths(&self) -> usize {
        if self.antithetic {
            self.n_paths + self.n_paths % 2
        } else {
            self.n_paths
        }
    }

    /// Copy with a different seed.
    #[inline]
    pub fn with_seed(&self, seed: u64) -> Self {
        Self { seed, ..*self }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than 10,000,000
    /// - `n_steps` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_counts(self.n_paths, self.n_steps)
    }
}

/// Shared path and step bounds for every simulation config.
pub(crate) fn validate_counts(n_paths: usize, n_steps: usize) -> Result<(), ConfigError> {
    if n_paths == 0 || n_paths > MAX_PATHS {
        return Err(ConfigError::InvalidPathCount(n_paths));
    }
    if n_steps == 0 || n_steps > MAX_STEPS {
        return Err(ConfigError::InvalidStepCount(n_steps));
    }
    Ok(())
}

/// Builder for [`MonteCarloConfig`].
///
/// Validation happens once, in [`MonteCarloConfigBuilder::build`].
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    antithetic: Option<bool>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path, in [1, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables antithetic sampling.
    #[inline]
    pub fn antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = Some(antithetic);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidPathCount` or `ConfigError::InvalidStepCount`
    /// for counts outside their ranges.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let defaults = MonteCarloConfig::default();
        let config = MonteCarloConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            n_steps: self.n_steps.unwrap_or(defaults.n_steps),
            seed: self.seed.unwrap_or(defaults.seed),
            antithetic: self.antithetic.unwrap_or(defaults.antithetic),
        };
        config.validate()?;
        Ok(config)
    }
}
