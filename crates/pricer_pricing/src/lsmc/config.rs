//! Longstaff-Schwartz configuration.

use crate::error::ConfigError;
use crate::mc::{validate_counts, DEFAULT_SEED};

/// Default number of LSMC paths.
pub const DEFAULT_LSMC_PATHS: usize = 50_000;

/// Default number of exercise dates.
pub const DEFAULT_LSMC_STEPS: usize = 50;

/// Default Laguerre degree.
pub const DEFAULT_DEGREE: usize = 3;

/// Highest supported Laguerre degree.
pub const MAX_DEGREE: usize = 8;

/// Longstaff-Schwartz configuration.
///
/// `n_steps` equally spaced dates are exercise opportunities; `degree` is
/// the highest Laguerre polynomial in the continuation regression.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lsmc::LsmcConfig;
///
/// let config = LsmcConfig::builder().n_paths(20_000).degree(4).build().unwrap();
/// assert_eq!(config.degree(), 4);
/// assert_eq!(config.n_steps(), 50);
///
/// assert!(LsmcConfig::builder().degree(9).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LsmcConfig {
    n_paths: usize,
    n_steps: usize,
    seed: u64,
    degree: usize,
    antithetic: bool,
}

impl Default for LsmcConfig {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_LSMC_PATHS,
            n_steps: DEFAULT_LSMC_STEPS,
            seed: DEFAULT_SEED,
            degree: DEFAULT_DEGREE,
            antithetic: true,
        }
    }
}

impl LsmcConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LsmcConfigBuilder {
        LsmcConfigBuilder::default()
    }

    /// Requested number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps (exercise dates).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Seed every pricing call starts from.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Highest Laguerre degree in the regression.
    #[inline]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether paths are generated in mirrored pairs.
    #[inline]
    pub fn antithetic(&self) -> bool {
        self.antithetic
    }

    /// Number of simulated paths; antithetic rounds odd counts up.
    #[inline]
    pub fn effective_paths(&self) -> usize {
        if self.antithetic {
            self.n_paths + self.n_paths % 2
        } else {
            self.n_paths
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `InvalidPathCount` / `InvalidStepCount` for counts out of range
    /// - `InvalidParameter` for a degree outside [1, 8]
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_counts(self.n_paths, self.n_steps)?;
        if self.degree == 0 || self.degree > MAX_DEGREE {
            return Err(ConfigError::InvalidParameter {
                name: "degree",
                value: format!("{} is outside [1, {}]", self.degree, MAX_DEGREE),
            });
        }
        Ok(())
    }
}

/// Builder for [`LsmcConfig`].
#[derive(Clone, Debug, Default)]
pub struct LsmcConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
    degree: Option<usize>,
    antithetic: Option<bool>,
}

impl LsmcConfigBuilder {
    /// Sets the number of paths, in [1, 10_000_000].
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of exercise dates, in [1, 10_000].
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

    /// Sets the Laguerre degree, in [1, 8].
    #[inline]
    pub fn degree(mut self, degree: usize) -> Self {
        self.degree = Some(degree);
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
    /// See [`LsmcConfig::validate`].
    pub fn build(self) -> Result<LsmcConfig, ConfigError> {
        let defaults = LsmcConfig::default();
        let config = LsmcConfig {
            n_paths: self.n_paths.unwrap_or(defaults.n_paths),
            n_steps: self.n_steps.unwrap_or(defaults.n_steps),
            seed: self.seed.unwrap_or(defaults.seed),
            degree: self.degree.unwrap_or(defaults.degree),
            antithetic: self.antithetic.unwrap_or(defaults.antithetic),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LsmcConfig::default();
        assert_eq!(config.n_paths(), 50_000);
        assert_eq!(config.n_steps(), 50);
        assert_eq!(config.seed(), 12345);
        assert_eq!(config.degree(), 3);
        assert!(config.antithetic());
        assert_eq!(LsmcConfig::builder().build().unwrap(), config);
    }

    #[test]
    fn test_degree_bounds() {
        assert!(matches!(
            LsmcConfig::builder().degree(0).build(),
            Err(ConfigError::InvalidParameter { name: "degree", .. })
        ));
        assert!(LsmcConfig::builder().degree(1).build().is_ok());
        assert!(LsmcConfig::builder().degree(8).build().is_ok());
    }

    #[test]
    fn test_counts_validated() {
        assert_eq!(
            LsmcConfig::builder().n_paths(0).build(),
            Err(ConfigError::InvalidPathCount(0))
        );
        assert_eq!(
            LsmcConfig::builder().n_steps(0).build(),
            Err(ConfigError::InvalidStepCount(0))
        );
    }
}
