//! Lattice engine configuration.

use crate::error::ConfigError;
use crate::mc::MAX_STEPS;

/// Default number of tree steps.
pub const DEFAULT_LATTICE_STEPS: usize = 100;

/// Configuration shared by the binomial and trinomial trees.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lattice::LatticeConfig;
///
/// let config = LatticeConfig::builder().n_steps(500).build().unwrap();
/// assert_eq!(config.n_steps(), 500);
///
/// assert_eq!(LatticeConfig::default().n_steps(), 100);
/// assert!(LatticeConfig::builder().n_steps(0).build().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig {
    n_steps: usize,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            n_steps: DEFAULT_LATTICE_STEPS,
        }
    }
}

impl LatticeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> LatticeConfigBuilder {
        LatticeConfigBuilder::default()
    }

    /// Number of time steps N.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidStepCount` unless 1 ≤ `n_steps` ≤ 10,000.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        Ok(())
    }
}

/// Builder for [`LatticeConfig`].
#[derive(Clone, Debug, Default)]
pub struct LatticeConfigBuilder {
    n_steps: Option<usize>,
}

impl LatticeConfigBuilder {
    /// Sets the number of time steps, in [1, 10_000].
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidStepCount` for a step count outside [1, 10_000].
    pub fn build(self) -> Result<LatticeConfig, ConfigError> {
        let config = LatticeConfig {
            n_steps: self.n_steps.unwrap_or(DEFAULT_LATTICE_STEPS),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_bounds() {
        assert!(LatticeConfig::builder().n_steps(1).build().is_ok());
        assert!(LatticeConfig::builder().n_steps(10_000).build().is_ok());
        assert_eq!(
            LatticeConfig::builder().n_steps(10_001).build(),
            Err(ConfigError::InvalidStepCount(10_001))
        );
    }

    #[test]
    fn test_builder_default_matches_default() {
        assert_eq!(
            LatticeConfig::builder().build().unwrap(),
            LatticeConfig::default()
        );
    }
}
