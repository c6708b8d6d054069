//! Engine settings loaded from TOML with environment overrides.
//!
//! Every section and field is optional; missing values take the engine
//! defaults. Values are only validated when converted into engine configs.
//!
//! ```toml
//! [monte_carlo]
//! n_paths = 200000
//! antithetic = false
//!
//! [lsmc]
//! degree = 4
//!
//! [lattice]
//! n_steps = 500
//!
//! [heston]
//! n_points = 2000
//! upper_limit = 150.0
//! ```
//!
//! Environment overrides, applied by [`EngineSettings::apply_env_overrides`]:
//!
//! | Variable | Field |
//! |---|---|
//! | `PRICER_SEED` | seed of every simulation engine |
//! | `PRICER_MC_PATHS` | `monte_carlo.n_paths` |
//! | `PRICER_MC_STEPS` | `monte_carlo.n_steps` |
//! | `PRICER_LATTICE_STEPS` | `lattice.n_steps` |

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ConfigError;
use crate::heston::{FourierConfig, HestonMcConfig, DEFAULT_FOURIER_POINTS, DEFAULT_UPPER_LIMIT};
use crate::lattice::{LatticeConfig, DEFAULT_LATTICE_STEPS};
use crate::lsmc::{LsmcConfig, DEFAULT_DEGREE, DEFAULT_LSMC_PATHS, DEFAULT_LSMC_STEPS};
use crate::mc::{MonteCarloConfig, DEFAULT_PATHS, DEFAULT_SEED, DEFAULT_STEPS};

/// Seed override for every simulation engine.
pub const ENV_SEED: &str = "PRICER_SEED";
/// Monte Carlo path count override.
pub const ENV_MC_PATHS: &str = "PRICER_MC_PATHS";
/// Monte Carlo step count override.
pub const ENV_MC_STEPS: &str = "PRICER_MC_STEPS";
/// Lattice step count override.
pub const ENV_LATTICE_STEPS: &str = "PRICER_LATTICE_STEPS";

/// Settings loading errors.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid TOML for [`EngineSettings`].
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value was read but fails engine validation.
    #[error("Invalid engine settings: {0}")]
    Invalid(#[from] ConfigError),

    /// An environment override is not a valid number.
    #[error("Environment variable {name} has invalid value '{value}'")]
    EnvVar {
        /// Variable name
        name: &'static str,
        /// Rejected raw value
        value: String,
    },
}

/// `[monte_carlo]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloSettings {
    /// Paths per pricing call
    pub n_paths: usize,
    /// Time steps per path
    pub n_steps: usize,
    /// Seed
    pub seed: u64,
    /// Antithetic sampling
    pub antithetic: bool,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
            antithetic: true,
        }
    }
}

/// `[lsmc]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LsmcSettings {
    /// Paths per pricing call
    pub n_paths: usize,
    /// Exercise dates
    pub n_steps: usize,
    /// Seed
    pub seed: u64,
    /// Laguerre degree
    pub degree: usize,
    /// Antithetic sampling
    pub antithetic: bool,
}

impl Default for LsmcSettings {
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

/// `[lattice]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeSettings {
    /// Tree steps
    pub n_steps: usize,
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            n_steps: DEFAULT_LATTICE_STEPS,
        }
    }
}

/// `[heston]` section: quadrature and simulation grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HestonSettings {
    /// Trapezoid panels
    pub n_points: usize,
    /// Upper integration limit
    pub upper_limit: f64,
    /// Simulated paths
    pub n_paths: usize,
    /// Euler steps per path
    pub n_steps: usize,
    /// Seed
    pub seed: u64,
}

impl Default for HestonSettings {
    fn default() -> Self {
        Self {
            n_points: DEFAULT_FOURIER_POINTS,
            upper_limit: DEFAULT_UPPER_LIMIT,
            n_paths: DEFAULT_PATHS,
            n_steps: DEFAULT_STEPS,
            seed: DEFAULT_SEED,
        }
    }
}

/// Settings for every engine in the crate.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::settings::EngineSettings;
///
/// let settings = EngineSettings::from_toml_str("[lattice]\nn_steps = 500\n").unwrap();
/// assert_eq!(settings.lattice_config().unwrap().n_steps(), 500);
/// assert_eq!(settings.monte_carlo_config().unwrap().n_paths(), 100_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Plain Monte Carlo engine
    pub monte_carlo: MonteCarloSettings,
    /// Longstaff-Schwartz engine
    pub lsmc: LsmcSettings,
    /// Binomial and trinomial trees
    pub lattice: LatticeSettings,
    /// Heston engine
    pub heston: HestonSettings,
}

impl EngineSettings {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// `SettingsError::Parse` for malformed TOML or mistyped fields.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// `SettingsError::Io` if the file cannot be read, otherwise as
    /// [`EngineSettings::from_toml_str`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded engine settings");
        Ok(settings)
    }

    /// Applies `PRICER_*` overrides from the process environment.
    ///
    /// # Errors
    ///
    /// `SettingsError::EnvVar` for a variable that does not parse.
    pub fn apply_env_overrides(&mut self) -> Result<(), SettingsError> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides from any variable lookup.
    ///
    /// # Errors
    ///
    /// `SettingsError::EnvVar` for a value that does not parse.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = parse_var::<u64, _>(&lookup, ENV_SEED)? {
            self.monte_carlo.seed = seed;
            self.lsmc.seed = seed;
            self.heston.seed = seed;
        }
        if let Some(paths) = parse_var(&lookup, ENV_MC_PATHS)? {
            self.monte_carlo.n_paths = paths;
        }
        if let Some(steps) = parse_var(&lookup, ENV_MC_STEPS)? {
            self.monte_carlo.n_steps = steps;
        }
        if let Some(steps) = parse_var(&lookup, ENV_LATTICE_STEPS)? {
            self.lattice.n_steps = steps;
        }
        Ok(())
    }

    /// Validated Monte Carlo configuration.
    ///
    /// # Errors
    ///
    /// `SettingsError::Invalid` for out-of-range counts.
    pub fn monte_carlo_config(&self) -> Result<MonteCarloConfig, SettingsError> {
        let s = &self.monte_carlo;
        Ok(MonteCarloConfig::builder()
            .n_paths(s.n_paths)
            .n_steps(s.n_steps)
            .seed(s.seed)
            .antithetic(s.antithetic)
            .build()?)
    }

    /// Validated LSMC configuration.
    ///
    /// # Errors
    ///
    /// `SettingsError::Invalid` for out-of-range counts or degree.
    pub fn lsmc_config(&self) -> Result<LsmcConfig, SettingsError> {
        let s = &self.lsmc;
        Ok(LsmcConfig::builder()
            .n_paths(s.n_paths)
            .n_steps(s.n_steps)
            .seed(s.seed)
            .degree(s.degree)
            .antithetic(s.antithetic)
            .build()?)
    }

    /// Validated lattice configuration.
    ///
    /// # Errors
    ///
    /// `SettingsError::Invalid` for an out-of-range step count.
    pub fn lattice_config(&self) -> Result<LatticeConfig, SettingsError> {
        Ok(LatticeConfig::builder().n_steps(self.lattice.n_steps).build()?)
    }

    /// Validated Heston quadrature settings.
    ///
    /// # Errors
    ///
    /// `SettingsError::Invalid` for too few panels or a bad upper limit.
    pub fn fourier_config(&self) -> Result<FourierConfig, SettingsError> {
        Ok(FourierConfig::builder()
            .n_points(self.heston.n_points)
            .upper_limit(self.heston.upper_limit)
            .build()?)
    }

    /// Validated Heston simulation grid.
    ///
    /// # Errors
    ///
    /// `SettingsError::Invalid` for out-of-range counts.
    pub fn heston_mc_config(&self) -> Result<HestonMcConfig, SettingsError> {
        let s = &self.heston;
        Ok(HestonMcConfig::builder()
            .n_paths(s.n_paths)
            .n_steps(s.n_steps)
            .seed(s.seed)
            .build()?)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, SettingsError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| SettingsError::EnvVar { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_empty_document_gives_engine_defaults() {
        let settings = EngineSettings::from_toml_str("").unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.monte_carlo_config().unwrap(), MonteCarloConfig::default());
        assert_eq!(settings.lsmc_config().unwrap(), LsmcConfig::default());
        assert_eq!(settings.lattice_config().unwrap(), LatticeConfig::default());
        assert_eq!(settings.fourier_config().unwrap(), FourierConfig::default());
        assert_eq!(settings.heston_mc_config().unwrap(), HestonMcConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [monte_carlo]
            n_paths = 5000
            antithetic = false

            [heston]
            upper_limit = 150.0
        "#;
        let settings = EngineSettings::from_toml_str(toml).unwrap();
        let mc = settings.monte_carlo_config().unwrap();
        assert_eq!(mc.n_paths(), 5000);
        assert_eq!(mc.n_steps(), 100);
        assert!(!mc.antithetic());
        assert_eq!(settings.fourier_config().unwrap().upper_limit(), 150.0);
        assert_eq!(settings.fourier_config().unwrap().n_points(), 1000);
    }

    #[test]
    fn test_invalid_values_surface_on_conversion() {
        let settings = EngineSettings::from_toml_str("[lsmc]\ndegree = 12\n").unwrap();
        assert!(matches!(
            settings.lsmc_config(),
            Err(SettingsError::Invalid(ConfigError::InvalidParameter { name: "degree", .. }))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = EngineSettings::from_toml_str("[lattice]\nn_steps = \"many\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineSettings::from_file("/nonexistent/pricer/settings.toml").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }

    #[test]
    fn test_overrides() {
        let mut settings = EngineSettings::default();
        settings
            .apply_overrides_from(lookup(&[
                (ENV_SEED, "99"),
                (ENV_MC_PATHS, " 2048 "),
                (ENV_LATTICE_STEPS, "250"),
            ]))
            .unwrap();
        assert_eq!(settings.monte_carlo.seed, 99);
        assert_eq!(settings.lsmc.seed, 99);
        assert_eq!(settings.heston.seed, 99);
        assert_eq!(settings.monte_carlo.n_paths, 2048);
        assert_eq!(settings.monte_carlo.n_steps, DEFAULT_STEPS);
        assert_eq!(settings.lattice.n_steps, 250);
    }

    #[test]
    fn test_bad_override_is_reported() {
        let mut settings = EngineSettings::default();
        let err = settings
            .apply_overrides_from(lookup(&[(ENV_MC_STEPS, "ten")]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable PRICER_MC_STEPS has invalid value 'ten'"
        );
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut settings = EngineSettings::default();
        settings.lattice.n_steps = 321;
        let text = toml::to_string(&settings).unwrap();
        assert_eq!(EngineSettings::from_toml_str(&text).unwrap(), settings);
    }
}
