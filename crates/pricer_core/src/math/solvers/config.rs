//! Solver configuration types.

use num_traits::Float;

/// Configuration for Newton-type root finding.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(config.max_iterations, 100);
///
/// // Settings used by the implied volatility search
/// let iv = SolverConfig::new(1e-6, 100).with_min_derivative(1e-10);
/// assert_eq!(iv.min_derivative, 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T: Float> {
    /// The solver stops when `|f(x)| < tolerance`.
    pub tolerance: T,

    /// Iteration budget before `SolverError::MaxIterationsExceeded`.
    pub max_iterations: usize,

    /// Derivative magnitude below which a Newton step is refused.
    pub min_derivative: T,
}

impl<T: Float> Default for SolverConfig<T> {
    /// `tolerance` 1e-10, `max_iterations` 100, `min_derivative` 1e-30.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
            min_derivative: T::from(1e-30).unwrap_or_else(T::min_positive_value),
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a configuration with the given tolerance and iteration budget.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Replace the minimum accepted derivative magnitude.
    pub fn with_min_derivative(mut self, min_derivative: T) -> Self {
        self.min_derivative = min_derivative;
        self
    }
}
