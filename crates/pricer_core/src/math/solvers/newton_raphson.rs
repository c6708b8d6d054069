//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)`. Fails rather than wanders when
/// the derivative collapses below `config.min_derivative` or an iterate
/// becomes non-finite.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
/// let root = solver.find_root(|x: f64| x * x - 2.0, |x: f64| 2.0 * x, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Errors
    ///
    /// * `SolverError::MaxIterationsExceeded` - Failed to converge
    /// * `SolverError::DerivativeNearZero` - Derivative too small
    /// * `SolverError::NumericalInstability` - Iterate became non-finite
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.find_root_in_domain(f, f_prime, x0, |_| true, x0)
    }

    /// Newton iteration restricted to a domain.
    ///
    /// Whenever an update leaves the domain (`in_domain(x)` is false) the
    /// iterate is reset to `restart` instead of failing. Used for searches
    /// over strictly positive parameters such as volatility.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::NewtonRaphsonSolver;
    ///
    /// let solver = NewtonRaphsonSolver::<f64>::with_defaults();
    /// // ln(x) = 0 from a guess whose first step overshoots below zero
    /// let root = solver
    ///     .find_root_in_domain(|x| x.ln(), |x| 1.0 / x, 3.0, |x| x > 0.0, 0.5)
    ///     .unwrap();
    /// assert!((root - 1.0).abs() < 1e-9);
    /// ```
    pub fn find_root_in_domain<F, G, D>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        in_domain: D,
        restart: T,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
        D: Fn(T) -> bool,
    {
        let mut x = x0;

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);
            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);
            if f_prime_val.abs() < self.config.min_derivative {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = x - f_val / f_prime_val;

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
            if !in_domain(x) {
                x = restart;
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
