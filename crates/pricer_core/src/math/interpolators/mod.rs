//! Interpolation methods for term structures and surfaces.
//!
//! ## Available Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear interpolation between data points
//! - [`CubicSplineInterpolator`]: Natural cubic spline, coefficients from a dense linear solve
//! - [`BilinearInterpolator`]: 2D grid interpolation for surfaces
//!
//! ## Core Trait
//!
//! All 1D interpolators implement [`Interpolator`]:
//! - `interpolate(x)` fails outside the domain
//! - `interpolate_clamped(x)` extrapolates flat from the nearest end point
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::<f64>::new(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
//! assert_eq!(interp.domain(), (0.0, 3.0));
//!
//! let y = interp.interpolate(1.5).unwrap();
//! assert!((y - 2.5).abs() < 1e-10);
//!
//! // Flat extrapolation beyond the last knot
//! assert_eq!(interp.interpolate_clamped(10.0), 9.0);
//! ```

mod bilinear;
mod cubic_spline;
mod linear;

pub use bilinear::BilinearInterpolator;
pub use cubic_spline::CubicSplineInterpolator;
pub use linear::LinearInterpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation over a fixed set of knots.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` if `x` lies outside [`Interpolator::domain`].
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Valid interpolation range `(x_min, x_max)`.
    fn domain(&self) -> (T, T);

    /// Interpolated value with flat extrapolation outside the domain.
    fn interpolate_clamped(&self, x: T) -> T {
        let (lo, hi) = self.domain();
        let clamped = x.max(lo).min(hi);
        // In-domain evaluation of a validated interpolator cannot fail
        self.interpolate(clamped).unwrap_or_else(|_| T::nan())
    }
}

/// Validates knot vectors shared by the 1D interpolators.
///
/// Requires matching lengths, at least `min_points` knots and strictly
/// increasing abscissae.
pub(crate) fn validate_knots<T: Float>(
    xs: &[T],
    ys: &[T],
    min_points: usize,
) -> Result<(), InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.len() < min_points {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need: min_points,
        });
    }
    strictly_increasing(xs)
}

/// Fails with `NonMonotonicData` at the first non-increasing index.
pub(crate) fn strictly_increasing<T: Float>(xs: &[T]) -> Result<(), InterpolationError> {
    match xs.windows(2).position(|w| !(w[1] > w[0])) {
        Some(i) => Err(InterpolationError::NonMonotonicData { index: i + 1 }),
        None => Ok(()),
    }
}

/// Segment index `i` with `xs[i] <= x <= xs[i + 1]`, clamped to `[0, n - 2]`.
#[inline]
pub(crate) fn find_segment<T: Float>(xs: &[T], x: T) -> usize {
    let pos = xs.partition_point(|&xi| xi <= x);
    pos.saturating_sub(1).min(xs.len() - 2)
}

#[inline]
pub(crate) fn out_of_bounds<T: Float>(x: T, lo: T, hi: T) -> InterpolationError {
    InterpolationError::OutOfBounds {
        x: x.to_f64().unwrap_or(f64::NAN),
        min: lo.to_f64().unwrap_or(f64::NAN),
        max: hi.to_f64().unwrap_or(f64::NAN),
    }
}
