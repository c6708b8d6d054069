//! Natural cubic spline interpolation.

use super::{find_segment, out_of_bounds, validate_knots, Interpolator};
use crate::math::linalg::Matrix;
use crate::types::InterpolationError;

/// Natural cubic spline through a set of knots.
///
/// On segment `i` the spline is
/// `a_i + b_i dx + c_i dx² + d_i dx³` with `dx = x - x_i`. The second
/// derivative vanishes at both end points. The `c` coefficients come from
/// the spline's tridiagonal system, assembled as a dense [`Matrix`] and
/// solved by Gaussian elimination.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{CubicSplineInterpolator, Interpolator};
///
/// let spline = CubicSplineInterpolator::new(&[0.0, 1.0, 2.0], &[0.0, 1.0, 0.0]).unwrap();
/// assert!((spline.interpolate(1.0).unwrap() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolator {
    xs: Vec<f64>,
    a: Vec<f64>,
    b: Vec<f64>,
    c: Vec<f64>,
    d: Vec<f64>,
}

impl CubicSplineInterpolator {
    /// Fits a natural cubic spline.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - Mismatched lengths or a degenerate spline system
    /// * `InsufficientData` - Fewer than 2 knots
    /// * `NonMonotonicData` - Abscissae not strictly increasing
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, InterpolationError> {
        validate_knots(xs, ys, 2)?;

        let n = xs.len() - 1;
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();

        let mut system = Matrix::zeros(n + 1, n + 1);
        let mut rhs = vec![0.0; n + 1];
        system[(0, 0)] = 1.0;
        system[(n, n)] = 1.0;
        for i in 1..n {
            system[(i, i - 1)] = h[i - 1];
            system[(i, i)] = 2.0 * (h[i - 1] + h[i]);
            system[(i, i + 1)] = h[i];
            rhs[i] = 3.0 * ((ys[i + 1] - ys[i]) / h[i] - (ys[i] - ys[i - 1]) / h[i - 1]);
        }

        let c = system
            .solve(&rhs)
            .map_err(|e| InterpolationError::InvalidInput(format!("spline system: {}", e)))?;

        let mut b = Vec::with_capacity(n);
        let mut d = Vec::with_capacity(n);
        for i in 0..n {
            b.push((ys[i + 1] - ys[i]) / h[i] - h[i] * (2.0 * c[i] + c[i + 1]) / 3.0);
            d.push((c[i + 1] - c[i]) / (3.0 * h[i]));
        }

        Ok(Self {
            xs: xs.to_vec(),
            a: ys.to_vec(),
            b,
            c,
            d,
        })
    }
}

impl Interpolator<f64> for CubicSplineInterpolator {
    fn interpolate(&self, x: f64) -> Result<f64, InterpolationError> {
        let (lo, hi) = self.domain();
        if x < lo || x > hi {
            return Err(out_of_bounds(x, lo, hi));
        }
        let i = find_segment(&self.xs, x);
        let dx = x - self.xs[i];
        Ok(self.a[i] + dx * (self.b[i] + dx * (self.c[i] + dx * self.d[i])))
    }

    #[inline]
    fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
