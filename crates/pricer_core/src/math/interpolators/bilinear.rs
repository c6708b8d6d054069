//! Bilinear 2D interpolation for surfaces.

use super::{find_segment, out_of_bounds, strictly_increasing};
use crate::types::InterpolationError;
use num_traits::Float;

/// Bilinear interpolator for 2D grid data.
///
/// The grid is stored as `zs[i][j] = z(xs[i], ys[j])`, with `xs` the row axis
/// and `ys` the column axis. Both axes must be strictly increasing.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::BilinearInterpolator;
///
/// let xs = [0.0, 1.0, 2.0];
/// let ys = [0.0, 1.0];
/// let zs = [&[0.0, 1.0][..], &[2.0, 3.0][..], &[4.0, 5.0][..]];
///
/// let interp = BilinearInterpolator::<f64>::new(&xs, &ys, &zs).unwrap();
/// assert!((interp.interpolate(0.5, 0.5).unwrap() - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct BilinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
    zs: Vec<Vec<T>>,
}

impl<T: Float> BilinearInterpolator<T> {
    /// Construct a bilinear interpolator from grid data.
    ///
    /// # Errors
    ///
    /// * `InsufficientData` - Fewer than 2 points on an axis
    /// * `InvalidInput` - Grid dimensions don't match axis lengths
    /// * `NonMonotonicData` - An axis is not strictly increasing
    pub fn new(xs: &[T], ys: &[T], zs: &[&[T]]) -> Result<Self, InterpolationError> {
        for axis in [xs, ys] {
            if axis.len() < 2 {
                return Err(InterpolationError::InsufficientData {
                    got: axis.len(),
                    need: 2,
                });
            }
            strictly_increasing(axis)?;
        }

        if zs.len() != xs.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid rows ({}) must match x-axis length ({})",
                zs.len(),
                xs.len()
            )));
        }
        if let Some((i, row)) = zs.iter().enumerate().find(|(_, r)| r.len() != ys.len()) {
            return Err(InterpolationError::InvalidInput(format!(
                "Grid row {} length ({}) must match y-axis length ({})",
                i,
                row.len(),
                ys.len()
            )));
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            zs: zs.iter().map(|row| row.to_vec()).collect(),
        })
    }

    /// Interpolate value at point (x, y).
    ///
    /// ```text
    /// z = (1-u)(1-v)*z00 + u*(1-v)*z10 + (1-u)*v*z01 + u*v*z11
    /// ```
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if (x, y) lies outside the grid.
    pub fn interpolate(&self, x: T, y: T) -> Result<T, InterpolationError> {
        let (x_lo, x_hi) = self.domain_x();
        if x < x_lo || x > x_hi {
            return Err(out_of_bounds(x, x_lo, x_hi));
        }
        let (y_lo, y_hi) = self.domain_y();
        if y < y_lo || y > y_hi {
            return Err(out_of_bounds(y, y_lo, y_hi));
        }
        Ok(self.blend(x, y))
    }

    /// Interpolate with each coordinate clamped to the grid edges.
    pub fn interpolate_clamped(&self, x: T, y: T) -> T {
        let (x_lo, x_hi) = self.domain_x();
        let (y_lo, y_hi) = self.domain_y();
        self.blend(x.max(x_lo).min(x_hi), y.max(y_lo).min(y_hi))
    }

    /// Valid domain for x.
    #[inline]
    pub fn domain_x(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    /// Valid domain for y.
    #[inline]
    pub fn domain_y(&self) -> (T, T) {
        (self.ys[0], self.ys[self.ys.len() - 1])
    }

    fn blend(&self, x: T, y: T) -> T {
        let i = find_segment(&self.xs, x);
        let j = find_segment(&self.ys, y);

        let u = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let v = (y - self.ys[j]) / (self.ys[j + 1] - self.ys[j]);
        let one = T::one();

        (one - u) * (one - v) * self.zs[i][j]
            + u * (one - v) * self.zs[i + 1][j]
            + (one - u) * v * self.zs[i][j + 1]
            + u * v * self.zs[i + 1][j + 1]
    }
}
