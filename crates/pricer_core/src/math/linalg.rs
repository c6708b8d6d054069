//! Dense linear algebra for small regression systems.
//!
//! Provides a row-major [`Matrix`] with the handful of operations needed by
//! the least-squares fits in the pricing engines:
//!
//! - transpose and matrix/vector products
//! - square solve by Gaussian elimination with partial pivoting
//! - ordinary least squares by Householder QR on the column-scaled design
//!
//! Systems here have a few columns and many rows. Polynomial designs are
//! badly conditioned, so the fit never forms AᵀA; no decomposition is cached.

use std::ops::{Index, IndexMut};

use thiserror::Error;

use crate::types::PricingError;

/// Absolute pivot magnitude below which a system is treated as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Diagonal of R, relative to its largest entry, below which a
/// least-squares design is treated as rank deficient.
pub const RANK_TOLERANCE: f64 = 1e-12;

/// Linear algebra errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// Operand shapes are incompatible.
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected shape description
        expected: String,
        /// Actual shape description
        got: String,
    },

    /// Pivot fell below [`PIVOT_TOLERANCE`] during elimination, or a QR
    /// diagonal fell below [`RANK_TOLERANCE`].
    #[error("Singular matrix: pivot {pivot:e} at column {column}")]
    Singular {
        /// Column at which elimination broke down
        column: usize,
        /// Largest available pivot magnitude
        pivot: f64,
    },
}

impl From<LinalgError> for PricingError {
    fn from(err: LinalgError) -> Self {
        PricingError::NumericalInfeasibility(err.to_string())
    }
}

/// Row-major dense matrix of `f64`.
///
/// # Examples
///
/// ```
/// use pricer_core::math::linalg::Matrix;
///
/// let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
/// let x = a.solve(&[3.0, 5.0]).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-12);
/// assert!((x[1] - 1.4).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a zero-filled `rows x cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Builds a matrix from equally sized rows.
    ///
    /// # Errors
    ///
    /// `LinalgError::DimensionMismatch` if rows have differing lengths.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, LinalgError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(LinalgError::DimensionMismatch {
                    expected: format!("{} columns", n_cols),
                    got: format!("{} columns", row.len()),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Borrow row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Returns the transpose.
    pub fn transpose(&self) -> Self {
        let mut t = Self::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                t[(j, i)] = self[(i, j)];
            }
        }
        t
    }

    /// Matrix product `self * rhs`.
    pub fn matmul(&self, rhs: &Matrix) -> Result<Matrix, LinalgError> {
        if self.cols != rhs.rows {
            return Err(LinalgError::DimensionMismatch {
                expected: format!("{} rows", self.cols),
                got: format!("{} rows", rhs.rows),
            });
        }
        let mut out = Self::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let a = self[(i, k)];
                if a == 0.0 {
                    continue;
                }
                for j in 0..rhs.cols {
                    out[(i, j)] += a * rhs[(k, j)];
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product `self * v`.
    pub fn mul_vec(&self, v: &[f64]) -> Result<Vec<f64>, LinalgError> {
        if self.cols != v.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: format!("vector of length {}", self.cols),
                got: format!("vector of length {}", v.len()),
            });
        }
        Ok((0..self.rows)
            .map(|i| self.row(i).iter().zip(v).map(|(a, b)| a * b).sum())
            .collect())
    }

    /// Solves `self * x = b` for square `self`.
    ///
    /// Gaussian elimination with partial pivoting on a working copy; the
    /// receiver is left untouched.
    ///
    /// # Errors
    ///
    /// - `DimensionMismatch` if the matrix is not square or `b` has the wrong length
    /// - `Singular` if the best available pivot is below [`PIVOT_TOLERANCE`]
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>, LinalgError> {
        let n = self.rows;
        if self.cols != n {
            return Err(LinalgError::DimensionMismatch {
                expected: "square matrix".to_string(),
                got: format!("{}x{}", self.rows, self.cols),
            });
        }
        if b.len() != n {
            return Err(LinalgError::DimensionMismatch {
                expected: format!("rhs of length {}", n),
                got: format!("rhs of length {}", b.len()),
            });
        }

        let mut a = self.clone();
        let mut x = b.to_vec();

        for col in 0..n {
            let mut pivot_row = col;
            let mut pivot_abs = a[(col, col)].abs();
            for r in (col + 1)..n {
                let v = a[(r, col)].abs();
                if v > pivot_abs {
                    pivot_abs = v;
                    pivot_row = r;
                }
            }
            if pivot_abs < PIVOT_TOLERANCE {
                return Err(LinalgError::Singular {
                    column: col,
                    pivot: pivot_abs,
                });
            }
            if pivot_row != col {
                a.swap_rows(pivot_row, col);
                x.swap(pivot_row, col);
            }

            let pivot = a[(col, col)];
            for r in (col + 1)..n {
                let factor = a[(r, col)] / pivot;
                if factor == 0.0 {
                    continue;
                }
                for c in col..n {
                    a[(r, c)] -= factor * a[(col, c)];
                }
                x[r] -= factor * x[col];
            }
        }

        // Back substitution
        for i in (0..n).rev() {
            let tail: f64 = ((i + 1)..n).map(|j| a[(i, j)] * x[j]).sum();
            x[i] = (x[i] - tail) / a[(i, i)];
        }
        Ok(x)
    }

    fn swap_rows(&mut self, i: usize, j: usize) {
        for c in 0..self.cols {
            self.data.swap(i * self.cols + c, j * self.cols + c);
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i * self.cols + j]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i * self.cols + j]
    }
}

/// Ordinary least squares fit of `y` on the columns of `design`.
///
/// Columns are scaled to unit norm, then reduced by Householder
/// reflections applied to the design and `y` together; β comes from back
/// substitution on R and is unscaled at the end. Working on the design
/// keeps the error proportional to cond(A) rather than cond(A)².
///
/// # Errors
///
/// - `DimensionMismatch` if `y.len() != design.rows()` or there are fewer
///   rows than columns
/// - `Singular` if a column is zero or (numerically) collinear with the
///   ones before it
///
/// # Examples
///
/// ```
/// use pricer_core::math::linalg::{least_squares, Matrix};
///
/// // y = 1 + 2x sampled without noise
/// let design = Matrix::from_rows(&[
///     vec![1.0, 0.0],
///     vec![1.0, 1.0],
///     vec![1.0, 2.0],
/// ]).unwrap();
/// let beta = least_squares(&design, &[1.0, 3.0, 5.0]).unwrap();
/// assert!((beta[0] - 1.0).abs() < 1e-10);
/// assert!((beta[1] - 2.0).abs() < 1e-10);
/// ```
pub fn least_squares(design: &Matrix, y: &[f64]) -> Result<Vec<f64>, LinalgError> {
    let m = design.rows();
    let k = design.cols();
    if m != y.len() {
        return Err(LinalgError::DimensionMismatch {
            expected: format!("{} observations", m),
            got: format!("{} observations", y.len()),
        });
    }
    if m < k {
        return Err(LinalgError::DimensionMismatch {
            expected: format!("at least {} observations", k),
            got: format!("{} observations", m),
        });
    }

    let mut a = design.clone();
    let mut scale = vec![0.0; k];
    for (j, s) in scale.iter_mut().enumerate() {
        let norm = (0..m).map(|i| a[(i, j)] * a[(i, j)]).sum::<f64>().sqrt();
        if norm == 0.0 || !norm.is_finite() {
            return Err(LinalgError::Singular {
                column: j,
                pivot: norm,
            });
        }
        for i in 0..m {
            a[(i, j)] /= norm;
        }
        *s = norm;
    }

    let mut b = y.to_vec();
    let mut r_max = 0.0_f64;
    for j in 0..k {
        let norm_x = (j..m).map(|i| a[(i, j)] * a[(i, j)]).sum::<f64>().sqrt();
        r_max = r_max.max(norm_x);
        if norm_x <= RANK_TOLERANCE * r_max {
            return Err(LinalgError::Singular {
                column: j,
                pivot: norm_x,
            });
        }

        // Reflect x onto alpha·e_j with the sign that avoids cancellation.
        let alpha = if a[(j, j)] > 0.0 { -norm_x } else { norm_x };
        let v0 = a[(j, j)] - alpha;
        let v_norm_sq = v0 * v0 + ((j + 1)..m).map(|i| a[(i, j)] * a[(i, j)]).sum::<f64>();

        for c in (j + 1)..k {
            let dot = v0 * a[(j, c)] + ((j + 1)..m).map(|i| a[(i, j)] * a[(i, c)]).sum::<f64>();
            let f = 2.0 * dot / v_norm_sq;
            a[(j, c)] -= f * v0;
            for i in (j + 1)..m {
                let vi = a[(i, j)];
                a[(i, c)] -= f * vi;
            }
        }
        let dot = v0 * b[j] + ((j + 1)..m).map(|i| a[(i, j)] * b[i]).sum::<f64>();
        let f = 2.0 * dot / v_norm_sq;
        b[j] -= f * v0;
        for i in (j + 1)..m {
            b[i] -= f * a[(i, j)];
        }
        a[(j, j)] = alpha;
    }

    // Back substitution on R, then undo the column scaling
    let mut beta = vec![0.0; k];
    for j in (0..k).rev() {
        let tail: f64 = ((j + 1)..k).map(|c| a[(j, c)] * beta[c]).sum();
        beta[j] = (b[j] - tail) / a[(j, j)];
    }
    for (bj, s) in beta.iter_mut().zip(&scale) {
        *bj /= s;
    }
    Ok(beta)
}
