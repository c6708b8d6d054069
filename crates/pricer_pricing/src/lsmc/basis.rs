//! Weighted Laguerre basis for the continuation regression.

/// Writes e^{−x/2}·L_k(x) for k = 0..=degree into `out`.
///
/// The first four terms use the closed forms; higher degrees follow
/// (k+1)·L_{k+1} = (2k+1−x)·L_k − k·L_{k−1}, which carries over to the
/// weighted terms because the weight is a common factor.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::lsmc::laguerre_basis;
///
/// let mut out = Vec::new();
/// laguerre_basis(0.0, 3, &mut out);
/// assert_eq!(out, vec![1.0, 1.0, 1.0, 1.0]);
/// ```
pub fn laguerre_basis(x: f64, degree: usize, out: &mut Vec<f64>) {
    let w = (-0.5 * x).exp();
    out.clear();
    out.push(w);
    if degree >= 1 {
        out.push(w * (1.0 - x));
    }
    if degree >= 2 {
        out.push(w * (1.0 - 2.0 * x + 0.5 * x * x));
    }
    if degree >= 3 {
        out.push(w * (1.0 - 3.0 * x + 1.5 * x * x - x * x * x / 6.0));
    }
    for k in 3..degree {
        let kf = k as f64;
        let next = ((2.0 * kf + 1.0 - x) * out[k] - kf * out[k - 1]) / (kf + 1.0);
        out.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_length_matches_degree() {
        let mut out = Vec::new();
        for degree in 1..=8 {
            laguerre_basis(0.7, degree, &mut out);
            assert_eq!(out.len(), degree + 1);
        }
    }

    #[test]
    fn test_recursion_reproduces_closed_form_l3() {
        // L3 from the recursion on L1, L2 must equal the closed form.
        let x = 1.3_f64;
        let mut out = Vec::new();
        laguerre_basis(x, 3, &mut out);
        let w = (-0.5 * x).exp();
        let via_recursion = ((5.0 - x) * out[2] - 2.0 * out[1]) / 3.0;
        assert_relative_eq!(via_recursion, out[3], epsilon = 1e-12);
        assert_relative_eq!(out[0], w, epsilon = 1e-15);
    }

    #[test]
    fn test_l4_closed_form() {
        let x = 0.9_f64;
        let mut out = Vec::new();
        laguerre_basis(x, 4, &mut out);
        let l4 = 1.0 - 4.0 * x + 3.0 * x * x - 2.0 * x.powi(3) / 3.0 + x.powi(4) / 24.0;
        assert_relative_eq!(out[4], (-0.5 * x).exp() * l4, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_l0_positive(x in 0.0f64..20.0) {
            let mut out = Vec::new();
            laguerre_basis(x, 1, &mut out);
            prop_assert!(out[0] > 0.0);
        }
    }
}
