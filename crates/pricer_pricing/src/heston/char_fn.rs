//! Heston characteristic function in the "little trap" form.
//!
//! For the log price x_T = ln S_T under the risk-neutral measure:
//!
//! ```text
//! β = κ − ρσ·iu
//! d = √(β² + σ²(u² + iu)),    Re d ≥ 0
//! g = (β − d) / (β + d)
//! C = iu(ln S + (r − q)T) + κθ/σ² · [(β − d)T − 2 ln((1 − g e^{−dT}) / (1 − g))]
//! D = (β − d)/σ² · (1 − e^{−dT}) / (1 − g e^{−dT})
//! φ(u) = exp(C + D·v0)
//! ```
//!
//! Choosing the root with non-negative real part makes e^{−dT} decay, so
//! |g e^{−dT}| < 1 and the complex logarithm never crosses its branch cut
//! as T grows.

use num_complex::Complex64;
use pricer_models::models::HestonParams;

/// Risk-neutral characteristic function of ln S_T.
///
/// Requires σ > 0; the deterministic-variance limit is priced separately.
pub(crate) fn log_spot_cf(
    params: &HestonParams,
    u: Complex64,
    spot: f64,
    carry: f64,
    expiry: f64,
) -> Complex64 {
    let i = Complex64::i();
    let one = Complex64::new(1.0, 0.0);
    let sigma2 = params.sigma * params.sigma;

    let iu = i * u;
    let beta = params.kappa - params.rho * params.sigma * iu;
    let mut d = (beta * beta + sigma2 * (u * u + iu)).sqrt();
    if d.re < 0.0 {
        d = -d;
    }

    let g = (beta - d) / (beta + d);
    let decay = (-d * expiry).exp();
    let log_term = ((one - g * decay) / (one - g)).ln();

    let c = iu * (spot.ln() + carry * expiry)
        + (params.kappa * params.theta / sigma2) * ((beta - d) * expiry - 2.0 * log_term);
    let big_d = (beta - d) / sigma2 * (one - decay) / (one - g * decay);

    (c + big_d * params.v0).exp()
}
