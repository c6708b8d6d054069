//! Full-truncation Euler simulation of the Heston dynamics.
//!
//! With v⁺ = max(v, 0) each step applies
//!
//! ```text
//! v ← v⁺ + κ(θ − v⁺)dt + σ√(v⁺dt)·Z2
//! S ← S·(1 + (r − q)dt + √(v⁺dt)·Z1)
//! ```
//!
//! where (Z1, Z2) is one correlated normal pair per step.

use pricer_core::math::statistics::RunningStats;
use pricer_models::instruments::OptionContract;
use pricer_models::models::HestonParams;

use crate::rng::PricerRng;

/// Market inputs of one simulation run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct HestonPathSpec {
    pub spot: f64,
    pub carry: f64,
    pub expiry: f64,
    pub steps: usize,
}

/// Fills `spots` and `variances` with `steps + 1` points each.
pub(crate) fn simulate_into(
    rng: &mut PricerRng,
    params: &HestonParams,
    spec: &HestonPathSpec,
    spots: &mut Vec<f64>,
    variances: &mut Vec<f64>,
) {
    let dt = spec.expiry / spec.steps as f64;
    spots.clear();
    variances.clear();
    spots.reserve(spec.steps + 1);
    variances.reserve(spec.steps + 1);

    let (mut s, mut v) = (spec.spot, params.v0);
    spots.push(s);
    variances.push(v);
    for _ in 0..spec.steps {
        let (z1, z2) = rng.correlated_normals(params.rho);
        let v_plus = v.max(0.0);
        let root = (v_plus * dt).sqrt();
        v = v_plus + params.kappa * (params.theta - v_plus) * dt + params.sigma * root * z2;
        s *= 1.0 + spec.carry * dt + root * z1;
        spots.push(s);
        variances.push(v);
    }
}

/// Accumulates `n_paths` undiscounted terminal payoffs.
pub(crate) fn accumulate_terminal_payoffs(
    rng: &mut PricerRng,
    params: &HestonParams,
    spec: &HestonPathSpec,
    n_paths: usize,
    contract: &OptionContract,
) -> RunningStats {
    let mut stats = RunningStats::new();
    let mut spots = Vec::with_capacity(spec.steps + 1);
    let mut variances = Vec::with_capacity(spec.steps + 1);
    for _ in 0..n_paths {
        simulate_into(rng, params, spec, &mut spots, &mut variances);
        let terminal = spots.last().copied().unwrap_or(spec.spot);
        stats.push(contract.payoff(terminal));
    }
    stats
}
