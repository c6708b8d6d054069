//! Chunked parallel Monte Carlo on rayon.
//!
//! Paths are split into a fixed number of chunks. Chunk `i` always draws
//! from `StreamArena::stream(i)` and partial statistics are merged in chunk
//! order, so the result depends on (seed, n_chunks) and never on thread
//! scheduling.

use pricer_core::market_data::MarketData;
use pricer_core::math::statistics::RunningStats;
use pricer_core::types::PricingError;
use pricer_models::instruments::OptionContract;
use rayon::prelude::*;

use super::paths::GbmParams;
use super::pricer::{accumulate_payoffs, MonteCarloEngine, PricingResult};
use crate::error::ConfigError;
use crate::rng::StreamArena;

/// Splits `units` into `n_chunks` near-equal counts, larger chunks first.
fn split_units(units: usize, n_chunks: usize) -> Vec<usize> {
    let base = units / n_chunks;
    let rem = units % n_chunks;
    (0..n_chunks).map(|i| base + usize::from(i < rem)).collect()
}

impl MonteCarloEngine {
    /// Parallel variant of [`MonteCarloEngine::price_detailed`].
    ///
    /// Uses `n_chunks` independent streams from a [`StreamArena`] seeded
    /// with the configured seed. With antithetic sampling whole pairs are
    /// distributed, so every chunk simulates an even number of paths.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `n_chunks` is zero
    /// - `UnsupportedStyle` for American exercise
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_core::market_data::MarketData;
    /// use pricer_models::instruments::{OptionContract, OptionType};
    /// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
    ///
    /// let engine = MonteCarloEngine::new(
    ///     MonteCarloConfig::builder().n_paths(8_000).n_steps(4).build().unwrap(),
    /// );
    /// let market = MarketData::new(100.0, 0.05, 0.2, 0.0).unwrap();
    /// let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
    ///
    /// let a = engine.price_parallel(&call, &market, 4).unwrap();
    /// let b = engine.price_parallel(&call, &market, 4).unwrap();
    /// assert_eq!(a.price.to_bits(), b.price.to_bits());
    /// assert_eq!(a.n_paths, 8_000);
    /// ```
    pub fn price_parallel(
        &self,
        contract: &OptionContract,
        market: &MarketData,
        n_chunks: usize,
    ) -> Result<PricingResult, PricingError> {
        if n_chunks == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "n_chunks",
                value: "must be at least 1".to_string(),
            }
            .into());
        }
        Self::check_european(contract)?;

        let config = self.config();
        let params = GbmParams::from_market(market, contract.expiry());
        let steps = self.steps_for(contract);
        let n_paths = config.effective_paths();
        let antithetic = config.antithetic();
        let arena = StreamArena::new(config.seed());
        tracing::debug!(
            product = contract.kind().name(),
            n_paths,
            n_steps = steps,
            n_chunks,
            "parallel monte carlo pricing"
        );

        // Antithetic chunks are sized in pairs.
        let per_unit = if antithetic { 2 } else { 1 };
        let chunks = split_units(n_paths / per_unit, n_chunks);

        let partials: Vec<RunningStats> = chunks
            .par_iter()
            .enumerate()
            .map(|(index, &units)| {
                let mut rng = arena.stream(index);
                accumulate_payoffs(&mut rng, &params, steps, units * per_unit, antithetic, contract)
            })
            .collect();
        let stats = partials
            .into_iter()
            .fold(RunningStats::new(), RunningStats::merge);

        Ok(PricingResult::from_stats(&stats, params.discount_factor(), n_paths))
    }
}
