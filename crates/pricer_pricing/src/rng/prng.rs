//! Seeded pseudo-random stream used by every simulation engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

/// Seeded, reproducible random stream.
///
/// Wraps `StdRng` together with the seed it was initialised from, so a
/// stream can always be rewound to its starting point with
/// [`PricerRng::set_seed`]. The same seed and the same sequence of calls
/// yield the same numbers.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(42);
///
/// let u = rng.gen_uniform();
/// assert!((0.0..1.0).contains(&u));
///
/// let mut buffer = vec![0.0; 100];
/// rng.fill_normal(&mut buffer);
/// ```
#[derive(Clone, Debug)]
pub struct PricerRng {
    inner: StdRng,
    seed: u64,
}

impl PricerRng {
    /// Creates a stream initialised with `seed`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng1 = PricerRng::from_seed(12345);
    /// let mut rng2 = PricerRng::from_seed(12345);
    /// assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    /// ```
    #[inline]
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed used for initialisation.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reinitialises the stream from `seed`, discarding its current position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng = PricerRng::from_seed(7);
    /// let first = rng.gen_uniform();
    /// rng.set_seed(7);
    /// assert_eq!(rng.gen_uniform(), first);
    /// ```
    #[inline]
    pub fn set_seed(&mut self, seed: u64) {
        self.inner = StdRng::seed_from_u64(seed);
        self.seed = seed;
    }

    /// Uniform variate in [0, 1).
    #[inline]
    pub fn gen_uniform(&mut self) -> f64 {
        self.inner.gen()
    }

    /// Standard normal variate (Ziggurat via `rand_distr::StandardNormal`).
    #[inline]
    pub fn gen_normal(&mut self) -> f64 {
        StandardNormal.sample(&mut self.inner)
    }

    /// Pair of standard normals with correlation `rho`.
    ///
    /// Returns `(z1, rho * z1 + sqrt(1 - rho²) * z2)` for independent
    /// `z1`, `z2`. `rho` is expected in [-1, 1]; values outside are clamped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_pricing::rng::PricerRng;
    ///
    /// let mut rng = PricerRng::from_seed(1);
    /// let (z1, z2) = rng.correlated_normals(1.0);
    /// assert_eq!(z1, z2);
    /// ```
    #[inline]
    pub fn correlated_normals(&mut self, rho: f64) -> (f64, f64) {
        let rho = rho.clamp(-1.0, 1.0);
        let z1 = self.gen_normal();
        let z2 = self.gen_normal();
        (z1, rho * z1 + (1.0 - rho * rho).sqrt() * z2)
    }

    /// Fills `buffer` with uniform variates. Empty buffers are a no-op.
    #[inline]
    pub fn fill_uniform(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.inner.gen();
        }
    }

    /// Fills `buffer` with standard normal variates without allocating.
    #[inline]
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = StandardNormal.sample(&mut self.inner);
        }
    }
}
