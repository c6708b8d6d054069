//! Product kinds: what the contract pays, independent of exercise.
//!
//! Engines dispatch on [`ProductKind`] instead of querying runtime types.

use std::fmt;

use super::error::InstrumentError;

/// Averaging rule for Asian options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AveragingType {
    /// Arithmetic mean of the observed prices.
    Arithmetic,
    /// Geometric mean, exp of the mean log price.
    Geometric,
}

/// Barrier direction and knock behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierType {
    /// Activates once the price reaches the level from below.
    UpIn,
    /// Extinguishes once the price reaches the level from below.
    UpOut,
    /// Activates once the price reaches the level from above.
    DownIn,
    /// Extinguishes once the price reaches the level from above.
    DownOut,
}

impl BarrierType {
    /// True for up barriers.
    #[inline]
    pub fn is_up(&self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::UpOut)
    }

    /// True for knock-in barriers.
    #[inline]
    pub fn is_knock_in(&self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::DownIn)
    }
}

/// Barrier terms.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{BarrierSpec, BarrierType};
///
/// let spec = BarrierSpec::new(BarrierType::UpOut, 120.0, 0.0).unwrap();
/// assert!(spec.is_knocked(120.0));
/// assert!(!spec.is_knocked(119.9));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BarrierSpec {
    barrier_type: BarrierType,
    level: f64,
    rebate: f64,
}

impl BarrierSpec {
    /// Creates validated barrier terms.
    ///
    /// # Errors
    /// `InvalidBarrier` for a non-positive level, `InvalidParameter` for a
    /// negative or non-finite rebate.
    pub fn new(barrier_type: BarrierType, level: f64, rebate: f64) -> Result<Self, InstrumentError> {
        if !(level.is_finite() && level > 0.0) {
            return Err(InstrumentError::InvalidBarrier { level });
        }
        if !(rebate.is_finite() && rebate >= 0.0) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("rebate must be finite and non-negative, got {}", rebate),
            });
        }
        Ok(Self {
            barrier_type,
            level,
            rebate,
        })
    }

    /// Barrier type.
    #[inline]
    pub fn barrier_type(&self) -> BarrierType {
        self.barrier_type
    }

    /// Barrier level H.
    #[inline]
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Cash paid when the option is not alive at expiry.
    #[inline]
    pub fn rebate(&self) -> f64 {
        self.rebate
    }

    /// Whether `spot` touches the barrier: `S >= H` for up, `S <= H` for down.
    #[inline]
    pub fn is_knocked(&self, spot: f64) -> bool {
        if self.barrier_type.is_up() {
            spot >= self.level
        } else {
            spot <= self.level
        }
    }

    /// Settles the barrier given whether the path touched the level.
    ///
    /// Knock-in pays `vanilla` when touched and the rebate otherwise;
    /// knock-out is the reverse.
    #[inline]
    pub fn settle(&self, touched: bool, vanilla: f64) -> f64 {
        if touched == self.barrier_type.is_knock_in() {
            vanilla
        } else {
            self.rebate
        }
    }
}

/// Payoff family of a contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{AveragingType, ProductKind};
///
/// let asian = ProductKind::asian(AveragingType::Arithmetic, 12).unwrap();
/// assert_eq!(asian.name(), "Asian");
/// assert!(ProductKind::asian(AveragingType::Geometric, 0).is_err());
/// assert!(ProductKind::digital(-1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProductKind {
    /// Plain call or put.
    #[default]
    Vanilla,
    /// Payoff on the average price over `observations` equal steps.
    Asian {
        /// Averaging rule
        averaging: AveragingType,
        /// Number of monitoring steps
        observations: usize,
    },
    /// Path-dependent barrier with discrete monitoring.
    Barrier {
        /// Barrier terms
        barrier: BarrierSpec,
    },
    /// Cash-or-nothing digital.
    Digital {
        /// Cash paid when the option finishes in the money
        payout: f64,
    },
}

impl ProductKind {
    /// Asian terms with at least one observation.
    pub fn asian(averaging: AveragingType, observations: usize) -> Result<Self, InstrumentError> {
        if observations == 0 {
            return Err(InstrumentError::InvalidParameter {
                message: "Asian observations must be at least 1".to_string(),
            });
        }
        Ok(ProductKind::Asian {
            averaging,
            observations,
        })
    }

    /// Barrier product.
    #[inline]
    pub fn barrier(barrier: BarrierSpec) -> Self {
        ProductKind::Barrier { barrier }
    }

    /// Digital with a positive payout.
    pub fn digital(payout: f64) -> Result<Self, InstrumentError> {
        if !(payout.is_finite() && payout > 0.0) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("digital payout must be positive, got {}", payout),
            });
        }
        Ok(ProductKind::Digital { payout })
    }

    /// Short name used in error messages and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ProductKind::Vanilla => "Vanilla",
            ProductKind::Asian { .. } => "Asian",
            ProductKind::Barrier { .. } => "Barrier",
            ProductKind::Digital { .. } => "Digital",
        }
    }

    /// True if the payoff depends only on the terminal price.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProductKind::Vanilla | ProductKind::Digital { .. })
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
