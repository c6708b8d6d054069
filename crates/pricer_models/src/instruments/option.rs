//! Option contract: parameters, direction, exercise style and product kind.

use super::error::InstrumentError;
use super::exercise::ExerciseStyle;
use super::params::ContractParams;
use super::payoff::OptionType;
use super::product::ProductKind;

/// Immutable option contract.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionContract, OptionType, ProductKind};
///
/// let call = OptionContract::european(OptionType::Call, 100.0, 1.0).unwrap();
/// assert_eq!(call.payoff(110.0), 10.0);
///
/// let digital = call.with_kind(ProductKind::digital(5.0).unwrap());
/// assert_eq!(digital.payoff(110.0), 5.0);
/// assert_eq!(digital.payoff(90.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionContract {
    params: ContractParams,
    option_type: OptionType,
    style: ExerciseStyle,
    kind: ProductKind,
}

impl OptionContract {
    /// Assembles a contract from validated parts.
    pub fn new(
        params: ContractParams,
        option_type: OptionType,
        style: ExerciseStyle,
        kind: ProductKind,
    ) -> Self {
        Self {
            params,
            option_type,
            style,
            kind,
        }
    }

    /// European vanilla option.
    pub fn european(option_type: OptionType, strike: f64, expiry: f64) -> Result<Self, InstrumentError> {
        Ok(Self::new(
            ContractParams::new(strike, expiry)?,
            option_type,
            ExerciseStyle::European,
            ProductKind::Vanilla,
        ))
    }

    /// American vanilla option.
    pub fn american(option_type: OptionType, strike: f64, expiry: f64) -> Result<Self, InstrumentError> {
        Ok(Self::new(
            ContractParams::new(strike, expiry)?,
            option_type,
            ExerciseStyle::American,
            ProductKind::Vanilla,
        ))
    }

    /// Contract parameters.
    #[inline]
    pub fn params(&self) -> &ContractParams {
        &self.params
    }

    /// Strike K.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.params.strike()
    }

    /// Time to expiry T in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.params.expiry()
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Exercise style.
    #[inline]
    pub fn style(&self) -> ExerciseStyle {
        self.style
    }

    /// Product kind.
    #[inline]
    pub fn kind(&self) -> &ProductKind {
        &self.kind
    }

    /// Intrinsic value max(S − K, 0) or max(K − S, 0).
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike())
    }

    /// Terminal payoff.
    ///
    /// Digital contracts pay the cash amount when strictly in the money;
    /// every other kind pays the vanilla intrinsic value on the terminal price.
    pub fn payoff(&self, spot: f64) -> f64 {
        match self.kind {
            ProductKind::Digital { payout } => {
                if self.option_type.is_in_the_money(spot, self.strike()) {
                    payout
                } else {
                    0.0
                }
            }
            _ => self.intrinsic(spot),
        }
    }

    /// Payoff on an averaged price, as settled by Asian contracts.
    #[inline]
    pub fn payoff_from_average(&self, average: f64) -> f64 {
        self.intrinsic(average)
    }

    /// Copy with a different expiry.
    pub fn with_expiry(&self, expiry: f64) -> Result<Self, InstrumentError> {
        Ok(Self {
            params: self.params.with_expiry(expiry)?,
            ..*self
        })
    }

    /// Copy with a different exercise style.
    pub fn with_style(&self, style: ExerciseStyle) -> Self {
        Self { style, ..*self }
    }

    /// Copy with a different product kind.
    pub fn with_kind(&self, kind: ProductKind) -> Self {
        Self { kind, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::{AveragingType, BarrierSpec, BarrierType};

    #[test]
    fn test_american_put() {
        let put = OptionContract::american(OptionType::Put, 100.0, 0.5).unwrap();
        assert!(put.style().allows_early_exercise());
        assert_eq!(put.intrinsic(80.0), 20.0);
        assert_eq!(put.payoff(120.0), 0.0);
    }

    #[test]
    fn test_payoff_from_average() {
        let call = OptionContract::european(OptionType::Call, 100.0, 1.0)
            .unwrap()
            .with_kind(ProductKind::asian(AveragingType::Arithmetic, 12).unwrap());
        assert_eq!(call.payoff_from_average(104.0), 4.0);
    }

    #[test]
    fn test_digital_put() {
        let put = OptionContract::european(OptionType::Put, 100.0, 1.0)
            .unwrap()
            .with_kind(ProductKind::digital(3.0).unwrap());
        assert_eq!(put.payoff(99.0), 3.0);
        assert_eq!(put.payoff(100.0), 0.0);
    }

    #[test]
    fn test_with_expiry_keeps_terms() {
        let barrier = BarrierSpec::new(BarrierType::DownOut, 90.0, 1.0).unwrap();
        let c = OptionContract::european(OptionType::Call, 100.0, 1.0)
            .unwrap()
            .with_kind(ProductKind::barrier(barrier));
        let shorter = c.with_expiry(0.75).unwrap();
        assert_eq!(shorter.expiry(), 0.75);
        assert_eq!(shorter.kind(), c.kind());
        assert_eq!(shorter.strike(), 100.0);
        assert!(c.with_expiry(0.0).is_err());
    }

    #[test]
    fn test_rejects_invalid_terms() {
        assert!(OptionContract::european(OptionType::Call, 0.0, 1.0).is_err());
        assert!(OptionContract::american(OptionType::Put, 100.0, -1.0).is_err());
    }
}
