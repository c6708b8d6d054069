//! Settlement of a contract against an observed path.

use pricer_models::instruments::{AveragingType, BarrierSpec, OptionContract, ProductKind};

use super::PathObserver;

/// Whether the observed path touched the barrier.
///
/// Up barriers compare the running maximum, down barriers the minimum, so
/// every observed point (spot included) is monitored.
#[inline]
pub fn barrier_touched(barrier: &BarrierSpec, observer: &PathObserver) -> bool {
    if barrier.barrier_type().is_up() {
        barrier.is_knocked(observer.maximum())
    } else {
        barrier.is_knocked(observer.minimum())
    }
}

/// Undiscounted payoff of `contract` for the path seen by `observer`.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::{BarrierSpec, BarrierType, OptionContract, OptionType, ProductKind};
/// use pricer_pricing::path_dependent::{path_payoff, PathObserver};
///
/// let barrier = BarrierSpec::new(BarrierType::UpOut, 120.0, 1.5).unwrap();
/// let contract = OptionContract::european(OptionType::Call, 100.0, 1.0)
///     .unwrap()
///     .with_kind(ProductKind::barrier(barrier));
///
/// let mut observer = PathObserver::new();
/// observer.observe_path(&[100.0, 125.0, 110.0]);
/// assert_eq!(path_payoff(&contract, &observer), 1.5);
/// ```
pub fn path_payoff(contract: &OptionContract, observer: &PathObserver) -> f64 {
    match contract.kind() {
        ProductKind::Vanilla | ProductKind::Digital { .. } => contract.payoff(observer.terminal()),
        ProductKind::Asian { averaging, .. } => {
            let average = match averaging {
                AveragingType::Arithmetic => observer.arithmetic_average(),
                AveragingType::Geometric => observer.geometric_average(),
            };
            contract.payoff_from_average(average)
        }
        ProductKind::Barrier { barrier } => {
            let touched = barrier_touched(barrier, observer);
            barrier.settle(touched, contract.intrinsic(observer.terminal()))
        }
    }
}
