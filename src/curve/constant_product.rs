//! Constant-product pricing (`x · y = k`).
//!
//! # Swap Formula
//!
//! ```text
//! amount_out = reserve_out · amount_in_net / (reserve_in + amount_in_net)
//! ```
//!
//! rounded down, which is the largest integer output for which
//! `(reserve_in + amount_in_net) · (reserve_out − amount_out)` stays at or
//! above `reserve_in · reserve_out`.

use crate::domain::{Price, Rounding};
use crate::error::{AmmError, Result};
use crate::math::{mul_div, to_u64};
use crate::traits::SwapCurve;

/// The constant-product regime.  Stateless.
///
/// # Examples
///
/// ```
/// use hybrid_amm::curve::ConstantProduct;
/// use hybrid_amm::traits::SwapCurve;
///
/// // 99 net in against (1000, 1000) pays out 90
/// assert_eq!(ConstantProduct.swap_output(1_000, 1_000, 99), Ok(90));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConstantProduct;

impl SwapCurve for ConstantProduct {
    fn swap_output(&self, reserve_in: u64, reserve_out: u64, amount_in_net: u64) -> Result<u64> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::InsufficientLiquidity("empty reserve"));
        }
        let rin = u128::from(reserve_in);
        let rout = u128::from(reserve_out);
        let net = u128::from(amount_in_net);
        // Two u64 values always sum within u128.
        let out = mul_div(rout, net, rin + net, Rounding::for_outflow())?;
        to_u64(out)
    }

    fn spot_price(&self, reserve_base: u64, reserve_quote: u64) -> Result<Price> {
        if reserve_quote == 0 {
            return Err(AmmError::InsufficientLiquidity("empty quote reserve"));
        }
        Price::from_reserves(reserve_quote, reserve_base)
    }

    fn name(&self) -> &'static str {
        "constant_product"
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn reference_swap() {
        assert_eq!(ConstantProduct.swap_output(1_000, 1_000, 99), Ok(90));
    }

    #[test]
    fn invariant_holds_after_output() {
        let (rin, rout, net) = (1_000_000u64, 2_000_000u64, 12_345u64);
        let Ok(out) = ConstantProduct.swap_output(rin, rout, net) else {
            panic!("expected Ok");
        };
        let k_before = u128::from(rin) * u128::from(rout);
        let k_after = u128::from(rin + net) * u128::from(rout - out);
        assert!(k_after >= k_before);
        // One more unit would break it.
        let k_greedy = u128::from(rin + net) * u128::from(rout - out - 1);
        assert!(k_greedy < k_before);
    }

    #[test]
    fn zero_net_yields_zero() {
        assert_eq!(ConstantProduct.swap_output(1_000, 1_000, 0), Ok(0));
    }

    #[test]
    fn output_never_reaches_reserve() {
        let Ok(out) = ConstantProduct.swap_output(1, 1_000, u64::MAX) else {
            panic!("expected Ok");
        };
        assert!(out < 1_000);
    }

    #[test]
    fn empty_reserves_rejected() {
        assert!(matches!(
            ConstantProduct.swap_output(0, 1_000, 10),
            Err(AmmError::InsufficientLiquidity(_))
        ));
        assert!(matches!(
            ConstantProduct.swap_output(1_000, 0, 10),
            Err(AmmError::InsufficientLiquidity(_))
        ));
    }

    #[test]
    fn spot_price_is_reserve_ratio() {
        let Ok(p) = ConstantProduct.spot_price(1_000, 4_000) else {
            panic!("expected Ok");
        };
        assert!((p.get() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn spot_price_empty() {
        assert!(ConstantProduct.spot_price(0, 10).is_err());
        assert!(ConstantProduct.spot_price(10, 0).is_err());
    }
}
