//! Swap quoting: fee deduction plus the curve, with the pool-side checks.

use tracing::debug;

use crate::domain::{BasisPoints, SwapQuote};
use crate::error::{AmmError, Result};
use crate::math::{to_u64, CheckedArithmetic};
use crate::traits::SwapCurve;

use super::ConstantProduct;

/// Prices a swap of `amount_in` against `curve`.
///
/// The fee is deducted from the input first (rounded so the pool keeps the
/// remainder); the curve sees only the net amount.  The whole gross input
/// lands in the input reserve, so the fee accrues to LP holders.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `amount_in` is zero.
/// - [`AmmError::InsufficientLiquidity`] if a reserve is empty, the output
///   rounds to zero, or the output would empty `reserve_out`.
/// - [`AmmError::ArithmeticOverflow`] if `reserve_in + amount_in` does not
///   fit in `u64`, or on overflow inside the curve.
pub fn quote_swap<C: SwapCurve>(
    curve: &C,
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    fee: BasisPoints,
) -> Result<SwapQuote> {
    if amount_in == 0 {
        return Err(AmmError::InvalidAmount("swap amount must be non-zero"));
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::InsufficientLiquidity("pool has no reserves"));
    }
    reserve_in.safe_add(amount_in)?;

    let amount_in_net = to_u64(fee.net_of(u128::from(amount_in))?)?;
    let fee_amount = amount_in.safe_sub(amount_in_net)?;
    let amount_out = curve.swap_output(reserve_in, reserve_out, amount_in_net)?;

    if amount_out == 0 {
        return Err(AmmError::InsufficientLiquidity("output rounds to zero"));
    }
    if amount_out >= reserve_out {
        return Err(AmmError::InsufficientLiquidity("output would drain reserve"));
    }

    let quote = SwapQuote {
        amount_in,
        amount_in_net,
        fee: fee_amount,
        amount_out,
    };
    debug!(curve = curve.name(), reserve_in, reserve_out, %quote, "swap quoted");
    Ok(quote)
}

/// Constant-product output for `amount_in` with a raw basis-point fee.
///
/// # Examples
///
/// ```
/// use hybrid_amm::curve::quote_swap_output;
///
/// assert_eq!(quote_swap_output(1_000, 1_000, 100, 30), Ok(90));
/// ```
///
/// # Errors
///
/// [`AmmError::InvalidFee`] for `fee_bps >= 10_000`, otherwise as
/// [`quote_swap`].
pub fn quote_swap_output(
    reserve_in: u64,
    reserve_out: u64,
    amount_in: u64,
    fee_bps: u16,
) -> Result<u64> {
    let fee = BasisPoints::fee(fee_bps)?;
    quote_swap(&ConstantProduct, reserve_in, reserve_out, amount_in, fee).map(|q| q.amount_out)
}
