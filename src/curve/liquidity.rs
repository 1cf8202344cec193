//! Proportional deposit and withdrawal math for LP shares.
//!
//! Deposits round the amounts the caller pays up and the shares minted
//! down; withdrawals round the amounts paid out down.  Either way the
//! remainder stays with the pool, so existing holders are never diluted.
//!
//! These functions are regime-independent: liquidity is always added and
//! removed in the current reserve ratio, whatever curve prices swaps.

use crate::domain::Rounding;
use crate::error::{AmmError, Result};
use crate::math::{isqrt, mul_div, to_u64, CheckedArithmetic};

/// Amounts required to mint exactly `desired_lp` shares into a funded pool.
///
/// `amount = ceil(reserve × desired_lp / lp_supply)` on each side.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `desired_lp` is zero.
/// - [`AmmError::InsufficientLiquidity`] if the pool has no LP supply
///   (use [`quote_bootstrap`] instead).
/// - [`AmmError::ArithmeticOverflow`] if an amount does not fit in `u64`.
///
/// # Examples
///
/// ```
/// use hybrid_amm::curve::quote_deposit;
///
/// // 10% of a (1000, 3001) pool, rounded up on both sides
/// assert_eq!(quote_deposit(1_000, 3_001, 1_000, 100), Ok((100, 301)));
/// ```
pub fn quote_deposit(
    reserve_x: u64,
    reserve_y: u64,
    lp_supply: u64,
    desired_lp: u64,
) -> Result<(u64, u64)> {
    if desired_lp == 0 {
        return Err(AmmError::InvalidAmount("desired LP must be non-zero"));
    }
    if lp_supply == 0 {
        return Err(AmmError::InsufficientLiquidity("pool has no LP supply"));
    }
    let share = |reserve: u64| -> Result<u64> {
        to_u64(mul_div(
            u128::from(reserve),
            u128::from(desired_lp),
            u128::from(lp_supply),
            Rounding::for_inflow(),
        )?)
    };
    Ok((share(reserve_x)?, share(reserve_y)?))
}

/// Shares minted for depositing `amount_x` and `amount_y`.
///
/// Into an empty pool this is the bootstrap rule.  Otherwise the smaller of
/// the two proportional claims, rounded down, so any excess on one side is
/// donated to the pool rather than credited.
///
/// # Errors
///
/// As [`quote_bootstrap`] for an empty pool; otherwise
/// [`AmmError::InsufficientLiquidity`] if a reserve is empty and
/// [`AmmError::ArithmeticOverflow`] on overflow.
pub fn quote_lp_for_deposit(
    reserve_x: u64,
    reserve_y: u64,
    lp_supply: u64,
    amount_x: u64,
    amount_y: u64,
) -> Result<u64> {
    if lp_supply == 0 {
        return quote_bootstrap(amount_x, amount_y);
    }
    if reserve_x == 0 || reserve_y == 0 {
        return Err(AmmError::InsufficientLiquidity("empty reserve"));
    }
    let claim = |amount: u64, reserve: u64| -> Result<u128> {
        mul_div(
            u128::from(amount),
            u128::from(lp_supply),
            u128::from(reserve),
            Rounding::for_outflow(),
        )
    };
    to_u64(claim(amount_x, reserve_x)?.min(claim(amount_y, reserve_y)?))
}

/// Shares minted by the first deposit: `floor(sqrt(amount_x × amount_y))`.
///
/// The first depositor sets the initial price through the ratio of the two
/// amounts.
///
/// # Errors
///
/// Returns [`AmmError::InvalidAmount`] if either amount is zero, which
/// would mint no shares.
///
/// # Examples
///
/// ```
/// use hybrid_amm::curve::quote_bootstrap;
///
/// assert_eq!(quote_bootstrap(1_000, 1_000), Ok(1_000));
/// assert_eq!(quote_bootstrap(1_000, 4_000), Ok(2_000));
/// ```
pub fn quote_bootstrap(amount_x: u64, amount_y: u64) -> Result<u64> {
    if amount_x == 0 || amount_y == 0 {
        return Err(AmmError::InvalidAmount(
            "bootstrap deposit needs both assets",
        ));
    }
    // The square root of a u64 × u64 product always fits in u64.
    let product = u128::from(amount_x).safe_mul(u128::from(amount_y))?;
    to_u64(isqrt(product))
}

/// Amounts paid out for burning `burn_lp` shares.
///
/// `amount = floor(reserve × burn_lp / lp_supply)` on each side.  Burning
/// the entire supply returns the entire reserves.
///
/// # Errors
///
/// - [`AmmError::InvalidAmount`] if `burn_lp` is zero.
/// - [`AmmError::InsufficientLiquidity`] if `burn_lp` exceeds the supply.
///
/// # Examples
///
/// ```
/// use hybrid_amm::curve::quote_withdraw;
///
/// assert_eq!(quote_withdraw(1_000, 3_001, 1_000, 100), Ok((100, 300)));
/// ```
pub fn quote_withdraw(
    reserve_x: u64,
    reserve_y: u64,
    lp_supply: u64,
    burn_lp: u64,
) -> Result<(u64, u64)> {
    if burn_lp == 0 {
        return Err(AmmError::InvalidAmount("burn amount must be non-zero"));
    }
    if burn_lp > lp_supply {
        return Err(AmmError::InsufficientLiquidity("burn exceeds LP supply"));
    }
    let share = |reserve: u64| -> Result<u64> {
        to_u64(mul_div(
            u128::from(reserve),
            u128::from(burn_lp),
            u128::from(lp_supply),
            Rounding::for_outflow(),
        )?)
    };
    Ok((share(reserve_x)?, share(reserve_y)?))
}
