//! Integer division with an explicit rounding direction.
//!
//! # Convention
//!
//! Rounding always goes against the caller:
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal amounts | [`Rounding::Down`] |
//! | Deposit amounts the caller pays | [`Rounding::Up`] |
//! | Net input after fee | [`Rounding::Down`] |
//!
//! # Examples
//!
//! ```
//! use hybrid_amm::domain::Rounding;
//! use hybrid_amm::math::{div_round, mul_div};
//!
//! assert_eq!(div_round(10, 3, Rounding::Down), Ok(3));
//! assert_eq!(div_round(10, 3, Rounding::Up), Ok(4));
//! assert_eq!(mul_div(1_000, 99, 1_099, Rounding::Down), Ok(90));
//! ```

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

/// Divides `numerator` by `denominator`, rounding as requested.
///
/// # Errors
///
/// Returns [`AmmError::DivisionByZero`] if `denominator` is zero.
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Result<u128> {
    if denominator == 0 {
        return Err(AmmError::DivisionByZero);
    }
    let quotient = numerator / denominator;
    match rounding {
        Rounding::Down => Ok(quotient),
        // quotient < u128::MAX whenever a remainder exists, so +1 is safe.
        Rounding::Up if numerator % denominator != 0 => Ok(quotient + 1),
        Rounding::Up => Ok(quotient),
    }
}

/// Computes `a × b / c` in `u128` with explicit rounding.
///
/// Inputs are typically `u64` reserves widened to `u128`, so the product of
/// two of them can never overflow; larger operands are still checked.
///
/// # Errors
///
/// - [`AmmError::ArithmeticOverflow`] if `a × b` exceeds `u128`.
/// - [`AmmError::DivisionByZero`] if `c` is zero.
pub fn mul_div(a: u128, b: u128, c: u128, rounding: Rounding) -> Result<u128> {
    let product = a
        .checked_mul(b)
        .ok_or(AmmError::ArithmeticOverflow("mul_div product"))?;
    div_round(product, c, rounding)
}
