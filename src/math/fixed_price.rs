//! Deterministic spot price in `I80F48` fixed point.
//!
//! Only compiled with the `fixed-point` feature.  Unlike
//! [`Price`](crate::domain::Price) the result is bit-for-bit reproducible
//! across platforms.

use fixed::types::I80F48;

use crate::error::{AmmError, Result};

/// Computes `quote_reserve / base_reserve` as an [`I80F48`].
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if `base_reserve` is zero.
/// - [`AmmError::ArithmeticOverflow`] if the quotient does not fit.
///
/// # Examples
///
/// ```
/// use fixed::types::I80F48;
/// use hybrid_amm::math::fixed_spot_price;
///
/// let p = fixed_spot_price(3_000, 1_000).expect("non-empty base");
/// assert_eq!(p, I80F48::from_num(3));
/// ```
pub fn fixed_spot_price(quote_reserve: u64, base_reserve: u64) -> Result<I80F48> {
    if base_reserve == 0 {
        return Err(AmmError::InsufficientLiquidity("empty base reserve"));
    }
    let quote = I80F48::checked_from_num(quote_reserve)
        .ok_or(AmmError::ArithmeticOverflow("fixed quote reserve"))?;
    let base = I80F48::checked_from_num(base_reserve)
        .ok_or(AmmError::ArithmeticOverflow("fixed base reserve"))?;
    quote
        .checked_div(base)
        .ok_or(AmmError::ArithmeticOverflow("fixed price quotient"))
}
