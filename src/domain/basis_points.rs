//! Basis-point representation of the swap fee.

use core::fmt;

use super::Rounding;
use crate::error::{AmmError, Result};
use crate::math::div_round;

/// Denominator representing 100%.
pub const BPS_DENOMINATOR: u16 = 10_000;

/// A fee expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// Any `u16` can be wrapped, but a pool fee must stay strictly below
/// 100%: use [`BasisPoints::fee`] to construct a validated fee.
///
/// # Examples
///
/// ```
/// use hybrid_amm::domain::BasisPoints;
///
/// let fee = BasisPoints::fee(30).expect("valid fee");
/// // 30 bp of 100 leaves 99.7, rounded down
/// assert_eq!(fee.net_of(100), Ok(99));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u16);

impl BasisPoints {
    /// Zero basis points.
    pub const ZERO: Self = Self(0);

    /// The customary 0.30% swap fee.
    pub const THIRTY: Self = Self(30);

    /// Wraps a raw value without validation.
    pub const fn new(value: u16) -> Self {
        Self(value)
    }

    /// Creates a validated pool fee.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if `value >= 10_000`.
    pub const fn fee(value: u16) -> Result<Self> {
        if value >= BPS_DENOMINATOR {
            return Err(AmmError::InvalidFee(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying value.
    #[must_use]
    pub const fn get(&self) -> u16 {
        self.0
    }

    /// Returns `true` if this value is usable as a pool fee (`< 10_000`).
    #[must_use]
    pub const fn is_valid_fee(&self) -> bool {
        self.0 < BPS_DENOMINATOR
    }

    /// Computes `amount × self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the multiplication
    /// overflows `u128`.
    pub fn apply(&self, amount: u128, rounding: Rounding) -> Result<u128> {
        let product = amount
            .checked_mul(u128::from(self.0))
            .ok_or(AmmError::ArithmeticOverflow("basis points apply overflow"))?;
        div_round(product, u128::from(BPS_DENOMINATOR), rounding)
    }

    /// Returns the portion of `amount` left after deducting this fee:
    /// `amount × (10_000 − self) / 10_000`, rounded down.
    ///
    /// Rounding down the net input means the fee actually retained is
    /// rounded up, so truncation always favours the pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if the value is not a valid fee.
    /// - [`AmmError::ArithmeticOverflow`] if the multiplication overflows.
    pub fn net_of(&self, amount: u128) -> Result<u128> {
        let complement = BPS_DENOMINATOR
            .checked_sub(self.0)
            .ok_or(AmmError::InvalidFee(self.0))?;
        Self(complement).apply(amount, Rounding::Down)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
