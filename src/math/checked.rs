//! Fallible arithmetic on the engine's raw integer magnitudes.
//!
//! The [`CheckedArithmetic`] trait gives `u64` and `u128` a uniform set of
//! operations that return [`Result`] instead of wrapping or panicking.
//! Subtraction below zero is reported as
//! [`AmmError::ArithmeticOverflow`] just like overflow past the top.
//!
//! # Examples
//!
//! ```
//! use hybrid_amm::domain::Rounding;
//! use hybrid_amm::math::CheckedArithmetic;
//!
//! let reserve: u64 = 1_000;
//! assert_eq!(reserve.safe_add(24), Ok(1_024));
//! assert!(reserve.safe_sub(1_001).is_err());
//! assert_eq!(reserve.safe_div(3, Rounding::Up), Ok(334));
//! ```

use crate::domain::Rounding;
use crate::error::{AmmError, Result};

use super::div_round;

/// Fallible arithmetic for unsigned magnitudes.
///
/// # Contract
///
/// - No panics: every error condition produces `Err`.
/// - No saturation: errors propagate instead.
pub trait CheckedArithmetic: Sized + Copy {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past the type's maximum.
    fn safe_add(self, other: Self) -> Result<Self>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result would be
    /// negative.
    fn safe_sub(self, other: Self) -> Result<Self>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past the type's maximum.
    fn safe_mul(self, other: Self) -> Result<Self>;

    /// Checked division with explicit [`Rounding`].
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(self, other: Self, rounding: Rounding) -> Result<Self>;
}

impl CheckedArithmetic for u64 {
    #[inline]
    fn safe_add(self, other: Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("u64 addition"))
    }

    #[inline]
    fn safe_sub(self, other: Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticOverflow("u64 subtraction underflow"))
    }

    #[inline]
    fn safe_mul(self, other: Self) -> Result<Self> {
        self.checked_mul(other)
            .ok_or(AmmError::ArithmeticOverflow("u64 multiplication"))
    }

    #[inline]
    fn safe_div(self, other: Self, rounding: Rounding) -> Result<Self> {
        // The quotient of two u64 values always fits back into u64.
        div_round(u128::from(self), u128::from(other), rounding).and_then(to_u64)
    }
}

impl CheckedArithmetic for u128 {
    #[inline]
    fn safe_add(self, other: Self) -> Result<Self> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("u128 addition"))
    }

    #[inline]
    fn safe_sub(self, other: Self) -> Result<Self> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticOverflow("u128 subtraction underflow"))
    }

    #[inline]
    fn safe_mul(self, other: Self) -> Result<Self> {
        self.checked_mul(other)
            .ok_or(AmmError::ArithmeticOverflow("u128 multiplication"))
    }

    #[inline]
    fn safe_div(self, other: Self, rounding: Rounding) -> Result<Self> {
        div_round(self, other, rounding)
    }
}

/// Narrows a `u128` intermediate back to the `u64` boundary type.
///
/// # Errors
///
/// Returns [`AmmError::ArithmeticOverflow`] if `value > u64::MAX`.
pub fn to_u64(value: u128) -> Result<u64> {
    u64::try_from(value).map_err(|_| AmmError::ArithmeticOverflow("narrowing to u64"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    mod narrow {
        use super::*;

        #[test]
        fn add_overflow() {
            let Err(AmmError::ArithmeticOverflow(_)) = u64::MAX.safe_add(1) else {
                panic!("expected ArithmeticOverflow");
            };
        }

        #[test]
        fn sub_underflow_is_overflow_kind() {
            let Err(AmmError::ArithmeticOverflow(_)) = 1u64.safe_sub(2) else {
                panic!("expected ArithmeticOverflow");
            };
        }

        #[test]
        fn sub_to_zero() {
            assert_eq!(42u64.safe_sub(42), Ok(0));
        }

        #[test]
        fn mul_overflow() {
            assert!(u64::MAX.safe_mul(2).is_err());
            assert_eq!(0u64.safe_mul(u64::MAX), Ok(0));
        }

        #[test]
        fn div_rounding() {
            assert_eq!(10u64.safe_div(3, Rounding::Down), Ok(3));
            assert_eq!(10u64.safe_div(3, Rounding::Up), Ok(4));
            assert_eq!(10u64.safe_div(0, Rounding::Up), Err(AmmError::DivisionByZero));
        }

        #[test]
        fn chaining() {
            // (100 + 200) * 3 - 100 = 800
            let result = 100u64
                .safe_add(200)
                .and_then(|v| v.safe_mul(3))
                .and_then(|v| v.safe_sub(100));
            assert_eq!(result, Ok(800));
        }
    }

    mod wide {
        use super::*;

        #[test]
        fn add_overflow() {
            assert!(u128::MAX.safe_add(1).is_err());
        }

        #[test]
        fn sub_underflow() {
            assert!(0u128.safe_sub(1).is_err());
        }

        #[test]
        fn u64_product_fits() {
            let max = u128::from(u64::MAX);
            let Ok(product) = max.safe_mul(max) else {
                panic!("u64 x u64 must fit in u128");
            };
            assert_eq!(product, max * max);
        }

        #[test]
        fn div_by_zero() {
            assert_eq!(5u128.safe_div(0, Rounding::Down), Err(AmmError::DivisionByZero));
        }
    }

    #[test]
    fn to_u64_bounds() {
        assert_eq!(to_u64(u128::from(u64::MAX)), Ok(u64::MAX));
        let Err(AmmError::ArithmeticOverflow(_)) = to_u64(u128::from(u64::MAX) + 1) else {
            panic!("expected ArithmeticOverflow");
        };
    }
}
