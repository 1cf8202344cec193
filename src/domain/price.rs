//! Spot exchange rate reported by read-only queries.

use core::fmt;

use crate::error::{AmmError, Result};

/// Units of the quote asset per unit of the base asset.
///
/// Read-only: no value-moving path consumes a `Price`.  Deterministic
/// fixed-point prices are available behind the `fixed-point` feature (see
/// `math::fixed_spot_price`).
///
/// # Examples
///
/// ```
/// use hybrid_amm::domain::Price;
///
/// let p = Price::from_reserves(2_000, 1_000).expect("non-empty reserves");
/// assert!((p.get() - 2.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Creates a `Price` from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the value is negative,
    /// NaN, or infinite.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(AmmError::ArithmeticOverflow(
                "price must be finite and non-negative",
            ));
        }
        Ok(Self(value))
    }

    /// Computes `quote_reserve / base_reserve`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if `base_reserve` is zero.
    pub fn from_reserves(quote_reserve: u64, base_reserve: u64) -> Result<Self> {
        if base_reserve == 0 {
            return Err(AmmError::InsufficientLiquidity("empty base reserve"));
        }
        #[allow(clippy::cast_precision_loss)]
        let ratio = quote_reserve as f64 / base_reserve as f64;
        Self::new(ratio)
    }

    /// Returns the underlying `f64` value.
    #[must_use]
    pub const fn get(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
