//! Pricing-regime selection for a pool.

use crate::error::{AmmError, Result};

/// Smallest accepted amplification coefficient.
pub const MIN_AMPLIFICATION: u32 = 1;

/// Largest accepted amplification coefficient.
pub const MAX_AMPLIFICATION: u32 = 10_000;

/// The swap pricing regime a pool runs under, fixed at initialization.
///
/// # Amplification
///
/// For [`Hybrid`](CurveConfig::Hybrid) the amplification `A` is the blend
/// weight between the two limiting curves:
///
/// | A | Behaviour |
/// |---|-----------|
/// | 1 | Close to constant product |
/// | 50–5 000 | Low slippage near the 1:1 peg |
/// | → ∞ | Constant sum |
///
/// The hybrid solver works on 256-bit intermediates, so every amplification
/// in range accepts any pair of `u64` reserves without overflow.
///
/// # Examples
///
/// ```
/// use hybrid_amm::config::CurveConfig;
///
/// assert!(CurveConfig::hybrid(100).is_ok());
/// assert!(CurveConfig::hybrid(0).is_err());
/// assert!(CurveConfig::default().is_constant_product());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveConfig {
    /// `x · y = k`.
    #[default]
    ConstantProduct,
    /// Two-asset StableSwap invariant with amplification `A`.
    Hybrid {
        /// Amplification coefficient, `1..=10_000`.
        amplification: u32,
    },
}

impl CurveConfig {
    /// Creates a validated hybrid regime.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidCurve`] if `amplification` is outside
    /// `1..=10_000`.
    pub fn hybrid(amplification: u32) -> Result<Self> {
        let config = Self::Hybrid { amplification };
        config.validate()?;
        Ok(config)
    }

    /// Validates the regime parameters.
    ///
    /// Feature availability is checked later, when the curve is built.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidCurve`] if the amplification is out of
    /// range.
    pub const fn validate(&self) -> Result<()> {
        match self {
            Self::ConstantProduct => Ok(()),
            Self::Hybrid { amplification } => {
                if *amplification < MIN_AMPLIFICATION {
                    return Err(AmmError::InvalidCurve("amplification must be at least 1"));
                }
                if *amplification > MAX_AMPLIFICATION {
                    return Err(AmmError::InvalidCurve(
                        "amplification must not exceed 10000",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Returns `true` for the constant-product regime.
    #[must_use]
    pub const fn is_constant_product(&self) -> bool {
        matches!(self, Self::ConstantProduct)
    }

    /// Returns `true` for the hybrid regime.
    #[must_use]
    pub const fn is_hybrid(&self) -> bool {
        matches!(self, Self::Hybrid { .. })
    }

    /// Short regime name used in log fields.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ConstantProduct => "constant_product",
            Self::Hybrid { .. } => "hybrid",
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn amplification_bounds() {
        assert!(CurveConfig::hybrid(MIN_AMPLIFICATION).is_ok());
        assert!(CurveConfig::hybrid(MAX_AMPLIFICATION).is_ok());
        assert!(matches!(
            CurveConfig::hybrid(0),
            Err(AmmError::InvalidCurve(_))
        ));
        assert!(matches!(
            CurveConfig::hybrid(MAX_AMPLIFICATION + 1),
            Err(AmmError::InvalidCurve(_))
        ));
    }

    #[test]
    fn unvalidated_variant_caught_by_validate() {
        let raw = CurveConfig::Hybrid { amplification: 0 };
        assert!(raw.validate().is_err());
    }

    #[test]
    fn predicates_and_names() {
        let Ok(h) = CurveConfig::hybrid(85) else {
            panic!("expected valid curve");
        };
        assert!(h.is_hybrid());
        assert!(!h.is_constant_product());
        assert_eq!(h.name(), "hybrid");
        assert_eq!(CurveConfig::ConstantProduct.name(), "constant_product");
    }
}
