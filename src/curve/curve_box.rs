//! Enum dispatch over every compiled-in pricing regime.

use super::ConstantProduct;
#[cfg(feature = "hybrid")]
use super::StableSwap;

use crate::config::CurveConfig;
use crate::domain::Price;
use crate::error::Result;
use crate::traits::{FromConfig, SwapCurve};

/// The curve a pool runs, chosen once from its [`CurveConfig`].
///
/// Implements [`SwapCurve`] by delegating to the inner regime, so the
/// engine holds a plain value with no vtable.  The hybrid variant only
/// exists with the `hybrid` feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveBox {
    /// `x · y = k`.
    ConstantProduct(ConstantProduct),
    /// Amplified StableSwap invariant.
    #[cfg(feature = "hybrid")]
    StableSwap(StableSwap),
}

macro_rules! delegate {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            CurveBox::ConstantProduct(c) => c.$method($($arg),*),
            #[cfg(feature = "hybrid")]
            CurveBox::StableSwap(c) => c.$method($($arg),*),
        }
    };
}

impl SwapCurve for CurveBox {
    fn swap_output(&self, reserve_in: u64, reserve_out: u64, amount_in_net: u64) -> Result<u64> {
        delegate!(self, swap_output(reserve_in, reserve_out, amount_in_net))
    }

    fn spot_price(&self, reserve_base: u64, reserve_quote: u64) -> Result<Price> {
        delegate!(self, spot_price(reserve_base, reserve_quote))
    }

    fn name(&self) -> &'static str {
        delegate!(self, name())
    }
}

impl FromConfig<CurveConfig> for CurveBox {
    fn from_config(config: &CurveConfig) -> Result<Self> {
        config.validate()?;
        match config {
            CurveConfig::ConstantProduct => Ok(Self::ConstantProduct(ConstantProduct)),
            CurveConfig::Hybrid { .. } => hybrid_from_config(config),
        }
    }
}

#[cfg(feature = "hybrid")]
fn hybrid_from_config(config: &CurveConfig) -> Result<CurveBox> {
    StableSwap::from_config(config).map(CurveBox::StableSwap)
}

#[cfg(not(feature = "hybrid"))]
fn hybrid_from_config(_config: &CurveConfig) -> Result<CurveBox> {
    Err(crate::error::AmmError::InvalidCurve(
        "hybrid curve requires the `hybrid` feature",
    ))
}
