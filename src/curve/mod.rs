//! Swap pricing regimes and the liquidity math that sits beside them.
//!
//! # Regimes
//!
//! | Feature | Curve | Style |
//! |---------|-------|-------|
//! | always | [`ConstantProduct`] | Uniswap V2 |
//! | `hybrid` | [`StableSwap`] | Curve StableSwap |
//!
//! [`CurveBox`] dispatches across whichever regimes are compiled in.
//! [`quote_swap`] layers fee deduction and the pool-side output checks on
//! top of any [`SwapCurve`](crate::traits::SwapCurve); the `quote_deposit`
//! family prices liquidity changes in the current reserve ratio.

mod constant_product;
mod curve_box;
mod liquidity;
mod quote;
#[cfg(feature = "hybrid")]
mod stable_swap;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::ConstantProduct;
pub use curve_box::CurveBox;
pub use liquidity::{quote_bootstrap, quote_deposit, quote_lp_for_deposit, quote_withdraw};
pub use quote::{quote_swap, quote_swap_output};
#[cfg(feature = "hybrid")]
pub use stable_swap::StableSwap;
