//! The pricing seam every swap regime implements.
//!
//! [`SwapCurve`] is deliberately narrow: it maps a fee-adjusted input to an
//! output and reports a marginal price.  Fee deduction, zero-output and
//! drain checks, and all state mutation live above it, so a curve can never
//! move value on its own.
//!
//! # Fee Deduction Invariant
//!
//! Callers deduct the fee before invoking the curve:
//!
//! ```text
//! amount_in_net = amount_in × (10_000 − fee_bps) / 10_000   (rounded down)
//! amount_out    = curve.swap_output(reserve_in, reserve_out, amount_in_net)
//! ```
//!
//! # Dispatch Model
//!
//! Curves are dispatched through the `CurveBox` enum rather than trait
//! objects; see the `curve` module.

use crate::domain::Price;
use crate::error::Result;

/// A two-asset swap pricing function.
///
/// # Contract
///
/// - `swap_output` rounds in the pool's favour and never returns a value
///   that would break the curve's invariant.
/// - Implementations are pure: identical inputs give identical outputs.
///
/// # Implementors
///
/// - `ConstantProduct`: `x · y = k`
/// - `StableSwap`: amplified two-asset invariant (`hybrid` feature)
pub trait SwapCurve {
    /// Output paid from `reserve_out` for `amount_in_net` added to
    /// `reserve_in`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    ///   if either reserve is empty.
    /// - [`AmmError::ArithmeticOverflow`](crate::error::AmmError::ArithmeticOverflow)
    ///   on overflow in intermediates.
    /// - Curve-specific solver failures.
    fn swap_output(&self, reserve_in: u64, reserve_out: u64, amount_in_net: u64) -> Result<u64>;

    /// Marginal price of the base asset in units of the quote asset.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`](crate::error::AmmError::InsufficientLiquidity)
    /// if either reserve is empty.
    fn spot_price(&self, reserve_base: u64, reserve_quote: u64) -> Result<Price>;

    /// Short regime name for logs.
    fn name(&self) -> &'static str;
}
