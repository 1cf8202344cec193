//! Unified error types for the hybrid AMM engine.
//!
//! Every fallible operation in the crate returns [`AmmError`], so a caller
//! can surface the exact failure kind to the end user and decide whether to
//! resubmit with adjusted parameters.  Errors are terminal for the current
//! call: the engine never retries and never leaves partial state behind.

use thiserror::Error;

use crate::domain::Address;

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, AmmError>;

/// All failure kinds the engine can produce.
///
/// The `&'static str` payloads name the computation or check that failed;
/// they are diagnostic only and never part of the matching contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AmmError {
    /// An addition, multiplication or narrowing conversion exceeded the
    /// representable range, or a subtraction went below zero.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// A division was attempted with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,

    /// The fee is outside `0..10_000` basis points.
    #[error("invalid fee: {0} bps (must be below 10000)")]
    InvalidFee(u16),

    /// The two reserve mints are identical.
    #[error("mint x and mint y must be distinct")]
    InvalidMints,

    /// A pool config record already occupies the derived address.
    #[error("pool already exists at {0}")]
    PoolAlreadyExists(Address),

    /// No pool config record exists at the given address.
    #[error("no pool found at {0}")]
    PoolNotFound(Address),

    /// The pool's lock switch rejects liquidity-affecting operations.
    #[error("pool is locked")]
    PoolLocked,

    /// Reserves cannot satisfy the requested movement.
    #[error("insufficient liquidity: {0}")]
    InsufficientLiquidity(&'static str),

    /// The caller tried to burn more LP shares than they hold.
    #[error("insufficient LP shares: requested {requested}, held {held}")]
    InsufficientShares {
        /// Shares the caller asked to burn.
        requested: u64,
        /// Shares the caller actually holds.
        held: u64,
    },

    /// The quoted amounts violate a caller-supplied bound.
    #[error("slippage exceeded: {0}")]
    SlippageExceeded(&'static str),

    /// The caller is not permitted to perform a gated operation.
    #[error("caller is not authorized for this operation")]
    Unauthorized,

    /// A supplied vault, mint or LP mint does not match the pool.
    #[error("vault mismatch: {0}")]
    VaultMismatch(&'static str),

    /// A zero or otherwise unusable amount was supplied.
    #[error("invalid amount: {0}")]
    InvalidAmount(&'static str),

    /// The curve configuration is out of range or not compiled in.
    #[error("invalid curve configuration: {0}")]
    InvalidCurve(&'static str),

    /// The hybrid curve's iterative solver did not converge.
    #[error("newton-raphson did not converge: {0}")]
    NewtonRaphsonNonConvergence(&'static str),
}
