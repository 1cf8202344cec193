//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hybrid_amm::prelude::*;
//! ```

pub use crate::domain::{
    Address, BasisPoints, DepositQuote, DepositRequest, MintPair, Price, Rounding, Side,
    SwapDirection, SwapQuote, SwapRequest, WithdrawQuote, WithdrawRequest,
};

pub use crate::traits::{FromConfig, SwapCurve};

pub use crate::math::CheckedArithmetic;

pub use crate::config::{CurveConfig, InitializeParams};

pub use crate::curve::CurveBox;

pub use crate::derivation::PoolKeys;

pub use crate::engine::AmmEngine;

pub use crate::pool::{Pool, PoolConfig, Transition};

pub use crate::error::{AmmError, Result};
