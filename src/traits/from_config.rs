//! Construction of a component from its validated configuration.
//!
//! [`FromConfig`] gives every configurable component one uniform
//! constructor, so the engine can build curves without knowing which
//! concrete regime a [`CurveConfig`](crate::config::CurveConfig) selects.
//!
//! # Validation Contract
//!
//! Implementations must validate the configuration during construction.
//! A successfully built value is ready to use.
//!
//! ```text
//! CurveConfig::ConstantProduct     => CurveBox::ConstantProduct(..)
//! CurveConfig::Hybrid { amp }      => CurveBox::StableSwap(StableSwap::from_config(..)?)
//! ```
//!
//! There is no blanket implementation: each pairing is written out.

use crate::error::Result;

/// Builds `Self` from a configuration of type `C`.
///
/// # Errors
///
/// Returns the configuration's validation error, or
/// [`AmmError::InvalidCurve`](crate::error::AmmError::InvalidCurve) when
/// the configured regime is not compiled in.
pub trait FromConfig<C>: Sized {
    /// Constructs a new instance from `config`.
    ///
    /// # Errors
    ///
    /// See the trait-level documentation.
    fn from_config(config: &C) -> Result<Self>;
}
