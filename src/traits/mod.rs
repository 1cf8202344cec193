//! Seams between the engine and its pluggable parts.
//!
//! - [`SwapCurve`]: swap pricing and marginal price for one regime.
//! - [`FromConfig`]: uniform construction from a validated config.

mod from_config;
mod swap_curve;

pub use from_config::FromConfig;
pub use swap_curve::SwapCurve;
