//! Overflow-checked integer arithmetic used by every other component.
//!
//! All value-moving math runs on `u64` boundary amounts widened to `u128`
//! for intermediates.  Every operation either returns an exact, explicitly
//! rounded result or an [`AmmError`](crate::error::AmmError); nothing wraps.
//!
//! # Feature-gated helpers
//!
//! | Feature | Item | Use case |
//! |---------|------|----------|
//! | `fixed-point` | `fixed_spot_price` | Deterministic `I80F48` price reads |

mod checked;
mod rounding;
mod sqrt;

#[cfg(feature = "fixed-point")]
mod fixed_price;

pub use checked::{to_u64, CheckedArithmetic};
pub use rounding::{div_round, mul_div};
pub use sqrt::isqrt;

#[cfg(feature = "fixed-point")]
pub use fixed_price::fixed_spot_price;
