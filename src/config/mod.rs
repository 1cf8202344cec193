//! Declarative, validated configuration records.
//!
//! [`CurveConfig`] selects the pricing regime and [`InitializeParams`]
//! carries everything `initialize` needs.  Both validate on construction
//! and expose `validate()` for values built some other way.

mod curve_config;
mod initialize_params;

pub use curve_config::{CurveConfig, MAX_AMPLIFICATION, MIN_AMPLIFICATION};
pub use initialize_params::InitializeParams;
