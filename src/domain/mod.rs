//! Value types shared by every layer of the engine.
//!
//! Addresses, basis-point fees, the ordered mint pair, explicit rounding
//! direction, caller requests and the quotes returned for them.  Types with
//! invariants expose validated constructors so an invalid value cannot be
//! built in the first place.

mod address;
mod basis_points;
mod mint_pair;
mod price;
mod quote;
mod request;
mod rounding;

pub use address::{Address, ParseAddressError};
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use mint_pair::{MintPair, Side};
pub use price::Price;
pub use quote::{DepositQuote, SwapDirection, SwapQuote, WithdrawQuote};
pub use request::{DepositRequest, SwapRequest, WithdrawRequest};
pub use rounding::Rounding;
