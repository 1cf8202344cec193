//! Quotes produced by the curve and liquidity math.

use core::fmt;

use super::Side;

/// Direction of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Sell X, receive Y.
    XToY,
    /// Sell Y, receive X.
    YToX,
}

impl SwapDirection {
    /// Builds a direction from the wire-level `is_x` flag.
    #[must_use]
    pub const fn from_is_x(is_x: bool) -> Self {
        if is_x {
            Self::XToY
        } else {
            Self::YToX
        }
    }

    /// The side whose reserve grows.
    #[must_use]
    pub const fn input_side(self) -> Side {
        match self {
            Self::XToY => Side::X,
            Self::YToX => Side::Y,
        }
    }

    /// The side whose reserve shrinks.
    #[must_use]
    pub const fn output_side(self) -> Side {
        self.input_side().other()
    }
}

impl From<bool> for SwapDirection {
    fn from(is_x: bool) -> Self {
        Self::from_is_x(is_x)
    }
}

/// Outcome of pricing a swap.
///
/// `amount_in` is what the caller pays into the input vault in full;
/// `fee = amount_in − amount_in_net` stays in the reserves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapQuote {
    /// Gross input paid by the caller.
    pub amount_in: u64,
    /// Input after the fee deduction, the part that moves the curve.
    pub amount_in_net: u64,
    /// Fee retained by the pool.
    pub fee: u64,
    /// Output paid from the opposite vault.
    pub amount_out: u64,
}

impl fmt::Display for SwapQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SwapQuote(in={}, net={}, fee={}, out={})",
            self.amount_in, self.amount_in_net, self.fee, self.amount_out
        )
    }
}

/// Amounts moved by a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DepositQuote {
    /// X paid into the pool.
    pub amount_x: u64,
    /// Y paid into the pool.
    pub amount_y: u64,
    /// LP shares minted to the depositor.
    pub lp_minted: u64,
}

/// Amounts moved by a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WithdrawQuote {
    /// X paid out of the pool.
    pub amount_x: u64,
    /// Y paid out of the pool.
    pub amount_y: u64,
    /// LP shares burned from the caller.
    pub lp_burned: u64,
}
