//! Caller-supplied parameters for the value-moving operations.
//!
//! Each request validates its amounts on construction, so the engine never
//! sees a zero-sized deposit, withdrawal or swap.  The slippage bounds are
//! carried alongside and re-checked against the quote at commit time.

use core::fmt;

use super::SwapDirection;
use crate::error::{AmmError, Result};

/// Parameters of a swap: direction, exact input and minimum output.
///
/// # Examples
///
/// ```
/// use hybrid_amm::domain::{SwapDirection, SwapRequest};
///
/// let req = SwapRequest::new(SwapDirection::XToY, 100, 90).expect("non-zero");
/// assert_eq!(req.amount_in(), 100);
/// assert!(SwapRequest::new(SwapDirection::XToY, 0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapRequest {
    direction: SwapDirection,
    amount_in: u64,
    min_out: u64,
}

impl SwapRequest {
    /// Creates a swap request.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if `amount_in` is zero.
    pub const fn new(direction: SwapDirection, amount_in: u64, min_out: u64) -> Result<Self> {
        if amount_in == 0 {
            return Err(AmmError::InvalidAmount("swap amount must be non-zero"));
        }
        Ok(Self {
            direction,
            amount_in,
            min_out,
        })
    }

    /// Returns the swap direction.
    #[must_use]
    pub const fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the exact input amount.
    #[must_use]
    pub const fn amount_in(&self) -> u64 {
        self.amount_in
    }

    /// Returns the minimum acceptable output.
    #[must_use]
    pub const fn min_out(&self) -> u64 {
        self.min_out
    }
}

/// Parameters of a deposit.
///
/// When the pool already has LP supply, `desired_lp` is the exact number of
/// shares to mint and `max_x`/`max_y` cap what the caller will pay.  On the
/// bootstrap deposit the pool takes `max_x`/`max_y` as given and
/// `desired_lp` is the minimum acceptable mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepositRequest {
    desired_lp: u64,
    max_x: u64,
    max_y: u64,
}

impl DepositRequest {
    /// Creates a deposit request.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if `max_x` or `max_y` is zero.
    pub const fn new(desired_lp: u64, max_x: u64, max_y: u64) -> Result<Self> {
        if max_x == 0 || max_y == 0 {
            return Err(AmmError::InvalidAmount(
                "deposit bounds must be non-zero on both sides",
            ));
        }
        Ok(Self {
            desired_lp,
            max_x,
            max_y,
        })
    }

    /// Returns the requested LP amount.
    #[must_use]
    pub const fn desired_lp(&self) -> u64 {
        self.desired_lp
    }

    /// Returns the maximum X the caller will pay.
    #[must_use]
    pub const fn max_x(&self) -> u64 {
        self.max_x
    }

    /// Returns the maximum Y the caller will pay.
    #[must_use]
    pub const fn max_y(&self) -> u64 {
        self.max_y
    }
}

/// Parameters of a withdrawal: shares to burn and minimum amounts out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WithdrawRequest {
    burn_lp: u64,
    min_x: u64,
    min_y: u64,
}

impl WithdrawRequest {
    /// Creates a withdraw request.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidAmount`] if `burn_lp` is zero.
    pub const fn new(burn_lp: u64, min_x: u64, min_y: u64) -> Result<Self> {
        if burn_lp == 0 {
            return Err(AmmError::InvalidAmount("burn amount must be non-zero"));
        }
        Ok(Self {
            burn_lp,
            min_x,
            min_y,
        })
    }

    /// Returns the LP shares to burn.
    #[must_use]
    pub const fn burn_lp(&self) -> u64 {
        self.burn_lp
    }

    /// Returns the minimum X the caller accepts.
    #[must_use]
    pub const fn min_x(&self) -> u64 {
        self.min_x
    }

    /// Returns the minimum Y the caller accepts.
    #[must_use]
    pub const fn min_y(&self) -> u64 {
        self.min_y
    }
}

impl fmt::Display for SwapRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Swap({:?}, in={}, min_out={})",
            self.direction, self.amount_in, self.min_out
        )
    }
}
