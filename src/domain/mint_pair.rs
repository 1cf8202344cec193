//! The two reserve asset mints of a pool.

use super::Address;
use crate::error::{AmmError, Result};

/// Which side of a pool an asset sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    /// The `mint_x` reserve.
    X,
    /// The `mint_y` reserve.
    Y,
}

impl Side {
    /// Returns the opposite side.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }
}

/// The pair of distinct mints a pool custodies.
///
/// Unlike a canonically sorted token pair, the order here is the order the
/// pool was initialized with: `mint_x` is always side X.  Both the pool
/// address and the vault addresses depend on it.
///
/// # Examples
///
/// ```
/// use hybrid_amm::domain::{Address, MintPair, Side};
///
/// let x = Address::from_bytes([2u8; 32]);
/// let y = Address::from_bytes([1u8; 32]);
/// let pair = MintPair::new(x, y).expect("distinct mints");
/// assert_eq!(pair.mint(Side::X), x);
/// assert!(MintPair::new(x, x).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MintPair {
    mint_x: Address,
    mint_y: Address,
}

impl MintPair {
    /// Creates a new pair.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidMints`] if both mints are the same.
    pub fn new(mint_x: Address, mint_y: Address) -> Result<Self> {
        if mint_x == mint_y {
            return Err(AmmError::InvalidMints);
        }
        Ok(Self { mint_x, mint_y })
    }

    /// Returns the X mint.
    #[must_use]
    pub const fn mint_x(&self) -> Address {
        self.mint_x
    }

    /// Returns the Y mint.
    #[must_use]
    pub const fn mint_y(&self) -> Address {
        self.mint_y
    }

    /// Returns the mint on `side`.
    #[must_use]
    pub const fn mint(&self, side: Side) -> Address {
        match side {
            Side::X => self.mint_x,
            Side::Y => self.mint_y,
        }
    }

    /// Returns the side `mint` sits on, if it belongs to this pair.
    #[must_use]
    pub fn side_of(&self, mint: &Address) -> Option<Side> {
        if *mint == self.mint_x {
            Some(Side::X)
        } else if *mint == self.mint_y {
            Some(Side::Y)
        } else {
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    #[test]
    fn order_is_preserved() {
        let Ok(pair) = MintPair::new(addr(9), addr(1)) else {
            panic!("expected valid pair");
        };
        assert_eq!(pair.mint_x(), addr(9));
        assert_eq!(pair.mint_y(), addr(1));
    }

    #[test]
    fn identical_mints_rejected() {
        assert_eq!(MintPair::new(addr(3), addr(3)), Err(AmmError::InvalidMints));
    }

    #[test]
    fn side_lookup() {
        let Ok(pair) = MintPair::new(addr(1), addr(2)) else {
            panic!("expected valid pair");
        };
        assert_eq!(pair.side_of(&addr(1)), Some(Side::X));
        assert_eq!(pair.side_of(&addr(2)), Some(Side::Y));
        assert_eq!(pair.side_of(&addr(3)), None);
        assert_eq!(pair.mint(Side::Y), addr(2));
    }

    #[test]
    fn other_side() {
        assert_eq!(Side::X.other(), Side::Y);
        assert_eq!(Side::Y.other(), Side::X);
    }
}
