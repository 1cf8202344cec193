//! Custody of the two reserve balances.
//!
//! Vault arithmetic is split in two phases: `credited`/`debited` compute a
//! new balance without touching the vault, and the pool writes every staged
//! balance back only after all of them have been computed.  An operation
//! that fails halfway therefore leaves both vaults as they were.

use crate::derivation::PoolKeys;
use crate::domain::{Address, Side};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// One reserve balance, bound to its derived address and mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vault {
    address: Address,
    mint: Address,
    balance: u64,
}

impl Vault {
    /// Creates an empty vault.
    #[must_use]
    pub const fn empty(address: Address, mint: Address) -> Self {
        Self {
            address,
            mint,
            balance: 0,
        }
    }

    /// Returns the vault address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the mint the vault holds.
    #[must_use]
    pub const fn mint(&self) -> Address {
        self.mint
    }

    /// Returns the custodied balance.
    #[must_use]
    pub const fn balance(&self) -> u64 {
        self.balance
    }

    /// Balance after receiving `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past `u64::MAX`.
    pub fn credited(&self, amount: u64) -> Result<u64> {
        self.balance.safe_add(amount)
    }

    /// Balance after paying out `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientLiquidity`] if the vault holds less
    /// than `amount`.
    pub fn debited(&self, amount: u64) -> Result<u64> {
        self.balance
            .checked_sub(amount)
            .ok_or(AmmError::InsufficientLiquidity("vault balance too low"))
    }

    pub(crate) fn commit(&mut self, balance: u64) {
        self.balance = balance;
    }
}

/// The pool's X and Y vaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VaultPair {
    x: Vault,
    y: Vault,
}

impl VaultPair {
    /// Creates both vaults empty at the addresses in `keys`.
    #[must_use]
    pub const fn open(keys: &PoolKeys) -> Self {
        let mints = keys.mints();
        Self {
            x: Vault::empty(keys.vault_x(), mints.mint_x()),
            y: Vault::empty(keys.vault_y(), mints.mint_y()),
        }
    }

    /// Returns the vault on `side`.
    #[must_use]
    pub const fn get(&self, side: Side) -> &Vault {
        match side {
            Side::X => &self.x,
            Side::Y => &self.y,
        }
    }

    /// Returns `(balance_x, balance_y)`.
    #[must_use]
    pub const fn balances(&self) -> (u64, u64) {
        (self.x.balance, self.y.balance)
    }

    /// Checks that `keys` name exactly these vaults, their mints and the
    /// LP mint the pool derived at creation.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::VaultMismatch`] naming the first key that
    /// differs.
    pub fn verify(&self, keys: &PoolKeys, expected: &PoolKeys) -> Result<()> {
        let mints = keys.mints();
        if mints.mint_x() != self.x.mint {
            return Err(AmmError::VaultMismatch("mint x does not match pool"));
        }
        if mints.mint_y() != self.y.mint {
            return Err(AmmError::VaultMismatch("mint y does not match pool"));
        }
        if keys.vault_x() != self.x.address || keys.vault_x() != expected.vault_x() {
            return Err(AmmError::VaultMismatch("vault x is not the derived vault"));
        }
        if keys.vault_y() != self.y.address || keys.vault_y() != expected.vault_y() {
            return Err(AmmError::VaultMismatch("vault y is not the derived vault"));
        }
        if keys.lp_mint() != expected.lp_mint() {
            return Err(AmmError::VaultMismatch("LP mint is not the derived mint"));
        }
        Ok(())
    }

    pub(crate) fn commit(&mut self, balance_x: u64, balance_y: u64) {
        self.x.commit(balance_x);
        self.y.commit(balance_y);
    }
}
