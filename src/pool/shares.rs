//! Per-owner LP share balances.

use std::collections::BTreeMap;

use crate::domain::Address;
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;

/// LP balances keyed by owner.
///
/// The pool keeps `lp_supply` in its config record; the ledger only holds
/// the per-owner split.  Both are written in the same commit, so the sum of
/// all balances equals the supply after every operation.  Like the vaults,
/// mint and burn are staged: [`minted`](Self::minted) and
/// [`burned`](Self::burned) compute the new balance without writing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShareLedger {
    balances: BTreeMap<Address, u64>,
}

impl ShareLedger {
    /// Returns `owner`'s balance, zero if unknown.
    #[must_use]
    pub fn balance_of(&self, owner: &Address) -> u64 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// `owner`'s balance after receiving `amount` new shares.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] past `u64::MAX`.
    pub fn minted(&self, owner: &Address, amount: u64) -> Result<u64> {
        self.balance_of(owner).safe_add(amount)
    }

    /// `owner`'s balance after burning `amount` shares.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientShares`] if `owner` holds fewer
    /// than `amount`.
    pub fn burned(&self, owner: &Address, amount: u64) -> Result<u64> {
        let held = self.balance_of(owner);
        held.checked_sub(amount)
            .ok_or(AmmError::InsufficientShares {
                requested: amount,
                held,
            })
    }

    /// Sum of all balances, widened so it cannot overflow.
    #[must_use]
    pub fn total(&self) -> u128 {
        self.balances.values().map(|b| u128::from(*b)).sum()
    }

    /// Iterates `(owner, balance)` pairs in address order.
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &u64)> {
        self.balances.iter()
    }

    /// Number of owners with a non-zero balance.
    #[must_use]
    pub fn holders(&self) -> usize {
        self.balances.len()
    }

    pub(crate) fn commit(&mut self, owner: Address, balance: u64) {
        if balance == 0 {
            self.balances.remove(&owner);
        } else {
            self.balances.insert(owner, balance);
        }
    }
}
