//! The persistent record describing one pool.

use super::LockState;
use crate::config::{CurveConfig, InitializeParams};
use crate::domain::{Address, BasisPoints, MintPair, Side};
use crate::error::Result;
use crate::math::CheckedArithmetic;

/// One pool's config record.
///
/// Immutable after creation: `address`, `seed`, `admin`, `mints`, `curve`.
/// Authority-gated: `fee`, `authority`.  Flipped by lock/unlock: `lock`.
/// Moved only inside value-moving commits: `lp_supply`, `fees_x`, `fees_y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    address: Address,
    seed: u64,
    authority: Option<Address>,
    admin: Address,
    mints: MintPair,
    fee: BasisPoints,
    curve: CurveConfig,
    lock: LockState,
    lp_supply: u64,
    fees_x: u64,
    fees_y: u64,
}

impl PoolConfig {
    pub(crate) const fn new(address: Address, params: &InitializeParams) -> Self {
        Self {
            address,
            seed: params.seed(),
            authority: params.authority(),
            admin: params.admin(),
            mints: params.mints(),
            fee: params.fee(),
            curve: params.curve(),
            lock: LockState::Unlocked,
            lp_supply: 0,
            fees_x: 0,
            fees_y: 0,
        }
    }

    /// Returns the config address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Returns the creation seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the authority, `None` for an immutable pool.
    #[must_use]
    pub const fn authority(&self) -> Option<Address> {
        self.authority
    }

    /// Returns the creating principal.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Returns the principal allowed to lock and unlock: the authority, or
    /// the admin when there is none.
    #[must_use]
    pub const fn lock_authority(&self) -> Address {
        match self.authority {
            Some(authority) => authority,
            None => self.admin,
        }
    }

    /// Returns the reserve mints.
    #[must_use]
    pub const fn mints(&self) -> MintPair {
        self.mints
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Returns the pricing regime.
    #[must_use]
    pub const fn curve(&self) -> CurveConfig {
        self.curve
    }

    /// Returns the lock state.
    #[must_use]
    pub const fn lock_state(&self) -> LockState {
        self.lock
    }

    /// Returns `true` when locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    /// Returns the outstanding LP supply.
    #[must_use]
    pub const fn lp_supply(&self) -> u64 {
        self.lp_supply
    }

    /// Lifetime fees retained on `side`.
    #[must_use]
    pub const fn fees(&self, side: Side) -> u64 {
        match side {
            Side::X => self.fees_x,
            Side::Y => self.fees_y,
        }
    }

    /// Lifetime fees on `side` after adding `fee`, not yet written.
    pub(crate) fn fees_after(&self, side: Side, fee: u64) -> Result<u64> {
        self.fees(side).safe_add(fee)
    }

    pub(crate) fn commit_fees(&mut self, side: Side, total: u64) {
        match side {
            Side::X => self.fees_x = total,
            Side::Y => self.fees_y = total,
        }
    }

    pub(crate) fn commit_lp_supply(&mut self, supply: u64) {
        self.lp_supply = supply;
    }

    pub(crate) fn lock_mut(&mut self) -> &mut LockState {
        &mut self.lock
    }

    pub(crate) fn set_fee(&mut self, fee: BasisPoints) {
        self.fee = fee;
    }

    pub(crate) fn set_authority(&mut self, authority: Option<Address>) {
        self.authority = authority;
    }
}
