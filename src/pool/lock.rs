//! Two-state administrative circuit breaker.

use core::fmt;

use crate::error::{AmmError, Result};

/// Whether liquidity-affecting operations are accepted.
///
/// ```text
///            lock
///  Unlocked ───────► Locked
///     ▲                │
///     └────────────────┘
///           unlock
/// ```
///
/// Repeating a transition is a successful no-op reported as
/// [`Transition::Unchanged`].  Read-only queries ignore the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LockState {
    /// Deposits, swaps and withdrawals are accepted.
    #[default]
    Unlocked,
    /// Deposits, swaps and withdrawals fail with [`AmmError::PoolLocked`].
    Locked,
}

/// Outcome of a lock or unlock request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The state flipped.
    Changed,
    /// The pool was already in the requested state.
    Unchanged,
}

impl LockState {
    /// Moves to [`Locked`](Self::Locked).
    pub fn lock(&mut self) -> Transition {
        self.set(Self::Locked)
    }

    /// Moves to [`Unlocked`](Self::Unlocked).
    pub fn unlock(&mut self) -> Transition {
        self.set(Self::Unlocked)
    }

    fn set(&mut self, target: Self) -> Transition {
        if *self == target {
            return Transition::Unchanged;
        }
        *self = target;
        Transition::Changed
    }

    /// Returns `true` when locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Locked)
    }

    /// Gate for value-moving operations.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::PoolLocked`] when locked.
    pub const fn ensure_unlocked(&self) -> Result<()> {
        match self {
            Self::Unlocked => Ok(()),
            Self::Locked => Err(AmmError::PoolLocked),
        }
    }
}

impl fmt::Display for LockState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Unlocked => "unlocked",
            Self::Locked => "locked",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unlocked() {
        let state = LockState::default();
        assert!(!state.is_locked());
        assert_eq!(state.ensure_unlocked(), Ok(()));
    }

    #[test]
    fn lock_is_idempotent() {
        let mut state = LockState::default();
        assert_eq!(state.lock(), Transition::Changed);
        assert_eq!(state.lock(), Transition::Unchanged);
        assert!(state.is_locked());
        assert_eq!(state.ensure_unlocked(), Err(AmmError::PoolLocked));
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut state = LockState::Locked;
        assert_eq!(state.unlock(), Transition::Changed);
        assert_eq!(state.unlock(), Transition::Unchanged);
        assert_eq!(state, LockState::Unlocked);
    }

    #[test]
    fn display() {
        assert_eq!(LockState::Locked.to_string(), "locked");
    }
}
