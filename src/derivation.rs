//! Deterministic address derivation.
//!
//! Every address the engine touches is a pure function of the program
//! namespace, an anchor and a role:
//!
//! | Address | Anchor | Role |
//! |---------|--------|------|
//! | pool config | `Seed(seed)` | `Config` |
//! | LP mint | `Owner(config)` | `LpMint` |
//! | vault X / Y | `Owner(config)` | `Vault { mint }` |
//! | user LP account | `Owner(user)` | `ShareAccount { mint: lp_mint }` |
//!
//! Callers use the same [`derive`] to build requests that the engine uses
//! to validate them, so the two can never drift apart.

use sha2::{Digest, Sha256};

use crate::domain::{Address, MintPair, Side};
use crate::error::Result;

/// Domain separator mixed into every derivation.
const DERIVE_DOMAIN: &[u8] = b"hybrid-amm/derive/v1";

/// What an address is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// A pool seed, hashed as 8 little-endian bytes.
    Seed(u64),
    /// An owning address (a pool config or a user).
    Owner(Address),
}

/// What the derived address is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The pool config record.
    Config,
    /// The pool's LP share mint.
    LpMint,
    /// The pool's reserve vault for `mint`.
    Vault {
        /// Reserve asset held by the vault.
        mint: Address,
    },
    /// An owner's balance account for `mint`.
    ShareAccount {
        /// Asset the account holds, usually the LP mint.
        mint: Address,
    },
}

impl Role {
    const fn tag(&self) -> &'static [u8] {
        match self {
            Self::Config => b"config",
            Self::LpMint => b"lp",
            Self::Vault { .. } => b"vault",
            Self::ShareAccount { .. } => b"share",
        }
    }
}

/// Derives the address for `role` anchored at `anchor` under `program`.
///
/// SHA-256 over a domain separator, the role tag, the tagged anchor bytes,
/// the role's mint (if any) and the program namespace.
///
/// # Examples
///
/// ```
/// use hybrid_amm::derivation::{derive, Anchor, Role};
/// use hybrid_amm::domain::Address;
///
/// let program = Address::from_bytes([7u8; 32]);
/// let a = derive(&program, Anchor::Seed(0), Role::Config);
/// let b = derive(&program, Anchor::Seed(0), Role::Config);
/// assert_eq!(a, b);
/// assert_ne!(a, derive(&program, Anchor::Seed(1), Role::Config));
/// ```
#[must_use]
pub fn derive(program: &Address, anchor: Anchor, role: Role) -> Address {
    let mut hasher = Sha256::new();
    hasher.update(DERIVE_DOMAIN);
    hasher.update(role.tag());
    match anchor {
        Anchor::Seed(seed) => {
            hasher.update(b"S");
            hasher.update(seed.to_le_bytes());
        }
        Anchor::Owner(owner) => {
            hasher.update(b"O");
            hasher.update(owner.as_bytes());
        }
    }
    if let Role::Vault { mint } | Role::ShareAccount { mint } = role {
        hasher.update(mint.as_bytes());
    }
    hasher.update(program.as_bytes());
    let hash = hasher.finalize();
    let mut bytes = [0u8; 32];
    bytes.copy_from_slice(&hash);
    Address::from_bytes(bytes)
}

/// Every address one pool's operations reference.
///
/// Built by [`PoolKeys::derive`] from public inputs only, so any caller can
/// assemble a request without reading engine state.
///
/// # Examples
///
/// ```
/// use hybrid_amm::derivation::PoolKeys;
/// use hybrid_amm::domain::Address;
///
/// let program = Address::from_bytes([7u8; 32]);
/// let keys = PoolKeys::derive(
///     program,
///     42,
///     Address::from_bytes([1u8; 32]),
///     Address::from_bytes([2u8; 32]),
/// )
/// .expect("distinct mints");
/// assert_ne!(keys.vault_x(), keys.vault_y());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolKeys {
    program: Address,
    config: Address,
    mints: MintPair,
    lp_mint: Address,
    vault_x: Address,
    vault_y: Address,
}

impl PoolKeys {
    /// Derives the full key set for pool `seed` over `(mint_x, mint_y)`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidMints`](crate::error::AmmError::InvalidMints)
    /// if the mints are identical.
    pub fn derive(program: Address, seed: u64, mint_x: Address, mint_y: Address) -> Result<Self> {
        let mints = MintPair::new(mint_x, mint_y)?;
        Ok(Self::for_mints(program, seed, mints))
    }

    pub(crate) fn for_mints(program: Address, seed: u64, mints: MintPair) -> Self {
        let config = derive(&program, Anchor::Seed(seed), Role::Config);
        let owned = |role| derive(&program, Anchor::Owner(config), role);
        Self {
            program,
            config,
            mints,
            lp_mint: owned(Role::LpMint),
            vault_x: owned(Role::Vault {
                mint: mints.mint_x(),
            }),
            vault_y: owned(Role::Vault {
                mint: mints.mint_y(),
            }),
        }
    }

    /// Assembles keys from caller-supplied addresses without deriving them.
    ///
    /// The engine rejects any that do not match the derived set.
    #[must_use]
    pub const fn from_parts(
        program: Address,
        config: Address,
        mints: MintPair,
        lp_mint: Address,
        vault_x: Address,
        vault_y: Address,
    ) -> Self {
        Self {
            program,
            config,
            mints,
            lp_mint,
            vault_x,
            vault_y,
        }
    }

    /// Derives `owner`'s LP share account for this pool.
    #[must_use]
    pub fn share_account(&self, owner: &Address) -> Address {
        derive(
            &self.program,
            Anchor::Owner(*owner),
            Role::ShareAccount { mint: self.lp_mint },
        )
    }

    /// Returns the program namespace.
    #[must_use]
    pub const fn program(&self) -> Address {
        self.program
    }

    /// Returns the pool config address, the pool's identifier.
    #[must_use]
    pub const fn config(&self) -> Address {
        self.config
    }

    /// Returns the reserve mints.
    #[must_use]
    pub const fn mints(&self) -> MintPair {
        self.mints
    }

    /// Returns the LP mint address.
    #[must_use]
    pub const fn lp_mint(&self) -> Address {
        self.lp_mint
    }

    /// Returns the X vault address.
    #[must_use]
    pub const fn vault_x(&self) -> Address {
        self.vault_x
    }

    /// Returns the Y vault address.
    #[must_use]
    pub const fn vault_y(&self) -> Address {
        self.vault_y
    }

    /// Returns the vault on `side`.
    #[must_use]
    pub const fn vault(&self, side: Side) -> Address {
        match side {
            Side::X => self.vault_x,
            Side::Y => self.vault_y,
        }
    }
}
