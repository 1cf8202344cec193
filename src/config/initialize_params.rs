//! Parameters of the `initialize` operation.

use super::CurveConfig;
use crate::domain::{Address, BasisPoints, MintPair};
use crate::error::Result;

/// Everything needed to create a pool.
///
/// The pool's address is a pure function of the engine's program namespace
/// and `seed`; the vaults and LP mint follow from that address and the
/// mints.  Nothing here is mutable after creation except the fee and the
/// authority, through the authority-gated admin operations.
///
/// # Validation
///
/// - `fee_bps < 10_000`
/// - `mint_x != mint_y`
/// - the curve parameters are in range
///
/// # Examples
///
/// ```
/// use hybrid_amm::config::{CurveConfig, InitializeParams};
/// use hybrid_amm::domain::Address;
///
/// let admin = Address::from_bytes([9u8; 32]);
/// let params = InitializeParams::new(
///     0,
///     30,
///     None,
///     admin,
///     Address::from_bytes([1u8; 32]),
///     Address::from_bytes([2u8; 32]),
/// )
/// .expect("valid params")
/// .with_curve(CurveConfig::hybrid(100).expect("valid amplification"));
///
/// assert_eq!(params.fee().get(), 30);
/// assert!(params.curve().is_hybrid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InitializeParams {
    seed: u64,
    fee: BasisPoints,
    authority: Option<Address>,
    admin: Address,
    mints: MintPair,
    curve: CurveConfig,
}

impl InitializeParams {
    /// Creates validated parameters for a constant-product pool.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`](crate::error::AmmError::InvalidFee) if
    ///   `fee_bps >= 10_000`.
    /// - [`AmmError::InvalidMints`](crate::error::AmmError::InvalidMints) if
    ///   `mint_x == mint_y`.
    pub fn new(
        seed: u64,
        fee_bps: u16,
        authority: Option<Address>,
        admin: Address,
        mint_x: Address,
        mint_y: Address,
    ) -> Result<Self> {
        let params = Self {
            seed,
            fee: BasisPoints::fee(fee_bps)?,
            authority,
            admin,
            mints: MintPair::new(mint_x, mint_y)?,
            curve: CurveConfig::ConstantProduct,
        };
        params.validate()?;
        Ok(params)
    }

    /// Replaces the pricing regime.
    #[must_use]
    pub const fn with_curve(mut self, curve: CurveConfig) -> Self {
        self.curve = curve;
        self
    }

    /// Re-checks every invariant.
    ///
    /// Needed for values that bypassed [`new`](Self::new), such as
    /// deserialized records.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant's error.
    pub fn validate(&self) -> Result<()> {
        BasisPoints::fee(self.fee.get())?;
        MintPair::new(self.mints.mint_x(), self.mints.mint_y())?;
        self.curve.validate()
    }

    /// Returns the pool seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the swap fee.
    #[must_use]
    pub const fn fee(&self) -> BasisPoints {
        self.fee
    }

    /// Returns the optional authority.
    #[must_use]
    pub const fn authority(&self) -> Option<Address> {
        self.authority
    }

    /// Returns the creating principal.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Returns the mint pair.
    #[must_use]
    pub const fn mints(&self) -> MintPair {
        self.mints
    }

    /// Returns the pricing regime.
    #[must_use]
    pub const fn curve(&self) -> CurveConfig {
        self.curve
    }
}
