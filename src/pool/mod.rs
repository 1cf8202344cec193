//! One pool instance: config record, vaults, LP ledger and curve.
//!
//! Every value-moving method follows the same shape:
//!
//! 1. gate on the lock switch,
//! 2. quote against the current reserves,
//! 3. re-check the caller's slippage bounds against the quote,
//! 4. stage every new balance with checked arithmetic,
//! 5. write all staged values at once.
//!
//! Steps 1–4 never mutate, so any error leaves the pool exactly as it was.

mod config;
mod lock;
mod shares;
mod slippage;
mod vault;

pub use config::PoolConfig;
pub use lock::{LockState, Transition};
pub use shares::ShareLedger;
pub use slippage::{at_least, at_most};
pub use vault::{Vault, VaultPair};

use crate::config::InitializeParams;
use crate::curve::{self, CurveBox};
use crate::derivation::PoolKeys;
use crate::domain::{
    Address, BasisPoints, DepositQuote, DepositRequest, Price, Side, SwapDirection, SwapQuote,
    SwapRequest, WithdrawQuote, WithdrawRequest,
};
use crate::error::{AmmError, Result};
use crate::math::CheckedArithmetic;
use crate::traits::{FromConfig, SwapCurve};

/// A live pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    config: PoolConfig,
    keys: PoolKeys,
    curve: CurveBox,
    vaults: VaultPair,
    shares: ShareLedger,
}

impl Pool {
    /// Builds an empty pool under `program` from validated parameters.
    ///
    /// # Errors
    ///
    /// Any validation error from `params`, or
    /// [`AmmError::InvalidCurve`] if the curve is not compiled in.
    pub(crate) fn create(program: Address, params: &InitializeParams) -> Result<Self> {
        params.validate()?;
        let curve = CurveBox::from_config(&params.curve())?;
        let keys = PoolKeys::for_mints(program, params.seed(), params.mints());
        Ok(Self {
            config: PoolConfig::new(keys.config(), params),
            keys,
            curve,
            vaults: VaultPair::open(&keys),
            shares: ShareLedger::default(),
        })
    }

    /// Returns the config record.
    #[must_use]
    pub const fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Returns the derived key set.
    #[must_use]
    pub const fn keys(&self) -> &PoolKeys {
        &self.keys
    }

    /// Returns the active curve.
    #[must_use]
    pub const fn curve(&self) -> &CurveBox {
        &self.curve
    }

    /// Returns the vaults.
    #[must_use]
    pub const fn vaults(&self) -> &VaultPair {
        &self.vaults
    }

    /// Returns the LP ledger.
    #[must_use]
    pub const fn shares(&self) -> &ShareLedger {
        &self.shares
    }

    /// Returns `(reserve_x, reserve_y)`.
    #[must_use]
    pub const fn reserves(&self) -> (u64, u64) {
        self.vaults.balances()
    }

    /// Returns `owner`'s LP balance.
    #[must_use]
    pub fn lp_balance(&self, owner: &Address) -> u64 {
        self.shares.balance_of(owner)
    }

    /// Checks caller-supplied keys against the addresses derived from this
    /// pool's identity.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::VaultMismatch`] for any key that differs.
    pub fn verify_keys(&self, keys: &PoolKeys) -> Result<()> {
        if keys.program() != self.keys.program() {
            return Err(AmmError::VaultMismatch("program namespace differs"));
        }
        if keys.config() != self.config.address() {
            return Err(AmmError::VaultMismatch("config address differs"));
        }
        let expected =
            PoolKeys::for_mints(self.keys.program(), self.config.seed(), self.config.mints());
        self.vaults.verify(keys, &expected)
    }

    fn reserve(&self, side: Side) -> u64 {
        self.vaults.get(side).balance()
    }

    /// Prices a swap without executing it.  Allowed while locked.
    ///
    /// # Errors
    ///
    /// See [`curve::quote_swap`].
    pub fn quote_swap(&self, direction: SwapDirection, amount_in: u64) -> Result<SwapQuote> {
        curve::quote_swap(
            &self.curve,
            self.reserve(direction.input_side()),
            self.reserve(direction.output_side()),
            amount_in,
            self.config.fee(),
        )
    }

    /// Prices a deposit and checks the caller's maximums.
    ///
    /// Into an empty pool the caller's maximums are taken as the exact
    /// amounts and `desired_lp`, if non-zero, is the minimum mint.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`] if a bound is violated.
    /// - [`AmmError::InvalidAmount`] for a zero `desired_lp` on a funded
    ///   pool.
    pub fn quote_deposit(&self, request: &DepositRequest) -> Result<DepositQuote> {
        let (reserve_x, reserve_y) = self.reserves();
        let supply = self.config.lp_supply();

        if supply == 0 {
            let lp_minted = curve::quote_bootstrap(request.max_x(), request.max_y())?;
            at_least(lp_minted, request.desired_lp(), "bootstrap LP below requested")?;
            return Ok(DepositQuote {
                amount_x: request.max_x(),
                amount_y: request.max_y(),
                lp_minted,
            });
        }

        let (amount_x, amount_y) =
            curve::quote_deposit(reserve_x, reserve_y, supply, request.desired_lp())?;
        at_most(amount_x, request.max_x(), "required x above maximum")?;
        at_most(amount_y, request.max_y(), "required y above maximum")?;
        Ok(DepositQuote {
            amount_x,
            amount_y,
            lp_minted: request.desired_lp(),
        })
    }

    /// Prices a withdrawal and checks the caller's minimums.
    ///
    /// # Errors
    ///
    /// - [`AmmError::SlippageExceeded`] if a bound is violated.
    /// - [`AmmError::InsufficientLiquidity`] if the burn exceeds the supply.
    pub fn quote_withdraw(&self, request: &WithdrawRequest) -> Result<WithdrawQuote> {
        let (reserve_x, reserve_y) = self.reserves();
        let (amount_x, amount_y) = curve::quote_withdraw(
            reserve_x,
            reserve_y,
            self.config.lp_supply(),
            request.burn_lp(),
        )?;
        at_least(amount_x, request.min_x(), "returned x below minimum")?;
        at_least(amount_y, request.min_y(), "returned y below minimum")?;
        Ok(WithdrawQuote {
            amount_x,
            amount_y,
            lp_burned: request.burn_lp(),
        })
    }

    /// Marginal price of `base` in units of the other asset.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidity`] on an unfunded pool.
    pub fn spot_price(&self, base: Side) -> Result<Price> {
        self.curve
            .spot_price(self.reserve(base), self.reserve(base.other()))
    }

    /// Reserve ratio `quote / base` in deterministic fixed point.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientLiquidity`] on an unfunded pool.
    #[cfg(feature = "fixed-point")]
    pub fn fixed_spot_price(&self, base: Side) -> Result<fixed::types::I80F48> {
        crate::math::fixed_spot_price(self.reserve(base.other()), self.reserve(base))
    }

    pub(crate) fn swap(&mut self, request: &SwapRequest) -> Result<SwapQuote> {
        self.config.lock_state().ensure_unlocked()?;
        let quote = self.quote_swap(request.direction(), request.amount_in())?;
        at_least(quote.amount_out, request.min_out(), "output below minimum")?;

        let input = request.direction().input_side();
        let staged_in = self.vaults.get(input).credited(quote.amount_in)?;
        let staged_out = self.vaults.get(input.other()).debited(quote.amount_out)?;
        let staged_fees = self.config.fees_after(input, quote.fee)?;

        let (balance_x, balance_y) = match input {
            Side::X => (staged_in, staged_out),
            Side::Y => (staged_out, staged_in),
        };
        self.vaults.commit(balance_x, balance_y);
        self.config.commit_fees(input, staged_fees);
        Ok(quote)
    }

    pub(crate) fn deposit(
        &mut self,
        owner: Address,
        request: &DepositRequest,
    ) -> Result<DepositQuote> {
        self.config.lock_state().ensure_unlocked()?;
        let quote = self.quote_deposit(request)?;

        let staged_x = self.vaults.get(Side::X).credited(quote.amount_x)?;
        let staged_y = self.vaults.get(Side::Y).credited(quote.amount_y)?;
        let staged_supply = self.config.lp_supply().safe_add(quote.lp_minted)?;
        let staged_balance = self.shares.minted(&owner, quote.lp_minted)?;

        self.vaults.commit(staged_x, staged_y);
        self.config.commit_lp_supply(staged_supply);
        self.shares.commit(owner, staged_balance);
        Ok(quote)
    }

    pub(crate) fn withdraw(
        &mut self,
        owner: Address,
        request: &WithdrawRequest,
    ) -> Result<WithdrawQuote> {
        self.config.lock_state().ensure_unlocked()?;
        let staged_balance = self.shares.burned(&owner, request.burn_lp())?;
        let quote = self.quote_withdraw(request)?;

        let staged_x = self.vaults.get(Side::X).debited(quote.amount_x)?;
        let staged_y = self.vaults.get(Side::Y).debited(quote.amount_y)?;
        let staged_supply = self.config.lp_supply().safe_sub(quote.lp_burned)?;

        self.vaults.commit(staged_x, staged_y);
        self.config.commit_lp_supply(staged_supply);
        self.shares.commit(owner, staged_balance);
        Ok(quote)
    }

    fn authorize_lock(&self, caller: &Address) -> Result<()> {
        if *caller != self.config.lock_authority() {
            return Err(AmmError::Unauthorized);
        }
        Ok(())
    }

    fn authorize_admin(&self, caller: &Address) -> Result<()> {
        match self.config.authority() {
            Some(authority) if authority == *caller => Ok(()),
            _ => Err(AmmError::Unauthorized),
        }
    }

    pub(crate) fn lock(&mut self, caller: &Address) -> Result<Transition> {
        self.authorize_lock(caller)?;
        Ok(self.config.lock_mut().lock())
    }

    pub(crate) fn unlock(&mut self, caller: &Address) -> Result<Transition> {
        self.authorize_lock(caller)?;
        Ok(self.config.lock_mut().unlock())
    }

    /// Returns the previous fee.
    pub(crate) fn set_fee(&mut self, caller: &Address, fee_bps: u16) -> Result<BasisPoints> {
        self.authorize_admin(caller)?;
        let fee = BasisPoints::fee(fee_bps)?;
        let previous = self.config.fee();
        self.config.set_fee(fee);
        Ok(previous)
    }

    /// Returns the previous authority.
    pub(crate) fn set_authority(
        &mut self,
        caller: &Address,
        authority: Option<Address>,
    ) -> Result<Option<Address>> {
        self.authorize_admin(caller)?;
        let previous = self.config.authority();
        self.config.set_authority(authority);
        Ok(previous)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 32])
    }

    const ADMIN: u8 = 9;
    const AUTHORITY: u8 = 8;
    const ALICE: u8 = 20;

    fn make_pool(authority: Option<Address>) -> Pool {
        let Ok(params) = InitializeParams::new(0, 30, authority, addr(ADMIN), addr(1), addr(2))
        else {
            panic!("valid params");
        };
        let Ok(pool) = Pool::create(addr(7), &params) else {
            panic!("pool created");
        };
        pool
    }

    fn funded_pool(x: u64, y: u64) -> Pool {
        let mut pool = make_pool(Some(addr(AUTHORITY)));
        let Ok(req) = DepositRequest::new(0, x, y) else {
            panic!("valid request");
        };
        let Ok(_) = pool.deposit(addr(ALICE), &req) else {
            panic!("bootstrap deposit");
        };
        pool
    }

    fn swap_req(direction: SwapDirection, amount_in: u64, min_out: u64) -> SwapRequest {
        let Ok(req) = SwapRequest::new(direction, amount_in, min_out) else {
            panic!("valid request");
        };
        req
    }

    #[test]
    fn create_is_empty() {
        let pool = make_pool(None);
        assert_eq!(pool.reserves(), (0, 0));
        assert_eq!(pool.config().lp_supply(), 0);
        assert_eq!(pool.config().address(), pool.keys().config());
        assert_eq!(pool.verify_keys(pool.keys()), Ok(()));
    }

    #[test]
    fn bootstrap_mints_sqrt() {
        let pool = funded_pool(1_000, 1_000);
        assert_eq!(pool.reserves(), (1_000, 1_000));
        assert_eq!(pool.config().lp_supply(), 1_000);
        assert_eq!(pool.lp_balance(&addr(ALICE)), 1_000);
    }

    #[test]
    fn bootstrap_minimum_enforced() {
        let mut pool = make_pool(None);
        let Ok(req) = DepositRequest::new(1_001, 1_000, 1_000) else {
            panic!("valid request");
        };
        assert!(matches!(
            pool.deposit(addr(ALICE), &req),
            Err(AmmError::SlippageExceeded(_))
        ));
        assert_eq!(pool.reserves(), (0, 0));
    }

    #[test]
    fn proportional_deposit_respects_maximums() {
        // sqrt(1000 * 4000) = 2000 LP; 100 LP is 5% of each reserve.
        let mut pool = funded_pool(1_000, 4_000);
        let Ok(too_tight) = DepositRequest::new(100, 50, 199) else {
            panic!("valid request");
        };
        assert!(matches!(
            pool.deposit(addr(21), &too_tight),
            Err(AmmError::SlippageExceeded(_))
        ));

        let Ok(ok) = DepositRequest::new(100, 50, 200) else {
            panic!("valid request");
        };
        let Ok(quote) = pool.deposit(addr(21), &ok) else {
            panic!("deposit within bounds");
        };
        assert_eq!((quote.amount_x, quote.amount_y, quote.lp_minted), (50, 200, 100));
        assert_eq!(pool.reserves(), (1_050, 4_200));
        assert_eq!(pool.config().lp_supply(), pool.shares().total() as u64);
    }

    #[test]
    fn swap_reference_scenario() {
        let mut pool = funded_pool(1_000, 1_000);
        let Ok(quote) = pool.swap(&swap_req(SwapDirection::XToY, 100, 90)) else {
            panic!("swap within bounds");
        };
        assert_eq!(quote.amount_out, 90);
        assert_eq!(pool.reserves(), (1_100, 910));
        assert_eq!(pool.config().fees(Side::X), 1);
        assert_eq!(pool.config().fees(Side::Y), 0);
    }

    #[test]
    fn swap_slippage_leaves_state() {
        let mut pool = funded_pool(1_000, 1_000);
        let before = pool.clone();
        assert!(matches!(
            pool.swap(&swap_req(SwapDirection::XToY, 100, 91)),
            Err(AmmError::SlippageExceeded(_))
        ));
        assert_eq!(pool, before);
    }

    #[test]
    fn swap_y_to_x() {
        let mut pool = funded_pool(1_000, 1_000);
        let Ok(quote) = pool.swap(&swap_req(SwapDirection::YToX, 100, 0)) else {
            panic!("swap");
        };
        assert_eq!(pool.reserves(), (1_000 - quote.amount_out, 1_100));
        assert_eq!(pool.config().fees(Side::Y), quote.fee);
    }

    #[test]
    fn withdraw_more_than_held() {
        let mut pool = funded_pool(1_000, 1_000);
        let Ok(req) = WithdrawRequest::new(1_001, 0, 0) else {
            panic!("valid request");
        };
        assert_eq!(
            pool.withdraw(addr(ALICE), &req),
            Err(AmmError::InsufficientShares {
                requested: 1_001,
                held: 1_000
            })
        );
    }

    #[test]
    fn withdraw_everything_empties_pool() {
        let mut pool = funded_pool(1_000, 4_000);
        let Ok(req) = WithdrawRequest::new(2_000, 1_000, 4_000) else {
            panic!("valid request");
        };
        let Ok(quote) = pool.withdraw(addr(ALICE), &req) else {
            panic!("full withdrawal");
        };
        assert_eq!((quote.amount_x, quote.amount_y), (1_000, 4_000));
        assert_eq!(pool.reserves(), (0, 0));
        assert_eq!(pool.config().lp_supply(), 0);
        assert_eq!(pool.shares().holders(), 0);
    }

    #[test]
    fn locked_pool_rejects_value_moves() {
        let mut pool = funded_pool(1_000, 1_000);
        let Ok(Transition::Changed) = pool.lock(&addr(AUTHORITY)) else {
            panic!("authority may lock");
        };
        let before = pool.clone();
        assert_eq!(
            pool.swap(&swap_req(SwapDirection::XToY, 100, 0)),
            Err(AmmError::PoolLocked)
        );
        let Ok(dep) = DepositRequest::new(10, 10, 10) else {
            panic!("valid request");
        };
        assert_eq!(pool.deposit(addr(ALICE), &dep), Err(AmmError::PoolLocked));
        let Ok(wd) = WithdrawRequest::new(10, 0, 0) else {
            panic!("valid request");
        };
        assert_eq!(pool.withdraw(addr(ALICE), &wd), Err(AmmError::PoolLocked));
        assert_eq!(pool, before);
        // Quotes still work.
        assert!(pool.quote_swap(SwapDirection::XToY, 100).is_ok());
    }

    #[test]
    fn lock_authorization() {
        let mut with_authority = make_pool(Some(addr(AUTHORITY)));
        assert_eq!(with_authority.lock(&addr(ADMIN)), Err(AmmError::Unauthorized));
        assert_eq!(with_authority.lock(&addr(AUTHORITY)), Ok(Transition::Changed));

        let mut admin_only = make_pool(None);
        assert_eq!(admin_only.lock(&addr(ADMIN)), Ok(Transition::Changed));
        assert_eq!(admin_only.unlock(&addr(ALICE)), Err(AmmError::Unauthorized));
        assert_eq!(admin_only.unlock(&addr(ADMIN)), Ok(Transition::Changed));
        assert_eq!(admin_only.unlock(&addr(ADMIN)), Ok(Transition::Unchanged));
    }

    #[test]
    fn fee_changes_need_authority() {
        let mut pool = make_pool(Some(addr(AUTHORITY)));
        assert_eq!(pool.set_fee(&addr(ADMIN), 50), Err(AmmError::Unauthorized));
        assert_eq!(
            pool.set_fee(&addr(AUTHORITY), 10_000),
            Err(AmmError::InvalidFee(10_000))
        );
        assert_eq!(pool.set_fee(&addr(AUTHORITY), 50), Ok(BasisPoints::new(30)));
        assert_eq!(pool.config().fee().get(), 50);
    }

    #[test]
    fn immutable_pool_rejects_admin_changes() {
        let mut pool = make_pool(None);
        assert_eq!(pool.set_fee(&addr(ADMIN), 50), Err(AmmError::Unauthorized));
        assert_eq!(
            pool.set_authority(&addr(ADMIN), Some(addr(ADMIN))),
            Err(AmmError::Unauthorized)
        );
    }

    #[test]
    fn renouncing_authority() {
        let mut pool = make_pool(Some(addr(AUTHORITY)));
        assert_eq!(
            pool.set_authority(&addr(AUTHORITY), None),
            Ok(Some(addr(AUTHORITY)))
        );
        // Lock control falls back to the admin.
        assert_eq!(pool.lock(&addr(ADMIN)), Ok(Transition::Changed));
        assert_eq!(pool.set_fee(&addr(AUTHORITY), 1), Err(AmmError::Unauthorized));
    }

    #[test]
    fn spot_price_follows_reserves() {
        let pool = funded_pool(1_000, 3_000);
        let Ok(p) = pool.spot_price(Side::X) else {
            panic!("funded pool");
        };
        assert!((p.get() - 3.0).abs() < f64::EPSILON);
        assert!(make_pool(None).spot_price(Side::X).is_err());
    }
}
