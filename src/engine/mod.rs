//! Orchestration: the operations callers invoke.
//!
//! [`AmmEngine`] owns every pool created under one program namespace and
//! routes each call to the right one.  Value-moving calls take the full
//! [`PoolKeys`] the caller assembled, and the engine checks them against
//! the pool's derived addresses before anything else happens.
//!
//! # Logging
//!
//! - `info` once per committed state change, with the amounts moved.
//! - `warn` when a call is rejected for policy: locked pool, unauthorized
//!   caller, forged keys, slippage.
//! - `debug` for quotes, idempotent lock requests and other rejections.
//!
//! The engine never installs a subscriber.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::config::InitializeParams;
use crate::derivation::{derive, Anchor, PoolKeys, Role};
use crate::domain::{
    Address, DepositQuote, DepositRequest, Price, Side, SwapDirection, SwapQuote, SwapRequest,
    WithdrawQuote, WithdrawRequest,
};
use crate::error::{AmmError, Result};
use crate::pool::{Pool, PoolConfig, Transition};

/// Logs a rejected call at a level matching its cause and hands the error
/// back.
fn rejected(op: &'static str, pool: &Address, err: AmmError) -> AmmError {
    match err {
        AmmError::PoolLocked
        | AmmError::Unauthorized
        | AmmError::VaultMismatch(_)
        | AmmError::SlippageExceeded(_) => {
            warn!(op, pool = %pool, error = %err, "rejected");
        }
        _ => debug!(op, pool = %pool, error = %err, "rejected"),
    }
    err
}

/// The pool engine for one program namespace.
///
/// Calls run one at a time through `&mut self`; pools share no state, so a
/// host may shard pools across engines freely.
///
/// # Examples
///
/// ```
/// use hybrid_amm::config::InitializeParams;
/// use hybrid_amm::derivation::PoolKeys;
/// use hybrid_amm::domain::{Address, DepositRequest, SwapDirection, SwapRequest};
/// use hybrid_amm::engine::AmmEngine;
///
/// let program = Address::from_bytes([7u8; 32]);
/// let admin = Address::from_bytes([9u8; 32]);
/// let (mint_x, mint_y) = (Address::from_bytes([1u8; 32]), Address::from_bytes([2u8; 32]));
///
/// let mut engine = AmmEngine::new(program);
/// let params = InitializeParams::new(0, 30, None, admin, mint_x, mint_y).expect("valid params");
/// engine.initialize(&params).expect("fresh pool");
///
/// let keys = PoolKeys::derive(program, 0, mint_x, mint_y).expect("distinct mints");
/// let deposit = DepositRequest::new(0, 1_000, 1_000).expect("non-zero");
/// engine.deposit(&keys, &deposit, admin).expect("bootstrap");
///
/// let swap = SwapRequest::new(SwapDirection::XToY, 100, 90).expect("non-zero");
/// let quote = engine.swap(&keys, &swap, admin).expect("within bounds");
/// assert_eq!(quote.amount_out, 90);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AmmEngine {
    program: Address,
    pools: HashMap<Address, Pool>,
}

impl AmmEngine {
    /// Creates an engine with no pools under `program`.
    #[must_use]
    pub fn new(program: Address) -> Self {
        Self {
            program,
            pools: HashMap::new(),
        }
    }

    /// Returns the program namespace.
    #[must_use]
    pub const fn program(&self) -> Address {
        self.program
    }

    /// Derives the config address pool `seed` would occupy.
    #[must_use]
    pub fn pool_address(&self, seed: u64) -> Address {
        derive(&self.program, Anchor::Seed(seed), Role::Config)
    }

    /// Number of pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Iterates over all pools in arbitrary order.
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values()
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Creates a pool with zero reserves and zero LP supply.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`], [`AmmError::InvalidMints`] or
    ///   [`AmmError::InvalidCurve`] for bad parameters.
    /// - [`AmmError::PoolAlreadyExists`] if the seed's address is taken.
    pub fn initialize(&mut self, params: &InitializeParams) -> Result<PoolConfig> {
        let address = self.pool_address(params.seed());
        if self.pools.contains_key(&address) {
            return Err(rejected(
                "initialize",
                &address,
                AmmError::PoolAlreadyExists(address),
            ));
        }
        let pool = Pool::create(self.program, params)
            .map_err(|e| rejected("initialize", &address, e))?;
        let config = *pool.config();
        self.pools.insert(address, pool);

        info!(
            pool = %address,
            seed = config.seed(),
            fee = %config.fee(),
            curve = config.curve().name(),
            mint_x = %config.mints().mint_x(),
            mint_y = %config.mints().mint_y(),
            immutable = config.authority().is_none(),
            "pool initialized"
        );
        Ok(config)
    }

    /// Adds liquidity and mints LP shares to `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`], [`AmmError::VaultMismatch`] for bad keys.
    /// - [`AmmError::PoolLocked`] while locked.
    /// - [`AmmError::SlippageExceeded`] if the required amounts exceed the
    ///   caller's maximums (or the bootstrap mint falls short).
    /// - [`AmmError::ArithmeticOverflow`] if a balance would overflow.
    pub fn deposit(
        &mut self,
        keys: &PoolKeys,
        request: &DepositRequest,
        caller: Address,
    ) -> Result<DepositQuote> {
        let pool = self.pool_for_keys("deposit", keys)?;
        let quote = pool
            .deposit(caller, request)
            .map_err(|e| rejected("deposit", &keys.config(), e))?;

        info!(
            pool = %keys.config(),
            caller = %caller,
            amount_x = quote.amount_x,
            amount_y = quote.amount_y,
            lp_minted = quote.lp_minted,
            lp_supply = pool.config().lp_supply(),
            "deposit committed"
        );
        Ok(quote)
    }

    /// Burns `caller`'s LP shares for a proportional slice of the reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`], [`AmmError::VaultMismatch`] for bad keys.
    /// - [`AmmError::PoolLocked`] while locked.
    /// - [`AmmError::InsufficientShares`] if `caller` holds fewer shares.
    /// - [`AmmError::SlippageExceeded`] if an amount falls below its minimum.
    pub fn withdraw(
        &mut self,
        keys: &PoolKeys,
        request: &WithdrawRequest,
        caller: Address,
    ) -> Result<WithdrawQuote> {
        let pool = self.pool_for_keys("withdraw", keys)?;
        let quote = pool
            .withdraw(caller, request)
            .map_err(|e| rejected("withdraw", &keys.config(), e))?;

        info!(
            pool = %keys.config(),
            caller = %caller,
            amount_x = quote.amount_x,
            amount_y = quote.amount_y,
            lp_burned = quote.lp_burned,
            lp_supply = pool.config().lp_supply(),
            "withdraw committed"
        );
        Ok(quote)
    }

    /// Swaps an exact input for at least `min_out` of the other asset.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`], [`AmmError::VaultMismatch`] for bad keys.
    /// - [`AmmError::PoolLocked`] while locked.
    /// - [`AmmError::InsufficientLiquidity`] if the output rounds to zero or
    ///   would drain the reserve.
    /// - [`AmmError::SlippageExceeded`] if the output is below `min_out`.
    pub fn swap(
        &mut self,
        keys: &PoolKeys,
        request: &SwapRequest,
        caller: Address,
    ) -> Result<SwapQuote> {
        let pool = self.pool_for_keys("swap", keys)?;
        let quote = pool
            .swap(request)
            .map_err(|e| rejected("swap", &keys.config(), e))?;

        info!(
            pool = %keys.config(),
            caller = %caller,
            direction = ?request.direction(),
            amount_in = quote.amount_in,
            fee = quote.fee,
            amount_out = quote.amount_out,
            "swap committed"
        );
        Ok(quote)
    }

    /// Engages the lock switch.  Repeating it is a no-op success.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown pool.
    /// - [`AmmError::Unauthorized`] unless `caller` is the authority (or
    ///   the admin when there is none).
    pub fn lock(&mut self, pool: &Address, caller: Address) -> Result<Transition> {
        let transition = self
            .pool_mut("lock", pool)?
            .lock(&caller)
            .map_err(|e| rejected("lock", pool, e))?;
        log_transition("lock", pool, &caller, transition);
        Ok(transition)
    }

    /// Releases the lock switch.  Repeating it is a no-op success.
    ///
    /// # Errors
    ///
    /// As [`lock`](Self::lock).
    pub fn unlock(&mut self, pool: &Address, caller: Address) -> Result<Transition> {
        let transition = self
            .pool_mut("unlock", pool)?
            .unlock(&caller)
            .map_err(|e| rejected("unlock", pool, e))?;
        log_transition("unlock", pool, &caller, transition);
        Ok(transition)
    }

    /// Changes the swap fee.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown pool.
    /// - [`AmmError::Unauthorized`] unless `caller` is the authority.
    /// - [`AmmError::InvalidFee`] for `fee_bps >= 10_000`.
    pub fn set_fee(&mut self, pool: &Address, fee_bps: u16, caller: Address) -> Result<()> {
        let previous = self
            .pool_mut("set_fee", pool)?
            .set_fee(&caller, fee_bps)
            .map_err(|e| rejected("set_fee", pool, e))?;
        info!(pool = %pool, from = %previous, to = fee_bps, "fee changed");
        Ok(())
    }

    /// Hands the authority to `authority`, or renounces it with `None`,
    /// which makes fee and authority permanently immutable.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown pool.
    /// - [`AmmError::Unauthorized`] unless `caller` is the authority.
    pub fn set_authority(
        &mut self,
        pool: &Address,
        authority: Option<Address>,
        caller: Address,
    ) -> Result<()> {
        self.pool_mut("set_authority", pool)?
            .set_authority(&caller, authority)
            .map_err(|e| rejected("set_authority", pool, e))?;
        info!(
            pool = %pool,
            authority = ?authority,
            immutable = authority.is_none(),
            "authority changed"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Returns the pool at `address`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if there is none.
    pub fn pool(&self, address: &Address) -> Result<&Pool> {
        self.pools
            .get(address)
            .ok_or(AmmError::PoolNotFound(*address))
    }

    /// Returns a copy of the pool's config record.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if there is none.
    pub fn config(&self, pool: &Address) -> Result<PoolConfig> {
        self.pool(pool).map(|p| *p.config())
    }

    /// Returns `(reserve_x, reserve_y)`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if there is none.
    pub fn reserves(&self, pool: &Address) -> Result<(u64, u64)> {
        self.pool(pool).map(Pool::reserves)
    }

    /// Returns `owner`'s LP balance in `pool`.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if there is none.
    pub fn lp_balance(&self, pool: &Address, owner: &Address) -> Result<u64> {
        self.pool(pool).map(|p| p.lp_balance(owner))
    }

    /// Prices a swap without executing it.
    ///
    /// # Errors
    ///
    /// As [`Pool::quote_swap`], or [`AmmError::PoolNotFound`].
    pub fn quote_swap(
        &self,
        pool: &Address,
        direction: SwapDirection,
        amount_in: u64,
    ) -> Result<SwapQuote> {
        self.pool(pool)?.quote_swap(direction, amount_in)
    }

    /// Prices a deposit without executing it.
    ///
    /// # Errors
    ///
    /// As [`Pool::quote_deposit`], or [`AmmError::PoolNotFound`].
    pub fn quote_deposit(&self, pool: &Address, request: &DepositRequest) -> Result<DepositQuote> {
        let quote = self.pool(pool)?.quote_deposit(request)?;
        debug!(pool = %pool, ?quote, "deposit quoted");
        Ok(quote)
    }

    /// Prices a withdrawal without executing it.
    ///
    /// # Errors
    ///
    /// As [`Pool::quote_withdraw`], or [`AmmError::PoolNotFound`].
    pub fn quote_withdraw(
        &self,
        pool: &Address,
        request: &WithdrawRequest,
    ) -> Result<WithdrawQuote> {
        let quote = self.pool(pool)?.quote_withdraw(request)?;
        debug!(pool = %pool, ?quote, "withdraw quoted");
        Ok(quote)
    }

    /// Marginal price of `base` in units of the other asset.
    ///
    /// # Errors
    ///
    /// As [`Pool::spot_price`], or [`AmmError::PoolNotFound`].
    pub fn spot_price(&self, pool: &Address, base: Side) -> Result<Price> {
        self.pool(pool)?.spot_price(base)
    }

    /// Reserve ratio of `base` in deterministic fixed point.
    ///
    /// # Errors
    ///
    /// As [`Pool::fixed_spot_price`], or [`AmmError::PoolNotFound`].
    #[cfg(feature = "fixed-point")]
    pub fn fixed_spot_price(&self, pool: &Address, base: Side) -> Result<fixed::types::I80F48> {
        self.pool(pool)?.fixed_spot_price(base)
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn pool_mut(&mut self, op: &'static str, address: &Address) -> Result<&mut Pool> {
        self.pools
            .get_mut(address)
            .ok_or_else(|| rejected(op, address, AmmError::PoolNotFound(*address)))
    }

    fn pool_for_keys(&mut self, op: &'static str, keys: &PoolKeys) -> Result<&mut Pool> {
        let address = keys.config();
        let pool = self.pool_mut(op, &address)?;
        pool.verify_keys(keys)
            .map_err(|e| rejected(op, &address, e))?;
        Ok(pool)
    }
}

fn log_transition(op: &'static str, pool: &Address, caller: &Address, transition: Transition) {
    match transition {
        Transition::Changed => info!(op, pool = %pool, caller = %caller, "lock switch flipped"),
        Transition::Unchanged => {
            debug!(op, pool = %pool, caller = %caller, "lock switch already in requested state");
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

    const PROGRAM: u8 = 7;
    const ADMIN: u8 = 9;

    fn engine_with_pool(seed: u64) -> (AmmEngine, PoolKeys) {
        let mut engine = AmmEngine::new(addr(PROGRAM));
        let Ok(params) = InitializeParams::new(seed, 30, None, addr(ADMIN), addr(1), addr(2))
        else {
            panic!("valid params");
        };
        let Ok(_) = engine.initialize(&params) else {
            panic!("fresh pool");
        };
        let Ok(keys) = PoolKeys::derive(addr(PROGRAM), seed, addr(1), addr(2)) else {
            panic!("distinct mints");
        };
        (engine, keys)
    }

    #[test]
    fn initialize_registers_pool() {
        let (engine, keys) = engine_with_pool(0);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.pool_address(0), keys.config());
        let Ok(cfg) = engine.config(&keys.config()) else {
            panic!("pool exists");
        };
        assert_eq!(cfg.lp_supply(), 0);
        assert!(!cfg.is_locked());
    }

    #[test]
    fn duplicate_seed_rejected() {
        let (mut engine, keys) = engine_with_pool(0);
        let Ok(params) = InitializeParams::new(0, 10, None, addr(ADMIN), addr(3), addr(4)) else {
            panic!("valid params");
        };
        assert_eq!(
            engine.initialize(&params),
            Err(AmmError::PoolAlreadyExists(keys.config()))
        );
    }

    #[test]
    fn unknown_pool() {
        let mut engine = AmmEngine::new(addr(PROGRAM));
        let missing = engine.pool_address(5);
        assert_eq!(
            engine.lock(&missing, addr(ADMIN)),
            Err(AmmError::PoolNotFound(missing))
        );
        assert!(engine.reserves(&missing).is_err());
    }

    #[test]
    fn keys_from_another_program_rejected() {
        let (mut engine, _) = engine_with_pool(0);
        let Ok(foreign) = PoolKeys::derive(addr(99), 0, addr(1), addr(2)) else {
            panic!("distinct mints");
        };
        let Ok(req) = DepositRequest::new(0, 1_000, 1_000) else {
            panic!("valid request");
        };
        // The foreign config address is not a pool here at all.
        assert!(matches!(
            engine.deposit(&foreign, &req, addr(ADMIN)),
            Err(AmmError::PoolNotFound(_))
        ));
    }

    #[test]
    fn quotes_do_not_mutate() {
        let (mut engine, keys) = engine_with_pool(0);
        let Ok(req) = DepositRequest::new(0, 1_000, 1_000) else {
            panic!("valid request");
        };
        let Ok(quote) = engine.quote_deposit(&keys.config(), &req) else {
            panic!("quote");
        };
        assert_eq!(quote.lp_minted, 1_000);
        assert_eq!(engine.reserves(&keys.config()), Ok((0, 0)));

        let Ok(_) = engine.deposit(&keys, &req, addr(ADMIN)) else {
            panic!("deposit");
        };
        let Ok(swap) = engine.quote_swap(&keys.config(), SwapDirection::XToY, 100) else {
            panic!("quote");
        };
        assert_eq!(swap.amount_out, 90);
        assert_eq!(engine.reserves(&keys.config()), Ok((1_000, 1_000)));
    }

    #[test]
    fn lock_transitions_reported() {
        let (mut engine, keys) = engine_with_pool(0);
        let pool = keys.config();
        assert_eq!(engine.lock(&pool, addr(ADMIN)), Ok(Transition::Changed));
        assert_eq!(engine.lock(&pool, addr(ADMIN)), Ok(Transition::Unchanged));
        assert_eq!(engine.unlock(&pool, addr(ADMIN)), Ok(Transition::Changed));
    }
}
