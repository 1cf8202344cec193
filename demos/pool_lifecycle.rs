//! Full pool lifecycle on both pricing regimes.
//!
//! Initializes a constant-product pool and a hybrid pool over the same
//! pair, bootstraps both, runs the same swap through each, exercises the
//! lock switch and the fee authority, then withdraws everything.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=debug cargo run --example pool_lifecycle
//! ```

use hybrid_amm::config::{CurveConfig, InitializeParams};
use hybrid_amm::derivation::PoolKeys;
use hybrid_amm::domain::{
    Address, DepositRequest, Side, SwapDirection, SwapRequest, WithdrawRequest,
};
use hybrid_amm::engine::AmmEngine;
use hybrid_amm::error::AmmError;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Hybrid AMM pool lifecycle ===\n");

    // ── 1. Principals and assets ────────────────────────────────────────
    let program = Address::from_bytes([7u8; 32]);
    let admin = Address::from_bytes([9u8; 32]);
    let authority = Address::from_bytes([10u8; 32]);
    let lp = Address::from_bytes([20u8; 32]);
    let trader = Address::from_bytes([21u8; 32]);
    let usdc = Address::from_bytes([1u8; 32]);
    let usdt = Address::from_bytes([2u8; 32]);

    println!("program: {program}");
    println!("mint X:  {usdc}");
    println!("mint Y:  {usdt}\n");

    // ── 2. Two pools, one per regime ────────────────────────────────────
    let mut engine = AmmEngine::new(program);
    let cp = InitializeParams::new(0, 30, Some(authority), admin, usdc, usdt)?;
    let hybrid = InitializeParams::new(1, 4, Some(authority), admin, usdc, usdt)?
        .with_curve(CurveConfig::hybrid(200)?);

    for params in [cp, hybrid] {
        let config = engine.initialize(&params)?;
        println!(
            "pool {} ({}, fee {})",
            config.address(),
            config.curve().name(),
            config.fee()
        );
    }
    println!();

    // ── 3. Bootstrap and trade ──────────────────────────────────────────
    let bootstrap = DepositRequest::new(0, 1_000_000, 1_000_000)?;
    let swap = SwapRequest::new(SwapDirection::XToY, 50_000, 1)?;

    for seed in [0u64, 1] {
        let keys = PoolKeys::derive(program, seed, usdc, usdt)?;
        let minted = engine.deposit(&keys, &bootstrap, lp)?;
        let quote = engine.swap(&keys, &swap, trader)?;
        let (x, y) = engine.reserves(&keys.config())?;
        let price = engine.spot_price(&keys.config(), Side::X)?;
        println!("seed {seed}: minted {} LP", minted.lp_minted);
        println!("  {swap} -> {quote}");
        println!("  reserves ({x}, {y}), price of X = {:.6}", price.get());
    }
    println!();

    // ── 4. Lock switch and authority ────────────────────────────────────
    let keys = PoolKeys::derive(program, 0, usdc, usdt)?;
    let pool = keys.config();

    engine.lock(&pool, authority)?;
    match engine.swap(&keys, &swap, trader) {
        Err(AmmError::PoolLocked) => println!("swap while locked: rejected"),
        other => println!("swap while locked: unexpected {other:?}"),
    }
    engine.unlock(&pool, authority)?;

    engine.set_fee(&pool, 100, authority)?;
    engine.set_authority(&pool, None, authority)?;
    match engine.set_fee(&pool, 5, authority) {
        Err(AmmError::Unauthorized) => println!("fee change after renounce: rejected"),
        other => println!("fee change after renounce: unexpected {other:?}"),
    }
    println!();

    // ── 5. Withdraw everything ──────────────────────────────────────────
    for seed in [0u64, 1] {
        let keys = PoolKeys::derive(program, seed, usdc, usdt)?;
        let held = engine.lp_balance(&keys.config(), &lp)?;
        let out = engine.withdraw(&keys, &WithdrawRequest::new(held, 0, 0)?, lp)?;
        println!(
            "seed {seed}: burned {} LP for ({}, {})",
            out.lp_burned, out.amount_x, out.amount_y
        );
    }

    Ok(())
}
