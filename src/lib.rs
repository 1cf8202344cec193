//! # Hybrid AMM
//!
//! Two-asset automated market maker engine with LP shares and a switchable
//! pricing curve.
//!
//! Each pool holds two reserve assets in vaults at deterministic addresses,
//! issues fungible LP shares proportional to contributed liquidity, and
//! prices swaps with either:
//!
//! - **Constant Product** (Uniswap v2 style), always available
//! - **Hybrid / StableSwap** (Curve style), `hybrid` feature
//!
//! Every value-moving operation is atomic: it either commits all of its
//! balance changes or returns an error and leaves the pool untouched.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `hybrid` | yes | StableSwap curve for like-valued pairs |
//! | `fixed-point` | no | `I80F48` spot-price reads |
//! | `serde` | no | `Serialize`/`Deserialize` on value types |
//!
//! # Quick Start
//!
//! ```toml
//! [dependencies]
//! hybrid-amm = "0.1"
//! ```
//!
//! ## Create a pool, add liquidity and swap
//!
//! ```rust
//! use hybrid_amm::prelude::*;
//!
//! let program = Address::from_bytes([7u8; 32]);
//! let admin = Address::from_bytes([9u8; 32]);
//! let usdc = Address::from_bytes([1u8; 32]);
//! let usdt = Address::from_bytes([2u8; 32]);
//!
//! // 1. Initialize pool 0 at 0.30% with no authority (fee is frozen).
//! let mut engine = AmmEngine::new(program);
//! let params = InitializeParams::new(0, 30, None, admin, usdc, usdt).expect("valid params");
//! engine.initialize(&params).expect("fresh pool");
//!
//! // 2. Every request carries the pool's derived keys.
//! let keys = PoolKeys::derive(program, 0, usdc, usdt).expect("distinct mints");
//!
//! // 3. First deposit sets the price and mints sqrt(x * y) shares.
//! let deposit = DepositRequest::new(0, 1_000, 1_000).expect("non-zero");
//! let minted = engine.deposit(&keys, &deposit, admin).expect("bootstrap");
//! assert_eq!(minted.lp_minted, 1_000);
//!
//! // 4. Swap 100 X for at least 90 Y.
//! let swap = SwapRequest::new(SwapDirection::XToY, 100, 90).expect("non-zero");
//! let quote = engine.swap(&keys, &swap, admin).expect("swap");
//! assert_eq!((quote.fee, quote.amount_out), (1, 90));
//! assert_eq!(engine.reserves(&keys.config()), Ok((1_100, 910)));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  InitializeParams, PoolKeys, *Request
//! └──────┬──────┘
//!        │ initialize / deposit / withdraw / swap / lock / ...
//!        ▼
//! ┌─────────────┐
//! │  AmmEngine   │  pool lookup, key verification, logging
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │    Pool      │  lock gate, quote, slippage, stage, commit
//! └──────┬──────┘
//!        │ SwapCurve (CurveBox enum dispatch)
//!        ▼
//! ┌─────────────┐
//! │   Curves     │  ConstantProduct, StableSwap, liquidity math
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ Math/Domain  │  checked u128 math, Address, BasisPoints, quotes
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Address`](domain::Address), [`BasisPoints`](domain::BasisPoints), requests and quotes |
//! | [`math`] | Checked arithmetic, explicit rounding, integer square root |
//! | [`config`] | [`CurveConfig`](config::CurveConfig) and [`InitializeParams`](config::InitializeParams) |
//! | [`traits`] | [`SwapCurve`](traits::SwapCurve) and [`FromConfig`](traits::FromConfig) |
//! | [`curve`] | Pricing regimes, [`CurveBox`](curve::CurveBox) dispatch, liquidity quotes |
//! | [`derivation`] | Deterministic addresses and [`PoolKeys`](derivation::PoolKeys) |
//! | [`pool`] | One pool's state: config record, vaults, LP ledger, lock switch |
//! | [`engine`] | [`AmmEngine`](engine::AmmEngine), the operations callers invoke |
//! | [`error`] | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod curve;
pub mod derivation;
pub mod domain;
pub mod engine;
pub mod error;
pub mod math;
pub mod pool;
pub mod prelude;
pub mod traits;
