//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Invariant preservation**: constant-product `k` and hybrid `D` never
//!    decrease.
//! 2. **Swap reversibility**: round-trip X→Y→X returns ≤ input, fee or not.
//! 3. **Fee monotonicity**: larger input ⇒ larger or equal fee.
//! 4. **Liquidity conservation**: deposit then withdraw returns ≤ deposit.
//! 5. **Price movement direction**: selling X lowers the price of X.
//! 6. **Share accounting**: the LP ledger always sums to the LP supply.

use proptest::prelude::*;

use crate::config::{CurveConfig, InitializeParams};
use crate::domain::{
    Address, BasisPoints, DepositRequest, SwapDirection, SwapRequest, WithdrawRequest,
};
use crate::pool::Pool;
use crate::traits::SwapCurve;

use super::{
    quote_bootstrap, quote_deposit, quote_swap, quote_withdraw, ConstantProduct, CurveBox,
};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn hybrid(amp: u32) -> CurveBox {
    let Ok(config) = CurveConfig::hybrid(amp) else {
        panic!("valid amplification");
    };
    let Ok(curve) = <CurveBox as crate::traits::FromConfig<CurveConfig>>::from_config(&config)
    else {
        panic!("hybrid compiled in");
    };
    curve
}

fn addr(b: u8) -> Address {
    Address::from_bytes([b; 32])
}

fn empty_pool() -> Pool {
    let Ok(params) = InitializeParams::new(0, 30, None, addr(9), addr(1), addr(2)) else {
        panic!("valid params");
    };
    let Ok(pool) = Pool::create(addr(7), &params) else {
        panic!("valid pool");
    };
    pool
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves wide enough to exercise rounding at both ends.
fn reserve_strategy() -> impl Strategy<Value = u64> {
    1u64..=1_000_000_000_000u64
}

/// Balanced-ish reserves for the hybrid regime, where deep imbalance makes
/// outputs round to zero.
fn hybrid_reserves() -> impl Strategy<Value = (u64, u64)> {
    (1_000_000u64..=1_000_000_000u64, 50u64..=200u64)
        .prop_map(|(x, pct)| (x, x.saturating_mul(pct) / 100))
}

/// Reserves up to 100:1 apart in either direction.
fn imbalanced_reserves() -> impl Strategy<Value = (u64, u64)> {
    (1_000u64..=10_000_000_000u64, 1u64..=100u64, any::<bool>()).prop_map(
        |(base, ratio, flip)| {
            let rich = base.saturating_mul(ratio);
            if flip {
                (rich, base)
            } else {
                (base, rich)
            }
        },
    )
}

/// Fees up to 10%.
fn fee_strategy() -> impl Strategy<Value = u16> {
    0u16..=1_000u16
}

/// One step of a random pool session: (kind, actor, amount).
fn op_strategy() -> impl Strategy<Value = (u8, u8, u64)> {
    (0u8..4u8, 0u8..3u8, 1u64..=1_000_000u64)
}

// ---------------------------------------------------------------------------
// Property 1: Invariant Preservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_constant_product_k_non_decreasing(
        rin in reserve_strategy(),
        rout in reserve_strategy(),
        amount in 1u64..=1_000_000_000_000u64,
        fee in fee_strategy(),
    ) {
        let Ok(quote) = quote_swap(&ConstantProduct, rin, rout, amount, BasisPoints::new(fee))
        else {
            return Ok(());
        };
        let k_before = u128::from(rin) * u128::from(rout);
        let k_after = (u128::from(rin) + u128::from(quote.amount_in))
            * u128::from(rout - quote.amount_out);
        prop_assert!(
            k_after >= k_before,
            "k decreased: before={} after={}",
            k_before, k_after
        );
    }

    #[test]
    #[cfg(feature = "hybrid")]
    fn prop_hybrid_d_non_decreasing(
        (rin, rout) in imbalanced_reserves(),
        amp in 1u32..=10_000u32,
        amount in 1u64..=10_000_000_000u64,
    ) {
        let Ok(curve) = super::StableSwap::new(amp) else {
            panic!("valid amplification");
        };
        let Ok(quote) = quote_swap(&curve, rin, rout, amount, BasisPoints::new(0)) else {
            return Ok(());
        };
        let Ok(d_before) = curve.invariant(rin, rout) else {
            return Ok(());
        };
        let Ok(d_after) = curve.invariant(rin + quote.amount_in, rout - quote.amount_out) else {
            panic!("post-swap reserves stay non-empty");
        };
        prop_assert!(
            d_after >= d_before,
            "D decreased: before={} after={} (A={})",
            d_before, d_after, amp
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Swap Reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_swap_reversibility_constant_product(
        rx in 10_000u64..=10_000_000_000u64,
        ry in 10_000u64..=10_000_000_000u64,
        amount in 1u64..=1_000_000u64,
        fee in fee_strategy(),
    ) {
        let fee = BasisPoints::new(fee);
        let Ok(there) = quote_swap(&ConstantProduct, rx, ry, amount, fee) else {
            return Ok(());
        };
        let (rx, ry) = (rx + there.amount_in, ry - there.amount_out);
        let Ok(back) = quote_swap(&ConstantProduct, ry, rx, there.amount_out, fee) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out <= amount,
            "round-trip should lose value: final={} > input={}",
            back.amount_out, amount
        );
    }

    #[test]
    #[cfg(feature = "hybrid")]
    fn prop_swap_reversibility_hybrid(
        (rx, ry) in hybrid_reserves(),
        amp in 1u32..=1_000u32,
        amount in 10_000u64..=1_000_000u64,
    ) {
        let curve = hybrid(amp);
        let fee = BasisPoints::new(30);
        let Ok(there) = quote_swap(&curve, rx, ry, amount, fee) else {
            return Ok(());
        };
        let (rx, ry) = (rx + there.amount_in, ry - there.amount_out);
        let Ok(back) = quote_swap(&curve, ry, rx, there.amount_out, fee) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out <= amount,
            "round-trip should lose value: final={} > input={}",
            back.amount_out, amount
        );
    }

    #[test]
    #[cfg(feature = "hybrid")]
    fn prop_swap_reversibility_hybrid_zero_fee(
        (rx, ry) in imbalanced_reserves(),
        amp in 1u32..=10_000u32,
        amount in 1u64..=10_000_000_000u64,
    ) {
        let curve = hybrid(amp);
        let fee = BasisPoints::new(0);
        let Ok(there) = quote_swap(&curve, rx, ry, amount, fee) else {
            return Ok(());
        };
        let (rx, ry) = (rx + there.amount_in, ry - there.amount_out);
        let Ok(back) = quote_swap(&curve, ry, rx, there.amount_out, fee) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out <= amount,
            "zero-fee round-trip profited: final={} > input={} (A={})",
            back.amount_out, amount, amp
        );
    }
}

// ---------------------------------------------------------------------------
// Property 3: Fee Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_fee_monotonic_in_input(
        small in 1u64..=1_000_000u64,
        extra in 0u64..=1_000_000u64,
        fee in fee_strategy(),
    ) {
        let (reserve_in, reserve_out) = (1_000_000_000u64, 1_000_000_000u64);
        let fee = BasisPoints::new(fee);
        let Ok(a) = quote_swap(&ConstantProduct, reserve_in, reserve_out, small, fee) else {
            return Ok(());
        };
        let Ok(b) = quote_swap(&ConstantProduct, reserve_in, reserve_out, small + extra, fee)
        else {
            return Ok(());
        };
        prop_assert!(b.fee >= a.fee);
        prop_assert!(b.amount_out >= a.amount_out);
        prop_assert_eq!(a.amount_in_net + a.fee, a.amount_in);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Liquidity Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_deposit_then_withdraw_never_profits(
        rx in reserve_strategy(),
        ry in reserve_strategy(),
        desired in 1u64..=1_000_000u64,
    ) {
        let Ok(supply) = quote_bootstrap(rx, ry) else {
            return Ok(());
        };
        let Ok((ax, ay)) = quote_deposit(rx, ry, supply, desired) else {
            return Ok(());
        };
        let (rx, ry, supply) = (rx + ax, ry + ay, supply + desired);
        let Ok((wx, wy)) = quote_withdraw(rx, ry, supply, desired) else {
            return Ok(());
        };
        prop_assert!(wx <= ax, "x: withdrew {} > deposited {}", wx, ax);
        prop_assert!(wy <= ay, "y: withdrew {} > deposited {}", wy, ay);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Price Movement Direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_selling_x_lowers_price_of_x(
        (rx, ry) in hybrid_reserves(),
        amount in 10_000u64..=1_000_000u64,
        use_hybrid in any::<bool>(),
    ) {
        let curve = if use_hybrid && cfg!(feature = "hybrid") {
            hybrid(100)
        } else {
            CurveBox::ConstantProduct(ConstantProduct)
        };
        let Ok(before) = curve.spot_price(rx, ry) else {
            return Ok(());
        };
        let Ok(quote) = quote_swap(&curve, rx, ry, amount, BasisPoints::new(30)) else {
            return Ok(());
        };
        let Ok(after) = curve.spot_price(rx + quote.amount_in, ry - quote.amount_out) else {
            return Ok(());
        };
        prop_assert!(
            after.get() <= before.get(),
            "price of X rose after selling X: {} -> {}",
            before.get(), after.get()
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: Share Accounting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ledger_sums_to_supply(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut pool = empty_pool();
        for (kind, actor, amount) in ops {
            let owner = addr(20 + actor);
            // Failed steps must leave the pool untouched.
            let snapshot = pool.clone();
            let outcome = match kind {
                0 => DepositRequest::new(0, amount, amount / 2 + 1)
                    .and_then(|req| pool.deposit(owner, &req).map(|_| ())),
                1 => DepositRequest::new(amount / 4 + 1, u64::MAX / 4, u64::MAX / 4)
                    .and_then(|req| pool.deposit(owner, &req).map(|_| ())),
                2 => {
                    let burn = amount.min(pool.lp_balance(&owner)).max(1);
                    WithdrawRequest::new(burn, 0, 0)
                        .and_then(|req| pool.withdraw(owner, &req).map(|_| ()))
                }
                _ => {
                    let direction = if actor % 2 == 0 {
                        SwapDirection::XToY
                    } else {
                        SwapDirection::YToX
                    };
                    SwapRequest::new(direction, amount, 0)
                        .and_then(|req| pool.swap(&req).map(|_| ()))
                }
            };
            if outcome.is_err() {
                prop_assert_eq!(&pool, &snapshot);
            }
            prop_assert_eq!(
                pool.shares().total(),
                u128::from(pool.config().lp_supply())
            );
            if pool.config().lp_supply() == 0 {
                prop_assert_eq!(pool.shares().holders(), 0);
            }
        }
    }
}
