//! Amplified two-asset invariant for correlated pairs (Curve style).
//!
//! # Invariant (n = 2)
//!
//! ```text
//! Ann · (x + y) + D = Ann · D + D³ / (4 · x · y),    Ann = A · n
//! ```
//!
//! `A` blends between constant sum (`A → ∞`, flat 1:1 pricing near peg)
//! and constant product (`A → 0`).  `D` equals `x + y` when the pool is
//! balanced.
//!
//! # Swap Algorithm
//!
//! 1. Compute `D` from the current reserves and round it up to the nearest
//!    integer the reserves are known not to exceed.
//! 2. `x_new = reserve_in + amount_in_net`.
//! 3. Solve for `y_new` on that `D` by Newton's method and start from
//!    `amount_out = reserve_out − y_new − 1`.
//! 4. Check the post-swap reserves against the invariant exactly and lower
//!    `amount_out` until they sit on or above the starting curve.
//!
//! Step 4 makes the true invariant non-decreasing across every swap, so a
//! round trip can never return more than it put in, even at zero fee.
//!
//! Newton steps and the exact check run on 256-bit intermediates, so any
//! pair of `u64` reserves is accepted at every amplification up to
//! [`MAX_AMPLIFICATION`].

use core::cmp::Ordering;

use primitive_types::U256;

use crate::config::{CurveConfig, MAX_AMPLIFICATION, MIN_AMPLIFICATION};
use crate::domain::Price;
use crate::error::{AmmError, Result};
use crate::math::{to_u64, CheckedArithmetic};
use crate::traits::{FromConfig, SwapCurve};

/// Number of assets in the pool.
const N: u64 = 2;

/// Newton iteration cap before reporting non-convergence.
const MAX_ITERATIONS: u32 = 256;

/// Two consecutive iterates this close are considered converged.
const CONVERGENCE_THRESHOLD: u64 = 1;

fn mul(a: U256, b: U256) -> Result<U256> {
    a.checked_mul(b)
        .ok_or(AmmError::ArithmeticOverflow("stable swap product"))
}

fn add(a: U256, b: U256) -> Result<U256> {
    a.checked_add(b)
        .ok_or(AmmError::ArithmeticOverflow("stable swap sum"))
}

fn sub(a: U256, b: U256) -> Result<U256> {
    a.checked_sub(b)
        .ok_or(AmmError::ArithmeticOverflow("stable swap difference"))
}

fn div(a: U256, b: U256) -> Result<U256> {
    a.checked_div(b).ok_or(AmmError::DivisionByZero)
}

fn narrow(v: U256) -> Result<u128> {
    u128::try_from(v).map_err(|_| AmmError::ArithmeticOverflow("stable swap result"))
}

fn ann(amplification: u32) -> U256 {
    U256::from(amplification) * U256::from(N)
}

/// Compares `D` against the true invariant of `(x, y)` without division.
///
/// ```text
/// 4xy · (Ann · (x + y) + D)   vs   4xy · Ann · D + D³
/// ```
///
/// `Greater` means the reserves sit above the curve for `D` (their true
/// invariant exceeds `D`), `Equal` means exactly on it.
fn position(x: U256, y: U256, d: U256, ann: U256) -> Result<Ordering> {
    let xy4 = mul(mul(x, y)?, U256::from(4u8))?;
    let lhs = mul(xy4, add(mul(ann, add(x, y)?)?, d)?)?;
    let rhs = add(mul(mul(xy4, ann)?, d)?, mul(mul(d, d)?, d)?)?;
    Ok(lhs.cmp(&rhs))
}

/// Newton estimate of `D`, within a few units of the true value.
///
/// ```text
/// D_P    = D³ / (4 · x · y)
/// D_next = (Ann · S + 2 · D_P) · D / ((Ann − 1) · D + 3 · D_P)
/// ```
fn estimate_d(x: U256, y: U256, ann: U256) -> Result<U256> {
    let n = U256::from(N);
    let s = add(x, y)?;
    let two_x = mul(n, x)?;
    let two_y = mul(n, y)?;
    let ann_s = mul(ann, s)?;

    let mut d = s;
    for _ in 0..MAX_ITERATIONS {
        let d_p = div(mul(div(mul(d, d)?, two_x)?, d)?, two_y)?;

        let previous = d;
        let numerator = mul(add(ann_s, mul(n, d_p)?)?, d)?;
        let denominator = add(
            mul(sub(ann, U256::one())?, d)?,
            mul(n + U256::one(), d_p)?,
        )?;
        d = div(numerator, denominator)?;

        let delta = if d > previous { d - previous } else { previous - d };
        if delta <= U256::from(CONVERGENCE_THRESHOLD) {
            return Ok(d);
        }
    }

    Err(AmmError::NewtonRaphsonNonConvergence(
        "invariant D did not converge",
    ))
}

/// Exact `floor(D)` for `(x, y)`, and whether `D` is an integer.
fn solve_d(x: U256, y: U256, ann: U256) -> Result<(U256, bool)> {
    let mut d = estimate_d(x, y, ann)?;
    for _ in 0..MAX_ITERATIONS {
        if position(x, y, d, ann)? == Ordering::Less {
            d = sub(d, U256::one())?;
            continue;
        }
        let next = add(d, U256::one())?;
        if position(x, y, next, ann)? != Ordering::Less {
            d = next;
            continue;
        }
        return Ok((d, position(x, y, d, ann)? == Ordering::Equal));
    }

    Err(AmmError::NewtonRaphsonNonConvergence(
        "invariant D did not settle",
    ))
}

/// Computes `floor(D)` for reserves `x`, `y`.
///
/// Newton's method gives an estimate; the exact comparison in
/// [`position`] then walks it to the largest integer the reserves reach.
/// The result is therefore monotone in the true invariant.
///
/// # Errors
///
/// - [`AmmError::InsufficientLiquidity`] if either reserve is zero.
/// - [`AmmError::ArithmeticOverflow`] if `D` does not fit in `u128`.
/// - [`AmmError::NewtonRaphsonNonConvergence`] after [`MAX_ITERATIONS`].
pub(crate) fn compute_d(x: u128, y: u128, amplification: u32) -> Result<u128> {
    if x == 0 || y == 0 {
        return Err(AmmError::InsufficientLiquidity("empty reserve"));
    }
    let (d, _) = solve_d(U256::from(x), U256::from(y), ann(amplification))?;
    narrow(d)
}

/// Solves the invariant for the output-side reserve given `x_new` and `D`.
///
/// ```text
/// c      = D³ / (4 · x_new · Ann)
/// b      = x_new + D / Ann
/// y_next = (y² + c) / (2y + b − D)
/// ```
///
/// # Errors
///
/// - [`AmmError::ArithmeticOverflow`] if the denominator would go
///   negative or the result does not fit in `u128`.
/// - [`AmmError::NewtonRaphsonNonConvergence`] after [`MAX_ITERATIONS`].
pub(crate) fn compute_y(x_new: u128, d: u128, amplification: u32) -> Result<u128> {
    let n = U256::from(N);
    let ann = ann(amplification);
    let (x_new, d) = (U256::from(x_new), U256::from(d));
    let c = div(mul(div(mul(d, d)?, mul(n, x_new)?)?, d)?, mul(n, ann)?)?;
    let b = add(x_new, div(d, ann)?)?;

    let mut y = d;
    for _ in 0..MAX_ITERATIONS {
        let previous = y;
        let numerator = add(mul(y, y)?, c)?;
        let denominator = sub(add(mul(n, y)?, b)?, d)?;
        y = div(numerator, denominator)?;

        let delta = if y > previous { y - previous } else { previous - y };
        if delta <= U256::from(CONVERGENCE_THRESHOLD) {
            return narrow(y);
        }
    }

    Err(AmmError::NewtonRaphsonNonConvergence(
        "output reserve did not converge",
    ))
}

/// The hybrid regime: StableSwap with amplification `A`.
///
/// # Examples
///
/// ```
/// use hybrid_amm::curve::{ConstantProduct, StableSwap};
/// use hybrid_amm::traits::SwapCurve;
///
/// let stable = StableSwap::new(100).expect("valid amplification");
/// let hybrid_out = stable.swap_output(1_000_000, 1_000_000, 99_700).expect("quote");
/// let cp_out = ConstantProduct.swap_output(1_000_000, 1_000_000, 99_700).expect("quote");
/// assert!(hybrid_out > cp_out);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StableSwap {
    amplification: u32,
}

impl StableSwap {
    /// Creates the curve.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidCurve`] if `amplification` is outside
    /// `1..=10_000`.
    pub const fn new(amplification: u32) -> Result<Self> {
        if amplification < MIN_AMPLIFICATION || amplification > MAX_AMPLIFICATION {
            return Err(AmmError::InvalidCurve("amplification out of range"));
        }
        Ok(Self { amplification })
    }

    /// Returns `A`.
    #[must_use]
    pub const fn amplification(&self) -> u32 {
        self.amplification
    }

    /// Computes the invariant `D` for the given reserves.
    ///
    /// # Errors
    ///
    /// Same as the swap path; see [`SwapCurve::swap_output`].
    pub fn invariant(&self, reserve_x: u64, reserve_y: u64) -> Result<u128> {
        compute_d(
            u128::from(reserve_x),
            u128::from(reserve_y),
            self.amplification,
        )
    }
}

impl FromConfig<CurveConfig> for StableSwap {
    fn from_config(config: &CurveConfig) -> Result<Self> {
        match config {
            CurveConfig::Hybrid { amplification } => Self::new(*amplification),
            CurveConfig::ConstantProduct => Err(AmmError::InvalidCurve(
                "stable swap requires a hybrid curve config",
            )),
        }
    }
}

impl SwapCurve for StableSwap {
    fn swap_output(&self, reserve_in: u64, reserve_out: u64, amount_in_net: u64) -> Result<u64> {
        if reserve_in == 0 || reserve_out == 0 {
            return Err(AmmError::InsufficientLiquidity("empty reserve"));
        }
        let ann = ann(self.amplification);
        let (rin, rout) = (U256::from(reserve_in), U256::from(reserve_out));

        // The post-swap reserves must reach ceil(D) of the current ones.
        let (floor_d, exact) = solve_d(rin, rout, ann)?;
        let target = if exact {
            floor_d
        } else {
            add(floor_d, U256::one())?
        };

        let x_new = u128::from(reserve_in).safe_add(u128::from(amount_in_net))?;
        let y_new = compute_y(x_new, narrow(target)?, self.amplification)?;

        // No room once the solver lands at or above the current reserve.
        let Some(mut out) = u128::from(reserve_out)
            .checked_sub(y_new)
            .and_then(|v| v.checked_sub(1))
        else {
            return Ok(0);
        };

        let x_new = U256::from(x_new);
        for _ in 0..MAX_ITERATIONS {
            if out == 0 {
                return Ok(0);
            }
            let y_after = sub(rout, U256::from(out))?;
            if position(x_new, y_after, target, ann)? != Ordering::Less {
                return to_u64(out);
            }
            out -= 1;
        }

        Err(AmmError::NewtonRaphsonNonConvergence(
            "swap output did not settle on the invariant",
        ))
    }

    fn spot_price(&self, reserve_base: u64, reserve_quote: u64) -> Result<Price> {
        // |dy/dx| from implicit differentiation of the invariant:
        //   (Ann + D³/(4x²y)) / (Ann + D³/(4xy²))
        let d = self.invariant(reserve_base, reserve_quote)?;

        #[allow(clippy::cast_precision_loss)]
        let (x, y, df) = (reserve_base as f64, reserve_quote as f64, d as f64);
        let ann = f64::from(self.amplification) * 2.0;
        let d_cubed = df * df * df;
        let dx = ann + d_cubed / (4.0 * x * x * y);
        let dy = ann + d_cubed / (4.0 * x * y * y);
        if dy == 0.0 {
            return Err(AmmError::DivisionByZero);
        }
        Price::new(dx / dy)
    }

    fn name(&self) -> &'static str {
        "hybrid"
    }
}
