//! Integer square root.

/// Floor of the square root of `n`, by Newton's method on integers.
///
/// Starts from a power of two at or above the true root, so the iterates
/// decrease monotonically and the first non-decreasing step marks the
/// floor.  Deterministic and exact for every `u128`.
///
/// # Examples
///
/// ```
/// use hybrid_amm::math::isqrt;
///
/// assert_eq!(isqrt(1_000_000), 1_000);
/// assert_eq!(isqrt(999_999), 999);
/// ```
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let bits = 128 - n.leading_zeros();
    let mut x: u128 = 1 << bits.div_ceil(2);
    loop {
        let next = (x + n / x) / 2;
        if next >= x {
            return x;
        }
        x = next;
    }
}
