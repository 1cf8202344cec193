//! Explicit rounding direction for integer division.

/// Direction in which an inexact integer division is rounded.
///
/// Every division in the engine names its direction, and the direction is
/// always the one that favours the pool: amounts leaving the pool round
/// [`Down`](Rounding::Down), amounts the caller must pay round
/// [`Up`](Rounding::Up).
///
/// # Examples
///
/// ```
/// use hybrid_amm::domain::Rounding;
///
/// assert_eq!(Rounding::for_outflow(), Rounding::Down);
/// assert_eq!(Rounding::for_inflow(), Rounding::Up);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Rounding for amounts the pool pays out: down.
    #[must_use]
    pub const fn for_outflow() -> Self {
        Self::Down
    }

    /// Rounding for amounts the caller pays in: up.
    #[must_use]
    pub const fn for_inflow() -> Self {
        Self::Up
    }

    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }
}
