//! Caller-supplied bounds re-checked against a fresh quote.

use crate::error::{AmmError, Result};

/// Fails unless `actual >= minimum`.
///
/// # Errors
///
/// Returns [`AmmError::SlippageExceeded`] with `what` as context.
pub const fn at_least(actual: u64, minimum: u64, what: &'static str) -> Result<()> {
    if actual < minimum {
        return Err(AmmError::SlippageExceeded(what));
    }
    Ok(())
}

/// Fails unless `actual <= maximum`.
///
/// # Errors
///
/// Returns [`AmmError::SlippageExceeded`] with `what` as context.
pub const fn at_most(actual: u64, maximum: u64, what: &'static str) -> Result<()> {
    if actual > maximum {
        return Err(AmmError::SlippageExceeded(what));
    }
    Ok(())
}
