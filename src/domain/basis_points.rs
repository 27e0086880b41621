//! Basis-point representation for tax rates.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::TokenError;

/// Maximum value that represents 100%.
const MAX_BPS: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// All `u32` values are technically valid, but values above 10 000 are
/// nonsensical as percentages. The tax-schedule ceiling is enforced
/// separately by [`TaxSchedule`](super::TaxSchedule); this type only knows
/// about the 100% bound.
///
/// # Examples
///
/// ```
/// use remora_token::domain::BasisPoints;
///
/// let bp = BasisPoints::new(200); // 2%
/// assert_eq!(bp.get(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `true` if the rate is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checked addition of two rates. Returns `None` on overflow.
    #[must_use]
    pub const fn checked_add(&self, other: &Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `amount * (self / 10_000)` with explicit rounding.
    ///
    /// Fee arithmetic in the ledger always uses [`Rounding::Down`]; tiny
    /// amounts at low rates legitimately floor to zero.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Overflow`] if the intermediate multiplication
    /// overflows.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        let bps = self.0 as u128;
        let raw = amount.get();

        let product = match raw.checked_mul(bps) {
            Some(v) => v,
            None => return Err(TokenError::Overflow("basis points apply overflow")),
        };

        let divisor = MAX_BPS as u128;

        match rounding {
            Rounding::Down => Ok(Amount::new(product / divisor)),
            Rounding::Up => {
                let q = product / divisor;
                let r = product % divisor;
                if r != 0 {
                    Ok(Amount::new(q + 1))
                } else {
                    Ok(Amount::new(q))
                }
            }
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
