//! The four-slice tax schedule applied to transfers.

use core::fmt;

use super::BasisPoints;
use crate::error::TokenError;

/// Ceiling on the combined tax rate: 1 500 bp = 15%.
pub const MAX_TOTAL_FEE_BP: u32 = 1_500;

/// The four configurable fee slices skimmed from every taxable transfer.
///
/// Each slice is an independent basis-point rate; the invariant is that
/// their sum never exceeds [`MAX_TOTAL_FEE_BP`]. A schedule is either built
/// through the validating [`new`](Self::new) constructor or is the all-zero
/// [`Default`], so the invariant holds for every reachable value.
///
/// # Examples
///
/// ```
/// use remora_token::domain::{BasisPoints, TaxSchedule};
///
/// let taxes = TaxSchedule::new(
///     BasisPoints::new(200), // 2% reflection
///     BasisPoints::new(1),
///     BasisPoints::new(2),
///     BasisPoints::new(3),
/// ).expect("under the ceiling");
/// assert_eq!(taxes.total().get(), 206);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaxSchedule {
    reflection: BasisPoints,
    liquidity: BasisPoints,
    burn: BasisPoints,
    marketing: BasisPoints,
}

impl TaxSchedule {
    /// Creates a validated schedule.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigInvalid`] if the four rates sum past
    /// [`MAX_TOTAL_FEE_BP`].
    pub fn new(
        reflection: BasisPoints,
        liquidity: BasisPoints,
        burn: BasisPoints,
        marketing: BasisPoints,
    ) -> crate::error::Result<Self> {
        let schedule = Self {
            reflection,
            liquidity,
            burn,
            marketing,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Validates the combined-rate ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigInvalid`] if the sum exceeds
    /// [`MAX_TOTAL_FEE_BP`].
    pub fn validate(&self) -> crate::error::Result<()> {
        let total = self
            .reflection
            .checked_add(&self.liquidity)
            .and_then(|t| t.checked_add(&self.burn))
            .and_then(|t| t.checked_add(&self.marketing))
            .ok_or(TokenError::ConfigInvalid("tax total overflows"))?;
        if total.get() > MAX_TOTAL_FEE_BP {
            return Err(TokenError::ConfigInvalid("tax too high"));
        }
        Ok(())
    }

    /// Returns the reflection (holder redistribution) rate.
    #[must_use]
    pub const fn reflection(&self) -> BasisPoints {
        self.reflection
    }

    /// Returns the liquidity accumulation rate.
    #[must_use]
    pub const fn liquidity(&self) -> BasisPoints {
        self.liquidity
    }

    /// Returns the burn rate.
    #[must_use]
    pub const fn burn(&self) -> BasisPoints {
        self.burn
    }

    /// Returns the marketing rate.
    #[must_use]
    pub const fn marketing(&self) -> BasisPoints {
        self.marketing
    }

    /// Returns the combined rate.
    ///
    /// Cannot overflow: the constructor bounds the sum by the ceiling.
    #[must_use]
    pub const fn total(&self) -> BasisPoints {
        BasisPoints::new(
            self.reflection.get() + self.liquidity.get() + self.burn.get() + self.marketing.get(),
        )
    }

    /// Returns `true` if all four rates are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.total().get() == 0
    }
}

impl fmt::Display for TaxSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "taxes(reflection={}, liquidity={}, burn={}, marketing={})",
            self.reflection, self.liquidity, self.burn, self.marketing
        )
    }
}
