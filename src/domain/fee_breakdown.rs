//! Outcome of a fee split.

use core::fmt;

use super::Amount;
use crate::error::TokenError;

/// The result of splitting a gross transfer amount into its fee slices.
///
/// # Invariants
///
/// - `net + reflection + liquidity + burn + marketing == gross` — the split
///   is exhaustive; no unit is created or lost.
/// - Each slice is individually `<= gross`.
///
/// Produced by the fee engine and consumed by the ledger; constructing one
/// by hand goes through the validating [`new`](Self::new).
///
/// # Examples
///
/// ```
/// use remora_token::domain::{Amount, FeeBreakdown};
///
/// let split = FeeBreakdown::new(
///     Amount::new(100),
///     Amount::new(2),
///     Amount::ZERO,
///     Amount::ZERO,
///     Amount::ZERO,
/// ).expect("consistent split");
/// assert_eq!(split.net(), Amount::new(98));
/// assert_eq!(split.total_fees(), Amount::new(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeeBreakdown {
    gross: Amount,
    reflection: Amount,
    liquidity: Amount,
    burn: Amount,
    marketing: Amount,
    net: Amount,
}

impl FeeBreakdown {
    /// Creates a validated breakdown, deriving `net` from the slices.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Underflow`] if the fee slices sum past the
    /// gross amount.
    pub fn new(
        gross: Amount,
        reflection: Amount,
        liquidity: Amount,
        burn: Amount,
        marketing: Amount,
    ) -> crate::error::Result<Self> {
        let fees = reflection
            .checked_add(&liquidity)
            .and_then(|t| t.checked_add(&burn))
            .and_then(|t| t.checked_add(&marketing))
            .ok_or(TokenError::Overflow("fee slice sum overflow"))?;
        let net = gross
            .checked_sub(&fees)
            .ok_or(TokenError::Underflow("fees exceed gross amount"))?;
        Ok(Self {
            gross,
            reflection,
            liquidity,
            burn,
            marketing,
            net,
        })
    }

    /// Creates a fee-free breakdown: `net == gross`, all slices zero.
    #[must_use]
    pub const fn fee_free(gross: Amount) -> Self {
        Self {
            gross,
            reflection: Amount::ZERO,
            liquidity: Amount::ZERO,
            burn: Amount::ZERO,
            marketing: Amount::ZERO,
            net: gross,
        }
    }

    /// Returns the gross amount the split was computed from.
    #[must_use]
    pub const fn gross(&self) -> Amount {
        self.gross
    }

    /// Returns the reflection slice (absorbed into the global rate).
    #[must_use]
    pub const fn reflection(&self) -> Amount {
        self.reflection
    }

    /// Returns the liquidity slice (accrued in the contract balance).
    #[must_use]
    pub const fn liquidity(&self) -> Amount {
        self.liquidity
    }

    /// Returns the burn slice (removed from total supply).
    #[must_use]
    pub const fn burn(&self) -> Amount {
        self.burn
    }

    /// Returns the marketing slice (accrued for the marketing wallet).
    #[must_use]
    pub const fn marketing(&self) -> Amount {
        self.marketing
    }

    /// Returns the amount credited to the recipient.
    #[must_use]
    pub const fn net(&self) -> Amount {
        self.net
    }

    /// Returns the sum of the four fee slices.
    ///
    /// Cannot overflow: the constructor proved `fees <= gross`.
    #[must_use]
    pub const fn total_fees(&self) -> Amount {
        Amount::new(
            self.reflection.get() + self.liquidity.get() + self.burn.get() + self.marketing.get(),
        )
    }

    /// Returns `true` if every slice is zero (a pure transfer).
    #[must_use]
    pub const fn is_fee_free(&self) -> bool {
        self.total_fees().is_zero()
    }
}

impl fmt::Display for FeeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "split(gross={}, r={}, l={}, b={}, m={}, net={})",
            self.gross, self.reflection, self.liquidity, self.burn, self.marketing, self.net
        )
    }
}
