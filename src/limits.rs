//! Transfer limit enforcement.
//!
//! Three ceilings apply to non-whitelisted transfers: a per-transaction
//! gross amount, a per-wallet recipient balance, and a per-sender daily
//! transaction count. The count check is check-then-commit: the
//! orchestrator validates the prospective counter while the transfer can
//! still fail, and commits it only after the balance mutation succeeds, so
//! rejected transfers never consume daily quota.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount, Day};
use crate::error::TokenError;

/// A sender's daily transaction counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCounter {
    day: Day,
    count: u32,
}

impl DailyCounter {
    /// Returns the day this counter was last advanced on.
    #[must_use]
    pub const fn day(&self) -> Day {
        self.day
    }

    /// Returns the number of counted transfers on that day.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

/// Per-sender daily counters plus the limit checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LimitEnforcer {
    counters: BTreeMap<Address, DailyCounter>,
}

impl LimitEnforcer {
    /// Creates an enforcer with no counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `from`'s transfer count for `day` (zero if the last counted
    /// transfer was on an earlier day).
    #[must_use]
    pub fn daily_count(&self, from: &Address, day: Day) -> u32 {
        match self.counters.get(from) {
            Some(c) if c.day == day => c.count,
            _ => 0,
        }
    }

    /// Validates all three limits for a prospective transfer and returns
    /// the counter to commit on success.
    ///
    /// `to_balance` is the recipient's balance before the transfer; the
    /// wallet ceiling is checked against `to_balance + gross`, the amount
    /// the recipient would hold if no fees applied, so fee exemptions
    /// cannot widen the ceiling.
    ///
    /// # Errors
    ///
    /// - [`TokenError::TxAmountExceeded`] if `gross` is above the
    ///   per-transaction ceiling.
    /// - [`TokenError::WalletAmountExceeded`] if the recipient would end
    ///   above the wallet ceiling.
    /// - [`TokenError::DailyLimitExceeded`] if `from` has already used its
    ///   daily quota for `day`.
    pub fn check(
        &self,
        from: &Address,
        to_balance: Amount,
        gross: Amount,
        day: Day,
        max_tx_amount: Amount,
        max_wallet_amount: Amount,
        daily_tx_limit: u32,
    ) -> crate::error::Result<DailyCounter> {
        if gross > max_tx_amount {
            return Err(TokenError::TxAmountExceeded);
        }
        let prospective = to_balance
            .checked_add(&gross)
            .ok_or(TokenError::Overflow("wallet ceiling check"))?;
        if prospective > max_wallet_amount {
            return Err(TokenError::WalletAmountExceeded);
        }
        let used = self.daily_count(from, day);
        if used >= daily_tx_limit {
            return Err(TokenError::DailyLimitExceeded);
        }
        Ok(DailyCounter {
            day,
            count: used + 1,
        })
    }

    /// Commits a counter previously returned by [`check`](Self::check).
    pub fn commit(&mut self, from: Address, counter: DailyCounter) {
        self.counters.insert(from, counter);
    }
}
