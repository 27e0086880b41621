//! Per-address eligibility flags.
//!
//! Four independent boolean flags per account, stored as a small record
//! rather than polymorphic account types — the flags combine freely:
//!
//! - `fee_excluded`: transfers touching the account skip all four fee
//!   computations.
//! - `reward_excluded`: the account uses explicit-balance accounting and
//!   is exempt from proportional redistribution; this flag is the single
//!   source of truth for which balance representation is authoritative.
//! - `whitelisted`: bypasses the trading-enabled gate and the transfer
//!   limits.
//! - `blacklisted`: any transfer touching the account is rejected before
//!   balance mutation.

use std::collections::BTreeMap;

use crate::domain::Address;

/// The flag record kept per address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Flags {
    fee_excluded: bool,
    reward_excluded: bool,
    whitelisted: bool,
    blacklisted: bool,
}

impl Flags {
    const fn is_default(&self) -> bool {
        !self.fee_excluded && !self.reward_excluded && !self.whitelisted && !self.blacklisted
    }
}

/// Tracks eligibility flags for every address that has any flag set.
///
/// Addresses with no record carry all-default flags; clearing the last
/// flag drops the record, so the map only holds "special" accounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EligibilityRegistry {
    flags: BTreeMap<Address, Flags>,
}

impl EligibilityRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, account: &Address) -> Flags {
        self.flags.get(account).copied().unwrap_or_default()
    }

    fn update(&mut self, account: Address, f: impl FnOnce(&mut Flags)) {
        let mut flags = self.get(&account);
        f(&mut flags);
        if flags.is_default() {
            self.flags.remove(&account);
        } else {
            self.flags.insert(account, flags);
        }
    }

    /// Returns `true` if transfers touching `account` skip fees.
    #[must_use]
    pub fn is_fee_excluded(&self, account: &Address) -> bool {
        self.get(account).fee_excluded
    }

    /// Returns `true` if `account` uses explicit-balance accounting.
    #[must_use]
    pub fn is_reward_excluded(&self, account: &Address) -> bool {
        self.get(account).reward_excluded
    }

    /// Returns `true` if `account` bypasses the trading gate and limits.
    #[must_use]
    pub fn is_whitelisted(&self, account: &Address) -> bool {
        self.get(account).whitelisted
    }

    /// Returns `true` if transfers touching `account` are rejected.
    #[must_use]
    pub fn is_blacklisted(&self, account: &Address) -> bool {
        self.get(account).blacklisted
    }

    /// Sets the fee-exclusion flag.
    pub fn set_fee_excluded(&mut self, account: Address, excluded: bool) {
        self.update(account, |f| f.fee_excluded = excluded);
    }

    /// Sets the reward-exclusion flag.
    ///
    /// Callers are responsible for converting the account's balance
    /// representation first (see
    /// [`ReflectionLedger`](crate::ledger::ReflectionLedger)); flipping the
    /// flag alone would corrupt the supply invariant.
    pub fn set_reward_excluded(&mut self, account: Address, excluded: bool) {
        self.update(account, |f| f.reward_excluded = excluded);
    }

    /// Sets the whitelist flag.
    pub fn set_whitelisted(&mut self, account: Address, listed: bool) {
        self.update(account, |f| f.whitelisted = listed);
    }

    /// Sets the blacklist flag.
    pub fn set_blacklisted(&mut self, account: Address, listed: bool) {
        self.update(account, |f| f.blacklisted = listed);
    }

    /// Iterates over all reward-excluded addresses, in address order.
    ///
    /// The ledger uses this to subtract the excluded accounts' holdings
    /// from both sides of the global rate.
    pub fn reward_excluded_iter(&self) -> impl Iterator<Item = Address> + '_ {
        self.flags
            .iter()
            .filter(|(_, f)| f.reward_excluded)
            .map(|(a, _)| *a)
    }
}
