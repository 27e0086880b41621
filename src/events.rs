//! Change notifications emitted by state-changing operations.
//!
//! Every successful state-changing call records exactly one notification
//! carrying the new values. Notifications accumulate in the token's
//! internal queue and are drained by
//! [`ReflectionToken::take_notifications`](crate::token::ReflectionToken::take_notifications);
//! the embedding environment decides how to publish them (logs, chain
//! events, message bus).

use crate::domain::{Address, Amount, TaxSchedule};

/// A change notification observable by the embedding environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// The tax schedule was replaced.
    TaxesUpdated {
        /// The new schedule.
        taxes: TaxSchedule,
    },
    /// The transfer limits were replaced.
    LimitsUpdated {
        /// New per-transaction ceiling.
        max_tx_amount: Amount,
        /// New per-wallet ceiling.
        max_wallet_amount: Amount,
        /// New daily transaction count limit.
        daily_tx_limit: u32,
    },
    /// The liquify trigger threshold changed.
    LiquifyThresholdUpdated {
        /// New contract-balance threshold.
        threshold: Amount,
    },
    /// The router address changed.
    RouterUpdated {
        /// New router address.
        router: Address,
    },
    /// The marketing wallet changed.
    MarketingWalletUpdated {
        /// New marketing wallet address.
        wallet: Address,
    },
    /// An account's fee exclusion flag was toggled.
    FeeExclusionSet {
        /// The affected account.
        account: Address,
        /// The new flag value.
        excluded: bool,
    },
    /// An account's whitelist flag was toggled.
    WhitelistSet {
        /// The affected account.
        account: Address,
        /// The new flag value.
        listed: bool,
    },
    /// An account's blacklist flag was toggled.
    BlacklistSet {
        /// The affected account.
        account: Address,
        /// The new flag value.
        listed: bool,
    },
    /// Public trading was opened. Fires once; the transition is one-way.
    TradingEnabled,
    /// The swap-and-liquify feature was toggled.
    SwapAndLiquifySet {
        /// The new flag value.
        enabled: bool,
    },
    /// An account left the reward-eligible pool.
    ExcludedFromReward {
        /// The affected account.
        account: Address,
    },
    /// An account rejoined the reward-eligible pool.
    IncludedInReward {
        /// The affected account.
        account: Address,
    },
    /// Accumulated fees were converted into liquidity.
    SwapAndLiquify {
        /// Tokens sold for the settlement asset.
        swapped: Amount,
        /// Settlement asset received from the swap.
        settlement: Amount,
        /// Tokens supplied to the pool alongside the settlement asset.
        liquefied: Amount,
    },
}
