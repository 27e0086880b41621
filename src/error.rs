//! Unified error types for the reflection token ledger.
//!
//! All fallible operations across the crate return [`TokenError`] as their
//! error type. Every failure is a rejected call: effects of the failing
//! operation are discarded in full, nothing is retried internally, and the
//! caller decides whether to retry with different arguments.

use thiserror::Error;

/// Unified error enum for every fallible ledger operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TokenError {
    /// A non-privileged caller invoked an admin operation.
    #[error("caller is not the privileged administrator")]
    Unauthorized,

    /// A configuration argument failed validation (zero address, fee sum
    /// over the ceiling, non-positive limit).
    #[error("invalid configuration: {0}")]
    ConfigInvalid(&'static str),

    /// `exclude_from_reward` called on an already-excluded account.
    #[error("account is already excluded from reward")]
    AlreadyExcluded,

    /// `include_in_reward` called on an account that is not excluded.
    #[error("account is not excluded from reward")]
    NotExcluded,

    /// Transfer attempted before trading was enabled, with neither
    /// endpoint whitelisted.
    #[error("trading is not enabled")]
    TradingNotEnabled,

    /// Sender or recipient is blacklisted.
    #[error("sender or recipient is blacklisted")]
    AddressBlacklisted,

    /// Gross amount exceeds the per-transaction limit.
    #[error("transfer amount exceeds the per-transaction limit")]
    TxAmountExceeded,

    /// The recipient's post-transfer balance would exceed the per-wallet
    /// limit.
    #[error("recipient balance would exceed the per-wallet limit")]
    WalletAmountExceeded,

    /// The sender's transaction count for the current day would exceed
    /// the daily limit.
    #[error("sender exceeded the daily transaction limit")]
    DailyLimitExceeded,

    /// The sender's balance cannot cover the gross amount.
    #[error("transfer amount exceeds sender balance")]
    InsufficientBalance,

    /// `transfer_from` requested more than the spender's allowance.
    #[error("transfer amount exceeds spender allowance")]
    AllowanceExceeded,

    /// Arithmetic overflow during an internal computation.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow during an internal computation.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero during an internal computation.
    #[error("division by zero")]
    DivisionByZero,

    /// The external swap capability rejected a swap or add-liquidity call.
    /// The triggering transfer is aborted in full.
    #[error("external swap capability failed: {0}")]
    SwapFailed(&'static str),
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, TokenError>;
