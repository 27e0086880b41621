//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use remora_token::prelude::*;
//! ```

// Re-export domain types
pub use crate::domain::{
    Address, Amount, BasisPoints, Day, FeeBreakdown, Rounding, TaxSchedule,
};

// Re-export the orchestrator
pub use crate::token::{CallContext, ReflectionToken};

// Re-export the swap backend trait
pub use crate::liquidity::SwapBackend;

// Re-export configuration
pub use crate::config::{GenesisConfig, LedgerConfig};

// Re-export notifications
pub use crate::events::Notification;

// Re-export math utilities
pub use crate::math::CheckedArithmetic;

// Re-export error types
pub use crate::error::{Result, TokenError};
