//! Fundamental domain value types used throughout the ledger.
//!
//! This module contains the core value types that model the reflection
//! token domain: addresses, amounts, basis-point rates, tax schedules,
//! fee splits, and calendar days. All types use newtypes with validated
//! constructors to enforce invariants.

mod address;
mod amount;
mod basis_points;
mod day;
mod fee_breakdown;
mod rounding;
mod tax_schedule;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use day::Day;
pub use fee_breakdown::FeeBreakdown;
pub use rounding::Rounding;
pub use tax_schedule::{TaxSchedule, MAX_TOTAL_FEE_BP};
