//! # Remora Token
//!
//! A reflection token ledger: a fixed-supply token engine whose transfer
//! fees are automatically redistributed to holders, with a four-slice fee
//! schedule, transfer limits, and threshold-triggered conversion of
//! accrued fees into pool liquidity.
//!
//! The redistribution mechanism keeps two unit spaces. Reward-eligible
//! accounts hold balances in an inflated *reflected* space and derive
//! their token balance through a global rate; absorbing a reflection fee
//! shrinks the reflected supply once, which raises every eligible
//! holder's derived balance proportionally without touching any account.
//! Reward-excluded accounts hold *explicit* token balances outside the
//! mechanism.
//!
//! # Quick Start
//!
//! ```rust
//! use remora_token::config::GenesisConfig;
//! use remora_token::domain::{Address, Amount, Day};
//! use remora_token::liquidity::SwapBackend;
//! use remora_token::token::{CallContext, ReflectionToken};
//!
//! // A backend wired to whatever AMM the deployment uses.
//! struct Router;
//! impl SwapBackend for Router {
//!     fn swap_for_settlement(&mut self, amount_in: Amount) -> remora_token::error::Result<Amount> {
//!         Ok(amount_in)
//!     }
//!     fn add_liquidity(&mut self, _: Amount, _: Amount) -> remora_token::error::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! let genesis = GenesisConfig::new(
//!     Address::from_bytes([1u8; 32]), // deployer
//!     Address::from_bytes([2u8; 32]), // contract
//!     Address::from_bytes([3u8; 32]), // router
//!     Address::from_bytes([4u8; 32]), // marketing wallet
//! ).expect("valid genesis");
//!
//! let mut token = ReflectionToken::new(&genesis, Router).expect("deployed");
//! let deployer = CallContext::new(genesis.deployer(), Day::new(0));
//!
//! token.enable_trading(&deployer).expect("admin call");
//! token
//!     .transfer(&deployer, Address::from_bytes([9u8; 32]), Amount::new(1_000))
//!     .expect("transfer");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer    │  transfer / approve / admin calls + CallContext
//! └──────┬───────┘
//!        ▼
//! ┌──────────────┐
//! │ ReflectionToken │  orchestrates the transfer pipeline
//! └──────┬───────┘
//!        │ blacklist → gate → limits → fees → liquify → commit
//!        ▼
//! ┌──────────────────────────────────────────────┐
//! │ registry │ limits │ fees │ liquidity │ ledger │
//! └──────────────────────┬───────────────────────┘
//!                        ▼
//! ┌──────────────┐
//! │    Domain     │  Address, Amount, BasisPoints, FeeBreakdown, …
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Address`](domain::Address), [`TaxSchedule`](domain::TaxSchedule), etc. |
//! | [`token`] | [`ReflectionToken`](token::ReflectionToken) orchestrator and admin surface |
//! | [`ledger`] | [`ReflectionLedger`](ledger::ReflectionLedger) dual-unit balance store |
//! | [`fees`] | Pure four-slice fee split |
//! | [`registry`] | Per-address eligibility flags |
//! | [`limits`] | Per-transaction, per-wallet, and daily-count ceilings |
//! | [`liquidity`] | [`SwapBackend`](liquidity::SwapBackend) trait and swap-and-liquify manager |
//! | [`config`] | Genesis parameters and admin-mutable configuration |
//! | [`events`] | [`Notification`](events::Notification) change notifications |
//! | [`math`] | Checked arithmetic helpers |
//! | [`error`] | [`TokenError`](error::TokenError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod fees;
pub mod ledger;
pub mod limits;
pub mod liquidity;
pub mod math;
pub mod prelude;
pub mod registry;
pub mod token;

#[cfg(test)]
mod properties;
