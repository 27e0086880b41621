//! Swap-and-liquify: converting accrued fees into pool liquidity.
//!
//! Liquidity and marketing fees accrue on the contract's own ledger
//! account. Once the contract balance would reach the configured
//! threshold, the pending marketing accrual is paid out and the remainder
//! is split in half: one half is sold for the settlement asset through the
//! [`SwapBackend`], the other half is paired with the proceeds as pool
//! liquidity.
//!
//! The manager carries a phase lock: while a swap is in flight no second
//! liquify can trigger, so a transfer performed by the backend itself (the
//! swap leg moving tokens to the pool) cannot recurse into another
//! liquify.

use crate::domain::{Amount, Rounding};
use crate::math::CheckedArithmetic;

/// External AMM operations the liquify sequence depends on.
///
/// Implementations may fail; a failure aborts the entire transfer that
/// triggered the liquify, with no balance mutation.
pub trait SwapBackend {
    /// Sells `amount_in` tokens for the settlement asset and returns the
    /// proceeds.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::SwapFailed`](crate::error::TokenError::SwapFailed) (or any other error) when the
    /// swap cannot complete.
    fn swap_for_settlement(&mut self, amount_in: Amount) -> crate::error::Result<Amount>;

    /// Supplies `token_amount` plus `settlement_amount` as pool liquidity.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::SwapFailed`](crate::error::TokenError::SwapFailed) (or any other error) when the
    /// deposit cannot complete.
    fn add_liquidity(
        &mut self,
        token_amount: Amount,
        settlement_amount: Amount,
    ) -> crate::error::Result<()>;
}

/// Where the liquidity manager is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LiquifyPhase {
    /// No liquify in flight; a trigger may fire.
    #[default]
    Idle,
    /// Backend calls in progress; triggers are suppressed.
    Swapping,
}

/// The amounts a triggered liquify will move, fixed before any mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquifyPlan {
    /// Pending marketing accrual, paid to the marketing wallet.
    pub marketing_payout: Amount,
    /// Tokens sold for the settlement asset.
    pub swap_amount: Amount,
    /// Tokens paired with the swap proceeds as liquidity.
    pub keep_amount: Amount,
}

/// What a completed liquify actually moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquifyOutcome {
    /// Tokens sold.
    pub swapped: Amount,
    /// Settlement asset received.
    pub settlement: Amount,
    /// Tokens supplied alongside the settlement asset.
    pub liquefied: Amount,
}

/// Tracks the liquify phase and the pending marketing accrual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LiquidityManager {
    phase: LiquifyPhase,
    marketing_accrued: Amount,
}

impl LiquidityManager {
    /// Creates an idle manager with no pending accrual.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> LiquifyPhase {
        self.phase
    }

    /// Returns the marketing fees accrued but not yet paid out.
    #[must_use]
    pub const fn marketing_accrued(&self) -> Amount {
        self.marketing_accrued
    }

    /// Records marketing fees collected into the contract account.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Overflow`](crate::error::TokenError::Overflow) if the accrual counter overflows.
    pub fn accrue_marketing(&mut self, amount: Amount) -> crate::error::Result<()> {
        self.marketing_accrued = self.marketing_accrued.safe_add(&amount)?;
        Ok(())
    }

    /// Whether a liquify should fire for a contract balance of
    /// `prospective_balance` (the balance the contract will hold once the
    /// in-flight transfer's fees land).
    #[must_use]
    pub fn should_trigger(
        &self,
        prospective_balance: Amount,
        threshold: Amount,
        enabled: bool,
    ) -> bool {
        enabled && self.phase == LiquifyPhase::Idle && prospective_balance >= threshold
    }

    /// Fixes the amounts a liquify of `contract_balance` will move.
    ///
    /// `incoming_marketing` is the marketing slice of the in-flight
    /// transfer, which lands in the same commit as the payout; it joins
    /// the pending accrual off the top, and the remainder splits into a
    /// swap half (floor) and a keep half (remainder, so the two halves sum
    /// exactly).
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Underflow`](crate::error::TokenError::Underflow) if the marketing payout exceeds
    /// the contract balance, which would indicate accrual drift.
    pub fn plan(
        &self,
        contract_balance: Amount,
        incoming_marketing: Amount,
    ) -> crate::error::Result<LiquifyPlan> {
        let marketing_payout = self.marketing_accrued.safe_add(&incoming_marketing)?;
        let portion = contract_balance.safe_sub(&marketing_payout)?;
        let swap_amount = portion.safe_div(&Amount::new(2), Rounding::Down)?;
        let keep_amount = portion.safe_sub(&swap_amount)?;
        Ok(LiquifyPlan {
            marketing_payout,
            swap_amount,
            keep_amount,
        })
    }

    /// Runs the backend legs of `plan` under the phase lock.
    ///
    /// The phase is `Swapping` for the duration of both backend calls and
    /// returns to `Idle` on every exit path. The marketing accrual is left
    /// untouched: the caller pays it out from the ledger and calls
    /// [`settle_marketing`](Self::settle_marketing) only once that commit
    /// lands. Nothing runs when the swap half is zero.
    ///
    /// # Errors
    ///
    /// Propagates backend errors; the caller must treat any error as
    /// aborting the whole transfer.
    pub fn execute<B: SwapBackend>(
        &mut self,
        backend: &mut B,
        plan: &LiquifyPlan,
    ) -> crate::error::Result<Option<LiquifyOutcome>> {
        if plan.swap_amount.is_zero() {
            return Ok(None);
        }
        self.phase = LiquifyPhase::Swapping;
        let result = Self::run_backend(backend, plan);
        self.phase = LiquifyPhase::Idle;
        Ok(Some(result?))
    }

    /// Clears the marketing accrual after its payout has committed.
    pub fn settle_marketing(&mut self) {
        self.marketing_accrued = Amount::ZERO;
    }

    fn run_backend<B: SwapBackend>(
        backend: &mut B,
        plan: &LiquifyPlan,
    ) -> crate::error::Result<LiquifyOutcome> {
        let settlement = backend.swap_for_settlement(plan.swap_amount)?;
        backend.add_liquidity(plan.keep_amount, settlement)?;
        Ok(LiquifyOutcome {
            swapped: plan.swap_amount,
            settlement,
            liquefied: plan.keep_amount,
        })
    }
}
