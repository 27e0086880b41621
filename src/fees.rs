//! The fee engine: a pure split of gross amount into fee slices.
//!
//! No stored state — the split reads the tax schedule and the endpoints'
//! fee-exclusion status and produces a [`FeeBreakdown`]. Every slice is
//! `gross × bp / 10 000` with floor division, so tiny transfers at low
//! rates legitimately degrade to a pure transfer with zero fees.

use crate::domain::{Amount, FeeBreakdown, Rounding, TaxSchedule};
use crate::error::Result;

/// Splits `gross` into the four fee slices plus the net amount.
///
/// If `fee_exempt` is set (either transfer endpoint is fee-excluded), all
/// four slices are zero and `net == gross`.
///
/// # Errors
///
/// Returns [`TokenError::Overflow`](crate::error::TokenError::Overflow) if
/// a basis-point multiplication overflows. The slice sum cannot exceed
/// `gross` because the schedule's combined rate is capped below 100%.
pub fn split(gross: Amount, taxes: &TaxSchedule, fee_exempt: bool) -> Result<FeeBreakdown> {
    if fee_exempt || taxes.is_zero() {
        return Ok(FeeBreakdown::fee_free(gross));
    }
    let reflection = taxes.reflection().apply(gross, Rounding::Down)?;
    let liquidity = taxes.liquidity().apply(gross, Rounding::Down)?;
    let burn = taxes.burn().apply(gross, Rounding::Down)?;
    let marketing = taxes.marketing().apply(gross, Rounding::Down)?;
    FeeBreakdown::new(gross, reflection, liquidity, burn, marketing)
}
