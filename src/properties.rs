//! Property-based tests using `proptest` for ledger invariant validation.
//!
//! Covers five properties:
//!
//! 1. **Fee split completeness** — the four slices plus net always sum to
//!    the gross amount.
//! 2. **Zero-fee exactness** — fee-free transfers conserve the supply with
//!    no rounding drift.
//! 3. **Conservation bound** — with reflection fees, total balances never
//!    exceed the supply and truncation drift stays below one unit per
//!    holder.
//! 4. **Proportional direction** — a reflection fee never decreases a
//!    bystander's balance.
//! 5. **Exclusion isolation** — a reward-excluded account's balance is
//!    untouched by other accounts' transfers.

#![allow(clippy::panic)]

use proptest::prelude::*;

use crate::domain::{Address, Amount, BasisPoints, FeeBreakdown, TaxSchedule};
use crate::fees;
use crate::ledger::ReflectionLedger;
use crate::registry::EligibilityRegistry;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn addr(tag: u8) -> Address {
    Address::from_bytes([tag; 32])
}

fn schedule(r: u32, l: u32, b: u32, m: u32) -> TaxSchedule {
    let Ok(t) = TaxSchedule::new(
        BasisPoints::new(r),
        BasisPoints::new(l),
        BasisPoints::new(b),
        BasisPoints::new(m),
    ) else {
        panic!("valid schedule");
    };
    t
}

/// Fresh ledger with the supply split across three eligible holders.
fn three_holders(supply: u128, first: u128, second: u128) -> (ReflectionLedger, EligibilityRegistry) {
    let reg = EligibilityRegistry::new();
    let Ok(mut ledger) = ReflectionLedger::new(addr(1), Amount::new(supply)) else {
        panic!("valid ledger");
    };
    let Ok(()) = ledger.move_plain(addr(1), addr(2), Amount::new(first), &reg) else {
        panic!("seed transfer");
    };
    let Ok(()) = ledger.move_plain(addr(1), addr(3), Amount::new(second), &reg) else {
        panic!("seed transfer");
    };
    (ledger, reg)
}

fn balance_sum(ledger: &ReflectionLedger, reg: &EligibilityRegistry, holders: &[u8]) -> u128 {
    holders
        .iter()
        .map(|tag| ledger.balance_of(&addr(*tag), reg).get())
        .sum()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Supplies large enough that basis-point slices are non-degenerate.
fn supply_strategy() -> impl Strategy<Value = u128> {
    100_000u128..=1_000_000_000u128
}

/// Fee rates within the schedule ceiling when combined (4 × 300bp ≤ 1500bp).
fn slice_strategy() -> impl Strategy<Value = u32> {
    0u32..=300u32
}

// ---------------------------------------------------------------------------
// Property 1: Fee split completeness
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fee_split_sums_to_gross(
        gross in 0u128..=u64::MAX as u128,
        r in slice_strategy(),
        l in slice_strategy(),
        b in slice_strategy(),
        m in slice_strategy(),
    ) {
        let Ok(split) = fees::split(Amount::new(gross), &schedule(r, l, b, m), false) else {
            return Err(TestCaseError::fail("split failed"));
        };
        let total = split.reflection().get()
            + split.liquidity().get()
            + split.burn().get()
            + split.marketing().get()
            + split.net().get();
        prop_assert_eq!(total, gross);
        prop_assert!(split.total_fees().get() <= gross * 1_500 / 10_000 + 4);
    }

    #[test]
    fn prop_zero_fee_transfers_conserve_exactly(
        supply in supply_strategy(),
        cut in 3u128..=100u128,
    ) {
        let first = supply / cut;
        let (mut ledger, reg) = three_holders(supply, first, supply / 4);
        let move_back = first / 2;
        let Ok(()) = ledger.move_plain(addr(2), addr(3), Amount::new(move_back), &reg) else {
            return Err(TestCaseError::fail("move failed"));
        };
        prop_assert_eq!(balance_sum(&ledger, &reg, &[1, 2, 3]), supply);
    }

    #[test]
    fn prop_conservation_bound_with_reflection(
        supply in supply_strategy(),
        rate_bp in 1u32..=300u32,
        steps in 1usize..=8usize,
    ) {
        let (mut ledger, reg) = three_holders(supply, supply / 3, supply / 3);
        let taxes = schedule(rate_bp, 0, 0, 0);
        for step in 0..steps {
            let from = if step % 2 == 0 { addr(2) } else { addr(3) };
            let to = if step % 2 == 0 { addr(3) } else { addr(2) };
            let gross = ledger.balance_of(&from, &reg).get() / 10;
            let Ok(split) = fees::split(Amount::new(gross), &taxes, false) else {
                return Err(TestCaseError::fail("split failed"));
            };
            let Ok(()) = ledger.transfer(from, to, from, &split, &reg) else {
                return Err(TestCaseError::fail("transfer failed"));
            };
        }
        let sum = balance_sum(&ledger, &reg, &[1, 2, 3]);
        prop_assert!(sum <= supply, "sum {} exceeds supply {}", sum, supply);
        // At most one truncated unit per eligible holder.
        prop_assert!(supply - sum <= 3, "drift {} too large", supply - sum);
    }

    #[test]
    fn prop_reflection_never_decreases_bystander(
        supply in supply_strategy(),
        rate_bp in 1u32..=300u32,
    ) {
        let (mut ledger, reg) = three_holders(supply, supply / 3, supply / 3);
        let bystander = addr(1);
        let before = ledger.balance_of(&bystander, &reg);

        let gross = supply / 30;
        let Ok(split) = fees::split(Amount::new(gross), &schedule(rate_bp, 0, 0, 0), false)
        else {
            return Err(TestCaseError::fail("split failed"));
        };
        let Ok(()) = ledger.transfer(addr(2), addr(3), addr(2), &split, &reg) else {
            return Err(TestCaseError::fail("transfer failed"));
        };

        let after = ledger.balance_of(&bystander, &reg);
        prop_assert!(
            after >= before,
            "bystander lost value: {} -> {}",
            before,
            after
        );
    }

    #[test]
    fn prop_excluded_balance_is_isolated(
        supply in supply_strategy(),
        rate_bp in 1u32..=300u32,
    ) {
        let (mut ledger, mut reg) = three_holders(supply, supply / 3, supply / 3);
        ledger.capture_explicit(addr(3), &reg);
        reg.set_reward_excluded(addr(3), true);
        let frozen = ledger.balance_of(&addr(3), &reg);

        let gross = supply / 30;
        let Ok(split) = fees::split(Amount::new(gross), &schedule(rate_bp, 0, 0, 0), false)
        else {
            return Err(TestCaseError::fail("split failed"));
        };
        let Ok(()) = ledger.transfer(addr(2), addr(1), addr(2), &split, &reg) else {
            return Err(TestCaseError::fail("transfer failed"));
        };

        prop_assert_eq!(ledger.balance_of(&addr(3), &reg), frozen);
    }

    #[test]
    fn prop_failed_transfer_mutates_nothing(
        supply in supply_strategy(),
    ) {
        let (mut ledger, reg) = three_holders(supply, supply / 3, supply / 3);
        let before = ledger.clone();
        let too_much = Amount::new(supply);
        let result = ledger.transfer(
            addr(2),
            addr(3),
            addr(2),
            &FeeBreakdown::fee_free(too_much),
            &reg,
        );
        prop_assert!(result.is_err());
        prop_assert_eq!(ledger, before);
    }
}
