//! The reflection ledger: dual-unit balance store and global rate.
//!
//! Every reward-eligible account holds a `reflected` balance in an
//! inflated parallel unit space; its token balance is derived on read as
//! `reflected / rate`. Reward-excluded accounts hold an `explicit` token
//! balance instead and do not ride the rate. The reward fee of a transfer
//! is absorbed by shrinking the total reflected supply — one subtraction
//! that raises every eligible holder's derived balance proportionally on
//! the next read, with no per-holder loop.
//!
//! # Rate
//!
//! ```text
//! rate = (reflectedSupply − Σ excluded.reflected)
//!      / (tokenSupply     − Σ excluded.explicit)
//! ```
//!
//! The genesis reflected supply is the largest multiple of the token
//! supply representable in `u128`, so the genesis rate divides exactly and
//! rounding error stays in the last unit thereafter.
//!
//! # Atomicity
//!
//! [`ReflectionLedger::transfer_with_moves`] stages every account
//! mutation — the fee-split transfer and any trailing fee-free moves — in
//! a scratch map and commits only after all fallible arithmetic has
//! succeeded, so a failing call leaves the ledger untouched.
//!
//! # Excluded mirrors
//!
//! For a reward-excluded account the explicit balance is authoritative;
//! the reflected mirror is re-derived as `explicit × rate` on every touch
//! rather than adjusted incrementally. Burn fees can tick the floor rate
//! up by one, and an incrementally maintained mirror has no slack for
//! that: a full-balance spend the balance check covered would underflow
//! in reflected space. A re-derived mirror cannot go stale.

use std::collections::BTreeMap;

use crate::domain::{Address, Amount, FeeBreakdown, Rounding};
use crate::error::TokenError;
use crate::math::CheckedArithmetic;
use crate::registry::EligibilityRegistry;

/// Per-account balance record.
///
/// `reflected` is authoritative while the account is reward-eligible,
/// `explicit` while it is reward-excluded. The inactive side is kept as a
/// mirror so exclusion state can flip without rescanning history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct AccountUnits {
    reflected: Amount,
    explicit: Amount,
}

/// The dual-unit balance store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionLedger {
    /// Token-unit supply. Shrinks only through burn fees.
    t_total: Amount,
    /// Reflected-unit supply. Shrinks only when reward fees are absorbed
    /// or tokens burn; never grows.
    r_total: Amount,
    accounts: BTreeMap<Address, AccountUnits>,
}

impl ReflectionLedger {
    /// Creates a ledger with the full supply credited to `genesis_holder`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigInvalid`] if `supply` is zero.
    pub fn new(genesis_holder: Address, supply: Amount) -> crate::error::Result<Self> {
        if supply.is_zero() {
            return Err(TokenError::ConfigInvalid("zero total supply"));
        }
        // Largest multiple of the supply, so the genesis rate is exact.
        let remainder = Amount::new(u128::MAX % supply.get());
        let r_total = Amount::MAX
            .checked_sub(&remainder)
            .ok_or(TokenError::Underflow("reflected supply derivation"))?;
        let mut accounts = BTreeMap::new();
        accounts.insert(
            genesis_holder,
            AccountUnits {
                reflected: r_total,
                explicit: Amount::ZERO,
            },
        );
        Ok(Self {
            t_total: supply,
            r_total,
            accounts,
        })
    }

    /// Returns the current token supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.t_total
    }

    /// Returns the current reflected supply (diagnostic; monotonically
    /// non-increasing).
    #[must_use]
    pub const fn reflected_supply(&self) -> Amount {
        self.r_total
    }

    fn units(&self, account: &Address) -> AccountUnits {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    /// Current reflected-units-per-token rate over the eligible subset.
    ///
    /// Excluded accounts' holdings are withheld from both numerator and
    /// denominator. Falls back to the whole-supply rate when the excluded
    /// holdings dominate the supply, mirroring the guard in the reference
    /// reflection design.
    #[must_use]
    pub fn rate(&self, registry: &EligibilityRegistry) -> Amount {
        let floor_rate = self
            .r_total
            .checked_div(&self.t_total, Rounding::Down)
            .unwrap_or(Amount::new(1));
        let mut r_supply = self.r_total;
        let mut t_supply = self.t_total;
        for account in registry.reward_excluded_iter() {
            let units = self.units(&account);
            let (Some(r), Some(t)) = (
                r_supply.checked_sub(&units.reflected),
                t_supply.checked_sub(&units.explicit),
            ) else {
                return floor_rate;
            };
            r_supply = r;
            t_supply = t;
        }
        if t_supply.is_zero() || r_supply < floor_rate {
            return floor_rate;
        }
        r_supply
            .checked_div(&t_supply, Rounding::Down)
            .unwrap_or(floor_rate)
    }

    /// Returns the token balance of `account`.
    ///
    /// Reward-excluded accounts report their explicit balance; eligible
    /// accounts derive theirs from the reflected balance at the current
    /// rate. Stable between mutating operations, never above the supply.
    #[must_use]
    pub fn balance_of(&self, account: &Address, registry: &EligibilityRegistry) -> Amount {
        let units = self.units(account);
        if registry.is_reward_excluded(account) {
            return units.explicit;
        }
        units
            .reflected
            .checked_div(&self.rate(registry), Rounding::Down)
            .unwrap_or(Amount::ZERO)
    }

    /// Applies a fee-split transfer: debits `from` by the gross amount,
    /// credits `to` with the net, accrues liquidity + marketing fees to
    /// `collector`, burns the burn slice, and absorbs the reflection slice
    /// into the global rate.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`transfer_with_moves`](Self::transfer_with_moves).
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        collector: Address,
        split: &FeeBreakdown,
        registry: &EligibilityRegistry,
    ) -> crate::error::Result<()> {
        self.transfer_with_moves(from, to, collector, split, &[], registry)
    }

    /// Applies a fee-split transfer plus trailing fee-free moves as one
    /// atomic commit.
    ///
    /// The moves run in order against the staged state, so a move can
    /// spend balance the primary transfer just credited. The liquify
    /// settlement depends on this: the fee landing, the marketing payout,
    /// and the pool routing must all land or none may.
    ///
    /// All conversions use the rate in effect before this transfer's
    /// reward fee is absorbed.
    ///
    /// # Errors
    ///
    /// - [`TokenError::InsufficientBalance`] if `from` cannot cover the
    ///   gross amount, or a move's sender cannot cover its amount out of
    ///   the staged state.
    /// - [`TokenError::Overflow`] / [`TokenError::Underflow`] if a unit
    ///   conversion overflows; no state changes in that case.
    pub fn transfer_with_moves(
        &mut self,
        from: Address,
        to: Address,
        collector: Address,
        split: &FeeBreakdown,
        moves: &[(Address, Address, Amount)],
        registry: &EligibilityRegistry,
    ) -> crate::error::Result<()> {
        let gross = split.gross();
        if self.balance_of(&from, registry) < gross {
            return Err(TokenError::InsufficientBalance);
        }
        let rate = self.rate(registry);

        // All conversions happen in the pre-transfer rate domain.
        let r_gross = gross.safe_mul(&rate)?;
        let r_net = split.net().safe_mul(&rate)?;
        let r_reflection = split.reflection().safe_mul(&rate)?;
        let r_burn = split.burn().safe_mul(&rate)?;
        let accrued = split.liquidity().safe_add(&split.marketing())?;
        let r_accrued = accrued.safe_mul(&rate)?;

        // Stage mutations; nothing is written until every step succeeds.
        let mut staged: BTreeMap<Address, AccountUnits> = BTreeMap::new();
        self.stage_debit(&mut staged, from, gross, r_gross, rate, registry)?;
        self.stage_credit(&mut staged, to, split.net(), r_net, rate, registry)?;
        if !accrued.is_zero() {
            self.stage_credit(&mut staged, collector, accrued, r_accrued, rate, registry)?;
        }
        for (mover, recipient, amount) in moves {
            if self.staged_balance(&staged, mover, rate, registry) < *amount {
                return Err(TokenError::InsufficientBalance);
            }
            let r_amount = amount.safe_mul(&rate)?;
            self.stage_debit(&mut staged, *mover, *amount, r_amount, rate, registry)?;
            self.stage_credit(&mut staged, *recipient, *amount, r_amount, rate, registry)?;
        }

        // Burn is true deflation; the reflection slice shrinks only the
        // reflected supply, which is what redistributes it.
        let new_t_total = self.t_total.safe_sub(&split.burn())?;
        let new_r_total = self.r_total.safe_sub(&r_burn)?.safe_sub(&r_reflection)?;

        self.accounts.extend(staged);
        self.t_total = new_t_total;
        self.r_total = new_r_total;
        Ok(())
    }

    /// Moves `amount` from `from` to `to` with no fees.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`transfer`](Self::transfer).
    pub fn move_plain(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
        registry: &EligibilityRegistry,
    ) -> crate::error::Result<()> {
        self.transfer(from, to, from, &FeeBreakdown::fee_free(amount), registry)
    }

    fn staged_units(
        &self,
        staged: &BTreeMap<Address, AccountUnits>,
        account: &Address,
    ) -> AccountUnits {
        staged
            .get(account)
            .copied()
            .unwrap_or_else(|| self.units(account))
    }

    fn staged_balance(
        &self,
        staged: &BTreeMap<Address, AccountUnits>,
        account: &Address,
        rate: Amount,
        registry: &EligibilityRegistry,
    ) -> Amount {
        let units = self.staged_units(staged, account);
        if registry.is_reward_excluded(account) {
            return units.explicit;
        }
        units
            .reflected
            .checked_div(&rate, Rounding::Down)
            .unwrap_or(Amount::ZERO)
    }

    /// Debits one account in the staging area.
    ///
    /// Reward-excluded accounts debit the authoritative explicit balance
    /// and re-derive the mirror; an eligible account's reflected balance
    /// always covers `r_amount` once the balance check has passed, because
    /// `floor(reflected / rate) ≥ amount` implies `reflected ≥ amount × rate`.
    fn stage_debit(
        &self,
        staged: &mut BTreeMap<Address, AccountUnits>,
        account: Address,
        amount: Amount,
        r_amount: Amount,
        rate: Amount,
        registry: &EligibilityRegistry,
    ) -> crate::error::Result<()> {
        let mut units = self.staged_units(staged, &account);
        if registry.is_reward_excluded(&account) {
            units.explicit = units.explicit.safe_sub(&amount)?;
            units.reflected = units.explicit.safe_mul(&rate)?;
        } else {
            units.reflected = units.reflected.safe_sub(&r_amount)?;
        }
        staged.insert(account, units);
        Ok(())
    }

    /// Credits one account in the staging area.
    fn stage_credit(
        &self,
        staged: &mut BTreeMap<Address, AccountUnits>,
        account: Address,
        amount: Amount,
        r_amount: Amount,
        rate: Amount,
        registry: &EligibilityRegistry,
    ) -> crate::error::Result<()> {
        let mut units = self.staged_units(staged, &account);
        if registry.is_reward_excluded(&account) {
            units.explicit = units.explicit.safe_add(&amount)?;
            units.reflected = units.explicit.safe_mul(&rate)?;
        } else {
            units.reflected = units.reflected.safe_add(&r_amount)?;
        }
        staged.insert(account, units);
        Ok(())
    }

    /// Freezes `account`'s balance into explicit form at the current rate.
    ///
    /// Must run while the account is still reward-eligible (the caller
    /// flips the registry flag afterwards); the reflected balance is kept
    /// as the mirror until the account's next transfer re-derives it.
    pub fn capture_explicit(&mut self, account: Address, registry: &EligibilityRegistry) {
        let balance = self.balance_of(&account, registry);
        let mut units = self.units(&account);
        units.explicit = balance;
        self.accounts.insert(account, units);
    }

    /// Re-derives `account`'s reflected balance from its explicit balance.
    ///
    /// Must run while the account is still reward-excluded (the caller
    /// clears the registry flag afterwards); the account rejoins
    /// proportional redistribution from this point forward.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Overflow`] if the conversion overflows.
    pub fn rederive_reflected(
        &mut self,
        account: Address,
        registry: &EligibilityRegistry,
    ) -> crate::error::Result<()> {
        let rate = self.rate(registry);
        let mut units = self.units(&account);
        units.reflected = units.explicit.safe_mul(&rate)?;
        units.explicit = Amount::ZERO;
        self.accounts.insert(account, units);
        Ok(())
    }
}
