//! The transfer orchestrator and admin surface.
//!
//! [`ReflectionToken`] owns every component — configuration, eligibility
//! registry, reflection ledger, limit enforcer, liquidity manager, swap
//! backend — and sequences them per transfer:
//!
//! 1. endpoint validation (zero address, blacklist)
//! 2. trading gate (whitelist bypass)
//! 3. transfer limits (whitelist bypass)
//! 4. fee split
//! 5. sender balance check
//! 6. liquify planning and external backend calls
//! 7. one atomic ledger commit (transfer plus liquify settlement moves),
//!    then counter commit and notifications
//!
//! Every fallible step runs before the first ledger write, so a rejected
//! transfer — including one whose liquify swap fails — leaves all balances,
//! counters, and accruals untouched.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::{GenesisConfig, LedgerConfig};
use crate::domain::{Address, Amount, Day, TaxSchedule};
use crate::error::TokenError;
use crate::events::Notification;
use crate::fees;
use crate::ledger::ReflectionLedger;
use crate::limits::LimitEnforcer;
use crate::liquidity::{LiquidityManager, LiquifyPlan, SwapBackend};
use crate::math::CheckedArithmetic;
use crate::registry::EligibilityRegistry;

/// Ambient call information supplied by the embedding environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    caller: Address,
    day: Day,
}

impl CallContext {
    /// Creates a context for `caller` on `day`.
    #[must_use]
    pub const fn new(caller: Address, day: Day) -> Self {
        Self { caller, day }
    }

    /// Returns the calling account.
    #[must_use]
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Returns the current day index.
    #[must_use]
    pub const fn day(&self) -> Day {
        self.day
    }
}

/// The reflection token: all components behind one transactional surface.
#[derive(Debug)]
pub struct ReflectionToken<B> {
    admin: Address,
    contract: Address,
    config: LedgerConfig,
    registry: EligibilityRegistry,
    ledger: ReflectionLedger,
    limits: LimitEnforcer,
    liquidity: LiquidityManager,
    backend: B,
    allowances: BTreeMap<(Address, Address), Amount>,
    notifications: Vec<Notification>,
}

impl<B: SwapBackend> ReflectionToken<B> {
    /// Deploys a fresh token.
    ///
    /// The full supply lands on the deployer, who is also the
    /// administrator. Genesis eligibility: the deployer is fee-excluded,
    /// whitelisted, and reward-excluded; the contract and marketing wallet
    /// are fee-excluded; the contract and router are reward-excluded.
    /// Trading starts closed.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigInvalid`] when the genesis parameters
    /// do not validate (the [`GenesisConfig`] constructor catches most of
    /// this earlier).
    pub fn new(genesis: &GenesisConfig, backend: B) -> crate::error::Result<Self> {
        let config = LedgerConfig::genesis(genesis);
        config.validate()?;
        let mut registry = EligibilityRegistry::new();
        let mut ledger = ReflectionLedger::new(genesis.deployer(), genesis.total_supply())?;

        // Capture explicit balances while the rate is still the exact
        // genesis rate, then flip the flags.
        for account in [genesis.deployer(), genesis.contract(), genesis.router()] {
            ledger.capture_explicit(account, &registry);
            registry.set_reward_excluded(account, true);
        }
        registry.set_fee_excluded(genesis.deployer(), true);
        registry.set_fee_excluded(genesis.contract(), true);
        registry.set_fee_excluded(genesis.marketing_wallet(), true);
        registry.set_whitelisted(genesis.deployer(), true);

        info!(
            deployer = %genesis.deployer(),
            supply = %genesis.total_supply(),
            "token deployed"
        );
        Ok(Self {
            admin: genesis.deployer(),
            contract: genesis.contract(),
            config,
            registry,
            ledger,
            limits: LimitEnforcer::new(),
            liquidity: LiquidityManager::new(),
            backend,
            allowances: BTreeMap::new(),
            notifications: Vec::new(),
        })
    }

    // -- read surface ----------------------------------------------------

    /// Returns the current token supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.ledger.total_supply()
    }

    /// Returns `account`'s token balance.
    #[must_use]
    pub fn balance_of(&self, account: &Address) -> Amount {
        self.ledger.balance_of(account, &self.registry)
    }

    /// Returns the remaining allowance `owner` has granted `spender`.
    #[must_use]
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Returns the eligibility registry.
    #[must_use]
    pub const fn registry(&self) -> &EligibilityRegistry {
        &self.registry
    }

    /// Returns `from`'s counted transfers for `day`.
    #[must_use]
    pub fn daily_count(&self, from: &Address, day: Day) -> u32 {
        self.limits.daily_count(from, day)
    }

    /// Returns the marketing fees accrued but not yet paid out.
    #[must_use]
    pub const fn marketing_accrued(&self) -> Amount {
        self.liquidity.marketing_accrued()
    }

    /// Returns the swap backend, for inspection.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the swap backend mutably, for reconfiguration.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Drains the queued notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // -- transfers -------------------------------------------------------

    /// Transfers `amount` from the caller to `to`.
    ///
    /// # Errors
    ///
    /// See the pipeline in the module docs; any failing step rejects the
    /// whole transfer with no state change.
    pub fn transfer(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: Amount,
    ) -> crate::error::Result<()> {
        self.do_transfer(ctx, ctx.caller(), to, amount)
    }

    /// Transfers `amount` from `from` to `to` against the caller's
    /// allowance.
    ///
    /// The allowance is checked before the transfer runs and debited only
    /// after it succeeds.
    ///
    /// # Errors
    ///
    /// [`TokenError::AllowanceExceeded`] when the allowance is too small,
    /// otherwise the transfer pipeline's errors.
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> crate::error::Result<()> {
        let granted = self.allowance(&from, &ctx.caller());
        if granted < amount {
            return Err(TokenError::AllowanceExceeded);
        }
        self.do_transfer(ctx, from, to, amount)?;
        let remaining = granted.safe_sub(&amount)?;
        if remaining.is_zero() {
            self.allowances.remove(&(from, ctx.caller()));
        } else {
            self.allowances.insert((from, ctx.caller()), remaining);
        }
        Ok(())
    }

    /// Grants `spender` an allowance of `amount` over the caller's
    /// balance, replacing any previous grant.
    pub fn approve(&mut self, ctx: &CallContext, spender: Address, amount: Amount) {
        if amount.is_zero() {
            self.allowances.remove(&(ctx.caller(), spender));
        } else {
            self.allowances.insert((ctx.caller(), spender), amount);
        }
    }

    fn do_transfer(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        gross: Amount,
    ) -> crate::error::Result<()> {
        if from.is_zero() || to.is_zero() {
            return Err(TokenError::ConfigInvalid("zero address transfer"));
        }
        if self.registry.is_blacklisted(&from) || self.registry.is_blacklisted(&to) {
            return Err(TokenError::AddressBlacklisted);
        }
        let bypass =
            self.registry.is_whitelisted(&from) || self.registry.is_whitelisted(&to);
        if !self.config.trading_enabled && !bypass {
            return Err(TokenError::TradingNotEnabled);
        }

        let counter = if bypass {
            None
        } else {
            Some(self.limits.check(
                &from,
                self.balance_of(&to),
                gross,
                ctx.day(),
                self.config.max_tx_amount,
                self.config.max_wallet_amount,
                self.config.daily_tx_limit,
            )?)
        };

        let fee_exempt =
            self.registry.is_fee_excluded(&from) || self.registry.is_fee_excluded(&to);
        let split = fees::split(gross, &self.config.taxes, fee_exempt)?;

        if self.balance_of(&from) < gross {
            return Err(TokenError::InsufficientBalance);
        }

        // External backend calls happen before any ledger write, so a swap
        // failure rejects the whole transfer.
        let liquify = self.plan_liquify(&from, &split)?;
        let outcome = match &liquify {
            Some(plan) => self.liquidity.execute(&mut self.backend, plan)?,
            None => None,
        };

        // The settlement moves ride the transfer commit: the marketing
        // payout out of the contract account and, when the backend legs
        // ran, the swapped and deposited tokens routed to the router
        // account so the supply stays conserved on the ledger.
        let mut moves = Vec::new();
        if let Some(plan) = &liquify {
            if !plan.marketing_payout.is_zero() {
                moves.push((
                    self.contract,
                    self.config.marketing_wallet,
                    plan.marketing_payout,
                ));
            }
            if outcome.is_some() {
                let to_pool = plan.swap_amount.safe_add(&plan.keep_amount)?;
                if !to_pool.is_zero() {
                    moves.push((self.contract, self.config.router, to_pool));
                }
            }
        }
        self.ledger
            .transfer_with_moves(from, to, self.contract, &split, &moves, &self.registry)?;

        if liquify.is_some() {
            self.liquidity.settle_marketing();
            if let Some(outcome) = outcome {
                info!(
                    swapped = %outcome.swapped,
                    settlement = %outcome.settlement,
                    liquefied = %outcome.liquefied,
                    "swap and liquify"
                );
                self.notifications.push(Notification::SwapAndLiquify {
                    swapped: outcome.swapped,
                    settlement: outcome.settlement,
                    liquefied: outcome.liquefied,
                });
            }
        } else {
            self.liquidity.accrue_marketing(split.marketing())?;
        }

        if let Some(counter) = counter {
            self.limits.commit(from, counter);
        }
        debug!(%from, %to, gross = %gross, net = %split.net(), "transfer");
        Ok(())
    }

    /// Plans a liquify for the contract balance this transfer would
    /// produce, or `None` when the trigger conditions are not met.
    ///
    /// The router never triggers as sender — its transfers are the swap
    /// legs of an in-flight liquify or pool operations, and re-entering
    /// from them is what the phase lock exists to prevent.
    fn plan_liquify(
        &self,
        from: &Address,
        split: &crate::domain::FeeBreakdown,
    ) -> crate::error::Result<Option<LiquifyPlan>> {
        if *from == self.config.router || *from == self.contract {
            return Ok(None);
        }
        let landing = split.liquidity().safe_add(&split.marketing())?;
        let prospective = self.balance_of(&self.contract).safe_add(&landing)?;
        if !self.liquidity.should_trigger(
            prospective,
            self.config.liquify_threshold,
            self.config.swap_and_liquify_enabled,
        ) {
            return Ok(None);
        }
        // The in-flight transfer's marketing slice joins the payout.
        Ok(Some(self.liquidity.plan(prospective, split.marketing())?))
    }

    // -- admin surface ---------------------------------------------------

    fn require_admin(&self, ctx: &CallContext) -> crate::error::Result<()> {
        if ctx.caller() != self.admin {
            return Err(TokenError::Unauthorized);
        }
        Ok(())
    }

    /// Replaces the tax schedule.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers. The schedule
    /// itself is validated at construction.
    pub fn set_taxes(&mut self, ctx: &CallContext, taxes: TaxSchedule) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        taxes.validate()?;
        self.config.taxes = taxes;
        info!(%taxes, "taxes updated");
        self.notifications.push(Notification::TaxesUpdated { taxes });
        Ok(())
    }

    /// Replaces the transfer limits.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers,
    /// [`TokenError::ConfigInvalid`] on a zero limit.
    pub fn set_limits(
        &mut self,
        ctx: &CallContext,
        max_tx_amount: Amount,
        max_wallet_amount: Amount,
        daily_tx_limit: u32,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        if max_tx_amount.is_zero() {
            return Err(TokenError::ConfigInvalid("zero max tx amount"));
        }
        if max_wallet_amount.is_zero() {
            return Err(TokenError::ConfigInvalid("zero max wallet amount"));
        }
        if daily_tx_limit == 0 {
            return Err(TokenError::ConfigInvalid("zero daily tx limit"));
        }
        self.config.max_tx_amount = max_tx_amount;
        self.config.max_wallet_amount = max_wallet_amount;
        self.config.daily_tx_limit = daily_tx_limit;
        self.notifications.push(Notification::LimitsUpdated {
            max_tx_amount,
            max_wallet_amount,
            daily_tx_limit,
        });
        Ok(())
    }

    /// Replaces the liquify trigger threshold.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers,
    /// [`TokenError::ConfigInvalid`] on a zero threshold.
    pub fn set_liquify_threshold(
        &mut self,
        ctx: &CallContext,
        threshold: Amount,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        if threshold.is_zero() {
            return Err(TokenError::ConfigInvalid("zero liquify threshold"));
        }
        self.config.liquify_threshold = threshold;
        self.notifications
            .push(Notification::LiquifyThresholdUpdated { threshold });
        Ok(())
    }

    /// Points the token at a new router. The new router is reward-excluded
    /// like the genesis one.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers,
    /// [`TokenError::ConfigInvalid`] on the zero address.
    pub fn set_router(&mut self, ctx: &CallContext, router: Address) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        if router.is_zero() {
            return Err(TokenError::ConfigInvalid("zero router"));
        }
        if !self.registry.is_reward_excluded(&router) {
            self.ledger.capture_explicit(router, &self.registry);
            self.registry.set_reward_excluded(router, true);
        }
        self.config.router = router;
        self.notifications.push(Notification::RouterUpdated { router });
        Ok(())
    }

    /// Replaces the marketing wallet. The new wallet is fee-excluded like
    /// the genesis one.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers,
    /// [`TokenError::ConfigInvalid`] on the zero address.
    pub fn set_marketing_wallet(
        &mut self,
        ctx: &CallContext,
        wallet: Address,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        if wallet.is_zero() {
            return Err(TokenError::ConfigInvalid("zero marketing"));
        }
        self.registry.set_fee_excluded(wallet, true);
        self.config.marketing_wallet = wallet;
        self.notifications
            .push(Notification::MarketingWalletUpdated { wallet });
        Ok(())
    }

    /// Toggles `account`'s fee exclusion.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers.
    pub fn set_fee_excluded(
        &mut self,
        ctx: &CallContext,
        account: Address,
        excluded: bool,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        self.registry.set_fee_excluded(account, excluded);
        self.notifications
            .push(Notification::FeeExclusionSet { account, excluded });
        Ok(())
    }

    /// Toggles `account`'s whitelist flag.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers.
    pub fn set_whitelisted(
        &mut self,
        ctx: &CallContext,
        account: Address,
        listed: bool,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        self.registry.set_whitelisted(account, listed);
        self.notifications
            .push(Notification::WhitelistSet { account, listed });
        Ok(())
    }

    /// Toggles `account`'s blacklist flag.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers.
    pub fn set_blacklisted(
        &mut self,
        ctx: &CallContext,
        account: Address,
        listed: bool,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        self.registry.set_blacklisted(account, listed);
        self.notifications
            .push(Notification::BlacklistSet { account, listed });
        Ok(())
    }

    /// Opens public trading. One-way; calling again is a no-op and emits
    /// nothing.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers.
    pub fn enable_trading(&mut self, ctx: &CallContext) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        if self.config.trading_enabled {
            return Ok(());
        }
        self.config.trading_enabled = true;
        info!("trading enabled");
        self.notifications.push(Notification::TradingEnabled);
        Ok(())
    }

    /// Toggles the swap-and-liquify feature.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers.
    pub fn set_swap_and_liquify(
        &mut self,
        ctx: &CallContext,
        enabled: bool,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        self.config.swap_and_liquify_enabled = enabled;
        self.notifications
            .push(Notification::SwapAndLiquifySet { enabled });
        Ok(())
    }

    /// Removes `account` from the reward-eligible pool, freezing its
    /// balance in explicit form.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers,
    /// [`TokenError::AlreadyExcluded`] when already excluded.
    pub fn exclude_from_reward(
        &mut self,
        ctx: &CallContext,
        account: Address,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        if self.registry.is_reward_excluded(&account) {
            return Err(TokenError::AlreadyExcluded);
        }
        self.ledger.capture_explicit(account, &self.registry);
        self.registry.set_reward_excluded(account, true);
        self.notifications
            .push(Notification::ExcludedFromReward { account });
        Ok(())
    }

    /// Returns `account` to the reward-eligible pool at its current
    /// balance; it participates in redistribution from now on.
    ///
    /// # Errors
    ///
    /// [`TokenError::Unauthorized`] for non-admin callers,
    /// [`TokenError::NotExcluded`] when not currently excluded.
    pub fn include_in_reward(
        &mut self,
        ctx: &CallContext,
        account: Address,
    ) -> crate::error::Result<()> {
        self.require_admin(ctx)?;
        if !self.registry.is_reward_excluded(&account) {
            return Err(TokenError::NotExcluded);
        }
        // Convert at the rate that still excludes the account, then flip.
        self.ledger.rederive_reflected(account, &self.registry)?;
        self.registry.set_reward_excluded(account, false);
        self.notifications
            .push(Notification::IncludedInReward { account });
        Ok(())
    }
}
