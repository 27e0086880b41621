//! End-to-end scenarios: deployment, admin surface, reflection
//! redistribution, exclusion round trips, limits, and swap-and-liquify.

#![allow(clippy::panic)]

use remora_token::config::{
    GenesisConfig, DEFAULT_DAILY_TX_LIMIT, DEFAULT_LIQUIFY_THRESHOLD, DEFAULT_MAX_TX_AMOUNT,
    DEFAULT_MAX_WALLET_AMOUNT, DEFAULT_TOTAL_SUPPLY,
};
use remora_token::domain::{Address, Amount, BasisPoints, Day, TaxSchedule};
use remora_token::error::TokenError;
use remora_token::events::Notification;
use remora_token::liquidity::SwapBackend;
use remora_token::token::{CallContext, ReflectionToken};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const DEPLOYER: u8 = 1;
const CONTRACT: u8 = 2;
const ROUTER: u8 = 3;
const MARKETING: u8 = 4;
const USER_A: u8 = 5;
const USER_B: u8 = 6;

fn addr(tag: u8) -> Address {
    Address::from_bytes([tag; 32])
}

fn ctx(caller: u8) -> CallContext {
    CallContext::new(addr(caller), Day::new(0))
}

fn ctx_on(caller: u8, day: u64) -> CallContext {
    CallContext::new(addr(caller), Day::new(day))
}

/// Swap backend that records its calls and settles 1:1.
#[derive(Default)]
struct MockRouter {
    swaps: Vec<Amount>,
    deposits: Vec<(Amount, Amount)>,
    fail_swap: bool,
}

impl SwapBackend for MockRouter {
    fn swap_for_settlement(&mut self, amount_in: Amount) -> remora_token::error::Result<Amount> {
        if self.fail_swap {
            return Err(TokenError::SwapFailed("router rejected the swap"));
        }
        self.swaps.push(amount_in);
        Ok(amount_in)
    }

    fn add_liquidity(
        &mut self,
        token_amount: Amount,
        settlement_amount: Amount,
    ) -> remora_token::error::Result<()> {
        self.deposits.push((token_amount, settlement_amount));
        Ok(())
    }
}

/// Token over a raw 100 000-unit supply so balances stay human-readable.
fn deploy() -> ReflectionToken<MockRouter> {
    let Ok(genesis) = GenesisConfig::with_supply(
        addr(DEPLOYER),
        addr(CONTRACT),
        addr(ROUTER),
        addr(MARKETING),
        Amount::new(100_000),
    ) else {
        panic!("valid genesis");
    };
    let Ok(token) = ReflectionToken::new(&genesis, MockRouter::default()) else {
        panic!("deployment succeeds");
    };
    token
}

fn taxes(r: u32, l: u32, b: u32, m: u32) -> TaxSchedule {
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

/// Deployed token with trading open and the supply split between two users.
fn deploy_traded(first: u128, second: u128) -> ReflectionToken<MockRouter> {
    let mut token = deploy();
    token.enable_trading(&ctx(DEPLOYER)).unwrap();
    if first > 0 {
        token
            .transfer(&ctx(DEPLOYER), addr(USER_A), Amount::new(first))
            .unwrap();
    }
    if second > 0 {
        token
            .transfer(&ctx(DEPLOYER), addr(USER_B), Amount::new(second))
            .unwrap();
    }
    token.take_notifications();
    token
}

fn holder_sum(token: &ReflectionToken<MockRouter>) -> u128 {
    [DEPLOYER, CONTRACT, ROUTER, MARKETING, USER_A, USER_B]
        .iter()
        .map(|tag| token.balance_of(&addr(*tag)).get())
        .sum()
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

#[test]
fn default_genesis_constants() {
    let Ok(genesis) = GenesisConfig::new(
        addr(DEPLOYER),
        addr(CONTRACT),
        addr(ROUTER),
        addr(MARKETING),
    ) else {
        panic!("valid genesis");
    };
    let Ok(token) = ReflectionToken::new(&genesis, MockRouter::default()) else {
        panic!("deployment succeeds");
    };
    assert_eq!(token.total_supply(), DEFAULT_TOTAL_SUPPLY);
    assert_eq!(token.balance_of(&addr(DEPLOYER)), DEFAULT_TOTAL_SUPPLY);
    let cfg = token.config();
    assert_eq!(cfg.max_tx_amount, DEFAULT_MAX_TX_AMOUNT);
    assert_eq!(cfg.max_wallet_amount, DEFAULT_MAX_WALLET_AMOUNT);
    assert_eq!(cfg.daily_tx_limit, DEFAULT_DAILY_TX_LIMIT);
    assert_eq!(cfg.liquify_threshold, DEFAULT_LIQUIFY_THRESHOLD);
    assert!(cfg.taxes.is_zero());
    assert!(!cfg.trading_enabled);
    assert!(cfg.swap_and_liquify_enabled);
}

#[test]
fn genesis_eligibility_flags() {
    let token = deploy();
    let reg = token.registry();
    assert!(reg.is_fee_excluded(&addr(DEPLOYER)));
    assert!(reg.is_fee_excluded(&addr(CONTRACT)));
    assert!(reg.is_fee_excluded(&addr(MARKETING)));
    assert!(reg.is_whitelisted(&addr(DEPLOYER)));
    assert!(reg.is_reward_excluded(&addr(DEPLOYER)));
    assert!(reg.is_reward_excluded(&addr(CONTRACT)));
    assert!(reg.is_reward_excluded(&addr(ROUTER)));
    assert!(!reg.is_reward_excluded(&addr(MARKETING)));
}

// ---------------------------------------------------------------------------
// Admin surface
// ---------------------------------------------------------------------------

#[test]
fn admin_calls_rejected_for_strangers() {
    let mut token = deploy();
    let stranger = ctx(USER_A);
    let Err(TokenError::Unauthorized) = token.set_taxes(&stranger, taxes(100, 0, 0, 0)) else {
        panic!("expected Unauthorized");
    };
    let Err(TokenError::Unauthorized) = token.set_blacklisted(&stranger, addr(USER_B), true)
    else {
        panic!("expected Unauthorized");
    };
    let Err(TokenError::Unauthorized) = token.exclude_from_reward(&stranger, addr(USER_B))
    else {
        panic!("expected Unauthorized");
    };
}

#[test]
fn tax_ceiling_enforced() {
    // 15% combined is the ceiling; one basis point more fails.
    let Err(TokenError::ConfigInvalid("tax too high")) = TaxSchedule::new(
        BasisPoints::new(500),
        BasisPoints::new(500),
        BasisPoints::new(400),
        BasisPoints::new(101),
    ) else {
        panic!("expected tax too high");
    };
    assert!(TaxSchedule::new(
        BasisPoints::new(500),
        BasisPoints::new(500),
        BasisPoints::new(400),
        BasisPoints::new(100),
    )
    .is_ok());
}

#[test]
fn setters_update_config_and_notify() {
    let mut token = deploy();
    let admin = ctx(DEPLOYER);

    token
        .set_limits(&admin, Amount::new(100), Amount::new(1_000), 2)
        .unwrap();
    token.set_liquify_threshold(&admin, Amount::new(200)).unwrap();
    token.set_taxes(&admin, taxes(200, 0, 0, 0)).unwrap();

    let cfg = token.config();
    assert_eq!(cfg.max_tx_amount, Amount::new(100));
    assert_eq!(cfg.daily_tx_limit, 2);
    assert_eq!(cfg.liquify_threshold, Amount::new(200));

    let notes = token.take_notifications();
    assert!(notes.contains(&Notification::LimitsUpdated {
        max_tx_amount: Amount::new(100),
        max_wallet_amount: Amount::new(1_000),
        daily_tx_limit: 2,
    }));
    assert!(notes.contains(&Notification::LiquifyThresholdUpdated {
        threshold: Amount::new(200),
    }));
}

#[test]
fn zero_values_rejected_by_setters() {
    let mut token = deploy();
    let admin = ctx(DEPLOYER);
    assert!(token
        .set_limits(&admin, Amount::ZERO, Amount::new(1), 1)
        .is_err());
    assert!(token.set_liquify_threshold(&admin, Amount::ZERO).is_err());
    assert!(token.set_router(&admin, Address::zero()).is_err());
    assert!(token.set_marketing_wallet(&admin, Address::zero()).is_err());
}

#[test]
fn new_router_is_reward_excluded() {
    let mut token = deploy();
    token.set_router(&ctx(DEPLOYER), addr(7)).unwrap();
    assert!(token.registry().is_reward_excluded(&addr(7)));
    assert_eq!(token.config().router, addr(7));
}

// ---------------------------------------------------------------------------
// Trading gate and blacklist
// ---------------------------------------------------------------------------

#[test]
fn trading_closed_blocks_public_transfers() {
    let mut token = deploy();
    // Whitelisted deployer can seed wallets before launch.
    token
        .transfer(&ctx(DEPLOYER), addr(USER_A), Amount::new(1_000))
        .unwrap();
    let Err(TokenError::TradingNotEnabled) =
        token.transfer(&ctx(USER_A), addr(USER_B), Amount::new(10))
    else {
        panic!("expected TradingNotEnabled");
    };
    token.enable_trading(&ctx(DEPLOYER)).unwrap();
    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(10))
        .unwrap();
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(10));
}

#[test]
fn blacklisted_account_cannot_move_tokens() {
    let mut token = deploy_traded(1_000, 0);
    token
        .set_blacklisted(&ctx(DEPLOYER), addr(USER_A), true)
        .unwrap();
    let Err(TokenError::AddressBlacklisted) =
        token.transfer(&ctx(USER_A), addr(USER_B), Amount::new(1))
    else {
        panic!("expected AddressBlacklisted");
    };
    // Unlisting restores transfers.
    token
        .set_blacklisted(&ctx(DEPLOYER), addr(USER_A), false)
        .unwrap();
    assert!(token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(1))
        .is_ok());
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

#[test]
fn limits_enforced_for_public_transfers() {
    let mut token = deploy_traded(5_000, 0);
    let admin = ctx(DEPLOYER);
    token
        .set_limits(&admin, Amount::new(100), Amount::new(150), 2)
        .unwrap();

    let Err(TokenError::TxAmountExceeded) =
        token.transfer(&ctx(USER_A), addr(USER_B), Amount::new(101))
    else {
        panic!("expected TxAmountExceeded");
    };

    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(100))
        .unwrap();
    let Err(TokenError::WalletAmountExceeded) =
        token.transfer(&ctx(USER_A), addr(USER_B), Amount::new(100))
    else {
        panic!("expected WalletAmountExceeded");
    };

    // Second counted transfer exhausts the daily quota of two.
    token
        .transfer(&ctx(USER_A), addr(7), Amount::new(100))
        .unwrap();
    let Err(TokenError::DailyLimitExceeded) =
        token.transfer(&ctx(USER_A), addr(8), Amount::new(10))
    else {
        panic!("expected DailyLimitExceeded");
    };

    // Next day the quota resets.
    assert!(token
        .transfer(&ctx_on(USER_A, 1), addr(8), Amount::new(10))
        .is_ok());
}

#[test]
fn rejected_transfers_consume_no_quota() {
    let mut token = deploy_traded(5_000, 0);
    token
        .set_limits(&ctx(DEPLOYER), Amount::new(100), Amount::new(10_000), 2)
        .unwrap();
    for _ in 0..5 {
        let Err(TokenError::TxAmountExceeded) =
            token.transfer(&ctx(USER_A), addr(USER_B), Amount::new(101))
        else {
            panic!("expected TxAmountExceeded");
        };
    }
    assert_eq!(token.daily_count(&addr(USER_A), Day::new(0)), 0);
}

#[test]
fn whitelisted_sender_bypasses_limits() {
    let mut token = deploy_traded(5_000, 0);
    token
        .set_limits(&ctx(DEPLOYER), Amount::new(10), Amount::new(20), 1)
        .unwrap();
    token
        .set_whitelisted(&ctx(DEPLOYER), addr(USER_A), true)
        .unwrap();
    // Far over every limit, still accepted.
    assert!(token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(4_000))
        .is_ok());
}

// ---------------------------------------------------------------------------
// Reflection
// ---------------------------------------------------------------------------

#[test]
fn fee_free_transfers_conserve_exactly() {
    let token = deploy_traded(50_000, 50_000);
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(50_000));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(50_000));
    assert_eq!(holder_sum(&token), 100_000);
}

#[test]
fn reflection_fee_redistributes_to_holders() {
    let mut token = deploy_traded(50_000, 50_000);
    token.set_taxes(&ctx(DEPLOYER), taxes(200, 0, 0, 0)).unwrap();

    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(100))
        .unwrap();

    // 2-unit fee absorbed into the rate; the recipient's share of it
    // lands on top of the 98-unit net.
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(49_900));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(50_099));
    // Truncation may strand at most a unit of the absorbed fee.
    assert_eq!(holder_sum(&token), 99_999);
    assert_eq!(token.total_supply(), Amount::new(100_000));
}

#[test]
fn excluded_recipient_gets_no_reflection_share() {
    let mut token = deploy_traded(50_000, 50_000);
    token.set_taxes(&ctx(DEPLOYER), taxes(200, 0, 0, 0)).unwrap();
    token
        .exclude_from_reward(&ctx(DEPLOYER), addr(USER_B))
        .unwrap();

    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(100))
        .unwrap();

    // The whole 2-unit fee goes to the only eligible holder, the sender.
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(49_902));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(50_098));
}

#[test]
fn included_account_rejoins_redistribution() {
    let mut token = deploy_traded(50_000, 50_000);
    let admin = ctx(DEPLOYER);
    token.set_taxes(&admin, taxes(200, 0, 0, 0)).unwrap();
    token.exclude_from_reward(&admin, addr(USER_B)).unwrap();
    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(100))
        .unwrap();

    token.include_in_reward(&admin, addr(USER_B)).unwrap();
    // Balance carries over through the representation change.
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(49_900));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(50_096));

    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(50))
        .unwrap();
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(49_851));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(50_146));
}

#[test]
fn four_slice_transfer_with_burn() {
    let mut token = deploy_traded(60_000, 40_000);
    token
        .set_taxes(&ctx(DEPLOYER), taxes(200, 300, 100, 100))
        .unwrap();
    // Keep the liquify out of this scenario.
    token
        .set_swap_and_liquify(&ctx(DEPLOYER), false)
        .unwrap();

    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(10_000))
        .unwrap();

    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(50_100));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(49_399));
    assert_eq!(token.balance_of(&addr(CONTRACT)), Amount::new(400));
    assert_eq!(token.total_supply(), Amount::new(99_900));
    assert_eq!(holder_sum(&token), 99_899);
    assert_eq!(token.marketing_accrued(), Amount::new(100));
}

#[test]
fn tiny_transfer_degrades_to_pure_move() {
    let mut token = deploy_traded(1_000, 0);
    token.set_taxes(&ctx(DEPLOYER), taxes(1, 1, 1, 1)).unwrap();
    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(1))
        .unwrap();
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(999));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(1));
}

#[test]
fn fee_excluded_endpoint_skips_fees() {
    let mut token = deploy_traded(50_000, 0);
    let admin = ctx(DEPLOYER);
    token.set_taxes(&admin, taxes(200, 300, 100, 100)).unwrap();
    token
        .set_fee_excluded(&admin, addr(USER_A), true)
        .unwrap();
    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(10_000))
        .unwrap();
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(10_000));
    assert_eq!(token.balance_of(&addr(CONTRACT)), Amount::ZERO);
}

#[test]
fn insufficient_balance_rejected() {
    let mut token = deploy_traded(100, 0);
    let Err(TokenError::InsufficientBalance) =
        token.transfer(&ctx(USER_A), addr(USER_B), Amount::new(101))
    else {
        panic!("expected InsufficientBalance");
    };
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(100));
}

// ---------------------------------------------------------------------------
// Swap and liquify
// ---------------------------------------------------------------------------

/// Trading token with 3% liquidity + 1% marketing fees and a 200-unit
/// liquify threshold.
fn deploy_liquifying() -> ReflectionToken<MockRouter> {
    let mut token = deploy_traded(50_000, 0);
    let admin = ctx(DEPLOYER);
    token.set_taxes(&admin, taxes(0, 300, 0, 100)).unwrap();
    token
        .set_liquify_threshold(&admin, Amount::new(200))
        .unwrap();
    token.take_notifications();
    token
}

#[test]
fn liquify_triggers_at_threshold() {
    let mut token = deploy_liquifying();

    // First transfer lands 120 units of fees: below the threshold.
    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(3_000))
        .unwrap();
    assert!(token.backend().swaps.is_empty());
    assert_eq!(token.balance_of(&addr(CONTRACT)), Amount::new(120));
    assert_eq!(token.marketing_accrued(), Amount::new(30));

    // Second transfer would put the contract at 240: triggers.
    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(3_000))
        .unwrap();

    // Marketing payout 60, remaining 180 split into swap 90 + deposit 90.
    assert_eq!(token.backend().swaps, vec![Amount::new(90)]);
    assert_eq!(
        token.backend().deposits,
        vec![(Amount::new(90), Amount::new(90))]
    );
    assert_eq!(token.balance_of(&addr(MARKETING)), Amount::new(60));
    assert_eq!(token.balance_of(&addr(ROUTER)), Amount::new(180));
    assert_eq!(token.balance_of(&addr(CONTRACT)), Amount::ZERO);
    assert_eq!(token.marketing_accrued(), Amount::ZERO);
    assert_eq!(token.balance_of(&addr(USER_A)), Amount::new(44_000));
    assert_eq!(token.balance_of(&addr(USER_B)), Amount::new(5_760));
    assert_eq!(holder_sum(&token), 100_000);

    let notes = token.take_notifications();
    assert!(notes.contains(&Notification::SwapAndLiquify {
        swapped: Amount::new(90),
        settlement: Amount::new(90),
        liquefied: Amount::new(90),
    }));
}

#[test]
fn disabled_liquify_never_triggers() {
    let mut token = deploy_liquifying();
    token
        .set_swap_and_liquify(&ctx(DEPLOYER), false)
        .unwrap();
    for _ in 0..4 {
        token
            .transfer(&ctx(USER_A), addr(USER_B), Amount::new(3_000))
            .unwrap();
    }
    assert!(token.backend().swaps.is_empty());
    assert_eq!(token.balance_of(&addr(CONTRACT)), Amount::new(480));
}

#[test]
fn swap_failure_aborts_the_whole_transfer() {
    let mut token = deploy_liquifying();
    token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(3_000))
        .unwrap();

    token.backend_mut().fail_swap = true;
    let balance_a = token.balance_of(&addr(USER_A));
    let balance_b = token.balance_of(&addr(USER_B));
    let accrued = token.marketing_accrued();

    let Err(TokenError::SwapFailed(_)) =
        token.transfer(&ctx(USER_A), addr(USER_B), Amount::new(3_000))
    else {
        panic!("expected SwapFailed");
    };

    // Nothing moved: balances, contract holdings, accrual all intact.
    assert_eq!(token.balance_of(&addr(USER_A)), balance_a);
    assert_eq!(token.balance_of(&addr(USER_B)), balance_b);
    assert_eq!(token.balance_of(&addr(CONTRACT)), Amount::new(120));
    assert_eq!(token.marketing_accrued(), accrued);
    assert!(token.backend().deposits.is_empty());

    // A later transfer succeeds once the router recovers.
    token.backend_mut().fail_swap = false;
    assert!(token
        .transfer(&ctx(USER_A), addr(USER_B), Amount::new(3_000))
        .is_ok());
}

// ---------------------------------------------------------------------------
// Allowances
// ---------------------------------------------------------------------------

#[test]
fn transfer_from_respects_fees_and_allowance() {
    let mut token = deploy_traded(50_000, 0);
    token.set_taxes(&ctx(DEPLOYER), taxes(200, 0, 0, 0)).unwrap();

    token.approve(&ctx(USER_A), addr(USER_B), Amount::new(1_000));
    token
        .transfer_from(&ctx(USER_B), addr(USER_A), addr(7), Amount::new(400))
        .unwrap();

    assert_eq!(token.allowance(&addr(USER_A), &addr(USER_B)), Amount::new(600));
    // 2% reflection fee applies to the delegated transfer as well.
    assert!(token.balance_of(&addr(7)) >= Amount::new(392));
    assert!(token.balance_of(&addr(7)) < Amount::new(400));
}
