//! Genesis parameters and admin-mutable ledger configuration.
//!
//! [`GenesisConfig`] fixes the one-time deployment parameters; the
//! resulting [`LedgerConfig`] holds every admin-mutable knob. Mutations go
//! through the validated setters on
//! [`ReflectionToken`](crate::token::ReflectionToken) only — the
//! orchestrator never writes fields directly without validation.

use crate::domain::{Address, Amount, TaxSchedule};
use crate::error::TokenError;

/// One whole token in base units (18 decimal places).
pub const UNIT: u128 = 1_000_000_000_000_000_000;

/// Genesis token supply: 100 000 whole tokens.
pub const DEFAULT_TOTAL_SUPPLY: Amount = Amount::new(100_000 * UNIT);

/// Genesis per-transaction ceiling: 100 whole tokens.
pub const DEFAULT_MAX_TX_AMOUNT: Amount = Amount::new(100 * UNIT);

/// Genesis per-wallet ceiling: 1 000 whole tokens.
pub const DEFAULT_MAX_WALLET_AMOUNT: Amount = Amount::new(1_000 * UNIT);

/// Genesis liquify threshold: 5 whole tokens.
pub const DEFAULT_LIQUIFY_THRESHOLD: Amount = Amount::new(5 * UNIT);

/// Genesis daily transaction count limit per sender.
pub const DEFAULT_DAILY_TX_LIMIT: u32 = 50;

/// One-time deployment parameters.
///
/// # Validation
///
/// - `deployer`, `contract`, `router`, and `marketing_wallet` must be
///   non-zero and pairwise distinct where it matters (the contract cannot
///   be its own deployer).
/// - `total_supply` must be non-zero.
///
/// # Examples
///
/// ```
/// use remora_token::config::GenesisConfig;
/// use remora_token::domain::Address;
///
/// let genesis = GenesisConfig::new(
///     Address::from_bytes([1u8; 32]), // deployer
///     Address::from_bytes([2u8; 32]), // contract
///     Address::from_bytes([3u8; 32]), // router
///     Address::from_bytes([4u8; 32]), // marketing wallet
/// ).expect("valid genesis");
/// assert!(genesis.total_supply().get() > 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenesisConfig {
    deployer: Address,
    contract: Address,
    router: Address,
    marketing_wallet: Address,
    total_supply: Amount,
}

impl GenesisConfig {
    /// Creates a genesis configuration with the default total supply.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigInvalid`] on a zero address or when
    /// deployer and contract coincide.
    pub fn new(
        deployer: Address,
        contract: Address,
        router: Address,
        marketing_wallet: Address,
    ) -> crate::error::Result<Self> {
        Self::with_supply(deployer, contract, router, marketing_wallet, DEFAULT_TOTAL_SUPPLY)
    }

    /// Creates a genesis configuration with an explicit total supply.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigInvalid`] on a zero address, a zero
    /// supply, or when deployer and contract coincide.
    pub fn with_supply(
        deployer: Address,
        contract: Address,
        router: Address,
        marketing_wallet: Address,
        total_supply: Amount,
    ) -> crate::error::Result<Self> {
        if deployer.is_zero() {
            return Err(TokenError::ConfigInvalid("zero deployer"));
        }
        if contract.is_zero() {
            return Err(TokenError::ConfigInvalid("zero contract"));
        }
        if router.is_zero() {
            return Err(TokenError::ConfigInvalid("zero router"));
        }
        if marketing_wallet.is_zero() {
            return Err(TokenError::ConfigInvalid("zero marketing"));
        }
        if deployer == contract {
            return Err(TokenError::ConfigInvalid("deployer is the contract address"));
        }
        if total_supply.is_zero() {
            return Err(TokenError::ConfigInvalid("zero total supply"));
        }
        Ok(Self {
            deployer,
            contract,
            router,
            marketing_wallet,
            total_supply,
        })
    }

    /// Returns the deployer (initial supply holder and administrator).
    #[must_use]
    pub const fn deployer(&self) -> Address {
        self.deployer
    }

    /// Returns the ledger's own contract address.
    #[must_use]
    pub const fn contract(&self) -> Address {
        self.contract
    }

    /// Returns the AMM router address.
    #[must_use]
    pub const fn router(&self) -> Address {
        self.router
    }

    /// Returns the marketing wallet address.
    #[must_use]
    pub const fn marketing_wallet(&self) -> Address {
        self.marketing_wallet
    }

    /// Returns the genesis token supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }
}

/// Admin-mutable ledger parameters.
///
/// Constructed at genesis with the documented defaults; every later change
/// goes through a validated setter on the orchestrator. `trading_enabled`
/// only ever transitions false→true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerConfig {
    /// The four-slice tax schedule. Genesis default: all zero.
    pub taxes: TaxSchedule,
    /// Per-transaction gross amount ceiling.
    pub max_tx_amount: Amount,
    /// Per-wallet balance ceiling.
    pub max_wallet_amount: Amount,
    /// Daily transaction count limit per sender.
    pub daily_tx_limit: u32,
    /// Contract-held balance threshold that triggers swap-and-liquify.
    pub liquify_threshold: Amount,
    /// One-way trading gate. Starts closed.
    pub trading_enabled: bool,
    /// Whether the liquidity manager may trigger at all.
    pub swap_and_liquify_enabled: bool,
    /// External AMM router address.
    pub router: Address,
    /// Marketing fee payout address.
    pub marketing_wallet: Address,
}

impl LedgerConfig {
    /// Builds the genesis configuration for a fresh ledger.
    #[must_use]
    pub fn genesis(genesis: &GenesisConfig) -> Self {
        Self {
            taxes: TaxSchedule::default(),
            max_tx_amount: DEFAULT_MAX_TX_AMOUNT,
            max_wallet_amount: DEFAULT_MAX_WALLET_AMOUNT,
            daily_tx_limit: DEFAULT_DAILY_TX_LIMIT,
            liquify_threshold: DEFAULT_LIQUIFY_THRESHOLD,
            trading_enabled: false,
            swap_and_liquify_enabled: true,
            router: genesis.router(),
            marketing_wallet: genesis.marketing_wallet(),
        }
    }

    /// Validates the whole configuration.
    ///
    /// Setters validate their own arguments before writing; this method
    /// re-checks everything at once, for configurations loaded from
    /// external sources.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::ConfigInvalid`] on the first violated rule.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.taxes.validate()?;
        if self.max_tx_amount.is_zero() {
            return Err(TokenError::ConfigInvalid("zero max tx amount"));
        }
        if self.max_wallet_amount.is_zero() {
            return Err(TokenError::ConfigInvalid("zero max wallet amount"));
        }
        if self.daily_tx_limit == 0 {
            return Err(TokenError::ConfigInvalid("zero daily tx limit"));
        }
        if self.router.is_zero() {
            return Err(TokenError::ConfigInvalid("zero router"));
        }
        if self.marketing_wallet.is_zero() {
            return Err(TokenError::ConfigInvalid("zero marketing"));
        }
        Ok(())
    }
}
