//! NEP5 Token Contract
//!
//! Fixed-supply fungible token: one-time issuance to an owner, witnessed
//! transfers, constant metadata queries, and unguarded administrative
//! pass-throughs to the host platform.
//!
//! The contract never talks to the outside world directly. Everything it
//! needs from its host comes in through [`TokenContext`]: a storage handle,
//! a witness checker and the platform's admin primitives. Notifications
//! are collected in the context's [`EventLog`] and handed back to the host.
//!
//! ## Layout
//!
//! - [`store`]: sparse account → balance mapping over host storage
//! - [`issuance`]: `deploy`, the only path that creates value
//! - [`transfer`]: the transfer engine
//! - [`admin`]: `migrate` / `delete` forwarding
//! - [`dispatch`]: untyped invocation → [`TokenOperation`] → result
//! - [`host`]: in-process host with staged commits and CBOR wire format

use num_bigint::BigInt;

pub mod admin;
pub mod dispatch;
pub mod host;
pub mod issuance;
pub mod runtime;
pub mod store;
pub mod transfer;


pub use dispatch::{dispatch, Invocation, Outcome};
pub use runtime::{MemoryStorage, Platform, RecordingPlatform, StaticWitness, Storage, Witness};
pub use store::AccountStore;

use nep5_common::{
    constants::token,
    events::EventLog,
    types::{AccountId, Balance, ContractParameter, TokenOperation},
    TokenResult,
};

// ============ Token Configuration ============

/// Metadata and supply the contract is deployed with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Account credited with the whole supply on deploy
    pub owner: AccountId,
    /// Minted once, in minimal units
    pub total_supply: Balance,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: token::NAME.into(),
            symbol: token::SYMBOL.into(),
            decimals: token::DECIMALS,
            owner: AccountId::new(token::OWNER_SCRIPT_HASH),
            total_supply: Balance::from(token::TOTAL_SUPPLY),
        }
    }
}

impl TokenConfig {
    /// Default metadata with a different owner
    pub fn with_owner(owner: AccountId) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    pub fn owner(&self) -> AccountId {
        self.owner
    }

    /// Configured supply, whether or not deploy has run
    pub fn total_supply(&self) -> &Balance {
        &self.total_supply
    }
}

// ============ Invocation Context ============

/// Everything one invocation may touch
pub struct TokenContext<'a> {
    pub config: &'a TokenConfig,
    pub store: AccountStore<'a>,
    pub witness: &'a dyn Witness,
    pub platform: &'a mut dyn Platform,
    /// Notifications emitted so far
    pub events: EventLog,
}

impl<'a> TokenContext<'a> {
    pub fn new(
        config: &'a TokenConfig,
        storage: &'a mut dyn Storage,
        witness: &'a dyn Witness,
        platform: &'a mut dyn Platform,
    ) -> Self {
        Self {
            config,
            store: AccountStore::new(storage),
            witness,
            platform,
            events: EventLog::new(),
        }
    }
}

// ============ Execution ============

/// Run a typed operation
pub fn execute(ctx: &mut TokenContext<'_>, operation: &TokenOperation) -> TokenResult<ContractParameter> {
    match operation {
        TokenOperation::Deploy => issuance::deploy(ctx).map(|()| true.into()),
        TokenOperation::TotalSupply => Ok(ctx.config.total_supply().into()),
        TokenOperation::Name => Ok(ContractParameter::String(ctx.config.name().into())),
        TokenOperation::Symbol => Ok(ContractParameter::String(ctx.config.symbol().into())),
        TokenOperation::Decimals => Ok(ContractParameter::Integer(BigInt::from(ctx.config.decimals()))),
        TokenOperation::Owner => Ok(ctx.config.owner().into()),
        TokenOperation::Transfer { from, to, amount } => {
            transfer::transfer(ctx, from, to, amount).map(|()| true.into())
        }
        TokenOperation::BalanceOf { account } => balance_of(ctx, account).map(|b| (&b).into()),
        TokenOperation::Migrate(request) => admin::migrate(ctx, request).map(|()| true.into()),
        TokenOperation::Delete => admin::delete(ctx).map(|()| true.into()),
    }
}

/// Balance of an account; never creates an entry
pub fn balance_of(ctx: &TokenContext<'_>, account: &AccountId) -> TokenResult<Balance> {
    ctx.store.get_balance(account)
}
