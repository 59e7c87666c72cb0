//! Account Store
//!
//! Sparse account → balance mapping over the host storage. A zero balance
//! is never stored: writing zero deletes the entry, and a missing entry
//! reads as zero.

use nep5_common::{constants::storage::TOTAL_SUPPLY_KEY, AccountId, Balance, TokenResult};

use crate::runtime::Storage;

/// Balance view over the contract's storage handle
pub struct AccountStore<'a> {
    storage: &'a mut dyn Storage,
}

impl<'a> AccountStore<'a> {
    pub fn new(storage: &'a mut dyn Storage) -> Self {
        Self { storage }
    }

    /// Stored balance, or zero when the account has no entry
    pub fn get_balance(&self, account: &AccountId) -> TokenResult<Balance> {
        match self.storage.get(account.as_bytes()) {
            Some(bytes) => Balance::from_storage_bytes(&bytes),
            None => Ok(Balance::zero()),
        }
    }

    /// Overwrite a balance; zero removes the entry
    pub fn set_balance(&mut self, account: &AccountId, balance: &Balance) {
        if balance.is_zero() {
            self.storage.delete(account.as_bytes());
        } else {
            self.storage.put(account.as_bytes(), balance.to_storage_bytes());
        }
    }

    /// Recorded total supply, `None` before issuance
    pub fn total_supply_marker(&self) -> TokenResult<Option<Balance>> {
        match self.storage.get(TOTAL_SUPPLY_KEY) {
            Some(bytes) if !bytes.is_empty() => Balance::from_storage_bytes(&bytes).map(Some),
            _ => Ok(None),
        }
    }

    pub fn write_total_supply_marker(&mut self, total_supply: &Balance) {
        self.storage.put(TOTAL_SUPPLY_KEY, total_supply.to_storage_bytes());
    }
}
