//! Host Collaborators
//!
//! The contract consumes three capabilities from whatever executes it:
//! persistent key-value storage, witness checks, and the platform's
//! administrative primitives. Each is a trait so the engine runs the same
//! against a real host or the in-memory implementations below.

use std::collections::{BTreeMap, BTreeSet};

use borsh::{BorshDeserialize, BorshSerialize};
use nep5_common::{AccountId, MigrateRequest, TokenError, TokenResult};

// ============ Traits ============

/// Byte-keyed storage scoped to this contract
pub trait Storage {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;
    fn put(&mut self, key: &[u8], value: Vec<u8>);
    fn delete(&mut self, key: &[u8]);
}

/// Answers whether the invocation's originator controls an account
pub trait Witness {
    fn check_witness(&self, account: &AccountId) -> bool;
}

/// Administrative primitives of the host platform
pub trait Platform {
    /// Replace the running code and metadata, keeping storage
    fn migrate(&mut self, request: &MigrateRequest) -> TokenResult<()>;
    /// Destroy the contract together with its storage
    fn destroy(&mut self) -> TokenResult<()>;
}

// ============ In-Memory Storage ============

/// Ordered in-memory storage. Borsh-encodable so a host can persist it
/// between invocations.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct MemoryStorage {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &[u8], value: Vec<u8>) {
        self.entries.insert(key.to_vec(), value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.entries.remove(key);
    }
}

// ============ Static Witness ============

/// Fixed set of accounts the current invocation has witnessed
#[derive(Debug, Clone, Default)]
pub struct StaticWitness {
    authorized: BTreeSet<AccountId>,
}

impl StaticWitness {
    /// Witness nothing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(accounts: impl IntoIterator<Item = AccountId>) -> Self {
        Self {
            authorized: accounts.into_iter().collect(),
        }
    }

    pub fn authorize(&mut self, account: AccountId) {
        self.authorized.insert(account);
    }
}

impl Witness for StaticWitness {
    fn check_witness(&self, account: &AccountId) -> bool {
        self.authorized.contains(account)
    }
}

// ============ Recording Platform ============

/// Platform that records forwarded requests instead of acting on them.
/// The embedding host applies the effects once the invocation completes.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlatform {
    migrations: Vec<MigrateRequest>,
    destroyed: bool,
    rejecting: bool,
}

impl RecordingPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform that refuses every request
    pub fn rejecting() -> Self {
        Self {
            rejecting: true,
            ..Self::default()
        }
    }

    pub fn migrations(&self) -> &[MigrateRequest] {
        &self.migrations
    }

    pub fn destroyed(&self) -> bool {
        self.destroyed
    }
}

impl Platform for RecordingPlatform {
    fn migrate(&mut self, request: &MigrateRequest) -> TokenResult<()> {
        if self.rejecting {
            return Err(TokenError::PlatformRejected { operation: "migrate" });
        }
        self.migrations.push(request.clone());
        Ok(())
    }

    fn destroy(&mut self) -> TokenResult<()> {
        if self.rejecting {
            return Err(TokenError::PlatformRejected { operation: "delete" });
        }
        self.destroyed = true;
        Ok(())
    }
}
