//! In-process host
//!
//! Drives the contract the way a chain node would: every invocation runs
//! against a staged copy of storage that replaces the committed state only
//! once dispatch has returned, witnesses come from the invocation itself,
//! and platform requests take effect after the call. Invocations and
//! outcomes travel as CBOR. Committed state persists as a borsh snapshot
//! that keeps a destroyed contract destroyed across runs.

use std::io::{Read, Write};
use std::path::Path;

use borsh::{BorshDeserialize, BorshSerialize};
use nep5_common::{events::TokenEvent, MigrateRequest};
use thiserror::Error;
use tracing::{debug, info};

use crate::dispatch::{dispatch, failure_value, Invocation, Outcome};
use crate::runtime::{MemoryStorage, RecordingPlatform, StaticWitness};
use crate::{TokenConfig, TokenContext};

/// Errors at the host's I/O edges. Contract failures never show up here.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("malformed CBOR: {0}")]
    Decode(#[from] ciborium::de::Error<std::io::Error>),

    #[error("CBOR encoding failed: {0}")]
    Encode(#[from] ciborium::ser::Error<std::io::Error>),

    #[error("state snapshot: {0}")]
    Snapshot(std::io::Error),

    #[error("state file: {0}")]
    Io(#[from] std::io::Error),
}

/// What outlives a single run of the host
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
struct HostState {
    destroyed: bool,
    storage: MemoryStorage,
}

/// Single-contract host with committed storage
#[derive(Debug, Clone)]
pub struct Host {
    config: TokenConfig,
    storage: MemoryStorage,
    published: Vec<TokenEvent>,
    migrations: Vec<MigrateRequest>,
    destroyed: bool,
}

impl Host {
    pub fn new(config: TokenConfig) -> Self {
        Self::from_state(config, HostState::default())
    }

    fn from_state(config: TokenConfig, state: HostState) -> Self {
        Self {
            config,
            storage: state.storage,
            published: Vec::new(),
            migrations: Vec::new(),
            destroyed: state.destroyed,
        }
    }

    /// Resume from [`Host::snapshot`] output
    pub fn restore(config: TokenConfig, bytes: &[u8]) -> Result<Self, HostError> {
        let state = borsh::from_slice(bytes).map_err(HostError::Snapshot)?;
        Ok(Self::from_state(config, state))
    }

    /// Encode committed storage together with the destroyed flag
    pub fn snapshot(&self) -> Result<Vec<u8>, HostError> {
        let state = HostState {
            destroyed: self.destroyed,
            storage: self.storage.clone(),
        };
        borsh::to_vec(&state).map_err(HostError::Snapshot)
    }

    /// Committed storage
    pub fn storage(&self) -> &MemoryStorage {
        &self.storage
    }

    /// Every notification published so far, in order
    pub fn published(&self) -> &[TokenEvent] {
        &self.published
    }

    /// Code replacements accepted so far
    pub fn migrations(&self) -> &[MigrateRequest] {
        &self.migrations
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Run one invocation and commit its effects
    pub fn invoke(&mut self, invocation: &Invocation) -> Outcome {
        if self.destroyed {
            debug!(operation = %invocation.operation, "contract destroyed, refusing invocation");
            return Outcome {
                value: failure_value(&invocation.operation),
                notifications: Vec::new(),
            };
        }

        let mut staged = self.storage.clone();
        let witness = StaticWitness::new(invocation.witnesses.iter().copied());
        let mut platform = RecordingPlatform::new();

        let outcome = {
            let mut ctx = TokenContext::new(&self.config, &mut staged, &witness, &mut platform);
            dispatch(&mut ctx, invocation)
        };

        self.storage = staged;
        for event in &outcome.notifications {
            debug!(name = event.name(), mint = event.is_mint(), "publishing notification");
        }
        self.published.extend(outcome.notifications.iter().cloned());

        for request in platform.migrations() {
            info!(name = %request.name, version = %request.version, "contract code replaced");
            self.migrations.push(request.clone());
        }
        if platform.destroyed() {
            info!(entries = self.storage.len(), "contract destroyed, clearing storage");
            self.storage.clear();
            self.destroyed = true;
        }

        outcome
    }
}

// ============ Wire Format ============

pub fn read_invocation<R: Read>(reader: R) -> Result<Invocation, HostError> {
    Ok(ciborium::from_reader(reader)?)
}

pub fn write_invocation<W: Write>(invocation: &Invocation, writer: W) -> Result<(), HostError> {
    Ok(ciborium::into_writer(invocation, writer)?)
}

pub fn read_outcome<R: Read>(reader: R) -> Result<Outcome, HostError> {
    Ok(ciborium::from_reader(reader)?)
}

pub fn write_outcome<W: Write>(outcome: &Outcome, writer: W) -> Result<(), HostError> {
    Ok(ciborium::into_writer(outcome, writer)?)
}

// ============ State Persistence ============

/// Load a host from its state file; a missing file is a fresh contract
pub fn load_host(path: &Path, config: TokenConfig) -> Result<Host, HostError> {
    match std::fs::read(path) {
        Ok(bytes) => Host::restore(config, &bytes),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Host::new(config)),
        Err(err) => Err(err.into()),
    }
}

/// Persist committed state. A destroyed contract is written as a tombstone,
/// never removed, so the next run cannot deploy it again.
pub fn save_host(path: &Path, host: &Host) -> Result<(), HostError> {
    std::fs::write(path, host.snapshot()?)?;
    Ok(())
}

/// One file-backed run: load state, invoke, persist
pub fn invoke_persisted(path: &Path, config: TokenConfig, invocation: &Invocation) -> Result<Outcome, HostError> {
    let mut host = load_host(path, config)?;
    let outcome = host.invoke(invocation);
    save_host(path, &host)?;
    Ok(outcome)
}
