//! Token Events
//!
//! Events are collected during an invocation and handed back to the host,
//! which publishes them to external subscribers. The contract itself
//! performs no I/O.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::types::{AccountId, Balance};
use crate::Vec;

/// Notification published by the token. Borsh-encoded for subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum TokenEvent {
    /// Emitted on every balance movement. `from` is `None` for the
    /// issuance on deploy.
    Transfer {
        from: Option<AccountId>,
        to: AccountId,
        amount: Balance,
    },
}

impl TokenEvent {
    /// Notification name subscribers listen for
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
        }
    }

    pub fn is_mint(&self) -> bool {
        match self {
            Self::Transfer { from, .. } => from.is_none(),
        }
    }
}

/// Notifications raised by one invocation, in emission order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<TokenEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: TokenEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TokenEvent] {
        &self.events
    }

    /// Hand the notifications to the caller, leaving the log empty
    pub fn drain(&mut self) -> Vec<TokenEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drop everything raised so far; used when the invocation fails
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(from: Option<u8>, to: u8, amount: u64) -> TokenEvent {
        TokenEvent::Transfer {
            from: from.map(|b| AccountId::new([b; 20])),
            to: AccountId::new([to; 20]),
            amount: Balance::from(amount),
        }
    }

    #[test]
    fn test_event_borsh_layout() {
        let event = transfer(Some(1), 2, 500);
        let bytes = borsh::to_vec(&event).unwrap();

        // variant, Some tag, from, to, then the balance in storage encoding
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[1], 1);
        assert_eq!(&bytes[2..22], &[1u8; 20]);
        assert_eq!(&bytes[22..42], &[2u8; 20]);

        let restored: TokenEvent = borsh::from_slice(&bytes).unwrap();
        assert_eq!(restored, event);
        assert_eq!(restored.name(), "transfer");
    }

    #[test]
    fn test_mint_has_no_sender() {
        assert!(transfer(None, 2, 10).is_mint());
        assert!(!transfer(Some(1), 2, 10).is_mint());
    }

    #[test]
    fn test_drain_keeps_order_and_empties_log() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.emit(transfer(None, 1, 100));
        log.emit(transfer(Some(1), 2, 40));
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[1], transfer(Some(1), 2, 40));

        let drained = log.drain();
        assert_eq!(drained, vec![transfer(None, 1, 100), transfer(Some(1), 2, 40)]);
        assert!(log.is_empty());

        log.emit(transfer(Some(2), 1, 1));
        log.clear();
        assert!(log.is_empty());
    }
}
