//! Error Types for the NEP5 Token
//!
//! Every rejection inside the contract is a typed error. The dispatch
//! boundary collapses them into the safe defaults hosts expect (`false`
//! or `0`), so these never escape as faults; they exist for logging and
//! for tests that need to know *why* an operation was refused.

use num_bigint::BigInt;
use thiserror::Error;

use crate::types::{AccountId, Balance};

/// Result type alias for token operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Main error enum for all token errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    // ============ Amount Errors ============
    /// Transfer amount is zero or negative
    #[error("amount must be positive, got {amount}")]
    NonPositiveAmount { amount: BigInt },

    /// Sender balance below the requested amount
    #[error("insufficient balance: available {available}, requested {requested}")]
    InsufficientBalance { available: Balance, requested: Balance },

    // ============ Authorization Errors ============
    /// Invocation carries no witness for the account
    #[error("no witness for account {account}")]
    Unauthorized { account: AccountId },

    // ============ Account Errors ============
    /// Account identifier is not exactly 20 bytes
    #[error("account identifier must be 20 bytes, got {actual}")]
    InvalidAccountLength { actual: usize },

    // ============ Issuance Errors ============
    /// Total-supply marker already present
    #[error("already deployed with total supply {total_supply}")]
    AlreadyDeployed { total_supply: Balance },

    // ============ Storage Errors ============
    /// Stored value does not decode to a non-negative integer
    #[error("corrupt storage value: {reason}")]
    CorruptStorage { reason: &'static str },

    // ============ Platform Errors ============
    /// Host platform refused an administrative request
    #[error("platform rejected {operation}")]
    PlatformRejected { operation: &'static str },

    // ============ Address Errors ============
    /// Character outside the Base58 alphabet
    #[error("invalid base58 character")]
    InvalidBase58,

    /// Decoded address payload has the wrong length
    #[error("address payload must be 21 bytes, got {actual}")]
    InvalidAddressLength { actual: usize },

    /// Address version byte does not match
    #[error("unexpected address version {version:#04x}")]
    InvalidAddressVersion { version: u8 },

    /// Base58Check checksum mismatch
    #[error("address checksum mismatch")]
    ChecksumMismatch,

    /// Malformed hex account identifier
    #[error("invalid hex account identifier")]
    InvalidHex,

    // ============ Dispatch Errors ============
    /// Wrong number of positional arguments
    #[error("{operation} expects {expected} arguments, got {actual}")]
    ArgumentCount {
        operation: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Positional argument of the wrong kind
    #[error("argument {index} must be {expected}, got {actual}")]
    ArgumentType {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

impl TokenError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount { .. } => "E010_NON_POSITIVE_AMOUNT",
            Self::InsufficientBalance { .. } => "E011_INSUFFICIENT_BALANCE",
            Self::Unauthorized { .. } => "E020_UNAUTHORIZED",
            Self::InvalidAccountLength { .. } => "E030_INVALID_ACCOUNT",
            Self::AlreadyDeployed { .. } => "E040_ALREADY_DEPLOYED",
            Self::CorruptStorage { .. } => "E050_CORRUPT_STORAGE",
            Self::PlatformRejected { .. } => "E060_PLATFORM_REJECTED",
            Self::InvalidBase58 => "E070_INVALID_BASE58",
            Self::InvalidAddressLength { .. } => "E071_ADDRESS_LENGTH",
            Self::InvalidAddressVersion { .. } => "E072_ADDRESS_VERSION",
            Self::ChecksumMismatch => "E073_ADDRESS_CHECKSUM",
            Self::InvalidHex => "E074_INVALID_HEX",
            Self::ArgumentCount { .. } => "E090_ARGUMENT_COUNT",
            Self::ArgumentType { .. } => "E091_ARGUMENT_TYPE",
        }
    }

    /// Returns true if the caller can fix this by changing their request
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InsufficientBalance { .. }
                | Self::Unauthorized { .. }
                | Self::NonPositiveAmount { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_error_codes_unique() {
        let errors = [
            TokenError::NonPositiveAmount { amount: BigInt::from(0) },
            TokenError::InsufficientBalance {
                available: Balance::from(1u64),
                requested: Balance::from(2u64),
            },
            TokenError::Unauthorized { account: AccountId::new([1u8; 20]) },
            TokenError::InvalidAccountLength { actual: 3 },
            TokenError::AlreadyDeployed { total_supply: Balance::from(1u64) },
            TokenError::CorruptStorage { reason: "negative" },
            TokenError::PlatformRejected { operation: "migrate" },
            TokenError::InvalidBase58,
            TokenError::InvalidAddressLength { actual: 0 },
            TokenError::InvalidAddressVersion { version: 0 },
            TokenError::ChecksumMismatch,
            TokenError::InvalidHex,
            TokenError::ArgumentCount { operation: "transfer", expected: 3, actual: 2 },
            TokenError::ArgumentType { index: 0, expected: "byte array", actual: "integer" },
        ];

        let codes: Vec<_> = errors.iter().map(|e| e.code()).collect();
        let unique: BTreeSet<_> = codes.iter().collect();
        assert_eq!(codes.len(), unique.len(), "Error codes must be unique");
    }

    #[test]
    fn test_display_includes_amounts() {
        let err = TokenError::InsufficientBalance {
            available: Balance::from(100u64),
            requested: Balance::from(500u64),
        };
        assert_eq!(
            err.to_string(),
            "insufficient balance: available 100, requested 500"
        );
        assert!(err.is_recoverable());
        assert!(!TokenError::ChecksumMismatch.is_recoverable());
    }

    #[test]
    fn test_display_names_argument_kinds() {
        let err = TokenError::ArgumentType { index: 2, expected: "integer", actual: "string" };
        assert_eq!(err.to_string(), "argument 2 must be integer, got string");
    }
}
