//! Core Types for the NEP5 Token
//!
//! Account identifiers, balances, contract parameters and the closed set
//! of operations the token understands.

use core::fmt;
use core::str::FromStr;

use borsh::{BorshDeserialize, BorshSerialize};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::constants::{account::ACCOUNT_ID_LEN, contract_properties};
use crate::errors::{TokenError, TokenResult};
use crate::{String, Vec};

/// Transfer quantity as supplied by a caller. Unconstrained: zero and
/// negative values are representable and rejected by validation.
pub type Amount = BigInt;

// ============ Account Identifier ============

/// 20-byte script hash identifying a ledger participant
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    /// Wrap raw script-hash bytes
    pub const fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse from an arbitrary byte slice; anything but 20 bytes is rejected
    pub fn from_slice(bytes: &[u8]) -> TokenResult<Self> {
        let array: [u8; ACCOUNT_ID_LEN] = bytes
            .try_into()
            .map_err(|_| TokenError::InvalidAccountLength { actual: bytes.len() })?;
        Ok(Self(array))
    }

    /// Raw bytes, in storage order
    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Displays as `0x` followed by the big-endian hex of the script hash
impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0.iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for AccountId {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; ACCOUNT_ID_LEN];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| TokenError::InvalidHex)?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

// ============ Balance ============

/// Non-negative, arbitrary-precision balance in minimal units
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balance(BigUint);

impl Balance {
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Convert a caller-supplied amount; `None` when negative
    pub fn from_amount(amount: &Amount) -> Option<Self> {
        amount.to_biguint().map(Self)
    }

    pub fn to_bigint(&self) -> BigInt {
        BigInt::from(self.0.clone())
    }

    /// Subtract, or `None` if the result would be negative
    pub fn checked_sub(&self, other: &Balance) -> Option<Balance> {
        if self.0 >= other.0 {
            Some(Self(&self.0 - &other.0))
        } else {
            None
        }
    }

    /// Encode as stored: minimal little-endian two's complement, with zero
    /// as the empty byte string
    pub fn to_storage_bytes(&self) -> Vec<u8> {
        if self.is_zero() {
            return Vec::new();
        }
        self.to_bigint().to_signed_bytes_le()
    }

    /// Decode a stored value. Empty means zero; a negative value means
    /// the entry was not written by this ledger.
    pub fn from_storage_bytes(bytes: &[u8]) -> TokenResult<Self> {
        if bytes.is_empty() {
            return Ok(Self::zero());
        }
        BigInt::from_signed_bytes_le(bytes)
            .to_biguint()
            .map(Self)
            .ok_or(TokenError::CorruptStorage { reason: "negative balance" })
    }
}

impl From<u64> for Balance {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<BigUint> for Balance {
    fn from(value: BigUint) -> Self {
        Self(value)
    }
}

impl core::ops::Add<&Balance> for &Balance {
    type Output = Balance;

    fn add(self, rhs: &Balance) -> Balance {
        Balance(&self.0 + &rhs.0)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// Borsh has no BigUint support; balances travel as little-endian magnitude bytes.
impl BorshSerialize for Balance {
    fn serialize<W: borsh::io::Write>(&self, writer: &mut W) -> borsh::io::Result<()> {
        BorshSerialize::serialize(&self.0.to_bytes_le(), writer)
    }
}

impl BorshDeserialize for Balance {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let bytes: Vec<u8> = BorshDeserialize::deserialize_reader(reader)?;
        Ok(Self(BigUint::from_bytes_le(&bytes)))
    }
}

// ============ Invocation Types ============

/// Why the host invoked the contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum TriggerType {
    /// Spending verification of the contract account
    Verification = 0x00,
    /// Verification triggered by a receiving contract
    VerificationR = 0x01,
    /// Regular application call
    Application = 0x10,
    /// Application call triggered by a receiving contract
    ApplicationR = 0x11,
}

/// Untyped positional argument or return value, as exchanged with the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractParameter {
    Boolean(bool),
    Integer(BigInt),
    ByteArray(Vec<u8>),
    String(String),
}

impl ContractParameter {
    /// Kind name for error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::ByteArray(_) => "byte array",
            Self::String(_) => "string",
        }
    }

    /// Byte view. Strings convert to their UTF-8 bytes.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::ByteArray(bytes) => Some(bytes),
            Self::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Integer view. Byte arrays decode as little-endian two's complement.
    pub fn as_integer(&self) -> Option<BigInt> {
        match self {
            Self::Integer(value) => Some(value.clone()),
            Self::ByteArray(bytes) => Some(BigInt::from_signed_bytes_le(bytes)),
            Self::Boolean(flag) => Some(BigInt::from(u8::from(*flag))),
            Self::String(_) => None,
        }
    }

    /// String view. Byte arrays must be valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::ByteArray(bytes) => core::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

impl From<bool> for ContractParameter {
    fn from(flag: bool) -> Self {
        Self::Boolean(flag)
    }
}

impl From<&Balance> for ContractParameter {
    fn from(balance: &Balance) -> Self {
        Self::Integer(balance.to_bigint())
    }
}

impl From<AccountId> for ContractParameter {
    fn from(account: AccountId) -> Self {
        Self::ByteArray(account.to_vec())
    }
}

// ============ Administrative Types ============

/// Contract property flags carried verbatim on migrate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default,
    Serialize, Deserialize, BorshSerialize, BorshDeserialize,
)]
pub struct ContractPropertyState(u8);

impl ContractPropertyState {
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(&self) -> u8 {
        self.0
    }

    pub fn has_storage(&self) -> bool {
        self.0 & contract_properties::HAS_STORAGE != 0
    }

    pub fn has_dynamic_invoke(&self) -> bool {
        self.0 & contract_properties::HAS_DYNAMIC_INVOKE != 0
    }

    pub fn is_payable(&self) -> bool {
        self.0 & contract_properties::PAYABLE != 0
    }
}

/// Replacement code and metadata forwarded to the host on migrate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct MigrateRequest {
    pub script: Vec<u8>,
    pub parameter_list: Vec<u8>,
    pub return_type: u8,
    pub properties: ContractPropertyState,
    pub name: String,
    pub version: String,
    pub author: String,
    pub email: String,
    pub description: String,
}

// ============ Operation Types ============

/// Operations understood by the token contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenOperation {
    /// Mint the whole supply to the owner, once
    Deploy,
    TotalSupply,
    Name,
    Symbol,
    Decimals,
    Owner,
    /// Move value between accounts. The recipient stays raw so its length
    /// is checked in transfer order, after amount and witness.
    Transfer { from: AccountId, to: Vec<u8>, amount: Amount },
    BalanceOf { account: AccountId },
    /// Replace the contract code, keeping storage
    Migrate(MigrateRequest),
    /// Destroy the contract and its storage
    Delete,
}

impl TokenOperation {
    /// Operation name as dispatched by the host
    pub fn name(&self) -> &'static str {
        match self {
            Self::Deploy => "deploy",
            Self::TotalSupply => "totalSupply",
            Self::Name => "name",
            Self::Symbol => "symbol",
            Self::Decimals => "decimals",
            Self::Owner => "owner",
            Self::Transfer { .. } => "transfer",
            Self::BalanceOf { .. } => "balanceOf",
            Self::Migrate(_) => "migrate",
            Self::Delete => "delete",
        }
    }
}
