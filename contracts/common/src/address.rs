//! Neo Address Encoding
//!
//! A Neo address is the Base58Check encoding of `version || script_hash`
//! where the checksum is the first four bytes of a double SHA-256 over the
//! payload. Base58 here is plain big-number radix conversion.

use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

use crate::constants::address::{ADDRESS_VERSION, BASE58_ALPHABET, CHECKSUM_LEN, PAYLOAD_LEN};
use crate::errors::{TokenError, TokenResult};
use crate::types::AccountId;
use crate::{String, Vec};

/// Decode a Base58 string. Each leading `1` is a leading zero byte.
pub fn base58_decode(input: &str) -> TokenResult<Vec<u8>> {
    let digits = input
        .bytes()
        .map(|c| {
            BASE58_ALPHABET
                .iter()
                .position(|a| *a == c)
                .map(|d| d as u8)
                .ok_or(TokenError::InvalidBase58)
        })
        .collect::<TokenResult<Vec<u8>>>()?;
    if digits.is_empty() {
        return Ok(Vec::new());
    }

    let leading_zeros = digits.iter().take_while(|d| **d == 0).count();
    let value = BigUint::from_radix_be(&digits, 58).ok_or(TokenError::InvalidBase58)?;

    let mut bytes = Vec::with_capacity(leading_zeros + PAYLOAD_LEN + CHECKSUM_LEN);
    bytes.resize(leading_zeros, 0);
    if !value.is_zero() {
        bytes.extend_from_slice(&value.to_bytes_be());
    }
    Ok(bytes)
}

/// Encode bytes as Base58
pub fn base58_encode(bytes: &[u8]) -> String {
    let leading_zeros = bytes.iter().take_while(|b| **b == 0).count();
    let value = BigUint::from_bytes_be(bytes);

    let mut out = String::with_capacity(leading_zeros + bytes.len() * 2);
    for _ in 0..leading_zeros {
        out.push(BASE58_ALPHABET[0] as char);
    }
    if !value.is_zero() {
        for digit in value.to_radix_be(58) {
            out.push(BASE58_ALPHABET[digit as usize] as char);
        }
    }
    out
}

/// First four bytes of SHA-256(SHA-256(payload))
fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LEN] {
    let first = Sha256::digest(payload);
    let second = Sha256::digest(first);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&second[..CHECKSUM_LEN]);
    out
}

/// Decode Base58Check, returning the payload without its checksum
pub fn base58_check_decode(input: &str) -> TokenResult<Vec<u8>> {
    let mut data = base58_decode(input)?;
    if data.len() < CHECKSUM_LEN {
        return Err(TokenError::InvalidAddressLength { actual: data.len() });
    }
    let split = data.len() - CHECKSUM_LEN;
    if checksum(&data[..split]) != data[split..] {
        return Err(TokenError::ChecksumMismatch);
    }
    data.truncate(split);
    Ok(data)
}

/// Encode a payload as Base58Check
pub fn base58_check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + CHECKSUM_LEN);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum(payload));
    base58_encode(&data)
}

impl AccountId {
    /// Script hash behind a Neo address
    pub fn from_address(address: &str) -> TokenResult<Self> {
        let payload = base58_check_decode(address)?;
        if payload.len() != PAYLOAD_LEN {
            return Err(TokenError::InvalidAddressLength { actual: payload.len() });
        }
        if payload[0] != ADDRESS_VERSION {
            return Err(TokenError::InvalidAddressVersion { version: payload[0] });
        }
        AccountId::from_slice(&payload[1..])
    }

    /// Neo address for this script hash
    pub fn to_address(&self) -> String {
        let mut payload = [0u8; PAYLOAD_LEN];
        payload[0] = ADDRESS_VERSION;
        payload[1..].copy_from_slice(self.as_bytes());
        base58_check_encode(&payload)
    }
}
