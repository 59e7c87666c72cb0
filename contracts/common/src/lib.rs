//! NEP5 Common Library
//!
//! Shared types, constants, and utilities for the NEP5 token contract
//! and the hosts that drive it.
//!
//! ## Contents
//!
//! - **Constants**: token metadata, the owner script hash, storage keys
//! - **Types**: 20-byte account identifiers, non-negative balances,
//!   contract parameters and the closed set of token operations
//! - **Events**: transfer notifications collected during an invocation
//! - **Address**: Neo Base58Check address encoding for script hashes
//! - **Errors**: the typed error enum shared by every layer
//!
//! This crate is `no_std` compatible when built without the `std`
//! feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export collection types for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::{string::String, vec::Vec};
#[cfg(feature = "std")]
pub use std::{string::String, vec::Vec};

pub mod address;
pub mod constants;
pub mod errors;
pub mod events;
pub mod types;

// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use events::*;
pub use types::*;
