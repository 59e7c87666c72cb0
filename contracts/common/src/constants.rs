//! Protocol Constants
//!
//! Token metadata and the fixed values the contract is deployed with.
//! A deployment that needs different metadata builds its own
//! `TokenConfig` instead of editing these.

/// Token Metadata
pub mod token {
    /// Token name
    pub const NAME: &str = "my nep5 token";
    /// Token symbol
    pub const SYMBOL: &str = "MGR";
    /// Decimal places
    pub const DECIMALS: u8 = 8;
    /// One whole token in minimal units (1 MGR = 100_000_000 base units)
    pub const ONE: u64 = 100_000_000;
    /// Fixed total supply: 100_000_000 whole tokens, minted once on deploy
    pub const TOTAL_SUPPLY: u64 = 100_000_000 * ONE;

    /// Neo address of the account that receives the whole supply on deploy
    pub const OWNER_ADDRESS: &str = "AUejN4mLdGA8Yyhmj1NwqURwE3FrMjZ4e9";

    /// Script hash decoded from [`OWNER_ADDRESS`] (little-endian, as stored)
    pub const OWNER_SCRIPT_HASH: [u8; 20] = [
        0x8d, 0x3f, 0xcf, 0x13, 0x52, 0xae, 0x46, 0xa9, 0x37, 0x32,
        0xb8, 0x5f, 0x83, 0x31, 0x05, 0x1c, 0xcd, 0x4d, 0xe0, 0xa8,
    ];
}

/// Account identifier layout
pub mod account {
    /// Byte length of an account identifier (UInt160 script hash)
    pub const ACCOUNT_ID_LEN: usize = 20;
}

/// Neo address encoding
pub mod address {
    /// Address version byte prepended to the script hash
    pub const ADDRESS_VERSION: u8 = 0x17;
    /// Length of the Base58Check checksum suffix
    pub const CHECKSUM_LEN: usize = 4;
    /// Version byte + script hash
    pub const PAYLOAD_LEN: usize = 1 + super::account::ACCOUNT_ID_LEN;
    /// Base58 alphabet (Bitcoin ordering)
    pub const BASE58_ALPHABET: &[u8; 58] =
        b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
}

/// Storage layout
pub mod storage {
    /// Reserved key of the total-supply marker. Its length differs from
    /// every account key, so it can never collide with a balance entry.
    pub const TOTAL_SUPPLY_KEY: &[u8] = b"totalSupply";
}

/// Contract property flags forwarded on migrate
pub mod contract_properties {
    /// Contract uses storage
    pub const HAS_STORAGE: u8 = 0x01;
    /// Contract performs dynamic invocation
    pub const HAS_DYNAMIC_INVOKE: u8 = 0x02;
    /// Contract accepts assets
    pub const PAYABLE: u8 = 0x04;
}
