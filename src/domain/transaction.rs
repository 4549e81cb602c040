//! Typed transaction records as reported by the wallet daemon.
//!
//! The daemon classifies every input and output it reports with a fund-type
//! specifier and marks whether the entry's address belongs to the wallet.
//! This module only models those records; fetching and deserializing them is
//! the transport layer's job.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::currency::Currency;

/// Confirmation heights at or above this value are placeholders meaning the
/// transaction has not been mined yet. The daemon reports `u64::MAX` for
/// pending transactions; any real chain height is far below this.
pub const UNCONFIRMED_THRESHOLD: u64 = 1_000_000_000;

/// Hex characters in a wallet address (32-byte unlock hash plus a 6-byte
/// checksum).
const ADDRESS_HEX_LEN: usize = 76;

/// Hex characters in a transaction id.
const TRANSACTION_ID_HEX_LEN: usize = 64;

/// Validation failure for a hex-encoded identifier (address or
/// transaction id).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("invalid length: got {got} hex chars, expected {expected}")]
    InvalidLength { got: usize, expected: usize },

    #[error("not valid hex")]
    InvalidHex,
}

/// A wallet address, stored in its hex string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap an address string without validating it. Use for values the
    /// daemon already vouches for.
    pub fn new(s: impl Into<String>) -> Self {
        Address(s.into())
    }

    /// Validate and wrap a user-supplied address string.
    pub fn parse(s: &str) -> Result<Self, HexError> {
        let s = s.trim().trim_start_matches("0x");
        if s.len() != ADDRESS_HEX_LEN {
            return Err(HexError::InvalidLength {
                got: s.len(),
                expected: ADDRESS_HEX_LEN,
            });
        }
        if hex::decode(s).is_err() {
            return Err(HexError::InvalidHex);
        }
        Ok(Address(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A transaction id, stored in its hex string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(s: impl Into<String>) -> Self {
        TransactionId(s.into())
    }

    /// Validate and wrap a user-supplied transaction id.
    pub fn parse(s: &str) -> Result<Self, HexError> {
        let s = s.trim().trim_start_matches("0x");
        if s.len() != TRANSACTION_ID_HEX_LEN {
            return Err(HexError::InvalidLength {
                got: s.len(),
                expected: TRANSACTION_ID_HEX_LEN,
            });
        }
        if hex::decode(s).is_err() {
            return Err(HexError::InvalidHex);
        }
        Ok(TransactionId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fund-type specifier attached to each reported input and output.
///
/// The wire form is the daemon's specifier string (e.g. `"siacoin input"`).
/// Tags this client does not know about are preserved in `Other` so flow
/// analysis can reject them by name instead of silently dropping value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FundType {
    SiacoinInput,
    SiafundInput,
    SiacoinOutput,
    SiafundOutput,
    MinerPayout,
    Other(String),
}

impl FundType {
    pub fn as_str(&self) -> &str {
        match self {
            FundType::SiacoinInput => "siacoin input",
            FundType::SiafundInput => "siafund input",
            FundType::SiacoinOutput => "siacoin output",
            FundType::SiafundOutput => "siafund output",
            FundType::MinerPayout => "miner payout",
            FundType::Other(tag) => tag,
        }
    }
}

impl From<String> for FundType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "siacoin input" => FundType::SiacoinInput,
            "siafund input" => FundType::SiafundInput,
            "siacoin output" => FundType::SiacoinOutput,
            "siafund output" => FundType::SiafundOutput,
            "miner payout" => FundType::MinerPayout,
            _ => FundType::Other(s),
        }
    }
}

impl From<FundType> for String {
    fn from(t: FundType) -> Self {
        t.as_str().to_string()
    }
}

/// A transaction input as seen by the wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    #[serde(rename = "fundtype")]
    pub fund_type: FundType,
    /// Whether `related_address` is owned by the wallet, as decided by the
    /// daemon's view of the wallet's address set.
    #[serde(rename = "walletaddress")]
    pub wallet_address: bool,
    #[serde(rename = "relatedaddress")]
    pub related_address: Address,
    pub value: Currency,
}

/// A transaction output as seen by the wallet. For miner payouts the
/// ownership flag carries no meaning; payouts always count as incoming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    #[serde(rename = "fundtype")]
    pub fund_type: FundType,
    #[serde(rename = "walletaddress")]
    pub wallet_address: bool,
    #[serde(rename = "relatedaddress")]
    pub related_address: Address,
    pub value: Currency,
}

/// One wallet-relevant transaction with its classified inputs and outputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "transactionid")]
    pub transaction_id: TransactionId,
    #[serde(rename = "confirmationheight")]
    pub confirmation_height: u64,
    #[serde(default)]
    pub inputs: Vec<TxInput>,
    #[serde(default)]
    pub outputs: Vec<TxOutput>,
}

impl TransactionRecord {
    /// True once the transaction has been mined into a block.
    pub fn is_confirmed(&self) -> bool {
        self.confirmation_height < UNCONFIRMED_THRESHOLD
    }
}
