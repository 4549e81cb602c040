//! Typed contracts for the wallet daemon API.
//!
//! The daemon owns keys, signing, chain state, and persistence; this crate
//! only consumes the typed records it returns. [`DaemonClient`] is the
//! surface a transport implementation (or a test double) provides; the DTOs
//! mirror the daemon's JSON responses field for field.

use color_eyre::eyre::Result;
use serde::{Deserialize, Serialize};

use crate::domain::currency::Currency;
use crate::domain::transaction::{Address, TransactionId, TransactionRecord};

/// Response of the wallet status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletStatus {
    pub encrypted: bool,
    pub unlocked: bool,
    #[serde(rename = "confirmedsiacoinbalance")]
    pub confirmed_siacoin_balance: Currency,
    #[serde(rename = "unconfirmedincomingsiacoins")]
    pub unconfirmed_incoming_siacoins: Currency,
    #[serde(rename = "unconfirmedoutgoingsiacoins")]
    pub unconfirmed_outgoing_siacoins: Currency,
    #[serde(rename = "siafundbalance")]
    pub siafund_balance: Currency,
    #[serde(rename = "siacoinclaimbalance")]
    pub siacoin_claim_balance: Currency,
}

/// Response of the address generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressResponse {
    pub address: Address,
}

/// Response of the address listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressesResponse {
    #[serde(default)]
    pub addresses: Vec<Address>,
}

/// Response of the transaction history endpoint. Either list may be absent
/// when the wallet has no transactions in that state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    #[serde(rename = "confirmedtransactions", default)]
    pub confirmed_transactions: Vec<TransactionRecord>,
    #[serde(rename = "unconfirmedtransactions", default)]
    pub unconfirmed_transactions: Vec<TransactionRecord>,
}

impl TransactionsResponse {
    /// All records, confirmed first then pending, the order the daemon
    /// reports and history displays them.
    pub fn iter_all(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.confirmed_transactions
            .iter()
            .chain(self.unconfirmed_transactions.iter())
    }
}

/// Response of the coin/fund transfer endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferResponse {
    #[serde(rename = "transactionids", default)]
    pub transaction_ids: Vec<TransactionId>,
}

/// Access to the remote wallet daemon.
///
/// Implementations handle transport and authentication; everything here is
/// already validated by the daemon. Amounts are passed in hastings (or raw
/// siafund counts), never display units.
pub trait DaemonClient {
    /// Generate a fresh receive address from the wallet's primary seed.
    fn address(&self) -> Result<Address>;

    /// All addresses the wallet has generated.
    fn addresses(&self) -> Result<Vec<Address>>;

    /// Wallet lock state and balances.
    fn status(&self) -> Result<WalletStatus>;

    /// Transactions relevant to the wallet within a block height range,
    /// plus any still unconfirmed.
    fn transactions(&self, start_height: u64, end_height: u64) -> Result<TransactionsResponse>;

    /// Send siacoins to `dest`.
    fn send_siacoins(&self, amount: &Currency, dest: &Address) -> Result<TransferResponse>;

    /// Send siafunds to `dest`; accrued claim siacoins return to the
    /// wallet.
    fn send_siafunds(&self, amount: &Currency, dest: &Address) -> Result<TransferResponse>;
}
