//! Net flow analysis over wallet transactions.
//!
//! For each transaction the daemon reports, the analyzer nets the wallet's
//! incoming value against its outgoing value, separately for siacoins and
//! siafunds. Miner fees are not modeled as outputs, so fee amounts appear on
//! neither side of the ledger.

use std::cmp::Ordering;
use std::fmt;

use thiserror::Error;

use crate::domain::currency::Currency;
use crate::domain::transaction::{Address, FundType, TransactionRecord, TxInput, TxOutput};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlowError {
    /// An entry carried a fund-type tag this analyzer does not know.
    /// Silently skipping it would misstate the wallet's balance, so the
    /// whole transaction is rejected instead.
    #[error("unrecognized fund type {0:?}")]
    UnrecognizedFundType(String),
}

/// A signed net amount. [`Currency`] itself cannot go negative, so the sign
/// rides alongside the magnitude; zero is canonically positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetAmount {
    pub positive: bool,
    pub magnitude: Currency,
}

impl NetAmount {
    pub fn zero() -> Self {
        NetAmount {
            positive: true,
            magnitude: Currency::zero(),
        }
    }

    fn canonical(positive: bool, magnitude: Currency) -> Self {
        NetAmount {
            positive: positive || magnitude.is_zero(),
            magnitude,
        }
    }

    /// Net `incoming` against `outgoing`. The accumulators are compared
    /// before subtracting, so the difference is always taken larger minus
    /// smaller and can never underflow.
    pub fn net(incoming: Currency, outgoing: Currency) -> Self {
        match incoming.cmp(&outgoing) {
            Ordering::Less => NetAmount::canonical(false, outgoing - incoming),
            _ => NetAmount::canonical(true, incoming - outgoing),
        }
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }

    /// Sum two signed nets, e.g. when aggregating flows across
    /// transactions. Uses the same compare-then-subtract discipline as
    /// [`NetAmount::net`].
    pub fn combine(&self, other: &NetAmount) -> NetAmount {
        if self.positive == other.positive {
            return NetAmount::canonical(
                self.positive,
                self.magnitude.clone() + other.magnitude.clone(),
            );
        }
        let (pos, neg) = if self.positive {
            (self, other)
        } else {
            (other, self)
        };
        match pos.magnitude.cmp(&neg.magnitude) {
            Ordering::Less => NetAmount::canonical(false, &neg.magnitude - &pos.magnitude),
            _ => NetAmount::canonical(true, &pos.magnitude - &neg.magnitude),
        }
    }
}

impl fmt::Display for NetAmount {
    /// Sign followed by the siacoin decimal string, e.g. `"-1.5"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{}{}", sign, self.magnitude)
    }
}

/// Net flows attributable to the wallet within one transaction (or, after
/// [`aggregate_net_flow`], a batch of them).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFlow {
    pub coins: NetAmount,
    pub funds: NetAmount,
}

impl TransactionFlow {
    pub fn zero() -> Self {
        TransactionFlow {
            coins: NetAmount::zero(),
            funds: NetAmount::zero(),
        }
    }

    pub fn combine(&self, other: &TransactionFlow) -> TransactionFlow {
        TransactionFlow {
            coins: self.coins.combine(&other.coins),
            funds: self.funds.combine(&other.funds),
        }
    }
}

/// Net siacoin and siafund flow of one transaction, with ownership taken
/// from the daemon-populated `wallet_address` flags.
///
/// Outgoing value is the sum of wallet-owned coin/fund inputs; incoming
/// value is the sum of wallet-owned coin/fund outputs, plus every miner
/// payout regardless of ownership.
pub fn net_flow(txn: &TransactionRecord) -> Result<TransactionFlow, FlowError> {
    net_flow_impl(txn, |input| input.wallet_address, |output| output.wallet_address)
}

/// Like [`net_flow`], but ownership is decided by the caller's own address
/// predicate instead of the daemon's flags. Miner payouts still count as
/// incoming unconditionally.
pub fn net_flow_with<F>(
    txn: &TransactionRecord,
    is_wallet_address: F,
) -> Result<TransactionFlow, FlowError>
where
    F: Fn(&Address) -> bool,
{
    net_flow_impl(
        txn,
        |input| is_wallet_address(&input.related_address),
        |output| is_wallet_address(&output.related_address),
    )
}

/// Aggregate flow across a batch of transactions. Fails on the first record
/// carrying an unrecognized fund type.
pub fn aggregate_net_flow(txns: &[TransactionRecord]) -> Result<TransactionFlow, FlowError> {
    let mut total = TransactionFlow::zero();
    for txn in txns {
        total = total.combine(&net_flow(txn)?);
    }
    Ok(total)
}

fn net_flow_impl(
    txn: &TransactionRecord,
    input_owned: impl Fn(&TxInput) -> bool,
    output_owned: impl Fn(&TxOutput) -> bool,
) -> Result<TransactionFlow, FlowError> {
    let mut outgoing_coins = Currency::zero();
    let mut outgoing_funds = Currency::zero();
    for input in &txn.inputs {
        match &input.fund_type {
            FundType::SiacoinInput => {
                if input_owned(input) {
                    outgoing_coins += &input.value;
                }
            }
            FundType::SiafundInput => {
                if input_owned(input) {
                    outgoing_funds += &input.value;
                }
            }
            FundType::Other(tag) => {
                return Err(FlowError::UnrecognizedFundType(tag.clone()));
            }
            // Output tags on an input contribute nothing.
            _ => {}
        }
    }

    let mut incoming_coins = Currency::zero();
    let mut incoming_funds = Currency::zero();
    for output in &txn.outputs {
        match &output.fund_type {
            FundType::MinerPayout => {
                // Payouts have no meaningful ownership flag and always
                // count as incoming.
                incoming_coins += &output.value;
            }
            FundType::SiacoinOutput => {
                if output_owned(output) {
                    incoming_coins += &output.value;
                }
            }
            FundType::SiafundOutput => {
                if output_owned(output) {
                    incoming_funds += &output.value;
                }
            }
            FundType::Other(tag) => {
                return Err(FlowError::UnrecognizedFundType(tag.clone()));
            }
            _ => {}
        }
    }

    Ok(TransactionFlow {
        coins: NetAmount::net(incoming_coins, outgoing_coins),
        funds: NetAmount::net(incoming_funds, outgoing_funds),
    })
}
