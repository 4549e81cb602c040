//! Text rendering for balances and transaction history.
//!
//! Everything here is pure string production on top of the domain types;
//! callers decide where the text goes. Exact arithmetic is kept all the way
//! to the formatting boundary; floats only ever appear in display figures.

use std::fmt::Write as _;

use color_eyre::eyre::Result;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use tracing::debug;

use crate::domain::currency::{Currency, UNITS, ten_pow};
use crate::domain::flow::{FlowError, NetAmount, net_flow};
use crate::domain::transaction::TransactionRecord;
use crate::infra::daemon::{DaemonClient, WalletStatus};

/// Hastings per pS, the smallest display unit.
fn pico_threshold() -> BigUint {
    ten_pow(12)
}

/// Render a currency value scaled to the largest fitting unit with four
/// significant digits, e.g. `"1.23 KS"`. Values below one pS print as a raw
/// hastings count.
pub fn currency_units(c: &Currency) -> String {
    let pico = pico_threshold();
    if c.hastings() < &pico {
        return format!("{} H", c.to_hastings_string());
    }

    let thousand = BigUint::from(1000u32);
    let mut mag = pico;
    let mut suffix = "";
    for unit in &UNITS {
        suffix = unit.suffix;
        if c.hastings() < &(&mag * &thousand) {
            break;
        }
        // mag stops at the largest unit so oversized values keep its suffix
        if unit.suffix != "TS" {
            mag *= &thousand;
        }
    }

    let value = c.hastings().to_f64().unwrap_or(f64::INFINITY)
        / mag.to_f64().unwrap_or(f64::INFINITY);
    format!("{} {}", four_sig_figs(value), suffix)
}

/// Format with four significant digits, trailing zeros trimmed.
fn four_sig_figs(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    let s = if x >= 1000.0 {
        format!("{x:.0}")
    } else if x >= 100.0 {
        format!("{x:.1}")
    } else if x >= 10.0 {
        format!("{x:.2}")
    } else {
        format!("{x:.3}")
    };
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

/// Column header matching [`render_transaction_line`].
pub const HISTORY_HEADER: &str = "    [height]                                                   [transaction id]    [net siacoins]   [net siafunds]";

/// One history line: confirmation height (or `unconfirmed`), transaction
/// id, net siacoins as a two-decimal SC figure, net siafunds as a signed
/// whole count.
pub fn render_transaction_line(txn: &TransactionRecord) -> Result<String, FlowError> {
    let flow = net_flow(txn)?;

    let mut line = String::new();
    if txn.is_confirmed() {
        let _ = write!(line, "{:>12}", txn.confirmation_height);
    } else {
        line.push_str(" unconfirmed");
    }
    let _ = write!(line, "{:>67}", txn.transaction_id);

    let coins = flow.coins.magnitude.hastings().to_f64().unwrap_or(f64::INFINITY)
        / 1e24
        * if flow.coins.positive { 1.0 } else { -1.0 };
    let _ = write!(line, "{coins:>15.2} SC");

    if flow.funds.positive {
        let _ = write!(line, "{:>14} SF", flow.funds.magnitude.to_hastings_string());
    } else {
        let _ = write!(line, "-{:>14} SF", flow.funds.magnitude.to_hastings_string());
    }
    Ok(line)
}

/// The full history table: header plus one line per record.
pub fn render_history<'a>(
    txns: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Result<String, FlowError> {
    let mut out = String::from(HISTORY_HEADER);
    for txn in txns {
        out.push('\n');
        out.push_str(&render_transaction_line(txn)?);
    }
    Ok(out)
}

/// The wallet status summary. A locked wallet shows no balances.
pub fn render_balance(status: &WalletStatus) -> String {
    let enc_status = if status.encrypted {
        "Encrypted"
    } else {
        "Unencrypted"
    };
    if !status.unlocked {
        return format!(
            "Wallet status:\n{enc_status}, Locked\nUnlock the wallet to view balance"
        );
    }

    // The unconfirmed delta against the confirmed balance is exactly
    // incoming minus outgoing unconfirmed siacoins.
    let delta = NetAmount::net(
        status.unconfirmed_incoming_siacoins.clone(),
        status.unconfirmed_outgoing_siacoins.clone(),
    );
    let delta_sign = if delta.positive { '+' } else { '-' };

    format!(
        "Wallet status:\n\
         {enc_status}, Unlocked\n\
         Confirmed Balance:   {}\n\
         Unconfirmed Delta:   {}{}\n\
         Exact:               {} H\n\
         Siafunds:            {} SF\n\
         Siafund Claims:      {} H",
        currency_units(&status.confirmed_siacoin_balance),
        delta_sign,
        currency_units(&delta.magnitude),
        status.confirmed_siacoin_balance.to_hastings_string(),
        status.siafund_balance.to_hastings_string(),
        status.siacoin_claim_balance.to_hastings_string(),
    )
}

/// Fetch the wallet status and render the balance summary.
pub fn wallet_balance(client: &impl DaemonClient) -> Result<String> {
    let status = client.status()?;
    Ok(render_balance(&status))
}

/// Fetch the wallet's transaction history and render it, confirmed records
/// first.
pub fn wallet_history(
    client: &impl DaemonClient,
    start_height: u64,
    end_height: u64,
) -> Result<String> {
    let resp = client.transactions(start_height, end_height)?;
    debug!(
        confirmed = resp.confirmed_transactions.len(),
        unconfirmed = resp.unconfirmed_transactions.len(),
        "rendering transaction history"
    );
    Ok(render_history(resp.iter_all())?)
}
