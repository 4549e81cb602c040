//! End-to-end flow over the daemon contracts: deserialize realistic daemon
//! JSON, analyze net flows, and render balance and history text through a
//! mock client.

use color_eyre::eyre::{Result, eyre};
use serde_json::json;

use sia_wallet::display::{HISTORY_HEADER, wallet_balance, wallet_history};
use sia_wallet::domain::currency::Currency;
use sia_wallet::domain::transaction::Address;
use sia_wallet::infra::daemon::{
    DaemonClient, TransactionsResponse, TransferResponse, WalletStatus,
};

const OUR_ADDR: &str = "1111111111111111111111111111111111111111111111111111111111111111111111111111";
const THEIR_ADDR: &str = "2222222222222222222222222222222222222222222222222222222222222222222222222222";
const POOL_ADDR: &str = "3333333333333333333333333333333333333333333333333333333333333333333333333333";

/// A canned daemon for tests; every response is fixed JSON.
struct MockDaemon {
    status: serde_json::Value,
    transactions: serde_json::Value,
}

impl DaemonClient for MockDaemon {
    fn address(&self) -> Result<Address> {
        Ok(Address::new(OUR_ADDR))
    }

    fn addresses(&self) -> Result<Vec<Address>> {
        Ok(vec![Address::new(OUR_ADDR)])
    }

    fn status(&self) -> Result<WalletStatus> {
        Ok(serde_json::from_value(self.status.clone())?)
    }

    fn transactions(&self, start_height: u64, end_height: u64) -> Result<TransactionsResponse> {
        if start_height > end_height {
            return Err(eyre!("invalid height range"));
        }
        Ok(serde_json::from_value(self.transactions.clone())?)
    }

    fn send_siacoins(&self, _amount: &Currency, _dest: &Address) -> Result<TransferResponse> {
        Ok(serde_json::from_value(json!({
            "transactionids": ["ee".repeat(32)]
        }))?)
    }

    fn send_siafunds(&self, _amount: &Currency, _dest: &Address) -> Result<TransferResponse> {
        Ok(serde_json::from_value(json!({
            "transactionids": ["ff".repeat(32)]
        }))?)
    }
}

fn sc(n: u64) -> String {
    Currency::siacoins(n).to_hastings_string()
}

fn mock() -> MockDaemon {
    MockDaemon {
        status: json!({
            "encrypted": true,
            "unlocked": true,
            "confirmedsiacoinbalance": sc(1500),
            "unconfirmedincomingsiacoins": sc(100),
            "unconfirmedoutgoingsiacoins": sc(600),
            "siafundbalance": "10",
            "siacoinclaimbalance": "423"
        }),
        transactions: json!({
            "confirmedtransactions": [
                {
                    // send 500 SC: 300 SC change, 190 SC to a foreign
                    // address, 10 SC fee with no output entry
                    "transactionid": "aa".repeat(32),
                    "confirmationheight": 62248,
                    "inputs": [{
                        "fundtype": "siacoin input",
                        "walletaddress": true,
                        "relatedaddress": OUR_ADDR,
                        "value": sc(500)
                    }],
                    "outputs": [
                        {
                            "fundtype": "siacoin output",
                            "walletaddress": true,
                            "relatedaddress": OUR_ADDR,
                            "value": sc(300)
                        },
                        {
                            "fundtype": "siacoin output",
                            "walletaddress": false,
                            "relatedaddress": THEIR_ADDR,
                            "value": sc(190)
                        }
                    ]
                },
                {
                    // block reward: counted even though the ownership flag
                    // is false
                    "transactionid": "bb".repeat(32),
                    "confirmationheight": 62300,
                    "inputs": [],
                    "outputs": [{
                        "fundtype": "miner payout",
                        "walletaddress": false,
                        "relatedaddress": POOL_ADDR,
                        "value": sc(1)
                    }]
                }
            ],
            "unconfirmedtransactions": [
                {
                    "transactionid": "cc".repeat(32),
                    "confirmationheight": u64::MAX,
                    "inputs": [],
                    "outputs": [{
                        "fundtype": "siafund output",
                        "walletaddress": true,
                        "relatedaddress": OUR_ADDR,
                        "value": "3"
                    }]
                }
            ]
        }),
    }
}

#[test]
fn history_renders_net_flows_per_transaction() {
    let client = mock();
    let out = wallet_history(&client, 0, 10_000_000).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], HISTORY_HEADER);

    // confirmed send: height, id, -200 SC net
    assert!(lines[1].starts_with("       62248"));
    assert!(lines[1].contains(&"aa".repeat(32)));
    assert!(lines[1].contains("-200.00 SC"));

    // miner payout: +1 SC despite walletaddress = false
    assert!(lines[2].starts_with("       62300"));
    assert!(lines[2].contains("           1.00 SC"));

    // unconfirmed siafund receive renders without a height
    assert!(lines[3].starts_with(" unconfirmed"));
    assert!(lines[3].contains("           0.00 SC"));
    assert!(lines[3].ends_with("             3 SF"));
}

#[test]
fn balance_summary_uses_scaled_units_and_exact_hastings() {
    let client = mock();
    let out = wallet_balance(&client).unwrap();
    assert!(out.contains("Encrypted, Unlocked"));
    assert!(out.contains("Confirmed Balance:   1.5 KS"));
    assert!(out.contains("Unconfirmed Delta:   -500 SC"));
    assert!(out.contains(&format!("Exact:               {} H", sc(1500))));
    assert!(out.contains("Siafunds:            10 SF"));
    assert!(out.contains("Siafund Claims:      423 H"));
}

#[test]
fn unknown_fund_type_fails_history_rendering() {
    let mut client = mock();
    client.transactions = json!({
        "confirmedtransactions": [{
            "transactionid": "dd".repeat(32),
            "confirmationheight": 100,
            "inputs": [],
            "outputs": [{
                "fundtype": "claim output",
                "walletaddress": true,
                "relatedaddress": OUR_ADDR,
                "value": "1"
            }]
        }]
    });
    let err = wallet_history(&client, 0, 10_000_000).unwrap_err();
    assert!(err.to_string().contains("unrecognized fund type"));
    assert!(err.to_string().contains("claim output"));
}

#[test]
fn logging_writes_to_data_dir() {
    let data_dir = std::env::temp_dir().join("sia-wallet-test-logs");
    // SAFETY: the only other env access in this suite is read-only
    unsafe {
        std::env::set_var("SIA_WALLET_DATA", &data_dir);
    }
    sia_wallet::logging::init().unwrap();
    assert!(data_dir.join("sia-wallet.log").exists());
}

#[test]
fn parsed_amounts_flow_into_transfers() {
    let client = mock();
    let amount = Currency::parse_amount("1.23KS").unwrap();
    assert_eq!(amount, Currency::siacoins(1230));

    let dest = Address::parse(THEIR_ADDR).unwrap();
    let resp = client.send_siacoins(&amount, &dest).unwrap();
    assert_eq!(resp.transaction_ids.len(), 1);

    let funds = Currency::parse_amount("3").unwrap();
    let resp = client.send_siafunds(&funds, &dest).unwrap();
    assert_eq!(resp.transaction_ids.len(), 1);
}
