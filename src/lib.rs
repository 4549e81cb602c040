//! Sia Wallet - accounting core and daemon contracts for a Sia wallet client.
//!
//! This library provides:
//! - Exact hastings-denominated currency arithmetic with unit parsing/formatting
//! - Net siacoin/siafund flow analysis over wallet transactions
//! - Typed contracts for the wallet daemon API
//! - Text rendering for balances and transaction history

pub mod config;
pub mod display;
pub mod domain;
pub mod infra;
pub mod logging;
