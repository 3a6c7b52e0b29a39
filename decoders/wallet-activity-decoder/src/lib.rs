//! Typed view models for wallet transaction history.
//!
//! The history API returns transactions across EVM chains, Solana and TON with
//! their asset events already extracted by the indexer. This crate decodes
//! those payloads into strongly typed structs:
//!
//! - [`TransactionDetails`] - one transaction with its transfers and approvals
//! - [`Chain`] - chain identifier with per-family address rules
//! - [`BridgeData`] - cross-chain metadata, current and legacy shapes
//!
//! Decoding accepts a single object, a JSON array, a `{"transactions": [...]}`
//! page, or one object per line.

pub mod bridge;
pub mod chain;
pub mod events;
pub mod transaction;

use serde::Deserialize;

pub use {
    bridge::{BridgeData, BridgeLeg, LegacyBridgeData},
    chain::{Chain, ChainFamily, EVM_ZERO_ADDRESS, SOLANA_SYSTEM_ADDRESS},
    events::{
        parse_decimal, NftApproval, NftTransfer, OwnerChangeKind, SafeOwnerChange, TokenApproval,
        TokenInfo, TokenTransfer,
    },
    transaction::{TransactionDetails, TransactionLabel, TransactionStatus},
};

/// Errors produced while decoding history payloads.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid transaction payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("empty payload")]
    Empty,
}

/// Decodes a single transaction object.
pub fn decode_transaction(payload: &str) -> Result<TransactionDetails, DecodeError> {
    if payload.trim().is_empty() {
        return Err(DecodeError::Empty);
    }
    Ok(serde_json::from_str(payload)?)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Page {
    List(Vec<TransactionDetails>),
    Wrapped { transactions: Vec<TransactionDetails> },
}

/// Decodes a list of transactions, either a bare array or a wrapped page.
pub fn decode_transactions(payload: &str) -> Result<Vec<TransactionDetails>, DecodeError> {
    if payload.trim().is_empty() {
        return Err(DecodeError::Empty);
    }
    let page: Page = serde_json::from_str(payload)?;
    let transactions = match page {
        Page::List(list) => list,
        Page::Wrapped { transactions } => transactions,
    };
    log::debug!("Decoded {} transactions", transactions.len());
    Ok(transactions)
}

/// Decodes one line of a JSON-lines feed.
///
/// Blank lines and `#` comments decode to `Ok(None)`.
pub fn decode_line(line: &str) -> Result<Option<TransactionDetails>, DecodeError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    decode_transaction(trimmed).map(Some)
}
