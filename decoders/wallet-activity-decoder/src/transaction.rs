//! Transaction view model returned by the wallet history API.

use {
    crate::{
        bridge::BridgeData,
        chain::Chain,
        events::{NftApproval, NftTransfer, SafeOwnerChange, TokenApproval, TokenTransfer},
    },
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Execution status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Confirmed,
    Pending,
    Failed,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Pending => write!(f, "pending"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Coarse label the indexer attaches to some transactions.
///
/// Labels are hints; asset events decide the presentation except for
/// limit orders, which have no distinctive event shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionLabel {
    LimitOrder,
    Swap,
    Bridge,
    Lend,
    Stake,
    Deploy,
    #[serde(other)]
    Unknown,
}

/// A transaction with its decoded asset events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetails {
    pub hash: String,
    pub chain: Chain,
    #[serde(default)]
    pub status: TransactionStatus,
    /// Unix timestamp in seconds
    #[serde(default)]
    pub timestamp: i64,
    pub from: String,
    #[serde(default)]
    pub to: String,
    /// Native value in raw units, as a decimal string
    #[serde(default = "zero_string")]
    pub value: String,
    /// Hex call data, `None` or `"0x"` for plain transfers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<TransactionLabel>,
    #[serde(default)]
    pub token_transfers: Vec<TokenTransfer>,
    #[serde(default)]
    pub nft_transfers: Vec<NftTransfer>,
    #[serde(default)]
    pub token_approvals: Vec<TokenApproval>,
    #[serde(default)]
    pub nft_approvals: Vec<NftApproval>,
    #[serde(default)]
    pub safe_owner_changes: Vec<SafeOwnerChange>,
    /// Safe the transaction was executed through, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safe_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bridge_data: Option<BridgeData>,
}

fn zero_string() -> String {
    "0".to_string()
}

impl TransactionDetails {
    /// Creates a transaction with no asset events.
    pub fn new(hash: impl Into<String>, chain: Chain, from: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            chain,
            status: TransactionStatus::Confirmed,
            timestamp: 0,
            from: from.into(),
            to: String::new(),
            value: zero_string(),
            input_data: None,
            label: None,
            token_transfers: Vec::new(),
            nft_transfers: Vec::new(),
            token_approvals: Vec::new(),
            nft_approvals: Vec::new(),
            safe_owner_changes: Vec::new(),
            safe_address: None,
            bridge_data: None,
        }
    }

    /// Returns `true` if the transaction carries no call data.
    pub fn has_empty_input(&self) -> bool {
        match self.input_data.as_deref().map(str::trim) {
            None => true,
            Some(data) => data.is_empty() || data == "0x" || data.trim_start_matches("0x").chars().all(|c| c == '0'),
        }
    }

    /// Returns `true` if the native value is zero (or unparseable as nonzero).
    pub fn has_zero_value(&self) -> bool {
        let v = self.value.trim();
        let digits = v.strip_prefix("0x").unwrap_or(v);
        digits.is_empty() || digits.chars().all(|c| c == '0' || c == '.')
    }

    /// Returns `true` if the transaction carries no asset events at all.
    pub fn has_no_events(&self) -> bool {
        self.token_transfers.is_empty()
            && self.nft_transfers.is_empty()
            && self.token_approvals.is_empty()
            && self.nft_approvals.is_empty()
            && self.safe_owner_changes.is_empty()
    }
}
