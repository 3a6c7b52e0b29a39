//! Asset events attached to a transaction: fungible and NFT transfers,
//! approvals, and Safe owner changes.

use serde::{Deserialize, Serialize};

/// Fungible token metadata as reported by the history API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    /// Contract address or mint. Empty for the chain's native asset.
    #[serde(default)]
    pub address: String,
    /// Ticker, e.g. "USDC"
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Decimals used to scale raw on-chain quantities
    #[serde(default)]
    pub decimals: u8,
}

impl TokenInfo {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            name: None,
            decimals,
        }
    }

    /// Returns `true` for the chain's native asset (no contract address).
    pub fn is_native(&self) -> bool {
        self.address.is_empty()
    }
}

/// A fungible token movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTransfer {
    pub token: TokenInfo,
    pub from: String,
    pub to: String,
    /// Amount in human units (already divided by decimals), as a decimal string
    pub quantity: String,
    /// USD value at transaction time, when the API priced it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usd_value: Option<f64>,
}

impl TokenTransfer {
    /// Parses `quantity` as a float. Unparseable quantities read as `None`.
    pub fn amount(&self) -> Option<f64> {
        parse_decimal(&self.quantity)
    }
}

/// A non-fungible token movement (ERC-721, ERC-1155, Metaplex, TON NFT items).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftTransfer {
    /// Collection contract address or collection mint
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    pub token_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub from: String,
    pub to: String,
    /// Copies moved, for semi-fungible (ERC-1155) items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

impl NftTransfer {
    /// Display label: item name, else `Collection #id`, else `#id`.
    pub fn label(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        match self.collection_name.as_deref() {
            Some(collection) => format!("{collection} #{}", self.token_id),
            None => format!("#{}", self.token_id),
        }
    }
}

/// A fungible allowance granted by `owner` to `spender`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenApproval {
    pub token: TokenInfo,
    pub owner: String,
    pub spender: String,
    /// Raw on-chain allowance as an integer string (decimal, or `0x` hex)
    pub quantity: String,
}

/// An NFT operator approval (`approve` / `setApprovalForAll`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NftApproval {
    pub collection: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    /// Set for single-token approvals, `None` for collection-wide approvals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    pub owner: String,
    pub operator: String,
    /// `false` when the approval is being withdrawn
    #[serde(default = "default_true")]
    pub approved: bool,
}

fn default_true() -> bool {
    true
}

/// Whether a Safe owner was added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OwnerChangeKind {
    Added,
    Removed,
}

/// A change to a Safe's owner set, optionally with a new signing threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeOwnerChange {
    pub kind: OwnerChangeKind,
    pub owner: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u32>,
}

/// Parses a human-unit decimal string such as `"1,234.5"` or `"0.0001"`.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let cleaned: String = s.trim().chars().filter(|c| *c != ',' && *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}
