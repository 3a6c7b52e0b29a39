//! Display-ready activity item.
//!
//! An [`ActivityItem`] is what the wallet's history list shows for one
//! transaction: a headline, the asset change lines and a counterparty.

use {
    crate::classify::{short_address, AssetChange, Category, Classification},
    serde::{Deserialize, Serialize},
    std::str::FromStr,
    wallet_activity_decoder::{Chain, TransactionDetails, TransactionStatus},
};

/// One row of wallet activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityItem {
    pub category: Category,

    /// Headline such as "Swapped" or "Revoked"
    pub title: String,

    pub chain: Chain,

    /// Transaction hash or signature
    pub hash: String,

    pub status: TransactionStatus,

    /// Unix timestamp (seconds since epoch), 0 when unknown
    pub timestamp: i64,

    /// Signed amount lines in display order
    pub asset_changes: Vec<AssetChange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,

    /// Source and destination chains for bridges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<(Chain, Chain)>,
}

impl ActivityItem {
    /// Creates a new activity item builder.
    pub fn builder(
        category: Category,
        chain: Chain,
        hash: impl Into<String>,
    ) -> ActivityItemBuilder {
        ActivityItemBuilder::new(category, chain, hash.into())
    }

    /// Builds an item from a transaction and its classification.
    pub fn from_classification(tx: &TransactionDetails, classification: Classification) -> Self {
        let mut builder = Self::builder(classification.category, tx.chain, &tx.hash)
            .status(tx.status)
            .timestamp(tx.timestamp)
            .asset_changes(classification.asset_changes);
        if let Some(counterparty) = classification.counterparty {
            builder = builder.counterparty(counterparty);
        }
        if let Some((from, to)) = classification.route {
            builder = builder.route(from, to);
        }
        builder.build()
    }

    /// Formats the item according to the specified output format.
    pub fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => self.format_text(),
            OutputFormat::Json => self.format_json(),
            OutputFormat::JsonPretty => self.format_json_pretty(),
        }
    }

    /// Formats as emoji-led text.
    ///
    /// Example output:
    /// ```text
    /// 🔄 Swapped [ETHEREUM]
    ///    -100.00 USDC
    ///    +0.05 WETH
    /// 🔎 Contract: 0x2222...2222
    /// 🔗 https://etherscan.io/tx/0xabc
    /// ```
    fn format_text(&self) -> String {
        let mut lines = vec![format!(
            "{} {} [{}]",
            self.category.emoji(),
            self.title,
            self.chain
        )];

        for change in &self.asset_changes {
            match &change.fiat_value {
                Some(fiat) => lines.push(format!("   {} ({fiat})", change.display())),
                None => lines.push(format!("   {}", change.display())),
            }
        }

        if let Some((from, to)) = self.route {
            lines.push(format!("🌉 Route: {from} → {to}"));
        }

        if let Some(ref counterparty) = self.counterparty {
            lines.push(format!(
                "🔎 {}: {}",
                counterparty_label(self.category),
                short_address(counterparty)
            ));
        }

        if self.status != TransactionStatus::Confirmed {
            lines.push(format!("⏳ Status: {}", self.status));
        }

        lines.push(format!("🔗 {}", explorer_url(self.chain, &self.hash)));

        lines.join("\n")
    }

    /// Formats as compact JSON.
    fn format_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!("{{\"error\": \"serialization failed: {e}\"}}"))
    }

    /// Formats as pretty-printed JSON.
    fn format_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self)
            .unwrap_or_else(|e| format!("{{\n  \"error\": \"serialization failed: {e}\"\n}}"))
    }
}

fn counterparty_label(category: Category) -> &'static str {
    match category {
        Category::SendToken | Category::SendNft => "To",
        Category::ReceiveToken | Category::ReceiveNft => "From",
        Category::ApproveToken | Category::RevokeToken => "Spender",
        Category::ApproveNft | Category::RevokeNft => "Operator",
        Category::SafeOwnerAdded | Category::SafeOwnerRemoved => "Owner",
        _ => "Contract",
    }
}

/// Block explorer link for a transaction.
pub fn explorer_url(chain: Chain, hash: &str) -> String {
    let base = match chain {
        Chain::Ethereum => "https://etherscan.io/tx/",
        Chain::Base => "https://basescan.org/tx/",
        Chain::Arbitrum => "https://arbiscan.io/tx/",
        Chain::Optimism => "https://optimistic.etherscan.io/tx/",
        Chain::Polygon => "https://polygonscan.com/tx/",
        Chain::Bnb => "https://bscscan.com/tx/",
        Chain::Avalanche => "https://snowtrace.io/tx/",
        Chain::Zksync => "https://explorer.zksync.io/tx/",
        Chain::Linea => "https://lineascan.build/tx/",
        Chain::Solana => "https://solscan.io/tx/",
        Chain::Ton => "https://tonviewer.com/transaction/",
    };
    format!("{base}{hash}")
}

/// Builder for constructing ActivityItem instances.
#[derive(Debug)]
pub struct ActivityItemBuilder {
    category: Category,
    chain: Chain,
    hash: String,
    title: Option<String>,
    status: TransactionStatus,
    timestamp: i64,
    asset_changes: Vec<AssetChange>,
    counterparty: Option<String>,
    route: Option<(Chain, Chain)>,
}

impl ActivityItemBuilder {
    fn new(category: Category, chain: Chain, hash: String) -> Self {
        Self {
            category,
            chain,
            hash,
            title: None,
            status: TransactionStatus::default(),
            timestamp: 0,
            asset_changes: Vec::new(),
            counterparty: None,
            route: None,
        }
    }

    /// Overrides the category's default headline.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn timestamp(mut self, ts: i64) -> Self {
        self.timestamp = ts;
        self
    }

    pub fn asset_changes(mut self, changes: Vec<AssetChange>) -> Self {
        self.asset_changes = changes;
        self
    }

    pub fn counterparty(mut self, address: impl Into<String>) -> Self {
        self.counterparty = Some(address.into());
        self
    }

    pub fn route(mut self, from: Chain, to: Chain) -> Self {
        self.route = Some((from, to));
        self
    }

    pub fn build(self) -> ActivityItem {
        ActivityItem {
            title: self
                .title
                .unwrap_or_else(|| self.category.title().to_string()),
            category: self.category,
            chain: self.chain,
            hash: self.hash,
            status: self.status,
            timestamp: self.timestamp,
            asset_changes: self.asset_changes,
            counterparty: self.counterparty,
            route: self.route,
        }
    }
}

/// Output format for activity items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format with emojis (default)
    #[default]
    Text,
    /// Compact JSON format (one line per item)
    Json,
    /// Pretty-printed JSON format
    JsonPretty,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json_pretty" | "json-pretty" | "jsonpretty" => Ok(Self::JsonPretty),
            _ => Err(format!(
                "Unknown output format: '{s}'. Valid options: text, json, json_pretty"
            )),
        }
    }
}
