//! Presentation categories for wallet activity.

use {
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

/// The single category a transaction is presented as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Bridge,
    LimitOrder,
    BuyNft,
    SellNft,
    TradeNft,
    ReceiveNft,
    MintNft,
    SendNft,
    Swap,
    SendToken,
    ReceiveToken,
    MintToken,
    ApproveToken,
    RevokeToken,
    ApproveNft,
    RevokeNft,
    SafeRejection,
    SafeOwnerAdded,
    SafeOwnerRemoved,
    SafeOwnerModified,
    /// Fallback when no event shape is recognised
    ContractInteraction,
}

impl Category {
    pub const ALL: [Category; 21] = [
        Category::Bridge,
        Category::LimitOrder,
        Category::BuyNft,
        Category::SellNft,
        Category::TradeNft,
        Category::ReceiveNft,
        Category::MintNft,
        Category::SendNft,
        Category::Swap,
        Category::SendToken,
        Category::ReceiveToken,
        Category::MintToken,
        Category::ApproveToken,
        Category::RevokeToken,
        Category::ApproveNft,
        Category::RevokeNft,
        Category::SafeRejection,
        Category::SafeOwnerAdded,
        Category::SafeOwnerRemoved,
        Category::SafeOwnerModified,
        Category::ContractInteraction,
    ];

    /// Past-tense headline shown in the activity list.
    pub fn title(self) -> &'static str {
        match self {
            Self::Bridge => "Bridged",
            Self::LimitOrder => "Limit order",
            Self::BuyNft => "Bought",
            Self::SellNft => "Sold",
            Self::TradeNft => "Traded",
            Self::ReceiveNft | Self::ReceiveToken => "Received",
            Self::MintNft | Self::MintToken => "Minted",
            Self::SendNft | Self::SendToken => "Sent",
            Self::Swap => "Swapped",
            Self::ApproveToken | Self::ApproveNft => "Approved",
            Self::RevokeToken | Self::RevokeNft => "Revoked",
            Self::SafeRejection => "Rejected",
            Self::SafeOwnerAdded => "Owner added",
            Self::SafeOwnerRemoved => "Owner removed",
            Self::SafeOwnerModified => "Owners changed",
            Self::ContractInteraction => "Contract interaction",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Self::Bridge => "🌉",
            Self::LimitOrder => "🎯",
            Self::BuyNft | Self::SellNft | Self::TradeNft => "🖼️",
            Self::ReceiveNft | Self::ReceiveToken => "📥",
            Self::MintNft | Self::MintToken => "✨",
            Self::SendNft | Self::SendToken => "📤",
            Self::Swap => "🔄",
            Self::ApproveToken | Self::ApproveNft => "✅",
            Self::RevokeToken | Self::RevokeNft => "🚫",
            Self::SafeRejection => "❌",
            Self::SafeOwnerAdded | Self::SafeOwnerRemoved | Self::SafeOwnerModified => "🔐",
            Self::ContractInteraction => "📄",
        }
    }

    /// Snake-case identifier, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bridge => "bridge",
            Self::LimitOrder => "limit_order",
            Self::BuyNft => "buy_nft",
            Self::SellNft => "sell_nft",
            Self::TradeNft => "trade_nft",
            Self::ReceiveNft => "receive_nft",
            Self::MintNft => "mint_nft",
            Self::SendNft => "send_nft",
            Self::Swap => "swap",
            Self::SendToken => "send_token",
            Self::ReceiveToken => "receive_token",
            Self::MintToken => "mint_token",
            Self::ApproveToken => "approve_token",
            Self::RevokeToken => "revoke_token",
            Self::ApproveNft => "approve_nft",
            Self::RevokeNft => "revoke_nft",
            Self::SafeRejection => "safe_rejection",
            Self::SafeOwnerAdded => "safe_owner_added",
            Self::SafeOwnerRemoved => "safe_owner_removed",
            Self::SafeOwnerModified => "safe_owner_modified",
            Self::ContractInteraction => "contract_interaction",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| format!("Unknown category: '{s}'"))
    }
}
