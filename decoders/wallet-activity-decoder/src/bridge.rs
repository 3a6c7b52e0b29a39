//! Cross-chain bridge metadata.
//!
//! The API has shipped two shapes. The current one describes both legs of the
//! bridge; the legacy one only knows the two chains and a single token
//! movement. Both can appear in the same history page.

use {
    crate::{chain::Chain, events::TokenInfo},
    serde::{Deserialize, Serialize},
};

/// One side of a bridge transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BridgeLeg {
    pub chain: Chain,
    pub token: TokenInfo,
    /// Human-unit amount as a decimal string
    pub quantity: String,
}

/// Pre-2024 bridge payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyBridgeData {
    pub from_chain: Chain,
    pub to_chain: Chain,
    pub token: TokenInfo,
    pub quantity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BridgeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<BridgeLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<BridgeLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<LegacyBridgeData>,
}

impl BridgeData {
    /// Returns `true` when the payload carries no usable leg in either shape.
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.destination.is_none() && self.legacy.is_none()
    }

    /// Source and destination chains, preferring the current shape.
    pub fn route(&self) -> Option<(Chain, Chain)> {
        match (&self.source, &self.destination) {
            (Some(src), Some(dst)) => Some((src.chain, dst.chain)),
            _ => self
                .legacy
                .as_ref()
                .map(|legacy| (legacy.from_chain, legacy.to_chain)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_prefers_current_shape() {
        let json = r#"{
            "source": {"chain": "ETHEREUM", "token": {"symbol": "ETH", "decimals": 18}, "quantity": "1"},
            "destination": {"chain": "BASE", "token": {"symbol": "ETH", "decimals": 18}, "quantity": "0.999"},
            "legacy": {"fromChain": "POLYGON", "toChain": "ARBITRUM", "token": {"symbol": "ETH"}, "quantity": "1"}
        }"#;
        let data: BridgeData = serde_json::from_str(json).unwrap();
        assert_eq!(data.route(), Some((Chain::Ethereum, Chain::Base)));
    }

    #[test]
    fn test_route_falls_back_to_legacy() {
        let json = r#"{
            "legacy": {"fromChain": "POLYGON", "toChain": "ARBITRUM", "token": {"symbol": "USDC", "decimals": 6}, "quantity": "50"}
        }"#;
        let data: BridgeData = serde_json::from_str(json).unwrap();
        assert!(!data.is_empty());
        assert_eq!(data.route(), Some((Chain::Polygon, Chain::Arbitrum)));
    }

    #[test]
    fn test_empty_bridge_data() {
        let data: BridgeData = serde_json::from_str("{}").unwrap();
        assert!(data.is_empty());
        assert_eq!(data.route(), None);
    }
}
