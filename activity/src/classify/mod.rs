//! Transaction classification from a viewing wallet's perspective.
//!
//! A transaction is first split into sent and received events
//! ([`PartitionedEvents`]), then matched against an ordered list of shape
//! predicates. The first predicate that holds decides the [`Category`];
//! nothing matching yields [`Category::ContractInteraction`].

mod approvals;
mod asset_change;
mod category;
mod partition;
mod predicates;

pub use {
    approvals::{
        approval_quantity, is_revoke_quantity, is_unlimited_quantity, max_allowance,
        ApprovalQuantity, REVOKED_LABEL, UNLIMITED_LABEL,
    },
    asset_change::{asset_changes, short_address, AssetChange, ChangeDirection, Tone},
    category::Category,
    partition::PartitionedEvents,
    predicates::{select_category, Predicate, PREDICATES},
};

use {
    crate::format::NumberFormatter,
    serde::{Deserialize, Serialize},
    wallet_activity_decoder::{Chain, TransactionDetails},
};

/// Display-ready description of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub asset_changes: Vec<AssetChange>,
    /// The other party from the viewer's point of view, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Source and destination chains for bridges
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<(Chain, Chain)>,
}

impl Classification {
    pub fn title(&self) -> &'static str {
        self.category.title()
    }
}

/// Returns the category of `tx` as seen by `viewer`.
pub fn classify(tx: &TransactionDetails, viewer: &str) -> Category {
    select_category(&PartitionedEvents::new(tx, viewer))
}

/// Classifies `tx` and renders its asset changes with `formatter`.
///
/// Never fails: amounts the formatter rejects are shown as its placeholder.
pub fn describe(
    tx: &TransactionDetails,
    viewer: &str,
    formatter: &NumberFormatter,
) -> Classification {
    let events = PartitionedEvents::new(tx, viewer);
    let category = select_category(&events);
    let asset_changes = asset_changes(category, &events, formatter);
    let counterparty = counterparty(category, &events);
    let route = match category {
        Category::Bridge => tx.bridge_data.as_ref().and_then(|data| data.route()),
        _ => None,
    };

    log::debug!(
        "Classified {} on {} as {} ({} asset changes)",
        tx.hash,
        tx.chain,
        category,
        asset_changes.len()
    );

    Classification {
        category,
        asset_changes,
        counterparty,
        route,
    }
}

fn counterparty(category: Category, events: &PartitionedEvents<'_>) -> Option<String> {
    let other = match category {
        Category::SendToken => events.sent_tokens.first().map(|t| t.to.clone()),
        Category::ReceiveToken => events.received_tokens.first().map(|t| t.from.clone()),
        Category::SendNft => events.sent_nfts.first().map(|t| t.to.clone()),
        Category::ReceiveNft => events.received_nfts.first().map(|t| t.from.clone()),
        Category::ApproveToken | Category::RevokeToken => {
            events.token_approvals.first().map(|a| a.spender.clone())
        }
        Category::ApproveNft | Category::RevokeNft => {
            events.nft_approvals.first().map(|a| a.operator.clone())
        }
        Category::MintNft | Category::MintToken => None,
        Category::SafeOwnerAdded => events.owners_added.first().map(|c| c.owner.clone()),
        Category::SafeOwnerRemoved => events.owners_removed.first().map(|c| c.owner.clone()),
        _ => Some(events.tx.to.clone()),
    };
    other.filter(|address| !address.is_empty())
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::format::{Currency, Locale},
        alloy_primitives::U256,
        wallet_activity_decoder::{
            BridgeData, BridgeLeg, LegacyBridgeData, NftApproval, NftTransfer, OwnerChangeKind,
            SafeOwnerChange, TokenApproval, TokenInfo, TokenTransfer, TransactionLabel,
            EVM_ZERO_ADDRESS,
        },
    };

    const VIEWER: &str = "0x1111111111111111111111111111111111111111";
    const OTHER: &str = "0x2222222222222222222222222222222222222222";
    const SAFE: &str = "0x3333333333333333333333333333333333333333";
    const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
    const PUNKS: &str = "0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb";

    fn formatter() -> NumberFormatter {
        NumberFormatter::new(Locale::EnUs, Currency::Usd)
    }

    fn tx() -> TransactionDetails {
        let mut tx = TransactionDetails::new("0xabc", Chain::Ethereum, VIEWER);
        tx.to = OTHER.to_string();
        tx
    }

    fn token(from: &str, to: &str, address: &str, symbol: &str, quantity: &str) -> TokenTransfer {
        TokenTransfer {
            token: TokenInfo::new(address, symbol, 18),
            from: from.to_string(),
            to: to.to_string(),
            quantity: quantity.to_string(),
            usd_value: None,
        }
    }

    fn nft(from: &str, to: &str, token_id: &str) -> NftTransfer {
        NftTransfer {
            collection: PUNKS.to_string(),
            collection_name: Some("CryptoPunks".to_string()),
            token_id: token_id.to_string(),
            name: None,
            from: from.to_string(),
            to: to.to_string(),
            quantity: None,
        }
    }

    fn token_approval(quantity: &str) -> TokenApproval {
        TokenApproval {
            token: TokenInfo::new(USDC, "USDC", 6),
            owner: VIEWER.to_string(),
            spender: OTHER.to_string(),
            quantity: quantity.to_string(),
        }
    }

    fn nft_approval(approved: bool) -> NftApproval {
        NftApproval {
            collection: PUNKS.to_string(),
            collection_name: Some("CryptoPunks".to_string()),
            token_id: None,
            owner: VIEWER.to_string(),
            operator: OTHER.to_string(),
            approved,
        }
    }

    fn owner_change(kind: OwnerChangeKind) -> SafeOwnerChange {
        SafeOwnerChange {
            kind,
            owner: OTHER.to_string(),
            threshold: Some(1),
        }
    }

    #[test]
    fn test_buy_nft() {
        let mut tx = tx();
        tx.token_transfers = vec![token(VIEWER, OTHER, WETH, "WETH", "1.5")];
        tx.nft_transfers = vec![nft(OTHER, VIEWER, "7804")];

        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::BuyNft);
        let shown: Vec<String> = described.asset_changes.iter().map(AssetChange::display).collect();
        assert_eq!(shown, vec!["-1.50 WETH", "+1 CryptoPunks #7804"]);
    }

    #[test]
    fn test_sell_and_trade_nft() {
        let mut sell = tx();
        sell.nft_transfers = vec![nft(VIEWER, OTHER, "1")];
        sell.token_transfers = vec![token(OTHER, VIEWER, WETH, "WETH", "2")];
        assert_eq!(classify(&sell, VIEWER), Category::SellNft);

        let mut trade = tx();
        trade.nft_transfers = vec![nft(VIEWER, OTHER, "1"), nft(OTHER, VIEWER, "2")];
        assert_eq!(classify(&trade, VIEWER), Category::TradeNft);
    }

    #[test]
    fn test_send_and_receive_nft() {
        let mut send = tx();
        send.nft_transfers = vec![nft(VIEWER, OTHER, "1")];
        assert_eq!(classify(&send, VIEWER), Category::SendNft);

        let mut receive = tx();
        receive.nft_transfers = vec![nft(OTHER, VIEWER, "1")];
        let described = describe(&receive, VIEWER, &formatter());
        assert_eq!(described.category, Category::ReceiveNft);
        assert_eq!(described.counterparty.as_deref(), Some(OTHER));
    }

    #[test]
    fn test_mint_refinements() {
        let mut mint_nft = tx();
        mint_nft.nft_transfers = vec![nft(EVM_ZERO_ADDRESS, VIEWER, "1")];
        assert_eq!(classify(&mint_nft, VIEWER), Category::MintNft);

        let mut mint_token = tx();
        mint_token.token_transfers = vec![token(EVM_ZERO_ADDRESS, VIEWER, USDC, "USDC", "10")];
        let described = describe(&mint_token, VIEWER, &formatter());
        assert_eq!(described.category, Category::MintToken);
        assert_eq!(described.counterparty, None);

        let mut mixed = tx();
        mixed.token_transfers = vec![
            token(EVM_ZERO_ADDRESS, VIEWER, USDC, "USDC", "10"),
            token(OTHER, VIEWER, USDC, "USDC", "1"),
        ];
        assert_eq!(classify(&mixed, VIEWER), Category::ReceiveToken);
    }

    #[test]
    fn test_swap() {
        let mut tx = tx();
        tx.token_transfers = vec![
            token(VIEWER, OTHER, USDC, "USDC", "100"),
            token(OTHER, VIEWER, WETH, "WETH", "0.05"),
        ];
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::Swap);
        let shown: Vec<String> = described.asset_changes.iter().map(AssetChange::display).collect();
        assert_eq!(shown, vec!["-100.00 USDC", "+0.05 WETH"]);
    }

    #[test]
    fn test_same_token_both_ways_is_not_a_swap() {
        let mut tx = tx();
        tx.token_transfers = vec![
            token(VIEWER, OTHER, USDC, "USDC", "100"),
            token(OTHER, VIEWER, &USDC.to_uppercase().replace("0X", "0x"), "USDC", "1"),
        ];
        assert_eq!(classify(&tx, VIEWER), Category::ContractInteraction);
    }

    #[test]
    fn test_send_and_receive_token() {
        let mut send = tx();
        send.token_transfers = vec![token(VIEWER, OTHER, USDC, "USDC", "2500")];
        let described = describe(&send, VIEWER, &formatter());
        assert_eq!(described.category, Category::SendToken);
        assert_eq!(described.asset_changes[0].display(), "-2,500.00 USDC");
        assert_eq!(described.asset_changes[0].tone, Tone::Negative);
        assert_eq!(described.counterparty.as_deref(), Some(OTHER));

        let mut receive = tx();
        receive.token_transfers = vec![token(OTHER, VIEWER, USDC, "USDC", "3")];
        assert_eq!(classify(&receive, VIEWER), Category::ReceiveToken);
    }

    #[test]
    fn test_self_transfer_is_send() {
        let mut tx = tx();
        tx.token_transfers = vec![token(VIEWER, VIEWER, USDC, "USDC", "1")];
        assert_eq!(classify(&tx, VIEWER), Category::SendToken);
    }

    #[test]
    fn test_zero_approval_is_revoke() {
        let mut tx = tx();
        tx.token_approvals = vec![token_approval("0")];
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::RevokeToken);
        assert_eq!(described.asset_changes[0].display(), "USDC");
        assert_eq!(described.counterparty.as_deref(), Some(OTHER));
    }

    #[test]
    fn test_max_approval_is_unlimited() {
        let mut tx = tx();
        tx.token_approvals = vec![token_approval(&U256::MAX.to_string())];
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::ApproveToken);
        assert_eq!(described.asset_changes[0].display(), "Unlimited USDC");
        assert_eq!(described.asset_changes[0].tone, Tone::Neutral);
    }

    #[test]
    fn test_limited_approval_shows_amount() {
        let mut tx = tx();
        tx.token_approvals = vec![token_approval("2500000")];
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.asset_changes[0].display(), "2.50 USDC");
    }

    #[test]
    fn test_leading_zero_max_approval_is_unlimited() {
        let mut tx = tx();
        tx.token_approvals = vec![token_approval(&format!("0{}", U256::MAX))];
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::ApproveToken);
        assert_eq!(described.asset_changes[0].display(), "Unlimited USDC");
    }

    #[test]
    fn test_partial_zero_approvals_stay_approve() {
        let mut tx = tx();
        tx.token_approvals = vec![token_approval("0"), token_approval("5000000")];
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::ApproveToken);
        let shown: Vec<String> = described.asset_changes.iter().map(AssetChange::display).collect();
        assert_eq!(shown, vec!["Revoked USDC", "5.00 USDC"]);
    }

    #[test]
    fn test_foreign_approval_is_contract_interaction() {
        let mut tx = tx();
        let mut approval = token_approval(&U256::MAX.to_string());
        approval.owner = SAFE.to_string();
        approval.spender = OTHER.to_string();
        tx.token_approvals = vec![approval];

        let mut nft = nft_approval(true);
        nft.owner = SAFE.to_string();
        tx.nft_approvals = vec![nft];

        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::ContractInteraction);
        assert!(described.asset_changes.is_empty());
    }

    #[test]
    fn test_nft_approvals() {
        let mut approve = tx();
        approve.nft_approvals = vec![nft_approval(true)];
        assert_eq!(classify(&approve, VIEWER), Category::ApproveNft);

        let mut revoke = tx();
        revoke.nft_approvals = vec![nft_approval(false)];
        let described = describe(&revoke, VIEWER, &formatter());
        assert_eq!(described.category, Category::RevokeNft);
        assert_eq!(described.asset_changes[0].display(), "CryptoPunks");

        let mut mixed = tx();
        mixed.nft_approvals = vec![nft_approval(true), nft_approval(false)];
        let described = describe(&mixed, VIEWER, &formatter());
        assert_eq!(described.category, Category::ApproveNft);
        let shown: Vec<String> = described.asset_changes.iter().map(AssetChange::display).collect();
        assert_eq!(shown, vec!["CryptoPunks", "Revoked CryptoPunks"]);
    }

    #[test]
    fn test_safe_rejection() {
        let mut tx = tx();
        tx.to = SAFE.to_string();
        tx.safe_address = Some(SAFE.to_uppercase().replace("0X", "0x"));
        tx.input_data = Some("0x".to_string());
        assert_eq!(classify(&tx, VIEWER), Category::SafeRejection);

        tx.value = "1".to_string();
        assert_eq!(classify(&tx, VIEWER), Category::ContractInteraction);
    }

    #[test]
    fn test_safe_owner_changes() {
        let mut added = tx();
        added.safe_owner_changes = vec![owner_change(OwnerChangeKind::Added)];
        assert_eq!(classify(&added, VIEWER), Category::SafeOwnerAdded);

        let mut removed = tx();
        removed.safe_owner_changes = vec![owner_change(OwnerChangeKind::Removed)];
        assert_eq!(classify(&removed, VIEWER), Category::SafeOwnerRemoved);

        let mut swapped = tx();
        swapped.safe_owner_changes = vec![
            owner_change(OwnerChangeKind::Added),
            owner_change(OwnerChangeKind::Removed),
        ];
        let described = describe(&swapped, VIEWER, &formatter());
        assert_eq!(described.category, Category::SafeOwnerModified);
        assert!(described.asset_changes.is_empty());
    }

    #[test]
    fn test_no_match_is_contract_interaction() {
        let mut tx = tx();
        tx.input_data = Some("0xa9059cbb".to_string());
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::ContractInteraction);
        assert!(described.asset_changes.is_empty());
        assert_eq!(described.counterparty.as_deref(), Some(OTHER));
    }

    #[test]
    fn test_label_wins_over_transfers() {
        let mut tx = tx();
        tx.label = Some(TransactionLabel::LimitOrder);
        tx.token_transfers = vec![
            token(VIEWER, OTHER, USDC, "USDC", "100"),
            token(OTHER, VIEWER, WETH, "WETH", "0.05"),
        ];
        assert_eq!(classify(&tx, VIEWER), Category::LimitOrder);

        tx.label = Some(TransactionLabel::Swap);
        assert_eq!(classify(&tx, VIEWER), Category::Swap);
    }

    #[test]
    fn test_bridge_current_shape() {
        let mut tx = tx();
        tx.bridge_data = Some(BridgeData {
            source: Some(BridgeLeg {
                chain: Chain::Ethereum,
                token: TokenInfo::new(USDC, "USDC", 6),
                quantity: "100".to_string(),
            }),
            destination: Some(BridgeLeg {
                chain: Chain::Base,
                token: TokenInfo::new(USDC, "USDC", 6),
                quantity: "99.5".to_string(),
            }),
            legacy: None,
        });
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::Bridge);
        assert_eq!(described.route, Some((Chain::Ethereum, Chain::Base)));
        let shown: Vec<String> = described.asset_changes.iter().map(AssetChange::display).collect();
        assert_eq!(shown, vec!["-100.00 USDC", "+99.50 USDC"]);
    }

    #[test]
    fn test_bridge_legacy_shape() {
        let mut tx = tx();
        tx.bridge_data = Some(BridgeData {
            source: None,
            destination: None,
            legacy: Some(LegacyBridgeData {
                from_chain: Chain::Polygon,
                to_chain: Chain::Arbitrum,
                token: TokenInfo::new(USDC, "USDC", 6),
                quantity: "42".to_string(),
            }),
        });
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::Bridge);
        assert_eq!(described.route, Some((Chain::Polygon, Chain::Arbitrum)));
        assert_eq!(described.asset_changes.len(), 1);
        assert_eq!(described.asset_changes[0].display(), "-42.00 USDC");
    }

    #[test]
    fn test_bridge_label_without_data_uses_transfers() {
        let mut tx = tx();
        tx.label = Some(TransactionLabel::Bridge);
        tx.token_transfers = vec![token(VIEWER, OTHER, USDC, "USDC", "5")];
        let described = describe(&tx, VIEWER, &formatter());
        assert_eq!(described.category, Category::Bridge);
        assert_eq!(described.asset_changes[0].display(), "-5.00 USDC");
    }

    #[test]
    fn test_classification_is_total() {
        let shapes: Vec<TransactionDetails> = (0..32u32)
            .map(|bits| {
                let mut tx = tx();
                if bits & 1 != 0 {
                    tx.token_transfers.push(token(VIEWER, OTHER, USDC, "USDC", "1"));
                }
                if bits & 2 != 0 {
                    tx.token_transfers.push(token(OTHER, VIEWER, WETH, "WETH", "1"));
                }
                if bits & 4 != 0 {
                    tx.nft_transfers.push(nft(VIEWER, OTHER, "1"));
                }
                if bits & 8 != 0 {
                    tx.nft_transfers.push(nft(OTHER, VIEWER, "2"));
                }
                if bits & 16 != 0 {
                    tx.token_approvals.push(token_approval("0"));
                }
                tx
            })
            .collect();

        let formatter = formatter();
        for tx in &shapes {
            let described = describe(tx, VIEWER, &formatter);
            assert!(Category::ALL.contains(&described.category));
            assert_eq!(described.category, classify(tx, VIEWER));
        }
    }

    #[test]
    fn test_unrelated_viewer_sees_contract_interaction() {
        let mut tx = tx();
        tx.token_transfers = vec![token(OTHER, SAFE, USDC, "USDC", "1")];
        assert_eq!(
            classify(&tx, "0x4444444444444444444444444444444444444444"),
            Category::ContractInteraction
        );
    }
}
