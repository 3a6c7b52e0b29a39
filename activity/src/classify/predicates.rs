//! Ordered shape predicates over partitioned events.
//!
//! [`PREDICATES`] is evaluated top to bottom and the first match decides the
//! category. Order matters: an NFT purchase also looks like "send token", so
//! the NFT shapes are tested before the fungible ones.

use {
    super::{approvals::is_revoke_quantity, category::Category, partition::PartitionedEvents},
    wallet_activity_decoder::TransactionLabel,
};

pub type Predicate = fn(&PartitionedEvents<'_>) -> bool;

pub const PREDICATES: [(Predicate, Category); 16] = [
    (is_bridge, Category::Bridge),
    (is_limit_order, Category::LimitOrder),
    (is_buy_nft, Category::BuyNft),
    (is_sell_nft, Category::SellNft),
    (is_trade_nft, Category::TradeNft),
    (is_receive_nft, Category::ReceiveNft),
    (is_send_nft, Category::SendNft),
    (is_swap, Category::Swap),
    (is_send_token, Category::SendToken),
    (is_receive_token, Category::ReceiveToken),
    (is_approve_token, Category::ApproveToken),
    (is_approve_nft, Category::ApproveNft),
    (is_safe_rejection, Category::SafeRejection),
    (is_safe_owner_added, Category::SafeOwnerAdded),
    (is_safe_owner_removed, Category::SafeOwnerRemoved),
    (is_safe_owner_modified, Category::SafeOwnerModified),
];

pub fn is_bridge(events: &PartitionedEvents<'_>) -> bool {
    let has_data = events
        .tx
        .bridge_data
        .as_ref()
        .is_some_and(|data| !data.is_empty());
    has_data || events.tx.label == Some(TransactionLabel::Bridge)
}

pub fn is_limit_order(events: &PartitionedEvents<'_>) -> bool {
    events.tx.label == Some(TransactionLabel::LimitOrder)
}

pub fn is_buy_nft(events: &PartitionedEvents<'_>) -> bool {
    events.sent_tokens.len() == 1 && !events.received_nfts.is_empty() && events.sent_nfts.is_empty()
}

pub fn is_sell_nft(events: &PartitionedEvents<'_>) -> bool {
    !events.sent_nfts.is_empty()
        && events.received_nfts.is_empty()
        && events.received_tokens.len() == 1
}

pub fn is_trade_nft(events: &PartitionedEvents<'_>) -> bool {
    !events.sent_nfts.is_empty() && !events.received_nfts.is_empty()
}

pub fn is_receive_nft(events: &PartitionedEvents<'_>) -> bool {
    !events.received_nfts.is_empty() && events.sent_nfts.is_empty() && events.sent_tokens.is_empty()
}

pub fn is_send_nft(events: &PartitionedEvents<'_>) -> bool {
    !events.sent_nfts.is_empty()
        && events.received_nfts.is_empty()
        && events.received_tokens.is_empty()
}

/// At least one asset out and a different asset in.
pub fn is_swap(events: &PartitionedEvents<'_>) -> bool {
    let chain = events.chain();
    events.sent_tokens.iter().any(|sent| {
        events
            .received_tokens
            .iter()
            .any(|received| !chain.same_address(&sent.token.address, &received.token.address))
    })
}

pub fn is_send_token(events: &PartitionedEvents<'_>) -> bool {
    !events.sent_tokens.is_empty() && events.received_tokens.is_empty()
}

pub fn is_receive_token(events: &PartitionedEvents<'_>) -> bool {
    !events.received_tokens.is_empty() && events.sent_tokens.is_empty()
}

pub fn is_approve_token(events: &PartitionedEvents<'_>) -> bool {
    !events.token_approvals.is_empty()
}

pub fn is_approve_nft(events: &PartitionedEvents<'_>) -> bool {
    !events.nft_approvals.is_empty()
}

/// A Safe transaction that calls the Safe itself with no data and no value,
/// used to burn a nonce and reject a pending proposal.
pub fn is_safe_rejection(events: &PartitionedEvents<'_>) -> bool {
    let tx = events.tx;
    let Some(safe) = tx.safe_address.as_deref() else {
        return false;
    };
    tx.chain.same_address(safe, &tx.to)
        && tx.has_empty_input()
        && tx.has_zero_value()
        && tx.has_no_events()
}

pub fn is_safe_owner_added(events: &PartitionedEvents<'_>) -> bool {
    !events.owners_added.is_empty() && events.owners_removed.is_empty()
}

pub fn is_safe_owner_removed(events: &PartitionedEvents<'_>) -> bool {
    !events.owners_removed.is_empty() && events.owners_added.is_empty()
}

/// Owners swapped (both added and removed).
pub fn is_safe_owner_modified(events: &PartitionedEvents<'_>) -> bool {
    !events.owners_added.is_empty() && !events.owners_removed.is_empty()
}

/// Picks the category for `events`, refining receives from the mint source
/// into mints and zero or withdrawn approvals into revokes.
pub fn select_category(events: &PartitionedEvents<'_>) -> Category {
    let category = PREDICATES
        .iter()
        .find(|(predicate, _)| predicate(events))
        .map(|(_, category)| *category)
        .unwrap_or(Category::ContractInteraction);
    refine(category, events)
}

fn refine(category: Category, events: &PartitionedEvents<'_>) -> Category {
    let chain = events.chain();
    match category {
        Category::ReceiveNft
            if events
                .received_nfts
                .iter()
                .all(|nft| chain.is_mint_source(&nft.from)) =>
        {
            Category::MintNft
        }
        Category::ReceiveToken
            if events
                .received_tokens
                .iter()
                .all(|transfer| chain.is_mint_source(&transfer.from)) =>
        {
            Category::MintToken
        }
        Category::ApproveToken
            if events
                .token_approvals
                .iter()
                .all(|approval| is_revoke_quantity(&approval.quantity)) =>
        {
            Category::RevokeToken
        }
        Category::ApproveNft if events.nft_approvals.iter().all(|approval| !approval.approved) => {
            Category::RevokeNft
        }
        other => other,
    }
}
