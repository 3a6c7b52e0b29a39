//! Splits a transaction's asset events by direction relative to the viewer.

use wallet_activity_decoder::{
    Chain, NftApproval, NftTransfer, OwnerChangeKind, SafeOwnerChange, TokenApproval,
    TokenTransfer, TransactionDetails,
};

/// Borrowed view of a transaction's events from one wallet's perspective.
///
/// A transfer from the viewer to itself counts as outgoing only. Transfers
/// that touch neither side of the viewer are dropped, and so are approvals
/// the viewer did not grant.
#[derive(Debug)]
pub struct PartitionedEvents<'a> {
    pub tx: &'a TransactionDetails,
    pub viewer: &'a str,
    pub sent_tokens: Vec<&'a TokenTransfer>,
    pub received_tokens: Vec<&'a TokenTransfer>,
    pub sent_nfts: Vec<&'a NftTransfer>,
    pub received_nfts: Vec<&'a NftTransfer>,
    pub token_approvals: Vec<&'a TokenApproval>,
    pub nft_approvals: Vec<&'a NftApproval>,
    pub owners_added: Vec<&'a SafeOwnerChange>,
    pub owners_removed: Vec<&'a SafeOwnerChange>,
}

impl<'a> PartitionedEvents<'a> {
    pub fn new(tx: &'a TransactionDetails, viewer: &'a str) -> Self {
        let chain = tx.chain;
        let mut sent_tokens = Vec::new();
        let mut received_tokens = Vec::new();
        for transfer in &tx.token_transfers {
            match direction(chain, viewer, &transfer.from, &transfer.to) {
                Some(Side::Sent) => sent_tokens.push(transfer),
                Some(Side::Received) => received_tokens.push(transfer),
                None => {}
            }
        }

        let mut sent_nfts = Vec::new();
        let mut received_nfts = Vec::new();
        for transfer in &tx.nft_transfers {
            match direction(chain, viewer, &transfer.from, &transfer.to) {
                Some(Side::Sent) => sent_nfts.push(transfer),
                Some(Side::Received) => received_nfts.push(transfer),
                None => {}
            }
        }

        let token_approvals = tx
            .token_approvals
            .iter()
            .filter(|approval| chain.same_address(&approval.owner, viewer))
            .collect();
        let nft_approvals = tx
            .nft_approvals
            .iter()
            .filter(|approval| chain.same_address(&approval.owner, viewer))
            .collect();

        let (owners_added, owners_removed): (Vec<_>, Vec<_>) = tx
            .safe_owner_changes
            .iter()
            .partition(|change| change.kind == OwnerChangeKind::Added);

        Self {
            tx,
            viewer,
            sent_tokens,
            received_tokens,
            sent_nfts,
            received_nfts,
            token_approvals,
            nft_approvals,
            owners_added,
            owners_removed,
        }
    }

    pub fn chain(&self) -> Chain {
        self.tx.chain
    }

    /// Returns `true` if no transfer touched the viewer.
    pub fn has_no_transfers(&self) -> bool {
        self.sent_tokens.is_empty()
            && self.received_tokens.is_empty()
            && self.sent_nfts.is_empty()
            && self.received_nfts.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Sent,
    Received,
}

fn direction(chain: Chain, viewer: &str, from: &str, to: &str) -> Option<Side> {
    if chain.same_address(from, viewer) {
        Some(Side::Sent)
    } else if chain.same_address(to, viewer) {
        Some(Side::Received)
    } else {
        None
    }
}
