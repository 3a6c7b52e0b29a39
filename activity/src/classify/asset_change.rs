//! Secondary "asset change" lines derived from a classified transaction.

use {
    super::{
        approvals::{approval_quantity, ApprovalQuantity, REVOKED_LABEL, UNLIMITED_LABEL},
        category::Category,
        partition::PartitionedEvents,
    },
    crate::format::{NumberFormatter, NumberType},
    serde::{Deserialize, Serialize},
    std::fmt,
    wallet_activity_decoder::{
        parse_decimal, BridgeData, NftTransfer, TokenInfo, TokenTransfer,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeDirection {
    In,
    Out,
    /// Approvals and other changes that move nothing
    Neutral,
}

/// Display colour hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

impl From<ChangeDirection> for Tone {
    fn from(direction: ChangeDirection) -> Self {
        match direction {
            ChangeDirection::In => Tone::Positive,
            ChangeDirection::Out => Tone::Negative,
            ChangeDirection::Neutral => Tone::Neutral,
        }
    }
}

/// One asset movement or allowance, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetChange {
    pub direction: ChangeDirection,
    /// Formatted, unsigned amount. `None` when the whole transaction is a
    /// revoke; a zero allowance next to nonzero ones reads "Revoked".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    pub symbol: String,
    pub tone: Tone,
    /// Formatted fiat value, when priced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiat_value: Option<String>,
}

impl AssetChange {
    fn new(direction: ChangeDirection, amount: Option<String>, symbol: impl Into<String>) -> Self {
        Self {
            direction,
            amount,
            symbol: symbol.into(),
            tone: direction.into(),
            fiat_value: None,
        }
    }

    /// Signed amount with symbol: `+1.50 ETH`, `-100.00 USDC`, `Unlimited USDC`.
    pub fn display(&self) -> String {
        let sign = match self.direction {
            ChangeDirection::In => "+",
            ChangeDirection::Out => "-",
            ChangeDirection::Neutral => "",
        };
        match &self.amount {
            Some(amount) => format!("{sign}{amount} {}", self.symbol),
            None => self.symbol.clone(),
        }
    }
}

impl fmt::Display for AssetChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Builds the asset change lines for `category`.
pub fn asset_changes(
    category: Category,
    events: &PartitionedEvents<'_>,
    formatter: &NumberFormatter,
) -> Vec<AssetChange> {
    match category {
        Category::Bridge => match events.tx.bridge_data.as_ref() {
            Some(data) if !data.is_empty() => bridge_changes(data, formatter),
            _ => transfer_changes(events, formatter),
        },
        Category::ApproveToken | Category::RevokeToken => events
            .token_approvals
            .iter()
            .map(|approval| {
                let amount = match approval_quantity(
                    &approval.quantity,
                    approval.token.decimals,
                    events.chain().family(),
                ) {
                    ApprovalQuantity::Revoke if category == Category::RevokeToken => None,
                    ApprovalQuantity::Revoke => Some(REVOKED_LABEL.to_string()),
                    ApprovalQuantity::Unlimited => Some(UNLIMITED_LABEL.to_string()),
                    ApprovalQuantity::Limited(amount) => {
                        Some(format_amount(formatter, Some(amount)))
                    }
                    ApprovalQuantity::Unknown => Some(formatter.placeholder().to_string()),
                };
                AssetChange::new(ChangeDirection::Neutral, amount, token_symbol(&approval.token))
            })
            .collect(),
        Category::ApproveNft | Category::RevokeNft => events
            .nft_approvals
            .iter()
            .map(|approval| {
                let label = match (&approval.collection_name, &approval.token_id) {
                    (Some(name), Some(id)) => format!("{name} #{id}"),
                    (Some(name), None) => name.clone(),
                    (None, Some(id)) => format!("#{id}"),
                    (None, None) => short_address(&approval.collection),
                };
                let amount = (category == Category::ApproveNft && !approval.approved)
                    .then(|| REVOKED_LABEL.to_string());
                AssetChange::new(ChangeDirection::Neutral, amount, label)
            })
            .collect(),
        Category::SafeRejection
        | Category::SafeOwnerAdded
        | Category::SafeOwnerRemoved
        | Category::SafeOwnerModified => Vec::new(),
        _ => transfer_changes(events, formatter),
    }
}

/// Outgoing movements first, then incoming; NFTs before fungibles.
fn transfer_changes(events: &PartitionedEvents<'_>, formatter: &NumberFormatter) -> Vec<AssetChange> {
    let mut changes = Vec::new();
    changes.extend(events.sent_nfts.iter().map(|nft| nft_change(nft, ChangeDirection::Out)));
    changes.extend(
        events
            .sent_tokens
            .iter()
            .map(|t| token_change(t, ChangeDirection::Out, formatter)),
    );
    changes.extend(events.received_nfts.iter().map(|nft| nft_change(nft, ChangeDirection::In)));
    changes.extend(
        events
            .received_tokens
            .iter()
            .map(|t| token_change(t, ChangeDirection::In, formatter)),
    );
    changes
}

fn bridge_changes(data: &BridgeData, formatter: &NumberFormatter) -> Vec<AssetChange> {
    let mut changes = Vec::new();
    if data.source.is_some() || data.destination.is_some() {
        if let Some(source) = &data.source {
            changes.push(AssetChange::new(
                ChangeDirection::Out,
                Some(format_amount(formatter, parse_decimal(&source.quantity))),
                token_symbol(&source.token),
            ));
        }
        if let Some(destination) = &data.destination {
            changes.push(AssetChange::new(
                ChangeDirection::In,
                Some(format_amount(formatter, parse_decimal(&destination.quantity))),
                token_symbol(&destination.token),
            ));
        }
    } else if let Some(legacy) = &data.legacy {
        changes.push(AssetChange::new(
            ChangeDirection::Out,
            Some(format_amount(formatter, parse_decimal(&legacy.quantity))),
            token_symbol(&legacy.token),
        ));
    }
    changes
}

fn token_change(
    transfer: &TokenTransfer,
    direction: ChangeDirection,
    formatter: &NumberFormatter,
) -> AssetChange {
    let mut change = AssetChange::new(
        direction,
        Some(format_amount(formatter, transfer.amount())),
        token_symbol(&transfer.token),
    );
    change.fiat_value = transfer.usd_value.map(|usd| {
        formatter
            .format_number(Some(usd.abs()), NumberType::FiatTokenQuantity)
            .unwrap_or_else(|_| formatter.placeholder().to_string())
    });
    change
}

fn nft_change(nft: &NftTransfer, direction: ChangeDirection) -> AssetChange {
    let count = nft.quantity.unwrap_or(1).max(1);
    AssetChange::new(direction, Some(count.to_string()), nft.label())
}

/// Formats an unsigned token amount; the sign comes from the direction.
fn format_amount(formatter: &NumberFormatter, amount: Option<f64>) -> String {
    formatter
        .format_number(amount.map(f64::abs), NumberType::TokenNonTx)
        .unwrap_or_else(|_| formatter.placeholder().to_string())
}

fn token_symbol(token: &TokenInfo) -> String {
    if token.symbol.is_empty() {
        short_address(&token.address)
    } else {
        token.symbol.clone()
    }
}

/// Shortens long addresses to `0x1234...abcd`.
pub fn short_address(address: &str) -> String {
    if address.len() > 12 && address.is_char_boundary(6) && address.is_char_boundary(address.len() - 4) {
        format!("{}...{}", &address[..6], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_signs() {
        let change = AssetChange::new(ChangeDirection::In, Some("1.50".into()), "ETH");
        assert_eq!(change.display(), "+1.50 ETH");
        assert_eq!(change.tone, Tone::Positive);

        let change = AssetChange::new(ChangeDirection::Out, Some("100.00".into()), "USDC");
        assert_eq!(change.to_string(), "-100.00 USDC");
        assert_eq!(change.tone, Tone::Negative);

        let change = AssetChange::new(ChangeDirection::Neutral, None, "USDC");
        assert_eq!(change.display(), "USDC");
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x1111111111111111111111111111111111112222"),
            "0x1111...2222"
        );
        assert_eq!(short_address("short"), "short");
    }
}
