//! Wallet activity processor.
//!
//! Classifies each transaction from the configured viewer's perspective and
//! emits the resulting [`ActivityItem`] to the log and, optionally, a webhook.

use {
    super::{ProcessOutcome, Processor},
    crate::{
        classify::{describe, Category},
        error::ActivityResult,
        format::NumberFormatter,
        output::{ActivityItem, OutputFormat, WebhookNotifier},
    },
    async_trait::async_trait,
    std::{collections::HashSet, sync::Arc},
    wallet_activity_decoder::{Chain, TransactionDetails},
};

/// The wallet whose history is being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    pub address: String,
    /// Restricts the viewer to one chain's address family
    pub chain: Option<Chain>,
}

impl Viewer {
    pub fn new(address: impl Into<String>, chain: Option<Chain>) -> Self {
        Self {
            address: address.into(),
            chain,
        }
    }

    /// Returns `true` if transactions on `chain` can involve this wallet.
    ///
    /// EVM addresses are shared across EVM chains, so a viewer pinned to
    /// Ethereum also sees Base or Arbitrum activity.
    pub fn applies_to(&self, chain: Chain) -> bool {
        match self.chain {
            Some(own) => own.family() == chain.family(),
            None => chain.is_valid_address(&self.address),
        }
    }
}

/// Processor that turns transactions into activity items for one viewer.
///
/// Filters are optional: an empty chain or category set lets everything through.
pub struct WalletActivityProcessor {
    viewer: Viewer,
    formatter: Arc<NumberFormatter>,
    filter_chains: HashSet<Chain>,
    filter_categories: HashSet<Category>,
    output_format: OutputFormat,
    webhook_notifier: Option<Arc<WebhookNotifier>>,
    emitted: u64,
}

impl WalletActivityProcessor {
    pub fn new(
        viewer: Viewer,
        formatter: Arc<NumberFormatter>,
        output_format: OutputFormat,
        webhook_notifier: Option<Arc<WebhookNotifier>>,
    ) -> Self {
        Self {
            viewer,
            formatter,
            filter_chains: HashSet::new(),
            filter_categories: HashSet::new(),
            output_format,
            webhook_notifier,
            emitted: 0,
        }
    }

    pub fn with_chain_filter(mut self, chains: HashSet<Chain>) -> Self {
        self.filter_chains = chains;
        self
    }

    pub fn with_category_filter(mut self, categories: HashSet<Category>) -> Self {
        self.filter_categories = categories;
        self
    }

    /// Number of items emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn matches_chain(&self, chain: Chain) -> bool {
        self.filter_chains.is_empty() || self.filter_chains.contains(&chain)
    }

    fn matches_category(&self, category: Category) -> bool {
        self.filter_categories.is_empty() || self.filter_categories.contains(&category)
    }

    /// Classifies `tx`, returning `None` when it does not pass the filters.
    pub fn classify_item(&self, tx: &TransactionDetails) -> Option<ActivityItem> {
        if !self.matches_chain(tx.chain) {
            log::debug!("Skipping {}: chain {} not in filter", tx.hash, tx.chain);
            return None;
        }
        if !self.viewer.applies_to(tx.chain) {
            log::debug!(
                "Skipping {}: viewer {} is not an address on {}",
                tx.hash,
                self.viewer.address,
                tx.chain
            );
            return None;
        }

        let classification = describe(tx, &self.viewer.address, &self.formatter);
        if !self.matches_category(classification.category) {
            log::debug!(
                "Skipping {}: category {} not in filter",
                tx.hash,
                classification.category
            );
            return None;
        }

        Some(ActivityItem::from_classification(tx, classification))
    }

    fn emit_item(&mut self, item: ActivityItem) {
        log::info!("{}", item.format(self.output_format));
        self.emitted += 1;

        if let Some(ref notifier) = self.webhook_notifier {
            if let Err(e) = notifier.try_send(item) {
                log::warn!("Failed to queue webhook notification: {e}");
            }
        }
    }
}

#[async_trait]
impl Processor for WalletActivityProcessor {
    async fn process(&mut self, tx: &TransactionDetails) -> ActivityResult<ProcessOutcome> {
        match self.classify_item(tx) {
            Some(item) => {
                self.emit_item(item);
                Ok(ProcessOutcome::Emitted)
            }
            None => Ok(ProcessOutcome::Filtered),
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        wallet_activity_decoder::{TokenInfo, TokenTransfer},
    };

    const VIEWER: &str = "0x1111111111111111111111111111111111111111";
    const OTHER: &str = "0x2222222222222222222222222222222222222222";
    const SOL_VIEWER: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

    fn processor(viewer: Viewer) -> WalletActivityProcessor {
        WalletActivityProcessor::new(
            viewer,
            Arc::new(NumberFormatter::default()),
            OutputFormat::Json,
            None,
        )
    }

    fn send_tx(chain: Chain) -> TransactionDetails {
        let mut tx = TransactionDetails::new("0xdead", chain, VIEWER);
        tx.to = OTHER.to_string();
        tx.token_transfers = vec![TokenTransfer {
            token: TokenInfo::new("0xa0b8", "USDC", 6),
            from: VIEWER.to_string(),
            to: OTHER.to_string(),
            quantity: "12.5".to_string(),
            usd_value: None,
        }];
        tx
    }

    #[test]
    fn test_viewer_applies_to() {
        let evm = Viewer::new(VIEWER, None);
        assert!(evm.applies_to(Chain::Ethereum));
        assert!(evm.applies_to(Chain::Polygon));
        assert!(!evm.applies_to(Chain::Solana));

        let pinned = Viewer::new(VIEWER, Some(Chain::Base));
        assert!(pinned.applies_to(Chain::Arbitrum));
        assert!(!pinned.applies_to(Chain::Ton));

        let sol = Viewer::new(SOL_VIEWER, None);
        assert!(sol.applies_to(Chain::Solana));
        assert!(!sol.applies_to(Chain::Ethereum));
    }

    #[tokio::test]
    async fn test_emits_matching_transaction() {
        let mut processor = processor(Viewer::new(VIEWER, None));
        let outcome = processor.process(&send_tx(Chain::Ethereum)).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Emitted);
        assert_eq!(processor.emitted(), 1);

        let item = processor.classify_item(&send_tx(Chain::Ethereum)).unwrap();
        assert_eq!(item.category, Category::SendToken);
        assert_eq!(item.asset_changes[0].display(), "-12.50 USDC");
        assert_eq!(item.counterparty.as_deref(), Some(OTHER));
    }

    #[tokio::test]
    async fn test_chain_filter() {
        let mut processor = processor(Viewer::new(VIEWER, None))
            .with_chain_filter(HashSet::from([Chain::Base]));
        let outcome = processor.process(&send_tx(Chain::Ethereum)).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Filtered);
        let outcome = processor.process(&send_tx(Chain::Base)).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Emitted);
    }

    #[tokio::test]
    async fn test_category_filter() {
        let mut processor = processor(Viewer::new(VIEWER, None))
            .with_category_filter(HashSet::from([Category::Swap]));
        let outcome = processor.process(&send_tx(Chain::Ethereum)).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Filtered);
        assert_eq!(processor.emitted(), 0);
    }

    #[tokio::test]
    async fn test_foreign_chain_family_is_filtered() {
        let mut processor = processor(Viewer::new(SOL_VIEWER, None));
        let outcome = processor.process(&send_tx(Chain::Ethereum)).await.unwrap();
        assert_eq!(outcome, ProcessOutcome::Filtered);
    }
}
