//! Transaction processors.
//!
//! A [`Processor`] receives every decoded transaction the pipeline reads and
//! decides whether it produces output.
//!
//! - [`wallet`] - classifies transactions for one viewing wallet

mod wallet;

use {crate::error::ActivityResult, async_trait::async_trait, wallet_activity_decoder::TransactionDetails};

pub use wallet::{Viewer, WalletActivityProcessor};

/// What a processor did with a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// An activity item was produced
    Emitted,
    /// The transaction did not pass the processor's filters
    Filtered,
}

#[async_trait]
pub trait Processor: Send {
    async fn process(&mut self, tx: &TransactionDetails) -> ActivityResult<ProcessOutcome>;
}
