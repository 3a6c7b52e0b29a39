//! Presentation and delivery of classified activity.
//!
//! - [`ActivityItem`] - one display-ready history row, built from a classification
//! - [`OutputFormat`] - configurable output formatting (text, JSON)
//! - [`WebhookNotifier`] - background webhook delivery with retries

mod activity_item;
mod webhook;

pub use {
    activity_item::{explorer_url, ActivityItem, ActivityItemBuilder, OutputFormat},
    webhook::{WebhookConfig, WebhookNotifier, QUEUE_CAPACITY},
};
