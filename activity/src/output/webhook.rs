//! Webhook delivery for activity items.
//!
//! Items are queued on a bounded channel and posted as JSON by a background
//! task, with retries and exponential backoff.

use {
    super::ActivityItem,
    std::{env, sync::Arc, time::Duration},
    tokio::{sync::mpsc, task::JoinHandle},
};

/// Maximum number of items waiting for delivery.
pub const QUEUE_CAPACITY: usize = 1000;

/// Configuration for webhook notifications.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Webhook URL to POST items to
    pub url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum retry attempts for failed deliveries
    pub max_retries: u32,
    /// Initial backoff duration between retries
    pub retry_backoff: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

impl WebhookConfig {
    /// Reads the webhook configuration from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `WEBHOOK_URL` - Required: The URL to POST items to
    /// - `WEBHOOK_TIMEOUT_SECS` - Optional: Request timeout in seconds (default: 10)
    /// - `WEBHOOK_MAX_RETRIES` - Optional: Max retry attempts (default: 3)
    /// - `WEBHOOK_RETRY_BACKOFF_MS` - Optional: Initial backoff in ms (default: 500)
    ///
    /// Returns `None` if `WEBHOOK_URL` is unset or blank.
    pub fn from_env() -> Option<Self> {
        let url = env::var("WEBHOOK_URL").ok()?;
        if url.trim().is_empty() {
            return None;
        }
        let defaults = Self::default();

        Some(Self {
            url: url.trim().to_string(),
            timeout: Duration::from_secs(env_number(
                "WEBHOOK_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )),
            max_retries: env_number("WEBHOOK_MAX_RETRIES", defaults.max_retries),
            retry_backoff: Duration::from_millis(env_number(
                "WEBHOOK_RETRY_BACKOFF_MS",
                defaults.retry_backoff.as_millis() as u64,
            )),
        })
    }
}

fn env_number<T: std::str::FromStr + std::fmt::Display + Copy>(env_var: &str, default: T) -> T {
    match env::var(env_var) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid {env_var} '{raw}', using default {default}");
            default
        }),
        Err(_) => default,
    }
}

/// Asynchronous notifier that delivers activity items to a webhook.
///
/// Delivery runs on a background task so a slow endpoint never blocks
/// classification.
///
/// # Example
///
/// ```ignore
/// let notifier = WebhookNotifier::new(WebhookConfig {
///     url: "https://example.com/webhook".to_string(),
///     ..Default::default()
/// });
///
/// notifier.try_send(item)?;
///
/// // Drains the queue before returning
/// notifier.shutdown().await;
/// ```
pub struct WebhookNotifier {
    tx: mpsc::Sender<ActivityItem>,
    task_handle: JoinHandle<()>,
}

impl WebhookNotifier {
    /// Creates a notifier and spawns its delivery task.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: WebhookConfig) -> Self {
        let (tx, rx) = mpsc::channel::<ActivityItem>(QUEUE_CAPACITY);
        let task_handle = tokio::spawn(Self::delivery_task(rx, Arc::new(config)));

        Self { tx, task_handle }
    }

    /// Queues an item, waiting for space if the queue is full.
    pub async fn send(
        &self,
        item: ActivityItem,
    ) -> Result<(), mpsc::error::SendError<ActivityItem>> {
        self.tx.send(item).await
    }

    /// Queues an item without waiting.
    ///
    /// Fails if the queue is full or the delivery task has stopped.
    #[allow(clippy::result_large_err)]
    pub fn try_send(
        &self,
        item: ActivityItem,
    ) -> Result<(), mpsc::error::TrySendError<ActivityItem>> {
        self.tx.try_send(item)
    }

    /// Returns the number of items currently queued for delivery.
    pub fn queue_len(&self) -> usize {
        QUEUE_CAPACITY - self.tx.capacity()
    }

    pub fn is_queue_empty(&self) -> bool {
        self.queue_len() == 0
    }

    /// Closes the queue and waits until every queued item was attempted.
    pub async fn shutdown(self) {
        let Self { tx, task_handle } = self;
        drop(tx);
        if let Err(e) = task_handle.await {
            log::error!("Webhook delivery task failed: {e}");
        }
    }

    async fn delivery_task(mut rx: mpsc::Receiver<ActivityItem>, config: Arc<WebhookConfig>) {
        let client = match reqwest::Client::builder().timeout(config.timeout).build() {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to create HTTP client for webhooks: {e}");
                return;
            }
        };

        while let Some(item) = rx.recv().await {
            let json = match serde_json::to_string(&item) {
                Ok(j) => j,
                Err(e) => {
                    log::error!("Failed to serialize activity item: {e}");
                    continue;
                }
            };

            let mut attempt = 0;
            let mut backoff = config.retry_backoff;

            loop {
                attempt += 1;
                match client
                    .post(&config.url)
                    .header("Content-Type", "application/json")
                    .body(json.clone())
                    .send()
                    .await
                {
                    Ok(resp) if resp.status().is_success() => {
                        log::debug!(
                            "Webhook delivered: hash={}, status={}",
                            item.hash,
                            resp.status()
                        );
                        break;
                    }
                    Ok(resp) => {
                        log::warn!(
                            "Webhook failed: hash={}, status={}, attempt={}/{}",
                            item.hash,
                            resp.status(),
                            attempt,
                            config.max_retries + 1
                        );
                    }
                    Err(e) => {
                        log::warn!(
                            "Webhook error: hash={}, err={e}, attempt={}/{}",
                            item.hash,
                            attempt,
                            config.max_retries + 1
                        );
                    }
                }

                if attempt > config.max_retries {
                    log::error!(
                        "Webhook delivery failed after {} attempts: hash={}",
                        attempt,
                        item.hash
                    );
                    break;
                }

                tokio::time::sleep(backoff).await;
                backoff *= 2;
            }
        }

        log::info!("Webhook delivery task shutting down");
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::classify::Category,
        wallet_activity_decoder::Chain,
    };

    #[test]
    fn test_default_config() {
        let config = WebhookConfig::default();
        assert!(config.url.is_empty());
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_backoff, Duration::from_millis(500));
    }

    #[test]
    fn test_env_number_fallback() {
        env::set_var("TEST_WEBHOOK_RETRIES_BAD", "many");
        assert_eq!(env_number("TEST_WEBHOOK_RETRIES_BAD", 3u32), 3);
        env::set_var("TEST_WEBHOOK_RETRIES_GOOD", " 7 ");
        assert_eq!(env_number("TEST_WEBHOOK_RETRIES_GOOD", 3u32), 7);
        assert_eq!(env_number("TEST_WEBHOOK_RETRIES_UNSET_12345", 5u64), 5);
        env::remove_var("TEST_WEBHOOK_RETRIES_BAD");
        env::remove_var("TEST_WEBHOOK_RETRIES_GOOD");
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_drains_on_shutdown() {
        let notifier = WebhookNotifier::new(WebhookConfig {
            url: "http://127.0.0.1:9/hook".to_string(),
            timeout: Duration::from_millis(200),
            max_retries: 0,
            retry_backoff: Duration::from_millis(1),
        });
        let item = ActivityItem::builder(Category::Swap, Chain::Base, "0xfeed").build();
        notifier.try_send(item).unwrap();
        assert!(notifier.queue_len() <= 1);

        tokio::time::timeout(Duration::from_secs(5), notifier.shutdown())
            .await
            .unwrap();
    }
}
