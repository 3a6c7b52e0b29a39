use {
    std::sync::Arc,
    wallet_activity::{
        config::AppConfig,
        error::ActivityResult,
        format::NumberFormatter,
        output::WebhookNotifier,
        pipeline::{JsonLinesDatasource, Pipeline},
        processors::WalletActivityProcessor,
    },
};

#[tokio::main]
pub async fn main() -> ActivityResult<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env()?;

    log::info!(
        "Viewer: {}{}",
        config.viewer.address,
        config
            .viewer
            .chain
            .map(|c| format!(" ({c})"))
            .unwrap_or_default()
    );
    log::info!(
        "Locale: {}, currency: {}, output: {:?}",
        config.locale,
        config.currency,
        config.output_format
    );

    if config.filter_chains.is_empty() {
        log::info!("Chain filter: disabled (tracking all chains)");
    } else {
        log::info!(
            "Chain filter: {} chain(s) - {:?}",
            config.filter_chains.len(),
            config.filter_chains
        );
    }

    if config.filter_categories.is_empty() {
        log::info!("Category filter: disabled (showing all categories)");
    } else {
        log::info!(
            "Category filter: {} categor(ies) - {:?}",
            config.filter_categories.len(),
            config.filter_categories
        );
    }

    let webhook_notifier = config.webhook.clone().map(|webhook| {
        log::info!("Webhook: {}", webhook.url);
        Arc::new(WebhookNotifier::new(webhook))
    });

    let formatter = Arc::new(
        NumberFormatter::new(config.locale, config.currency)
            .with_placeholder(config.placeholder.clone()),
    );

    let processor = WalletActivityProcessor::new(
        config.viewer.clone(),
        formatter,
        config.output_format,
        webhook_notifier.clone(),
    )
    .with_chain_filter(config.filter_chains.clone())
    .with_category_filter(config.filter_categories.clone());

    let stats = Pipeline::builder()
        .datasource(JsonLinesDatasource::open(&config.feed_path).await?)
        .processor(processor)
        .build()?
        .run()
        .await?;

    if let Some(notifier) = webhook_notifier {
        match Arc::try_unwrap(notifier) {
            Ok(notifier) => notifier.shutdown().await,
            Err(_) => log::warn!("Webhook notifier still shared, pending deliveries dropped"),
        }
    }

    log::info!("Done: {stats}");
    Ok(())
}
