use anyhow::Result;
use domain::Period;
use tracing::info;

use shopvid_analytics::{init_logging, AnalyticsService, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    init_logging(&config.logging);

    info!(
        "Starting Shopvid analytics aggregator v{}",
        env!("CARGO_PKG_VERSION")
    );

    let service = AnalyticsService::from_config(&config)?;

    // With a shop domain argument, dump that store's bundle; otherwise
    // dump the all-stores dashboard bundle.
    match std::env::args().nth(1) {
        Some(shop_domain) => {
            info!(shop_domain, "Fetching per-store metrics");
            let bundle = service.get_per_store_metrics_by_domain(&shop_domain).await?;
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
        None => {
            info!("Fetching all-stores metrics");
            let analytics = service.get_analytics(Period::default()).await?;
            let bundle = service.get_all_stores_metrics().await?;
            println!("{}", serde_json::to_string_pretty(&analytics)?);
            println!("{}", serde_json::to_string_pretty(&bundle)?);
        }
    }

    Ok(())
}
