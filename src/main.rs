mod banner;
mod bot;
mod config;
mod database;
mod error;
mod osu;
mod stats;
mod utils;

use anyhow::Result;
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "nuot_bot=info,poise=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = Config::path_from_env();
    tracing::info!("Loading configuration from {}", config_path.display());
    let config = Config::load(&config_path)?;

    // Create and start the bot
    let mut client = bot::create_bot(config).await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Could not listen for shutdown signal: {:?}", e);
            return;
        }
        tracing::info!("Shutdown signal received, closing gateway connection...");
        shard_manager.shutdown_all().await;
    });

    tracing::info!("Starting Discord bot...");

    if let Err(why) = client.start().await {
        tracing::error!("Client error: {:?}", why);
    }

    Ok(())
}
