pub mod commands;
pub mod handlers;

use crate::banner::AssetCatalog;
use crate::config::Config;
use crate::database;
use crate::osu::{OsuClient, RankingApi};
use anyhow::Result;
use poise::serenity_prelude as serenity;
use sqlx::SqlitePool;
use std::sync::Arc;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

#[derive(Clone)]
pub struct Data {
    pub pool: SqlitePool,
    pub osu: Arc<dyn RankingApi>,
    pub assets: AssetCatalog,
}

pub async fn create_bot(config: Config) -> Result<serenity::Client> {
    let pool = database::create_connection(&config.database_url).await?;
    let osu = OsuClient::new(&config.osu_client_id, &config.osu_client_secret)?;

    let data = Data {
        pool,
        osu: Arc::new(osu),
        assets: AssetCatalog::new(config.assets_dir.clone(), config.tournament_logos.clone()),
    };

    let intents = serenity::GatewayIntents::non_privileged();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping::ping(),
                commands::stats::stats(),
                commands::leaderboard::leaderboard(),
                commands::scanusers::scanusers(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::event_handler(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(handlers::on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, _ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    Ok(client)
}
