use crate::bot::{Context, Error};

/// Returns pong
#[poise::command(slash_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    ctx.say("Pong!").await?;
    tracing::info!("/ping from {}", ctx.author().name);
    Ok(())
}
