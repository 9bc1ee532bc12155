use crate::bot::commands::reply_error;
use crate::bot::{Context, Error};
use crate::stats::leaderboard::build_leaderboard;
use crate::utils::format::create_leaderboard_embed;

/// Returns a leaderboard of players ranked by matches played
#[poise::command(slash_command)]
pub async fn leaderboard(
    ctx: Context<'_>,
    #[description = "Page to show (10 players per page)"]
    #[min = 1]
    page: Option<u32>,
) -> Result<(), Error> {
    ctx.defer().await?;

    let board = match build_leaderboard(&ctx.data().pool).await {
        Ok(board) => board,
        Err(e) => return reply_error(ctx, &e).await,
    };

    let page = page.unwrap_or(1).saturating_sub(1) as usize;
    ctx.send(poise::CreateReply::default().embed(create_leaderboard_embed(&board, page)))
        .await?;

    tracing::info!("/leaderboard: {} players", board.entries().len());
    Ok(())
}
