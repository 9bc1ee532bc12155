use crate::banner::{BANNER_FILENAME, render_banner};
use crate::bot::commands::reply_error;
use crate::bot::{Context, Error};
use crate::osu::identity::{refresh_player, sync_identity};
use crate::stats::build_player_report;
use crate::utils::format::create_stats_embed;
use poise::serenity_prelude as serenity;

/// Returns tournament statistics for a specific player
#[poise::command(slash_command)]
pub async fn stats(
    ctx: Context<'_>,
    #[description = "Username of the player"] username: String,
) -> Result<(), Error> {
    ctx.defer().await?;
    let data = ctx.data();

    let profile = match sync_identity(&data.pool, data.osu.as_ref(), &username).await {
        Ok(profile) => profile,
        Err(e) => return reply_error(ctx, &e).await,
    };

    let report = match build_player_report(&data.pool, &profile.username).await {
        Ok(report) => report,
        Err(e) => return reply_error(ctx, &e).await,
    };

    if let Some(opponent) = &report.top_opponent {
        refresh_player(&data.pool, data.osu.as_ref(), &opponent.username).await;
    }

    let assets = data.assets.clone();
    let tournament_ids = report.tournament_ids.clone();
    let rendered =
        tokio::task::spawn_blocking(move || render_banner(&assets, &tournament_ids)).await?;
    let banner = match rendered {
        Ok(banner) => banner,
        Err(e) => {
            tracing::warn!("Sending stats for {} without a banner: {}", profile.username, e);
            None
        }
    };

    let embed = create_stats_embed(&profile, &report, banner.as_ref().map(|_| BANNER_FILENAME));
    let mut reply = poise::CreateReply::default().embed(embed);
    if let Some(bytes) = banner {
        reply = reply.attachment(serenity::CreateAttachment::bytes(bytes, BANNER_FILENAME));
    }
    ctx.send(reply).await?;

    tracing::info!(
        "/stats for {}: {} matches",
        profile.username,
        report.stats.matches_played
    );
    Ok(())
}
