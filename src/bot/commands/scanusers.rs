use crate::bot::commands::error_text;
use crate::bot::{Context, Error};
use crate::osu::identity::scan_users;

/// Scans and populates missing users from the team_members table into the users table
#[poise::command(slash_command, default_member_permissions = "MANAGE_GUILD")]
pub async fn scanusers(ctx: Context<'_>) -> Result<(), Error> {
    let handle = ctx.say("Processing...").await?;
    let data = ctx.data();

    let report = match scan_users(&data.pool, data.osu.as_ref()).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("/scanusers failed: {:?}", e);
            handle
                .edit(ctx, poise::CreateReply::default().content(error_text(&e)))
                .await?;
            return Ok(());
        }
    };

    let summary = format!(
        "Scan and population of missing users completed: {} rostered, {} added, {} could not be fetched.",
        report.scanned, report.inserted, report.failed
    );
    handle
        .edit(ctx, poise::CreateReply::default().content(summary))
        .await?;
    Ok(())
}
