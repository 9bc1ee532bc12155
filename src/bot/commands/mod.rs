pub mod leaderboard;
pub mod ping;
pub mod scanusers;
pub mod stats;

use crate::bot::{Context, Error};
use crate::error::BotError;
use crate::utils::format::format_error_message;

/// Logs `error` and tells the user what went wrong in one line.
pub async fn reply_error(ctx: Context<'_>, error: &BotError) -> Result<(), Error> {
    match error {
        BotError::IdentityNotFound(name) => {
            tracing::info!("/{}: no osu! user named {}", ctx.command().name, name)
        }
        other => tracing::error!("/{} failed: {:?}", ctx.command().name, other),
    }
    ctx.say(error_text(error)).await?;
    Ok(())
}

/// The one-line message shown to the user for `error`.
pub fn error_text(error: &BotError) -> String {
    format_error_message(&error.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_player_reads_as_plain_text() {
        let text = error_text(&BotError::IdentityNotFound("Mallory".into()));

        assert_eq!(text, "❌ **Error**: Username does not exist on osu! servers");
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn internal_errors_stay_one_line() {
        let text = error_text(&BotError::ImageAssetMissing(3));
        assert!(text.starts_with("❌ **Error**: "));
        assert_eq!(text.lines().count(), 1);
    }
}
