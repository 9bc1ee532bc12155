use crate::database::models::UpsertOutcome;
use crate::database::queries;
use crate::error::BotError;
use crate::osu::{OsuProfile, RankingApi};
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Resolves `display_name` and brings the stored user row up to date.
/// Nothing is written when the player does not exist.
pub async fn sync_identity(
    pool: &SqlitePool,
    api: &dyn RankingApi,
    display_name: &str,
) -> Result<OsuProfile, BotError> {
    let profile = api.resolve(display_name).await?;

    match queries::upsert_user(pool, profile.user_id, &profile.username).await? {
        UpsertOutcome::Inserted => {
            info!("Added user {} ({})", profile.username, profile.user_id)
        }
        UpsertOutcome::Renamed { previous } => info!(
            "Renamed user {} from {} to {}",
            profile.user_id, previous, profile.username
        ),
        UpsertOutcome::Unchanged => {}
    }

    Ok(profile)
}

/// Re-syncs a player we only know by stored name, e.g. someone's top opponent.
/// Failures are logged and otherwise ignored.
pub async fn refresh_player(pool: &SqlitePool, api: &dyn RankingApi, display_name: &str) {
    if let Err(e) = sync_identity(pool, api, display_name).await {
        warn!("Could not refresh {}: {}", display_name, e);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub scanned: usize,
    pub inserted: usize,
    pub failed: usize,
}

/// Fetches every rostered player missing from `users`, one at a time.
pub async fn scan_users(pool: &SqlitePool, api: &dyn RankingApi) -> Result<ScanReport, BotError> {
    let user_ids = queries::list_distinct_team_member_user_ids(pool).await?;
    let mut report = ScanReport {
        scanned: user_ids.len(),
        ..Default::default()
    };

    for user_id in user_ids {
        if queries::user_exists(pool, user_id).await? {
            continue;
        }
        match api.resolve_id(user_id).await {
            Ok(profile) => {
                queries::upsert_user(pool, user_id, &profile.username).await?;
                report.inserted += 1;
            }
            Err(e) => {
                warn!("Skipping roster member {}: {}", user_id, e);
                report.failed += 1;
            }
        }
    }

    info!(
        "Roster scan finished: {} scanned, {} inserted, {} failed",
        report.scanned, report.inserted, report.failed
    );
    Ok(report)
}
