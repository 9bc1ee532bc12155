pub mod aggregator;
pub mod leaderboard;

use crate::database::queries;
use crate::error::BotError;
use aggregator::{Opponent, PlayerStats, Teammate, TournamentSummary};
use sqlx::SqlitePool;

/// Everything `/stats` shows for one player.
#[derive(Debug, Clone)]
pub struct PlayerReport {
    pub stats: PlayerStats,
    pub win_percentage: f64,
    pub top_opponent: Option<Opponent>,
    pub best_teammate: Option<Teammate>,
    pub best_tournament: Option<TournamentSummary>,
    pub first_tournament: Option<TournamentSummary>,
    pub tournament_ids: Vec<i64>,
}

pub async fn build_player_report(
    pool: &SqlitePool,
    username: &str,
) -> Result<PlayerReport, BotError> {
    let stats = aggregator::compute_player_stats(pool, username).await?;
    let win_percentage =
        aggregator::win_percentage(stats.points_scored, stats.points_scored_against);

    Ok(PlayerReport {
        win_percentage,
        stats,
        top_opponent: aggregator::top_opponent(pool, username).await?,
        best_teammate: aggregator::top_teammate(pool, username).await?,
        best_tournament: aggregator::best_tournament(pool, username).await?,
        first_tournament: aggregator::first_tournament(pool, username).await?,
        tournament_ids: queries::tournament_ids_for_user(pool, username).await?,
    })
}
