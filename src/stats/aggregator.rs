//! Aggregate queries behind `/stats`. Every query resolves the display name
//! to a single stored user and never creates users.
//!
//! Names only resync lazily, so after a rename two rows can match the same
//! name case-insensitively. An exact-case match wins, then the lowest id.

use sqlx::{Result, Row, SqlitePool};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStats {
    pub matches_played: i64,
    pub points_scored: i64,
    pub points_scored_against: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opponent {
    pub username: String,
    pub points_against: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teammate {
    pub username: String,
    pub shared_teams: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSummary {
    pub tournament_id: i64,
    pub tournament_name: String,
    pub placement: Option<i64>,
    pub won: bool,
}

/// `scored / (scored + against) * 100`, or 0 when nothing was scored at all.
pub fn win_percentage(points_scored: i64, points_scored_against: i64) -> f64 {
    let total = points_scored + points_scored_against;
    if total == 0 {
        return 0.0;
    }
    points_scored as f64 / total as f64 * 100.0
}

pub async fn compute_player_stats(pool: &SqlitePool, username: &str) -> Result<PlayerStats> {
    let row = sqlx::query(
        "SELECT
             COUNT(DISTINCT m.match_id) AS matches_played,
             COALESCE(SUM(CASE WHEN tm.team_id = m.team1_id THEN m.team1_score ELSE m.team2_score END), 0) AS points_scored,
             COALESCE(SUM(CASE WHEN tm.team_id = m.team1_id THEN m.team2_score ELSE m.team1_score END), 0) AS points_scored_against
         FROM matches m
         JOIN team_members tm ON tm.team_id = m.team1_id OR tm.team_id = m.team2_id
         WHERE tm.user_id = (
             SELECT user_id FROM users
             WHERE LOWER(username) = LOWER(?1)
             ORDER BY username = ?1 DESC, user_id ASC
             LIMIT 1
         )",
    )
    .bind(username)
    .fetch_one(pool)
    .await?;

    Ok(PlayerStats {
        matches_played: row.get("matches_played"),
        points_scored: row.get("points_scored"),
        points_scored_against: row.get("points_scored_against"),
    })
}

/// The opposing player whose teams scored the most points against `username`.
///
/// Ties on points go to the alphabetically first display name, so the result
/// is stable across calls.
pub async fn top_opponent(pool: &SqlitePool, username: &str) -> Result<Option<Opponent>> {
    let row = sqlx::query(
        "SELECT
             ou.username AS opponent,
             SUM(CASE WHEN tm.team_id = m.team1_id THEN m.team2_score ELSE m.team1_score END) AS points_against
         FROM matches m
         JOIN team_members tm ON tm.team_id = m.team1_id OR tm.team_id = m.team2_id
         JOIN team_members otm
             ON otm.team_id = CASE WHEN tm.team_id = m.team1_id THEN m.team2_id ELSE m.team1_id END
         JOIN users ou ON ou.user_id = otm.user_id
         WHERE tm.user_id = (
             SELECT user_id FROM users
             WHERE LOWER(username) = LOWER(?1)
             ORDER BY username = ?1 DESC, user_id ASC
             LIMIT 1
         )
           AND otm.team_id <> tm.team_id
         GROUP BY ou.user_id
         ORDER BY points_against DESC, LOWER(ou.username) ASC
         LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Opponent {
        username: row.get("opponent"),
        points_against: row.get("points_against"),
    }))
}

/// The player who shared the most teams with `username`.
pub async fn top_teammate(pool: &SqlitePool, username: &str) -> Result<Option<Teammate>> {
    let row = sqlx::query(
        "SELECT
             tu.username AS teammate,
             COUNT(DISTINCT tm.team_id) AS shared_teams
         FROM team_members tm
         JOIN team_members ttm ON ttm.team_id = tm.team_id AND ttm.user_id <> tm.user_id
         JOIN users tu ON tu.user_id = ttm.user_id
         WHERE tm.user_id = (
             SELECT user_id FROM users
             WHERE LOWER(username) = LOWER(?1)
             ORDER BY username = ?1 DESC, user_id ASC
             LIMIT 1
         )
         GROUP BY tu.user_id
         ORDER BY shared_teams DESC, LOWER(tu.username) ASC
         LIMIT 1",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Teammate {
        username: row.get("teammate"),
        shared_teams: row.get("shared_teams"),
    }))
}

/// Won tournaments first, then the best recorded placement, then the oldest.
pub async fn best_tournament(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<TournamentSummary>> {
    tournament_for_user(
        pool,
        username,
        "won DESC, te.placement IS NULL, te.placement ASC, t.tournament_id ASC",
    )
    .await
}

pub async fn first_tournament(
    pool: &SqlitePool,
    username: &str,
) -> Result<Option<TournamentSummary>> {
    tournament_for_user(pool, username, "t.tournament_id ASC").await
}

async fn tournament_for_user(
    pool: &SqlitePool,
    username: &str,
    order_by: &'static str,
) -> Result<Option<TournamentSummary>> {
    let sql = format!(
        "SELECT
             t.tournament_id,
             t.tournament_name,
             te.placement,
             COALESCE(t.winning_team_id = te.team_id, 0) AS won
         FROM team_members tm
         JOIN teams te ON te.team_id = tm.team_id
         JOIN tournaments t ON t.tournament_id = te.tournament_id
         WHERE tm.user_id = (
             SELECT user_id FROM users
             WHERE LOWER(username) = LOWER(?1)
             ORDER BY username = ?1 DESC, user_id ASC
             LIMIT 1
         )
         ORDER BY {order_by}
         LIMIT 1"
    );

    let row = sqlx::query(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| TournamentSummary {
        tournament_id: row.get("tournament_id"),
        tournament_name: row.get("tournament_name"),
        placement: row.get("placement"),
        won: row.get::<i64, _>("won") != 0,
    }))
}
