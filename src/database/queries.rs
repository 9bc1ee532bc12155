use crate::database::models::{Match, Team, Tournament, UpsertOutcome, User};
use sqlx::sqlite::SqliteRow;
use sqlx::{Result, Row, SqlitePool};

fn user_from_row(row: &SqliteRow) -> User {
    User {
        user_id: row.get("user_id"),
        username: row.get("username"),
        created_at: row.get("created_at"),
    }
}

// User queries
pub async fn get_user(pool: &SqlitePool, user_id: i64) -> Result<Option<User>> {
    let row = sqlx::query("SELECT user_id, username, created_at FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(user_from_row))
}

pub async fn user_exists(pool: &SqlitePool, user_id: i64) -> Result<bool> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Inserts the user, or renames it when the stored display name drifted.
pub async fn upsert_user(
    pool: &SqlitePool,
    user_id: i64,
    username: &str,
) -> Result<UpsertOutcome> {
    match get_user(pool, user_id).await? {
        None => {
            sqlx::query("INSERT INTO users (user_id, username) VALUES (?, ?)")
                .bind(user_id)
                .bind(username)
                .execute(pool)
                .await?;
            Ok(UpsertOutcome::Inserted)
        }
        Some(user) if user.username != username => {
            sqlx::query("UPDATE users SET username = ? WHERE user_id = ?")
                .bind(username)
                .bind(user_id)
                .execute(pool)
                .await?;
            Ok(UpsertOutcome::Renamed {
                previous: user.username,
            })
        }
        Some(_) => Ok(UpsertOutcome::Unchanged),
    }
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT user_id, username, created_at FROM users ORDER BY user_id ASC")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(user_from_row).collect())
}

pub async fn list_distinct_team_member_user_ids(pool: &SqlitePool) -> Result<Vec<i64>> {
    sqlx::query_scalar("SELECT DISTINCT user_id FROM team_members ORDER BY user_id ASC")
        .fetch_all(pool)
        .await
}

/// Tournaments the named user was rostered in, oldest first. The name resolves
/// like the stats queries: exact case first, then the lowest id.
pub async fn tournament_ids_for_user(pool: &SqlitePool, username: &str) -> Result<Vec<i64>> {
    sqlx::query_scalar(
        "SELECT DISTINCT te.tournament_id
         FROM team_members tm
         JOIN teams te ON te.team_id = tm.team_id
         WHERE tm.user_id = (
             SELECT user_id FROM users
             WHERE LOWER(username) = LOWER(?1)
             ORDER BY username = ?1 DESC, user_id ASC
             LIMIT 1
         )
         ORDER BY te.tournament_id ASC",
    )
    .bind(username)
    .fetch_all(pool)
    .await
}

// Administrative loaders, used by data imports rather than commands
#[allow(dead_code)]
pub async fn add_tournament(pool: &SqlitePool, tournament: &Tournament) -> Result<()> {
    sqlx::query(
        "INSERT INTO tournaments (tournament_id, tournament_name, format, winning_team_id)
         VALUES (?, ?, ?, ?)",
    )
    .bind(tournament.tournament_id)
    .bind(&tournament.tournament_name)
    .bind(&tournament.format)
    .bind(tournament.winning_team_id)
    .execute(pool)
    .await?;

    Ok(())
}

#[allow(dead_code)]
pub async fn add_team(pool: &SqlitePool, team: &Team) -> Result<()> {
    sqlx::query(
        "INSERT INTO teams (team_id, tournament_id, team_name, placement) VALUES (?, ?, ?, ?)",
    )
    .bind(team.team_id)
    .bind(team.tournament_id)
    .bind(&team.team_name)
    .bind(team.placement)
    .execute(pool)
    .await?;

    Ok(())
}

#[allow(dead_code)]
pub async fn add_team_member(pool: &SqlitePool, team_id: i64, user_id: i64) -> Result<()> {
    sqlx::query("INSERT INTO team_members (team_id, user_id) VALUES (?, ?)")
        .bind(team_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(())
}

#[allow(dead_code)]
pub async fn add_match(pool: &SqlitePool, m: &Match) -> Result<()> {
    sqlx::query(
        "INSERT INTO matches (match_id, tournament_id, team1_id, team2_id, team1_score, team2_score, match_url)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(m.match_id)
    .bind(m.tournament_id)
    .bind(m.team1_id)
    .bind(m.team2_id)
    .bind(m.team1_score)
    .bind(m.team2_score)
    .bind(&m.match_url)
    .execute(pool)
    .await?;

    Ok(())
}
