use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    create_users_table(pool).await?;
    create_tournaments_table(pool).await?;
    create_teams_table(pool).await?;
    create_team_members_table(pool).await?;
    create_matches_table(pool).await?;

    info!("Database migrations completed successfully");
    Ok(())
}

async fn create_users_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY,
            username TEXT NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_tournaments_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tournaments (
            tournament_id INTEGER PRIMARY KEY,
            tournament_name TEXT NOT NULL,
            format TEXT,
            winning_team_id INTEGER
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_teams_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teams (
            team_id INTEGER PRIMARY KEY,
            tournament_id INTEGER NOT NULL,
            team_name TEXT NOT NULL,
            placement INTEGER,
            FOREIGN KEY (tournament_id) REFERENCES tournaments (tournament_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

// user_id carries no foreign key: roster imports may reference players
// that /scanusers has not fetched yet.
async fn create_team_members_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS team_members (
            team_id INTEGER NOT NULL,
            user_id INTEGER NOT NULL,
            PRIMARY KEY (team_id, user_id),
            FOREIGN KEY (team_id) REFERENCES teams (team_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_matches_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS matches (
            match_id INTEGER PRIMARY KEY,
            tournament_id INTEGER NOT NULL,
            team1_id INTEGER NOT NULL,
            team2_id INTEGER NOT NULL,
            team1_score INTEGER NOT NULL DEFAULT 0,
            team2_score INTEGER NOT NULL DEFAULT 0,
            match_url TEXT,
            FOREIGN KEY (tournament_id) REFERENCES tournaments (tournament_id),
            FOREIGN KEY (team1_id) REFERENCES teams (team_id),
            FOREIGN KEY (team2_id) REFERENCES teams (team_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
