use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tournament {
    pub tournament_id: i64,
    pub tournament_name: String,
    pub format: Option<String>,
    pub winning_team_id: Option<i64>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub team_id: i64,
    pub tournament_id: i64,
    pub team_name: String,
    pub placement: Option<i64>,
}

#[allow(dead_code)]
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Match {
    pub match_id: i64,
    pub tournament_id: i64,
    pub team1_id: i64,
    pub team2_id: i64,
    pub team1_score: i64,
    pub team2_score: i64,
    pub match_url: Option<String>,
}

/// What `upsert_user` did with the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Renamed { previous: String },
    Unchanged,
}
