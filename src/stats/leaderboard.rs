use crate::database::queries;
use crate::error::BotError;
use crate::stats::aggregator::compute_player_stats;
use sqlx::SqlitePool;

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub matches_played: i64,
    pub points_scored: i64,
    pub points_scored_against: i64,
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    /// Sorts by matches played, most first. Ties keep their input order.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.matches_played.cmp(&a.matches_played));
        Self { entries }
    }

    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Zero-based page clamped to the last page.
    pub fn page(&self, index: usize) -> (usize, &[LeaderboardEntry]) {
        let index = index.min(self.page_count() - 1);
        let start = (index * PAGE_SIZE).min(self.entries.len());
        let end = (start + PAGE_SIZE).min(self.entries.len());
        (index, &self.entries[start..end])
    }
}

/// Computes every known user's stats. One failed user fails the whole board.
pub async fn build_leaderboard(pool: &SqlitePool) -> Result<Leaderboard, BotError> {
    let users = queries::list_users(pool).await?;

    let mut entries = Vec::with_capacity(users.len());
    for user in users {
        let stats = compute_player_stats(pool, &user.username).await?;
        entries.push(LeaderboardEntry {
            username: user.username,
            matches_played: stats.matches_played,
            points_scored: stats.points_scored,
            points_scored_against: stats.points_scored_against,
        });
    }

    Ok(Leaderboard::from_entries(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Match, Team, Tournament};
    use crate::database::test_pool;

    fn entry(name: &str, matches: i64) -> LeaderboardEntry {
        LeaderboardEntry {
            username: name.to_string(),
            matches_played: matches,
            points_scored: 0,
            points_scored_against: 0,
        }
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let board = Leaderboard::from_entries(vec![
            entry("a", 1),
            entry("b", 3),
            entry("c", 1),
            entry("d", 3),
            entry("e", 0),
        ]);
        let names: Vec<_> = board.entries().iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["b", "d", "a", "c", "e"]);
        assert!(
            board
                .entries()
                .windows(2)
                .all(|w| w[0].matches_played >= w[1].matches_played)
        );
    }

    #[test]
    fn pages_hold_ten_entries() {
        let board = Leaderboard::from_entries((0..23).map(|i| entry(&format!("p{i}"), 0)).collect());

        assert_eq!(board.page_count(), 3);
        assert_eq!(board.page(0).1.len(), 10);
        assert_eq!(board.page(2).1.len(), 3);
        assert_eq!(board.page(2).1[0].username, "p20");

        let (index, last) = board.page(9);
        assert_eq!(index, 2);
        assert_eq!(last.len(), 3);
    }

    #[test]
    fn empty_board_has_one_empty_page() {
        let board = Leaderboard::default();
        assert_eq!(board.page_count(), 1);
        assert!(board.page(0).1.is_empty());
    }

    #[tokio::test]
    async fn builds_from_store() {
        let pool = test_pool().await;
        queries::upsert_user(&pool, 1, "Alice").await.unwrap();
        queries::upsert_user(&pool, 2, "Bob").await.unwrap();
        queries::upsert_user(&pool, 3, "Carol").await.unwrap();
        queries::add_tournament(
            &pool,
            &Tournament {
                tournament_id: 1,
                tournament_name: "NUOT 1".into(),
                format: None,
                winning_team_id: None,
            },
        )
        .await
        .unwrap();
        for (team_id, member) in [(10, 1), (11, 2)] {
            queries::add_team(
                &pool,
                &Team {
                    team_id,
                    tournament_id: 1,
                    team_name: format!("Team {team_id}"),
                    placement: None,
                },
            )
            .await
            .unwrap();
            queries::add_team_member(&pool, team_id, member).await.unwrap();
        }
        queries::add_match(
            &pool,
            &Match {
                match_id: 1,
                tournament_id: 1,
                team1_id: 11,
                team2_id: 10,
                team1_score: 4,
                team2_score: 2,
                match_url: None,
            },
        )
        .await
        .unwrap();

        let board = build_leaderboard(&pool).await.unwrap();
        let names: Vec<_> = board.entries().iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["Alice", "Bob", "Carol"]);
        assert_eq!(board.entries()[1].points_scored, 4);
        assert_eq!(board.entries()[2].matches_played, 0);
    }

    #[tokio::test]
    async fn store_failure_fails_the_board() {
        let pool = test_pool().await;
        queries::upsert_user(&pool, 1, "Alice").await.unwrap();
        pool.close().await;

        assert!(matches!(
            build_leaderboard(&pool).await,
            Err(BotError::Persistence(_))
        ));
    }
}
