use crate::osu::OsuProfile;
use crate::stats::PlayerReport;
use crate::stats::aggregator::{Opponent, Teammate, TournamentSummary};
use crate::stats::leaderboard::{Leaderboard, LeaderboardEntry, PAGE_SIZE};
use poise::serenity_prelude as serenity;

const STATS_COLOR: u32 = 0x0099ff; // Blue

pub fn format_error_message(error: &str) -> String {
    format!("❌ **Error**: {}", error)
}

pub fn format_win_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

pub fn describe_opponent(opponent: Option<&Opponent>) -> String {
    match opponent {
        Some(o) => format!("{} ({} pts)", o.username, o.points_against),
        None => "No opponents found".to_string(),
    }
}

pub fn describe_teammate(teammate: Option<&Teammate>) -> String {
    match teammate {
        Some(t) if t.shared_teams == 1 => format!("{} (1 team)", t.username),
        Some(t) => format!("{} ({} teams)", t.username, t.shared_teams),
        None => "No teammates found".to_string(),
    }
}

pub fn describe_tournament(tournament: Option<&TournamentSummary>) -> String {
    match tournament {
        Some(t) if t.won => format!("{} 🏆", t.tournament_name),
        Some(TournamentSummary {
            tournament_name,
            placement: Some(place),
            ..
        }) => format!("{} (#{})", tournament_name, place),
        Some(t) => t.tournament_name.clone(),
        None => "No tournaments found".to_string(),
    }
}

/// One line per entry, numbered from `offset + 1`.
pub fn format_leaderboard_lines(entries: &[LeaderboardEntry], offset: usize) -> String {
    if entries.is_empty() {
        return "No players found".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            format!(
                "**{}. {}:** Matches Played: {} | Points: {} - {}",
                offset + i + 1,
                entry.username,
                entry.matches_played,
                entry.points_scored,
                entry.points_scored_against
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn create_stats_embed(
    profile: &OsuProfile,
    report: &PlayerReport,
    banner: Option<&str>,
) -> serenity::CreateEmbed {
    let stats = &report.stats;
    let mut embed = serenity::CreateEmbed::new()
        .title("Player Statistics")
        .description(format!("{}'s Stats", profile.username))
        .field("Matches Played", stats.matches_played.to_string(), true)
        .field("Win Percentage", format_win_percentage(report.win_percentage), true)
        .field("Points Scored", stats.points_scored.to_string(), true)
        .field("Points Against", stats.points_scored_against.to_string(), true)
        .field(
            "Lost Most Against",
            describe_opponent(report.top_opponent.as_ref()),
            true,
        )
        .field(
            "Best Teammate",
            describe_teammate(report.best_teammate.as_ref()),
            true,
        )
        .field(
            "Best Tournament",
            describe_tournament(report.best_tournament.as_ref()),
            true,
        )
        .field(
            "First Tournament",
            describe_tournament(report.first_tournament.as_ref()),
            true,
        )
        .color(STATS_COLOR)
        .timestamp(chrono::Utc::now());

    if let Some(avatar) = &profile.avatar_url {
        embed = embed.thumbnail(avatar);
    }
    if let Some(filename) = banner {
        embed = embed.image(format!("attachment://{}", filename));
    }
    embed
}

pub fn create_leaderboard_embed(board: &Leaderboard, page: usize) -> serenity::CreateEmbed {
    let (page, entries) = board.page(page);
    serenity::CreateEmbed::new()
        .title("Leaderboard")
        .description(format_leaderboard_lines(entries, page * PAGE_SIZE))
        .color(STATS_COLOR)
        .footer(serenity::CreateEmbedFooter::new(format!(
            "Page {}/{}",
            page + 1,
            board.page_count()
        )))
        .timestamp(chrono::Utc::now())
}
