use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/config.json";
const DEFAULT_DATABASE_URL: &str = "sqlite:database/database.db";
const DEFAULT_ASSETS_DIR: &str = "img";

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub osu_client_id: String,
    pub osu_client_secret: String,
    pub database_url: String,
    pub assets_dir: PathBuf,
    pub tournament_logos: HashMap<i64, String>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(rename = "DISCORD")]
    discord: DiscordSection,
    #[serde(rename = "OSU")]
    osu: OsuSection,
    #[serde(rename = "DATABASE_URL")]
    database_url: Option<String>,
    #[serde(rename = "ASSETS_DIR")]
    assets_dir: Option<PathBuf>,
    #[serde(rename = "TOURNAMENT_LOGOS")]
    tournament_logos: Option<HashMap<i64, String>>,
}

#[derive(Debug, Deserialize)]
struct DiscordSection {
    #[serde(rename = "BOT_TOKEN", default)]
    bot_token: String,
}

#[derive(Debug, Deserialize)]
struct OsuSection {
    #[serde(rename = "CLIENT_ID", default)]
    client_id: String,
    #[serde(rename = "CLIENT_SECRET", default)]
    client_secret: String,
}

impl Config {
    /// Resolves the config path from argv, then `CONFIG_PATH`, then the default.
    pub fn path_from_env() -> PathBuf {
        env::args()
            .nth(1)
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
            .into()
    }

    pub fn load(path: &Path) -> Result<Self> {
        dotenv::dotenv().ok();

        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config = Self::from_json(&raw)?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_json(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(raw).context("config file is not valid JSON")?;

        Ok(Config {
            discord_token: file.discord.bot_token,
            osu_client_id: file.osu.client_id,
            osu_client_secret: file.osu.client_secret,
            database_url: file
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            assets_dir: file
                .assets_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR)),
            tournament_logos: file
                .tournament_logos
                .unwrap_or_else(crate::banner::assets::default_logo_table),
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = env::var("DISCORD_TOKEN") {
            self.discord_token = token;
        }
        if let Ok(id) = env::var("OSU_CLIENT_ID") {
            self.osu_client_id = id;
        }
        if let Ok(secret) = env::var("OSU_CLIENT_SECRET") {
            self.osu_client_secret = secret;
        }
        if let Ok(url) = env::var("DATABASE_URL") {
            self.database_url = url;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.discord_token.trim().is_empty() {
            anyhow::bail!("DISCORD.BOT_TOKEN is required");
        }
        if self.osu_client_id.trim().is_empty() || self.osu_client_secret.trim().is_empty() {
            anyhow::bail!("OSU.CLIENT_ID and OSU.CLIENT_SECRET are required");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_gets_defaults() {
        let raw = r#"{
            "DISCORD": { "BOT_TOKEN": "abc" },
            "OSU": { "CLIENT_ID": "1", "CLIENT_SECRET": "s" }
        }"#;
        let config = Config::from_json(raw).unwrap();

        assert_eq!(config.discord_token, "abc");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.assets_dir, PathBuf::from("img"));
        assert_eq!(config.tournament_logos.get(&1).map(String::as_str), Some("NUOT1.jpg"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn logo_table_can_be_overridden() {
        let raw = r#"{
            "DISCORD": { "BOT_TOKEN": "abc" },
            "OSU": { "CLIENT_ID": "1", "CLIENT_SECRET": "s" },
            "ASSETS_DIR": "assets/logos",
            "TOURNAMENT_LOGOS": { "42": "custom.png" }
        }"#;
        let config = Config::from_json(raw).unwrap();

        assert_eq!(config.assets_dir, PathBuf::from("assets/logos"));
        assert_eq!(config.tournament_logos.len(), 1);
        assert_eq!(config.tournament_logos[&42], "custom.png");
    }

    #[test]
    fn missing_token_is_rejected() {
        let raw = r#"{ "DISCORD": {}, "OSU": { "CLIENT_ID": "1", "CLIENT_SECRET": "s" } }"#;
        let config = Config::from_json(raw).unwrap();

        assert!(config.validate().is_err());
    }
}
