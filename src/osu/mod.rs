pub mod client;
pub mod identity;

use crate::error::BotError;
use async_trait::async_trait;
use serde::Deserialize;

pub use client::OsuClient;

/// A player as the osu! API reports them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OsuProfile {
    #[serde(rename = "id")]
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[async_trait]
pub trait RankingApi: Send + Sync {
    /// Looks a player up by display name. Unknown names yield `IdentityNotFound`.
    async fn resolve(&self, display_name: &str) -> Result<OsuProfile, BotError>;

    async fn resolve_id(&self, user_id: i64) -> Result<OsuProfile, BotError>;
}

#[cfg(test)]
pub mod fake {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    pub struct FakeRankingApi {
        profiles: Vec<OsuProfile>,
        failing_ids: Vec<i64>,
        pub calls: AtomicUsize,
    }

    impl FakeRankingApi {
        pub fn with(profiles: &[(i64, &str)]) -> Self {
            Self {
                profiles: profiles
                    .iter()
                    .map(|(id, name)| OsuProfile {
                        user_id: *id,
                        username: name.to_string(),
                        avatar_url: Some(format!("https://a.ppy.sh/{id}")),
                    })
                    .collect(),
                ..Default::default()
            }
        }

        pub fn failing(mut self, user_id: i64) -> Self {
            self.failing_ids.push(user_id);
            self
        }

        fn by_name(&self) -> HashMap<String, &OsuProfile> {
            self.profiles
                .iter()
                .map(|p| (p.username.to_lowercase(), p))
                .collect()
        }
    }

    #[async_trait]
    impl RankingApi for FakeRankingApi {
        async fn resolve(&self, display_name: &str) -> Result<OsuProfile, BotError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.by_name()
                .get(&display_name.to_lowercase())
                .map(|p| (*p).clone())
                .ok_or_else(|| BotError::IdentityNotFound(display_name.to_string()))
        }

        async fn resolve_id(&self, user_id: i64) -> Result<OsuProfile, BotError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing_ids.contains(&user_id) {
                return Err(BotError::RankingAuth("token rejected".into()));
            }
            self.profiles
                .iter()
                .find(|p| p.user_id == user_id)
                .cloned()
                .ok_or_else(|| BotError::IdentityNotFound(user_id.to_string()))
        }
    }
}
