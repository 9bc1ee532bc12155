use crate::error::BotError;
use crate::osu::{OsuProfile, RankingApi};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};

const TOKEN_URL: &str = "https://osu.ppy.sh/oauth/token";
const USERS_URL: &str = "https://osu.ppy.sh/api/v2/users/";
/// Refresh this long before the token actually expires.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    grant_type: &'static str,
    scope: &'static str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// osu! API v2 client authenticated with the client-credentials grant.
pub struct OsuClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    users_url: Url,
    token: Mutex<Option<CachedToken>>,
}

enum LookupKey<'a> {
    Username(&'a str),
    Id(i64),
}

impl OsuClient {
    pub fn new(client_id: &str, client_secret: &str) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("nuot-bot/", env!("CARGO_PKG_VERSION")))
                .build()?,
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
            users_url: Url::parse(USERS_URL)?,
            token: Mutex::new(None),
        })
    }

    async fn access_token(&self) -> Result<String, BotError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref().filter(|t| t.expires_at > Instant::now()) {
            return Ok(token.access_token.clone());
        }

        let response = self
            .http
            .post(TOKEN_URL)
            .json(&TokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
                grant_type: "client_credentials",
                scope: "public",
            })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(BotError::RankingAuth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }
        let token: TokenResponse = response.json().await?;
        info!("Obtained osu! API token, valid for {}s", token.expires_in);

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    fn user_url(&self, key: &LookupKey<'_>) -> Url {
        let mut url = self.users_url.clone();
        let (segment, kind) = match key {
            LookupKey::Username(name) => (name.to_string(), "username"),
            LookupKey::Id(id) => (id.to_string(), "id"),
        };
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&segment);
        }
        url.query_pairs_mut().append_pair("key", kind);
        url
    }

    async fn lookup(&self, key: LookupKey<'_>, display: String) -> Result<OsuProfile, BotError> {
        let token = self.access_token().await?;
        let url = self.user_url(&key);
        debug!("GET {}", url);

        let response = self.http.get(url).bearer_auth(token).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Err(BotError::IdentityNotFound(display)),
            StatusCode::UNAUTHORIZED => {
                self.token.lock().await.take();
                return Err(BotError::RankingAuth("access token rejected".into()));
            }
            _ => {}
        }

        let profile: OsuProfile = response.error_for_status()?.json().await?;
        if profile.user_id == 0 {
            return Err(BotError::IdentityNotFound(display));
        }
        Ok(profile)
    }
}

#[async_trait]
impl RankingApi for OsuClient {
    async fn resolve(&self, display_name: &str) -> Result<OsuProfile, BotError> {
        self.lookup(LookupKey::Username(display_name), display_name.to_string())
            .await
    }

    async fn resolve_id(&self, user_id: i64) -> Result<OsuProfile, BotError> {
        self.lookup(LookupKey::Id(user_id), user_id.to_string()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_urls_are_escaped() {
        let client = OsuClient::new("1", "secret").unwrap();

        let by_name = client.user_url(&LookupKey::Username("Some Player/2"));
        assert_eq!(
            by_name.as_str(),
            "https://osu.ppy.sh/api/v2/users/Some%20Player%2F2?key=username"
        );

        let by_id = client.user_url(&LookupKey::Id(2));
        assert_eq!(by_id.as_str(), "https://osu.ppy.sh/api/v2/users/2?key=id");
    }

    #[test]
    fn profile_parses_from_api_payload() {
        let payload = r#"{
            "avatar_url": "https://a.ppy.sh/2?1.png",
            "country_code": "AU",
            "id": 2,
            "is_online": false,
            "username": "peppy"
        }"#;
        let profile: OsuProfile = serde_json::from_str(payload).unwrap();

        assert_eq!(profile.user_id, 2);
        assert_eq!(profile.username, "peppy");
        assert_eq!(profile.avatar_url.as_deref(), Some("https://a.ppy.sh/2?1.png"));
    }
}
