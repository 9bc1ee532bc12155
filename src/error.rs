use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("no osu! user named {0}")]
    IdentityNotFound(String),

    #[error("database error")]
    Persistence(#[from] sqlx::Error),

    #[error("osu! API request failed")]
    RankingApi(#[from] reqwest::Error),

    #[error("osu! API authentication failed: {0}")]
    RankingAuth(String),

    #[error("no banner image for tournament {0}")]
    ImageAssetMissing(i64),

    #[error("image error")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Short reply shown to the user who issued the command.
    pub fn user_message(&self) -> String {
        match self {
            BotError::IdentityNotFound(_) => "Username does not exist on osu! servers".to_string(),
            BotError::Persistence(_) => {
                "Something went wrong while reading the database. Please try again.".to_string()
            }
            BotError::RankingApi(_) | BotError::RankingAuth(_) => {
                "Could not reach the osu! servers. Please try again later.".to_string()
            }
            BotError::ImageAssetMissing(_) | BotError::Image(_) | BotError::Io(_) => {
                "Something went wrong while building the banner.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_not_found_says_does_not_exist() {
        let err = BotError::IdentityNotFound("nobody".into());
        assert!(err.user_message().contains("does not exist"));
    }

    #[test]
    fn persistence_errors_stay_generic() {
        let err = BotError::Persistence(sqlx::Error::RowNotFound);
        let msg = err.user_message();
        assert!(!msg.contains("RowNotFound"));
        assert!(msg.contains("try again"));
    }
}
