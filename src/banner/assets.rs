use crate::error::BotError;
use image::RgbaImage;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Logo file names shipped for each NUOT tournament id.
pub fn default_logo_table() -> HashMap<i64, String> {
    [
        (1, "NUOT1.jpg"),
        (2, "NUOT2.jpg"),
        (3, "NUOT3B1.jpg"),
        (4, "NUOT3B2.jpg"),
        (5, "NUOT3B3.jpg"),
        (6, "NUOT3B4.jpg"),
        (7, "NUOT4.jpg"),
        (8, "NUOT5.jpg"),
        (9, "NUOT6.jpg"),
        (10, "NUOT7.jpg"),
        (12, "NUOT9.jpg"),
        (13, "NUOT91.jpg"),
        (14, "NUOT92.jpg"),
        (16, "NUOT93.jpg"),
        (17, "NUOT94B1.jpg"),
        (18, "NUOT94B2.jpg"),
        (19, "NUOT94B3.jpg"),
        (20, "NUOT95.jpg"),
    ]
    .into_iter()
    .map(|(id, file)| (id, file.to_string()))
    .collect()
}

#[derive(Debug, Clone)]
pub struct AssetCatalog {
    dir: PathBuf,
    logos: HashMap<i64, String>,
}

impl AssetCatalog {
    pub fn new(dir: impl Into<PathBuf>, logos: HashMap<i64, String>) -> Self {
        Self {
            dir: dir.into(),
            logos,
        }
    }

    pub fn load_logo(&self, tournament_id: i64) -> Result<RgbaImage, BotError> {
        let file = self
            .logos
            .get(&tournament_id)
            .ok_or(BotError::ImageAssetMissing(tournament_id))?;
        let path = self.dir.join(file);
        if !path.is_file() {
            return Err(BotError::ImageAssetMissing(tournament_id));
        }

        Ok(image::open(&path)?.to_rgba8())
    }

    /// Loads logos in order. Anything that cannot be loaded is logged and left out.
    pub fn load_logos(&self, tournament_ids: &[i64]) -> Vec<RgbaImage> {
        tournament_ids
            .iter()
            .filter_map(|&id| match self.load_logo(id) {
                Ok(img) => Some(img),
                Err(e) => {
                    warn!(tournament_id = id, "Skipping banner logo: {}", e);
                    None
                }
            })
            .collect()
    }
}
