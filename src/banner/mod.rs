pub mod assets;
pub mod compositor;

use crate::error::BotError;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;

pub use assets::AssetCatalog;
pub use compositor::compose_banner;

/// File name the banner is attached under.
pub const BANNER_FILENAME: &str = "banner.png";

pub fn encode_png(banner: &RgbaImage) -> Result<Vec<u8>, BotError> {
    let mut bytes = Vec::new();
    banner.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

/// Loads the logos for `tournament_ids` and renders them as one PNG.
/// Returns `None` when no logo could be loaded.
pub fn render_banner(
    catalog: &AssetCatalog,
    tournament_ids: &[i64],
) -> Result<Option<Vec<u8>>, BotError> {
    let logos = catalog.load_logos(tournament_ids);
    if logos.is_empty() {
        return Ok(None);
    }
    let banner = compose_banner(&logos);
    encode_png(&banner).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn encoded_banner_decodes_to_same_size() {
        let banner = compose_banner(&[
            RgbaImage::from_pixel(12, 6, Rgba([200, 10, 10, 255])),
            RgbaImage::from_pixel(6, 6, Rgba([10, 200, 10, 255])),
        ]);

        let bytes = encode_png(&banner).unwrap();
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png).unwrap();

        assert_eq!((decoded.width(), decoded.height()), (12 + 10 + 6, 6));
    }

    #[test]
    fn no_logos_means_no_banner() {
        let catalog = AssetCatalog::new("does-not-exist", Default::default());
        assert!(render_banner(&catalog, &[1, 2, 3]).unwrap().is_none());
    }
}
