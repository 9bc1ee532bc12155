use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::borrow::Cow;

pub const ROW_CAPACITY: usize = 5;
pub const GAP: u32 = 10;

/// Lays the images out left to right, five per row, `GAP` pixels apart.
///
/// Every image is scaled to the tallest height of the whole set, not per row.
/// The canvas is as wide as the first row; later rows that come out wider are
/// clipped at the right edge. No input yields a 0x0 canvas.
pub fn compose_banner(images: &[RgbaImage]) -> RgbaImage {
    let images: Vec<&RgbaImage> = images
        .iter()
        .filter(|img| img.width() > 0 && img.height() > 0)
        .collect();

    let Some(max_height) = images.iter().map(|img| img.height()).max() else {
        return RgbaImage::new(0, 0);
    };

    let scaled: Vec<Cow<'_, RgbaImage>> = images
        .iter()
        .map(|img| scale_to_height(img, max_height))
        .collect();

    let rows = scaled.len().div_ceil(ROW_CAPACITY) as u32;
    let first_row = &scaled[..scaled.len().min(ROW_CAPACITY)];
    let width = first_row.iter().map(|img| img.width()).sum::<u32>()
        + GAP * (first_row.len() as u32 - 1);
    let height = rows * max_height + (rows - 1) * GAP;

    let mut canvas = RgbaImage::new(width, height);

    for (row, chunk) in scaled.chunks(ROW_CAPACITY).enumerate() {
        let y = row as u32 * (max_height + GAP);
        let mut x = 0;
        for img in chunk {
            draw_over(&mut canvas, img, x, y);
            x += img.width() + GAP;
        }
    }

    canvas
}

fn scale_to_height(img: &RgbaImage, height: u32) -> Cow<'_, RgbaImage> {
    if img.height() == height {
        return Cow::Borrowed(img);
    }
    let width = (img.width() as f64 * height as f64 / img.height() as f64).round() as u32;
    Cow::Owned(imageops::resize(img, width.max(1), height, FilterType::Triangle))
}

/// Source-over blit, clipped to the canvas.
fn draw_over(canvas: &mut RgbaImage, src: &RgbaImage, x: u32, y: u32) {
    for (sx, sy, pixel) in src.enumerate_pixels() {
        let (cx, cy) = (x + sx, y + sy);
        if cx >= canvas.width() || cy >= canvas.height() {
            continue;
        }
        let alpha = pixel.0[3];
        if alpha == 0 {
            continue;
        }
        let dst = canvas.get_pixel_mut(cx, cy);
        if alpha == u8::MAX || dst.0[3] == 0 {
            *dst = *pixel;
        } else {
            *dst = blend_over(*dst, *pixel);
        }
    }
}

/// Integer source-over of `src` onto `dst`, rounded to nearest.
fn blend_over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u32::from(src.0[3]);
    let da = u32::from(dst.0[3]);
    let inv = 255 - sa;

    // Output alpha scaled by 255.
    let out = sa * 255 + da * inv;
    if out == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = u32::from(src.0[i]) * sa * 255 + u32::from(dst.0[i]) * da * inv;
        ((c + out / 2) / out) as u8
    };
    Rgba([channel(0), channel(1), channel(2), ((out + 127) / 255) as u8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, shade: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([shade, 255 - shade, 40, 255]))
    }

    #[test]
    fn empty_input_gives_empty_canvas() {
        let banner = compose_banner(&[]);
        assert_eq!(banner.dimensions(), (0, 0));
    }

    #[test]
    fn single_image_is_returned_unchanged() {
        let mut img = solid(40, 20, 10);
        img.put_pixel(3, 7, Rgba([1, 2, 3, 255]));

        let banner = compose_banner(std::slice::from_ref(&img));
        assert_eq!(banner, img);
    }

    #[test]
    fn short_row_has_no_trailing_slots() {
        let banner = compose_banner(&[solid(30, 20, 1), solid(50, 20, 2), solid(20, 20, 3)]);
        assert_eq!(banner.dimensions(), (30 + 50 + 20 + 2 * GAP, 20));
        assert_eq!(banner.get_pixel(30, 0).0[3], 0);
        assert_eq!(*banner.get_pixel(40, 0), Rgba([2, 253, 40, 255]));
    }

    #[test]
    fn twelve_images_wrap_into_three_rows() {
        let images: Vec<_> = (0..12)
            .map(|i| solid(20, if i == 7 { 30 } else { 15 }, i as u8))
            .collect();

        let banner = compose_banner(&images);

        // Everything scales to height 30; 15px tall images double in width.
        let first_row_width = 5 * 40 + 4 * GAP;
        assert_eq!(banner.width(), first_row_width);
        assert_eq!(banner.height(), 3 * 30 + 2 * GAP);
    }

    #[test]
    fn second_row_starts_below_the_gap() {
        let images: Vec<_> = (0..6).map(|i| solid(10, 10, i * 20)).collect();

        let banner = compose_banner(&images);

        assert_eq!(banner.dimensions(), (5 * 10 + 4 * GAP, 2 * 10 + GAP));
        assert_eq!(banner.get_pixel(0, 10 + GAP / 2).0[3], 0);
        assert_eq!(*banner.get_pixel(0, 10 + GAP), *images[5].get_pixel(0, 0));
        assert_eq!(banner.get_pixel(10, 10 + GAP).0[3], 0);
    }

    #[test]
    fn shorter_images_keep_aspect_ratio() {
        let banner = compose_banner(&[solid(10, 5, 0), solid(10, 10, 0)]);
        assert_eq!(banner.dimensions(), (20 + GAP + 10, 10));
    }

    #[test]
    fn translucent_pixels_blend_over_each_other() {
        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255]));
        let src = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));

        draw_over(&mut canvas, &src, 0, 0);

        assert_eq!(*canvas.get_pixel(0, 0), Rgba([128, 0, 127, 255]));
    }

    #[test]
    fn translucent_over_opaque_stays_opaque() {
        for alpha in [1, 128, 200, 254] {
            let out = blend_over(Rgba([0, 0, 255, 255]), Rgba([255, 0, 0, alpha]));
            assert_eq!(out.0[3], 255, "source alpha {alpha}");
        }
    }

    #[test]
    fn two_translucent_layers_combine() {
        let out = blend_over(Rgba([0, 0, 255, 128]), Rgba([255, 0, 0, 128]));
        assert_eq!(out, Rgba([170, 0, 85, 192]));
    }
}
