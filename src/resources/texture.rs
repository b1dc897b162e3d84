use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};

use crate::backend::{TextureImage, WrapMode};

/// Decodes an encoded image (PNG, JPEG, ...) into upload-ready pixels.
pub fn decode_image(bytes: &[u8], file_name: &str) -> anyhow::Result<TextureImage> {
    let img = image::load_from_memory(bytes)
        .with_context(|| format!("failed to decode image {}", file_name))?;
    Ok(to_texture_image(img.to_rgba8()))
}

/// Power-of-two images get a full mip chain and repeat wrapping. Anything
/// else gets a single level and clamps to the edge.
pub fn to_texture_image(img: RgbaImage) -> TextureImage {
    let (width, height) = img.dimensions();
    if !(width.is_power_of_two() && height.is_power_of_two()) {
        return TextureImage {
            width,
            height,
            levels: vec![img.into_raw()],
            wrap: WrapMode::ClampToEdge,
        };
    }

    let mut levels = Vec::new();
    let mut level = img;
    loop {
        let (w, h) = level.dimensions();
        let next = (w > 1 || h > 1)
            .then(|| image::imageops::resize(&level, (w / 2).max(1), (h / 2).max(1), FilterType::Triangle));
        levels.push(level.into_raw());
        match next {
            Some(next) => level = next,
            None => break,
        }
    }
    TextureImage {
        width,
        height,
        levels,
        wrap: WrapMode::Repeat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_of_two_images_get_mipmaps() {
        let image = to_texture_image(RgbaImage::new(8, 2));
        assert_eq!(image.wrap, WrapMode::Repeat);
        let sizes: Vec<usize> = image.levels.iter().map(Vec::len).collect();
        // 8x2, 4x1, 2x1, 1x1
        assert_eq!(sizes, vec![64, 16, 8, 4]);
    }

    #[test]
    fn other_images_clamp_without_mipmaps() {
        let image = to_texture_image(RgbaImage::new(6, 4));
        assert_eq!(image.wrap, WrapMode::ClampToEdge);
        assert_eq!(image.levels.len(), 1);
        assert!(!image.has_mipmaps());
    }

    #[test]
    fn rows_stay_top_first() {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        let image = to_texture_image(img);
        assert_eq!(&image.levels[0][..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn decode_reports_the_file_name() {
        let err = decode_image(b"definitely not a png", "grass.png").unwrap_err();
        assert!(err.to_string().contains("grass.png"));
    }
}
