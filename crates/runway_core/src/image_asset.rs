//! Texture images
//!
//! Images are decoded to RGBA8 and flipped vertically so that texture
//! coordinate (0, 0) addresses the bottom-left corner, the convention used by
//! OBJ files and by the runway layout.

use std::path::Path;

use crate::asset_cache::Asset;
use crate::asset_error::AssetError;

/// A decoded RGBA8 image ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct TextureImage {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 rows, bottom row first
    pub pixels: Vec<u8>,
}

impl TextureImage {
    /// A 1x1 image of a single color
    pub fn solid(color: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: color.to_vec(),
        }
    }

    /// Convert a decoded image, flipping it vertically
    pub fn from_dynamic(image: image::DynamicImage) -> Self {
        let rgba = image.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            width,
            height,
            pixels: rgba.into_raw(),
        }
    }

    /// Bytes per row of pixel data
    pub fn bytes_per_row(&self) -> u32 {
        4 * self.width
    }
}

impl Asset for TextureImage {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        let image = image::open(path)?;
        log::info!(
            "Loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::from_dynamic(image))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid() {
        let img = TextureImage::solid([255, 255, 255, 255]);
        assert_eq!((img.width, img.height), (1, 1));
        assert_eq!(img.pixels, vec![255, 255, 255, 255]);
        assert_eq!(img.bytes_per_row(), 4);
    }

    #[test]
    fn test_from_dynamic_flips_rows() {
        // 1x2 image: top red, bottom blue
        let mut buffer = image::RgbaImage::new(1, 2);
        buffer.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
        buffer.put_pixel(0, 1, image::Rgba([0, 0, 255, 255]));

        let img = TextureImage::from_dynamic(image::DynamicImage::ImageRgba8(buffer));
        assert_eq!(&img.pixels[0..4], &[0, 0, 255, 255]);
        assert_eq!(&img.pixels[4..8], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = TextureImage::load_from_file(Path::new("/no/such/texture.jpg"));
        assert!(result.is_err());
    }
}
