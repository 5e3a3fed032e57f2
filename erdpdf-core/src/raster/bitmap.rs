use crate::error::{PdfError, Result};
use image::RgbImage;
use std::path::Path;

/// An immutable RGB raster with a fixed pixel size.
///
/// Produced by [`super::Canvas::finish`]; never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Bitmap {
    pixels: RgbImage,
}

impl Bitmap {
    /// Wraps an RGB buffer. Zero-sized buffers are rejected.
    pub fn from_rgb_image(pixels: RgbImage) -> Result<Self> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(PdfError::InvalidDimension(format!(
                "bitmap must have a non-zero size, got {}x{}",
                pixels.width(),
                pixels.height()
            )));
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Raw samples, three bytes per pixel, row-major from the top row.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    /// 8-bit RGB channels of one pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Writes the bitmap as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.pixels
            .save_with_format(path, image::ImageFormat::Png)
            .map_err(|e| PdfError::InvalidImage(format!("failed to write {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "saved diagram PNG");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_zero_size_rejected() {
        let result = Bitmap::from_rgb_image(RgbImage::new(0, 10));
        assert!(matches!(result, Err(PdfError::InvalidDimension(_))));
    }

    #[test]
    fn test_accessors() {
        let mut pixels = RgbImage::from_pixel(3, 2, Rgb([255, 255, 255]));
        pixels.put_pixel(2, 1, Rgb([0x3b, 0x82, 0xf6]));
        let bitmap = Bitmap::from_rgb_image(pixels).unwrap();

        assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
        assert_eq!(bitmap.as_raw().len(), 18);
        assert_eq!(bitmap.pixel(2, 1), Some([0x3b, 0x82, 0xf6]));
        assert_eq!(bitmap.pixel(3, 0), None);
    }

    #[test]
    fn test_save_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diagram.png");
        let bitmap = Bitmap::from_rgb_image(RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))).unwrap();

        bitmap.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }
}
