use super::Bitmap;
use crate::error::{PdfError, Result};
use crate::graphics::Color;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use image::{Rgb, RgbImage};

/// Mutable RGB drawing surface.
///
/// Implements [`DrawTarget`] so any `embedded-graphics` primitive or text
/// can be drawn onto it. Pixels outside the surface are dropped.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbImage,
}

impl Canvas {
    /// Allocates a `width` x `height` surface filled with `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PdfError::InvalidDimension(format!(
                "canvas must have a non-zero size, got {width}x{height}"
            )));
        }
        Ok(Self {
            pixels: RgbImage::from_pixel(width, height, Rgb(background.to_rgb8())),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// 8-bit RGB channels of one pixel, `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Freezes the surface into an immutable bitmap.
    pub fn finish(self) -> Result<Bitmap> {
        Bitmap::from_rgb_image(self.pixels)
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }
}

impl DrawTarget for Canvas {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> core::result::Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.pixels.dimensions();
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (u32::try_from(point.x), u32::try_from(point.y)) else {
                continue;
            };
            if x < width && y < height {
                self.pixels
                    .put_pixel(x, y, Rgb([color.r(), color.g(), color.b()]));
            }
        }
        Ok(())
    }
}
