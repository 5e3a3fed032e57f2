//! Raster drawing surface.
//!
//! [`Canvas`] is an `embedded-graphics` draw target backed by an RGB pixel
//! buffer. Once drawing is done it is frozen into a [`Bitmap`], which the
//! PDF side consumes as an image XObject.

mod bitmap;
mod canvas;

pub use bitmap::Bitmap;
pub use canvas::Canvas;

use crate::graphics::Color;
use embedded_graphics::pixelcolor::Rgb888;

impl From<Color> for Rgb888 {
    fn from(color: Color) -> Self {
        let [r, g, b] = color.to_rgb8();
        Rgb888::new(r, g, b)
    }
}
