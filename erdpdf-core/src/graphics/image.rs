//! Raster image XObjects
//!
//! Images are embedded as uncompressed-sample XObjects (8 bits per
//! component) and Flate-compressed when the `compression` feature is on.

use crate::objects::{Dictionary, Object, Stream};
use crate::raster::Bitmap;
use crate::{PdfError, Result};

/// Represents an image that can be embedded in a PDF
#[derive(Debug, Clone)]
pub struct Image {
    /// Raw samples, row-major, top row first
    data: Vec<u8>,
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Color space
    color_space: ColorSpace,
}

/// Color spaces for images
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorSpace {
    /// Grayscale
    DeviceGray,
    /// RGB color
    DeviceRGB,
}

impl ColorSpace {
    fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRGB => 3,
        }
    }

    fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::DeviceRGB => "DeviceRGB",
        }
    }
}

impl Image {
    /// Creates an image from raw 8-bit samples.
    pub fn from_raw(width: u32, height: u32, color_space: ColorSpace, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PdfError::InvalidImage(format!(
                "image must have non-zero size, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * color_space.components();
        if data.len() != expected {
            return Err(PdfError::InvalidImage(format!(
                "expected {expected} bytes of samples for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Image {
            data,
            width,
            height,
            color_space,
        })
    }

    /// Creates an RGB image from a rendered bitmap.
    pub fn from_bitmap(bitmap: &Bitmap) -> Result<Self> {
        Self::from_raw(
            bitmap.width(),
            bitmap.height(),
            ColorSpace::DeviceRGB,
            bitmap.as_raw().to_vec(),
        )
    }

    /// Get image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Convert to PDF XObject
    pub fn to_pdf_object(&self) -> Result<Object> {
        let mut dict = Dictionary::typed("XObject");
        dict.set("Subtype", Object::name("Image"));
        dict.set("Width", self.width);
        dict.set("Height", self.height);
        dict.set("ColorSpace", Object::name(self.color_space.pdf_name()));
        dict.set("BitsPerComponent", 8);

        let mut stream = Stream::with_dictionary(dict, self.data.clone());
        stream.compress_flate()?;
        Ok(stream.into_object())
    }
}
