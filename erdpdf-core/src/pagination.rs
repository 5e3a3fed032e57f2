//! Spreading one tall image over consecutive fixed-size pages.
//!
//! The image is drawn whole on every page. Each page shifts it up by one
//! page step, so page `k` shows the band starting `k` steps down the image
//! and the page boundary clips the rest. All lengths are millimetres.

use crate::document::Document;
use crate::error::{PdfError, Result};
use crate::graphics::Image;
use crate::page::Page;
use crate::raster::Bitmap;
use crate::units::{mm_to_pt, Orientation, PageFormat};
use serde::Serialize;

/// Upper bound on pages a single image may span.
pub const MAX_PAGES: usize = 10_000;

/// Where the image's top edge sits on one page, measured from the page's
/// top edge. Positive offsets push the image down, negative ones pull it up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Zero-based page index
    pub page_index: usize,
    pub offset: f64,
    /// `min(page_height, img_height - page_index * page_height)`: the share
    /// of the image counted against this page by the stop rule. The first
    /// page's top margin is not subtracted, so with a positive margin the
    /// first page shows `top_margin` less than this and the band hidden
    /// below its bottom edge is not repeated on the next page.
    pub slice_height: f64,
}

/// Computes the placement sequence for an image `img_height` tall.
///
/// The first placement sits at `top_margin`; every later one is a new page
/// with the offset reduced by `page_height`. Planning stops once
/// `img_height - emitted * page_height <= 0`.
///
/// ```rust
/// use erdpdf::pagination::plan_pages;
///
/// let offsets: Vec<f64> = plan_pages(500.0, 297.0, 5.0)?
///     .iter()
///     .map(|p| p.offset)
///     .collect();
/// assert_eq!(offsets, vec![5.0, -292.0]);
/// # Ok::<(), erdpdf::PdfError>(())
/// ```
///
/// # Errors
///
/// `InvalidDimension` if either height is non-positive or not finite, if
/// the margin is not finite, or if the image would need more than
/// [`MAX_PAGES`] pages.
pub fn plan_pages(img_height: f64, page_height: f64, top_margin: f64) -> Result<Vec<Placement>> {
    require_positive("page height", page_height)?;
    require_positive("image height", img_height)?;
    if !top_margin.is_finite() {
        return Err(PdfError::InvalidDimension(format!(
            "top margin must be finite, got {top_margin}"
        )));
    }
    let pages_needed = (img_height / page_height).ceil();
    if pages_needed > MAX_PAGES as f64 {
        return Err(PdfError::InvalidDimension(format!(
            "image of height {img_height} needs {pages_needed} pages of height {page_height}, limit is {MAX_PAGES}"
        )));
    }

    let mut placements = Vec::new();
    let mut offset = top_margin;
    loop {
        let emitted = placements.len();
        let remaining = img_height - emitted as f64 * page_height;
        placements.push(Placement {
            page_index: emitted,
            offset,
            slice_height: remaining.min(page_height),
        });
        if img_height - (emitted + 1) as f64 * page_height <= 0.0 {
            break;
        }
        offset -= page_height;
    }

    tracing::debug!(
        img_height,
        page_height,
        top_margin,
        pages = placements.len(),
        "planned image pages"
    );
    Ok(placements)
}

fn require_positive(what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PdfError::InvalidDimension(format!(
            "{what} must be positive and finite, got {value}"
        )))
    }
}

/// Appends a bitmap to a document as a run of image pages.
///
/// # Example
///
/// ```rust
/// use erdpdf::pagination::ImagePaginator;
/// use erdpdf::raster::Canvas;
/// use erdpdf::{Color, Document};
///
/// // 100 x 300 px drawn 200 mm wide is 600 mm tall: three A4 pages
/// let bitmap = Canvas::new(100, 300, Color::white())?.finish()?;
/// let mut doc = Document::new();
/// let placements = ImagePaginator::new().append_to(&mut doc, &bitmap)?;
///
/// assert_eq!(placements.len(), 3);
/// assert_eq!(doc.page_count(), 3);
/// # Ok::<(), erdpdf::PdfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ImagePaginator {
    image_name: String,
    format: PageFormat,
    orientation: Orientation,
    x: f64,
    width: f64,
    top_margin: f64,
    page_step: Option<f64>,
}

impl Default for ImagePaginator {
    fn default() -> Self {
        Self {
            image_name: "Diagram".to_string(),
            format: PageFormat::A4,
            orientation: Orientation::Portrait,
            x: 5.0,
            width: 200.0,
            top_margin: 5.0,
            page_step: None,
        }
    }
}

impl ImagePaginator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource name the image is registered under.
    pub fn with_image_name(mut self, name: impl Into<String>) -> Self {
        self.image_name = name.into();
        self
    }

    pub fn with_format(mut self, format: PageFormat, orientation: Orientation) -> Self {
        self.format = format;
        self.orientation = orientation;
        self
    }

    /// Left edge of the image, in mm.
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Drawn width of the image, in mm. Height follows the bitmap's aspect
    /// ratio.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_top_margin(mut self, top_margin: f64) -> Self {
        self.top_margin = top_margin;
        self
    }

    /// Vertical shift between consecutive pages, in mm. Defaults to the full
    /// page height.
    pub fn with_page_step(mut self, page_step: f64) -> Self {
        self.page_step = Some(page_step);
        self
    }

    /// Drawn height in mm of a bitmap scaled to the configured width.
    pub fn scaled_height(&self, bitmap: &Bitmap) -> Result<f64> {
        require_positive("image width", self.width)?;
        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(PdfError::InvalidDimension(format!(
                "bitmap must have a non-zero size, got {}x{}",
                bitmap.width(),
                bitmap.height()
            )));
        }
        let scale = self.width / bitmap.width() as f64;
        Ok(bitmap.height() as f64 * scale)
    }

    /// The placement plan for `bitmap` without touching any document.
    pub fn plan(&self, bitmap: &Bitmap) -> Result<Vec<Placement>> {
        let img_height = self.scaled_height(bitmap)?;
        let (_, page_height) = self.format.size_mm(self.orientation);
        plan_pages(
            img_height,
            self.page_step.unwrap_or(page_height),
            self.top_margin,
        )
    }

    /// Registers the bitmap once on `document` and appends one page per
    /// placement. Returned placements carry document page indices.
    ///
    /// Nothing is added to the document if planning fails.
    pub fn append_to(&self, document: &mut Document, bitmap: &Bitmap) -> Result<Vec<Placement>> {
        if !self.x.is_finite() {
            return Err(PdfError::InvalidDimension(format!(
                "image x must be finite, got {}",
                self.x
            )));
        }
        let img_height = self.scaled_height(bitmap)?;
        let plan = self.plan(bitmap)?;

        document.add_image(self.image_name.clone(), Image::from_bitmap(bitmap)?)?;

        let first_page = document.page_count();
        let mut placed = Vec::with_capacity(plan.len());
        for placement in plan {
            let mut page = Page::from_format(self.format, self.orientation);
            let top = page.y_from_top_mm(placement.offset);
            page.draw_image(
                &self.image_name,
                mm_to_pt(self.x),
                top - mm_to_pt(img_height),
                mm_to_pt(self.width),
                mm_to_pt(img_height),
            )?;
            document.add_page(page);
            placed.push(Placement {
                page_index: first_page + placement.page_index,
                ..placement
            });
        }

        tracing::debug!(
            image = %self.image_name,
            first_page,
            pages = placed.len(),
            "appended image pages"
        );
        Ok(placed)
    }
}
