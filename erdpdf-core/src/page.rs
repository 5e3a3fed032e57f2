use crate::error::Result;
use crate::graphics::GraphicsContext;
use crate::text::{TextContext, TextFlowContext};
use crate::units::{mm_to_pt, Orientation, PageFormat};
use std::collections::BTreeSet;

/// A single page in a PDF document.
///
/// Pages have a size in points (1/72 inch) and carry vector graphics, text
/// and references to document-level images. Content is emitted in that
/// order: graphics, then text, then text flows.
///
/// # Example
///
/// ```rust
/// use erdpdf::{Color, Font, Page};
///
/// let mut page = Page::a4();
/// let (width, height) = (page.width(), page.height());
///
/// page.graphics()
///     .set_fill_color(Color::hex("#3b82f6")?)
///     .rect(0.0, 0.0, width, height)
///     .fill();
///
/// page.text()
///     .set_font(Font::Helvetica, 12.0)
///     .at(100.0, 700.0)
///     .write("Hello World")?;
/// # Ok::<(), erdpdf::PdfError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Page {
    width: f64,
    height: f64,
    content: Vec<u8>,
    graphics_context: GraphicsContext,
    text_context: TextContext,
    image_refs: BTreeSet<String>,
}

impl Page {
    /// Creates a new page with the specified width and height in points.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            content: Vec::new(),
            graphics_context: GraphicsContext::new(),
            text_context: TextContext::new(),
            image_refs: BTreeSet::new(),
        }
    }

    /// Creates a page from a physical format.
    pub fn from_format(format: PageFormat, orientation: Orientation) -> Self {
        let (width, height) = format.size_pt(orientation);
        Self::new(width, height)
    }

    /// Creates a new A4 portrait page.
    pub fn a4() -> Self {
        Self::from_format(PageFormat::A4, Orientation::Portrait)
    }

    /// Returns a mutable reference to the graphics context for drawing shapes.
    pub fn graphics(&mut self) -> &mut GraphicsContext {
        &mut self.graphics_context
    }

    /// Returns a mutable reference to the text context for adding text.
    pub fn text(&mut self) -> &mut TextContext {
        &mut self.text_context
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Converts a distance from the top edge in millimetres into a PDF y
    /// coordinate in points.
    pub fn y_from_top_mm(&self, mm: f64) -> f64 {
        self.height - mm_to_pt(mm)
    }

    /// Appends the operations of a finished text flow.
    pub fn add_text_flow(&mut self, text_flow: &TextFlowContext) {
        self.content.extend_from_slice(&text_flow.generate_operations());
    }

    /// Draws a document-level image registered under `name`. The lower-left
    /// corner of the image lands at `(x, y)`.
    pub fn draw_image(&mut self, name: &str, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        if !(width > 0.0 && height > 0.0) {
            return Err(crate::PdfError::InvalidDimension(format!(
                "image '{name}' must have a positive size, got {width}x{height}"
            )));
        }
        self.graphics_context.draw_image(name, x, y, width, height);
        self.image_refs.insert(name.to_string());
        Ok(())
    }

    /// Text operators written so far through [`Page::text`].
    pub fn text_operations(&self) -> &str {
        self.text_context.operations()
    }

    /// Names of the images this page paints.
    pub fn image_refs(&self) -> impl Iterator<Item = &str> {
        self.image_refs.iter().map(String::as_str)
    }

    pub(crate) fn generate_content(&self) -> Vec<u8> {
        let mut final_content = self.graphics_context.generate_operations();
        final_content.extend_from_slice(&self.text_context.generate_operations());
        final_content.extend_from_slice(&self.content);
        final_content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::Color;
    use crate::text::Font;

    #[test]
    fn test_a4_dimensions() {
        let page = Page::a4();
        assert!((page.width() - 595.28).abs() < 0.01);
        assert!((page.height() - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_landscape() {
        let page = Page::from_format(PageFormat::A4, Orientation::Landscape);
        assert!(page.width() > page.height());
    }

    #[test]
    fn test_y_from_top_mm() {
        let page = Page::a4();
        assert!(page.y_from_top_mm(0.0) == page.height());
        assert!(page.y_from_top_mm(297.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_image_records_reference() {
        let mut page = Page::a4();
        page.draw_image("Im1", 0.0, 0.0, 100.0, 100.0).unwrap();
        page.draw_image("Im1", 0.0, -100.0, 100.0, 100.0).unwrap();

        let refs: Vec<&str> = page.image_refs().collect();
        assert_eq!(refs, vec!["Im1"]);
        let content = String::from_utf8(page.generate_content()).unwrap();
        assert_eq!(content.matches("/Im1 Do").count(), 2);
    }

    #[test]
    fn test_draw_image_rejects_empty_size() {
        let mut page = Page::a4();
        assert!(page.draw_image("Im1", 0.0, 0.0, 0.0, 10.0).is_err());
        assert_eq!(page.image_refs().count(), 0);
    }

    #[test]
    fn test_content_order_graphics_then_text() {
        let mut page = Page::a4();
        page.text().write("label").unwrap();
        page.graphics()
            .set_fill_color(Color::white())
            .rect(0.0, 0.0, 1.0, 1.0)
            .fill();

        let content = String::from_utf8(page.generate_content()).unwrap();
        let fill_at = content.find(" re\n").unwrap();
        let text_at = content.find("BT\n").unwrap();
        assert!(fill_at < text_at);
    }

    #[test]
    fn test_text_flow_appended_last() {
        let mut page = Page::a4();
        let mut flow = TextFlowContext::new(40.0, 400.0, 300.0);
        flow.set_font(Font::Helvetica, 10.0);
        flow.write_wrapped("flowed");
        page.add_text_flow(&flow);
        page.text().write("direct").unwrap();

        let content = String::from_utf8(page.generate_content()).unwrap();
        assert!(content.find("(direct)").unwrap() < content.find("(flowed)").unwrap());
    }
}
