mod encoding;
mod flow;
mod font;
mod header_footer;
mod metrics;

pub use encoding::encode_win_ansi;
pub use flow::{TextAlign, TextFlowContext};
pub use font::Font;
pub use header_footer::{HeaderFooter, HeaderFooterOptions, HeaderFooterPosition};
pub use metrics::{measure_char, measure_text, wrap_text};

use crate::graphics::Color;
use crate::Result;
pub(crate) use encoding::write_literal;

/// Single-line text placement for one page.
///
/// Each `write` emits a self-contained `BT ... ET` block with the current
/// font, size and fill color.
#[derive(Clone, Debug)]
pub struct TextContext {
    operations: String,
    current_font: Font,
    font_size: f64,
    color: Color,
    position: (f64, f64),
}

impl Default for TextContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TextContext {
    pub fn new() -> Self {
        Self {
            operations: String::new(),
            current_font: Font::Helvetica,
            font_size: 12.0,
            color: Color::black(),
            position: (0.0, 0.0),
        }
    }

    pub fn set_font(&mut self, font: Font, size: f64) -> &mut Self {
        self.current_font = font;
        self.font_size = size;
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    pub fn at(&mut self, x: f64, y: f64) -> &mut Self {
        self.position = (x, y);
        self
    }

    /// Writes `text` with its left edge at the current position.
    pub fn write(&mut self, text: &str) -> Result<&mut Self> {
        let (x, y) = self.position;
        self.emit(text, x, y)?;
        Ok(self)
    }

    /// Writes `text` aligned against the current x position: `Center` puts
    /// the middle of the string there, `Right` its right edge.
    pub fn write_aligned(&mut self, text: &str, align: TextAlign) -> Result<&mut Self> {
        let (x, y) = self.position;
        let width = measure_text(text, self.current_font, self.font_size);
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        self.emit(text, left, y)?;
        Ok(self)
    }

    fn emit(&mut self, text: &str, x: f64, y: f64) -> Result<()> {
        if !x.is_finite() || !y.is_finite() {
            return Err(crate::PdfError::InvalidDimension(format!(
                "text position must be finite, got ({x}, {y})"
            )));
        }
        self.operations.push_str("BT\n");
        self.operations.push_str(&format!(
            "/{} {:.2} Tf\n{}\n{:.2} {:.2} Td\n",
            self.current_font.pdf_name(),
            self.font_size,
            self.color.pdf_operator(false),
            x,
            y
        ));
        write_literal(&mut self.operations, &encode_win_ansi(text));
        self.operations.push_str(" Tj\nET\n");
        Ok(())
    }

    pub fn operations(&self) -> &str {
        &self.operations
    }

    pub(crate) fn generate_operations(&self) -> Vec<u8> {
        self.operations.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_emits_text_object() {
        let mut ctx = TextContext::new();
        ctx.set_font(Font::HelveticaBold, 20.0)
            .at(50.0, 700.0)
            .write("Entity Descriptions")
            .unwrap();

        assert_eq!(
            ctx.operations(),
            "BT\n/Helvetica-Bold 20.00 Tf\n0.000 g\n50.00 700.00 Td\n(Entity Descriptions) Tj\nET\n"
        );
    }

    #[test]
    fn test_write_aligned_center() {
        let mut ctx = TextContext::new();
        ctx.set_font(Font::Courier, 10.0)
            .at(100.0, 50.0)
            .write_aligned("abcd", TextAlign::Center)
            .unwrap();
        // 4 chars * 6pt = 24pt, centered on x=100
        assert!(ctx.operations().contains("88.00 50.00 Td\n"));
    }

    #[test]
    fn test_write_aligned_right() {
        let mut ctx = TextContext::new();
        ctx.set_font(Font::Courier, 10.0)
            .at(100.0, 50.0)
            .write_aligned("ab", TextAlign::Right)
            .unwrap();
        assert!(ctx.operations().contains("88.00 50.00 Td\n"));
    }

    #[test]
    fn test_fill_color_applied() {
        let mut ctx = TextContext::new();
        ctx.set_fill_color(Color::white()).write("x").unwrap();
        assert!(ctx.operations().contains("1.000 g\n"));
    }

    #[test]
    fn test_escapes_parentheses() {
        let mut ctx = TextContext::new();
        ctx.write("_id: ObjectId (PK)").unwrap();
        assert!(ctx.operations().contains("(_id: ObjectId \\(PK\\)) Tj"));
    }

    #[test]
    fn test_non_finite_position_rejected() {
        let mut ctx = TextContext::new();
        let result = ctx.at(f64::NAN, 0.0).write("x");
        assert!(result.is_err());
    }
}
