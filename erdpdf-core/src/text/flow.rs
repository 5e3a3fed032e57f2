use crate::graphics::Color;
use crate::text::encoding::{encode_win_ansi, write_literal};
use crate::text::{measure_text, wrap_text, Font};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
    Center,
}

/// Writes word-wrapped text downward from a cursor inside a fixed-width
/// column. Coordinates are PDF points, origin bottom-left.
#[derive(Debug, Clone)]
pub struct TextFlowContext {
    operations: String,
    font: Font,
    font_size: f64,
    color: Color,
    line_height: f64,
    alignment: TextAlign,
    left: f64,
    width: f64,
    cursor_y: f64,
}

impl TextFlowContext {
    /// Starts a column at `left` with the given `width`; the first baseline
    /// is placed at `top`.
    pub fn new(left: f64, top: f64, width: f64) -> Self {
        Self {
            operations: String::new(),
            font: Font::Helvetica,
            font_size: 12.0,
            color: Color::black(),
            line_height: 12.0 * 1.2,
            alignment: TextAlign::Left,
            left,
            width,
            cursor_y: top,
        }
    }

    pub fn set_font(&mut self, font: Font, size: f64) -> &mut Self {
        self.font = font;
        self.font_size = size;
        self
    }

    pub fn set_color(&mut self, color: Color) -> &mut Self {
        self.color = color;
        self
    }

    /// Distance between consecutive baselines, in points.
    pub fn set_line_height(&mut self, line_height: f64) -> &mut Self {
        self.line_height = line_height;
        self
    }

    pub fn set_alignment(&mut self, alignment: TextAlign) -> &mut Self {
        self.alignment = alignment;
        self
    }

    /// Writes `text` wrapped to the column width and returns how many lines
    /// it took. The cursor ends one line below the last line written.
    pub fn write_wrapped(&mut self, text: &str) -> usize {
        let lines = wrap_text(text, self.font, self.font_size, self.width);
        for line in &lines {
            let line_width = measure_text(line, self.font, self.font_size);
            let x = match self.alignment {
                TextAlign::Left => self.left,
                TextAlign::Right => self.left + self.width - line_width,
                TextAlign::Center => self.left + (self.width - line_width) / 2.0,
            };

            self.operations.push_str("BT\n");
            self.operations.push_str(&format!(
                "/{} {:.2} Tf\n{}\n{:.2} {:.2} Td\n",
                self.font.pdf_name(),
                self.font_size,
                self.color.pdf_operator(false),
                x,
                self.cursor_y
            ));
            write_literal(&mut self.operations, &encode_win_ansi(line));
            self.operations.push_str(" Tj\nET\n");

            self.cursor_y -= self.line_height;
        }
        lines.len()
    }

    pub fn cursor_y(&self) -> f64 {
        self.cursor_y
    }

    pub fn generate_operations(&self) -> Vec<u8> {
        self.operations.as_bytes().to_vec()
    }
}
