mod color;
mod image;

pub use color::Color;
pub use image::{ColorSpace as ImageColorSpace, Image};

use std::fmt;

/// Accumulates vector drawing operators for one page.
///
/// Coordinates are PDF user space: points, origin at the bottom-left corner.
#[derive(Clone, Debug)]
pub struct GraphicsContext {
    operations: String,
    fill_color: Color,
    stroke_color: Color,
    line_width: f64,
}

impl Default for GraphicsContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext {
    pub fn new() -> Self {
        Self {
            operations: String::new(),
            fill_color: Color::black(),
            stroke_color: Color::black(),
            line_width: 1.0,
        }
    }

    fn op(&mut self, args: fmt::Arguments<'_>) {
        self.operations.push_str(&args.to_string());
        self.operations.push('\n');
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(format_args!("{x:.2} {y:.2} m"));
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.op(format_args!("{x:.2} {y:.2} l"));
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.op(format_args!("{x:.2} {y:.2} {width:.2} {height:.2} re"));
        self
    }

    pub fn close_path(&mut self) -> &mut Self {
        self.operations.push_str("h\n");
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        let color = self.stroke_color.pdf_operator(true);
        self.op(format_args!("{color}"));
        self.operations.push_str("S\n");
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        let color = self.fill_color.pdf_operator(false);
        self.op(format_args!("{color}"));
        self.operations.push_str("f\n");
        self
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.stroke_color = color;
        self
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.fill_color = color;
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.line_width = width;
        self.op(format_args!("{width:.2} w"));
        self
    }

    pub fn save_state(&mut self) -> &mut Self {
        self.operations.push_str("q\n");
        self
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.operations.push_str("Q\n");
        self
    }

    /// Fills the rectangle covering the whole page.
    pub fn fill_page(&mut self, page_width: f64, page_height: f64, color: Color) -> &mut Self {
        self.set_fill_color(color)
            .rect(0.0, 0.0, page_width, page_height)
            .fill()
    }

    /// Paints the named image XObject into the rectangle with lower-left
    /// corner `(x, y)`. Parts outside the page are clipped by the MediaBox.
    pub fn draw_image(
        &mut self,
        image_name: &str,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> &mut Self {
        self.save_state();
        self.op(format_args!("{width:.2} 0 0 {height:.2} {x:.2} {y:.2} cm"));
        self.op(format_args!("/{image_name} Do"));
        self.restore_state()
    }

    pub(crate) fn generate_operations(&self) -> Vec<u8> {
        self.operations.as_bytes().to_vec()
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn line_width(&self) -> f64 {
        self.line_width
    }

    pub fn operations(&self) -> &str {
        &self.operations
    }
}
