//! Header and footer templates for PDF pages.
//!
//! Templates carry placeholders that are resolved per page once the final
//! page count is known, see [`crate::Document::apply_footer`].

use crate::graphics::Color;
use crate::text::{Font, TextAlign};
use chrono::Local;
use std::collections::HashMap;

/// Position for headers and footers on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeaderFooterPosition {
    /// Header at the top of the page
    Header,
    /// Footer at the bottom of the page
    Footer,
}

/// Configuration options for headers and footers.
#[derive(Debug, Clone)]
pub struct HeaderFooterOptions {
    /// Font to use for the header/footer text
    pub font: Font,
    /// Font size in points
    pub font_size: f64,
    /// Text color
    pub color: Color,
    /// Text alignment
    pub alignment: TextAlign,
    /// Distance of the baseline from the page edge, in points
    pub margin: f64,
    /// Custom date format for `{{date}}` (if None, uses `%Y-%m-%d`)
    pub date_format: Option<String>,
}

impl Default for HeaderFooterOptions {
    fn default() -> Self {
        Self {
            font: Font::Helvetica,
            font_size: 10.0,
            color: Color::black(),
            alignment: TextAlign::Center,
            margin: 36.0, // 0.5 inch
            date_format: None,
        }
    }
}

/// A header or footer that can be added to PDF pages.
#[derive(Debug, Clone)]
pub struct HeaderFooter {
    position: HeaderFooterPosition,
    content: String,
    options: HeaderFooterOptions,
    custom_values: HashMap<String, String>,
}

impl HeaderFooter {
    /// Creates a new header with the given content.
    pub fn new_header(content: impl Into<String>) -> Self {
        Self {
            position: HeaderFooterPosition::Header,
            content: content.into(),
            options: HeaderFooterOptions::default(),
            custom_values: HashMap::new(),
        }
    }

    /// Creates a new footer with the given content.
    ///
    /// # Example
    ///
    /// ```rust
    /// use erdpdf::text::HeaderFooter;
    ///
    /// let footer = HeaderFooter::new_footer("Page {{page_number}} of {{total_pages}}");
    /// assert_eq!(footer.render(2, 7), "Page 2 of 7");
    /// ```
    pub fn new_footer(content: impl Into<String>) -> Self {
        Self {
            position: HeaderFooterPosition::Footer,
            content: content.into(),
            options: HeaderFooterOptions::default(),
            custom_values: HashMap::new(),
        }
    }

    pub fn with_font(mut self, font: Font, size: f64) -> Self {
        self.options.font = font;
        self.options.font_size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.options.color = color;
        self
    }

    pub fn with_alignment(mut self, alignment: TextAlign) -> Self {
        self.options.alignment = alignment;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.options.margin = margin;
        self
    }

    /// Registers a custom `{{key}}` placeholder.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_values.insert(key.into(), value.into());
        self
    }

    pub fn position(&self) -> HeaderFooterPosition {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn options(&self) -> &HeaderFooterOptions {
        &self.options
    }

    /// Renders the template for one page.
    ///
    /// Available placeholders:
    /// - `{{page_number}}` - Current page number (1-based)
    /// - `{{total_pages}}` - Total number of pages
    /// - `{{date}}` - Current date
    /// - `{{year}}` - Current year
    /// - any key registered with [`HeaderFooter::with_value`]
    pub fn render(&self, page_number: usize, total_pages: usize) -> String {
        let mut result = self
            .content
            .replace("{{page_number}}", &page_number.to_string())
            .replace("{{total_pages}}", &total_pages.to_string());

        if result.contains("{{") {
            let now = Local::now();
            let date_format = self.options.date_format.as_deref().unwrap_or("%Y-%m-%d");
            result = result
                .replace("{{year}}", &now.format("%Y").to_string())
                .replace("{{date}}", &now.format(date_format).to_string());

            for (key, value) in &self.custom_values {
                result = result.replace(&format!("{{{{{key}}}}}"), value);
            }
        }

        result
    }

    /// Y position of the baseline for a page of the given height.
    pub fn calculate_y_position(&self, page_height: f64) -> f64 {
        match self.position {
            HeaderFooterPosition::Header => page_height - self.options.margin,
            HeaderFooterPosition::Footer => self.options.margin,
        }
    }

    /// Anchor X position for a page of the given width. The returned x is
    /// the left edge, the center or the right edge depending on alignment.
    pub fn calculate_x_position(&self, page_width: f64) -> f64 {
        match self.options.alignment {
            TextAlign::Left => self.options.margin,
            TextAlign::Center => page_width / 2.0,
            TextAlign::Right => page_width - self.options.margin,
        }
    }
}
