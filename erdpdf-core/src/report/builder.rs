use super::{ExportConfig, ReportContent};
use crate::document::Document;
use crate::error::{PdfError, Result};
use crate::graphics::Color;
use crate::page::Page;
use crate::pagination::ImagePaginator;
use crate::raster::Bitmap;
use crate::text::{Font, HeaderFooter, TextAlign, TextFlowContext};
use crate::units::mm_to_pt;
use chrono::{Local, NaiveDate};
use std::fmt::Write as _;

const COVER_FILL: Color = Color::Rgb(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0);
const SPECS_FILL: Color = Color::Rgb(239.0 / 255.0, 246.0 / 255.0, 1.0);
const HEADING: Color = Color::Rgb(30.0 / 255.0, 41.0 / 255.0, 59.0 / 255.0);
const ENTITY_NAME: Color = Color::Rgb(59.0 / 255.0, 130.0 / 255.0, 246.0 / 255.0);
const BODY: Color = Color::Rgb(71.0 / 255.0, 85.0 / 255.0, 105.0 / 255.0);
const FOOTER: Color = Color::Rgb(148.0 / 255.0, 163.0 / 255.0, 184.0 / 255.0);

// Vertical layout in mm from the page top.
const HEADING_Y: f64 = 20.0;
const FIRST_ENTRY_Y: f64 = 35.0;
const CONTINUATION_Y: f64 = 20.0;
// Measured up from the page bottom, so shorter pages keep the same
// clearance above the footer.
const BREAK_ABOVE_BOTTOM: f64 = 37.0;
const CLOSING_ABOVE_BOTTOM: [f64; 2] = [37.0, 27.0];
const LEFT_X: f64 = 15.0;
const SPEC_VALUE_X: f64 = 80.0;
const SPEC_STEP: f64 = 10.0;
const DESCRIPTION_WIDTH: f64 = 180.0;
const DESCRIPTION_OFFSET: f64 = 6.0;
const DESCRIPTION_LINE_STEP: f64 = 5.0;
const ENTRY_GAP: f64 = 8.0;

/// Lays a rendered diagram and the report text out into a [`Document`].
///
/// Page order is cover, diagram pages, entity descriptions, technical
/// specifications; the footer is stamped on every page last.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    content: ReportContent,
    config: ExportConfig,
    generated_on: Option<NaiveDate>,
}

impl ReportBuilder {
    pub fn new(content: ReportContent, config: ExportConfig) -> Self {
        Self {
            content,
            config,
            generated_on: None,
        }
    }

    /// Fixes the date printed on the cover instead of using today.
    pub fn with_generated_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = Some(date);
        self
    }

    pub fn content(&self) -> &ReportContent {
        &self.content
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn build(&self, diagram: &Bitmap) -> Result<Document> {
        self.config.validate()?;

        let mut document = Document::new();
        document.set_title(self.config.title.as_str());
        document.set_subject(self.content.cover.subtitle.as_str());
        document.set_keywords("ERD, database design, documentation");
        if let Some(author) = &self.config.author {
            document.set_author(author.as_str());
        }

        document.add_page(self.cover_page()?);

        let placements = self.paginator().append_to(&mut document, diagram)?;
        tracing::debug!(diagram_pages = placements.len(), "placed diagram");

        for page in self.description_pages()? {
            document.add_page(page);
        }
        for page in self.specification_pages()? {
            document.add_page(page);
        }

        document.apply_footer(&self.footer())?;

        tracing::info!(pages = document.page_count(), "built report");
        Ok(document)
    }

    fn new_page(&self) -> Page {
        Page::from_format(self.config.format, self.config.orientation)
    }

    fn paginator(&self) -> ImagePaginator {
        let paginator = ImagePaginator::new()
            .with_format(self.config.format, self.config.orientation)
            .with_x(self.config.image_x)
            .with_width(self.config.image_width)
            .with_top_margin(self.config.top_margin);
        match self.config.page_step {
            Some(step) => paginator.with_page_step(step),
            None => paginator,
        }
    }

    fn cover_date(&self) -> Result<String> {
        let date = self
            .generated_on
            .unwrap_or_else(|| Local::now().date_naive());
        let mut formatted = String::new();
        write!(formatted, "{}", date.format(&self.config.date_format)).map_err(|_| {
            PdfError::InvalidStructure(format!(
                "invalid date format '{}'",
                self.config.date_format
            ))
        })?;
        Ok(formatted)
    }

    fn cover_page(&self) -> Result<Page> {
        let mut page = self.new_page();
        let (width, height) = (page.width(), page.height());
        page.graphics().fill_page(width, height, COVER_FILL);

        let cover = &self.content.cover;
        let generated = format!("Generated: {}", self.cover_date()?);
        let mut lines: Vec<(&str, f64, f64)> = vec![
            (cover.title.as_str(), 32.0, 100.0),
            (cover.subtitle.as_str(), 24.0, 120.0),
        ];
        lines.extend(
            cover
                .taglines
                .iter()
                .zip([140.0, 150.0])
                .map(|(text, y)| (text.as_str(), 14.0, y)),
        );
        lines.push((generated.as_str(), 12.0, 170.0));
        lines.extend(
            cover
                .closing
                .iter()
                .zip(CLOSING_ABOVE_BOTTOM)
                .map(|(text, above)| (text.as_str(), 10.0, self.config.page_height() - above)),
        );

        let center = width / 2.0;
        for (text, size, y_mm) in lines {
            let y = page.y_from_top_mm(y_mm);
            page.text()
                .set_font(Font::Helvetica, size)
                .set_fill_color(Color::white())
                .at(center, y)
                .write_aligned(text, TextAlign::Center)?;
        }
        Ok(page)
    }

    fn heading(&self, page: &mut Page, text: &str) -> Result<()> {
        let center = page.width() / 2.0;
        let y = page.y_from_top_mm(HEADING_Y);
        page.text()
            .set_font(Font::Helvetica, 20.0)
            .set_fill_color(HEADING)
            .at(center, y)
            .write_aligned(text, TextAlign::Center)?;
        Ok(())
    }

    /// Entries starting below this depth (mm from the top) go on a new page.
    fn break_after(&self) -> f64 {
        self.config.page_height() - BREAK_ABOVE_BOTTOM
    }

    fn description_pages(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        let mut page = self.new_page();
        self.heading(&mut page, &self.content.descriptions_heading)?;

        let mut y = FIRST_ENTRY_Y;
        for (index, entity) in self.content.entities.iter().enumerate() {
            if y > self.break_after() {
                pages.push(std::mem::replace(&mut page, self.new_page()));
                y = CONTINUATION_Y;
            }

            let name_y = page.y_from_top_mm(y);
            page.text()
                .set_font(Font::Helvetica, 13.0)
                .set_fill_color(ENTITY_NAME)
                .at(mm_to_pt(LEFT_X), name_y)
                .write(&format!("{}. {}", index + 1, entity.name))?;

            let mut flow = TextFlowContext::new(
                mm_to_pt(LEFT_X),
                page.y_from_top_mm(y + DESCRIPTION_OFFSET),
                mm_to_pt(DESCRIPTION_WIDTH),
            );
            flow.set_font(Font::Helvetica, 10.0)
                .set_color(BODY)
                .set_line_height(mm_to_pt(DESCRIPTION_LINE_STEP));
            let lines = flow.write_wrapped(&entity.description);
            page.add_text_flow(&flow);

            y += DESCRIPTION_OFFSET + lines as f64 * DESCRIPTION_LINE_STEP + ENTRY_GAP;
        }

        pages.push(page);
        Ok(pages)
    }

    fn specs_page(&self) -> Page {
        let mut page = self.new_page();
        let (width, height) = (page.width(), page.height());
        page.graphics().fill_page(width, height, SPECS_FILL);
        page
    }

    fn specification_pages(&self) -> Result<Vec<Page>> {
        let mut pages = Vec::new();
        let mut page = self.specs_page();
        self.heading(&mut page, &self.content.specifications_heading)?;

        let mut y = FIRST_ENTRY_Y;
        for entry in &self.content.specifications {
            if y > self.break_after() {
                pages.push(std::mem::replace(&mut page, self.specs_page()));
                y = CONTINUATION_Y;
            }
            let baseline = page.y_from_top_mm(y);
            page.text()
                .set_font(Font::HelveticaBold, 11.0)
                .set_fill_color(BODY)
                .at(mm_to_pt(LEFT_X), baseline)
                .write(&format!("{}:", entry.key))?
                .set_font(Font::Helvetica, 11.0)
                .at(mm_to_pt(SPEC_VALUE_X), baseline)
                .write(&entry.value)?;
            y += SPEC_STEP;
        }

        pages.push(page);
        Ok(pages)
    }

    fn footer(&self) -> HeaderFooter {
        HeaderFooter::new_footer(self.config.footer.as_str())
            .with_font(Font::Helvetica, 9.0)
            .with_color(FOOTER)
            .with_alignment(TextAlign::Center)
            .with_margin(mm_to_pt(self.config.footer_margin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Canvas;
    use crate::report::EntityDescription;

    fn bitmap(width: u32, height: u32) -> Bitmap {
        Canvas::new(width, height, Color::white())
            .unwrap()
            .finish()
            .unwrap()
    }

    fn builder() -> ReportBuilder {
        ReportBuilder::new(ReportContent::glamcart(), ExportConfig::default())
            .with_generated_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
    }

    #[test]
    fn test_glamcart_page_order() {
        let document = builder().build(&bitmap(1400, 2000)).unwrap();
        // cover, one diagram page, descriptions, specifications
        assert_eq!(document.page_count(), 4);

        let pages = document.pages();
        assert!(pages[0].text_operations().contains("(GlamCart) Tj"));
        assert!(pages[0].text_operations().contains("(Generated: 3/7/2024) Tj"));
        assert_eq!(pages[1].image_refs().collect::<Vec<_>>(), vec!["Diagram"]);
        assert!(pages[2].text_operations().contains("(Entity Descriptions) Tj"));
        assert!(pages[3].text_operations().contains("(Technical Specifications) Tj"));
        assert!(pages[3].text_operations().contains("(Database Platform:) Tj"));
    }

    #[test]
    fn test_footer_on_every_page() {
        let document = builder().build(&bitmap(1400, 2000)).unwrap();
        let total = document.page_count();
        for (index, page) in document.pages().iter().enumerate() {
            let expected = format!(
                "(GlamCart ERD Documentation - Page {} of {}) Tj",
                index + 1,
                total
            );
            assert!(page.text_operations().contains(&expected), "page {}", index + 1);
        }
    }

    #[test]
    fn test_tall_diagram_spans_pages() {
        // 200mm wide at 1000px means 0.2mm per px, so 3000px is 600mm.
        let document = builder().build(&bitmap(1000, 3000)).unwrap();
        assert_eq!(document.page_count(), 1 + 3 + 1 + 1);
        assert_eq!(document.image_count(), 1);
    }

    #[test]
    fn test_long_descriptions_continue_on_new_page() {
        let mut content = ReportContent::glamcart();
        content.entities = (0..30)
            .map(|i| EntityDescription {
                name: format!("ENTITY_{i}"),
                description: "A short description.".to_string(),
            })
            .collect();
        let document = ReportBuilder::new(content, ExportConfig::default())
            .build(&bitmap(1400, 2000))
            .unwrap();

        // Each entry advances 19mm; the break happens once y passes 260mm.
        let pages = document.pages();
        assert_eq!(pages.len(), 1 + 1 + 3 + 1);
        assert!(pages[2].text_operations().contains("(12. ENTITY_11) Tj"));
        assert!(!pages[2].text_operations().contains("(13. ENTITY_12) Tj"));
        assert!(pages[3].text_operations().contains("(13. ENTITY_12) Tj"));
        assert!(pages[4].text_operations().contains("(26. ENTITY_25) Tj"));
        assert!(!pages[3].text_operations().contains("(Entity Descriptions) Tj"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = ExportConfig {
            image_width: 0.0,
            ..Default::default()
        };
        let result = ReportBuilder::new(ReportContent::glamcart(), config).build(&bitmap(10, 10));
        assert!(matches!(result, Err(PdfError::InvalidDimension(_))));
    }

    #[test]
    fn test_footer_baseline_position() {
        let footer = builder().footer();
        let height = ExportConfig::default().format.size_pt(Default::default()).1;
        let y = footer.calculate_y_position(height);
        assert!((y - mm_to_pt(7.0)).abs() < 1e-9);
    }

    fn text_baselines(page: &Page) -> Vec<f64> {
        let content = String::from_utf8(page.generate_content()).unwrap();
        content
            .lines()
            .filter_map(|line| line.strip_suffix(" Td"))
            .map(|operands| operands.split(' ').nth(1).unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn test_landscape_text_stays_on_page() {
        let config = ExportConfig::from_json(r#"{ "orientation": "landscape" }"#).unwrap();
        let document = ReportBuilder::new(ReportContent::glamcart(), config)
            .build(&bitmap(1400, 2000))
            .unwrap();

        let total = document.page_count();
        for (index, page) in document.pages().iter().enumerate() {
            assert!(page.width() > page.height());
            let baselines = text_baselines(page);
            assert!(!baselines.is_empty());
            for y in baselines {
                assert!(y >= 0.0 && y <= page.height(), "page {}: baseline {y}", index + 1);
            }
            assert!(page.text_operations().contains(&format!(
                "(GlamCart ERD Documentation - Page {} of {}) Tj",
                index + 1,
                total
            )));
        }
    }

    #[test]
    fn test_landscape_footer_sits_above_bottom_edge() {
        let config = ExportConfig {
            orientation: crate::units::Orientation::Landscape,
            ..Default::default()
        };
        let footer = ReportBuilder::new(ReportContent::glamcart(), config.clone()).footer();
        let height = config.format.size_pt(config.orientation).1;
        assert!((footer.calculate_y_position(height) - mm_to_pt(7.0)).abs() < 1e-9);
    }

    #[test]
    fn test_landscape_descriptions_break_earlier() {
        let mut content = ReportContent::glamcart();
        content.entities = (0..30)
            .map(|i| EntityDescription {
                name: format!("ENTITY_{i}"),
                description: "A short description.".to_string(),
            })
            .collect();
        let config = ExportConfig::from_json(r#"{ "orientation": "landscape" }"#).unwrap();
        let document = ReportBuilder::new(content, config)
            .build(&bitmap(1400, 2000))
            .unwrap();

        // Entries at 35 + 19k mm; the first one past 173mm is the eighth.
        let pages = document.pages();
        let first_descriptions = pages
            .iter()
            .position(|page| page.text_operations().contains("(Entity Descriptions) Tj"))
            .unwrap();
        let first = pages[first_descriptions].text_operations();
        assert!(first.contains("(8. ENTITY_7) Tj"));
        assert!(!first.contains("(9. ENTITY_8) Tj"));
        for page in pages {
            for y in text_baselines(page) {
                assert!(y >= 0.0, "baseline {y}");
            }
        }
    }
}
