use crate::error::{PdfError, Result};
use crate::graphics::Image;
use crate::page::Page;
use crate::text::HeaderFooter;
use crate::writer::PdfWriter;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A PDF document that can contain multiple pages, shared images and
/// metadata.
///
/// # Example
///
/// ```rust
/// use erdpdf::{Document, Page};
///
/// let mut doc = Document::new();
/// doc.set_title("My Document");
/// doc.set_author("John Doe");
///
/// doc.add_page(Page::a4());
///
/// let mut bytes = Vec::new();
/// doc.write(&mut bytes).unwrap();
/// assert!(bytes.starts_with(b"%PDF-1.7"));
/// ```
pub struct Document {
    pub(crate) pages: Vec<Page>,
    pub(crate) images: BTreeMap<String, Image>,
    pub(crate) metadata: DocumentMetadata,
}

/// Metadata for a PDF document.
#[derive(Debug, Clone)]
pub struct DocumentMetadata {
    /// Document title
    pub title: Option<String>,
    /// Document author
    pub author: Option<String>,
    /// Document subject
    pub subject: Option<String>,
    /// Document keywords
    pub keywords: Option<String>,
    /// Software that created the original document
    pub creator: Option<String>,
    /// Software that produced the PDF
    pub producer: Option<String>,
    /// Date and time the document was created
    pub creation_date: Option<DateTime<Utc>>,
    /// Date and time the document was last modified
    pub modification_date: Option<DateTime<Utc>>,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            title: None,
            author: None,
            subject: None,
            keywords: None,
            creator: Some("erdpdf".to_string()),
            producer: Some(format!("erdpdf v{}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(now),
            modification_date: Some(now),
        }
    }
}

impl Document {
    /// Creates a new empty PDF document.
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            images: BTreeMap::new(),
            metadata: DocumentMetadata::default(),
        }
    }

    /// Appends a page to the end of the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Registers an image that any page may paint by `name`. The image data
    /// is written to the file once regardless of how many pages use it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStructure` if the name is already taken.
    pub fn add_image(&mut self, name: impl Into<String>, image: Image) -> Result<()> {
        let name = name.into();
        if self.images.contains_key(&name) {
            return Err(PdfError::InvalidStructure(format!(
                "image '{name}' is already registered"
            )));
        }
        self.images.insert(name, image);
        Ok(())
    }

    pub fn image(&self, name: &str) -> Option<&Image> {
        self.images.get(name)
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Gets the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Mutable access to a page by zero-based index.
    pub fn page_mut(&mut self, index: usize) -> Result<&mut Page> {
        self.pages
            .get_mut(index)
            .ok_or(PdfError::InvalidPageNumber(index as u32))
    }

    /// Stamps a header or footer onto every page currently in the document.
    ///
    /// Placeholders are resolved against the page count at the time of the
    /// call, so this should run after the last content page is added.
    pub fn apply_footer(&mut self, footer: &HeaderFooter) -> Result<()> {
        let total = self.pages.len();
        let options = footer.options();
        tracing::debug!(total, "applying page footer");

        for (index, page) in self.pages.iter_mut().enumerate() {
            let text = footer.render(index + 1, total);
            let x = footer.calculate_x_position(page.width());
            let y = footer.calculate_y_position(page.height());
            page.text()
                .set_font(options.font, options.font_size)
                .set_fill_color(options.color)
                .at(x, y)
                .write_aligned(&text, options.alignment)?;
        }
        Ok(())
    }

    pub fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Sets the document title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.metadata.title = Some(title.into());
    }

    /// Sets the document author.
    pub fn set_author(&mut self, author: impl Into<String>) {
        self.metadata.author = Some(author.into());
    }

    /// Sets the document subject.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.metadata.subject = Some(subject.into());
    }

    /// Sets the document keywords.
    pub fn set_keywords(&mut self, keywords: impl Into<String>) {
        self.metadata.keywords = Some(keywords.into());
    }

    /// Sets the modification date to the current time.
    pub fn update_modification_date(&mut self) {
        self.metadata.modification_date = Some(Utc::now());
    }

    /// Saves the document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written, or if a
    /// page paints an image that was never registered.
    pub fn save(&mut self, path: impl AsRef<std::path::Path>) -> Result<()> {
        self.update_modification_date();

        let mut writer = PdfWriter::new(path)?;
        writer.write_document(self)?;
        Ok(())
    }

    /// Writes the document to a buffer.
    pub fn write(&mut self, buffer: &mut Vec<u8>) -> Result<()> {
        self.update_modification_date();

        let mut writer = PdfWriter::new_with_writer(buffer);
        writer.write_document(self)?;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
