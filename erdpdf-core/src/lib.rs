//! # erdpdf
//!
//! Renders entity-relationship diagrams to a bitmap and exports them as a
//! multi-page PDF documentation report.
//!
//! ## Features
//!
//! - **Diagram rendering**: entity boxes, attribute lists, dashed relationship
//!   lines with arrowheads and labels, legend panels, drawn onto an RGB canvas
//! - **Pagination**: tall diagrams are sliced across as many pages as needed
//!   by shifting one shared image upward page by page
//! - **Report layout**: cover page, entity descriptions with automatic page
//!   breaks, technical specifications, and a "Page i of N" footer
//! - **PDF writing**: a small self-contained writer with base-14 fonts,
//!   shared image XObjects and optional Flate compression
//!
//! ## Quick Start
//!
//! ```rust
//! use erdpdf::{Color, Document, Font, Page, Result};
//!
//! # fn main() -> Result<()> {
//! let mut doc = Document::new();
//! doc.set_title("My PDF");
//!
//! let mut page = Page::a4();
//! page.graphics()
//!     .set_fill_color(Color::rgb(0.0, 0.5, 1.0))
//!     .rect(50.0, 600.0, 200.0, 100.0)
//!     .fill();
//! page.text()
//!     .set_font(Font::Helvetica, 24.0)
//!     .at(50.0, 750.0)
//!     .write("Hello, PDF!")?;
//!
//! doc.add_page(page);
//! let mut bytes = Vec::new();
//! doc.write(&mut bytes)?;
//! assert!(bytes.starts_with(b"%PDF-1.7"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Exporting the GlamCart report
//!
//! ```rust,no_run
//! use erdpdf::ErdSession;
//!
//! # fn main() -> erdpdf::Result<()> {
//! let mut session = ErdSession::glamcart();
//! session.generate()?;
//! session.download(".")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`erd`] - Diagram model, the GlamCart data set and the raster renderer
//! - [`raster`] - Canvas and bitmap types
//! - [`pagination`] - Splitting a tall image across pages
//! - [`report`] - Report content, export settings and page layout
//! - [`session`] - Generate-then-export flow
//! - [`document`], [`page`], [`graphics`], [`text`], [`writer`] - PDF generation

#[cfg(feature = "compression")]
pub mod compression;
pub mod document;
pub mod erd;
pub mod error;
pub mod graphics;
pub mod objects;
pub mod page;
pub mod pagination;
pub mod raster;
pub mod report;
pub mod session;
pub mod text;
pub mod units;
pub mod writer;

pub use document::{Document, DocumentMetadata};
pub use erd::{Diagram, ErdRenderer};
pub use error::{PdfError, Result};
pub use graphics::{Color, GraphicsContext, Image, ImageColorSpace};
pub use page::Page;
pub use pagination::{plan_pages, ImagePaginator, Placement};
pub use raster::{Bitmap, Canvas};
pub use report::{ExportConfig, ReportBuilder, ReportContent};
pub use session::{DiagramState, ErdSession};
pub use text::{Font, HeaderFooter, TextAlign, TextFlowContext};
pub use units::{mm_to_pt, Orientation, PageFormat};

/// Current version of erdpdf
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_empty_document() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 0);
    }

    #[test]
    fn test_create_page() {
        let page = Page::new(595.0, 842.0);
        assert_eq!(page.width(), 595.0);
        assert_eq!(page.height(), 842.0);
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }
}
