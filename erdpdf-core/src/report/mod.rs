//! The documentation report: a cover page, the paginated diagram, entity
//! descriptions and a technical specifications page, each stamped with a
//! "Page i of N" footer.
//!
//! ```rust
//! use erdpdf::erd::{glamcart, ErdRenderer};
//! use erdpdf::report::{ExportConfig, ReportBuilder, ReportContent};
//!
//! let bitmap = ErdRenderer::new().render(&glamcart::diagram())?;
//! let document = ReportBuilder::new(ReportContent::glamcart(), ExportConfig::default())
//!     .build(&bitmap)?;
//! assert_eq!(document.page_count(), 4);
//! # Ok::<(), erdpdf::PdfError>(())
//! ```

mod builder;
mod config;
mod content;

pub use builder::ReportBuilder;
pub use config::{ExportConfig, DEFAULT_FILE_NAME, DEFAULT_FOOTER};
pub use content::{CoverContent, EntityDescription, ReportContent, Specification};
