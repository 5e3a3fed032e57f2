//! Entity-relationship diagrams: a serde-friendly model, the built-in
//! GlamCart data set and a renderer that draws any model onto a bitmap.
//!
//! ```rust
//! use erdpdf::erd::{glamcart, ErdRenderer};
//!
//! let bitmap = ErdRenderer::new().render(&glamcart::diagram())?;
//! assert_eq!((bitmap.width(), bitmap.height()), (1400, 2000));
//! # Ok::<(), erdpdf::PdfError>(())
//! ```

pub mod glamcart;
mod model;
mod renderer;

pub use model::{
    Anchor, Attribute, AttributeKind, Caption, Diagram, Entity, Panel, Relationship, TextLine,
    TextSize,
};
pub use renderer::{ErdRenderer, Theme};
