//! Interactive export flow: render the diagram once, then export it as
//! many times as needed.

use crate::document::Document;
use crate::erd::{glamcart, Diagram, ErdRenderer};
use crate::error::{PdfError, Result};
use crate::raster::Bitmap;
use crate::report::{ExportConfig, ReportBuilder, ReportContent};
use std::path::{Path, PathBuf};

/// Whether the diagram bitmap has been produced yet.
#[derive(Debug, Clone, Default)]
pub enum DiagramState {
    #[default]
    Pending,
    Ready(Bitmap),
}

/// Holds a diagram, its report text and export settings, and the rendered
/// bitmap once [`ErdSession::generate`] has run.
///
/// ```rust,no_run
/// use erdpdf::session::ErdSession;
///
/// let mut session = ErdSession::glamcart();
/// session.generate()?;
/// let path = session.download("out")?;
/// println!("saved {}", path.display());
/// # Ok::<(), erdpdf::PdfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ErdSession {
    diagram: Diagram,
    content: ReportContent,
    config: ExportConfig,
    renderer: ErdRenderer,
    state: DiagramState,
}

impl ErdSession {
    pub fn new(diagram: Diagram, content: ReportContent, config: ExportConfig) -> Self {
        Self {
            diagram,
            content,
            config,
            renderer: ErdRenderer::new(),
            state: DiagramState::Pending,
        }
    }

    /// The built-in GlamCart diagram and report with default settings.
    pub fn glamcart() -> Self {
        Self::new(
            glamcart::diagram(),
            ReportContent::glamcart(),
            ExportConfig::default(),
        )
    }

    pub fn with_renderer(mut self, renderer: ErdRenderer) -> Self {
        self.renderer = renderer;
        self.state = DiagramState::Pending;
        self
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn state(&self) -> &DiagramState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, DiagramState::Ready(_))
    }

    pub fn bitmap(&self) -> Option<&Bitmap> {
        match &self.state {
            DiagramState::Ready(bitmap) => Some(bitmap),
            DiagramState::Pending => None,
        }
    }

    /// Renders the diagram if it has not been rendered yet.
    pub fn generate(&mut self) -> Result<&Bitmap> {
        if let DiagramState::Pending = self.state {
            let bitmap = self.renderer.render(&self.diagram)?;
            self.state = DiagramState::Ready(bitmap);
        } else {
            tracing::debug!("diagram already rendered");
        }
        self.bitmap().ok_or(PdfError::DiagramNotReady)
    }

    /// Builds the report document. Fails with [`PdfError::DiagramNotReady`]
    /// until [`ErdSession::generate`] has succeeded.
    pub fn export(&self) -> Result<Document> {
        let bitmap = self.bitmap().ok_or(PdfError::DiagramNotReady)?;
        ReportBuilder::new(self.content.clone(), self.config.clone()).build(bitmap)
    }

    /// Exports and saves the report into `dir` under the configured file
    /// name, returning the written path.
    pub fn download(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let mut document = self.export()?;
        let path = dir.as_ref().join(&self.config.file_name);
        document.save(&path)?;
        tracing::info!(path = %path.display(), pages = document.page_count(), "saved report");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::erd::{Entity, Theme};
    use crate::graphics::Color;
    use tempfile::TempDir;

    fn small_session() -> ErdSession {
        let mut diagram = Diagram::new(300, 200);
        diagram.entities.push(Entity::new("USER", 20, 20, 200, 120));
        ErdSession::new(diagram, ReportContent::glamcart(), ExportConfig::default())
    }

    #[test]
    fn test_export_before_generate_fails() {
        let session = small_session();
        assert!(!session.is_ready());
        assert!(matches!(session.export(), Err(PdfError::DiagramNotReady)));
    }

    #[test]
    fn test_generate_is_idempotent() {
        let mut session = small_session();
        let first = session.generate().unwrap().clone();
        assert!(session.is_ready());
        let second = session.generate().unwrap();
        assert_eq!(&first, second);
        assert_eq!((first.width(), first.height()), (300, 200));
    }

    #[test]
    fn test_with_renderer_uses_its_theme() {
        let theme = Theme {
            secondary_header: Color::rgb8(0x12, 0x34, 0x56),
            ..Theme::default()
        };
        let mut session = small_session().with_renderer(ErdRenderer::with_theme(theme));
        let bitmap = session.generate().unwrap();
        assert_eq!(bitmap.pixel(200, 25), Some([0x12, 0x34, 0x56]));
    }

    #[test]
    fn test_download_writes_named_file() {
        let dir = TempDir::new().unwrap();
        let mut session = small_session();
        session.generate().unwrap();

        let path = session.download(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("GlamCart_ERD_Complete_Documentation.pdf"));
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert!(bytes.ends_with(b"%%EOF\n") || bytes.ends_with(b"%%EOF"));
    }

    #[test]
    fn test_download_before_generate_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let session = small_session();
        assert!(session.download(dir.path()).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_render_failure_leaves_pending() {
        let mut diagram = Diagram::new(100, 100);
        diagram.entities.push(Entity::new("TOO_BIG", 50, 50, 200, 200));
        let mut session =
            ErdSession::new(diagram, ReportContent::glamcart(), ExportConfig::default());
        assert!(session.generate().is_err());
        assert!(matches!(session.state(), DiagramState::Pending));
    }
}
