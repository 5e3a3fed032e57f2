use crate::error::{PdfError, Result};
use crate::units::{Orientation, PageFormat};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE_NAME: &str = "GlamCart_ERD_Complete_Documentation.pdf";
pub const DEFAULT_FOOTER: &str =
    "GlamCart ERD Documentation - Page {{page_number}} of {{total_pages}}";

/// Layout and output settings for a report export.
///
/// Every field has a default, so a JSON file only needs the fields it
/// changes:
///
/// ```rust
/// use erdpdf::report::ExportConfig;
///
/// let config: ExportConfig = serde_json::from_str(r#"{ "top_margin": 10 }"#)?;
/// assert_eq!(config.top_margin, 10.0);
/// assert_eq!(config.image_width, 200.0);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: PageFormat,
    pub orientation: Orientation,
    /// Left edge of the diagram image, mm
    pub image_x: f64,
    /// Drawn width of the diagram image, mm
    pub image_width: f64,
    /// Gap above the diagram on its first page, mm
    pub top_margin: f64,
    /// Shift between diagram pages, mm; the page height when unset
    pub page_step: Option<f64>,
    pub file_name: String,
    pub title: String,
    pub author: Option<String>,
    /// Footer template; supports `{{page_number}}` and `{{total_pages}}`
    pub footer: String,
    /// Footer baseline, mm above the page bottom
    pub footer_margin: f64,
    /// chrono format string for the cover date
    pub date_format: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: PageFormat::A4,
            orientation: Orientation::Portrait,
            image_x: 5.0,
            image_width: 200.0,
            top_margin: 5.0,
            page_step: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            title: "GlamCart ERD Complete Documentation".to_string(),
            author: None,
            footer: DEFAULT_FOOTER.to_string(),
            footer_margin: 7.0,
            date_format: "%-m/%-d/%Y".to_string(),
        }
    }
}

impl ExportConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Height of one page in mm for the configured format.
    pub fn page_height(&self) -> f64 {
        self.format.size_mm(self.orientation).1
    }

    /// Checks the settings that would otherwise fail halfway through a
    /// build.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.format.size_mm(self.orientation);
        for (name, value) in [("page width", width), ("page height", height), ("image width", self.image_width)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PdfError::InvalidDimension(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if let Some(step) = self.page_step {
            if !(step.is_finite() && step > 0.0) {
                return Err(PdfError::InvalidDimension(format!(
                    "page step must be positive, got {step}"
                )));
            }
        }
        for (name, value) in [("image x", self.image_x), ("top margin", self.top_margin)] {
            if !value.is_finite() {
                return Err(PdfError::InvalidDimension(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if !(self.footer_margin >= 0.0 && self.footer_margin < height) {
            return Err(PdfError::InvalidDimension(format!(
                "footer margin must lie within the {height}mm page, got {}",
                self.footer_margin
            )));
        }
        if self.file_name.is_empty()
            || self.file_name.contains(['/', '\\'])
            || self.file_name == "."
            || self.file_name == ".."
        {
            return Err(PdfError::InvalidStructure(format!(
                "file name must be a plain file name, got '{}'",
                self.file_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.file_name, "GlamCart_ERD_Complete_Documentation.pdf");
        assert_eq!(config.page_height(), 297.0);
        assert_eq!(config.image_x, 5.0);
        assert_eq!(config.footer_margin, 7.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExportConfig::from_json(
            r#"{ "format": "letter", "orientation": "landscape", "author": "Docs Team" }"#,
        )
        .unwrap();
        assert_eq!(config.format, PageFormat::Letter);
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.author.as_deref(), Some("Docs Team"));
        assert_eq!(config.top_margin, 5.0);
        assert!((config.page_height() - 215.9).abs() < 1e-9);
    }

    #[test]
    fn test_footer_margin_checked_against_landscape_height() {
        let landscape = ExportConfig {
            orientation: Orientation::Landscape,
            footer_margin: 250.0,
            ..Default::default()
        };
        assert!(matches!(landscape.validate(), Err(PdfError::InvalidDimension(_))));
        let portrait = ExportConfig {
            footer_margin: 250.0,
            ..Default::default()
        };
        assert!(portrait.validate().is_ok());
    }

    #[test]
    fn test_custom_format_from_json() {
        let config =
            ExportConfig::from_json(r#"{ "format": { "custom": { "width": 100, "height": 150 } } }"#)
                .unwrap();
        assert_eq!(config.page_height(), 150.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            ExportConfig { page_step: Some(0.0), ..Default::default() },
            ExportConfig { image_width: -1.0, ..Default::default() },
            ExportConfig { top_margin: f64::NAN, ..Default::default() },
            ExportConfig { file_name: "../out.pdf".to_string(), ..Default::default() },
            ExportConfig { file_name: String::new(), ..Default::default() },
            ExportConfig { footer_margin: -1.0, ..Default::default() },
            ExportConfig { footer_margin: 297.0, ..Default::default() },
            ExportConfig { footer_margin: f64::INFINITY, ..Default::default() },
            ExportConfig {
                format: PageFormat::Custom { width: 100.0, height: 0.0 },
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }
}
