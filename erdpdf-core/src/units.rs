//! Length units and page formats.
//!
//! Report layout is authored in millimetres; the PDF content stream works in
//! points (1/72 inch). Conversions happen at the page boundary.

use serde::{Deserialize, Serialize};

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Points per inch.
pub const PT_PER_INCH: f64 = 72.0;

/// Converts millimetres to points.
pub fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_INCH / MM_PER_INCH
}

/// Converts points to millimetres.
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_INCH / PT_PER_INCH
}

/// Physical page formats, dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageFormat {
    #[default]
    A4,
    Letter,
    /// Arbitrary size in millimetres
    Custom { width: f64, height: f64 },
}

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl PageFormat {
    /// Width and height in millimetres for the given orientation.
    pub fn size_mm(&self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = match *self {
            PageFormat::A4 => (210.0, 297.0),
            PageFormat::Letter => (215.9, 279.4),
            PageFormat::Custom { width, height } => (width, height),
        };
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }

    /// Width and height in points for the given orientation.
    pub fn size_pt(&self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.size_mm(orientation);
        (mm_to_pt(w), mm_to_pt(h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_mm_pt_conversions() {
        assert!(approx(mm_to_pt(25.4), 72.0));
        assert!(approx(pt_to_mm(72.0), 25.4));
        assert!(approx(pt_to_mm(mm_to_pt(123.4)), 123.4));
    }

    #[test]
    fn test_a4_size() {
        assert_eq!(PageFormat::A4.size_mm(Orientation::Portrait), (210.0, 297.0));
        assert_eq!(PageFormat::A4.size_mm(Orientation::Landscape), (297.0, 210.0));

        let (w, h) = PageFormat::A4.size_pt(Orientation::Portrait);
        assert!((w - 595.28).abs() < 0.01);
        assert!((h - 841.89).abs() < 0.01);
    }

    #[test]
    fn test_custom_format_deserializes() {
        let format: PageFormat =
            serde_json::from_str(r#"{"custom":{"width":100.0,"height":150.0}}"#).unwrap();
        assert_eq!(format.size_mm(Orientation::Portrait), (100.0, 150.0));

        let a4: PageFormat = serde_json::from_str(r#""a4""#).unwrap();
        assert_eq!(a4, PageFormat::A4);
    }
}
