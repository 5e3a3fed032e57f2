use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid PDF structure: {0}")]
    InvalidStructure(String),

    #[error("Invalid object reference: {0}")]
    InvalidReference(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Compression error: {0}")]
    CompressionError(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    #[error("Invalid page number: {0}")]
    InvalidPageNumber(u32),

    #[error("Diagram has not been generated yet")]
    DiagramNotReady,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PdfError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_pdf_error_display() {
        let error = PdfError::InvalidStructure("test message".to_string());
        assert_eq!(error.to_string(), "Invalid PDF structure: test message");
    }

    #[test]
    fn test_invalid_dimension_display() {
        let error = PdfError::InvalidDimension("page height must be positive, got 0".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid dimension: page height must be positive, got 0"
        );
    }

    #[test]
    fn test_pdf_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let pdf_error = PdfError::from(io_error);

        match pdf_error {
            PdfError::Io(ref err) => {
                assert_eq!(err.kind(), ErrorKind::NotFound);
            }
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_pdf_error_from_serde_error() {
        let parse_error = serde_json::from_str::<u32>("not a number").unwrap_err();
        let pdf_error = PdfError::from(parse_error);
        assert!(matches!(pdf_error, PdfError::Serialization(_)));
        assert!(pdf_error.to_string().starts_with("Serialization error"));
    }

    #[test]
    fn test_all_pdf_error_variants() {
        let errors = vec![
            PdfError::InvalidStructure("structure error".to_string()),
            PdfError::InvalidReference("Im1".to_string()),
            PdfError::EncodingError("encoding error".to_string()),
            PdfError::CompressionError("compression error".to_string()),
            PdfError::InvalidImage("image error".to_string()),
            PdfError::InvalidDimension("dimension error".to_string()),
            PdfError::InvalidPageNumber(999),
            PdfError::DiagramNotReady,
        ];

        for error in errors {
            let error_string = error.to_string();
            assert!(!error_string.is_empty());
        }
    }
}
