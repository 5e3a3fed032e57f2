//! Flate compression for content streams and image data

use crate::error::{PdfError, Result};

/// Compress data using Flate/Zlib compression
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| PdfError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| PdfError::CompressionError(e.to_string()))
}

/// Decompress data using Flate/Zlib decompression
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    let mut decoder = ZlibDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| PdfError::CompressionError(e.to_string()))?;
    Ok(decompressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_raster_compresses_well() {
        // A mostly-white RGB row block, typical of the diagram background
        let raster = vec![0xFFu8; 1400 * 3 * 20];

        let compressed = compress(&raster).unwrap();
        assert!(compressed.len() * 50 < raster.len());
        assert_eq!(decompress(&compressed).unwrap(), raster);
    }

    #[test]
    fn test_compress_empty() {
        let compressed = compress(b"").unwrap();
        assert!(!compressed.is_empty());
        assert_eq!(decompress(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_decompress_garbage_is_compression_error() {
        let result = decompress(b"definitely not zlib");
        assert!(matches!(result, Err(PdfError::CompressionError(_))));
    }
}
