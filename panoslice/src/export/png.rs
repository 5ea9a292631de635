//! PNG page encoder implementation.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::export::{ExportError, PageEncoder};

/// PNG page encoder.
///
/// Defaults to fast compression: exported pages are intermediate print
/// artifacts, so encode speed matters more than file size.
///
/// # Example
///
/// ```
/// use panoslice::export::{PageEncoder, PngPageEncoder};
///
/// let encoder = PngPageEncoder::new();
/// assert_eq!(encoder.extension(), "png");
/// assert_eq!(encoder.name(), "PNG");
/// ```
#[derive(Debug, Clone)]
pub struct PngPageEncoder {
    compression: CompressionType,
}

impl PngPageEncoder {
    /// Create a new PNG encoder with fast compression.
    pub fn new() -> Self {
        Self {
            compression: CompressionType::Fast,
        }
    }

    /// Set the compression type.
    pub fn with_compression(mut self, compression: CompressionType) -> Self {
        self.compression = compression;
        self
    }
}

impl Default for PngPageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageEncoder for PngPageEncoder {
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, ExportError> {
        let mut buffer = Vec::new();
        let encoder =
            PngEncoder::new_with_quality(&mut buffer, self.compression, FilterType::Adaptive);
        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )?;
        Ok(buffer)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn name(&self) -> &'static str {
        "PNG"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_produces_png_signature() {
        let image = RgbaImage::from_pixel(8, 8, image::Rgba([255, 0, 255, 255]));
        let encoder = PngPageEncoder::new();

        let data = encoder.encode(&image).unwrap();
        assert_eq!(&data[0..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }

    #[test]
    fn test_encoded_png_roundtrips_dimensions() {
        let image = RgbaImage::new(33, 17);
        let data = PngPageEncoder::new().encode(&image).unwrap();

        let decoded = image::load_from_memory(&data).unwrap();
        assert_eq!(decoded.width(), 33);
        assert_eq!(decoded.height(), 17);
    }
}
