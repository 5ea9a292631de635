//! PageEncoder trait for abstracting page output formats.

use image::RgbaImage;

use crate::export::ExportError;

/// Trait for encoding a cropped page image into an output format.
///
/// Implementations must be thread-safe (`Send + Sync`) so batch export
/// can encode pages in parallel.
///
/// # Implementors
///
/// - [`PngPageEncoder`] - Encodes to PNG with configurable compression
///
/// [`PngPageEncoder`]: crate::export::PngPageEncoder
pub trait PageEncoder: Send + Sync {
    /// Encode the page image into a complete output file as bytes.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::Encoding` if the underlying codec fails.
    fn encode(&self, image: &RgbaImage) -> Result<Vec<u8>, ExportError>;

    /// File extension for this format, without the dot (e.g. "png").
    fn extension(&self) -> &'static str;

    /// Human-readable encoder name for logging.
    fn name(&self) -> &'static str;
}
