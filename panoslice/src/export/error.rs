//! Error types for page export operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while exporting pages.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Requested page index does not exist in the layout.
    #[error("page index {index} out of range (layout has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    /// Image encoding failed.
    #[error("encoding failed: {0}")]
    Encoding(String),

    /// Writing the output file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Encoding(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_display() {
        let err = ExportError::PageOutOfRange { index: 7, count: 3 };
        assert!(err.to_string().contains("page index 7"));
        assert!(err.to_string().contains("3 pages"));
    }
}
