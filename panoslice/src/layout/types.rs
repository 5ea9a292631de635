//! Core types for the page layout engine.
//!
//! Provides the immutable input records (`ImageGeometry`, `PageSpec`)
//! and the output record (`PageRect`) used by [`compute_tiling`].
//!
//! [`compute_tiling`]: crate::layout::compute_tiling

use thiserror::Error;

/// Aspect ratio of a US-letter sheet in landscape orientation (11 × 8.5).
pub const LETTER_LANDSCAPE_RATIO: f64 = 11.0 / 8.5;

/// Errors that can occur while computing a page layout.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// Image dimensions are not both positive.
    #[error("invalid image geometry {width}x{height}: dimensions must be positive")]
    InvalidGeometry { width: u32, height: u32 },

    /// Page spec is malformed (aspect ratio, row height, or start point).
    #[error("invalid page spec: {0}")]
    InvalidSpec(String),
}

/// Pixel dimensions of the source image.
///
/// This is the source of truth for all layout computation. It is
/// validated once at construction and never mutated afterwards.
///
/// # Example
///
/// ```
/// use panoslice::layout::ImageGeometry;
///
/// let geometry = ImageGeometry::new(3300, 850).unwrap();
/// assert_eq!(geometry.width(), 3300);
/// assert_eq!(geometry.height(), 850);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageGeometry {
    width: u32,
    height: u32,
}

impl ImageGeometry {
    /// Create a new image geometry.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidGeometry` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::InvalidGeometry { width, height });
        }
        Ok(Self { width, height })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Order in which pages within a row are sliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SliceDirection {
    /// Page 0 starts at the left edge (or the start point) and slicing
    /// proceeds rightward.
    #[default]
    LeftToRight,
    /// Page 0 ends at the right edge (or the start point) and slicing
    /// proceeds leftward.
    RightToLeft,
}

/// Absolute pixel coordinate where slicing begins.
///
/// For `LeftToRight` this is the left edge of page 0; for `RightToLeft`
/// it is the *right* edge of page 0. Pixels before the start point (in
/// the slicing direction) are not covered by the resulting layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StartPoint {
    /// Horizontal start coordinate in pixels.
    pub x: u32,
    /// Vertical start coordinate in pixels (top edge of the first row).
    pub y: u32,
}

impl StartPoint {
    /// Create a new start point.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Immutable configuration for one slicing run.
///
/// Built with a fluent API; defaults are left-to-right slicing from the
/// image edge with a single row spanning the full image height.
///
/// # Example
///
/// ```
/// use panoslice::layout::{PageSpec, SliceDirection, StartPoint, LETTER_LANDSCAPE_RATIO};
///
/// let spec = PageSpec::new(LETTER_LANDSCAPE_RATIO)
///     .with_direction(SliceDirection::RightToLeft)
///     .with_start(StartPoint::new(2500, 0));
/// assert_eq!(spec.direction(), SliceDirection::RightToLeft);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSpec {
    aspect_ratio: f64,
    direction: SliceDirection,
    start: Option<StartPoint>,
    max_row_height: Option<u32>,
}

impl PageSpec {
    /// Create a new page spec with the given page aspect ratio
    /// (printable width divided by printable height, e.g. 11/8.5 for
    /// landscape letter).
    pub fn new(aspect_ratio: f64) -> Self {
        Self {
            aspect_ratio,
            direction: SliceDirection::LeftToRight,
            start: None,
            max_row_height: None,
        }
    }

    /// Set the slicing direction.
    pub fn with_direction(mut self, direction: SliceDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Override the default slice origin with a custom start point.
    pub fn with_start(mut self, start: StartPoint) -> Self {
        self.start = Some(start);
        self
    }

    /// Cap the row height in pixels, stacking rows top-to-bottom when
    /// the image is taller than one row. Without a cap the whole image
    /// height becomes a single row.
    pub fn with_max_row_height(mut self, height: u32) -> Self {
        self.max_row_height = Some(height);
        self
    }

    /// Page aspect ratio (width / height).
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Slicing direction.
    pub fn direction(&self) -> SliceDirection {
        self.direction
    }

    /// Custom start point, if any.
    pub fn start(&self) -> Option<StartPoint> {
        self.start
    }

    /// Row height cap, if any.
    pub fn max_row_height(&self) -> Option<u32> {
        self.max_row_height
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::new(LETTER_LANDSCAPE_RATIO)
    }
}

/// One printable page tile, in source-image pixel coordinates.
///
/// Produced by [`compute_tiling`]; immutable once emitted. `page_index`
/// is the 0-based slicing order used for export filenames and print
/// page selection. Edge tiles are clipped to the image bounds, so
/// `width` may be smaller than the row's effective page width.
///
/// [`compute_tiling`]: crate::layout::compute_tiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRect {
    /// 0-based index in slicing order.
    pub page_index: usize,
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// 0-based row (top to bottom).
    pub row_index: u32,
    /// 0-based position within the row, in slicing order.
    pub column_index: u32,
}

impl PageRect {
    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Whether the pixel at (x, y) falls inside this page.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether this page overlaps the given viewport.
    pub fn intersects(&self, viewport: &Viewport) -> bool {
        (self.x as f64) < viewport.x + viewport.width
            && viewport.x < self.right() as f64
            && (self.y as f64) < viewport.y + viewport.height
            && viewport.y < self.bottom() as f64
    }
}

/// A view rectangle in source-image coordinates.
///
/// Used to answer "which pages are currently visible" queries for
/// export-visible and print-visible selections. Coordinates are floats
/// because viewers track pan/zoom with sub-pixel precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Left edge in image coordinates.
    pub x: f64,
    /// Top edge in image coordinates.
    pub y: f64,
    /// View width in image coordinates.
    pub width: f64,
    /// View height in image coordinates.
    pub height: f64,
}

impl Viewport {
    /// Create a new viewport.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_rejects_zero_width() {
        let result = ImageGeometry::new(0, 100);
        assert!(matches!(
            result.unwrap_err(),
            LayoutError::InvalidGeometry { width: 0, .. }
        ));
    }

    #[test]
    fn test_geometry_rejects_zero_height() {
        assert!(ImageGeometry::new(100, 0).is_err());
    }

    #[test]
    fn test_page_rect_contains_edges() {
        let rect = PageRect {
            page_index: 0,
            x: 100,
            y: 0,
            width: 50,
            height: 80,
            row_index: 0,
            column_index: 0,
        };

        assert!(rect.contains(100, 0));
        assert!(rect.contains(149, 79));
        assert!(!rect.contains(150, 0), "right edge is exclusive");
        assert!(!rect.contains(100, 80), "bottom edge is exclusive");
        assert!(!rect.contains(99, 0));
    }

    #[test]
    fn test_page_rect_intersects_viewport() {
        let rect = PageRect {
            page_index: 0,
            x: 100,
            y: 0,
            width: 50,
            height: 80,
            row_index: 0,
            column_index: 0,
        };

        assert!(rect.intersects(&Viewport::new(120.0, 10.0, 500.0, 500.0)));
        assert!(rect.intersects(&Viewport::new(0.0, 0.0, 101.0, 10.0)));
        assert!(!rect.intersects(&Viewport::new(150.0, 0.0, 10.0, 10.0)));
        assert!(!rect.intersects(&Viewport::new(0.0, 80.0, 500.0, 10.0)));
    }

    #[test]
    fn test_spec_builder_defaults() {
        let spec = PageSpec::default();
        assert_eq!(spec.direction(), SliceDirection::LeftToRight);
        assert!(spec.start().is_none());
        assert!(spec.max_row_height().is_none());
        assert!((spec.aspect_ratio() - 11.0 / 8.5).abs() < 1e-12);
    }
}
