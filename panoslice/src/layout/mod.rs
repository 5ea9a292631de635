//! Page layout engine.
//!
//! Partitions a source image into an ordered sequence of printable page
//! rectangles given a page aspect ratio, a slicing direction, and an
//! optional custom start point. The partition is deterministic, gapless
//! and non-overlapping over the sliced region; edge tiles are clipped
//! to the image bounds, never padded.
//!
//! The common panorama case is a single row spanning the full image
//! height, where the effective page width follows from the image height
//! (height maps to the printable page height, so page width is
//! `height × aspect_ratio` pixels). Taller images stack rows
//! top-to-bottom with the identical per-row algorithm when a row height
//! cap is configured.

mod types;

pub use types::{
    ImageGeometry, LayoutError, PageRect, PageSpec, SliceDirection, StartPoint, Viewport,
    LETTER_LANDSCAPE_RATIO,
};

use tracing::debug;

/// The result of one slicing run.
///
/// Holds the ordered page rectangles together with the geometry and
/// spec that produced them. A spec change discards the whole layout and
/// regenerates it; there is no incremental mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    geometry: ImageGeometry,
    spec: PageSpec,
    pages: Vec<PageRect>,
}

impl Layout {
    /// All pages in slicing order.
    pub fn pages(&self) -> &[PageRect] {
        &self.pages
    }

    /// Number of pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the layout contains no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page by 0-based index.
    pub fn get(&self, index: usize) -> Option<&PageRect> {
        self.pages.get(index)
    }

    /// The geometry this layout was computed from.
    pub fn geometry(&self) -> &ImageGeometry {
        &self.geometry
    }

    /// The spec this layout was computed from.
    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    /// Hit-test: the page containing the pixel at (x, y), if any.
    ///
    /// Viewers use this to map a clicked grid cell to its page.
    pub fn page_at(&self, x: u32, y: u32) -> Option<&PageRect> {
        self.pages.iter().find(|p| p.contains(x, y))
    }

    /// Indices of pages intersecting the viewport, in slicing order.
    pub fn visible(&self, viewport: &Viewport) -> Vec<usize> {
        self.pages
            .iter()
            .filter(|p| p.intersects(viewport))
            .map(|p| p.page_index)
            .collect()
    }
}

/// Effective page width in pixels for a row of the given height.
///
/// Ties the page width to the row's actual pixel height so the printed
/// aspect ratio holds even when the last row is clipped short. Matches
/// the truncating pixel arithmetic of page-width derivation (floor),
/// clamped to at least one pixel.
#[inline]
pub(crate) fn effective_page_width(row_height: u32, aspect_ratio: f64) -> u32 {
    ((row_height as f64 * aspect_ratio).floor() as u32).max(1)
}

/// Compute the page layout for an image.
///
/// # Arguments
///
/// * `geometry` - Validated source image dimensions
/// * `spec` - Aspect ratio, direction, optional start point and row cap
///
/// # Returns
///
/// A `Layout` whose pages partition the image (from the start point to
/// the far edge in the slicing direction) without gaps or overlaps.
/// Identical inputs always produce an identical layout.
///
/// # Errors
///
/// Returns `LayoutError::InvalidSpec` if the aspect ratio is not a
/// positive finite number, the row height cap is zero, or the start
/// point lies outside the image.
pub fn compute_tiling(geometry: &ImageGeometry, spec: &PageSpec) -> Result<Layout, LayoutError> {
    validate_spec(geometry, spec)?;

    let width = geometry.width();
    let height = geometry.height();
    let (start_x, start_y) = resolve_start(geometry, spec);

    let mut pages = Vec::new();
    let mut y = start_y;
    let mut row_index = 0u32;

    while y < height {
        let remaining = height - y;
        let row_height = spec
            .max_row_height()
            .map_or(remaining, |cap| cap.min(remaining));
        let page_width = effective_page_width(row_height, spec.aspect_ratio());

        match spec.direction() {
            SliceDirection::LeftToRight => {
                let mut x = start_x;
                let mut column_index = 0u32;
                while x < width {
                    let w = page_width.min(width - x);
                    pages.push(PageRect {
                        page_index: pages.len(),
                        x,
                        y,
                        width: w,
                        height: row_height,
                        row_index,
                        column_index,
                    });
                    column_index += 1;
                    x += w;
                }
            }
            SliceDirection::RightToLeft => {
                // start_x is the right edge of the first page; step left,
                // clipping the terminal page at x = 0.
                let mut right = start_x;
                let mut column_index = 0u32;
                while right > 0 {
                    let w = page_width.min(right);
                    pages.push(PageRect {
                        page_index: pages.len(),
                        x: right - w,
                        y,
                        width: w,
                        height: row_height,
                        row_index,
                        column_index,
                    });
                    column_index += 1;
                    right -= w;
                }
            }
        }

        y += row_height;
        row_index += 1;
    }

    debug!(
        width,
        height,
        pages = pages.len(),
        rows = row_index,
        direction = ?spec.direction(),
        "computed page layout"
    );

    Ok(Layout {
        geometry: *geometry,
        spec: *spec,
        pages,
    })
}

/// Validate the spec against the geometry.
fn validate_spec(geometry: &ImageGeometry, spec: &PageSpec) -> Result<(), LayoutError> {
    let aspect = spec.aspect_ratio();
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(LayoutError::InvalidSpec(format!(
            "aspect ratio must be a positive finite number, got {}",
            aspect
        )));
    }

    if spec.max_row_height() == Some(0) {
        return Err(LayoutError::InvalidSpec(
            "row height cap must be positive".to_string(),
        ));
    }

    if let Some(start) = spec.start() {
        if start.y >= geometry.height() {
            return Err(LayoutError::InvalidSpec(format!(
                "start point y={} outside image height {}",
                start.y,
                geometry.height()
            )));
        }
        let x_valid = match spec.direction() {
            // LTR: start.x is the left edge of page 0, must leave pixels to the right.
            SliceDirection::LeftToRight => start.x < geometry.width(),
            // RTL: start.x is the right edge of page 0, must leave pixels to the left.
            SliceDirection::RightToLeft => start.x >= 1 && start.x <= geometry.width(),
        };
        if !x_valid {
            return Err(LayoutError::InvalidSpec(format!(
                "start point x={} outside image width {} for {:?} slicing",
                start.x,
                geometry.width(),
                spec.direction()
            )));
        }
    }

    Ok(())
}

/// Resolve the slice origin: the custom start point if set, otherwise
/// the image edge appropriate for the direction.
fn resolve_start(geometry: &ImageGeometry, spec: &PageSpec) -> (u32, u32) {
    match spec.start() {
        Some(start) => (start.x, start.y),
        None => match spec.direction() {
            SliceDirection::LeftToRight => (0, 0),
            SliceDirection::RightToLeft => (geometry.width(), 0),
        },
    }
}
