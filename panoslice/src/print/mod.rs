//! Print planning: page selection and fit-to-page placement.
//!
//! This module stays on the pure side of the print boundary. It turns a
//! user-facing page selection ("all", "visible", a 1-based range) into
//! concrete page indices against a [`Layout`], and computes where each
//! page lands inside a printer's printable area. Talking to an actual
//! spooler or driver is a consumer concern.
//!
//! [`Layout`]: crate::layout::Layout

use std::str::FromStr;

use thiserror::Error;

use crate::layout::{Layout, Viewport};

/// Errors that can occur while resolving a print plan.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrintError {
    /// Selection string did not parse.
    #[error("invalid page selection '{0}': expected 'all', 'visible', a page number, or 'N-M'")]
    InvalidSelection(String),

    /// Range selection is empty or inverted.
    #[error("empty page range {start}-{end}")]
    EmptyRange { start: usize, end: usize },

    /// Visible selection requested without a viewport.
    #[error("'visible' selection requires a viewport")]
    MissingViewport,

    /// Printable area has a non-positive dimension.
    #[error("invalid printable area {width}x{height}")]
    InvalidPrintableArea { width: u32, height: u32 },
}

/// Which pages of a layout to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    /// Every page in the layout.
    All,
    /// Pages intersecting the current viewport.
    Visible,
    /// Inclusive 1-based page number range, as shown to the user.
    Range { start: usize, end: usize },
}

impl PageSelection {
    /// Resolve the selection to 0-based page indices in slicing order.
    ///
    /// Range bounds are clamped to the layout, matching how print
    /// dialogs treat an over-long range.
    ///
    /// # Errors
    ///
    /// Returns `PrintError::MissingViewport` for `Visible` without a
    /// viewport, or `PrintError::EmptyRange` for an inverted range.
    pub fn resolve(
        &self,
        layout: &Layout,
        viewport: Option<&Viewport>,
    ) -> Result<Vec<usize>, PrintError> {
        match *self {
            PageSelection::All => Ok((0..layout.len()).collect()),
            PageSelection::Visible => {
                let viewport = viewport.ok_or(PrintError::MissingViewport)?;
                Ok(layout.visible(viewport))
            }
            PageSelection::Range { start, end } => {
                if start == 0 || end < start {
                    return Err(PrintError::EmptyRange { start, end });
                }
                let end = end.min(layout.len());
                if start > end {
                    return Err(PrintError::EmptyRange { start, end });
                }
                Ok((start - 1..end).collect())
            }
        }
    }
}

impl FromStr for PageSelection {
    type Err = PrintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "all" => return Ok(PageSelection::All),
            "visible" => return Ok(PageSelection::Visible),
            _ => {}
        }

        if let Some((from, to)) = s.split_once('-') {
            let start = from.trim().parse::<usize>();
            let end = to.trim().parse::<usize>();
            if let (Ok(start), Ok(end)) = (start, end) {
                return Ok(PageSelection::Range { start, end });
            }
        } else if let Ok(page) = s.parse::<usize>() {
            return Ok(PageSelection::Range {
                start: page,
                end: page,
            });
        }

        Err(PrintError::InvalidSelection(s.to_string()))
    }
}

/// Where a page image lands inside the printable area, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Left offset inside the printable area.
    pub x: u32,
    /// Top offset inside the printable area.
    pub y: u32,
    /// Scaled width.
    pub width: u32,
    /// Scaled height.
    pub height: u32,
}

/// Scale a page to fit the printable area, preserving aspect ratio and
/// centering the result.
///
/// # Errors
///
/// Returns `PrintError::InvalidPrintableArea` if either printable
/// dimension is zero.
pub fn fit_to_page(
    page_width: u32,
    page_height: u32,
    printable_width: u32,
    printable_height: u32,
) -> Result<Placement, PrintError> {
    if printable_width == 0 || printable_height == 0 {
        return Err(PrintError::InvalidPrintableArea {
            width: printable_width,
            height: printable_height,
        });
    }

    let scale_w = printable_width as f64 / page_width as f64;
    let scale_h = printable_height as f64 / page_height as f64;
    let scale = scale_w.min(scale_h);

    let width = (page_width as f64 * scale) as u32;
    let height = (page_height as f64 * scale) as u32;

    Ok(Placement {
        x: (printable_width - width) / 2,
        y: (printable_height - height) / 2,
        width,
        height,
    })
}

/// One entry of a print plan: a page and its placement on the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintPage {
    /// 0-based page index into the layout.
    pub page_index: usize,
    /// Placement inside the printable area.
    pub placement: Placement,
}

/// An ordered print plan for a selection of pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintPlan {
    pages: Vec<PrintPage>,
}

impl PrintPlan {
    /// Build a plan for the selected pages against a printable area.
    ///
    /// # Arguments
    ///
    /// * `layout` - Page layout in slicing order
    /// * `selection` - Which pages to print
    /// * `viewport` - Current view, required for `Visible` selections
    /// * `printable_width` / `printable_height` - Device printable area
    ///
    /// # Errors
    ///
    /// Propagates selection and printable-area validation errors.
    pub fn new(
        layout: &Layout,
        selection: PageSelection,
        viewport: Option<&Viewport>,
        printable_width: u32,
        printable_height: u32,
    ) -> Result<Self, PrintError> {
        let indices = selection.resolve(layout, viewport)?;
        let mut pages = Vec::with_capacity(indices.len());
        for index in indices {
            // Indices come from the layout, so the lookup cannot miss.
            if let Some(rect) = layout.get(index) {
                let placement =
                    fit_to_page(rect.width, rect.height, printable_width, printable_height)?;
                pages.push(PrintPage {
                    page_index: index,
                    placement,
                });
            }
        }
        Ok(Self { pages })
    }

    /// Pages in print order.
    pub fn pages(&self) -> &[PrintPage] {
        &self.pages
    }

    /// Number of sheets this plan produces.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the plan prints nothing.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_tiling, ImageGeometry, PageSpec};

    fn three_page_layout() -> Layout {
        let geometry = ImageGeometry::new(3000, 850).unwrap();
        compute_tiling(&geometry, &PageSpec::default()).unwrap()
    }

    #[test]
    fn test_parse_selection_keywords() {
        assert_eq!("all".parse::<PageSelection>().unwrap(), PageSelection::All);
        assert_eq!(
            "Visible".parse::<PageSelection>().unwrap(),
            PageSelection::Visible
        );
    }

    #[test]
    fn test_parse_selection_range_and_single() {
        assert_eq!(
            "2-5".parse::<PageSelection>().unwrap(),
            PageSelection::Range { start: 2, end: 5 }
        );
        assert_eq!(
            "4".parse::<PageSelection>().unwrap(),
            PageSelection::Range { start: 4, end: 4 }
        );
    }

    #[test]
    fn test_parse_selection_rejects_garbage() {
        for input in ["", "1-2-3", "x-y", "pages"] {
            assert!(matches!(
                input.parse::<PageSelection>().unwrap_err(),
                PrintError::InvalidSelection(_)
            ));
        }
    }

    #[test]
    fn test_resolve_all() {
        let layout = three_page_layout();
        let indices = PageSelection::All.resolve(&layout, None).unwrap();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_resolve_range_is_one_based_and_clamped() {
        let layout = three_page_layout();

        let indices = PageSelection::Range { start: 2, end: 3 }
            .resolve(&layout, None)
            .unwrap();
        assert_eq!(indices, vec![1, 2]);

        // Over-long range clamps to the layout.
        let indices = PageSelection::Range { start: 1, end: 99 }
            .resolve(&layout, None)
            .unwrap();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_resolve_rejects_empty_range() {
        let layout = three_page_layout();
        assert!(PageSelection::Range { start: 3, end: 2 }
            .resolve(&layout, None)
            .is_err());
        assert!(PageSelection::Range { start: 0, end: 2 }
            .resolve(&layout, None)
            .is_err());
    }

    #[test]
    fn test_resolve_visible_requires_viewport() {
        let layout = three_page_layout();
        assert_eq!(
            PageSelection::Visible.resolve(&layout, None).unwrap_err(),
            PrintError::MissingViewport
        );

        let viewport = Viewport::new(0.0, 0.0, 1200.0, 850.0);
        let indices = PageSelection::Visible
            .resolve(&layout, Some(&viewport))
            .unwrap();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_fit_to_page_wide_page() {
        // 1100x850 page into a 1000x1000 printable area: width-bound.
        let placement = fit_to_page(1100, 850, 1000, 1000).unwrap();
        assert_eq!(placement.width, 1000);
        assert_eq!(placement.x, 0);
        // 850 * (1000/1100) = 772.7 -> 772, centered vertically.
        assert_eq!(placement.height, 772);
        assert_eq!(placement.y, (1000 - 772) / 2);
    }

    #[test]
    fn test_fit_to_page_upscales_small_page() {
        let placement = fit_to_page(100, 100, 400, 600).unwrap();
        assert_eq!(placement.width, 400);
        assert_eq!(placement.height, 400);
        assert_eq!((placement.x, placement.y), (0, 100));
    }

    #[test]
    fn test_fit_to_page_rejects_zero_area() {
        assert!(fit_to_page(100, 100, 0, 600).is_err());
    }

    #[test]
    fn test_print_plan_clipped_page_scales_differently() {
        // The clipped 800px-wide page gets its own placement; fit-to-page
        // compensates so nothing is stretched.
        let layout = three_page_layout();
        let plan = PrintPlan::new(&layout, PageSelection::All, None, 3300, 2550).unwrap();

        assert_eq!(plan.len(), 3);
        let full = plan.pages()[0].placement;
        let clipped = plan.pages()[2].placement;
        assert_eq!(full.width, 3300);
        assert!(clipped.width < full.width);
        assert_eq!(clipped.height, full.height, "same scale-to-height");
    }
}
