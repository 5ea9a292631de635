//! Page export: cropping page tiles out of the source image and
//! writing one file per page.
//!
//! The [`PageEncoder`] trait abstracts the output format so the
//! exporter works with any codec implementation without direct
//! coupling; [`PngPageEncoder`] is the default. [`PageExporter`] owns
//! the crop/pad/encode/write pipeline and exports batches in parallel.
//!
//! Output files are named `{stem}_pageNNN.{ext}` with 1-based,
//! zero-padded page numbers matching the layout's slicing order.

mod encoder;
mod error;
mod png;

pub use encoder::PageEncoder;
pub use error::ExportError;
pub use png::PngPageEncoder;

use std::fs;
use std::path::{Path, PathBuf};

use image::{imageops, DynamicImage, Rgba, RgbaImage};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::layout::{effective_page_width, Layout, PageRect, SliceDirection};

/// Exports page tiles from a source image according to a [`Layout`].
///
/// # Example
///
/// ```no_run
/// use panoslice::export::PageExporter;
/// use panoslice::layout::{compute_tiling, ImageGeometry, PageSpec};
///
/// let image = image::open("panorama.png").unwrap();
/// let geometry = ImageGeometry::new(image.width(), image.height()).unwrap();
/// let layout = compute_tiling(&geometry, &PageSpec::default()).unwrap();
///
/// let exporter = PageExporter::new(&image, &layout, "out", "panorama");
/// let paths = exporter.export_all().unwrap();
/// println!("wrote {} pages", paths.len());
/// ```
pub struct PageExporter<'a> {
    image: &'a DynamicImage,
    layout: &'a Layout,
    output_dir: PathBuf,
    stem: String,
    encoder: Box<dyn PageEncoder>,
    pad_to_page: bool,
}

impl<'a> PageExporter<'a> {
    /// Create a new exporter writing PNG files into `output_dir`.
    ///
    /// # Arguments
    ///
    /// * `image` - Source image the layout was computed for
    /// * `layout` - Page layout in slicing order
    /// * `output_dir` - Directory for output files (must exist)
    /// * `stem` - Filename stem, typically the source file's basename
    pub fn new(
        image: &'a DynamicImage,
        layout: &'a Layout,
        output_dir: impl Into<PathBuf>,
        stem: impl Into<String>,
    ) -> Self {
        Self {
            image,
            layout,
            output_dir: output_dir.into(),
            stem: stem.into(),
            encoder: Box::new(PngPageEncoder::new()),
            pad_to_page: false,
        }
    }

    /// Replace the output encoder.
    pub fn with_encoder(mut self, encoder: Box<dyn PageEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Pad clipped edge tiles with white to the row's nominal page
    /// width, keeping the printed scale identical across all sheets.
    ///
    /// Padding goes on the side away from the slice origin: the right
    /// for left-to-right layouts, the left for right-to-left. The
    /// layout itself is never padded; this only affects output pixels.
    pub fn with_pad_to_page(mut self, pad: bool) -> Self {
        self.pad_to_page = pad;
        self
    }

    /// Output path for a page, without writing anything.
    pub fn page_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!(
            "{}_page{:03}.{}",
            self.stem,
            index + 1,
            self.encoder.extension()
        ))
    }

    /// Crop (and optionally pad) the pixels for one page.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::PageOutOfRange` for an unknown index.
    pub fn page_image(&self, index: usize) -> Result<RgbaImage, ExportError> {
        let rect = self.page_rect(index)?;
        let crop = self
            .image
            .crop_imm(rect.x, rect.y, rect.width, rect.height)
            .to_rgba8();

        if !self.pad_to_page {
            return Ok(crop);
        }

        let nominal = effective_page_width(rect.height, self.layout.spec().aspect_ratio());
        if rect.width >= nominal {
            return Ok(crop);
        }

        // White canvas at the nominal page size, content aligned to the
        // slice origin side.
        let mut canvas =
            RgbaImage::from_pixel(nominal, rect.height, Rgba([255, 255, 255, 255]));
        let offset = match self.layout.spec().direction() {
            SliceDirection::LeftToRight => 0,
            SliceDirection::RightToLeft => (nominal - rect.width) as i64,
        };
        imageops::replace(&mut canvas, &crop, offset, 0);
        Ok(canvas)
    }

    /// Export one page to disk, returning the written path.
    ///
    /// # Errors
    ///
    /// Returns `ExportError` on unknown index, encode failure, or I/O
    /// failure.
    pub fn export_page(&self, index: usize) -> Result<PathBuf, ExportError> {
        let image = self.page_image(index)?;
        let data = self.encoder.encode(&image)?;
        let path = self.page_path(index);

        fs::write(&path, data).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(
            page = index + 1,
            path = %path.display(),
            encoder = self.encoder.name(),
            "exported page"
        );
        Ok(path)
    }

    /// Export a set of pages in parallel, returning paths in input order.
    ///
    /// # Errors
    ///
    /// Returns the first `ExportError` encountered.
    pub fn export_pages(&self, indices: &[usize]) -> Result<Vec<PathBuf>, ExportError> {
        let paths = indices
            .par_iter()
            .map(|&index| self.export_page(index))
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            pages = paths.len(),
            dir = %self.output_dir.display(),
            "export complete"
        );
        Ok(paths)
    }

    /// Export every page in the layout.
    ///
    /// # Errors
    ///
    /// Returns the first `ExportError` encountered.
    pub fn export_all(&self) -> Result<Vec<PathBuf>, ExportError> {
        let indices: Vec<usize> = (0..self.layout.len()).collect();
        self.export_pages(&indices)
    }

    /// Directory the exporter writes into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn page_rect(&self, index: usize) -> Result<&PageRect, ExportError> {
        self.layout
            .get(index)
            .ok_or(ExportError::PageOutOfRange {
                index,
                count: self.layout.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute_tiling, ImageGeometry, PageSpec, StartPoint};

    /// Source image with a distinct color per x-column so crops can be
    /// verified by pixel inspection.
    fn striped_image(width: u32, height: u32) -> DynamicImage {
        let img = RgbaImage::from_fn(width, height, |x, _| {
            Rgba([(x % 256) as u8, ((x / 256) % 256) as u8, 0, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    fn layout_for(image: &DynamicImage, spec: &PageSpec) -> Layout {
        let geometry = ImageGeometry::new(image.width(), image.height()).unwrap();
        compute_tiling(&geometry, spec).unwrap()
    }

    #[test]
    fn test_page_image_crops_correct_region() {
        // Aspect 2.0 on a 16px-tall image gives 32px-wide pages.
        let image = striped_image(64, 16);
        let layout = layout_for(&image, &PageSpec::new(2.0));
        let exporter = PageExporter::new(&image, &layout, "unused", "pano");

        let page1 = exporter.page_image(1).unwrap();
        assert_eq!(page1.dimensions(), (32, 16));
        // First column of page 1 is source column 32.
        assert_eq!(page1.get_pixel(0, 0), &Rgba([32, 0, 0, 255]));
    }

    #[test]
    fn test_page_image_out_of_range() {
        let image = striped_image(64, 16);
        let layout = layout_for(&image, &PageSpec::new(2.0));
        let exporter = PageExporter::new(&image, &layout, "unused", "pano");

        assert!(matches!(
            exporter.page_image(99).unwrap_err(),
            ExportError::PageOutOfRange { index: 99, count: 2 }
        ));
    }

    #[test]
    fn test_pad_to_page_ltr_pads_right() {
        // 50px wide with 32px pages: second page is 18px, padded to 32.
        let image = striped_image(50, 16);
        let layout = layout_for(&image, &PageSpec::new(2.0));
        let exporter =
            PageExporter::new(&image, &layout, "unused", "pano").with_pad_to_page(true);

        let page = exporter.page_image(1).unwrap();
        assert_eq!(page.dimensions(), (32, 16));
        // Content at the left, white fill at the right.
        assert_eq!(page.get_pixel(0, 0), &Rgba([32, 0, 0, 255]));
        assert_eq!(page.get_pixel(31, 0), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_pad_to_page_rtl_pads_left() {
        use crate::layout::SliceDirection;

        let image = striped_image(50, 16);
        let spec = PageSpec::new(2.0).with_direction(SliceDirection::RightToLeft);
        let layout = layout_for(&image, &spec);
        let exporter =
            PageExporter::new(&image, &layout, "unused", "pano").with_pad_to_page(true);

        // Page 1 is the clipped left-edge tile (18px), padded to 32.
        let page = exporter.page_image(1).unwrap();
        assert_eq!(page.dimensions(), (32, 16));
        assert_eq!(page.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        // Content right-aligned: last column is source column 17.
        assert_eq!(page.get_pixel(31, 0), &Rgba([17, 0, 0, 255]));
    }

    #[test]
    fn test_unpadded_clipped_page_keeps_true_width() {
        let image = striped_image(50, 16);
        let layout = layout_for(&image, &PageSpec::new(2.0));
        let exporter = PageExporter::new(&image, &layout, "unused", "pano");

        let page = exporter.page_image(1).unwrap();
        assert_eq!(page.dimensions(), (18, 16));
    }

    #[test]
    fn test_export_all_writes_numbered_files() {
        let dir = tempfile::tempdir().unwrap();
        let image = striped_image(64, 16);
        let layout = layout_for(&image, &PageSpec::new(2.0));
        let exporter = PageExporter::new(&image, &layout, dir.path(), "pano");

        let paths = exporter.export_all().unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("pano_page001.png"));
        assert!(paths[1].ends_with("pano_page002.png"));
        for path in &paths {
            let decoded = image::open(path).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (32, 16));
        }
    }

    #[test]
    fn test_export_respects_start_offset() {
        let dir = tempfile::tempdir().unwrap();
        let image = striped_image(64, 16);
        let spec = PageSpec::new(2.0).with_start(StartPoint::new(10, 0));
        let layout = layout_for(&image, &spec);
        let exporter = PageExporter::new(&image, &layout, dir.path(), "pano");

        let path = exporter.export_page(0).unwrap();
        let decoded = image::open(&path).unwrap().to_rgba8();
        // Page 0 starts at source column 10.
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([10, 0, 0, 255]));
    }
}
