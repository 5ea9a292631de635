//! Common types and utilities shared across CLI commands.

use std::path::Path;

use clap::ValueEnum;
use image::DynamicImage;
use panoslice::config::ConfigFile;
use panoslice::layout::{
    compute_tiling, ImageGeometry, Layout, PageSpec, SliceDirection, StartPoint, Viewport,
};

use crate::error::CliError;

/// Slicing direction selection for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Slice from the left edge rightward
    Ltr,
    /// Slice from the right edge leftward
    Rtl,
}

impl From<DirectionArg> for SliceDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Ltr => SliceDirection::LeftToRight,
            DirectionArg::Rtl => SliceDirection::RightToLeft,
        }
    }
}

/// Layout-related flags shared by the info, plan, and export commands.
#[derive(Debug, clap::Args)]
pub struct SliceArgs {
    /// Page aspect ratio as width/height (defaults to the configured
    /// value, 11/8.5 landscape letter out of the box)
    #[arg(long)]
    pub aspect: Option<f64>,

    /// Slicing direction (defaults to the configured value)
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Horizontal start coordinate in pixels (left edge of page 1 for
    /// ltr, right edge for rtl)
    #[arg(long)]
    pub start_x: Option<u32>,

    /// Vertical start coordinate in pixels
    #[arg(long)]
    pub start_y: Option<u32>,

    /// Cap row height in pixels, stacking rows for tall images
    #[arg(long)]
    pub row_height: Option<u32>,
}

impl SliceArgs {
    /// Build a page spec from these flags, falling back to config
    /// defaults. The geometry is needed to default the start x for
    /// right-to-left slicing when only a start y is given.
    pub fn to_spec(&self, config: &ConfigFile, geometry: &ImageGeometry) -> PageSpec {
        let aspect = self.aspect.unwrap_or(config.page.aspect_ratio);
        let direction = self
            .direction
            .map(SliceDirection::from)
            .unwrap_or(config.page.direction);

        let mut spec = PageSpec::new(aspect).with_direction(direction);

        if self.start_x.is_some() || self.start_y.is_some() {
            let default_x = match direction {
                SliceDirection::LeftToRight => 0,
                SliceDirection::RightToLeft => geometry.width(),
            };
            spec = spec.with_start(StartPoint::new(
                self.start_x.unwrap_or(default_x),
                self.start_y.unwrap_or(0),
            ));
        }

        if let Some(cap) = self.row_height {
            spec = spec.with_max_row_height(cap);
        }

        spec
    }
}

/// Open a source image, mapping decode failures to a CLI error.
pub fn open_image(path: &Path) -> Result<DynamicImage, CliError> {
    image::open(path).map_err(|source| CliError::ImageOpen {
        path: path.to_path_buf(),
        source,
    })
}

/// Compute a layout for an image with the given flags and config.
pub fn layout_for_image(
    image: &DynamicImage,
    args: &SliceArgs,
    config: &ConfigFile,
) -> Result<Layout, CliError> {
    let geometry = ImageGeometry::new(image.width(), image.height())?;
    let spec = args.to_spec(config, &geometry);
    Ok(compute_tiling(&geometry, &spec)?)
}

/// Filename stem for output files: the source basename without its
/// extension.
pub fn image_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "page".to_string())
}

/// Parse a viewport argument of the form `x,y,width,height`.
pub fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err("expected x,y,width,height".to_string());
    }
    let mut values = [0.0f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid number '{}'", part.trim()))?;
    }
    if values[2] <= 0.0 || values[3] <= 0.0 {
        return Err("viewport width and height must be positive".to_string());
    }
    Ok(Viewport::new(values[0], values[1], values[2], values[3]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_viewport() {
        let viewport = parse_viewport("10, 0, 800.5, 600").unwrap();
        assert_eq!(viewport.x, 10.0);
        assert_eq!(viewport.width, 800.5);

        assert!(parse_viewport("1,2,3").is_err());
        assert!(parse_viewport("1,2,0,4").is_err());
        assert!(parse_viewport("a,b,c,d").is_err());
    }

    #[test]
    fn test_to_spec_defaults_from_config() {
        let mut config = ConfigFile::default();
        config.page.direction = SliceDirection::RightToLeft;
        let geometry = ImageGeometry::new(1000, 500).unwrap();

        let args = SliceArgs {
            aspect: None,
            direction: None,
            start_x: None,
            start_y: None,
            row_height: None,
        };
        let spec = args.to_spec(&config, &geometry);
        assert_eq!(spec.direction(), SliceDirection::RightToLeft);
        assert!(spec.start().is_none());
    }

    #[test]
    fn test_to_spec_start_y_defaults_rtl_x_to_width() {
        let config = ConfigFile::default();
        let geometry = ImageGeometry::new(1000, 500).unwrap();

        let args = SliceArgs {
            aspect: None,
            direction: Some(DirectionArg::Rtl),
            start_x: None,
            start_y: Some(100),
            row_height: None,
        };
        let spec = args.to_spec(&config, &geometry);
        assert_eq!(spec.start(), Some(StartPoint::new(1000, 100)));
    }

    #[test]
    fn test_image_stem() {
        assert_eq!(image_stem(Path::new("/tmp/pano.tif")), "pano");
        assert_eq!(image_stem(Path::new("beach.panorama.png")), "beach.panorama");
    }
}
