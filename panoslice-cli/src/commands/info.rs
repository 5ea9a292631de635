//! `info` command: summarize how an image slices into pages.

use std::path::PathBuf;

use clap::Args;
use panoslice::config::ConfigFile;
use panoslice::layout::SliceDirection;

use crate::commands::common::{layout_for_image, open_image, SliceArgs};
use crate::error::CliError;

/// Arguments for the info command.
#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Source image file
    pub image: PathBuf,

    #[command(flatten)]
    pub slice: SliceArgs,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let image = open_image(&args.image)?;
    let layout = layout_for_image(&image, &args.slice, &config)?;

    let geometry = layout.geometry();
    let spec = layout.spec();
    let rows = layout
        .pages()
        .last()
        .map_or(0, |p| p.row_index + 1);

    println!("Image:     {}", args.image.display());
    println!("Size:      {}x{} px", geometry.width(), geometry.height());
    println!("Aspect:    {:.4} (page width / height)", spec.aspect_ratio());
    println!(
        "Direction: {}",
        match spec.direction() {
            SliceDirection::LeftToRight => "left-to-right",
            SliceDirection::RightToLeft => "right-to-left",
        }
    );
    if let Some(start) = spec.start() {
        println!("Start:     ({}, {})", start.x, start.y);
    }
    if let Some(first) = layout.get(0) {
        println!("Page size: {}x{} px", first.width, first.height);
    }
    println!("Pages:     {} ({} row{})", layout.len(), rows, if rows == 1 { "" } else { "s" });

    Ok(())
}
