//! `plan` command: print the full page table for an image.

use std::path::PathBuf;

use clap::Args;
use panoslice::config::ConfigFile;

use crate::commands::common::{layout_for_image, open_image, SliceArgs};
use crate::error::CliError;

/// Arguments for the plan command.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Source image file
    pub image: PathBuf,

    #[command(flatten)]
    pub slice: SliceArgs,
}

/// Run the plan command.
pub fn run(args: PlanArgs) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let image = open_image(&args.image)?;
    let layout = layout_for_image(&image, &args.slice, &config)?;

    println!(
        "{:>5}  {:>4}  {:>4}  {:>7}  {:>7}  {:>7}  {:>7}",
        "page", "row", "col", "x", "y", "width", "height"
    );
    for page in layout.pages() {
        println!(
            "{:>5}  {:>4}  {:>4}  {:>7}  {:>7}  {:>7}  {:>7}",
            page.page_index + 1,
            page.row_index,
            page.column_index,
            page.x,
            page.y,
            page.width,
            page.height
        );
    }

    Ok(())
}
