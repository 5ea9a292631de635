//! `export` command: write selected pages as image files.

use std::path::PathBuf;

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use panoslice::config::ConfigFile;
use panoslice::export::PageExporter;
use panoslice::layout::Viewport;
use panoslice::print::PageSelection;
use rayon::prelude::*;
use tracing::info;

use crate::commands::common::{
    image_stem, layout_for_image, open_image, parse_viewport, SliceArgs,
};
use crate::error::CliError;

/// Arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Source image file
    pub image: PathBuf,

    /// Pages to export: 'all', 'visible', a page number, or 'N-M'
    #[arg(long, default_value = "all")]
    pub pages: String,

    /// Viewport as x,y,width,height in image coordinates (required for
    /// --pages visible)
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<Viewport>,

    /// Output directory (defaults to the configured directory, then the
    /// image's directory)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Pad clipped edge pages with white to the full page size
    #[arg(long)]
    pub pad: bool,

    #[command(flatten)]
    pub slice: SliceArgs,
}

/// Run the export command.
pub fn run(args: ExportArgs) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let image = open_image(&args.image)?;
    let layout = layout_for_image(&image, &args.slice, &config)?;

    let selection: PageSelection = args.pages.parse()?;
    let indices = selection.resolve(&layout, args.viewport.as_ref())?;
    if indices.is_empty() {
        println!("No pages selected.");
        return Ok(());
    }

    let output_dir = resolve_output_dir(&args, &config);
    std::fs::create_dir_all(&output_dir).map_err(|source| {
        CliError::Export(panoslice::export::ExportError::Io {
            path: output_dir.clone(),
            source,
        })
    })?;

    let exporter = PageExporter::new(&image, &layout, &output_dir, image_stem(&args.image))
        .with_pad_to_page(args.pad || config.export.pad_to_page);

    info!(
        pages = indices.len(),
        dir = %output_dir.display(),
        "starting export"
    );

    let bar = ProgressBar::new(indices.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_message("exporting");

    let result: Result<Vec<_>, _> = indices
        .par_iter()
        .map(|&index| {
            let path = exporter.export_page(index);
            bar.inc(1);
            path
        })
        .collect();
    bar.finish_and_clear();
    let paths = result?;

    println!("Exported {} pages to {}", paths.len(), output_dir.display());
    Ok(())
}

/// Output directory precedence: flag, then config, then next to the
/// source image.
fn resolve_output_dir(args: &ExportArgs, config: &ConfigFile) -> PathBuf {
    if let Some(dir) = &args.output_dir {
        return dir.clone();
    }
    if !config.export.output_dir.as_os_str().is_empty() {
        return config.export.output_dir.clone();
    }
    args.image
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}
