//! CLI error type.

use std::path::PathBuf;

use panoslice::config::ConfigError;
use panoslice::export::ExportError;
use panoslice::layout::LayoutError;
use panoslice::print::PrintError;

/// Errors surfaced to the CLI user.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Source image could not be opened or decoded.
    #[error("failed to open image {path}: {source}")]
    ImageOpen {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Layout computation rejected the input.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Page export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Print plan resolution failed.
    #[error(transparent)]
    Print(#[from] PrintError),

    /// Configuration load/save/key failure.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Bad command-line argument combination.
    #[error("{0}")]
    InvalidArgument(String),
}
