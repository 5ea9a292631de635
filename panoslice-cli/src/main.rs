//! Panoslice CLI - slice large panoramas into printable pages.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::config::ConfigCommands;
use commands::export::ExportArgs;
use commands::info::InfoArgs;
use commands::plan::PlanArgs;

#[derive(Debug, Parser)]
#[command(
    name = "panoslice",
    version,
    about = "Slice large panoramic images into printable pages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show how an image slices into pages
    Info(InfoArgs),

    /// Print the full page table for an image
    Plan(PlanArgs),

    /// Export pages as image files
    Export(ExportArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
