mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scenegrade", about = "Scene-aware colour grading presets")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the filter preset catalog
    Presets(commands::presets::PresetsArgs),
    /// Compose a filter chain from parameters and a preset
    Compose(commands::compose::ComposeArgs),
    /// Apply a filter chain to image files
    Render(commands::render::RenderArgs),
    /// Classify an image and show the suggested preset
    Classify(commands::classify::ClassifyArgs),
    /// Show the suggestion for a scene label
    Suggest(commands::suggest::SuggestArgs),
    /// Sample a directory of frames and print live suggestions
    Watch(commands::watch::WatchArgs),
    /// Print or save the default configuration as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Compose(args) => commands::compose::run(args),
        Commands::Render(args) => commands::render::run(args),
        Commands::Classify(args) => commands::classify::run(args),
        Commands::Suggest(args) => commands::suggest::run(args),
        Commands::Watch(args) => commands::watch::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
