use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use super::load_config;
use crate::summary::print_catalog;

#[derive(Args)]
pub struct PresetsArgs {
    /// Config file (TOML) with custom presets to include
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &PresetsArgs) -> Result<()> {
    let catalog = load_config(args.config.as_deref())?.catalog();
    if args.json {
        let presets: Vec<_> = catalog.iter().collect();
        println!("{}", serde_json::to_string_pretty(&presets)?);
    } else {
        print_catalog(&catalog);
    }
    Ok(())
}
