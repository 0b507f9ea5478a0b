use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use scenegrade_core::config::AssistantConfig;
use scenegrade_core::suggest::Recommender;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save the default configuration as TOML, including the built-in
/// scene rules as a starting point for customisation.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = AssistantConfig {
        scenes: Recommender::builtin_rules(),
        ..AssistantConfig::default()
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
