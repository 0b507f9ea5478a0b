use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use scenegrade_core::assistant::SceneAssistant;
use scenegrade_core::scene::{Confidence, SceneObservation};

use super::load_config;
use crate::summary::{print_grading, print_suggestion};

#[derive(Args)]
pub struct SuggestArgs {
    /// Scene label, as a classifier would report it (e.g. "Sunset")
    pub label: String,

    /// Confidence reported with the label (low, medium, high)
    #[arg(long, default_value = "high")]
    pub confidence: Confidence,

    /// Config file (TOML) with custom presets and scene rules
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Show the suggestion for a label and the grading accepting it would give.
pub fn run(args: &SuggestArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut assistant = SceneAssistant::new(&config);
    let now = Instant::now();

    let observation = SceneObservation::new(args.label.clone(), args.confidence);
    assistant.on_observation(Some(&observation), now);

    println!();
    print_suggestion(assistant.visible());
    if let Some(chain) = assistant.apply(now).into_chain() {
        let preset = assistant
            .session()
            .active_preset()
            .and_then(|id| assistant.catalog().get(id).ok());
        print_grading(assistant.session().base(), preset, &chain);
    } else {
        println!();
    }
    Ok(())
}
