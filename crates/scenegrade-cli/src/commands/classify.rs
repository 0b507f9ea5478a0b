use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use scenegrade_core::io::load_image;
use scenegrade_core::scene::{ColorHeuristicClassifier, SceneClassifier, SceneObservation};
use scenegrade_core::suggest::Recommender;

use super::load_config;
use crate::summary::{print_classification, print_suggestion};

#[derive(Args)]
pub struct ClassifyArgs {
    /// Image to classify
    pub file: PathBuf,

    /// Config file (TOML) with custom presets and scene rules
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Classify one image the way the sampler would: downscale, JPEG-encode, then
/// run the offline classifier on the payload.
pub fn run(args: &ClassifyArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let frame = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let payload = config.sampler.encoder().encode(&frame)?;

    let result = ColorHeuristicClassifier.classify(&payload)?;
    let recommender = Recommender::with_extra_rules(Arc::new(config.catalog()), &config.scenes);
    let suggestion = recommender.recommend(&SceneObservation::new(
        result.label.clone(),
        result.confidence,
    ));

    println!();
    print_classification(&result);
    print_suggestion(suggestion.as_ref());
    println!();
    Ok(())
}
