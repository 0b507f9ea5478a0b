use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use scenegrade_core::grading::compose;
use scenegrade_core::io::{load_image, save_image};
use scenegrade_core::render::apply_chain;
use tracing::info;

use super::GradingArgs;
use crate::summary::print_grading;

#[derive(Args)]
pub struct RenderArgs {
    /// Input image files
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub grading: GradingArgs,

    /// Output file (single input only)
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<PathBuf>,

    /// Output directory; files keep their names
    #[arg(long, default_value = "graded")]
    pub out_dir: PathBuf,
}

pub fn run(args: &RenderArgs) -> Result<()> {
    if args.output.is_some() && args.files.len() > 1 {
        anyhow::bail!("--output takes a single input; use --out-dir for several");
    }

    let catalog = args.grading.catalog()?;
    let base = args.grading.base()?;
    let preset = args.grading.preset(&catalog)?;
    let chain = compose(&base, preset);
    print_grading(&base, preset, &chain);

    let pb = if args.files.len() > 1 {
        let pb = ProgressBar::new(args.files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{msg:20} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Some(pb)
    } else {
        None
    };

    for file in &args.files {
        let dest = match &args.output {
            Some(path) => path.clone(),
            None => output_path(&args.out_dir, file),
        };
        if let Some(pb) = &pb {
            pb.set_message(file_label(file));
        }

        let img = load_image(file)
            .with_context(|| format!("Failed to load {}", file.display()))?
            .to_rgb8();
        let graded = apply_chain(&img, &chain);
        save_image(&graded, &dest)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        info!(input = %file.display(), output = %dest.display(), "Rendered");

        match &pb {
            Some(pb) => pb.inc(1),
            None => println!("Saved to {}", dest.display()),
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Done");
        println!("\n{} image(s) saved to {}", args.files.len(), args.out_dir.display());
    }
    Ok(())
}

fn output_path(out_dir: &Path, input: &Path) -> PathBuf {
    match input.file_name() {
        Some(name) => out_dir.join(name),
        None => out_dir.join("graded.png"),
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
