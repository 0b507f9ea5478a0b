use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use console::Style;
use image::DynamicImage;
use scenegrade_core::assistant::{ApplyOutcome, SceneAssistant};
use scenegrade_core::io::{list_images, load_image};
use scenegrade_core::scene::{ColorHeuristicClassifier, FrameSource, SceneSampler};
use scenegrade_core::suggest::PresenterEvent;
use tracing::debug;

use super::load_config;
use crate::summary::print_presenter_event;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Args)]
pub struct WatchArgs {
    /// Directory of frames, played back in name order and looped
    pub dir: PathBuf,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How long to watch, in seconds
    #[arg(long, default_value = "30")]
    pub duration: u64,

    /// Override the sampling interval (milliseconds)
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Accept every suggestion as soon as it is shown
    #[arg(long)]
    pub auto_apply: bool,
}

/// Frame source that advances to the next image in a directory on every read.
struct DirectoryFrameSource {
    paths: Vec<PathBuf>,
    next: AtomicUsize,
}

impl DirectoryFrameSource {
    fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            next: AtomicUsize::new(0),
        }
    }
}

impl FrameSource for DirectoryFrameSource {
    fn current_frame(&self) -> Option<DynamicImage> {
        if self.paths.is_empty() {
            return None;
        }
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.paths.len();
        let path = &self.paths[idx];
        match load_image(path) {
            Ok(frame) => {
                debug!(frame = %path.display(), "Loaded frame");
                Some(frame)
            }
            Err(e) => {
                debug!(frame = %path.display(), error = %e, "Unreadable frame");
                None
            }
        }
    }
}

pub fn run(args: &WatchArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(ms) = args.interval_ms {
        config.sampler.interval_ms = ms;
    }

    let paths = list_images(&args.dir)
        .with_context(|| format!("Failed to read {}", args.dir.display()))?;
    if paths.is_empty() {
        anyhow::bail!("No images found in {}", args.dir.display());
    }

    let title = Style::new().cyan().bold();
    let dim = Style::new().dim();
    println!();
    println!(
        "  {} {}",
        title.apply_to("Watching"),
        dim.apply_to(format!(
            "{} frame(s), every {} ms, for {} s",
            paths.len(),
            config.sampler.interval_ms,
            args.duration
        ))
    );
    println!();

    let deadline = Instant::now()
        .checked_add(Duration::from_secs(args.duration))
        .with_context(|| format!("--duration {} is too large", args.duration))?;
    let source = Arc::new(DirectoryFrameSource::new(paths));
    let (sampler, events) =
        SceneSampler::spawn(&config.sampler, source, Arc::new(ColorHeuristicClassifier))?;
    let mut assistant = SceneAssistant::new(&config);

    while Instant::now() < deadline {
        std::thread::sleep(POLL_INTERVAL);
        let now = Instant::now();
        for event in assistant.drain(&events, now) {
            print_presenter_event(&event);
        }
        if args.auto_apply && assistant.visible().is_some() {
            match assistant.apply(now) {
                ApplyOutcome::Applied { suggestion, chain } => println!(
                    "  {:<10}{} {}",
                    title.apply_to("apply"),
                    suggestion.preset_id,
                    dim.apply_to(chain)
                ),
                ApplyOutcome::Expired(suggestion) => {
                    print_presenter_event(&PresenterEvent::Expired(suggestion))
                }
                ApplyOutcome::Unresolved(_) | ApplyOutcome::NothingVisible => {}
            }
        }
    }

    sampler.stop();
    println!();
    match assistant.session().active_preset() {
        Some(id) => println!("  Final preset: {id}"),
        None => println!("  Final preset: none"),
    }
    Ok(())
}
