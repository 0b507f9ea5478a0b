#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Mutex};
use std::time::{Duration, Instant};

use image::{DynamicImage, Rgb, RgbImage};
use scenegrade_core::config::SamplerConfig;
use scenegrade_core::error::{Result, ScenegradeError};
use scenegrade_core::scene::{Classification, Confidence, FrameEncoder, SceneClassifier};

/// Uniformly coloured RGB image.
pub fn solid_rgb(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(color))
}

pub fn solid_frame(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(solid_rgb(width, height, color))
}

/// JPEG bytes of a solid colour, as the sampler would submit them.
pub fn solid_jpeg(color: [u8; 3]) -> Vec<u8> {
    FrameEncoder::new(64, 48, 95)
        .encode(&solid_frame(64, 48, color))
        .expect("encode test frame")
}

/// Fast sampler settings for thread-driven tests.
pub fn fast_sampler_config(interval_ms: u64) -> SamplerConfig {
    SamplerConfig {
        interval_ms,
        initial_delay_ms: 0,
        frame_width: 32,
        frame_height: 24,
        jpeg_quality: 80,
    }
}

pub fn sunset() -> Classification {
    Classification::new("Sunset", Confidence::High)
}

/// Classifier that blocks every call until the test releases it with a result.
pub struct GatedClassifier {
    calls: AtomicUsize,
    gate: Mutex<mpsc::Receiver<Result<Classification>>>,
}

impl GatedClassifier {
    pub fn new() -> (Self, mpsc::Sender<Result<Classification>>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                calls: AtomicUsize::new(0),
                gate: Mutex::new(rx),
            },
            tx,
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SceneClassifier for GatedClassifier {
    fn classify(&self, _frame_jpeg: &[u8]) -> Result<Classification> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self
            .gate
            .lock()
            .map_err(|_| ScenegradeError::Transport("gate poisoned".into()))?;
        gate.recv()
            .unwrap_or_else(|_| Err(ScenegradeError::Transport("gate closed".into())))
    }
}

/// Poll `cond` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    cond()
}
