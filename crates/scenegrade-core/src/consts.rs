/// Minimum pixel count (w*h) to use row-level Rayon parallelism when rendering.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Neutral value of the multiplicative knobs (brightness, contrast, saturation).
pub const NEUTRAL_PERCENT: f32 = 100.0;

/// Minimum time between two samples, measured from when the previous sample
/// was taken. Also the period of the sampling timer.
pub const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 5_000;

/// Delay before the first sampling attempt after the sampler starts.
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1_000;

/// Width of the downscaled frame submitted for classification.
pub const DEFAULT_FRAME_WIDTH: u32 = 640;

/// Height of the downscaled frame submitted for classification.
pub const DEFAULT_FRAME_HEIGHT: u32 = 480;

/// Upper bound for the sampler interval and initial delay (one day).
pub const MAX_SAMPLER_DELAY_MS: u64 = 86_400_000;

/// JPEG quality (1-100) used when encoding sampled frames.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// JPEG quality for rendered output files.
pub const RENDER_JPEG_QUALITY: u8 = 92;

/// How long a suggestion stays visible before it expires on its own.
pub const DEFAULT_DISPLAY_DURATION_MS: u64 = 3_000;

/// Classifier scores at or above this are reported as high confidence.
pub const HIGH_CONFIDENCE_SCORE: f32 = 0.75;

/// Classifier scores at or above this (and below high) are medium confidence.
pub const MEDIUM_CONFIDENCE_SCORE: f32 = 0.4;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;

/// Mean luma below which the heuristic classifier reports a night scene.
pub const NIGHT_LUMA_THRESHOLD: f32 = 0.18;

/// Mean luma above which a low-saturation frame is reported as snow.
pub const SNOW_LUMA_THRESHOLD: f32 = 0.8;

/// Mean saturation below which a frame is considered colourless.
pub const LOW_SATURATION_THRESHOLD: f32 = 0.12;
