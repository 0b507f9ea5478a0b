use tracing::debug;

use crate::consts::{
    LOW_SATURATION_THRESHOLD, LUMINANCE_B, LUMINANCE_G, LUMINANCE_R, NIGHT_LUMA_THRESHOLD,
    SNOW_LUMA_THRESHOLD,
};
use crate::error::Result;

use super::observation::{Classification, Confidence};

/// Classification transport: turns an encoded (JPEG) frame into a scene label.
///
/// Implementations may block (e.g. a remote inference call). The sampler runs
/// each call off its own thread and never has more than one outstanding.
/// Timeouts are the implementation's concern and should be reported as
/// [`ScenegradeError::Transport`](crate::error::ScenegradeError::Transport).
pub trait SceneClassifier: Send + Sync {
    fn classify(&self, frame_jpeg: &[u8]) -> Result<Classification>;
}

impl<F> SceneClassifier for F
where
    F: Fn(&[u8]) -> Result<Classification> + Send + Sync,
{
    fn classify(&self, frame_jpeg: &[u8]) -> Result<Classification> {
        self(frame_jpeg)
    }
}

/// Offline classifier that labels a frame from its colour statistics.
///
/// Dark frames are `Night`, bright colourless frames `Snow`, other colourless
/// frames `City`. Otherwise the dominant hue family decides: warm hues are
/// `Sunset`, greens `Foliage`, blues `Sky` (bright) or `Ocean` (dark).
/// Confidence is the share of pixels in the dominant hue family.
#[derive(Clone, Copy, Debug, Default)]
pub struct ColorHeuristicClassifier;

/// Hue families, in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HueFamily {
    Warm,
    Green,
    Blue,
    Magenta,
}

impl HueFamily {
    fn of(hue: f32) -> Self {
        match hue {
            h if !(50.0..330.0).contains(&h) => Self::Warm,
            h if h < 170.0 => Self::Green,
            h if h < 260.0 => Self::Blue,
            _ => Self::Magenta,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
struct ColorStats {
    mean_luma: f32,
    mean_saturation: f32,
    /// Fraction of all pixels falling in each hue family (colourful pixels only).
    hue_share: [f32; 4],
}

fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let hue = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let sat = if max <= f32::EPSILON { 0.0 } else { delta / max };
    (hue, sat, max)
}

fn color_stats(img: &image::RgbImage) -> ColorStats {
    let total = (img.width() as usize * img.height() as usize).max(1) as f32;
    let mut luma_sum = 0.0f32;
    let mut sat_sum = 0.0f32;
    let mut counts = [0usize; 4];

    for px in img.pixels() {
        let [r, g, b] = px.0.map(|c| c as f32 / 255.0);
        luma_sum += LUMINANCE_R * r + LUMINANCE_G * g + LUMINANCE_B * b;
        let (hue, sat, val) = rgb_to_hsv(r, g, b);
        sat_sum += sat;
        if sat > 0.2 && val > 0.15 {
            counts[HueFamily::of(hue).index()] += 1;
        }
    }

    ColorStats {
        mean_luma: luma_sum / total,
        mean_saturation: sat_sum / total,
        hue_share: counts.map(|c| c as f32 / total),
    }
}

fn label_for(stats: &ColorStats) -> Classification {
    if stats.mean_luma < NIGHT_LUMA_THRESHOLD {
        let score = 1.0 - stats.mean_luma / NIGHT_LUMA_THRESHOLD;
        return Classification::new("Night", Confidence::from_score(0.5 + score / 2.0));
    }
    if stats.mean_saturation < LOW_SATURATION_THRESHOLD {
        return if stats.mean_luma > SNOW_LUMA_THRESHOLD {
            Classification::new("Snow", Confidence::Medium)
        } else {
            Classification::new("City", Confidence::Low)
        };
    }

    let families = [
        HueFamily::Warm,
        HueFamily::Green,
        HueFamily::Blue,
        HueFamily::Magenta,
    ];
    let (family, share) = families
        .into_iter()
        .map(|f| (f, stats.hue_share[f.index()]))
        .fold((HueFamily::Warm, -1.0f32), |best, cur| {
            if cur.1 > best.1 {
                cur
            } else {
                best
            }
        });

    let label = match family {
        HueFamily::Warm | HueFamily::Magenta => "Sunset",
        HueFamily::Green => "Foliage",
        HueFamily::Blue if stats.mean_luma >= 0.5 => "Sky",
        HueFamily::Blue => "Ocean",
    };
    Classification::new(label, Confidence::from_score(share))
}

impl SceneClassifier for ColorHeuristicClassifier {
    fn classify(&self, frame_jpeg: &[u8]) -> Result<Classification> {
        let img = image::load_from_memory(frame_jpeg)?.to_rgb8();
        let stats = color_stats(&img);
        let result = label_for(&stats);
        debug!(
            label = %result.label,
            confidence = %result.confidence,
            luma = stats.mean_luma,
            saturation = stats.mean_saturation,
            "Heuristic classification"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_hsv_primaries() {
        let (h, s, v) = rgb_to_hsv(1.0, 0.0, 0.0);
        assert!(h.abs() < 1e-4 && (s - 1.0).abs() < 1e-6 && (v - 1.0).abs() < 1e-6);
        let (h, _, _) = rgb_to_hsv(0.0, 1.0, 0.0);
        assert!((h - 120.0).abs() < 1e-4);
        let (h, _, _) = rgb_to_hsv(0.0, 0.0, 1.0);
        assert!((h - 240.0).abs() < 1e-4);
    }

    #[test]
    fn test_hue_family_wraps_red() {
        assert_eq!(HueFamily::of(10.0), HueFamily::Warm);
        assert_eq!(HueFamily::of(350.0), HueFamily::Warm);
        assert_eq!(HueFamily::of(120.0), HueFamily::Green);
        assert_eq!(HueFamily::of(210.0), HueFamily::Blue);
        assert_eq!(HueFamily::of(290.0), HueFamily::Magenta);
    }

    #[test]
    fn test_label_for_dark_frame_is_night() {
        let stats = ColorStats {
            mean_luma: 0.05,
            ..Default::default()
        };
        assert_eq!(label_for(&stats).label, "Night");
    }
}
